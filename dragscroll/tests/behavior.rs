use std::time::{Duration, Instant};

use dragscroll::{
    Container, DragHost, DragScroll, DragScrollConfig, DragState, Event, EventResult, Immediate,
    MouseButton, Node, PointerEvent, Rect, ScrollWrite,
};

const WINDOW: Duration = Duration::from_millis(16);

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// 1000 wide content in a 400 wide viewport at the left edge of the page.
fn overflowing() -> Container {
    Container::new("strip")
        .bounds(Rect::new(0, 0, 400, 1))
        .content(1000)
        .scrolled_to(50)
}

fn fitting() -> Container {
    Container::new("strip")
        .bounds(Rect::new(0, 0, 400, 1))
        .content(300)
}

fn attached(container: &mut Container) -> DragScroll {
    let mut drag = DragScroll::new();
    drag.on_attach(container);
    drag
}

/// Zero throttle window with synchronous writes.
fn immediate(config: DragScrollConfig) -> DragScroll<Immediate> {
    DragScroll::with_scheduler(config.throttle_window(Duration::ZERO), Immediate).unwrap()
}

// =============================================================================
// Attachment and Resize
// =============================================================================

#[test]
fn test_attach_overflowing_enables_scroll() {
    let mut strip = overflowing();
    let drag = attached(&mut strip);

    assert!(drag.scroll_enabled());
    assert!(strip.has_marker("draggable"));
    assert!(!drag.is_dragging());
}

#[test]
fn test_attach_fitting_disables_scroll() {
    let mut strip = fitting().marker("draggable");
    let drag = attached(&mut strip);

    assert!(!drag.scroll_enabled());
    // A stale marker is removed on attach
    assert!(!strip.has_marker("draggable"));
}

#[test]
fn test_attach_equal_widths_is_not_overflow() {
    let mut strip = Container::new("strip")
        .bounds(Rect::new(0, 0, 400, 1))
        .content(400);
    let drag = attached(&mut strip);

    assert!(!drag.scroll_enabled());
}

#[test]
fn test_resize_removes_affordance_when_content_fits() {
    let mut strip = overflowing();
    let mut drag = attached(&mut strip);

    strip.set_content_width(300);
    assert!(drag.on_window_resize(&mut strip));
    assert!(!drag.scroll_enabled());
    assert!(!strip.has_marker("draggable"));

    // Presses are ignored from now on
    let press = PointerEvent::new(200, 0);
    assert_eq!(drag.on_press_start(&mut strip, &press), EventResult::Ignored);
    assert!(!drag.is_dragging());
}

#[test]
fn test_resize_preserving_overflow_is_noop() {
    let mut strip = overflowing();
    let mut drag = attached(&mut strip);

    strip.resize(500);
    assert!(!drag.on_window_resize(&mut strip));
    assert!(drag.scroll_enabled());
    assert!(strip.has_marker("draggable"));
}

#[test]
fn test_resize_restores_affordance() {
    let mut strip = fitting();
    let mut drag = attached(&mut strip);

    strip.resize(200);
    assert!(drag.on_window_resize(&mut strip));
    assert!(drag.scroll_enabled());
    assert!(strip.has_marker("draggable"));

    // Same size again: nothing to do
    assert!(!drag.on_window_resize(&mut strip));
}

// =============================================================================
// Gating
// =============================================================================

#[test]
fn test_fitting_container_never_scrolls() {
    let mut strip = fitting();
    let mut drag = attached(&mut strip);
    let t0 = Instant::now();

    assert_eq!(
        drag.on_press_start(&mut strip, &PointerEvent::new(200, 0)),
        EventResult::Ignored
    );
    assert_eq!(
        drag.on_pointer_move(&mut strip, &PointerEvent::new(100, 0), t0),
        EventResult::Ignored
    );
    assert!(!drag.poll(&mut strip, t0 + WINDOW));
    assert_eq!(drag.on_frame(&mut strip), 0);

    assert_eq!(strip.scroll_left(), 0);
    assert!(!strip.has_marker("user-select-disable"));
}

#[test]
fn test_move_without_press_is_ignored() {
    let mut strip = overflowing();
    let mut drag = attached(&mut strip);
    let t0 = Instant::now();

    assert_eq!(
        drag.on_pointer_move(&mut strip, &PointerEvent::new(100, 0), t0),
        EventResult::Ignored
    );
    assert!(drag.next_deadline().is_none());
    assert_eq!(strip.scroll_left(), 50);
}

#[test]
fn test_non_left_button_does_not_start_drag() {
    let mut strip = overflowing();
    let mut drag = attached(&mut strip);

    let press = PointerEvent::new(200, 0).button(MouseButton::Right);
    assert_eq!(drag.on_press_start(&mut strip, &press), EventResult::Ignored);
    assert!(!drag.is_dragging());
}

// =============================================================================
// Drag Gesture
// =============================================================================

#[test]
fn test_press_starts_drag() {
    let mut strip = overflowing();
    strip.select("card 01");
    let mut drag = attached(&mut strip);

    let result = drag.on_press_start(&mut strip, &PointerEvent::new(500, 0));

    assert_eq!(result, EventResult::StartDrag);
    assert!(result.is_handled());
    assert!(drag.is_dragging());
    assert_eq!(drag.session().anchor(), Some((500, 50)));
    assert_eq!(
        drag.session().state(),
        DragState::Dragging {
            anchor_x: 500,
            anchor_scroll: 50
        }
    );
    assert!(strip.has_marker("user-select-disable"));
    assert_eq!(strip.selection(), None);
}

#[test]
fn test_anchor_is_relative_to_container() {
    let mut strip = Container::new("strip")
        .bounds(Rect::new(10, 0, 400, 1))
        .content(1000);
    let mut drag = attached(&mut strip);

    drag.on_press_start(&mut strip, &PointerEvent::new(110, 0));
    assert_eq!(drag.session().anchor(), Some((100, 0)));
}

#[test]
fn test_drag_scenario() {
    let mut strip = overflowing();
    let mut drag = attached(&mut strip);
    let t0 = Instant::now();

    drag.on_press_start(&mut strip, &PointerEvent::new(500, 0));
    assert_eq!(
        drag.on_pointer_move(&mut strip, &PointerEvent::new(480, 0), t0),
        EventResult::Consumed
    );

    // Nothing is written before the window elapses
    assert!(!drag.poll(&mut strip, t0 + ms(10)));
    assert!(drag.frames().is_empty());

    assert!(drag.poll(&mut strip, t0 + WINDOW));
    // The write waits for the next frame
    assert_eq!(strip.scroll_left(), 50);
    assert_eq!(drag.on_frame(&mut strip), 1);
    assert_eq!(strip.scroll_left(), 70);
}

#[test]
fn test_moves_within_window_coalesce() {
    let mut strip = overflowing();
    let mut drag = attached(&mut strip);
    let t0 = Instant::now();

    drag.on_press_start(&mut strip, &PointerEvent::new(500, 0));
    for (i, x) in [499, 497, 496, 495].into_iter().enumerate() {
        drag.on_pointer_move(&mut strip, &PointerEvent::new(x, 0), t0 + ms(i as u64 * 3));
    }

    assert_eq!(drag.next_deadline(), Some(t0 + WINDOW));
    assert!(drag.poll(&mut strip, t0 + WINDOW));
    assert!(!drag.poll(&mut strip, t0 + WINDOW));

    let writes: Vec<ScrollWrite> = drag.frames().pending().copied().collect();
    assert_eq!(writes, vec![ScrollWrite::new(55)]);
}

#[test]
fn test_consecutive_windows_share_press_anchor() {
    let mut strip = overflowing();
    let mut drag = attached(&mut strip);
    let t0 = Instant::now();

    drag.on_press_start(&mut strip, &PointerEvent::new(500, 0));

    drag.on_pointer_move(&mut strip, &PointerEvent::new(490, 0), t0);
    drag.poll(&mut strip, t0 + WINDOW);
    drag.on_frame(&mut strip);
    assert_eq!(strip.scroll_left(), 60);

    drag.on_pointer_move(&mut strip, &PointerEvent::new(520, 0), t0 + ms(20));
    drag.poll(&mut strip, t0 + ms(36));
    drag.on_frame(&mut strip);
    assert_eq!(strip.scroll_left(), 30);
}

#[test]
fn test_scroll_clamped_to_bounds() {
    let mut strip = overflowing();
    let mut drag = immediate(DragScrollConfig::new());
    drag.on_attach(&mut strip);
    let t0 = Instant::now();

    drag.on_press_start(&mut strip, &PointerEvent::new(100, 0));
    drag.on_pointer_move(&mut strip, &PointerEvent::new(300, 0), t0);
    assert_eq!(strip.scroll_left(), 0);

    drag.on_pointer_move(&mut strip, &PointerEvent::new(0, 0), t0);
    assert_eq!(strip.scroll_left(), 150);

    drag.on_press_end(&mut strip);
    strip.set_scroll_left(590);
    drag.on_press_start(&mut strip, &PointerEvent::new(300, 0));
    drag.on_pointer_move(&mut strip, &PointerEvent::new(200, 0), t0);
    assert_eq!(strip.scroll_left(), 600);
}

#[test]
fn test_multiplier_scales_delta() {
    let mut strip = overflowing();
    let mut drag = immediate(DragScrollConfig::new().multiplier(2.0));
    drag.on_attach(&mut strip);

    drag.on_press_start(&mut strip, &PointerEvent::new(500, 0));
    drag.on_pointer_move(&mut strip, &PointerEvent::new(490, 0), Instant::now());

    assert_eq!(strip.scroll_left(), 70);
}

#[test]
fn test_leading_edge_runs_first_move_immediately() {
    let mut strip = overflowing();
    let mut drag = DragScroll::with_config(DragScrollConfig::new().leading_edge(true)).unwrap();
    drag.on_attach(&mut strip);
    let t0 = Instant::now();

    drag.on_press_start(&mut strip, &PointerEvent::new(500, 0));
    drag.on_pointer_move(&mut strip, &PointerEvent::new(490, 0), t0);
    assert_eq!(drag.frames().len(), 1);

    // Follow-up inside the window waits for the trailing edge
    drag.on_pointer_move(&mut strip, &PointerEvent::new(480, 0), t0 + ms(5));
    assert_eq!(drag.frames().len(), 1);
    assert!(drag.poll(&mut strip, t0 + WINDOW));

    assert_eq!(drag.on_frame(&mut strip), 2);
    assert_eq!(strip.scroll_left(), 70);
}

// =============================================================================
// Release and Leave
// =============================================================================

#[test]
fn test_release_ends_drag() {
    let mut strip = overflowing();
    let mut drag = attached(&mut strip);

    drag.on_press_start(&mut strip, &PointerEvent::new(500, 0));
    assert_eq!(drag.on_press_end(&mut strip), EventResult::Consumed);

    assert!(!drag.is_dragging());
    assert_eq!(drag.session().anchor(), None);
    assert!(!strip.has_marker("user-select-disable"));
    assert!(strip.has_marker("draggable"));
}

#[test]
fn test_leave_ends_drag() {
    let mut strip = overflowing();
    let mut drag = attached(&mut strip);

    drag.on_press_start(&mut strip, &PointerEvent::new(500, 0));
    assert_eq!(drag.on_pointer_leave(&mut strip), EventResult::Consumed);

    assert!(!drag.is_dragging());
    assert!(!strip.has_marker("user-select-disable"));
}

#[test]
fn test_release_when_idle_is_noop() {
    let mut strip = overflowing().marker("highlight");
    let mut drag = attached(&mut strip);

    assert_eq!(drag.on_press_end(&mut strip), EventResult::Ignored);
    assert_eq!(drag.on_pointer_leave(&mut strip), EventResult::Ignored);

    assert_eq!(drag.session().state(), DragState::Idle);
    assert!(strip.has_marker("highlight"));
    assert!(strip.has_marker("draggable"));
    assert!(!strip.has_marker("user-select-disable"));
}

#[test]
fn test_release_flushes_pending_move() {
    let mut strip = overflowing();
    let mut drag = attached(&mut strip);
    let t0 = Instant::now();

    drag.on_press_start(&mut strip, &PointerEvent::new(500, 0));
    drag.on_pointer_move(&mut strip, &PointerEvent::new(470, 0), t0);
    drag.on_press_end(&mut strip);

    assert!(drag.next_deadline().is_none());
    assert!(!drag.poll(&mut strip, t0 + WINDOW));
    assert_eq!(drag.on_frame(&mut strip), 1);
    assert_eq!(strip.scroll_left(), 80);
}

#[test]
fn test_moves_after_release_are_ignored() {
    let mut strip = overflowing();
    let mut drag = attached(&mut strip);
    let t0 = Instant::now();

    drag.on_press_start(&mut strip, &PointerEvent::new(500, 0));
    drag.on_press_end(&mut strip);

    assert_eq!(
        drag.on_pointer_move(&mut strip, &PointerEvent::new(400, 0), t0),
        EventResult::Ignored
    );
    assert!(!drag.poll(&mut strip, t0 + WINDOW));
    assert_eq!(strip.scroll_left(), 50);
}

#[test]
fn test_new_press_resets_anchor() {
    let mut strip = overflowing();
    let mut drag = immediate(DragScrollConfig::new());
    drag.on_attach(&mut strip);
    let t0 = Instant::now();

    drag.on_press_start(&mut strip, &PointerEvent::new(500, 0));
    drag.on_pointer_move(&mut strip, &PointerEvent::new(450, 0), t0);
    drag.on_press_end(&mut strip);
    assert_eq!(strip.scroll_left(), 100);

    drag.on_press_start(&mut strip, &PointerEvent::new(200, 0));
    assert_eq!(drag.session().anchor(), Some((200, 100)));
}

// =============================================================================
// Exclusion Regions
// =============================================================================

fn with_controls() -> Container {
    overflowing()
        .child(Node::new("card").span(0, 100))
        .child(
            Node::new("toolbar")
                .span(100, 50)
                .marker("non-draggable")
                .child(Node::new("button").span(100, 10)),
        )
}

#[test]
fn test_press_on_excluded_target_is_ignored() {
    let mut strip = with_controls();
    strip.select("text");
    let mut drag = attached(&mut strip);

    let press = PointerEvent::new(105, 0).target("button");
    assert_eq!(drag.on_press_start(&mut strip, &press), EventResult::Ignored);

    assert!(!drag.is_dragging());
    assert!(!strip.has_marker("user-select-disable"));
    // Selection is left alone so the control behaves normally
    assert_eq!(strip.selection(), Some("text"));
}

#[test]
fn test_press_on_regular_target_starts_drag() {
    let mut strip = with_controls();
    let mut drag = attached(&mut strip);

    let press = PointerEvent::new(20, 0).target("card");
    assert_eq!(drag.on_press_start(&mut strip, &press), EventResult::StartDrag);
}

#[test]
fn test_excluded_target_ignored_even_when_disabled() {
    let mut strip = with_controls();
    strip.set_content_width(300);
    let mut drag = attached(&mut strip);

    let press = PointerEvent::new(105, 0).target("toolbar");
    assert_eq!(drag.on_press_start(&mut strip, &press), EventResult::Ignored);
    assert!(!drag.is_dragging());
}

#[test]
fn test_custom_marker_names() {
    let markers = dragscroll::MarkerNames::default()
        .draggable("can-drag")
        .selection_disabled("no-select")
        .non_draggable("no-drag");
    let mut strip = overflowing().child(Node::new("pin").marker("no-drag"));
    let mut drag = DragScroll::with_config(DragScrollConfig::new().markers(markers)).unwrap();
    drag.on_attach(&mut strip);

    assert!(strip.has_marker("can-drag"));
    assert!(!strip.has_marker("draggable"));

    let pin = PointerEvent::new(10, 0).target("pin");
    assert_eq!(drag.on_press_start(&mut strip, &pin), EventResult::Ignored);

    drag.on_press_start(&mut strip, &PointerEvent::new(10, 0));
    assert!(strip.has_marker("no-select"));
}

// =============================================================================
// Dispatch
// =============================================================================

#[test]
fn test_handle_routes_events() {
    let mut strip = overflowing();
    let mut drag = immediate(DragScrollConfig::new());
    drag.on_attach(&mut strip);
    let t0 = Instant::now();

    let press = Event::Press(PointerEvent::new(500, 0));
    assert_eq!(drag.handle(&mut strip, &press, t0), EventResult::StartDrag);

    let mv = Event::Move(PointerEvent::new(480, 0));
    assert_eq!(drag.handle(&mut strip, &mv, t0), EventResult::Consumed);
    assert_eq!(strip.scroll_left(), 70);

    assert_eq!(
        drag.handle(&mut strip, &Event::Release, t0),
        EventResult::Consumed
    );
    assert_eq!(drag.handle(&mut strip, &Event::Leave, t0), EventResult::Ignored);

    let resize = Event::Resize {
        width: 80,
        height: 24,
    };
    assert_eq!(drag.handle(&mut strip, &resize, t0), EventResult::Ignored);

    strip.set_content_width(100);
    assert_eq!(drag.handle(&mut strip, &resize, t0), EventResult::Consumed);
    assert!(!drag.scroll_enabled());
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_invalid_config_rejected() {
    assert!(DragScroll::with_config(DragScrollConfig::new().multiplier(0.0)).is_err());
    assert!(DragScroll::with_config(DragScrollConfig::new().multiplier(f32::NAN)).is_err());
    assert!(DragScroll::with_config(DragScrollConfig::new().multiplier(-1.0)).is_ok());
}

#[test]
fn test_marker_names_validated() {
    use dragscroll::{ConfigError, MarkerNames};

    let empty = DragScrollConfig::new().markers(MarkerNames::default().draggable(""));
    assert_eq!(empty.validate(), Err(ConfigError::EmptyMarker("draggable")));

    let duplicate =
        DragScrollConfig::new().markers(MarkerNames::default().non_draggable("draggable"));
    assert_eq!(
        duplicate.validate(),
        Err(ConfigError::DuplicateMarker {
            name: "draggable".to_string(),
            first: "draggable",
            second: "non_draggable",
        })
    );

    assert!(matches!(
        DragScrollConfig::new().multiplier(f32::INFINITY).validate(),
        Err(ConfigError::InvalidMultiplier(_))
    ));
    assert_eq!(DragScrollConfig::default().validate(), Ok(()));
}
