//! Click-and-drag horizontal scrolling for an overflowing container.

use std::time::Instant;

use log::{debug, trace};

use crate::config::{ConfigError, DragScrollConfig};
use crate::event::{Event, EventResult, MouseButton, PointerEvent};
use crate::frame::{FrameQueue, FrameScheduler, ScrollWrite};
use crate::host::DragHost;
use crate::session::{DragSession, Scrollability};
use crate::throttle::Throttle;

/// Drag-to-scroll behavior bound to one container.
///
/// The behavior owns no element. Every handler receives the container as a
/// [`DragHost`], so the same instance works against any host that keeps
/// handing it the element it was attached to.
///
/// Scroll writes produced by pointer moves are rate limited by a throttle
/// and then handed to a [`FrameScheduler`]. With the default
/// [`FrameQueue`], the host applies them by calling
/// [`on_frame`](DragScroll::on_frame) once per refresh.
#[derive(Debug)]
pub struct DragScroll<F: FrameScheduler = FrameQueue> {
    config: DragScrollConfig,
    session: DragSession,
    /// Latest pointer x waiting for the throttle window.
    moves: Throttle<u16>,
    frames: F,
}

impl DragScroll<FrameQueue> {
    pub fn new() -> Self {
        Self::build(DragScrollConfig::default(), FrameQueue::new())
    }

    pub fn with_config(config: DragScrollConfig) -> Result<Self, ConfigError> {
        Self::with_scheduler(config, FrameQueue::new())
    }

    /// Apply queued scroll writes. Call once per display refresh.
    /// Returns the number of writes applied.
    pub fn on_frame<H: DragHost + ?Sized>(&mut self, host: &mut H) -> usize {
        self.frames.run_frame(host)
    }
}

impl Default for DragScroll<FrameQueue> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FrameScheduler> DragScroll<F> {
    pub fn with_scheduler(config: DragScrollConfig, frames: F) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, frames))
    }

    fn build(config: DragScrollConfig, frames: F) -> Self {
        let moves = if config.leading_edge {
            Throttle::with_leading(config.throttle_window)
        } else {
            Throttle::new(config.throttle_window)
        };

        Self {
            config,
            session: DragSession::new(),
            moves,
            frames,
        }
    }

    pub fn config(&self) -> &DragScrollConfig {
        &self.config
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn frames(&self) -> &F {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut F {
        &mut self.frames
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_active()
    }

    pub fn scroll_enabled(&self) -> bool {
        self.session.scroll_enabled()
    }

    /// When a throttled move becomes due. Hosts use this as their poll timeout.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.moves.deadline()
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Bind to the container: run the first overflow check and sync the
    /// draggable marker with it.
    pub fn on_attach<H: DragHost + ?Sized>(&mut self, host: &mut H) {
        let scrollability = Scrollability::from_overflow(host.overflows());
        self.session.set_scrollability(scrollability);
        self.sync_affordance(host);
        debug!(
            "Attached: content={} viewport={} scroll_enabled={}",
            host.content_width(),
            host.viewport_width(),
            scrollability.is_enabled()
        );
    }

    /// Re-run the overflow check after the window changed size.
    /// Returns true if scrollability changed.
    pub fn on_window_resize<H: DragHost + ?Sized>(&mut self, host: &mut H) -> bool {
        let scrollability = Scrollability::from_overflow(host.overflows());
        if !self.session.set_scrollability(scrollability) {
            return false;
        }
        self.sync_affordance(host);
        debug!(
            "Resize: content={} viewport={} scroll_enabled={}",
            host.content_width(),
            host.viewport_width(),
            scrollability.is_enabled()
        );
        true
    }

    fn sync_affordance<H: DragHost + ?Sized>(&self, host: &mut H) {
        let marker = &self.config.markers.draggable;
        if self.session.scroll_enabled() {
            host.add_marker(marker);
        } else {
            host.remove_marker(marker);
        }
    }

    // -------------------------------------------------------------------------
    // Pointer input
    // -------------------------------------------------------------------------

    /// Start a drag if the container overflows and the press did not land in
    /// an exclusion region. Ignored presses propagate normally.
    pub fn on_press_start<H: DragHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &PointerEvent,
    ) -> EventResult {
        if !self.session.scroll_enabled() {
            trace!("Press ignored: content does not overflow");
            return EventResult::Ignored;
        }
        if event.button != MouseButton::Left {
            trace!("Press ignored: button {:?}", event.button);
            return EventResult::Ignored;
        }
        if let Some(target) = event.target.as_deref() {
            if host.is_excluded(target, &self.config.markers.non_draggable) {
                debug!("Press on non-draggable target: {}", target);
                return EventResult::Ignored;
            }
        }

        host.clear_selection();

        let anchor_x = event.x as i32 - host.offset_left() as i32;
        let anchor_scroll = host.scroll_left();
        self.session.begin(anchor_x, anchor_scroll);
        host.add_marker(&self.config.markers.selection_disabled);

        debug!("Drag start: anchor_x={} anchor_scroll={}", anchor_x, anchor_scroll);
        EventResult::StartDrag
    }

    /// End the drag in progress. No-op when idle.
    pub fn on_press_end<H: DragHost + ?Sized>(&mut self, host: &mut H) -> EventResult {
        self.end_drag(host, "release")
    }

    /// End the drag in progress when the pointer leaves. No-op when idle.
    pub fn on_pointer_leave<H: DragHost + ?Sized>(&mut self, host: &mut H) -> EventResult {
        self.end_drag(host, "leave")
    }

    fn end_drag<H: DragHost + ?Sized>(&mut self, host: &mut H, cause: &str) -> EventResult {
        if !self.session.is_active() {
            return EventResult::Ignored;
        }
        // The last move of the gesture still lands.
        if let Some(x) = self.moves.flush() {
            self.scroll_to_pointer(host, x);
        }
        self.session.end();
        host.remove_marker(&self.config.markers.selection_disabled);
        debug!("Drag end ({})", cause);
        EventResult::Consumed
    }

    /// Feed a pointer move into the rate limiter. Only moves during a drag
    /// on an overflowing container are considered.
    pub fn on_pointer_move<H: DragHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &PointerEvent,
        now: Instant,
    ) -> EventResult {
        if !self.session.is_active() || !self.session.scroll_enabled() {
            return EventResult::Ignored;
        }

        if let Some(x) = self.moves.call(now, event.x) {
            self.scroll_to_pointer(host, x);
        }
        EventResult::Consumed
    }

    /// Run a throttled move whose window has elapsed.
    /// Returns true if a scroll write was requested.
    pub fn poll<H: DragHost + ?Sized>(&mut self, host: &mut H, now: Instant) -> bool {
        match self.moves.poll(now) {
            Some(x) => self.scroll_to_pointer(host, x),
            None => false,
        }
    }

    /// The rate-limited move handler: map the pointer position onto a
    /// scroll offset and request a frame to write it.
    fn scroll_to_pointer<H: DragHost + ?Sized>(&mut self, host: &mut H, pointer_x: u16) -> bool {
        let Some((anchor_x, anchor_scroll)) = self.session.anchor() else {
            trace!("Throttled move dropped: no drag in progress");
            return false;
        };

        let x = pointer_x as i32 - host.offset_left() as i32;
        let delta = (x - anchor_x) as f32 * self.config.multiplier;
        let target = (anchor_scroll as f32 - delta)
            .round()
            .clamp(0.0, u16::MAX as f32) as u16;

        trace!("Drag move: x={} delta={} scroll_left={}", x, delta, target);
        self.frames.request_frame(ScrollWrite::new(target), host);
        true
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    /// Route an event to its handler.
    pub fn handle<H: DragHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &Event,
        now: Instant,
    ) -> EventResult {
        match event {
            Event::Press(pointer) => self.on_press_start(host, pointer),
            Event::Move(pointer) => self.on_pointer_move(host, pointer, now),
            Event::Release => self.on_press_end(host),
            Event::Leave => self.on_pointer_leave(host),
            Event::Resize { .. } => {
                if self.on_window_resize(host) {
                    EventResult::Consumed
                } else {
                    EventResult::Ignored
                }
            }
        }
    }
}
