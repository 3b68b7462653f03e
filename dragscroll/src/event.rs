use crossterm::event::{Event as CrosstermEvent, MouseEventKind};

use crate::layout::Rect;

/// Pointer data carried by press and move events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEvent {
    /// Pointer x in page coordinates.
    pub x: u16,
    pub y: u16,
    pub button: MouseButton,
    /// Deepest element under the pointer, if known.
    pub target: Option<String>,
}

impl PointerEvent {
    pub fn new(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            button: MouseButton::Left,
            target: None,
        }
    }

    pub fn button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// Input events observed by a drag-scroll behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Mouse button pressed over the container
    Press(PointerEvent),
    /// Pointer moved over the container
    Move(PointerEvent),
    /// Mouse button released over the container
    Release,
    /// Pointer left the container
    Leave,
    /// Window resized
    Resize { width: u16, height: u16 },
}

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored and should propagate normally.
    Ignored,
    /// Event was consumed.
    Consumed,
    /// Event started a drag; its default action (native selection) is suppressed.
    StartDrag,
}

impl EventResult {
    /// Check if the event was handled (consumed or started drag).
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}

impl Event {
    /// Translate a terminal event for a container occupying `bounds`.
    ///
    /// `hit` resolves the element under a point. Presses outside the
    /// container are dropped; moves and releases outside it become `Leave`.
    pub fn from_crossterm(
        event: &CrosstermEvent,
        bounds: Rect,
        hit: impl Fn(u16, u16) -> Option<String>,
    ) -> Option<Self> {
        match event {
            CrosstermEvent::Mouse(mouse) => {
                let (x, y) = (mouse.column, mouse.row);
                let inside = bounds.contains(x, y);
                let pointer = |button: MouseButton| PointerEvent {
                    x,
                    y,
                    button,
                    target: hit(x, y),
                };

                match mouse.kind {
                    MouseEventKind::Down(btn) if inside => Some(Event::Press(pointer(btn.into()))),
                    MouseEventKind::Drag(btn) if inside => Some(Event::Move(pointer(btn.into()))),
                    MouseEventKind::Moved if inside => Some(Event::Move(pointer(MouseButton::Left))),
                    MouseEventKind::Up(_) if inside => Some(Event::Release),
                    MouseEventKind::Drag(_) | MouseEventKind::Moved | MouseEventKind::Up(_) => {
                        Some(Event::Leave)
                    }
                    _ => None,
                }
            }
            CrosstermEvent::FocusLost => Some(Event::Leave),
            CrosstermEvent::Resize(width, height) => Some(Event::Resize {
                width: *width,
                height: *height,
            }),
            _ => None,
        }
    }
}
