//! Per-container drag state.

/// Drag gesture state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    /// A press started a drag. Anchors are captured at press time and are
    /// only meaningful for the gesture in progress.
    Dragging {
        /// Pointer x relative to the container's left edge at press time.
        anchor_x: i32,
        /// Container scroll offset at press time.
        anchor_scroll: u16,
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }
}

/// Cached result of the last overflow check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scrollability {
    #[default]
    Disabled,
    Enabled,
}

impl Scrollability {
    pub fn from_overflow(overflows: bool) -> Self {
        if overflows {
            Scrollability::Enabled
        } else {
            Scrollability::Disabled
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Scrollability::Enabled)
    }
}

/// State owned by one behavior instance for the lifetime of its container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragSession {
    state: DragState,
    scrollability: Scrollability,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn scrollability(&self) -> Scrollability {
        self.scrollability
    }

    pub fn is_active(&self) -> bool {
        self.state.is_dragging()
    }

    pub fn scroll_enabled(&self) -> bool {
        self.scrollability.is_enabled()
    }

    /// Anchor pointer x and scroll offset of the drag in progress.
    pub fn anchor(&self) -> Option<(i32, u16)> {
        match self.state {
            DragState::Dragging {
                anchor_x,
                anchor_scroll,
            } => Some((anchor_x, anchor_scroll)),
            DragState::Idle => None,
        }
    }

    /// Start a new gesture, replacing any previous anchors.
    pub(crate) fn begin(&mut self, anchor_x: i32, anchor_scroll: u16) {
        self.state = DragState::Dragging {
            anchor_x,
            anchor_scroll,
        };
    }

    /// End the gesture in progress.
    /// Returns true if a drag was active.
    pub(crate) fn end(&mut self) -> bool {
        if self.state.is_dragging() {
            self.state = DragState::Idle;
            true
        } else {
            false
        }
    }

    /// Store a new overflow result.
    /// Returns true if scrollability changed.
    pub(crate) fn set_scrollability(&mut self, scrollability: Scrollability) -> bool {
        if self.scrollability == scrollability {
            return false;
        }
        self.scrollability = scrollability;
        true
    }
}
