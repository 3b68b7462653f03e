//! Drag-scroll configuration.

use std::time::Duration;

use thiserror::Error;

/// Default throttle window for drag moves (~60 updates per second).
pub const DEFAULT_THROTTLE_WINDOW: Duration = Duration::from_millis(16);

/// Default drag-to-scroll multiplier (1:1 mapping).
pub const DEFAULT_MULTIPLIER: f32 = 1.0;

/// Errors produced when validating a [`DragScrollConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("drag multiplier must be finite and non-zero, got {0}")]
    InvalidMultiplier(f32),

    #[error("marker name for {0} is empty")]
    EmptyMarker(&'static str),

    #[error("marker name '{name}' is used for both {first} and {second}")]
    DuplicateMarker {
        name: String,
        first: &'static str,
        second: &'static str,
    },
}

/// Names of the visual markers the behavior reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerNames {
    /// Present on the container while its content overflows.
    pub draggable: String,
    /// Present on the container while a drag is in progress.
    pub selection_disabled: String,
    /// Marks descendants that must not start a drag.
    pub non_draggable: String,
}

impl Default for MarkerNames {
    fn default() -> Self {
        Self {
            draggable: "draggable".to_string(),
            selection_disabled: "user-select-disable".to_string(),
            non_draggable: "non-draggable".to_string(),
        }
    }
}

impl MarkerNames {
    pub fn draggable(mut self, name: impl Into<String>) -> Self {
        self.draggable = name.into();
        self
    }

    pub fn selection_disabled(mut self, name: impl Into<String>) -> Self {
        self.selection_disabled = name.into();
        self
    }

    pub fn non_draggable(mut self, name: impl Into<String>) -> Self {
        self.non_draggable = name.into();
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("draggable", &self.draggable),
            ("selection_disabled", &self.selection_disabled),
            ("non_draggable", &self.non_draggable),
        ];

        for (i, &(label, name)) in named.iter().enumerate() {
            if name.is_empty() {
                return Err(ConfigError::EmptyMarker(label));
            }
            if let Some(&(other, _)) = named[i + 1..].iter().find(|(_, n)| *n == name) {
                return Err(ConfigError::DuplicateMarker {
                    name: name.to_string(),
                    first: label,
                    second: other,
                });
            }
        }

        Ok(())
    }
}

/// Per-instance drag-scroll behavior configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DragScrollConfig {
    /// Scale applied to the pointer delta before it is subtracted from the
    /// anchored scroll offset.
    pub multiplier: f32,

    /// Minimum spacing between two rate-limited move updates.
    /// A zero window disables throttling.
    pub throttle_window: Duration,

    /// Run the first move of a window immediately instead of waiting for
    /// the window to elapse.
    pub leading_edge: bool,

    pub markers: MarkerNames,
}

impl Default for DragScrollConfig {
    fn default() -> Self {
        Self {
            multiplier: DEFAULT_MULTIPLIER,
            throttle_window: DEFAULT_THROTTLE_WINDOW,
            leading_edge: false,
            markers: MarkerNames::default(),
        }
    }
}

impl DragScrollConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn multiplier(mut self, multiplier: f32) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn throttle_window(mut self, window: Duration) -> Self {
        self.throttle_window = window;
        self
    }

    pub fn leading_edge(mut self, enabled: bool) -> Self {
        self.leading_edge = enabled;
        self
    }

    pub fn markers(mut self, markers: MarkerNames) -> Self {
        self.markers = markers;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.multiplier.is_finite() || self.multiplier == 0.0 {
            return Err(ConfigError::InvalidMultiplier(self.multiplier));
        }
        self.markers.validate()
    }
}
