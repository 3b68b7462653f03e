pub mod behavior;
pub mod config;
pub mod container;
pub mod event;
pub mod frame;
pub mod host;
pub mod layout;
pub mod session;
pub mod throttle;

pub use behavior::DragScroll;
pub use config::{ConfigError, DragScrollConfig, MarkerNames};
pub use container::{display_width, Container, Node};
pub use event::{Event, EventResult, MouseButton, PointerEvent};
pub use frame::{FrameQueue, FrameScheduler, Immediate, ScrollWrite};
pub use host::DragHost;
pub use layout::Rect;
pub use session::{DragSession, DragState, Scrollability};
pub use throttle::Throttle;
