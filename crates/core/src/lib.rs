pub mod error;
pub mod event;
pub mod source;
pub mod state;
pub mod widget;

pub use error::{KioskError, Result};
pub use event::Message;
pub use source::SampleSource;
pub use state::{CanvasSize, GroupKind, MetricKey, Slot, TelemetrySnapshot};
pub use widget::WidgetRegistry;
