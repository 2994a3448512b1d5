pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{ConfigError, HarvError, SlotKind, StoreError};
pub use events::{Event, EventBus};
pub use id::new_id;
pub use types::{ElementHandle, Point, QuestionScope, Rect, Viewport};
