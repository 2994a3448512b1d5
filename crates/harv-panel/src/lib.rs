//! Selection-driven assistant panel core.
//!
//! Everything between the host document and the answer service lives
//! here: selection tracking, popup placement and visibility, exclusive
//! answer slots, the append-only search log, session persistence, and
//! the controller that ties them together behind a single message loop.

pub mod controller;
pub mod host;
pub mod popup;
pub mod search;
pub mod selection;
pub mod session;
pub mod tasks;
pub mod view;

pub use controller::{PanelCommand, PanelController, PanelHandle};
pub use host::{ActiveDocumentHost, RawSelection, TabHost};
pub use popup::{PopupSize, PopupState, SelectionPopupController};
pub use search::{SearchLog, SearchResult};
pub use selection::{PointerEvent, SelectionEvent, SelectionTracker, TrackerEvent};
pub use session::{PersistedSessionStore, SessionState};
pub use tasks::{AnswerSlot, Generation, TaskCoordinator};
pub use view::{AnswerKind, PanelView};
