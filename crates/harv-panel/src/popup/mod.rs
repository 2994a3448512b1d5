//! Selection popup: placement math and visibility state machine.

pub mod controller;
pub mod placer;

pub use controller::{PopupState, SelectionPopupController};
pub use placer::{place, PopupSize};
