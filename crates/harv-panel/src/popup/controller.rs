//! Popup visibility state machine.
//!
//! Visibility is driven solely by selection and dismissal events.
//! The popup actions (define / explain / search) read the current text
//! but never transition visibility themselves, so the popup cannot
//! disappear mid-action.

use harv_common::{Point, Viewport};
use serde::Serialize;

use crate::selection::SelectionEvent;

use super::placer::{self, PopupSize};

/// Render-ready popup state.
///
/// Invariant: `position` is `Some` exactly when `visible` is true and
/// `text` is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PopupState {
    pub visible: bool,
    pub position: Option<Point>,
    pub text: String,
}

pub struct SelectionPopupController {
    state: PopupState,
    size: PopupSize,
}

impl SelectionPopupController {
    pub fn new(size: PopupSize) -> Self {
        Self {
            state: PopupState::default(),
            size,
        }
    }

    pub fn state(&self) -> &PopupState {
        &self.state
    }

    /// Text available to popup actions, present only while visible.
    pub fn selected_text(&self) -> Option<&str> {
        if self.state.visible {
            Some(&self.state.text)
        } else {
            None
        }
    }

    /// A new selection: show the popup, or overwrite position and text
    /// in place when already visible. Never passes through hidden.
    /// Returns true if the state changed.
    pub fn on_selection(&mut self, event: &SelectionEvent, viewport: Viewport) -> bool {
        let position = placer::place(event.anchor, viewport, self.size);
        let next = PopupState {
            visible: true,
            position: Some(position),
            text: event.text.clone(),
        };
        if next == self.state {
            return false;
        }
        self.state = next;
        true
    }

    /// Empty selection or outside click: hide. Idempotent.
    /// Returns true if the state changed.
    pub fn on_clear(&mut self) -> bool {
        if !self.state.visible && self.state.position.is_none() && self.state.text.is_empty() {
            return false;
        }
        self.state = PopupState::default();
        true
    }
}
