//! Selection tracking over host pointer events.
//!
//! Turns raw pointer press/release events into selection lifecycle
//! events: a release with a non-empty trimmed selection emits
//! `Selection`, everything else that should dismiss the popup emits
//! `Clear`. A press inside the registered popup element emits nothing,
//! so popup buttons stay clickable while the popup is up.

use harv_common::{ElementHandle, Rect};
use tracing::trace;

use crate::host::ActiveDocumentHost;

/// A committed, non-empty text selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionEvent {
    /// Trimmed selected text, guaranteed non-empty.
    pub text: String,
    /// Anchor rectangle for popup placement.
    pub anchor: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrackerEvent {
    Selection(SelectionEvent),
    Clear,
}

/// Pointer events as delivered by the host document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Button pressed. `target` is the handle of the element under the
    /// pointer, if the host assigned one.
    Press { target: Option<ElementHandle> },
    /// Button released anywhere in the document.
    Release,
}

pub struct SelectionTracker<H> {
    host: H,
    popup_handle: Option<ElementHandle>,
}

impl<H: ActiveDocumentHost> SelectionTracker<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            popup_handle: None,
        }
    }

    /// Register the rendered popup element so presses on it are not
    /// treated as outside clicks.
    pub fn set_popup_handle(&mut self, handle: Option<ElementHandle>) {
        self.popup_handle = handle;
    }

    /// Process one pointer event, possibly producing a tracker event.
    pub fn handle_pointer(&self, event: PointerEvent) -> Option<TrackerEvent> {
        match event {
            PointerEvent::Press { target } => {
                if target.is_some() && target == self.popup_handle {
                    trace!("press inside popup, ignoring");
                    None
                } else {
                    Some(TrackerEvent::Clear)
                }
            }
            PointerEvent::Release => Some(self.read_selection()),
        }
    }

    fn read_selection(&self) -> TrackerEvent {
        match self.host.query_selection() {
            Some(raw) => {
                let text = raw.text.trim();
                if text.is_empty() {
                    TrackerEvent::Clear
                } else {
                    TrackerEvent::Selection(SelectionEvent {
                        text: text.to_string(),
                        anchor: raw.rect,
                    })
                }
            }
            None => TrackerEvent::Clear,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RawSelection;
    use std::sync::Mutex;

    struct FakeDocument {
        selection: Mutex<Option<RawSelection>>,
    }

    impl FakeDocument {
        fn with_selection(text: &str) -> Self {
            Self {
                selection: Mutex::new(Some(RawSelection {
                    text: text.to_string(),
                    rect: Rect::from_ltwh(100.0, 50.0, 60.0, 20.0),
                })),
            }
        }

        fn empty() -> Self {
            Self {
                selection: Mutex::new(None),
            }
        }
    }

    impl ActiveDocumentHost for FakeDocument {
        fn query_selection(&self) -> Option<RawSelection> {
            self.selection.lock().unwrap().clone()
        }
    }

    #[test]
    fn release_with_selection_emits_selection_event() {
        let tracker = SelectionTracker::new(FakeDocument::with_selection("quantum"));
        let event = tracker.handle_pointer(PointerEvent::Release).unwrap();
        match event {
            TrackerEvent::Selection(sel) => {
                assert_eq!(sel.text, "quantum");
                assert_eq!(sel.anchor.left, 100.0);
            }
            TrackerEvent::Clear => panic!("expected selection"),
        }
    }

    #[test]
    fn release_trims_whitespace() {
        let tracker = SelectionTracker::new(FakeDocument::with_selection("  entropy \n"));
        let event = tracker.handle_pointer(PointerEvent::Release).unwrap();
        assert!(matches!(
            event,
            TrackerEvent::Selection(SelectionEvent { ref text, .. }) if text == "entropy"
        ));
    }

    #[test]
    fn release_with_whitespace_only_selection_clears() {
        let tracker = SelectionTracker::new(FakeDocument::with_selection("   \t "));
        let event = tracker.handle_pointer(PointerEvent::Release).unwrap();
        assert_eq!(event, TrackerEvent::Clear);
    }

    #[test]
    fn release_with_no_selection_clears() {
        let tracker = SelectionTracker::new(FakeDocument::empty());
        let event = tracker.handle_pointer(PointerEvent::Release).unwrap();
        assert_eq!(event, TrackerEvent::Clear);
    }

    #[test]
    fn press_outside_popup_clears() {
        let mut tracker = SelectionTracker::new(FakeDocument::empty());
        tracker.set_popup_handle(Some(ElementHandle(1)));

        let on_document = tracker.handle_pointer(PointerEvent::Press { target: None });
        assert_eq!(on_document, Some(TrackerEvent::Clear));

        let on_other = tracker.handle_pointer(PointerEvent::Press {
            target: Some(ElementHandle(2)),
        });
        assert_eq!(on_other, Some(TrackerEvent::Clear));
    }

    #[test]
    fn press_inside_popup_is_ignored() {
        let mut tracker = SelectionTracker::new(FakeDocument::empty());
        tracker.set_popup_handle(Some(ElementHandle(1)));

        let event = tracker.handle_pointer(PointerEvent::Press {
            target: Some(ElementHandle(1)),
        });
        assert_eq!(event, None);
    }

    #[test]
    fn press_with_no_registered_popup_clears() {
        let tracker = SelectionTracker::new(FakeDocument::empty());
        let event = tracker.handle_pointer(PointerEvent::Press {
            target: Some(ElementHandle(1)),
        });
        assert_eq!(event, Some(TrackerEvent::Clear));
    }
}
