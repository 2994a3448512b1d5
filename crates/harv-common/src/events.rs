use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Notifications published by the panel core for the presentation layer.
///
/// The renderer treats every variant as "re-read the view model"; the
/// payload exists so subscribers can skip work they do not care about.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    PopupShown,
    PopupHidden,
    SummaryUpdated,
    AnswerUpdated,
    SearchAppended { id: String },
    ThemeToggled { dark: bool },
    ViewChanged,
    Shutdown,
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: Event) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}
