//! Panel composition root.
//!
//! Owns every piece of mutable panel state and applies messages to it
//! one at a time: presentation commands and service completions share
//! a single mpsc consumer, so handling is strictly sequential and no
//! state is ever touched concurrently. Long-running answer requests
//! are spawned tasks that hold only the service handle and the message
//! sender; their results re-enter the loop as messages stamped with
//! the generation taken at start, so completions for superseded
//! requests are discarded instead of clobbering newer answers.

use std::sync::Arc;

use harv_ai::{AiError, AnswerService};
use harv_common::{
    ElementHandle, Event, EventBus, HarvError, QuestionScope, SlotKind, Viewport,
};
use harv_config::HarvConfig;
use harv_store::KeyValueStore;
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, info, warn};

use crate::host::{ActiveDocumentHost, TabHost};
use crate::popup::{PopupSize, SelectionPopupController};
use crate::search::SearchLog;
use crate::selection::{PointerEvent, SelectionTracker, TrackerEvent};
use crate::session::{PersistedSessionStore, SessionState};
use crate::tasks::{Generation, TaskCoordinator};
use crate::view::{AnswerKind, PanelView};

/// Commands the presentation layer can issue.
#[derive(Debug, Clone)]
pub enum PanelCommand {
    /// Fetch a fresh page summary.
    Summarize,
    /// Ask a free-form question. Blank text is rejected before dispatch.
    SubmitQuestion { text: String, scope: QuestionScope },
    SetScope(QuestionScope),
    ToggleTheme,
    PopupDefine,
    PopupElaborate,
    PopupSearch,
    DismissPopup,
    /// Pointer pressed somewhere in the hosted document.
    PointerPress { target: Option<ElementHandle> },
    /// Pointer released; the tracker reads the selection.
    PointerRelease,
    /// The rendered popup element changed identity (or unmounted).
    RegisterPopupElement(Option<ElementHandle>),
    ViewportResized(Viewport),
    Shutdown,
}

/// Everything the panel loop consumes: external commands plus
/// completions from spawned service calls.
#[derive(Debug)]
enum PanelMsg {
    Command(PanelCommand),
    SlotDone {
        slot: SlotKind,
        generation: Generation,
        result: Result<String, AiError>,
    },
    SearchDone(Result<String, AiError>),
}

/// Cloneable command sender for the presentation layer.
#[derive(Clone)]
pub struct PanelHandle {
    tx: mpsc::UnboundedSender<PanelMsg>,
}

impl PanelHandle {
    pub fn command(&self, command: PanelCommand) {
        let _ = self.tx.send(PanelMsg::Command(command));
    }

    pub fn summarize(&self) {
        self.command(PanelCommand::Summarize);
    }

    pub fn submit_question(&self, text: impl Into<String>, scope: QuestionScope) {
        self.command(PanelCommand::SubmitQuestion {
            text: text.into(),
            scope,
        });
    }

    pub fn set_scope(&self, scope: QuestionScope) {
        self.command(PanelCommand::SetScope(scope));
    }

    pub fn toggle_theme(&self) {
        self.command(PanelCommand::ToggleTheme);
    }

    pub fn popup_define(&self) {
        self.command(PanelCommand::PopupDefine);
    }

    pub fn popup_elaborate(&self) {
        self.command(PanelCommand::PopupElaborate);
    }

    pub fn popup_search(&self) {
        self.command(PanelCommand::PopupSearch);
    }

    pub fn dismiss_popup(&self) {
        self.command(PanelCommand::DismissPopup);
    }

    pub fn pointer_press(&self, target: Option<ElementHandle>) {
        self.command(PanelCommand::PointerPress { target });
    }

    pub fn pointer_release(&self) {
        self.command(PanelCommand::PointerRelease);
    }

    pub fn register_popup_element(&self, handle: Option<ElementHandle>) {
        self.command(PanelCommand::RegisterPopupElement(handle));
    }

    pub fn viewport_resized(&self, viewport: Viewport) {
        self.command(PanelCommand::ViewportResized(viewport));
    }

    pub fn shutdown(&self) {
        self.command(PanelCommand::Shutdown);
    }
}

/// The question-answer requests that run through the exclusive slot.
enum QuestionTask {
    Ask { text: String, scope: QuestionScope },
    Define { text: String },
    Elaborate { text: String },
}

pub struct PanelController<D> {
    config: HarvConfig,
    service: Arc<dyn AnswerService>,
    session: PersistedSessionStore,

    tracker: SelectionTracker<D>,
    popup: SelectionPopupController,
    tasks: TaskCoordinator,
    search: SearchLog,

    viewport: Viewport,
    theme_dark: bool,
    last_answer: Option<String>,
    answer_kind: Option<AnswerKind>,
    scope: QuestionScope,
    url: Option<String>,
    summarized: bool,
    searches_in_flight: usize,

    bus: EventBus,
    tx: mpsc::UnboundedSender<PanelMsg>,
    rx: mpsc::UnboundedReceiver<PanelMsg>,
    view_tx: watch::Sender<PanelView>,
}

impl<D: ActiveDocumentHost> PanelController<D> {
    pub fn new(
        config: HarvConfig,
        service: Arc<dyn AnswerService>,
        store: Arc<dyn KeyValueStore>,
        document: D,
        viewport: Viewport,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (view_tx, _) = watch::channel(PanelView::default());
        let popup = SelectionPopupController::new(PopupSize::from(&config.popup));
        let scope = config.panel.default_scope;

        Self {
            config,
            service,
            session: PersistedSessionStore::new(store),
            tracker: SelectionTracker::new(document),
            popup,
            tasks: TaskCoordinator::new(),
            search: SearchLog::new(),
            viewport,
            theme_dark: false,
            last_answer: None,
            answer_kind: None,
            scope,
            url: None,
            summarized: false,
            searches_in_flight: 0,
            bus: EventBus::new(64),
            tx,
            rx,
            view_tx,
        }
    }

    pub fn handle(&self) -> PanelHandle {
        PanelHandle {
            tx: self.tx.clone(),
        }
    }

    /// View snapshots, replaced wholesale on every committed transition.
    pub fn subscribe_view(&self) -> watch::Receiver<PanelView> {
        self.view_tx.subscribe()
    }

    /// Change notifications for the presentation layer.
    pub fn subscribe_events(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Restore the persisted session, capture the tab URL, and kick off
    /// the automatic page summary when policy asks for one.
    pub async fn activate(&mut self, tabs: &dyn TabHost) {
        let state = self
            .session
            .load(self.config.panel.dark_mode_default)
            .await;

        self.theme_dark = state.theme_dark;
        self.last_answer = state.last_answer.clone();
        self.search = SearchLog::from_results(state.search_results.clone());
        if let Some(summary) = state.summary {
            self.tasks.restore(SlotKind::Summary, summary);
        }

        self.url = tabs.current_url().await;
        info!(url = self.url.as_deref().unwrap_or("<none>"), "panel activated");

        let have_cached = self.tasks.content(SlotKind::Summary).is_some();
        if self.config.panel.summarize_on_activate || !have_cached {
            self.start_summary();
        } else {
            debug!("cached summary present, skipping automatic fetch");
        }

        self.commit(Event::ViewChanged);
    }

    /// Drive the panel until shutdown, then flush a final durable write.
    pub async fn run(mut self) {
        info!("panel loop started");
        while let Some(msg) = self.rx.recv().await {
            if !self.apply(msg) {
                break;
            }
        }
        if let Err(e) = self.session.save_now(&self.session_state()).await {
            warn!(error = %e, "final session write failed");
        }
        self.bus.publish(Event::Shutdown);
        info!("panel loop stopped");
    }

    /// Apply one message. Returns false when the loop should stop.
    fn apply(&mut self, msg: PanelMsg) -> bool {
        match msg {
            PanelMsg::Command(command) => self.handle_command(command),
            PanelMsg::SlotDone {
                slot,
                generation,
                result,
            } => {
                self.on_slot_done(slot, generation, result);
                true
            }
            PanelMsg::SearchDone(result) => {
                self.on_search_done(result);
                true
            }
        }
    }

    fn handle_command(&mut self, command: PanelCommand) -> bool {
        match command {
            PanelCommand::Summarize => {
                if self.start_summary() {
                    self.commit(Event::ViewChanged);
                }
            }
            PanelCommand::SubmitQuestion { text, scope } => {
                let text = text.trim().to_string();
                if text.is_empty() {
                    debug!("blank question rejected");
                    return true;
                }
                // Scope changes only with a dispatched question; a
                // rejected submit leaves committed state untouched.
                if self.start_question(AnswerKind::Question, QuestionTask::Ask { text, scope }) {
                    self.scope = scope;
                    self.commit(Event::ViewChanged);
                }
            }
            PanelCommand::SetScope(scope) => {
                if self.scope != scope {
                    self.scope = scope;
                    self.commit(Event::ViewChanged);
                }
            }
            PanelCommand::ToggleTheme => {
                self.theme_dark = !self.theme_dark;
                self.commit(Event::ThemeToggled {
                    dark: self.theme_dark,
                });
            }
            PanelCommand::PopupDefine => {
                if let Some(text) = self.popup.selected_text().map(str::to_string) {
                    if self.start_question(AnswerKind::Define, QuestionTask::Define { text }) {
                        self.commit(Event::ViewChanged);
                    }
                }
            }
            PanelCommand::PopupElaborate => {
                if let Some(text) = self.popup.selected_text().map(str::to_string) {
                    if self.start_question(AnswerKind::Elaborate, QuestionTask::Elaborate { text })
                    {
                        self.commit(Event::ViewChanged);
                    }
                }
            }
            PanelCommand::PopupSearch => {
                if let Some(text) = self.popup.selected_text().map(str::to_string) {
                    self.start_search(text);
                    self.commit(Event::ViewChanged);
                }
            }
            PanelCommand::DismissPopup => {
                if self.popup.on_clear() {
                    self.commit(Event::PopupHidden);
                }
            }
            PanelCommand::PointerPress { target } => {
                if let Some(event) = self.tracker.handle_pointer(PointerEvent::Press { target }) {
                    self.on_tracker_event(event);
                }
            }
            PanelCommand::PointerRelease => {
                if let Some(event) = self.tracker.handle_pointer(PointerEvent::Release) {
                    self.on_tracker_event(event);
                }
            }
            PanelCommand::RegisterPopupElement(handle) => {
                self.tracker.set_popup_handle(handle);
            }
            PanelCommand::ViewportResized(viewport) => {
                self.viewport = viewport;
            }
            PanelCommand::Shutdown => return false,
        }
        true
    }

    fn on_tracker_event(&mut self, event: TrackerEvent) {
        match event {
            TrackerEvent::Selection(selection) => {
                if self.popup.on_selection(&selection, self.viewport) {
                    self.commit(Event::PopupShown);
                }
            }
            TrackerEvent::Clear => {
                if self.popup.on_clear() {
                    self.commit(Event::PopupHidden);
                }
            }
        }
    }

    /// Start the page-summary request. Returns false when a summary is
    /// already in flight.
    fn start_summary(&mut self) -> bool {
        let generation = match self.tasks.start(SlotKind::Summary) {
            Ok(generation) => generation,
            Err(HarvError::SlotBusy(_)) => {
                debug!("summary already in flight");
                return false;
            }
            Err(e) => {
                warn!(error = %e, "summary start failed");
                return false;
            }
        };

        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = service.summarize_page().await;
            let _ = tx.send(PanelMsg::SlotDone {
                slot: SlotKind::Summary,
                generation,
                result,
            });
        });
        true
    }

    /// Start a request through the exclusive question-answer slot.
    /// Returns false when the slot is busy.
    fn start_question(&mut self, kind: AnswerKind, task: QuestionTask) -> bool {
        let generation = match self.tasks.start(SlotKind::QuestionAnswer) {
            Ok(generation) => generation,
            Err(HarvError::SlotBusy(_)) => {
                debug!("question-answer slot busy, request dropped");
                return false;
            }
            Err(e) => {
                warn!(error = %e, "question start failed");
                return false;
            }
        };

        self.answer_kind = Some(kind);
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = match task {
                QuestionTask::Ask { text, scope } => service.ask_question(&text, scope).await,
                QuestionTask::Define { text } => service.define(&text).await,
                QuestionTask::Elaborate { text } => service.elaborate(&text).await,
            };
            let _ = tx.send(PanelMsg::SlotDone {
                slot: SlotKind::QuestionAnswer,
                generation,
                result,
            });
        });
        true
    }

    /// Searches are fire-and-forget: no slot, concurrent requests
    /// allowed, each completed answer appends to the log.
    fn start_search(&mut self, text: String) {
        self.searches_in_flight += 1;
        let scope = self.scope;
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = service.ask_question(&text, scope).await;
            let _ = tx.send(PanelMsg::SearchDone(result));
        });
    }

    fn on_slot_done(
        &mut self,
        slot: SlotKind,
        generation: Generation,
        result: Result<String, AiError>,
    ) {
        match result {
            Ok(content) => {
                if !self.tasks.complete(slot, generation, content.clone()) {
                    return;
                }
                match slot {
                    SlotKind::Summary => {
                        self.summarized = true;
                        self.commit(Event::SummaryUpdated);
                    }
                    SlotKind::QuestionAnswer => {
                        self.last_answer = Some(content);
                        self.commit(Event::AnswerUpdated);
                    }
                }
            }
            Err(e) => {
                // Silent degradation: the loading indicator clears and
                // no new content is shown.
                warn!(slot = %slot, error = %e, "answer service call failed");
                if self.tasks.fail(slot, generation) {
                    self.commit(Event::ViewChanged);
                }
            }
        }
    }

    fn on_search_done(&mut self, result: Result<String, AiError>) {
        self.searches_in_flight = self.searches_in_flight.saturating_sub(1);
        match result {
            Ok(content) => {
                let id = self.search.append(content).id.clone();
                self.answer_kind = Some(AnswerKind::Search);
                self.commit(Event::SearchAppended { id });
            }
            Err(e) => {
                warn!(error = %e, "search call failed");
                self.commit(Event::ViewChanged);
            }
        }
    }

    /// Persist, publish the new view snapshot, then notify subscribers.
    fn commit(&mut self, event: Event) {
        self.session.save(&self.session_state());
        self.view_tx.send_replace(self.build_view());
        self.bus.publish(event);
    }

    fn session_state(&self) -> SessionState {
        SessionState {
            summary: self.tasks.content(SlotKind::Summary).map(String::from),
            last_answer: self.last_answer.clone(),
            search_results: self.search.results().to_vec(),
            theme_dark: self.theme_dark,
        }
    }

    fn build_view(&self) -> PanelView {
        PanelView {
            popup: self.popup.state().clone(),
            summary: self.tasks.content(SlotKind::Summary).map(String::from),
            summarizing: self.tasks.is_pending(SlotKind::Summary),
            summarized: self.summarized,
            answer: self.last_answer.clone(),
            answering: self.tasks.is_pending(SlotKind::QuestionAnswer),
            answer_kind: self.answer_kind,
            search_results: self.search.results().to_vec(),
            searching: self.searches_in_flight > 0,
            theme_dark: self.theme_dark,
            scope: self.scope,
            url: self.url.clone(),
        }
    }

    /// Receive and apply a single message. Test hook; `run` is the
    /// production loop.
    #[cfg(test)]
    async fn step(&mut self) -> bool {
        match self.rx.recv().await {
            Some(msg) => self.apply(msg),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RawSelection;
    use async_trait::async_trait;
    use harv_common::Rect;
    use harv_store::MemoryStore;
    use std::sync::Mutex;

    struct FakeDocument {
        selection: Mutex<Option<RawSelection>>,
    }

    impl FakeDocument {
        fn new() -> Self {
            Self {
                selection: Mutex::new(None),
            }
        }

        fn select(&self, text: &str, rect: Rect) {
            *self.selection.lock().unwrap() = Some(RawSelection {
                text: text.to_string(),
                rect,
            });
        }
    }

    impl ActiveDocumentHost for &'static FakeDocument {
        fn query_selection(&self) -> Option<RawSelection> {
            self.selection.lock().unwrap().clone()
        }
    }

    struct FakeTabs;

    #[async_trait]
    impl TabHost for FakeTabs {
        async fn current_url(&self) -> Option<String> {
            Some("https://example.com/article".into())
        }
    }

    /// Scripted answer service: every call returns its task name plus
    /// the input, or an error when `failing` is set.
    struct FakeService {
        failing: bool,
    }

    #[async_trait]
    impl AnswerService for FakeService {
        async fn summarize_page(&self) -> Result<String, AiError> {
            if self.failing {
                return Err(AiError::ApiError("oracle down".into()));
            }
            Ok("summary of the page".into())
        }

        async fn ask_question(
            &self,
            question: &str,
            scope: QuestionScope,
        ) -> Result<String, AiError> {
            if self.failing {
                return Err(AiError::ApiError("oracle down".into()));
            }
            Ok(format!("answer[{}]: {question}", scope.as_str()))
        }

        async fn define(&self, text: &str) -> Result<String, AiError> {
            if self.failing {
                return Err(AiError::ApiError("oracle down".into()));
            }
            Ok(format!("definition: {text}"))
        }

        async fn elaborate(&self, text: &str) -> Result<String, AiError> {
            if self.failing {
                return Err(AiError::ApiError("oracle down".into()));
            }
            Ok(format!("elaboration: {text}"))
        }
    }

    fn document() -> &'static FakeDocument {
        Box::leak(Box::new(FakeDocument::new()))
    }

    fn controller_with(
        doc: &'static FakeDocument,
        failing: bool,
    ) -> PanelController<&'static FakeDocument> {
        let mut config = HarvConfig::default();
        config.panel.summarize_on_activate = true;
        PanelController::new(
            config,
            Arc::new(FakeService { failing }),
            Arc::new(MemoryStore::new()),
            doc,
            Viewport::new(375.0, 600.0),
        )
    }

    #[tokio::test]
    async fn activation_fetches_summary() {
        let mut panel = controller_with(document(), false);
        panel.activate(&FakeTabs).await;

        assert!(panel.build_view().summarizing);
        assert_eq!(
            panel.build_view().url.as_deref(),
            Some("https://example.com/article")
        );

        // Completion arrives through the loop.
        panel.step().await;
        let view = panel.build_view();
        assert!(!view.summarizing);
        assert!(view.summarized);
        assert_eq!(view.summary.as_deref(), Some("summary of the page"));
    }

    #[tokio::test]
    async fn end_to_end_selection_shows_clamped_popup() {
        let doc = document();
        let mut panel = controller_with(doc, false);
        let handle = panel.handle();

        doc.select("quantum", Rect::from_ltwh(100.0, 5.0, 60.0, 20.0));
        handle.pointer_release();
        panel.step().await;

        let view = panel.build_view();
        assert!(view.popup.visible);
        assert_eq!(view.popup.text, "quantum");
        let position = view.popup.position.unwrap();
        // top - 150 < 0 forces the below branch; x clamps to half width.
        assert_eq!(position.y, 25.0 + 10.0);
        assert!(position.x >= 150.0);
    }

    #[tokio::test]
    async fn outside_press_dismisses_popup() {
        let doc = document();
        let mut panel = controller_with(doc, false);
        let handle = panel.handle();
        handle.register_popup_element(Some(ElementHandle(9)));
        panel.step().await;

        doc.select("term", Rect::from_ltwh(100.0, 300.0, 60.0, 20.0));
        handle.pointer_release();
        panel.step().await;
        assert!(panel.build_view().popup.visible);

        // Press on the popup itself: stays up.
        handle.pointer_press(Some(ElementHandle(9)));
        handle.pointer_press(None);
        panel.step().await;
        panel.step().await;
        let view = panel.build_view();
        assert!(!view.popup.visible);
        assert!(view.popup.position.is_none());
    }

    #[tokio::test]
    async fn popup_define_fills_answer_without_hiding_popup() {
        let doc = document();
        let mut panel = controller_with(doc, false);
        let handle = panel.handle();

        doc.select("entropy", Rect::from_ltwh(100.0, 300.0, 60.0, 20.0));
        handle.pointer_release();
        panel.step().await;

        handle.popup_define();
        panel.step().await;
        assert!(panel.build_view().answering);
        assert!(panel.build_view().popup.visible);

        panel.step().await; // SlotDone
        let view = panel.build_view();
        assert_eq!(view.answer.as_deref(), Some("definition: entropy"));
        assert_eq!(view.answer_kind, Some(AnswerKind::Define));
        assert!(view.popup.visible);
    }

    #[tokio::test]
    async fn search_appends_to_log_in_order() {
        let doc = document();
        let mut panel = controller_with(doc, false);
        let handle = panel.handle();

        doc.select("X", Rect::from_ltwh(100.0, 300.0, 60.0, 20.0));
        handle.pointer_release();
        panel.step().await;
        handle.popup_search();
        panel.step().await;
        panel.step().await; // SearchDone

        doc.select("Y", Rect::from_ltwh(100.0, 300.0, 60.0, 20.0));
        handle.pointer_release();
        panel.step().await;
        handle.popup_search();
        panel.step().await;
        panel.step().await; // SearchDone

        let view = panel.build_view();
        assert_eq!(view.search_results.len(), 2);
        assert!(view.search_results[0].content.contains("X"));
        assert!(view.search_results[1].content.contains("Y"));
        assert!(view.search_results[1].timestamp > view.search_results[0].timestamp);
        assert!(!view.searching);
    }

    #[tokio::test]
    async fn blank_question_is_rejected_before_dispatch() {
        let mut panel = controller_with(document(), false);
        let handle = panel.handle();

        handle.submit_question("   ", QuestionScope::Page);
        panel.step().await;

        let view = panel.build_view();
        assert!(!view.answering);
        assert!(view.answer.is_none());
    }

    #[tokio::test]
    async fn question_flows_through_exclusive_slot() {
        let mut panel = controller_with(document(), false);
        let handle = panel.handle();

        handle.submit_question("what is this?", QuestionScope::Domain);
        panel.step().await;
        assert!(panel.build_view().answering);
        assert_eq!(panel.build_view().scope, QuestionScope::Domain);

        // A second question while pending is dropped, not queued.
        handle.submit_question("another?", QuestionScope::Page);
        panel.step().await;

        panel.step().await; // completion of the first
        let view = panel.build_view();
        assert_eq!(
            view.answer.as_deref(),
            Some("answer[domain]: what is this?")
        );
        assert!(!view.answering);
    }

    #[tokio::test]
    async fn dropped_question_does_not_change_scope() {
        let mut panel = controller_with(document(), false);
        let view_rx = panel.subscribe_view();
        let handle = panel.handle();

        handle.submit_question("first?", QuestionScope::Domain);
        panel.step().await;
        assert_eq!(panel.build_view().scope, QuestionScope::Domain);

        // Second question is dropped while the slot is busy; the scope
        // it carried must not leak into committed state.
        handle.submit_question("second?", QuestionScope::All);
        panel.step().await;
        assert_eq!(panel.build_view().scope, QuestionScope::Domain);
        assert_eq!(view_rx.borrow().scope, QuestionScope::Domain);
    }

    #[tokio::test]
    async fn service_failure_clears_indicator_without_content() {
        let mut panel = controller_with(document(), true);
        panel.activate(&FakeTabs).await;
        assert!(panel.build_view().summarizing);

        panel.step().await; // failed SlotDone
        let view = panel.build_view();
        assert!(!view.summarizing);
        assert!(!view.summarized);
        assert!(view.summary.is_none());
    }

    #[tokio::test]
    async fn theme_toggle_round_trips_through_store() {
        let store = Arc::new(MemoryStore::new());
        let mut config = HarvConfig::default();
        config.panel.summarize_on_activate = false;

        let mut panel = PanelController::new(
            config.clone(),
            Arc::new(FakeService { failing: false }),
            store.clone() as Arc<dyn KeyValueStore>,
            document(),
            Viewport::new(375.0, 600.0),
        );
        panel.activate(&FakeTabs).await;
        // No cached summary, so activation still fetches one.
        assert!(panel.build_view().summarizing);
        panel.step().await;

        let handle = panel.handle();
        handle.toggle_theme();
        panel.step().await;
        assert!(panel.build_view().theme_dark);

        handle.shutdown();
        panel.run().await;

        // A fresh controller over the same store sees the persisted state.
        let mut reopened = PanelController::new(
            config,
            Arc::new(FakeService { failing: false }),
            store as Arc<dyn KeyValueStore>,
            document(),
            Viewport::new(375.0, 600.0),
        );
        reopened.activate(&FakeTabs).await;
        let view = reopened.build_view();
        assert!(view.theme_dark);
        assert_eq!(view.summary.as_deref(), Some("summary of the page"));
        // summarize_on_activate=false plus a cached summary: no refetch.
        assert!(!view.summarizing);
    }

    #[tokio::test]
    async fn view_watch_publishes_snapshots() {
        let doc = document();
        let mut panel = controller_with(doc, false);
        let view_rx = panel.subscribe_view();
        let handle = panel.handle();

        doc.select("term", Rect::from_ltwh(100.0, 300.0, 60.0, 20.0));
        handle.pointer_release();
        panel.step().await;

        assert!(view_rx.borrow().popup.visible);
    }

    #[tokio::test]
    async fn events_published_per_transition() {
        let doc = document();
        let mut panel = controller_with(doc, false);
        let mut events = panel.subscribe_events();
        let handle = panel.handle();

        doc.select("term", Rect::from_ltwh(100.0, 300.0, 60.0, 20.0));
        handle.pointer_release();
        panel.step().await;
        handle.dismiss_popup();
        panel.step().await;

        assert!(matches!(events.recv().await.unwrap(), Event::PopupShown));
        assert!(matches!(events.recv().await.unwrap(), Event::PopupHidden));
    }
}
