//! Main TUI application state machine.
//!
//! Handles:
//! - Input event handling
//! - Background catalog and prediction workers
//! - The analyzing progress animation
//! - Drawing the single-screen layout

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::sanitize::redact_url;
use crate::adapters::HttpBackend;
use crate::application::{AnalysisService, SymptomStore};
use crate::config::Config;
use crate::ports::{BackendError, DiagnosticsBackend};

use super::ui::{
    notice::render_notice, render_disclaimer, render_header, render_key_hints,
    results::render_results, symptoms::render_symptom_pane,
};
use super::worker::{BackendWorker, CatalogOutcome, PredictionOutcome, WorkerHandle, WorkerPoll};

/// Rows moved by PageUp/PageDown.
const PAGE_STEP: usize = 10;

/// Gauge ceiling while waiting for the backend.
const PROGRESS_CEILING: f64 = 0.95;

/// Time constant of the progress curve, in seconds.
const PROGRESS_TAU: f64 = 1.5;

/// Main application state
pub struct App {
    /// Whether the app should quit
    should_quit: bool,

    /// Backend orchestration, cloned into workers
    service: AnalysisService,

    /// All domain-visible state
    store: SymptomStore,

    /// Backend origin for the header (credentials removed)
    backend_label: String,

    /// Cursor row within the visible symptom list
    cursor: usize,

    /// Pending catalog load (if running)
    catalog_worker: Option<WorkerHandle<CatalogOutcome>>,

    /// Pending prediction (if running)
    prediction_worker: Option<WorkerHandle<PredictionOutcome>>,

    /// Analyzing gauge position (0.0 to 1.0)
    progress: f64,

    /// When the current analysis started (for UI animation)
    progress_started_at: Option<Instant>,
}

impl App {
    /// Create a new application talking HTTP to the configured backend.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let backend = Arc::new(HttpBackend::new(&config.api_base, config.request_timeout));
        Self::with_dependencies(backend, config)
    }

    /// Create application with an injected backend.
    ///
    /// Lets `main.rs` or tests choose the backend implementation.
    #[must_use]
    pub fn with_dependencies(backend: Arc<dyn DiagnosticsBackend>, config: &Config) -> Self {
        Self {
            should_quit: false,
            service: AnalysisService::new(backend),
            store: SymptomStore::new(config.settle_delay),
            backend_label: redact_url(&config.api_base),
            cursor: 0,
            catalog_worker: None,
            prediction_worker: None,
            progress: 0.0,
            progress_started_at: None,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Catalog fetch races the first frames; the UI copes with an empty list.
        self.start_catalog_load();

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        // Outstanding requests must not deliver into a torn-down UI.
        self.cancel_workers();

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            let now = Instant::now();
            self.poll_workers(now);
            self.store.tick(now);
            self.tick_progress(now);

            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(2), // Header
                        Constraint::Min(0),    // Panes
                        Constraint::Length(1), // Key hints
                        Constraint::Length(2), // Disclaimer
                    ])
                    .split(area);

                let panes = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(42), Constraint::Percentage(58)])
                    .split(chunks[1]);

                render_header(f, chunks[0], &self.backend_label, self.store.catalog_status());
                render_symptom_pane(f, panes[0], &self.store, self.cursor);
                render_results(f, panes[1], &self.store, self.progress);
                render_key_hints(f, chunks[2], self.store.notice().is_some());
                render_disclaimer(f, chunks[3]);

                if let Some(notice) = self.store.notice() {
                    render_notice(f, area, notice);
                }
            })?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Issue a catalog (re)load, superseding any load still running.
    fn start_catalog_load(&mut self) {
        let generation = self.store.begin_catalog_load();
        tracing::info!("Loading symptom catalog (generation {})", generation);
        self.catalog_worker = Some(BackendWorker::spawn_catalog_load(
            self.service.clone(),
            generation,
        ));
    }

    /// Submit the current selection unless empty or already analyzing.
    fn start_analysis(&mut self) {
        let Some(ticket) = self.store.begin_analysis() else {
            return;
        };

        self.progress = 0.0;
        self.progress_started_at = Some(Instant::now());
        self.prediction_worker = Some(BackendWorker::spawn_prediction(
            self.service.clone(),
            ticket,
        ));
    }

    /// Drain finished workers into the store.
    fn poll_workers(&mut self, now: Instant) {
        if let Some(worker) = &self.catalog_worker {
            match worker.poll() {
                WorkerPoll::Pending => {}
                WorkerPoll::Ready(outcome) => {
                    self.store.apply_catalog(outcome.generation, outcome.result);
                    self.catalog_worker = None;
                    self.clamp_cursor();
                }
                WorkerPoll::Lost => {
                    tracing::error!("Catalog worker exited without a result");
                    self.catalog_worker = None;
                    self.store.abandon_catalog_load(BackendError::Connectivity(
                        "worker stopped".to_string(),
                    ));
                }
            }
        }

        if let Some(worker) = &self.prediction_worker {
            match worker.poll() {
                WorkerPoll::Pending => {}
                WorkerPoll::Ready(outcome) => {
                    self.store.settle_analysis(&outcome.ticket, outcome.result, now);
                    self.prediction_worker = None;
                }
                WorkerPoll::Lost => {
                    tracing::error!("Prediction worker exited without a result");
                    self.prediction_worker = None;
                    self.store.abandon_analysis(
                        BackendError::Connectivity("worker stopped".to_string()),
                        now,
                    );
                }
            }
        }
    }

    /// Advance the analyzing gauge.
    ///
    /// Once the response is in, the gauge sits at 100% for the settle delay.
    fn tick_progress(&mut self, now: Instant) {
        if !self.store.is_analyzing() {
            self.progress_started_at = None;
            return;
        }

        if !self.store.has_request_in_flight() {
            self.progress = 1.0;
            return;
        }

        let Some(started_at) = self.progress_started_at else {
            return;
        };

        let elapsed = now.saturating_duration_since(started_at).as_secs_f64();

        // Smooth, monotonic fake progress: asymptotically approaches the ceiling.
        let k = 1.0 - (-elapsed / PROGRESS_TAU).exp();
        let desired = (PROGRESS_CEILING * k).clamp(0.0, PROGRESS_CEILING);
        self.progress = desired.max(self.progress).min(PROGRESS_CEILING);
    }

    fn cancel_workers(&mut self) {
        if let Some(worker) = self.catalog_worker.take() {
            worker.cancel();
        }
        if let Some(worker) = self.prediction_worker.take() {
            worker.cancel();
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);

        // Global quit handling
        if ctrl && matches!(key, KeyCode::Char('q') | KeyCode::Char('c')) {
            self.should_quit = true;
            return;
        }

        if self.store.notice().is_some() {
            if matches!(key, KeyCode::Enter | KeyCode::Esc) {
                self.store.dismiss_notice();
            }
            return;
        }

        if ctrl {
            match key {
                KeyCode::Char('r') => self.store.reset_selection(),
                KeyCode::Char('l') => self.start_catalog_load(),
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Esc => {
                if self.store.search_term().is_empty() {
                    self.should_quit = true;
                } else {
                    self.store.clear_search();
                }
            }
            KeyCode::Enter => self.start_analysis(),
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => self.cursor = self.cursor.saturating_add(1),
            KeyCode::PageUp => self.cursor = self.cursor.saturating_sub(PAGE_STEP),
            KeyCode::PageDown => self.cursor = self.cursor.saturating_add(PAGE_STEP),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = usize::MAX,
            KeyCode::Left | KeyCode::BackTab => self.store.prev_category(),
            KeyCode::Right | KeyCode::Tab => self.store.next_category(),
            KeyCode::Char(' ') => self.toggle_under_cursor(),
            KeyCode::Char(c) if !c.is_control() => self.store.push_search_char(c),
            KeyCode::Backspace => self.store.pop_search_char(),
            KeyCode::Delete => self.store.clear_search(),
            _ => {}
        }

        self.clamp_cursor();
    }

    fn toggle_under_cursor(&mut self) {
        let symptom = self
            .store
            .visible_symptoms()
            .get(self.cursor)
            .map(|s| s.to_string());

        if let Some(symptom) = symptom {
            let selected = self.store.toggle_symptom(&symptom);
            tracing::debug!("Toggled {} -> {}", symptom, selected);
        }
    }

    fn clamp_cursor(&mut self) {
        let visible = self.store.visible_symptoms().len();
        self.cursor = self.cursor.min(visible.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{AnalysisPhase, CatalogStatus};
    use crate::ports::FailureKind;
    use crate::domain::PredictionResult;
    use crate::testing::ScriptedBackend;

    /// Backend whose calls panic, killing the worker thread.
    struct CrashingBackend;

    impl DiagnosticsBackend for CrashingBackend {
        fn fetch_symptoms(&self) -> std::result::Result<Vec<String>, BackendError> {
            panic!("catalog worker crashed");
        }

        fn predict(&self, _symptoms: &[String]) -> std::result::Result<PredictionResult, BackendError> {
            panic!("prediction worker crashed");
        }
    }

    fn test_config() -> Config {
        Config {
            settle_delay: Duration::ZERO,
            ..Config::default()
        }
    }

    fn app_with(backend: Arc<ScriptedBackend>) -> App {
        let mut app = App::with_dependencies(backend, &test_config());
        app.start_catalog_load();
        pump_until(&mut app, |app| app.catalog_worker.is_none());
        app
    }

    /// Poll workers until `done` holds or five seconds pass.
    fn pump_until(app: &mut App, done: impl Fn(&App) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !done(app) {
            assert!(Instant::now() < deadline, "Timed out waiting for workers");
            std::thread::sleep(Duration::from_millis(5));
            let now = Instant::now();
            app.poll_workers(now);
            app.store.tick(now);
            app.tick_progress(now);
        }
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_catalog_loads_on_start() {
        let backend = Arc::new(ScriptedBackend::with_catalog(&["fever", "itching", "headache"]));
        let app = app_with(backend.clone());

        assert_eq!(app.store.catalog_status(), &CatalogStatus::Ready);
        assert_eq!(app.store.catalog().len(), 3);
        assert_eq!(backend.fetch_calls(), 1);
    }

    #[test]
    fn test_catalog_failure_shows_unavailable() {
        let backend = Arc::new(ScriptedBackend::failing_catalog(BackendError::Connectivity(
            "refused".to_string(),
        )));
        let app = app_with(backend);

        assert!(matches!(app.store.catalog_status(), CatalogStatus::Unavailable(_)));
        assert!(app.store.catalog().is_empty());
        assert!(app.store.notice().is_none());
    }

    #[test]
    fn test_typing_filters_and_space_toggles() {
        let backend = Arc::new(ScriptedBackend::with_catalog(&["fever", "itching", "headache"]));
        let mut app = app_with(backend);

        type_text(&mut app, "fe");
        assert_eq!(app.store.visible_symptoms(), vec!["fever"]);

        press(&mut app, KeyCode::Char(' '));
        assert!(app.store.selection().contains("fever"));

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.store.search_term(), "");
        assert!(!app.should_quit);
        assert!(app.store.selection().contains("fever"));
    }

    #[test]
    fn test_cursor_stays_within_visible_list() {
        let backend = Arc::new(ScriptedBackend::with_catalog(&["fever", "itching", "headache"]));
        let mut app = app_with(backend);

        press(&mut app, KeyCode::End);
        assert_eq!(app.cursor, 2);
        type_text(&mut app, "it");
        assert_eq!(app.cursor, 0);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_enter_with_empty_selection_sends_nothing() {
        let backend = Arc::new(ScriptedBackend::with_catalog(&["fever"]));
        let mut app = app_with(backend.clone());

        press(&mut app, KeyCode::Enter);
        assert!(app.prediction_worker.is_none());
        assert_eq!(app.store.phase(), AnalysisPhase::Idle);
        assert!(backend.predict_calls().is_empty());
    }

    #[test]
    fn test_full_analysis_round_trip() {
        let backend = Arc::new(ScriptedBackend::with_catalog(&["fever", "itching", "headache"]));
        let mut app = app_with(backend.clone());

        press(&mut app, KeyCode::Char(' ')); // fever
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' ')); // headache
        press(&mut app, KeyCode::Enter);
        assert!(app.store.is_analyzing());

        pump_until(&mut app, |app| app.store.phase() == AnalysisPhase::Done);

        assert_eq!(
            backend.predict_calls(),
            vec![vec!["fever".to_string(), "headache".to_string()]]
        );
        let prediction = app.store.prediction().expect("Should store prediction");
        assert_eq!(prediction.result.disease, "Flu");
    }

    #[test]
    fn test_gauge_full_during_settle_delay() {
        let backend = Arc::new(ScriptedBackend::with_catalog(&["fever"]));
        let config = Config {
            settle_delay: Duration::from_secs(30),
            ..Config::default()
        };
        let mut app = App::with_dependencies(backend, &config);
        app.start_catalog_load();
        pump_until(&mut app, |app| app.catalog_worker.is_none());

        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);
        app.tick_progress(Instant::now());
        assert!(app.progress < 1.0);

        pump_until(&mut app, |app| !app.store.has_request_in_flight());
        assert!(app.store.is_analyzing());
        assert_eq!(app.progress, 1.0);
    }

    #[test]
    fn test_crashed_catalog_worker_marks_catalog_unavailable() {
        let mut app = App::with_dependencies(Arc::new(CrashingBackend), &test_config());
        app.start_catalog_load();
        pump_until(&mut app, |app| app.catalog_worker.is_none());

        assert!(matches!(
            app.store.catalog_status(),
            CatalogStatus::Unavailable(_)
        ));
    }

    #[test]
    fn test_crashed_prediction_worker_raises_notice() {
        let mut app = App::with_dependencies(Arc::new(CrashingBackend), &test_config());
        app.store.toggle_symptom("fever");
        press(&mut app, KeyCode::Enter);
        pump_until(&mut app, |app| app.prediction_worker.is_none());

        assert_eq!(app.store.phase(), AnalysisPhase::Done);
        assert_eq!(
            app.store.notice().map(|n| n.kind),
            Some(FailureKind::Connectivity)
        );
    }

    #[test]
    fn test_double_submit_sends_once() {
        let backend = Arc::new(
            ScriptedBackend::with_catalog(&["fever"]).with_delay(Duration::from_millis(100)),
        );
        let mut app = app_with(backend.clone());

        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);

        pump_until(&mut app, |app| app.store.phase() == AnalysisPhase::Done);
        assert_eq!(backend.predict_calls().len(), 1);
    }

    #[test]
    fn test_failure_raises_blocking_notice() {
        let backend = Arc::new(
            ScriptedBackend::with_catalog(&["fever", "cough"])
                .failing_predict(BackendError::Server { status: 500 }),
        );
        let mut app = app_with(backend);

        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);
        pump_until(&mut app, |app| app.store.phase() == AnalysisPhase::Done);

        assert!(app.store.prediction().is_none());
        assert_eq!(
            app.store.notice().map(|n| n.kind),
            Some(FailureKind::Server)
        );

        // Input is swallowed until the notice is dismissed.
        type_text(&mut app, "co");
        assert_eq!(app.store.search_term(), "");
        press(&mut app, KeyCode::Enter);
        assert!(app.store.notice().is_none());

        type_text(&mut app, "co");
        assert_eq!(app.store.visible_symptoms(), vec!["cough"]);
    }

    #[test]
    fn test_ctrl_keys() {
        let backend = Arc::new(ScriptedBackend::with_catalog(&["fever", "cough"]));
        let mut app = app_with(backend.clone());

        press(&mut app, KeyCode::Char(' '));
        app.handle_key(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert!(app.store.selection().is_empty());

        app.handle_key(KeyCode::Char('l'), KeyModifiers::CONTROL);
        pump_until(&mut app, |app| app.catalog_worker.is_none());
        assert_eq!(backend.fetch_calls(), 2);

        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_category_keys_cycle() {
        let backend = Arc::new(ScriptedBackend::with_catalog(&["fever", "polyuria"]));
        let mut app = app_with(backend);

        press(&mut app, KeyCode::Left);
        assert_eq!(app.store.category().name(), "Others");
        assert_eq!(app.store.visible_symptoms(), vec!["polyuria"]);

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.store.category().name(), "General");
        assert_eq!(app.store.visible_symptoms(), vec!["fever"]);
    }
}
