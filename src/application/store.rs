//! Symptom store: the single state container behind the UI.
//!
//! Holds the catalog, the selection, the filter inputs, the last prediction
//! and the analysis phase. All mutation goes through the methods here; the
//! visible symptom list is derived on every call and never cached.
//!
//! Backend calls are not made from here. Instead the store hands out tickets
//! (`begin_catalog_load`, `begin_analysis`) and accepts their outcomes back
//! (`apply_catalog`, `settle_analysis`). Each ticket carries a generation
//! number so a late answer to an older request is dropped.

use std::time::{Duration, Instant};

use crate::domain::{CategoryFilter, FilterState, Prediction, PredictionResult, SelectionSet};
use crate::ports::{BackendError, FailureKind};

/// Prediction lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisPhase {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// Request in flight, or response received and settle delay running
    Loading,
    /// Last submission finished (successfully or not)
    Done,
}

/// State of the symptom vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogStatus {
    /// Request issued, no answer yet
    #[default]
    Pending,
    /// Catalog loaded (possibly empty)
    Ready,
    /// Last load failed; the message is shown in place of the list
    Unavailable(String),
}

/// Blocking notification for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub kind: FailureKind,
}

impl Notice {
    #[must_use]
    pub fn analysis_failed(err: &BackendError) -> Self {
        Self {
            title: "Analysis Failed".to_string(),
            message: err.user_message(),
            kind: err.kind(),
        }
    }
}

/// Permission to send one prediction request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisTicket {
    pub generation: u64,
    pub symptoms: Vec<String>,
}

/// UI state container.
#[derive(Debug)]
pub struct SymptomStore {
    catalog: Vec<String>,
    catalog_status: CatalogStatus,
    catalog_generation: u64,

    selection: SelectionSet,
    filter: FilterState,

    prediction: Option<Prediction>,
    phase: AnalysisPhase,
    analysis_generation: u64,
    in_flight: Option<u64>,
    settle_deadline: Option<Instant>,
    settle_delay: Duration,

    notice: Option<Notice>,
}

impl SymptomStore {
    /// Create an empty store.
    ///
    /// `settle_delay` is how long `Loading` persists after a response.
    #[must_use]
    pub fn new(settle_delay: Duration) -> Self {
        Self {
            catalog: Vec::new(),
            catalog_status: CatalogStatus::Pending,
            catalog_generation: 0,
            selection: SelectionSet::new(),
            filter: FilterState::default(),
            prediction: None,
            phase: AnalysisPhase::Idle,
            analysis_generation: 0,
            in_flight: None,
            settle_deadline: None,
            settle_delay,
            notice: None,
        }
    }

    // === Catalog ===

    /// Start a (re)load. Returns the generation the answer must carry.
    pub fn begin_catalog_load(&mut self) -> u64 {
        self.catalog_generation += 1;
        self.catalog_status = CatalogStatus::Pending;
        self.catalog_generation
    }

    /// Accept the outcome of a catalog load.
    ///
    /// A failure keeps whatever catalog was loaded before (empty on startup).
    /// Returns `false` if the answer belongs to a superseded load.
    pub fn apply_catalog(
        &mut self,
        generation: u64,
        outcome: Result<Vec<String>, BackendError>,
    ) -> bool {
        if generation != self.catalog_generation {
            tracing::debug!(
                "Dropping stale catalog response (generation {}, current {})",
                generation,
                self.catalog_generation
            );
            return false;
        }

        match outcome {
            Ok(symptoms) => {
                tracing::info!("Catalog loaded: {} symptoms", symptoms.len());
                self.catalog = symptoms;
                self.catalog_status = CatalogStatus::Ready;
            }
            Err(e) => {
                tracing::warn!("Catalog unavailable: {}", e);
                self.catalog_status = CatalogStatus::Unavailable(e.user_message());
            }
        }
        true
    }

    /// Fail the current load when its worker disappeared without answering.
    pub fn abandon_catalog_load(&mut self, err: BackendError) {
        let generation = self.catalog_generation;
        self.apply_catalog(generation, Err(err));
    }

    #[must_use]
    pub fn catalog(&self) -> &[String] {
        &self.catalog
    }

    #[must_use]
    pub fn catalog_status(&self) -> &CatalogStatus {
        &self.catalog_status
    }

    // === Selection ===

    /// Flip membership of `symptom`. Returns `true` if now selected.
    pub fn toggle_symptom(&mut self, symptom: &str) -> bool {
        self.selection.toggle(symptom)
    }

    /// Clear the selection. Filter and prediction are untouched.
    pub fn reset_selection(&mut self) {
        self.selection.clear();
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    // === Filter ===

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filter.search_term = term.into();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.filter.search_term.push(c);
    }

    pub fn pop_search_char(&mut self) {
        self.filter.search_term.pop();
    }

    pub fn clear_search(&mut self) {
        self.filter.search_term.clear();
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.filter.search_term
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.filter.category = category;
    }

    /// Select a category tab by its display name.
    ///
    /// # Errors
    /// Returns error if `name` is not a category, "All" or "Others".
    pub fn set_category_name(&mut self, name: &str) -> crate::Result<()> {
        self.filter.category = name.parse()?;
        Ok(())
    }

    pub fn next_category(&mut self) {
        self.filter.category = self.filter.category.next();
    }

    pub fn prev_category(&mut self) {
        self.filter.category = self.filter.category.prev();
    }

    #[must_use]
    pub fn category(&self) -> CategoryFilter {
        self.filter.category
    }

    /// Catalog entries passing the current search and category.
    #[must_use]
    pub fn visible_symptoms(&self) -> Vec<&str> {
        self.filter.apply(&self.catalog)
    }

    // === Analysis ===

    /// Request permission to submit the current selection.
    ///
    /// Returns `None` (and changes nothing) when the selection is empty or a
    /// previous submission has not finished.
    pub fn begin_analysis(&mut self) -> Option<AnalysisTicket> {
        if self.selection.is_empty() {
            return None;
        }
        if self.phase == AnalysisPhase::Loading {
            tracing::debug!("Analysis already running; ignoring submit");
            return None;
        }

        self.analysis_generation += 1;
        self.in_flight = Some(self.analysis_generation);
        self.settle_deadline = None;
        self.phase = AnalysisPhase::Loading;

        Some(AnalysisTicket {
            generation: self.analysis_generation,
            symptoms: self.selection.to_vec(),
        })
    }

    /// Accept the outcome of a prediction request.
    ///
    /// On success the prediction is replaced immediately; on failure it is
    /// kept and a notice is raised. Either way `Loading` ends once the settle
    /// delay has passed (see [`SymptomStore::tick`]). Returns `false` if the
    /// outcome does not belong to the request in flight.
    pub fn settle_analysis(
        &mut self,
        ticket: &AnalysisTicket,
        outcome: Result<PredictionResult, BackendError>,
        now: Instant,
    ) -> bool {
        if self.in_flight != Some(ticket.generation) {
            tracing::debug!(
                "Dropping stale prediction (generation {})",
                ticket.generation
            );
            return false;
        }
        self.in_flight = None;

        match outcome {
            Ok(result) => {
                tracing::info!("Prediction received: {}", result.disease);
                self.prediction = Some(Prediction::new(result, ticket.symptoms.clone()));
            }
            Err(e) => {
                tracing::error!("Prediction failed: {}", e);
                self.notice = Some(Notice::analysis_failed(&e));
            }
        }

        self.settle_deadline = Some(now + self.settle_delay);
        self.tick(now);
        true
    }

    /// Fail whatever request is in flight without its ticket.
    ///
    /// Used when the worker carrying the ticket disappeared.
    pub fn abandon_analysis(&mut self, err: BackendError, now: Instant) -> bool {
        let Some(generation) = self.in_flight else {
            return false;
        };
        let ticket = AnalysisTicket {
            generation,
            symptoms: Vec::new(),
        };
        self.settle_analysis(&ticket, Err(err), now)
    }

    /// Advance time-based state. Returns `true` if the phase changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.settle_deadline {
            Some(deadline) if now >= deadline => {
                self.settle_deadline = None;
                self.phase = AnalysisPhase::Done;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn phase(&self) -> AnalysisPhase {
        self.phase
    }

    #[must_use]
    pub fn is_analyzing(&self) -> bool {
        self.phase == AnalysisPhase::Loading
    }

    /// Whether a request is still awaiting its response.
    #[must_use]
    pub fn has_request_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn prediction(&self) -> Option<&Prediction> {
        self.prediction.as_ref()
    }

    // === Notices ===

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
