//! Analysis service: Orchestrates calls to the diagnostic backend.
//!
//! The service is stateless apart from the backend handle, so it is cheap to
//! clone into worker threads. State changes are left to `SymptomStore`.

use std::sync::Arc;
use std::time::Instant;

use crate::application::store::AnalysisTicket;
use crate::domain::PredictionResult;
use crate::ports::{BackendError, DiagnosticsBackend};

/// Service for loading the catalog and running predictions.
#[derive(Clone)]
pub struct AnalysisService {
    backend: Arc<dyn DiagnosticsBackend>,
}

impl AnalysisService {
    /// Create a new analysis service.
    pub fn new(backend: Arc<dyn DiagnosticsBackend>) -> Self {
        Self { backend }
    }

    /// Fetch the symptom vocabulary.
    ///
    /// # Errors
    /// Returns the backend error unchanged; callers decide how to degrade.
    pub fn load_catalog(&self) -> Result<Vec<String>, BackendError> {
        let started = Instant::now();
        let result = self.backend.fetch_symptoms();

        match &result {
            Ok(symptoms) => tracing::debug!(
                "Fetched {} symptoms in {} ms",
                symptoms.len(),
                started.elapsed().as_millis()
            ),
            Err(e) => tracing::debug!(
                "Symptom fetch failed after {} ms: {}",
                started.elapsed().as_millis(),
                e
            ),
        }

        result
    }

    /// Submit the ticket's symptoms for prediction.
    ///
    /// # Errors
    /// Returns error if the backend call fails.
    pub fn run_prediction(
        &self,
        ticket: &AnalysisTicket,
    ) -> Result<PredictionResult, BackendError> {
        tracing::info!(
            "Starting analysis #{} with {} symptoms",
            ticket.generation,
            ticket.symptoms.len()
        );
        tracing::debug!("Submitted symptoms: {:?}", ticket.symptoms);

        let started = Instant::now();
        let result = self.backend.predict(&ticket.symptoms);

        tracing::info!(
            "Analysis #{} finished in {} ms ({})",
            ticket.generation,
            started.elapsed().as_millis(),
            if result.is_ok() { "ok" } else { "failed" }
        );

        result
    }
}
