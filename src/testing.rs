//! Test doubles shared by unit tests across the crate.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::PredictionResult;
use crate::ports::{BackendError, DiagnosticsBackend};

pub(crate) fn flu() -> PredictionResult {
    PredictionResult {
        disease: "Flu".to_string(),
        description: "Viral infection of the airways".to_string(),
        medications: vec!["Oseltamivir".to_string()],
        precautions: vec!["Rest".to_string(), "Hydrate".to_string()],
        diets: vec!["Broth".to_string()],
        workout: "Avoid strenuous exercise".to_string(),
    }
}

/// Backend answering from fixed scripts and recording every call.
pub(crate) struct ScriptedBackend {
    catalog: Result<Vec<String>, BackendError>,
    prediction: Result<PredictionResult, BackendError>,
    delay: Duration,
    fetches: AtomicUsize,
    predictions: Mutex<Vec<Vec<String>>>,
}

impl ScriptedBackend {
    pub(crate) fn with_catalog(symptoms: &[&str]) -> Self {
        Self {
            catalog: Ok(symptoms.iter().map(|s| s.to_string()).collect()),
            prediction: Ok(flu()),
            delay: Duration::ZERO,
            fetches: AtomicUsize::new(0),
            predictions: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing_catalog(err: BackendError) -> Self {
        Self {
            catalog: Err(err),
            ..Self::with_catalog(&[])
        }
    }

    pub(crate) fn failing_predict(mut self, err: BackendError) -> Self {
        self.prediction = Err(err);
        self
    }

    /// Make every call block for `delay` first.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn fetch_calls(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub(crate) fn predict_calls(&self) -> Vec<Vec<String>> {
        self.predictions.lock().expect("lock").clone()
    }
}

impl DiagnosticsBackend for ScriptedBackend {
    fn fetch_symptoms(&self) -> Result<Vec<String>, BackendError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        self.catalog.clone()
    }

    fn predict(&self, symptoms: &[String]) -> Result<PredictionResult, BackendError> {
        self.predictions
            .lock()
            .expect("lock")
            .push(symptoms.to_vec());
        std::thread::sleep(self.delay);
        self.prediction.clone()
    }
}
