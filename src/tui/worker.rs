//! Background workers for non-blocking backend calls.
//!
//! Each backend request runs on its own thread and reports exactly one
//! outcome over a channel, so the TUI loop never blocks on the network.
//! Dropping a handle cancels it: the thread may still finish its request
//! (bounded by the client timeout) but its outcome is thrown away.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::application::{AnalysisService, AnalysisTicket};
use crate::domain::PredictionResult;
use crate::ports::BackendError;

/// Answer to a catalog load.
#[derive(Debug)]
pub struct CatalogOutcome {
    pub generation: u64,
    pub result: Result<Vec<String>, BackendError>,
}

/// Answer to a prediction request.
#[derive(Debug)]
pub struct PredictionOutcome {
    pub ticket: AnalysisTicket,
    pub result: Result<PredictionResult, BackendError>,
}

/// Result of polling a worker.
#[derive(Debug)]
pub enum WorkerPoll<T> {
    /// Still running
    Pending,
    /// Finished with an outcome
    Ready(T),
    /// Thread ended without reporting (panicked)
    Lost,
}

/// Handle to a running worker.
pub struct WorkerHandle<T> {
    rx: Receiver<T>,
    cancelled: Arc<AtomicBool>,
    _handle: JoinHandle<()>,
}

impl<T> WorkerHandle<T> {
    /// Check for the outcome without blocking.
    #[must_use]
    pub fn poll(&self) -> WorkerPoll<T> {
        match self.rx.try_recv() {
            Ok(outcome) => WorkerPoll::Ready(outcome),
            Err(TryRecvError::Empty) => WorkerPoll::Pending,
            Err(TryRecvError::Disconnected) => WorkerPoll::Lost,
        }
    }

    /// Discard the outcome when it arrives.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

impl<T> Drop for WorkerHandle<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Spawns backend calls off the UI thread.
pub struct BackendWorker;

impl BackendWorker {
    /// Fetch the symptom catalog in the background.
    pub fn spawn_catalog_load(
        service: AnalysisService,
        generation: u64,
    ) -> WorkerHandle<CatalogOutcome> {
        Self::spawn("catalog", move || CatalogOutcome {
            generation,
            result: service.load_catalog(),
        })
    }

    /// Run a prediction in the background.
    pub fn spawn_prediction(
        service: AnalysisService,
        ticket: AnalysisTicket,
    ) -> WorkerHandle<PredictionOutcome> {
        Self::spawn("prediction", move || {
            let result = service.run_prediction(&ticket);
            PredictionOutcome { ticket, result }
        })
    }

    fn spawn<T, F>(label: &'static str, job: F) -> WorkerHandle<T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();

        let handle = thread::spawn(move || {
            let outcome = job();
            if flag.load(Ordering::SeqCst) {
                tracing::debug!("Discarding {} outcome from cancelled worker", label);
                return;
            }
            // Receiver may already be gone on shutdown.
            let _ = tx.send(outcome);
        });

        WorkerHandle {
            rx,
            cancelled,
            _handle: handle,
        }
    }
}
