//! TUI module: Terminal User Interface using Ratatui.
//!
//! One screen with two panes:
//! - Symptom checklist with search and category tabs
//! - Clinical dashboard showing the latest prediction

mod app;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use styles::ClinicalTheme;
pub use worker::{BackendWorker, CatalogOutcome, PredictionOutcome, WorkerHandle, WorkerPoll};
