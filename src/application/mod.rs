//! Application layer: Use cases and services.
//!
//! `SymptomStore` owns all UI-visible state; `AnalysisService` talks to the
//! backend on behalf of the worker threads.

mod analysis;
pub mod store;

pub use analysis::AnalysisService;
pub use store::{AnalysisPhase, AnalysisTicket, CatalogStatus, Notice, SymptomStore};
