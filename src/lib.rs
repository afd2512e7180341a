//! # neurodx
//!
//! Terminal symptom checker for a remote disease-prediction service.
//!
//! The user picks symptoms from a categorized, searchable checklist; the
//! selection is sent to the service and the returned diagnosis, medications,
//! precautions, diet and recovery plan are shown alongside.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Catalog, categories, selection, filter and prediction types
//! - `ports`: The `DiagnosticsBackend` trait
//! - `adapters`: HTTP client (ureq) and log sanitization
//! - `application`: State container and backend orchestration
//! - `config`: Environment-driven configuration
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use domain::{CategoryFilter, PredictionResult, SelectionSet};

/// Result type for neurodx operations
pub type Result<T> = std::result::Result<T, NeurodxError>;

/// Main error type for neurodx
#[derive(Debug, thiserror::Error)]
pub enum NeurodxError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    UnknownCategory(#[from] domain::UnknownCategory),
}
