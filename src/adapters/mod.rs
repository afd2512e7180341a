//! Adapters layer: Concrete implementations of ports.
//!
//! - `http`: ureq client for the remote diagnostic service
//! - `sanitize`: credential filtering for logs

pub mod http;
pub mod sanitize;

pub use http::HttpBackend;
