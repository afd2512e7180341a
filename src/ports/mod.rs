//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, the backend trait defines the boundary
//! between the application and the remote diagnostic service.

mod backend;

pub use backend::{BackendError, DiagnosticsBackend, FailureKind};
