//! Diagnostics backend port: Trait for the remote prediction service.
//!
//! The service owns the symptom vocabulary and the inference model. This
//! crate only ever reads the vocabulary and submits selections to it.

use crate::domain::PredictionResult;

/// Coarse failure category shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Service unreachable or too slow
    Connectivity,
    /// Service refused the request (4xx)
    Validation,
    /// Service failed while handling the request (5xx)
    Server,
    /// Service answered with something we cannot read
    Protocol,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connectivity => write!(f, "CONNECTIVITY"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Server => write!(f, "SERVER"),
            Self::Protocol => write!(f, "PROTOCOL"),
        }
    }
}

/// Errors from a diagnostics backend call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("Cannot reach diagnostic service: {0}")]
    Connectivity(String),

    #[error("Diagnostic service timed out")]
    Timeout,

    #[error("Diagnostic service rejected the request (HTTP {status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("Diagnostic service error (HTTP {status})")]
    Server { status: u16 },

    #[error("Malformed response from diagnostic service: {0}")]
    Malformed(String),
}

impl BackendError {
    /// Map an HTTP status outside 2xx to the matching variant.
    #[must_use]
    pub fn from_status(status: u16, detail: impl Into<String>) -> Self {
        if (400..500).contains(&status) {
            Self::Rejected {
                status,
                detail: detail.into(),
            }
        } else {
            Self::Server { status }
        }
    }

    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Connectivity(_) | Self::Timeout => FailureKind::Connectivity,
            Self::Rejected { .. } => FailureKind::Validation,
            Self::Server { .. } => FailureKind::Server,
            Self::Malformed(_) => FailureKind::Protocol,
        }
    }

    /// Text for the blocking notice.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Connectivity(_) => {
                "Cannot reach the diagnostic service. Check the backend connection.".to_string()
            }
            Self::Timeout => "The diagnostic service did not respond in time.".to_string(),
            Self::Rejected { detail, .. } if !detail.is_empty() => {
                format!("The diagnostic service rejected the request: {detail}")
            }
            Self::Rejected { .. } => "The diagnostic service rejected the request.".to_string(),
            Self::Server { status } => {
                format!("The diagnostic service failed (HTTP {status}). Try again later.")
            }
            Self::Malformed(_) => {
                "The diagnostic service returned an unreadable response.".to_string()
            }
        }
    }
}

/// Remote symptom vocabulary and prediction service.
///
/// Implementations block the calling thread; the TUI only calls them from
/// worker threads.
pub trait DiagnosticsBackend: Send + Sync {
    /// Fetch the full symptom vocabulary (`GET /symptoms`).
    ///
    /// A well-formed response with a missing or malformed `symptoms` field
    /// yields an empty list rather than an error.
    ///
    /// # Errors
    /// Returns error on transport failure, non-2xx status, or a non-JSON body.
    fn fetch_symptoms(&self) -> Result<Vec<String>, BackendError>;

    /// Submit selected symptoms for prediction (`POST /predict`).
    ///
    /// # Errors
    /// Returns error on transport failure, non-2xx status, or an unreadable body.
    fn predict(&self, symptoms: &[String]) -> Result<PredictionResult, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(
            BackendError::from_status(400, "bad").kind(),
            FailureKind::Validation
        );
        assert_eq!(
            BackendError::from_status(422, "").kind(),
            FailureKind::Validation
        );
        assert_eq!(BackendError::from_status(500, "x").kind(), FailureKind::Server);
        assert_eq!(BackendError::from_status(503, "x").kind(), FailureKind::Server);
        assert_eq!(BackendError::Timeout.kind(), FailureKind::Connectivity);
    }

    #[test]
    fn test_user_message_includes_detail() {
        let err = BackendError::from_status(400, "Invalid request or model not ready");
        assert!(err.user_message().contains("model not ready"));

        let err = BackendError::Server { status: 502 };
        assert!(err.user_message().contains("502"));
    }
}
