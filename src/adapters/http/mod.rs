//! HTTP adapter: Blocking client for the remote diagnostic service.
//!
//! Wraps a `ureq::Agent` configured with a per-request timeout. Every failure
//! is mapped onto [`BackendError`] so callers can tell an unreachable service
//! from one that refused or broke on the request.

use std::time::Duration;

use serde::Serialize;

use crate::adapters::sanitize::redact_url;
use crate::domain::PredictionResult;
use crate::ports::{BackendError, DiagnosticsBackend};

/// Longest server error body echoed back to the user.
const MAX_DETAIL_CHARS: usize = 200;

#[derive(Serialize)]
struct PredictRequest<'a> {
    symptoms: &'a [String],
}

/// `DiagnosticsBackend` over HTTP.
pub struct HttpBackend {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpBackend {
    /// Create a client for `base_url` (scheme + host, optional path prefix).
    #[must_use]
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        tracing::info!(
            "Diagnostic backend at {} (timeout {} ms)",
            redact_url(&base_url),
            timeout.as_millis()
        );

        Self { agent, base_url }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl DiagnosticsBackend for HttpBackend {
    fn fetch_symptoms(&self) -> Result<Vec<String>, BackendError> {
        let url = self.endpoint("symptoms");
        tracing::debug!("GET {}", redact_url(&url));

        let response = self.agent.get(&url).call().map_err(map_ureq_error)?;
        let body = response.into_string().map_err(map_io_error)?;
        parse_symptoms(&body)
    }

    fn predict(&self, symptoms: &[String]) -> Result<PredictionResult, BackendError> {
        let url = self.endpoint("predict");
        tracing::debug!("POST {} ({} symptoms)", redact_url(&url), symptoms.len());

        let response = self
            .agent
            .post(&url)
            .send_json(PredictRequest { symptoms })
            .map_err(map_ureq_error)?;
        let body = response.into_string().map_err(map_io_error)?;

        serde_json::from_str(&body).map_err(|e| BackendError::Malformed(e.to_string()))
    }
}

/// Parse a `/symptoms` body.
///
/// The body must be JSON; a missing or non-string-list `symptoms` field
/// degrades to an empty vocabulary.
fn parse_symptoms(body: &str) -> Result<Vec<String>, BackendError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| BackendError::Malformed(e.to_string()))?;

    match value.get("symptoms") {
        Some(field) => match serde_json::from_value::<Vec<String>>(field.clone()) {
            Ok(symptoms) => Ok(symptoms),
            Err(e) => {
                tracing::warn!("Ignoring malformed symptoms field: {}", e);
                Ok(Vec::new())
            }
        },
        None => {
            tracing::warn!("Symptom response has no symptoms field");
            Ok(Vec::new())
        }
    }
}

/// Pull a human-readable reason out of an error body.
///
/// Understands `{"detail": "..."}`; anything else is passed through trimmed.
fn extract_detail(body: &str) -> String {
    let detail = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => match map.get("detail") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => body.trim().to_string(),
        },
        _ => body.trim().to_string(),
    };
    detail.chars().take(MAX_DETAIL_CHARS).collect()
}

fn map_ureq_error(err: ureq::Error) -> BackendError {
    match err {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            BackendError::from_status(status, extract_detail(&body))
        }
        ureq::Error::Transport(transport) => {
            if is_timeout(&transport) {
                BackendError::Timeout
            } else {
                BackendError::Connectivity(transport.to_string())
            }
        }
    }
}

fn map_io_error(err: std::io::Error) -> BackendError {
    if is_timeout_kind(err.kind()) {
        BackendError::Timeout
    } else {
        BackendError::Connectivity(err.to_string())
    }
}

fn is_timeout(transport: &ureq::Transport) -> bool {
    let mut source = std::error::Error::source(transport);
    while let Some(err) = source {
        if let Some(io) = err.downcast_ref::<std::io::Error>() {
            if is_timeout_kind(io.kind()) {
                return true;
            }
        }
        source = err.source();
    }
    false
}

fn is_timeout_kind(kind: std::io::ErrorKind) -> bool {
    matches!(
        kind,
        std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::FailureKind;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{mpsc, Arc, Mutex};

    /// Serve `router` on an ephemeral port from a background runtime.
    fn spawn_server(router: Router) -> String {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Should build runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("Should bind");
                tx.send(listener.local_addr().expect("Should have address"))
                    .expect("Should report address");
                axum::serve(listener, router).await.expect("Should serve");
            });
        });
        let addr = rx.recv().expect("Server should start");
        format!("http://{addr}")
    }

    fn client(base: &str) -> HttpBackend {
        HttpBackend::new(base, Duration::from_secs(5))
    }

    fn flu() -> Value {
        json!({
            "disease": "Flu",
            "description": "Viral infection of the airways",
            "medications": ["Oseltamivir"],
            "precautions": ["Rest", "Hydrate"],
            "diets": ["Broth"],
            "workout": "Avoid strenuous exercise"
        })
    }

    #[test]
    fn test_fetch_symptoms() {
        let router = Router::new().route(
            "/symptoms",
            get(|| async { Json(json!({"symptoms": ["fever", "itching", "headache"]})) }),
        );
        let base = spawn_server(router);

        let symptoms = client(&base).fetch_symptoms().expect("Should fetch");
        assert_eq!(symptoms, vec!["fever", "itching", "headache"]);
    }

    #[test]
    fn test_fetch_symptoms_missing_field_is_empty() {
        let router = Router::new().route("/symptoms", get(|| async { Json(json!({})) }));
        let base = spawn_server(router);

        let symptoms = client(&base).fetch_symptoms().expect("Should fetch");
        assert!(symptoms.is_empty());
    }

    #[test]
    fn test_fetch_symptoms_server_error() {
        let router = Router::new().route(
            "/symptoms",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = spawn_server(router);

        let err = client(&base).fetch_symptoms().expect_err("Should fail");
        assert_eq!(err, BackendError::Server { status: 500 });
    }

    #[test]
    fn test_predict_sends_selection_in_order() {
        let captured: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
        let sink = captured.clone();
        let router = Router::new().route(
            "/predict",
            post(move |Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    *sink.lock().expect("lock") = Some(body);
                    Json(flu())
                }
            }),
        );
        let base = spawn_server(router);

        let selection = vec!["fever".to_string(), "headache".to_string()];
        let result = client(&base).predict(&selection).expect("Should predict");

        assert_eq!(result.disease, "Flu");
        assert_eq!(result.precautions, vec!["Rest", "Hydrate"]);
        assert_eq!(
            captured.lock().expect("lock").clone(),
            Some(json!({"symptoms": ["fever", "headache"]}))
        );
    }

    #[test]
    fn test_predict_rejection_carries_detail() {
        let router = Router::new().route(
            "/predict",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"detail": "Invalid request or model not ready"})),
                )
            }),
        );
        let base = spawn_server(router);

        let err = client(&base)
            .predict(&["fever".to_string()])
            .expect_err("Should fail");
        assert_eq!(
            err,
            BackendError::Rejected {
                status: 400,
                detail: "Invalid request or model not ready".to_string()
            }
        );
    }

    #[test]
    fn test_predict_server_error() {
        let router = Router::new().route(
            "/predict",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model crashed") }),
        );
        let base = spawn_server(router);

        let err = client(&base)
            .predict(&["fever".to_string()])
            .expect_err("Should fail");
        assert_eq!(err, BackendError::Server { status: 500 });
        assert_eq!(err.kind(), FailureKind::Server);
    }

    #[test]
    fn test_predict_unreadable_body() {
        let router = Router::new().route("/predict", post(|| async { "not json" }));
        let base = spawn_server(router);

        let err = client(&base)
            .predict(&["fever".to_string()])
            .expect_err("Should fail");
        assert_eq!(err.kind(), FailureKind::Protocol);
    }

    #[test]
    fn test_slow_backend_is_a_connectivity_failure() {
        let router = Router::new().route(
            "/symptoms",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(1500)).await;
                Json(json!({"symptoms": []}))
            }),
        );
        let base = spawn_server(router);

        let backend = HttpBackend::new(&base, Duration::from_millis(200));
        let err = backend.fetch_symptoms().expect_err("Should time out");
        assert_eq!(err.kind(), FailureKind::Connectivity);
    }

    #[test]
    fn test_unreachable_backend() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Should bind");
        let addr = listener.local_addr().expect("Should have address");
        drop(listener);

        let err = client(&format!("http://{addr}"))
            .fetch_symptoms()
            .expect_err("Should fail");
        assert_eq!(err.kind(), FailureKind::Connectivity);
    }

    #[test]
    fn test_parse_symptoms_shapes() {
        assert_eq!(
            parse_symptoms(r#"{"symptoms": ["a", "b"]}"#),
            Ok(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(parse_symptoms(r#"{"symptoms": 5}"#), Ok(Vec::new()));
        assert_eq!(parse_symptoms(r#"{"symptoms": ["a", 1]}"#), Ok(Vec::new()));
        assert!(matches!(
            parse_symptoms("<html>"),
            Err(BackendError::Malformed(_))
        ));
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let backend = HttpBackend::new("http://localhost:8000/api/", Duration::from_secs(1));
        assert_eq!(backend.endpoint("symptoms"), "http://localhost:8000/api/symptoms");
        assert_eq!(backend.endpoint("/predict"), "http://localhost:8000/api/predict");
    }

    #[test]
    fn test_extract_detail() {
        assert_eq!(extract_detail(r#"{"detail": "nope"}"#), "nope");
        assert_eq!(extract_detail("  plain text \n"), "plain text");
        assert_eq!(extract_detail(&"x".repeat(500)).len(), MAX_DETAIL_CHARS);
    }
}
