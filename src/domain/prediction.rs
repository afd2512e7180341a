//! Prediction payload returned by the diagnostic service.

use serde::{Deserialize, Serialize};

/// Structured diagnosis from `POST /predict`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted disease name
    pub disease: String,

    /// Free-text description of the disease
    #[serde(default)]
    pub description: String,

    /// Suggested medications
    #[serde(default)]
    pub medications: Vec<String>,

    /// Safety precautions
    #[serde(default)]
    pub precautions: Vec<String>,

    /// Dietary recommendations
    #[serde(default)]
    pub diets: Vec<String>,

    /// Recovery / exercise plan
    #[serde(default)]
    pub workout: String,
}

/// A stored prediction together with what produced it.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Backend response
    pub result: PredictionResult,

    /// Symptoms that were submitted, in submission order
    pub symptoms: Vec<String>,

    /// When the response was received
    pub received_at: chrono::DateTime<chrono::Utc>,
}

impl Prediction {
    #[must_use]
    pub fn new(result: PredictionResult, symptoms: Vec<String>) -> Self {
        Self {
            result,
            symptoms,
            received_at: chrono::Utc::now(),
        }
    }
}
