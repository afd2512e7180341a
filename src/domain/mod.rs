//! Domain layer: Core types and pure derivations.
//!
//! Nothing here touches the network or the terminal. The catalog, the
//! selection, the filter and the prediction payload are plain values; the
//! visible symptom list is recomputed from them on demand.

mod catalog;
mod filter;
mod prediction;
mod selection;

pub use catalog::{display_label, others, CategoryFilter, UnknownCategory, CATEGORY_MAP};
pub use filter::{visible_symptoms, FilterState};
pub use prediction::{Prediction, PredictionResult};
pub use selection::SelectionSet;
