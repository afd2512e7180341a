//! Symptom catalog and the fixed category map.
//!
//! The catalog itself is whatever the backend reports; the categories are a
//! compiled-in grouping over a subset of it. Anything the categories do not
//! mention falls into the synthetic "Others" bucket.

use std::fmt;
use std::str::FromStr;

/// Fixed grouping of symptom identifiers, in display order.
pub const CATEGORY_MAP: &[(&str, &[&str])] = &[
    (
        "General",
        &[
            "fatigue",
            "fever",
            "lethargy",
            "weight_loss",
            "high_fever",
            "chills",
            "malaise",
            "phlegm",
            "sweating",
            "mild_fever",
        ],
    ),
    (
        "Skin",
        &[
            "itching",
            "skin_rash",
            "nodal_skin_eruptions",
            "pustule",
            "blackheads",
            "scurring",
            "yellowish_skin",
            "bruising",
            "peeling_skin",
        ],
    ),
    (
        "Digestive",
        &[
            "vomiting",
            "indigestion",
            "nausea",
            "abdominal_pain",
            "constipation",
            "diarrhoea",
            "stomach_pain",
            "acidity",
            "burning_micturition",
            "distention_of_abdomen",
        ],
    ),
    (
        "Neurological",
        &[
            "headache",
            "dizziness",
            "altered_sensorium",
            "unsteadiness",
            "lack_of_concentration",
            "visual_disturbances",
            "balance_errors",
        ],
    ),
    (
        "Respiratory",
        &[
            "continuous_sneezing",
            "cough",
            "breathlessness",
            "mucoid_sputum",
            "chest_pain",
        ],
    ),
    (
        "Muscle/Joint",
        &[
            "joint_pain",
            "muscle_wasting",
            "muscle_weakness",
            "back_pain",
            "neck_pain",
            "stiff_neck",
            "knee_pain",
            "swelling_joints",
        ],
    ),
];

/// Label of the unrestricted tab.
pub const ALL_LABEL: &str = "All";

/// Label of the complement bucket.
pub const OTHERS_LABEL: &str = "Others";

/// Returned when a category name is not in the tab list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown symptom category: {0}")]
pub struct UnknownCategory(pub String);

/// Active category restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No restriction
    #[default]
    All,
    /// Index into [`CATEGORY_MAP`]
    Named(usize),
    /// Symptoms not listed in any named category
    Others,
}

impl CategoryFilter {
    /// All tabs in display order: All, each named category, Others.
    #[must_use]
    pub fn tabs() -> Vec<CategoryFilter> {
        std::iter::once(Self::All)
            .chain((0..CATEGORY_MAP.len()).map(Self::Named))
            .chain(std::iter::once(Self::Others))
            .collect()
    }

    /// Display name of the tab.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::All => ALL_LABEL,
            Self::Named(idx) => CATEGORY_MAP.get(*idx).map_or(OTHERS_LABEL, |(name, _)| *name),
            Self::Others => OTHERS_LABEL,
        }
    }

    /// Position of this filter in [`CategoryFilter::tabs`].
    #[must_use]
    pub fn tab_index(&self) -> usize {
        match self {
            Self::All => 0,
            Self::Named(idx) => idx + 1,
            Self::Others => CATEGORY_MAP.len() + 1,
        }
    }

    /// Next tab, wrapping around.
    #[must_use]
    pub fn next(&self) -> Self {
        let tabs = Self::tabs();
        tabs[(self.tab_index() + 1) % tabs.len()]
    }

    /// Previous tab, wrapping around.
    #[must_use]
    pub fn prev(&self) -> Self {
        let tabs = Self::tabs();
        tabs[(self.tab_index() + tabs.len() - 1) % tabs.len()]
    }

    /// Category membership test for a single identifier.
    #[must_use]
    pub fn admits(&self, symptom: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(idx) => CATEGORY_MAP
                .get(*idx)
                .is_some_and(|(_, members)| members.iter().any(|m| *m == symptom)),
            Self::Others => !is_categorized(symptom),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            ALL_LABEL => Ok(Self::All),
            OTHERS_LABEL => Ok(Self::Others),
            _ => CATEGORY_MAP
                .iter()
                .position(|(category, _)| *category == name)
                .map(Self::Named)
                .ok_or_else(|| UnknownCategory(name.to_string())),
        }
    }
}

/// Whether any named category lists this identifier.
#[must_use]
pub fn is_categorized(symptom: &str) -> bool {
    CATEGORY_MAP
        .iter()
        .any(|(_, members)| members.iter().any(|m| *m == symptom))
}

/// Catalog entries that no named category claims, in catalog order.
#[must_use]
pub fn others<'a>(catalog: &'a [String]) -> Vec<&'a str> {
    catalog
        .iter()
        .map(String::as_str)
        .filter(|s| !is_categorized(s))
        .collect()
}

/// Human-readable label: underscores become spaces, each word capitalized.
///
/// Runs of separators collapse to one space.
#[must_use]
pub fn display_label(symptom: &str) -> String {
    symptom
        .replace('_', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
