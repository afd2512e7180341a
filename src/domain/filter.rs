//! Search term + category filter and the derived visible list.

use super::catalog::CategoryFilter;

/// Current filter inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_term: String,
    pub category: CategoryFilter,
}

impl FilterState {
    /// Symptoms from `catalog` that pass this filter, in catalog order.
    #[must_use]
    pub fn apply<'a>(&self, catalog: &'a [String]) -> Vec<&'a str> {
        visible_symptoms(catalog, &self.search_term, self.category)
    }
}

/// Filter `catalog` by search term and category.
///
/// The search is a case-insensitive substring match on the raw identifier.
/// Pure; the result is always a subsequence of `catalog`.
#[must_use]
pub fn visible_symptoms<'a>(
    catalog: &'a [String],
    search_term: &str,
    category: CategoryFilter,
) -> Vec<&'a str> {
    let needle = search_term.to_lowercase();
    catalog
        .iter()
        .map(String::as_str)
        .filter(|s| needle.is_empty() || s.to_lowercase().contains(&needle))
        .filter(|s| category.admits(s))
        .collect()
}
