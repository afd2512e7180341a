//! User-chosen symptom subset.

/// Set of selected symptom identifiers.
///
/// Membership is set-like; insertion order is kept so the request body and
/// the on-screen summary list symptoms in the order the user picked them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    items: Vec<String>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `symptom` if absent, remove it if present.
    ///
    /// Returns `true` when the symptom is selected afterwards.
    pub fn toggle(&mut self, symptom: &str) -> bool {
        if let Some(pos) = self.items.iter().position(|s| s == symptom) {
            self.items.remove(pos);
            false
        } else {
            self.items.push(symptom.to_string());
            true
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn contains(&self, symptom: &str) -> bool {
        self.items.iter().any(|s| s == symptom)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Selected identifiers in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    /// Owned copy for a request body.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.items.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut sel = SelectionSet::new();
        assert!(sel.toggle("fever"));
        assert!(sel.contains("fever"));
        assert!(!sel.toggle("fever"));
        assert!(sel.is_empty());
    }

    #[test]
    fn test_double_toggle_restores_prior_state() {
        let mut sel = SelectionSet::new();
        sel.toggle("fever");
        sel.toggle("headache");
        let before = sel.clone();

        for s in ["fever", "cough", "headache"] {
            sel.toggle(s);
            sel.toggle(s);
            assert_eq!(sel.len(), before.len());
            for item in before.as_slice() {
                assert!(sel.contains(item));
            }
        }
    }

    #[test]
    fn test_preserves_insertion_order() {
        let mut sel = SelectionSet::new();
        sel.toggle("headache");
        sel.toggle("fever");
        sel.toggle("cough");
        sel.toggle("fever");
        assert_eq!(sel.as_slice(), &["headache".to_string(), "cough".to_string()]);
    }

    #[test]
    fn test_clear_always_empties() {
        let mut sel = SelectionSet::new();
        sel.clear();
        assert!(sel.is_empty());

        sel.toggle("fever");
        sel.toggle("itching");
        sel.clear();
        assert!(sel.is_empty());
        assert_eq!(sel.len(), 0);
    }
}
