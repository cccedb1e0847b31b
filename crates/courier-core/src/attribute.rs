//! Raw attribute occurrences.
//!
//! A [`RawAttribute`] is what the syntax layer hands to the classifier: the
//! attribute's name and the verbatim source text of each argument. Nothing in
//! here interprets the argument text.

use serde::{Deserialize, Serialize};

/// One attribute occurrence, split into name and argument texts.
///
/// Labeled arguments are kept in source order, duplicates included, so the
/// argument normalizer can apply its duplicate-label policy.
///
/// # Example
///
/// ```
/// use courier_core::RawAttribute;
///
/// let raw = RawAttribute::new("JSON").with_labeled("encoder", "MyEncoder::new()");
/// assert_eq!(raw.name(), "JSON");
/// assert!(raw.positional().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawAttribute {
    name: String,
    #[serde(default)]
    positional: Vec<String>,
    #[serde(default)]
    labeled: Vec<(String, String)>,
}

impl RawAttribute {
    /// Creates an attribute with no arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positional: Vec::new(),
            labeled: Vec::new(),
        }
    }

    /// Appends an unlabeled argument.
    pub fn with_positional(mut self, text: impl Into<String>) -> Self {
        self.positional.push(text.into());
        self
    }

    /// Appends a labeled argument.
    pub fn with_labeled(mut self, label: impl Into<String>, text: impl Into<String>) -> Self {
        self.labeled.push((label.into(), text.into()));
        self
    }

    /// Appends an unlabeled argument in place.
    pub fn push_positional(&mut self, text: impl Into<String>) {
        self.positional.push(text.into());
    }

    /// Appends a labeled argument in place.
    pub fn push_labeled(&mut self, label: impl Into<String>, text: impl Into<String>) {
        self.labeled.push((label.into(), text.into()));
    }

    /// The attribute name, exactly as written.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unlabeled argument texts in source order.
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// Labeled argument texts in source order.
    pub fn labeled(&self) -> &[(String, String)] {
        &self.labeled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_source_order() {
        let raw = RawAttribute::new("HTTP")
            .with_positional("\"/a\"")
            .with_positional("\"PURGE\"");
        assert_eq!(raw.positional(), ["\"/a\"", "\"PURGE\""]);
    }

    #[test]
    fn test_duplicate_labels_are_retained() {
        let mut raw = RawAttribute::new("JSON");
        raw.push_labeled("encoder", "A");
        raw.push_labeled("encoder", "B");
        assert_eq!(raw.labeled().len(), 2);
    }
}
