//! Argument normalization shared by every directive form.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ClassifyError;
use crate::RawAttribute;

/// How repeated labels on one attribute are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateLabels {
    /// The last occurrence of a label replaces earlier ones.
    #[default]
    LastWins,
    /// A repeated label is a classification error.
    Reject,
}

/// Normalized view over a [`RawAttribute`]'s arguments.
#[derive(Debug)]
pub struct Arguments<'a> {
    attribute: &'a str,
    positional: &'a [String],
    labeled: HashMap<&'a str, &'a str>,
}

impl<'a> Arguments<'a> {
    /// Collapses the labeled arguments into a map according to `policy`.
    pub fn resolve(raw: &'a RawAttribute, policy: DuplicateLabels) -> Result<Self, ClassifyError> {
        let mut labeled = HashMap::with_capacity(raw.labeled().len());
        for (label, text) in raw.labeled() {
            let previous = labeled.insert(label.as_str(), text.as_str());
            if previous.is_some() && policy == DuplicateLabels::Reject {
                return Err(ClassifyError::duplicate_label(raw.name(), label));
            }
        }

        Ok(Self {
            attribute: raw.name(),
            positional: raw.positional(),
            labeled,
        })
    }

    /// First unlabeled argument.
    pub fn first(&self) -> Option<&'a str> {
        self.positional.first().map(String::as_str)
    }

    /// Second unlabeled argument.
    pub fn second(&self) -> Option<&'a str> {
        self.positional.get(1).map(String::as_str)
    }

    /// Labeled argument text, if present.
    pub fn labeled(&self, label: &str) -> Option<&'a str> {
        self.labeled.get(label).copied()
    }

    /// Labeled argument text, falling back to `default`.
    pub fn labeled_or(&self, label: &str, default: &str) -> String {
        self.labeled(label).unwrap_or(default).to_string()
    }

    /// First unlabeled argument, falling back to `default`.
    pub fn first_or(&self, default: &str) -> String {
        self.first().unwrap_or(default).to_string()
    }

    /// First unlabeled argument, or a missing-argument error naming `role`.
    pub fn require_first(&self, role: &'static str) -> Result<&'a str, ClassifyError> {
        self.first()
            .ok_or_else(|| ClassifyError::missing_argument(self.attribute, role))
    }

    /// Second unlabeled argument, or a missing-argument error naming `role`.
    pub fn require_second(&self, role: &'static str) -> Result<&'a str, ClassifyError> {
        self.second()
            .ok_or_else(|| ClassifyError::missing_argument(self.attribute, role))
    }
}

/// Strips one layer of surrounding double quotes.
///
/// Text that is not a quoted literal is returned unchanged. Escapes inside the
/// literal are left as written.
///
/// ```
/// use courier_core::unquote;
///
/// assert_eq!(unquote("\"page\""), "page");
/// assert_eq!(unquote("\"\"nested\"\""), "\"nested\"");
/// assert_eq!(unquote("PAGE_KEY"), "PAGE_KEY");
/// ```
pub fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unquote_single_layer() {
        assert_eq!(unquote("\"x\""), "x");
        assert_eq!(unquote("\"\""), "");
        assert_eq!(unquote("\"\"x\"\""), "\"x\"");
    }

    #[test]
    fn test_unquote_leaves_unquoted_text() {
        assert_eq!(unquote("key"), "key");
        assert_eq!(unquote("\"open"), "\"open");
        assert_eq!(unquote("close\""), "close\"");
        assert_eq!(unquote("\""), "\"");
        assert_eq!(unquote(""), "");
    }

    #[test]
    fn test_first_and_second() {
        let raw = RawAttribute::new("HTTP").with_positional("a").with_positional("b");
        let args = Arguments::resolve(&raw, DuplicateLabels::LastWins).unwrap();
        assert_eq!(args.first(), Some("a"));
        assert_eq!(args.second(), Some("b"));
    }

    #[test]
    fn test_labeled_last_wins() {
        let raw = RawAttribute::new("JSON")
            .with_labeled("encoder", "A")
            .with_labeled("encoder", "B");
        let args = Arguments::resolve(&raw, DuplicateLabels::LastWins).unwrap();
        assert_eq!(args.labeled("encoder"), Some("B"));
    }

    #[test]
    fn test_labeled_reject() {
        let raw = RawAttribute::new("JSON")
            .with_labeled("encoder", "A")
            .with_labeled("encoder", "B");
        let err = Arguments::resolve(&raw, DuplicateLabels::Reject).unwrap_err();
        assert_eq!(err, ClassifyError::duplicate_label("JSON", "encoder"));
    }

    #[test]
    fn test_defaults() {
        let raw = RawAttribute::new("URLForm");
        let args = Arguments::resolve(&raw, DuplicateLabels::LastWins).unwrap();
        assert_eq!(args.first_or("Fallback"), "Fallback");
        assert_eq!(args.labeled_or("decoder", "Other"), "Other");
        assert!(args.require_first("encoder").is_err());
    }

    proptest! {
        #[test]
        fn unquote_inverts_quoting(s in "[^\"]*") {
            let quoted = format!("\"{s}\"");
            prop_assert_eq!(unquote(&quoted), s.as_str());
        }

        #[test]
        fn unquote_never_grows(s in ".*") {
            prop_assert!(unquote(&s).len() <= s.len());
        }
    }
}
