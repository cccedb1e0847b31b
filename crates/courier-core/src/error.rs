//! Error types for classification and rendering.

use thiserror::Error;

/// Why an attribute did not produce a directive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// The attribute name is not in the directive table.
    #[error("`{name}` is not a courier attribute")]
    NotApplicable {
        /// The attribute name as written.
        name: String,
    },

    /// A recognized attribute is missing a required argument.
    #[error("`{attribute}` is missing its {argument} argument")]
    MissingArgument {
        /// The attribute name.
        attribute: String,
        /// The role of the missing argument (e.g. "path").
        argument: &'static str,
    },

    /// A labeled argument was given more than once.
    #[error("`{attribute}` has more than one `{label}` argument")]
    DuplicateLabel {
        /// The attribute name.
        attribute: String,
        /// The repeated label.
        label: String,
    },
}

impl ClassifyError {
    /// Create a new not-applicable error.
    pub fn not_applicable(name: impl Into<String>) -> Self {
        Self::NotApplicable { name: name.into() }
    }

    /// Create a new missing argument error.
    pub fn missing_argument(attribute: impl Into<String>, argument: &'static str) -> Self {
        Self::MissingArgument {
            attribute: attribute.into(),
            argument,
        }
    }

    /// Create a new duplicate label error.
    pub fn duplicate_label(attribute: impl Into<String>, label: impl Into<String>) -> Self {
        Self::DuplicateLabel {
            attribute: attribute.into(),
            label: label.into(),
        }
    }

    /// Returns `true` if the attribute simply belongs to someone else.
    pub const fn is_not_applicable(&self) -> bool {
        matches!(self, Self::NotApplicable { .. })
    }

    /// Returns `true` if the attribute is ours but malformed.
    pub const fn is_malformed(&self) -> bool {
        !self.is_not_applicable()
    }
}

/// Why a directive could not be rendered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A parameter directive was rendered without an input value.
    #[error("`{directive}` requires an input value")]
    InputRequired {
        /// The directive that needed the input.
        directive: &'static str,
    },
}
