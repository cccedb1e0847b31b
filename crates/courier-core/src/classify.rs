//! Attribute classification.
//!
//! Maps a [`RawAttribute`] to a [`Directive`] by exact, case-sensitive lookup
//! in [`ATTRIBUTE_TABLE`], then resolves the form's arguments.
//!
//! # Failure channels
//!
//! [`classify`] merges "not ours" and "ours but malformed" into `None`.
//! [`Classifier::classify`] keeps them apart as [`ClassifyError`] variants, and
//! [`Classifier::accept`] applies a [`MalformedAttributes`] policy on top.

use serde::{Deserialize, Serialize};

use crate::args::{unquote, Arguments, DuplicateLabels};
use crate::directive::{
    Directive, DEFAULT_JSON_DECODER, DEFAULT_JSON_ENCODER, DEFAULT_MULTIPART_ENCODER,
    DEFAULT_URL_FORM_ENCODER,
};
use crate::error::ClassifyError;
use crate::RawAttribute;

/// Argument shape of a recognized attribute name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeForm {
    /// `VERB(path)`; the method is the attribute name.
    Route,
    /// `HTTP(path, method)`.
    CustomRoute,
    /// `Body`.
    Body,
    /// `Field(key?)`.
    Field,
    /// `Query(key?)`.
    Query,
    /// `Header(key?)`.
    Header,
    /// `Path(key?)`.
    Path,
    /// `Headers(value)`.
    Headers,
    /// `JSON(encoder: .., decoder: ..)`, both optional.
    Json,
    /// `URLForm(encoder?)`.
    UrlForm,
    /// `Multipart(encoder?)`.
    Multipart,
    /// `Converter(encoder, decoder)`.
    Converter,
    /// `KeyMapping(value)`.
    KeyMapping,
    /// `Authorization(value)`.
    Authorization,
}

/// Every attribute name the classifier owns.
pub static ATTRIBUTE_TABLE: &[(&str, AttributeForm)] = &[
    ("GET", AttributeForm::Route),
    ("DELETE", AttributeForm::Route),
    ("PATCH", AttributeForm::Route),
    ("POST", AttributeForm::Route),
    ("PUT", AttributeForm::Route),
    ("OPTIONS", AttributeForm::Route),
    ("HEAD", AttributeForm::Route),
    ("TRACE", AttributeForm::Route),
    ("CONNECT", AttributeForm::Route),
    ("HTTP", AttributeForm::CustomRoute),
    ("Body", AttributeForm::Body),
    ("Field", AttributeForm::Field),
    ("Query", AttributeForm::Query),
    ("Header", AttributeForm::Header),
    ("Path", AttributeForm::Path),
    ("Headers", AttributeForm::Headers),
    ("JSON", AttributeForm::Json),
    ("URLForm", AttributeForm::UrlForm),
    ("Multipart", AttributeForm::Multipart),
    ("Converter", AttributeForm::Converter),
    ("KeyMapping", AttributeForm::KeyMapping),
    ("Authorization", AttributeForm::Authorization),
];

/// Looks up the form registered for `name`.
pub fn attribute_form(name: &str) -> Option<AttributeForm> {
    ATTRIBUTE_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, form)| *form)
}

/// Returns `true` if `name` is a directive attribute.
pub fn is_directive_name(name: &str) -> bool {
    attribute_form(name).is_some()
}

/// What to do with a recognized attribute that is missing arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedAttributes {
    /// Drop it, same as an attribute that is not ours.
    #[default]
    Skip,
    /// Report it as an error.
    Reject,
}

/// Configurable attribute classifier.
///
/// # Example
///
/// ```
/// use courier_core::{Classifier, Directive, RawAttribute};
///
/// let raw = RawAttribute::new("GET").with_positional("\"/users\"");
/// let directive = Classifier::new().classify(&raw).unwrap();
/// assert_eq!(
///     directive,
///     Directive::HttpRoute { method: "GET".into(), path: "\"/users\"".into() }
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classifier {
    duplicate_labels: DuplicateLabels,
    malformed: MalformedAttributes,
}

impl Classifier {
    /// Creates a classifier with last-wins labels and skipped malformed attributes.
    pub const fn new() -> Self {
        Self {
            duplicate_labels: DuplicateLabels::LastWins,
            malformed: MalformedAttributes::Skip,
        }
    }

    /// Sets the duplicate label policy.
    pub const fn with_duplicate_labels(mut self, policy: DuplicateLabels) -> Self {
        self.duplicate_labels = policy;
        self
    }

    /// Sets the malformed attribute policy used by [`Classifier::accept`].
    pub const fn with_malformed(mut self, policy: MalformedAttributes) -> Self {
        self.malformed = policy;
        self
    }

    /// The duplicate label policy.
    pub const fn duplicate_labels(&self) -> DuplicateLabels {
        self.duplicate_labels
    }

    /// The malformed attribute policy.
    pub const fn malformed(&self) -> MalformedAttributes {
        self.malformed
    }

    /// Classifies one attribute, keeping the failure reason.
    pub fn classify(&self, raw: &RawAttribute) -> Result<Directive, ClassifyError> {
        let name = raw.name();
        let form = attribute_form(name).ok_or_else(|| ClassifyError::not_applicable(name))?;
        let args = Arguments::resolve(raw, self.duplicate_labels)?;

        let directive = match form {
            AttributeForm::Route => Directive::HttpRoute {
                method: name.to_string(),
                path: args.require_first("path")?.to_string(),
            },
            AttributeForm::CustomRoute => {
                let path = args.require_first("path")?;
                let method = args.require_second("method")?;
                Directive::HttpRoute {
                    method: unquote(method).to_string(),
                    path: path.to_string(),
                }
            }
            AttributeForm::Body => Directive::Body,
            AttributeForm::Field => Directive::Field { key: optional_key(&args) },
            AttributeForm::Query => Directive::Query { key: optional_key(&args) },
            AttributeForm::Header => Directive::Header { key: optional_key(&args) },
            AttributeForm::Path => Directive::Path { key: optional_key(&args) },
            AttributeForm::Headers => Directive::Headers {
                value: args.require_first("headers")?.to_string(),
            },
            AttributeForm::Json => Directive::Json {
                encoder: args.labeled_or("encoder", DEFAULT_JSON_ENCODER),
                decoder: args.labeled_or("decoder", DEFAULT_JSON_DECODER),
            },
            AttributeForm::UrlForm => Directive::UrlForm {
                encoder: args.first_or(DEFAULT_URL_FORM_ENCODER),
            },
            AttributeForm::Multipart => Directive::Multipart {
                encoder: args.first_or(DEFAULT_MULTIPART_ENCODER),
            },
            AttributeForm::Converter => {
                let encoder = args.require_first("encoder")?;
                let decoder = args.require_second("decoder")?;
                Directive::Converter {
                    encoder: encoder.to_string(),
                    decoder: decoder.to_string(),
                }
            }
            AttributeForm::KeyMapping => Directive::KeyMapping {
                value: args.require_first("key mapping")?.to_string(),
            },
            AttributeForm::Authorization => Directive::Authorization {
                value: args.require_first("authorization")?.to_string(),
            },
        };

        Ok(directive)
    }

    /// Classifies one attribute and applies the malformed policy.
    ///
    /// Returns `Ok(None)` for attributes that are not ours, and for ones
    /// missing an argument when the policy is [`MalformedAttributes::Skip`].
    /// A repeated label only fails under [`DuplicateLabels::Reject`] and is
    /// always reported.
    pub fn accept(&self, raw: &RawAttribute) -> Result<Option<Directive>, ClassifyError> {
        match self.classify(raw) {
            Ok(directive) => Ok(Some(directive)),
            Err(err) if err.is_not_applicable() => Ok(None),
            Err(err @ ClassifyError::DuplicateLabel { .. }) => Err(err),
            Err(err) => match self.malformed {
                MalformedAttributes::Skip => Ok(None),
                MalformedAttributes::Reject => Err(err),
            },
        }
    }
}

fn optional_key(args: &Arguments<'_>) -> Option<String> {
    args.first().map(|key| unquote(key).to_string())
}

/// Classifies one attribute with the default classifier.
///
/// Returns `None` both for attributes that are not directives and for
/// directives missing a required argument.
pub fn classify(raw: &RawAttribute) -> Option<Directive> {
    Classifier::new().classify(raw).ok()
}
