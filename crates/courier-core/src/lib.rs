//! Translation core of the Courier API client generator.
//!
//! Two pure stages turn annotations on an API declaration into request
//! builder statements:
//!
//! 1. **Classification**: a [`RawAttribute`] (name plus verbatim argument
//!    text) becomes a typed [`Directive`], or nothing if the attribute is not
//!    a Courier directive.
//! 2. **Rendering**: a [`Directive`], plus the bound parameter name for
//!    parameter-level directives, becomes a [`StatementBlock`] of source lines.
//!
//! # Example
//!
//! ```
//! use courier_core::{classify, render, RawAttribute};
//!
//! let raw = RawAttribute::new("Header").with_positional("\"X-Trace\"");
//! let directive = classify(&raw).unwrap();
//!
//! let block = render(&directive, Some("trace_id"));
//! assert_eq!(block.lines(), ["req.add_header(\"X-Trace\", trace_id);"]);
//! ```
//!
//! Argument text is never evaluated: encoder, header and authorization
//! expressions are carried through and re-emitted exactly as written.

#![warn(missing_docs)]

mod args;
mod attribute;
mod classify;
mod directive;
mod error;
mod render;

pub use args::{unquote, Arguments, DuplicateLabels};
pub use attribute::RawAttribute;
pub use classify::{
    attribute_form, classify, is_directive_name, AttributeForm, Classifier, MalformedAttributes,
    ATTRIBUTE_TABLE,
};
pub use directive::{
    Directive, DirectiveLevel, DEFAULT_JSON_DECODER, DEFAULT_JSON_ENCODER,
    DEFAULT_MULTIPART_ENCODER, DEFAULT_URL_FORM_ENCODER,
};
pub use error::{ClassifyError, RenderError};
pub use render::{render, MissingInput, Renderer, StatementBlock, DEFAULT_RECEIVER, INPUT_REQUIRED};
