//! Statement rendering.
//!
//! Lowers one [`Directive`] to the builder statements that apply it to the
//! in-progress request. Rendering is local: a directive's output depends only
//! on the directive and the bound input name.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::directive::Directive;
use crate::error::RenderError;

/// Line emitted in place of statements when a parameter directive has no input.
pub const INPUT_REQUIRED: &str = "Input Required!";

/// Receiver name the statements are written against by default.
pub const DEFAULT_RECEIVER: &str = "req";

/// How a missing input on a parameter directive is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingInput {
    /// Emit the [`INPUT_REQUIRED`] line.
    #[default]
    Sentinel,
    /// Return [`RenderError::InputRequired`].
    Error,
}

/// The statements produced for one directive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatementBlock {
    lines: Vec<String>,
}

impl StatementBlock {
    /// A block with no statements.
    pub const fn empty() -> Self {
        Self { lines: Vec::new() }
    }

    /// The single-line input-required block.
    pub fn sentinel() -> Self {
        Self {
            lines: vec![INPUT_REQUIRED.to_string()],
        }
    }

    fn of(lines: impl IntoIterator<Item = String>) -> Self {
        Self {
            lines: lines.into_iter().collect(),
        }
    }

    /// The statement lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consumes the block, returning its lines.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Returns `true` if the block has no statements.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns `true` if the block is the input-required marker.
    pub fn is_sentinel(&self) -> bool {
        matches!(self.lines.as_slice(), [line] if line == INPUT_REQUIRED)
    }
}

impl fmt::Display for StatementBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

impl IntoIterator for StatementBlock {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

/// Directive-to-statement renderer.
///
/// # Example
///
/// ```
/// use courier_core::{Directive, Renderer};
///
/// let query = Directive::Query { key: Some("page".into()) };
/// let block = Renderer::new().render(&query, Some("page_number")).unwrap();
/// assert_eq!(
///     block.lines(),
///     ["req.add_query(\"page\", page_number).verbatim_key();"]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderer {
    receiver: String,
    missing_input: MissingInput,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Creates a renderer writing against `req` and emitting the sentinel.
    pub fn new() -> Self {
        Self {
            receiver: DEFAULT_RECEIVER.to_string(),
            missing_input: MissingInput::Sentinel,
        }
    }

    /// Sets the request variable name.
    pub fn with_receiver(mut self, receiver: impl Into<String>) -> Self {
        self.receiver = receiver.into();
        self
    }

    /// Sets the missing input policy.
    pub fn with_missing_input(mut self, policy: MissingInput) -> Self {
        self.missing_input = policy;
        self
    }

    /// The request variable name.
    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    /// The missing input policy.
    pub const fn missing_input(&self) -> MissingInput {
        self.missing_input
    }

    /// Renders one directive.
    ///
    /// `input` is the name of the value bound to the annotated parameter. It is
    /// ignored by declaration-level directives.
    pub fn render(
        &self,
        directive: &Directive,
        input: Option<&str>,
    ) -> Result<StatementBlock, RenderError> {
        let req = &self.receiver;

        let block = match directive {
            Directive::HttpRoute { .. } => StatementBlock::empty(),
            Directive::Body => match input {
                Some(input) => StatementBlock::of([format!("{req}.set_body({input});")]),
                None => return self.input_required(directive),
            },
            Directive::Query { key } => match input {
                Some(input) => {
                    let flag = if key.is_some() { ".verbatim_key()" } else { "" };
                    StatementBlock::of([format!(
                        "{req}.add_query({}, {input}){flag};",
                        wire_key(key.as_deref(), input)
                    )])
                }
                None => return self.input_required(directive),
            },
            Directive::Header { key } => match input {
                Some(input) => {
                    // Inverse of Query/Field: only the parameter name gets header casing.
                    let flag = if key.is_none() { ".header_case()" } else { "" };
                    StatementBlock::of([format!(
                        "{req}.add_header({}, {input}){flag};",
                        wire_key(key.as_deref(), input)
                    )])
                }
                None => return self.input_required(directive),
            },
            Directive::Path { key } => match input {
                Some(input) => StatementBlock::of([format!(
                    "{req}.add_path_param({}, {input});",
                    wire_key(key.as_deref(), input)
                )]),
                None => return self.input_required(directive),
            },
            Directive::Field { key } => match input {
                Some(input) => {
                    let flag = if key.is_some() { ".verbatim_key()" } else { "" };
                    StatementBlock::of([format!(
                        "{req}.add_field({}, {input}){flag};",
                        wire_key(key.as_deref(), input)
                    )])
                }
                None => return self.input_required(directive),
            },
            Directive::Json { encoder, decoder } => StatementBlock::of([
                format!("{req}.request_encoder = RequestEncoder::json({encoder});"),
                format!("{req}.response_decoder = ResponseDecoder::json({decoder});"),
            ]),
            Directive::UrlForm { encoder } => StatementBlock::of([format!(
                "{req}.request_encoder = RequestEncoder::url_form({encoder});"
            )]),
            Directive::Multipart { encoder } => StatementBlock::of([format!(
                "{req}.request_encoder = RequestEncoder::multipart({encoder});"
            )]),
            Directive::Converter { encoder, decoder } => StatementBlock::of([
                format!("{req}.request_encoder = {encoder};"),
                format!("{req}.response_decoder = {decoder};"),
            ]),
            Directive::Headers { value } => {
                StatementBlock::of([format!("{req}.add_headers({value});")])
            }
            Directive::KeyMapping { value } => {
                StatementBlock::of([format!("{req}.key_mapping = {value};")])
            }
            Directive::Authorization { value } => {
                StatementBlock::of([format!("{req}.add_authorization({value});")])
            }
        };

        Ok(block)
    }

    fn input_required(&self, directive: &Directive) -> Result<StatementBlock, RenderError> {
        match self.missing_input {
            MissingInput::Sentinel => {
                tracing::debug!(directive = directive.kind(), "no input bound, emitting sentinel");
                Ok(StatementBlock::sentinel())
            }
            MissingInput::Error => Err(RenderError::InputRequired {
                directive: directive.kind(),
            }),
        }
    }
}

fn wire_key(key: Option<&str>, input: &str) -> String {
    format!("\"{}\"", key.unwrap_or(input))
}

/// Renders one directive with the default renderer.
///
/// A parameter directive without `input` renders as the single
/// [`INPUT_REQUIRED`] line.
pub fn render(directive: &Directive, input: Option<&str>) -> StatementBlock {
    Renderer::new()
        .render(directive, input)
        .unwrap_or_else(|_| StatementBlock::sentinel())
}
