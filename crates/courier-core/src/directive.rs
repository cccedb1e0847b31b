//! The typed directive set.
//!
//! Every recognized attribute maps to exactly one [`Directive`]. Payload
//! strings are opaque expression text; they are carried and re-emitted
//! verbatim, never evaluated.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default request encoder for `JSON`.
pub const DEFAULT_JSON_ENCODER: &str = "JsonEncoder::default()";

/// Default response decoder for `JSON`.
pub const DEFAULT_JSON_DECODER: &str = "JsonDecoder::default()";

/// Default request encoder for `URLForm`.
pub const DEFAULT_URL_FORM_ENCODER: &str = "UrlFormEncoder::default()";

/// Default request encoder for `Multipart`.
pub const DEFAULT_MULTIPART_ENCODER: &str = "MultipartEncoder::default()";

/// Where a directive may be attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveLevel {
    /// Only on a function (the route).
    Function,
    /// On the API declaration or on a function.
    Declaration,
    /// On a function parameter.
    Parameter,
}

/// A recognized attribute's meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Directive {
    /// HTTP method and path template.
    HttpRoute {
        /// Method token.
        method: String,
        /// Path expression, verbatim.
        path: String,
    },
    /// JSON request encoding and response decoding.
    Json {
        /// Encoder expression.
        encoder: String,
        /// Decoder expression.
        decoder: String,
    },
    /// URL-encoded form request body.
    UrlForm {
        /// Encoder expression.
        encoder: String,
    },
    /// Multipart request body.
    Multipart {
        /// Encoder expression.
        encoder: String,
    },
    /// Caller-supplied encoder and decoder, used as-is.
    Converter {
        /// Encoder expression.
        encoder: String,
        /// Decoder expression.
        decoder: String,
    },
    /// Key-mapping strategy for query/field names.
    KeyMapping {
        /// Strategy expression.
        value: String,
    },
    /// Fixed headers added to every request.
    Headers {
        /// Header collection expression.
        value: String,
    },
    /// Authorization added to every request.
    Authorization {
        /// Authorization expression.
        value: String,
    },
    /// The parameter is the request body.
    Body,
    /// The parameter is a body field.
    Field {
        /// Explicit wire key.
        key: Option<String>,
    },
    /// The parameter is a query item.
    Query {
        /// Explicit wire key.
        key: Option<String>,
    },
    /// The parameter is a header.
    Header {
        /// Explicit wire key.
        key: Option<String>,
    },
    /// The parameter fills a path placeholder.
    Path {
        /// Explicit placeholder name.
        key: Option<String>,
    },
}

impl Directive {
    /// Name of the variant, as used in diagnostics.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::HttpRoute { .. } => "HttpRoute",
            Self::Json { .. } => "JSON",
            Self::UrlForm { .. } => "URLForm",
            Self::Multipart { .. } => "Multipart",
            Self::Converter { .. } => "Converter",
            Self::KeyMapping { .. } => "KeyMapping",
            Self::Headers { .. } => "Headers",
            Self::Authorization { .. } => "Authorization",
            Self::Body => "Body",
            Self::Field { .. } => "Field",
            Self::Query { .. } => "Query",
            Self::Header { .. } => "Header",
            Self::Path { .. } => "Path",
        }
    }

    /// Where this directive may appear.
    pub const fn level(&self) -> DirectiveLevel {
        match self {
            Self::HttpRoute { .. } => DirectiveLevel::Function,
            Self::Json { .. }
            | Self::UrlForm { .. }
            | Self::Multipart { .. }
            | Self::Converter { .. }
            | Self::KeyMapping { .. }
            | Self::Headers { .. }
            | Self::Authorization { .. } => DirectiveLevel::Declaration,
            Self::Body
            | Self::Field { .. }
            | Self::Query { .. }
            | Self::Header { .. }
            | Self::Path { .. } => DirectiveLevel::Parameter,
        }
    }

    /// Returns `true` for parameter-level directives.
    pub const fn is_parameter(&self) -> bool {
        matches!(self.level(), DirectiveLevel::Parameter)
    }

    /// Returns `true` for the route directive.
    pub const fn is_route(&self) -> bool {
        matches!(self, Self::HttpRoute { .. })
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HttpRoute { method, path } => write!(f, "{method} {path}"),
            Self::Field { key: Some(key) }
            | Self::Query { key: Some(key) }
            | Self::Header { key: Some(key) }
            | Self::Path { key: Some(key) } => write!(f, "{}({key})", self.kind()),
            _ => f.write_str(self.kind()),
        }
    }
}
