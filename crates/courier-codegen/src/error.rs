//! Error types for file-level generation.

use thiserror::Error;

/// Errors raised while generating clients from a source file.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// The source did not parse, or an API trait was rejected.
    #[error("{line}:{column}: {message}")]
    Syntax {
        /// 1-based line of the offending tokens.
        line: usize,
        /// 0-based column of the offending tokens.
        column: usize,
        /// Diagnostic message.
        message: String,
    },
}

impl From<syn::Error> for CodegenError {
    fn from(err: syn::Error) -> Self {
        let start = err.span().start();
        Self::Syntax {
            line: start.line,
            column: start.column,
            message: err.to_string(),
        }
    }
}
