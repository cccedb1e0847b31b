//! # Courier
//!
//! **Attribute-driven HTTP clients for Rust traits**
//!
//! Declare an API as a trait of async methods, annotate it with HTTP
//! directives, and `#[api]` generates a client that builds each request.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use courier::api;
//!
//! #[api]
//! #[JSON]
//! pub trait GitHub {
//!     #[GET("/users/{user}/repos")]
//!     async fn repos(&self, user: String, #[Query("per_page")] per_page: u32)
//!         -> Result<Vec<Repo>, Error>;
//! }
//!
//! let client = GitHubClient::new(provider);
//! let repos = client.repos("rust-lang".into(), 100).await?;
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! attribute → RawAttribute → Classifier → Directive → Renderer → statements
//! ```
//!
//! The classifier and renderer live in [`core`]; [`codegen`] scans traits and
//! assembles the generated methods.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export the translation core
pub use courier_core as core;

// Re-export scanning and expansion
pub use courier_codegen as codegen;

// Re-export the attribute macro
pub use courier_macros::api;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use courier::prelude::*;
/// ```
pub mod prelude {
    pub use courier_core::{
        classify, render, Classifier, ClassifyError, Directive, RawAttribute, RenderError,
        Renderer, StatementBlock,
    };

    pub use courier_macros::api;
}
