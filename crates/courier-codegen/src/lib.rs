//! Declaration scanning and client expansion for Courier.
//!
//! This crate is the glue between Rust syntax and [`courier_core`]:
//!
//! - [`syntax`] turns `syn` attributes into [`courier_core::RawAttribute`]s
//! - [`scan`] walks an API trait and collects its directives per endpoint
//! - [`expand`] emits the cleaned trait plus a client implementation
//! - [`generate`] does the same for a whole source file
//!
//! # Example
//!
//! ```rust,ignore
//! use courier_codegen::{expand_api, CodegenOptions};
//!
//! let tokens = expand_api(attr, item, &CodegenOptions::default())?;
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod expand;
pub mod generate;
pub mod scan;
pub mod syntax;

pub use error::CodegenError;
pub use expand::{expand_api, expand_trait, ApiArgs, CodegenOptions};
pub use generate::{generate_file, inspect_file};
pub use scan::{ApiDefinition, ApiScanner, Endpoint, Parameter, Route};
pub use syntax::{
    attribute_name, is_directive_attribute, raw_attribute, strip_directive_attributes,
};
