//! The `#[api]` attribute macro for Courier.
//!
//! Annotate a trait of async methods with HTTP directives and `#[api]`
//! generates a client struct implementing it on top of any `Provider`.
//!
//! # Example
//!
//! ```rust,ignore
//! use courier::api;
//!
//! #[api]
//! #[JSON]
//! pub trait Users {
//!     #[GET("/users/{id}")]
//!     async fn user(&self, id: u64) -> Result<User, Error>;
//!
//!     #[POST("/users")]
//!     #[Authorization(token())]
//!     async fn create(&self, #[Body] user: NewUser) -> Result<User, Error>;
//! }
//!
//! let client = UsersClient::new(provider);
//! let user = client.user(42).await?;
//! ```
//!
//! # Macro Expansion
//!
//! The `#[api]` macro:
//!
//! 1. Classifies every attribute on the trait, its methods and parameters
//! 2. Renders the directives into request builder statements
//! 3. Re-emits the trait with the directive attributes removed
//! 4. Emits `<Trait>Client<P>` and its implementation of the trait
//!
//! Rendering follows an optional `courier.toml` next to the crate's
//! `Cargo.toml` and `COURIER__SECTION__KEY` environment overrides.

mod options;

use proc_macro::TokenStream;

/// Generates a client for an API trait.
///
/// # Attributes
///
/// - `client`: name of the generated struct (default `<Trait>Client`)
/// - `provider`: trait bound for the transport (default `Provider`)
///
/// # Generated Code
///
/// For a method `#[GET("/users/{id}")] async fn user(&self, id: u64)` the
/// macro generates approximately:
///
/// ```rust,ignore
/// impl<P: Provider> Users for UsersClient<P> {
///     async fn user(&self, id: u64) -> Result<User, Error> {
///         let mut req = self.provider.builder("GET", "/users/{id}");
///         req.add_path_param("id", id);
///         self.provider.send(req).await
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn api(attr: TokenStream, item: TokenStream) -> TokenStream {
    let options = match options::crate_options() {
        Ok(options) => options,
        Err(e) => {
            let message = format!("invalid Courier configuration: {e}");
            return syn::Error::new(proc_macro2::Span::call_site(), message)
                .to_compile_error()
                .into();
        }
    };

    courier_codegen::expand_api(attr.into(), item.into(), &options)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
