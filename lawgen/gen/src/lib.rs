//! lawgen code generator library.
//!
//! This crate generates a statically typed, blocking Rust client from an
//! OpenAPI 3.0 document, such as the e-Gov law API v2 (`lawapi-v2.yaml`).
//! The generated code consists of two artifacts:
//!
//! - `types.rs` - one named item per component schema (structs, enums and
//!   type aliases)
//! - `client.rs` - the `ApiError` type, the `QueryParams` builder, the client
//!   struct and one method per operation
//!
//! ## Modules
//!
//! - [`codegen`] - Code generation for individual components
//! - [`output`] - Validation, formatting and atomic file writing
//! - [`validation`] - Naming collision checks
//! - [`scaffold`] - Optional `Cargo.toml` and `lib.rs` for the generated package
//! - [`config`] - Generator settings
//! - [`parser`] - Path template utilities
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use lawgen::config::GeneratorConfig;
//! use lawgen::output::generate_and_write;
//! use lawgen_openapi::Specification;
//!
//! let bytes = std::fs::read("lawapi-v2.yaml").unwrap();
//! let spec = Specification::parse(&bytes).unwrap();
//!
//! // dry_run=true prints the artifacts instead of writing them
//! let artifacts =
//!     generate_and_write(&spec, &GeneratorConfig::default(), Path::new("src"), true, false)
//!         .unwrap();
//! assert_eq!(artifacts.len(), 2);
//! ```
//!
//! ## Generated Code Structure
//!
//! For an operation `get-law-data` on `/law_data/{law_id_or_num_or_revision_id}`:
//!
//! ```text
//! // types.rs
//! pub struct LawDataResponse { ... }
//!
//! // client.rs
//! pub enum ApiError { Http(..), Json(..), Api { status: u16, body: String } }
//! pub struct QueryParams { ... }
//! pub struct Client { ... }
//! pub struct GetLawDataParams { ... }
//!
//! impl Client {
//!     pub fn get_law_data(
//!         &self,
//!         law_id_or_num_or_revision_id: &str,
//!         params: &GetLawDataParams,
//!     ) -> Result<LawDataResponse, ApiError>;
//! }
//! ```

pub mod codegen;
pub mod config;
pub mod errors;
pub mod output;
pub mod parser;
pub mod scaffold;
pub mod validation;

#[cfg(test)]
mod test_utils;
