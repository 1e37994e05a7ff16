//! OpenAPI 3.0 Document Library
//!
//! This crate reads an OpenAPI 3.0 document into a typed model and provides
//! the naming rules and schema-to-type resolution that the `lawgen` binary
//! uses to generate a strongly-typed Rust client.
//!
//! ## Core Types
//!
//! - [`Specification`] - A parsed document with servers, paths and components
//! - [`PathItem`] / [`Operation`] - Endpoints grouped by URL template and verb
//! - [`Parameter`] - A query, path, header or cookie parameter
//! - [`Schema`] - The recursive type descriptor
//! - [`RustType`] - The Rust type a schema resolves to
//!
//! ## Examples
//!
//! ```
//! use lawgen_openapi::{RustType, Specification, resolve};
//!
//! let spec = Specification::parse(br#"
//! openapi: 3.0.3
//! info: { title: Law API, version: "2" }
//! paths:
//!   /laws:
//!     get:
//!       operationId: get-laws
//!       responses:
//!         "200":
//!           description: ok
//!           content:
//!             application/json:
//!               schema: { $ref: '#/components/schemas/laws_response' }
//! components:
//!   schemas:
//!     laws_response: { type: object }
//! "#).unwrap();
//!
//! let (path, _, op) = spec.operations().next().unwrap();
//! assert_eq!(path, "/laws");
//! assert_eq!(op.method_name(), "GetLaws");
//!
//! let (_, response) = op.success_response().unwrap();
//! let ty = resolve(response.json_schema().unwrap());
//! assert_eq!(ty, RustType::Named("LawsResponse".to_string()));
//! ```

pub mod document;
pub mod error;
pub mod naming;
pub mod prelude;
pub mod resolve;
pub mod schema;

// Re-export main types at crate root
pub use document::{
    Components, HttpMethod, Info, MediaType, Operation, Parameter, ParameterLocation, PathItem,
    RequestBody, Response, Server, Specification, UNKNOWN_OPERATION,
};
pub use error::ParseError;
pub use resolve::{DEFAULT_MAX_DEPTH, RustType, ref_type_name, resolve, resolve_with_limit};
pub use schema::{PrimitiveType, Schema, SchemaKind};
