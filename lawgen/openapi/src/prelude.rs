//! Convenient re-exports for working with OpenAPI documents.
//!
//! ```
//! use lawgen_openapi::prelude::*;
//!
//! let schema = Schema::of_type(PrimitiveType::String);
//! assert_eq!(resolve(&schema), RustType::String);
//! assert_eq!(pascal_case("law_info"), "LawInfo");
//! ```

pub use crate::document::{
    HttpMethod, Operation, Parameter, ParameterLocation, PathItem, Specification,
};
pub use crate::error::ParseError;
pub use crate::naming::{camel_case, pascal_case, snake_case};
pub use crate::resolve::{RustType, ref_type_name, resolve};
pub use crate::schema::{PrimitiveType, Schema, SchemaKind};
