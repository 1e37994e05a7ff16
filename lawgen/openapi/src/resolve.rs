//! Schema to Rust type resolution.
//!
//! [`resolve`] applies a fixed precedence, first match wins:
//!
//! 1. a non-empty `$ref` names the referenced component;
//! 2. an `allOf` names its first member that carries a `$ref`, otherwise it
//!    falls through to the outer schema's own `type`;
//! 3. the primitive `type`/`format` pair decides the rest.
//!
//! Referenced components are never dereferenced here. Only their names are
//! used; the generator emits each component once as a standalone type.

use std::fmt;

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

use crate::naming::{ident, pascal_case, type_name};
use crate::schema::{PrimitiveType, Schema};

/// Default bound on `items` nesting before resolution gives up.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// A resolved Rust type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RustType {
    /// A named component type (PascalCase of the component name).
    Named(String),
    String,
    /// `chrono::DateTime<chrono::Utc>`
    DateTime,
    /// `chrono::NaiveDate`
    Date,
    I32,
    I64,
    F32,
    F64,
    Bool,
    Vec(Box<RustType>),
    /// Open string-keyed map of untyped values.
    Map,
    /// Opaque structured value (`serde_json::Value`).
    Value,
}

impl RustType {
    /// Whether the type has a `Default` impl without looking at components.
    ///
    /// Named types are assumed not to, since enums are emitted without one.
    pub fn is_defaultable(&self) -> bool {
        !matches!(self, Self::Named(_))
    }

    /// Whether values of this type can be borrowed as `&str`.
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }
}

impl fmt::Display for RustType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{}", ident(&type_name(name))),
            Self::String => f.write_str("String"),
            Self::DateTime => f.write_str("chrono::DateTime<chrono::Utc>"),
            Self::Date => f.write_str("chrono::NaiveDate"),
            Self::I32 => f.write_str("i32"),
            Self::I64 => f.write_str("i64"),
            Self::F32 => f.write_str("f32"),
            Self::F64 => f.write_str("f64"),
            Self::Bool => f.write_str("bool"),
            Self::Vec(inner) => write!(f, "Vec<{inner}>"),
            Self::Map => f.write_str("std::collections::HashMap<String, serde_json::Value>"),
            Self::Value => f.write_str("serde_json::Value"),
        }
    }
}

impl ToTokens for RustType {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let ty = match self {
            Self::Named(name) => {
                let name = ident(&type_name(name));
                quote! { #name }
            }
            Self::String => quote! { String },
            Self::DateTime => quote! { chrono::DateTime<chrono::Utc> },
            Self::Date => quote! { chrono::NaiveDate },
            Self::I32 => quote! { i32 },
            Self::I64 => quote! { i64 },
            Self::F32 => quote! { f32 },
            Self::F64 => quote! { f64 },
            Self::Bool => quote! { bool },
            Self::Vec(inner) => quote! { Vec<#inner> },
            Self::Map => quote! { std::collections::HashMap<String, serde_json::Value> },
            Self::Value => quote! { serde_json::Value },
        };
        tokens.extend(ty);
    }
}

/// Name of the component a `$ref` points at: PascalCase of its last `/`
/// segment.
///
/// ```
/// use lawgen_openapi::ref_type_name;
///
/// assert_eq!(ref_type_name("#/components/schemas/law_info"), "LawInfo");
/// assert_eq!(ref_type_name("law_info"), "LawInfo");
/// ```
pub fn ref_type_name(reference: &str) -> String {
    let last = reference.rsplit('/').next().unwrap_or(reference);
    pascal_case(last)
}

/// Resolves a schema to the Rust type to emit for it.
///
/// ```
/// use lawgen_openapi::{PrimitiveType, RustType, Schema, resolve};
///
/// let schema = Schema::array_of(Schema::with_format(PrimitiveType::Integer, "int32"));
/// assert_eq!(resolve(&schema), RustType::Vec(Box::new(RustType::I32)));
/// assert_eq!(resolve(&schema).to_string(), "Vec<i32>");
/// ```
pub fn resolve(schema: &Schema) -> RustType {
    resolve_with_limit(schema, DEFAULT_MAX_DEPTH)
}

/// Like [`resolve`], with an explicit bound on `items` nesting.
///
/// Past the bound the opaque [`RustType::Value`] is returned.
pub fn resolve_with_limit(schema: &Schema, max_depth: usize) -> RustType {
    resolve_at(schema, 0, max_depth)
}

fn resolve_at(schema: &Schema, depth: usize, max_depth: usize) -> RustType {
    if depth > max_depth {
        tracing::warn!(
            max_depth,
            "Schema nesting exceeds the resolution limit; falling back to serde_json::Value"
        );
        return RustType::Value;
    }

    if let Some(reference) = schema.reference() {
        return RustType::Named(ref_type_name(reference));
    }

    if let Some(reference) = schema.all_of.iter().find_map(Schema::reference) {
        return RustType::Named(ref_type_name(reference));
    }

    match schema.primitive() {
        Some(PrimitiveType::String) => {
            if !schema.enum_values.is_empty() {
                return RustType::String;
            }
            match schema.format() {
                Some("date-time") => RustType::DateTime,
                Some("date") => RustType::Date,
                _ => RustType::String,
            }
        }
        Some(PrimitiveType::Integer) => match schema.format() {
            Some("int32") => RustType::I32,
            _ => RustType::I64,
        },
        Some(PrimitiveType::Number) => match schema.format() {
            Some("float") => RustType::F32,
            _ => RustType::F64,
        },
        Some(PrimitiveType::Boolean) => RustType::Bool,
        Some(PrimitiveType::Array) => match schema.items.as_deref() {
            Some(items) => RustType::Vec(Box::new(resolve_at(items, depth + 1, max_depth))),
            None => RustType::Vec(Box::new(RustType::Value)),
        },
        Some(PrimitiveType::Object) if schema.properties.is_empty() => RustType::Map,
        Some(PrimitiveType::Object) | None => RustType::Value,
    }
}
