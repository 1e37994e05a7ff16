//! Code generation modules for lawgen.
//!
//! This module contains generators that produce Rust source code from a
//! parsed OpenAPI document. Each submodule handles one component of the two
//! generated artifacts.
//!
//! ## Submodules
//!
//! - [`types`] - One named item per `components.schemas` entry
//! - [`enums`] - String enums, value-enum constants and inline field constants
//! - [`error`] - The `ApiError` enum and the `QueryParams` builder
//! - [`api_struct`] - The client struct with its constructors
//! - [`params`] - Per-operation query parameter structs
//! - [`client`] - One request method per operation
//! - [`module_docs`] - Module-level documentation for both artifacts
//!
//! ## Output Format
//!
//! All generators return `proc_macro2::TokenStream`, which is then:
//! - Validated with `syn::parse2` to ensure correctness
//! - Formatted with `prettyplease` for consistent style
//!
//! See [`crate::output`] for the assembly and file writing logic.

pub mod api_struct;
pub mod client;
pub mod enums;
pub mod error;
pub mod module_docs;
pub mod params;
pub mod types;

use std::collections::{BTreeMap, BTreeSet};

use lawgen_openapi::naming::type_name;
use lawgen_openapi::{DEFAULT_MAX_DEPTH, RustType, Schema, SchemaKind, ref_type_name, resolve};
use proc_macro2::TokenStream;
use quote::quote;

use crate::config::GeneratorConfig;

pub use api_struct::generate_client_struct;
pub use client::{
    ClientOperation, generate_client, generate_client_impl, generate_operation_method,
    plan_operations,
};
pub use enums::{generate_field_constants, generate_string_enum, generate_value_enum};
pub use error::{generate_error_type, generate_query_params_type};
pub use module_docs::ModuleDocBuilder;
pub use params::generate_params_struct;
pub use types::generate_types;

/// How a component schema is emitted in the types artifact.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    /// A `pub struct` with one field per property.
    Struct,
    /// A `pub enum` with one variant per string value.
    StringEnum,
    /// A `pub type` alias plus one constant per enum value.
    ValueEnum(RustType),
    /// A plain `pub type` alias.
    Alias(RustType),
}

impl ComponentKind {
    /// Classifies a component schema.
    ///
    /// ```
    /// use lawgen::codegen::ComponentKind;
    /// use lawgen_openapi::{PrimitiveType, RustType, Schema};
    ///
    /// let date = Schema::with_format(PrimitiveType::String, "date");
    /// assert_eq!(ComponentKind::of(&date), ComponentKind::Alias(RustType::Date));
    /// ```
    pub fn of(schema: &Schema) -> Self {
        match schema.kind() {
            SchemaKind::AllOf(members) if is_pure_alias(schema, members) => {
                Self::Alias(resolve(schema))
            }
            SchemaKind::AllOf(_) => Self::Struct,
            SchemaKind::OneOf(_) | SchemaKind::AnyOf(_) => Self::Alias(RustType::Value),
            SchemaKind::Ref(_) => Self::Alias(resolve(schema)),
            _ if schema.is_string_enum() => Self::StringEnum,
            _ if !schema.enum_values.is_empty() && has_literals(&resolve(schema)) => {
                Self::ValueEnum(resolve(schema))
            }
            _ if !schema.properties.is_empty() => Self::Struct,
            _ => Self::Alias(resolve(schema)),
        }
    }
}

/// Types whose values can be written as Rust literals in a `const`.
fn has_literals(ty: &RustType) -> bool {
    matches!(
        ty,
        RustType::I32 | RustType::I64 | RustType::F32 | RustType::F64 | RustType::Bool
    )
}

/// An `allOf` made of a single `$ref` and nothing that adds fields.
fn is_pure_alias(schema: &Schema, members: &[Schema]) -> bool {
    let refs = members.iter().filter(|m| m.reference().is_some()).count();
    let adds_fields = members
        .iter()
        .any(|m| m.reference().is_none() && !m.properties.is_empty());
    refs == 1 && !adds_fields && schema.properties.is_empty()
}

/// Walks the document model and emits both artifacts.
///
/// Holds the component table keyed by generated type name so that the
/// emitters can look through aliases and detect recursive structs.
pub struct Generator<'a> {
    spec: &'a lawgen_openapi::Specification,
    config: &'a GeneratorConfig,
    components: BTreeMap<String, (&'a str, &'a Schema, ComponentKind)>,
}

impl<'a> Generator<'a> {
    /// Creates a generator over a parsed document.
    ///
    /// When two component names map to the same type name the first one in
    /// sorted order is kept.
    pub fn new(spec: &'a lawgen_openapi::Specification, config: &'a GeneratorConfig) -> Self {
        let mut components = BTreeMap::new();
        for (name, schema) in &spec.components.schemas {
            let type_name = component_type_name(name);
            if components.contains_key(&type_name) {
                tracing::warn!(
                    schema = %name,
                    type_name = %type_name,
                    "Skipping component whose type name is already taken"
                );
                continue;
            }
            components.insert(
                type_name,
                (name.as_str(), schema, ComponentKind::of(schema)),
            );
        }
        Self {
            spec,
            config,
            components,
        }
    }

    pub fn spec(&self) -> &'a lawgen_openapi::Specification {
        self.spec
    }

    pub fn config(&self) -> &'a GeneratorConfig {
        self.config
    }

    /// Tokens of the types artifact (`types.rs`).
    pub fn types_tokens(&self) -> TokenStream {
        generate_types(self)
    }

    /// Tokens of the client artifact (`client.rs`).
    pub fn client_tokens(&self) -> TokenStream {
        generate_client(self)
    }

    /// Components to emit as `(type name, wire name, schema, kind)`, sorted by
    /// type name.
    pub fn components(
        &self,
    ) -> impl Iterator<Item = (&str, &'a str, &'a Schema, &ComponentKind)> {
        self.components
            .iter()
            .map(|(type_name, (name, schema, kind))| (type_name.as_str(), *name, *schema, kind))
    }

    /// How the component behind a type name is emitted, if it exists.
    pub fn component_kind(&self, type_name: &str) -> Option<&ComponentKind> {
        self.components.get(type_name).map(|(_, _, kind)| kind)
    }

    /// Follows `Named` aliases down to the type they stand for.
    ///
    /// Structs, enums and dangling references stay `Named`.
    pub fn underlying(&self, ty: &RustType) -> RustType {
        let mut current = ty.clone();
        for _ in 0..DEFAULT_MAX_DEPTH {
            let next = match &current {
                RustType::Named(name) => match self.component_kind(name) {
                    Some(ComponentKind::Alias(target)) | Some(ComponentKind::ValueEnum(target)) => {
                        target.clone()
                    }
                    _ => return current,
                },
                _ => return current,
            };
            if next == current {
                return current;
            }
            current = next;
        }
        current
    }

    /// Whether the type is known to implement `Default`.
    pub fn is_defaultable(&self, ty: &RustType) -> bool {
        match self.underlying(ty) {
            RustType::Named(_) => false,
            other => other.is_defaultable(),
        }
    }

    /// Whether a field of type `to` inside struct `from` must be boxed to
    /// keep the struct finitely sized.
    pub fn needs_box(&self, from: &str, to: &RustType) -> bool {
        match self.underlying(to) {
            RustType::Named(target) => target == from || self.reaches(&target, from),
            _ => false,
        }
    }

    fn reaches(&self, start: &str, goal: &str) -> bool {
        let mut seen = BTreeSet::new();
        let mut stack = vec![start.to_string()];
        while let Some(current) = stack.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            for next in self.struct_edges(&current) {
                if next == goal {
                    return true;
                }
                stack.push(next);
            }
        }
        false
    }

    /// Named types held inline (not behind a `Vec` or map) by a struct.
    fn struct_edges(&self, type_name: &str) -> Vec<String> {
        let Some((_, schema, ComponentKind::Struct)) = self.components.get(type_name) else {
            return Vec::new();
        };
        let mut edges = Vec::new();
        for member in schema.all_of.iter().chain(std::iter::once(*schema)) {
            if let Some(reference) = member.reference() {
                edges.push(ref_type_name(reference));
            }
            for property in member.properties.values() {
                if let RustType::Named(name) = self.underlying(&resolve(property)) {
                    edges.push(name);
                }
            }
        }
        edges
    }
}

/// The generated type name for a component key.
///
/// ```
/// use lawgen::codegen::component_type_name;
///
/// assert_eq!(component_type_name("law_info"), "LawInfo");
/// assert_eq!(component_type_name("2nd_law"), "T2ndLaw");
/// ```
pub fn component_type_name(name: &str) -> String {
    type_name(&ref_type_name(name))
}

/// Builds one `#[doc]` attribute per line of `text`.
pub fn doc_attrs(text: &str) -> TokenStream {
    let lines = text.trim().lines().map(|line| {
        let line = if line.trim().is_empty() {
            String::new()
        } else {
            format!(" {}", line.trim_end())
        };
        quote! { #[doc = #line] }
    });
    quote! { #(#lines)* }
}

/// Makes every name unique by appending a counter, skipping names in `taken`.
///
/// ```
/// use lawgen::codegen::dedupe_names;
///
/// let names = vec!["Act".to_string(), "Act".to_string(), "Rule".to_string()];
/// assert_eq!(dedupe_names(names, &[], ""), vec!["Act", "Act2", "Rule"]);
///
/// let names = vec!["params".to_string()];
/// assert_eq!(dedupe_names(names, &["params"], "_"), vec!["params_2"]);
/// ```
pub fn dedupe_names(names: Vec<String>, taken: &[&str], separator: &str) -> Vec<String> {
    let mut used: BTreeSet<String> = taken.iter().map(|name| name.to_string()).collect();
    names
        .into_iter()
        .map(|name| {
            let mut candidate = name.clone();
            let mut counter = 2;
            while used.contains(&candidate) {
                candidate = format!("{name}{separator}{counter}");
                counter += 1;
            }
            used.insert(candidate.clone());
            candidate
        })
        .collect()
}

/// Validates that the generated code is syntactically correct.
///
/// ## Errors
///
/// Returns an error string if the generated code fails to parse.
pub fn validate_generated_code(tokens: &TokenStream) -> Result<(), String> {
    syn::parse2::<syn::File>(tokens.clone()).map_err(|e| e.to_string())?;
    Ok(())
}

/// Formats generated code using prettyplease.
///
/// ## Errors
///
/// Returns an error string if the code fails to parse.
pub fn format_generated_code(tokens: &TokenStream) -> Result<String, String> {
    let file = syn::parse2::<syn::File>(tokens.clone()).map_err(|e| e.to_string())?;
    Ok(prettyplease::unparse(&file))
}
