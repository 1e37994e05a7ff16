//! Pre-generation checks for naming collisions.
//!
//! Distinct document names can map to the same generated Rust name. The
//! generator keeps the first one in document order and skips the rest, so
//! none of these are errors: each collision is logged with `warn!` and
//! returned for callers that want to report it.
//!
//! ## Validation Checks
//!
//! - **Operation**: several operations share a method name, including every
//!   operation without an `operationId` (all become `UnknownOperation`)
//! - **Schema**: several component schemas share a PascalCase type name
//! - **ParamsStruct**: a `{Method}Params` struct has a component's name
//! - **Client**: the configured client struct has a component's name
//! - **Reserved**: a component is named like a runtime support type
//!
//! ## Examples
//!
//! ```
//! use lawgen::config::GeneratorConfig;
//! use lawgen::validation::validate_specification;
//! use lawgen_openapi::Specification;
//!
//! let spec = Specification::default();
//! assert!(validate_specification(&spec, &GeneratorConfig::default()).is_empty());
//! ```

use std::collections::BTreeMap;
use std::fmt;

use lawgen_openapi::Specification;
use lawgen_openapi::naming::field_name;
use strum::Display;

use crate::codegen::{component_type_name, plan_operations};
use crate::codegen::params::params_type_name;
use crate::config::{GeneratorConfig, RESERVED_CLIENT_NAMES};

/// What kind of generated name collides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum CollisionKind {
    Operation,
    Schema,
    ParamsStruct,
    Client,
    Reserved,
}

/// One generated name claimed by more than one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingCollision {
    pub kind: CollisionKind,
    /// The generated Rust name.
    pub name: String,
    /// The document entries that produce it, first (kept) one first.
    pub sources: Vec<String>,
}

impl fmt::Display for NamingCollision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} name '{}' is produced by {}",
            self.kind,
            self.name,
            self.sources.join(", ")
        )
    }
}

/// Checks a document for generated names that collide.
///
/// Every collision is also logged with `warn!`.
///
/// ## Examples
///
/// ```
/// use lawgen::config::GeneratorConfig;
/// use lawgen::validation::{CollisionKind, validate_specification};
/// use lawgen_openapi::Specification;
///
/// let spec = Specification::parse(br#"
/// openapi: 3.0.3
/// info: { title: Law API, version: "2" }
/// paths:
///   /a: { get: { responses: {} } }
///   /b: { get: { responses: {} } }
/// "#).unwrap();
///
/// let collisions = validate_specification(&spec, &GeneratorConfig::default());
/// assert_eq!(collisions.len(), 1);
/// assert_eq!(collisions[0].kind, CollisionKind::Operation);
/// assert_eq!(collisions[0].name, "unknown_operation");
/// ```
pub fn validate_specification(
    spec: &Specification,
    config: &GeneratorConfig,
) -> Vec<NamingCollision> {
    let mut collisions = Vec::new();

    // Operations, keyed by the generated method name.
    let mut methods: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut method_order = Vec::new();
    for (path, method, operation) in spec.operations() {
        let name = field_name(&operation.method_name());
        let sources = methods.entry(name.clone()).or_default();
        if sources.is_empty() {
            method_order.push(name);
        }
        sources.push(format!("{method} {path}"));
    }
    for name in &method_order {
        if let Some(sources) = methods.get(name).filter(|sources| sources.len() > 1) {
            collisions.push(NamingCollision {
                kind: CollisionKind::Operation,
                name: name.clone(),
                sources: sources.clone(),
            });
        }
    }

    // Component schemas, keyed by generated type name.
    let mut types: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for name in spec.components.schemas.keys() {
        types
            .entry(component_type_name(name))
            .or_default()
            .push(format!("schema '{name}'"));
    }
    for (type_name, sources) in &types {
        if sources.len() > 1 {
            collisions.push(NamingCollision {
                kind: CollisionKind::Schema,
                name: type_name.clone(),
                sources: sources.clone(),
            });
        }
    }

    let mut shadowed = |kind: CollisionKind, name: &str, source: String| {
        if let Some(schemas) = types.get(name) {
            let mut sources = vec![source];
            sources.extend(schemas.iter().take(1).cloned());
            collisions.push(NamingCollision {
                kind,
                name: name.to_string(),
                sources,
            });
        }
    };

    for op in plan_operations(spec) {
        if !op.query_params().is_empty() {
            shadowed(
                CollisionKind::ParamsStruct,
                &params_type_name(&op.method_name),
                format!("parameters of '{}'", op.fn_name()),
            );
        }
    }

    shadowed(
        CollisionKind::Client,
        &config.client_name,
        "the client struct".to_string(),
    );

    for runtime in RESERVED_CLIENT_NAMES {
        shadowed(
            CollisionKind::Reserved,
            runtime,
            "the client runtime".to_string(),
        );
    }

    for collision in &collisions {
        tracing::warn!(
            kind = %collision.kind,
            name = %collision.name,
            sources = %collision.sources.join(", "),
            "Naming collision; only the first source is generated"
        );
    }

    collisions
}
