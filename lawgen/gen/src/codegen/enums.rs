//! Enum generation for the types artifact.
//!
//! A string `enum` becomes a real Rust enum. Enums over numbers or booleans
//! become a type alias with one constant per value, and string enums declared
//! inline on a struct property become string constants on that struct.

use std::collections::BTreeMap;

use lawgen_openapi::naming::{const_name, ident, variant_name};
use lawgen_openapi::{RustType, Schema};
use proc_macro2::{Ident, Literal, TokenStream};
use quote::quote;
use serde_json::Value;

use crate::codegen::{dedupe_names, doc_attrs};

/// Text form of an enum literal; `None` for arrays, objects and null.
pub fn enum_value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Distinct textual enum values in declaration order.
fn distinct_values(schema: &Schema) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for value in &schema.enum_values {
        match enum_value_text(value) {
            Some(text) if !values.contains(&text) => values.push(text),
            Some(text) => tracing::debug!(value = %text, "Dropping duplicate enum value"),
            None => tracing::warn!(value = %value, "Skipping enum value that is not a scalar"),
        }
    }
    values
}

/// Constant suffix for an enum value: `CabinetOrder` → `CABINET_ORDER`.
fn value_suffix(text: &str) -> String {
    let suffix = const_name(&text.replace('-', "neg_"));
    let suffix = suffix.trim_start_matches('_');
    if suffix.is_empty() {
        "VALUE".to_string()
    } else {
        suffix.to_string()
    }
}

/// Generates a Rust enum for a string `enum` schema.
///
/// Variants are PascalCase of each value, numbered on collision, and always
/// carry `#[serde(rename)]` with the verbatim wire value.
///
/// ## Examples
///
/// For `law_num_era` with values `[Meiji, Heisei]`:
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// pub enum LawNumEra {
///     #[serde(rename = "Meiji")]
///     Meiji,
///     #[serde(rename = "Heisei")]
///     Heisei,
/// }
///
/// impl LawNumEra {
///     pub const ALL: &'static [Self] = &[Self::Meiji, Self::Heisei];
///     pub fn as_str(&self) -> &'static str { ... }
/// }
///
/// impl std::fmt::Display for LawNumEra { ... }
/// ```
pub fn generate_string_enum(type_ident: &Ident, schema: &Schema) -> TokenStream {
    let values = distinct_values(schema);
    let variants: Vec<Ident> = dedupe_names(
        values.iter().map(|value| variant_name(value)).collect(),
        &[],
        "",
    )
    .iter()
    .map(|name| ident(name))
    .collect();
    let docs = schema.description.as_deref().map(doc_attrs);

    quote! {
        #docs
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum #type_ident {
            #(
                #[serde(rename = #values)]
                #variants,
            )*
        }

        impl #type_ident {
            /// Every value, in declaration order.
            pub const ALL: &'static [Self] = &[#(Self::#variants),*];

            /// The value as sent on the wire.
            pub fn as_str(&self) -> &'static str {
                match *self {
                    #(Self::#variants => #values,)*
                }
            }
        }

        impl std::fmt::Display for #type_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    }
}

/// Rust literal for an enum value of type `ty`, if the value fits it.
fn literal(ty: &RustType, value: &Value) -> Option<TokenStream> {
    match ty {
        RustType::I32 | RustType::I64 => {
            let n = value.as_i64()?;
            if *ty == RustType::I32 && i32::try_from(n).is_err() {
                return None;
            }
            let lit = Literal::u64_unsuffixed(n.unsigned_abs());
            Some(if n < 0 { quote!(-#lit) } else { quote!(#lit) })
        }
        RustType::F32 | RustType::F64 => {
            let n = value.as_f64().filter(|n| n.is_finite())?;
            if *ty == RustType::F32 && n.abs() > f64::from(f32::MAX) {
                return None;
            }
            let lit = Literal::f64_unsuffixed(n.abs());
            Some(if n < 0.0 { quote!(-#lit) } else { quote!(#lit) })
        }
        RustType::Bool => {
            let b = value.as_bool()?;
            Some(quote!(#b))
        }
        _ => None,
    }
}

/// Generates a type alias plus one constant per value for a non-string enum.
///
/// For `mission` (`integer`, `[1, 2]`):
/// ```ignore
/// pub type Mission = i64;
/// pub const MISSION_1: Mission = 1;
/// pub const MISSION_2: Mission = 2;
/// ```
///
/// Values that don't fit the alias type are skipped with a warning.
pub fn generate_value_enum(
    type_ident: &Ident,
    component: &str,
    ty: &RustType,
    schema: &Schema,
) -> TokenStream {
    let prefix = const_name(component);
    let mut names = Vec::new();
    let mut literals = Vec::new();
    for value in &schema.enum_values {
        let (Some(text), Some(lit)) = (enum_value_text(value), literal(ty, value)) else {
            tracing::warn!(
                schema = %component,
                value = %value,
                "Skipping enum value that does not fit the schema type"
            );
            continue;
        };
        names.push(format!("{prefix}_{}", value_suffix(&text)));
        literals.push(lit);
    }
    let names: Vec<Ident> = dedupe_names(names, &[], "_")
        .iter()
        .map(|name| ident(name))
        .collect();
    let docs = schema.description.as_deref().map(doc_attrs);

    quote! {
        #docs
        pub type #type_ident = #ty;

        #(pub const #names: #type_ident = #literals;)*
    }
}

/// Generates string constants for inline string enums on struct properties.
///
/// Returns an empty stream when no property carries an `enum`.
///
/// For `law_info.repeal_status` with values `[None, Repeal]`:
/// ```ignore
/// impl LawInfo {
///     pub const REPEAL_STATUS_NONE: &'static str = "None";
///     pub const REPEAL_STATUS_REPEAL: &'static str = "Repeal";
/// }
/// ```
pub fn generate_field_constants(
    struct_ident: &Ident,
    properties: &BTreeMap<String, Schema>,
) -> TokenStream {
    let mut names = Vec::new();
    let mut values = Vec::new();
    for (property, schema) in properties {
        if !schema.is_string_enum() {
            continue;
        }
        for value in distinct_values(schema) {
            names.push(format!("{}_{}", const_name(property), value_suffix(&value)));
            values.push(value);
        }
    }
    if names.is_empty() {
        return TokenStream::new();
    }

    let names: Vec<Ident> = dedupe_names(names, &[], "_")
        .iter()
        .map(|name| ident(name))
        .collect();

    quote! {
        impl #struct_ident {
            #(pub const #names: &'static str = #values;)*
        }
    }
}
