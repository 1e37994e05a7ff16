//! Types artifact generation.
//!
//! Emits exactly one named item per component schema, in sorted order:
//! a struct, an enum, or a type alias (see [`ComponentKind`]).

use std::collections::BTreeMap;

use lawgen_openapi::naming::{field_name, ident};
use lawgen_openapi::{RustType, Schema, ref_type_name, resolve};
use proc_macro2::{Ident, TokenStream};
use quote::quote;

use crate::codegen::{
    ComponentKind, Generator, ModuleDocBuilder, dedupe_names, doc_attrs, generate_field_constants,
    generate_string_enum, generate_value_enum,
};

/// Generates the complete types artifact.
pub fn generate_types(generator: &Generator<'_>) -> TokenStream {
    let docs = ModuleDocBuilder::new(generator.spec(), generator.config()).build_types();
    let items = generator
        .components()
        .map(|(type_name, name, schema, kind)| {
            generate_component(generator, type_name, name, schema, kind)
        });

    quote! {
        #docs

        #(#items)*
    }
}

/// Generates the item for one component.
pub fn generate_component(
    generator: &Generator<'_>,
    type_name: &str,
    name: &str,
    schema: &Schema,
    kind: &ComponentKind,
) -> TokenStream {
    let type_ident = ident(type_name);
    match kind {
        ComponentKind::Struct => generate_struct(generator, type_name, schema),
        ComponentKind::StringEnum => generate_string_enum(&type_ident, schema),
        ComponentKind::ValueEnum(ty) => generate_value_enum(&type_ident, name, ty, schema),
        ComponentKind::Alias(ty) => generate_alias(generator, &type_ident, ty, schema),
    }
}

/// `pub type Name = T;`, falling back to `serde_json::Value` when the alias
/// would be cyclic.
fn generate_alias(
    generator: &Generator<'_>,
    type_ident: &Ident,
    ty: &RustType,
    schema: &Schema,
) -> TokenStream {
    let cyclic = matches!(
        generator.underlying(ty),
        RustType::Named(ref target)
            if matches!(generator.component_kind(target), Some(ComponentKind::Alias(_)))
    );

    let target = if cyclic {
        tracing::warn!(
            type_name = %type_ident,
            "Alias refers back to itself; emitting serde_json::Value"
        );
        RustType::Value
    } else {
        ty.clone()
    };
    let docs = schema.description.as_deref().map(doc_attrs);

    quote! {
        #docs
        pub type #type_ident = #target;
    }
}

/// A struct field before rendering.
struct Field {
    wire: String,
    ty: RustType,
    required: bool,
    flatten: bool,
    description: Option<String>,
}

/// Collects the fields of an object or `allOf` composition.
///
/// Each `$ref` member of an `allOf` becomes a flattened field; the
/// properties of inline members are merged with the outer schema's own.
fn collect_fields(schema: &Schema) -> (Vec<Field>, BTreeMap<String, Schema>) {
    let mut properties = schema.properties.clone();
    let mut required = schema.required.clone();
    let mut flattened = Vec::new();

    for member in &schema.all_of {
        match member.reference() {
            Some(reference) => flattened.push(ref_type_name(reference)),
            None => {
                for (name, property) in &member.properties {
                    properties
                        .entry(name.clone())
                        .or_insert_with(|| property.clone());
                }
                required.extend(member.required.iter().cloned());
            }
        }
    }

    let mut fields: Vec<Field> = flattened
        .into_iter()
        .map(|base| Field {
            wire: base.clone(),
            ty: RustType::Named(base),
            required: true,
            flatten: true,
            description: None,
        })
        .collect();
    fields.extend(properties.iter().map(|(name, property)| Field {
        wire: name.clone(),
        ty: resolve(property),
        required: required.iter().any(|r| r == name),
        flatten: false,
        description: property.description.clone(),
    }));

    (fields, properties)
}

/// Generates a struct for an object schema or `allOf` composition.
///
/// ## Examples
///
/// For `law_info` with required `law_id` and optional `law_num_era`:
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
/// pub struct LawInfo {
///     pub law_id: String,
///     #[serde(default, skip_serializing_if = "Option::is_none")]
///     pub law_num_era: Option<LawNumEra>,
/// }
/// ```
pub fn generate_struct(generator: &Generator<'_>, type_name: &str, schema: &Schema) -> TokenStream {
    let type_ident = ident(type_name);
    let (fields, properties) = collect_fields(schema);

    let names = dedupe_names(
        fields
            .iter()
            .map(|field| field_name(&field.wire))
            .collect(),
        &[],
        "_",
    );

    let mut defaultable = true;
    let rendered: Vec<TokenStream> = fields
        .iter()
        .zip(names)
        .map(|(field, name)| {
            let field_ident = ident(&name);
            let boxed = generator.needs_box(type_name, &field.ty);
            let ty = &field.ty;
            let ty = if boxed {
                quote! { Box<#ty> }
            } else {
                quote! { #ty }
            };
            if field.required && (boxed || !generator.is_defaultable(&field.ty)) {
                defaultable = false;
            }

            let docs = field.description.as_deref().map(doc_attrs);
            let wire = &field.wire;
            let rename = (!field.flatten
                && field_ident.to_string().trim_start_matches("r#") != wire.as_str())
            .then(|| quote! { #[serde(rename = #wire)] });

            if field.flatten {
                quote! {
                    #[serde(flatten)]
                    pub #field_ident: #ty,
                }
            } else if field.required {
                quote! {
                    #docs
                    #rename
                    pub #field_ident: #ty,
                }
            } else {
                quote! {
                    #docs
                    #rename
                    #[serde(default, skip_serializing_if = "Option::is_none")]
                    pub #field_ident: Option<#ty>,
                }
            }
        })
        .collect();

    let derives = if defaultable {
        quote! { #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)] }
    } else {
        quote! { #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)] }
    };
    let docs = schema.description.as_deref().map(doc_attrs);
    let constants = generate_field_constants(&type_ident, &properties);

    quote! {
        #docs
        #derives
        pub struct #type_ident {
            #(#rendered)*
        }

        #constants
    }
}
