//! Per-operation query parameter structs.
//!
//! An operation with at least one `query` parameter gets a `{Method}Params`
//! struct. Its `to_query()` method turns the set fields into `QueryParams`
//! pairs using the declared parameter names as keys.

use lawgen_openapi::naming::{field_name, ident, type_name};
use lawgen_openapi::{Parameter, RustType, resolve};
use proc_macro2::{Ident, TokenStream};
use quote::quote;

use crate::codegen::{ComponentKind, Generator, dedupe_names, doc_attrs};

/// The resolved type of a parameter. A missing schema is treated as a string.
pub fn parameter_type(parameter: &Parameter) -> RustType {
    parameter
        .schema
        .as_ref()
        .map(resolve)
        .unwrap_or(RustType::String)
}

/// Name of the parameter struct for an operation.
///
/// ```
/// use lawgen::codegen::params::params_type_name;
///
/// assert_eq!(params_type_name("GetLawData"), "GetLawDataParams");
/// ```
pub fn params_type_name(method_name: &str) -> String {
    type_name(&format!("{method_name}Params"))
}

/// Builds an expression that renders `expr` (a reference or a value of type
/// `ty`) as query or path text.
///
/// The result is either a string slice or an owned `String`. Expressions that
/// go through `serde_json` use `?`, so the surrounding function must return
/// `Result<_, ApiError>`.
pub(crate) fn value_text(generator: &Generator<'_>, ty: &RustType, expr: &TokenStream) -> TokenStream {
    match generator.underlying(ty) {
        RustType::String => quote! { #expr },
        RustType::DateTime => quote! { #expr.to_rfc3339() },
        RustType::Date
        | RustType::I32
        | RustType::I64
        | RustType::F32
        | RustType::F64
        | RustType::Bool => quote! { #expr.to_string() },
        RustType::Named(name)
            if matches!(generator.component_kind(&name), Some(ComponentKind::StringEnum)) =>
        {
            quote! { #expr.as_str() }
        }
        RustType::Named(_) | RustType::Vec(_) | RustType::Map | RustType::Value => {
            quote! { serde_json::to_string(&#expr)? }
        }
    }
}

/// Generates the `{Method}Params` struct and its `to_query()` method.
///
/// Required parameters are plain fields, optional ones are `Option<T>`.
/// Sequence values are added once per item so the key repeats on the wire.
///
/// ## Generated Code
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Default)]
/// pub struct GetLawsParams {
///     pub law_title: Option<String>,
///     pub category_cd: Option<Vec<CategoryCd>>,
/// }
///
/// impl GetLawsParams {
///     pub fn to_query(&self) -> Result<QueryParams, ApiError> {
///         let mut query = QueryParams::new();
///         if let Some(value) = &self.law_title {
///             query.set("law_title", value);
///         }
///         if let Some(value) = &self.category_cd {
///             for item in value {
///                 query.add("category_cd", item.as_str());
///             }
///         }
///         Ok(query)
///     }
/// }
/// ```
pub fn generate_params_struct(
    generator: &Generator<'_>,
    method_name: &str,
    query_params: &[&Parameter],
) -> TokenStream {
    let struct_ident = ident(&params_type_name(method_name));
    let names = dedupe_names(
        query_params.iter().map(|p| field_name(&p.name)).collect(),
        &[],
        "_",
    );

    let mut defaultable = true;
    let mut fields = Vec::new();
    let mut setters = Vec::new();

    for (param, name) in query_params.iter().zip(names) {
        let field_ident = ident(&name);
        let ty = parameter_type(param);
        let docs = param.description.as_deref().map(doc_attrs);
        let setter = query_setter(generator, &param.name, &ty);

        if param.required {
            defaultable &= generator.is_defaultable(&ty);
            fields.push(quote! {
                #docs
                pub #field_ident: #ty,
            });
            setters.push(quote! {
                {
                    let value = &self.#field_ident;
                    #setter
                }
            });
        } else {
            fields.push(quote! {
                #docs
                pub #field_ident: Option<#ty>,
            });
            setters.push(quote! {
                if let Some(value) = &self.#field_ident {
                    #setter
                }
            });
        }
    }

    let derives = if defaultable {
        quote! { #[derive(Debug, Clone, PartialEq, Default)] }
    } else {
        quote! { #[derive(Debug, Clone, PartialEq)] }
    };
    let struct_doc = format!(" Query parameters for `{}`.", field_name(method_name));

    quote! {
        #[doc = #struct_doc]
        #derives
        pub struct #struct_ident {
            #(#fields)*
        }

        impl #struct_ident {
            /// Builds the query string pairs for the fields that are set.
            ///
            /// ## Errors
            ///
            /// Returns [`ApiError::Json`] if a structured value cannot be
            /// serialized.
            pub fn to_query(&self) -> Result<QueryParams, ApiError> {
                let mut query = QueryParams::new();
                #(#setters)*
                Ok(query)
            }
        }
    }
}

/// Statements adding `value` (a reference to a `ty`) under `key`.
fn query_setter(generator: &Generator<'_>, key: &str, ty: &RustType) -> TokenStream {
    match generator.underlying(ty) {
        RustType::Vec(element) => {
            let text = value_text(generator, &element, &quote! { item });
            quote! {
                for item in value {
                    query.add(#key, #text);
                }
            }
        }
        _ => {
            let text = value_text(generator, ty, &quote! { value });
            quote! { query.set(#key, #text); }
        }
    }
}

/// The identifier of a parameter struct, for callers building signatures.
pub fn params_ident(method_name: &str) -> Ident {
    ident(&params_type_name(method_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::test_utils::{make_spec, query, render, required_query, schema_ref, string_enum};
    use lawgen_openapi::{PrimitiveType, Schema};

    fn render_params(components: Vec<(&str, Schema)>, params: Vec<Parameter>) -> String {
        let spec = make_spec(components);
        let config = GeneratorConfig::default();
        let generator = Generator::new(&spec, &config);
        let refs: Vec<&Parameter> = params.iter().collect();
        render(&generate_params_struct(&generator, "GetKeyword", &refs))
    }

    #[test]
    fn optional_fields_are_options() {
        let code = render_params(
            vec![],
            vec![
                required_query("keyword", Schema::of_type(PrimitiveType::String)),
                query("limit", Schema::with_format(PrimitiveType::Integer, "int32")),
            ],
        );

        assert!(code.contains("pub struct GetKeywordParams"));
        assert!(code.contains("pub keyword: String,"));
        assert!(code.contains("pub limit: Option<i32>,"));
        assert!(code.contains("Default"));
    }

    #[test]
    fn to_query_uses_wire_names_and_set() {
        let code = render_params(
            vec![],
            vec![
                query("lawNum", Schema::of_type(PrimitiveType::String)),
                query("limit", Schema::with_format(PrimitiveType::Integer, "int32")),
            ],
        );

        assert!(code.contains("pub law_num: Option<String>"));
        assert!(code.contains("query.set(\"lawNum\", value);"));
        assert!(code.contains("query.set(\"limit\", value.to_string());"));
        assert!(code.contains("pub fn to_query(&self) -> Result<QueryParams, ApiError>"));
    }

    #[test]
    fn sequences_add_one_pair_per_item() {
        let code = render_params(
            vec![("law_type", string_enum(&["Act", "CabinetOrder"]))],
            vec![query("law_type", Schema::array_of(schema_ref("law_type")))],
        );

        assert!(code.contains("pub law_type: Option<Vec<LawType>>"));
        assert!(code.contains("for item in value"));
        assert!(code.contains("query.add(\"law_type\", item.as_str());"));
    }

    #[test]
    fn date_time_is_sent_as_rfc3339() {
        let code = render_params(
            vec![],
            vec![query(
                "updated",
                Schema::with_format(PrimitiveType::String, "date-time"),
            )],
        );

        assert!(code.contains("Option<chrono::DateTime<chrono::Utc>>"));
        assert!(code.contains("value.to_rfc3339()"));
    }

    #[test]
    fn aliases_are_looked_through() {
        let code = render_params(
            vec![("date", Schema::with_format(PrimitiveType::String, "date"))],
            vec![query("asof", schema_ref("date"))],
        );

        assert!(code.contains("pub asof: Option<Date>"));
        assert!(code.contains("query.set(\"asof\", value.to_string());"));
    }

    #[test]
    fn structured_values_go_through_serde_json() {
        let code = render_params(
            vec![],
            vec![query("filter", Schema::of_type(PrimitiveType::Object))],
        );

        assert!(code.contains("serde_json::to_string(&value)?"));
    }

    #[test]
    fn required_enum_prevents_default() {
        let code = render_params(
            vec![("law_num_era", string_enum(&["Meiji", "Reiwa"]))],
            vec![required_query("era", schema_ref("law_num_era"))],
        );

        assert!(code.contains("pub era: LawNumEra,"));
        assert!(!code.contains("Default"));
        assert!(code.contains("let value = &self.era;"));
    }

    #[test]
    fn colliding_field_names_are_deduplicated() {
        let code = render_params(
            vec![],
            vec![
                query("law-id", Schema::of_type(PrimitiveType::String)),
                query("law_id", Schema::of_type(PrimitiveType::String)),
            ],
        );

        assert!(code.contains("pub law_id: Option<String>"));
        assert!(code.contains("pub law_id_2: Option<String>"));
        assert!(code.contains("query.set(\"law-id\", value);"));
        assert!(code.contains("query.set(\"law_id\", value);"));
    }
}
