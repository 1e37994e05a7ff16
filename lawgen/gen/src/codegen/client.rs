//! HTTP client method generation.
//!
//! Generates one blocking method per operation and assembles the client
//! artifact around them.

use std::collections::BTreeSet;

use lawgen_openapi::naming::{field_name, ident};
use lawgen_openapi::{HttpMethod, Operation, Parameter, RustType, Specification, resolve};
use proc_macro2::TokenStream;
use quote::quote;

use crate::codegen::params::{params_ident, parameter_type, value_text};
use crate::codegen::{
    Generator, ModuleDocBuilder, dedupe_names, doc_attrs, generate_client_struct,
    generate_error_type, generate_params_struct, generate_query_params_type,
};
use crate::parser::format_template;

/// An operation that gets a client method.
#[derive(Debug, Clone)]
pub struct ClientOperation<'a> {
    pub path: &'a str,
    pub method: HttpMethod,
    pub operation: &'a Operation,
    /// PascalCase method name from [`Operation::method_name`].
    pub method_name: String,
    /// Path-level and operation-level parameters, `$ref`s resolved.
    pub parameters: Vec<Parameter>,
}

impl ClientOperation<'_> {
    /// The snake_case Rust name of the generated method.
    pub fn fn_name(&self) -> String {
        field_name(&self.method_name)
    }

    pub fn query_params(&self) -> Vec<&Parameter> {
        self.parameters.iter().filter(|p| p.is_query()).collect()
    }
}

/// Lists the operations to emit, in document order.
///
/// When several operations map to the same method name only the first is
/// kept; the rest are logged and skipped.
pub fn plan_operations(spec: &Specification) -> Vec<ClientOperation<'_>> {
    let mut seen = BTreeSet::new();
    let mut planned = Vec::new();
    for (path, method, operation) in spec.operations() {
        let method_name = operation.method_name();
        if !seen.insert(field_name(&method_name)) {
            tracing::warn!(
                path,
                method = %method,
                method_name = %method_name,
                "Skipping operation whose method name is already taken"
            );
            continue;
        }
        planned.push(ClientOperation {
            path,
            method,
            operation,
            method_name,
            parameters: spec.effective_parameters(path, operation),
        });
    }
    planned
}

/// Generates the complete client artifact.
///
/// Contains the module docs, the runtime support types, the client struct,
/// one parameter struct per operation with query parameters and the method
/// `impl` block.
pub fn generate_client(generator: &Generator<'_>) -> TokenStream {
    let spec = generator.spec();
    let config = generator.config();
    let operations = plan_operations(spec);

    let docs = ModuleDocBuilder::new(spec, config).build_client();
    let error_type = generate_error_type();
    let query_params_type = generate_query_params_type();
    let client_struct = generate_client_struct(spec, config);
    let params_structs = operations.iter().filter_map(|op| {
        let query_params = op.query_params();
        (!query_params.is_empty())
            .then(|| generate_params_struct(generator, &op.method_name, &query_params))
    });
    let client_impl = generate_client_impl(generator, &operations);

    quote! {
        #docs

        #[allow(unused_imports)]
        use super::types::*;

        #error_type

        #query_params_type

        #client_struct

        #(#params_structs)*

        #client_impl
    }
}

/// Generates the `impl Client` block holding every operation method.
pub fn generate_client_impl(
    generator: &Generator<'_>,
    operations: &[ClientOperation<'_>],
) -> TokenStream {
    let struct_name = ident(&generator.config().client_name);
    let methods = operations
        .iter()
        .map(|op| generate_operation_method(generator, op));

    quote! {
        impl #struct_name {
            #(#methods)*
        }
    }
}

/// Generates the method for one operation.
///
/// Arguments come in this order: path parameters, the JSON body (POST and
/// PUT only), then the parameter struct when the operation has query
/// parameters.
///
/// ## Examples
///
/// ```ignore
/// /// Sends `GET /law_data/{law_id_or_num_or_revision_id}`.
/// pub fn get_law_data(
///     &self,
///     law_id_or_num_or_revision_id: &str,
///     params: &GetLawDataParams,
/// ) -> Result<LawDataResponse, ApiError> {
///     let mut url = format!("{}/law_data/{}", self.base_url, law_id_or_num_or_revision_id);
///     if let Some(query) = params.to_query()?.encode() {
///         url.push('?');
///         url.push_str(&query);
///     }
///     let response = self.http.get(&url).send()?;
///     let status = response.status().as_u16();
///     if status >= 400 {
///         let body = response.text().unwrap_or_default();
///         return Err(ApiError::Api { status, body });
///     }
///     let bytes = response.bytes()?;
///     Ok(serde_json::from_slice(&bytes)?)
/// }
/// ```
pub fn generate_operation_method(generator: &Generator<'_>, op: &ClientOperation<'_>) -> TokenStream {
    let fn_ident = ident(&op.fn_name());
    let (template, placeholders) = format_template(op.path);

    // Declared path parameters in declared order, then undeclared placeholders.
    let mut path_args: Vec<(String, RustType)> = Vec::new();
    for param in op.parameters.iter().filter(|p| p.is_path()) {
        if placeholders.contains(&param.name.as_str()) {
            path_args.push((param.name.clone(), parameter_type(param)));
        } else {
            tracing::warn!(
                path = op.path,
                parameter = %param.name,
                "Path parameter does not appear in the path template; omitting it"
            );
        }
    }
    for placeholder in &placeholders {
        if !path_args.iter().any(|(name, _)| name == placeholder) {
            path_args.push((placeholder.to_string(), RustType::String));
        }
    }
    let arg_names = dedupe_names(
        path_args.iter().map(|(name, _)| field_name(name)).collect(),
        &["params", "body"],
        "_",
    );

    let mut args = Vec::new();
    for ((_, ty), name) in path_args.iter().zip(&arg_names) {
        let arg = ident(name);
        if generator.underlying(ty).is_string() {
            args.push(quote! { #arg: &str });
        } else {
            args.push(quote! { #arg: #ty });
        }
    }

    // One format argument per `{}` slot, in template order.
    let slot_args = placeholders.iter().map(|placeholder| {
        let index = path_args
            .iter()
            .position(|(name, _)| name == placeholder)
            .unwrap_or_default();
        let arg = ident(&arg_names[index]);
        value_text(generator, &path_args[index].1, &quote! { #arg })
    });
    let format_args = std::iter::once(quote! { self.base_url }).chain(slot_args);
    let format_string = format!("{{}}{template}");

    let body_type = match op.method {
        HttpMethod::Post | HttpMethod::Put => op
            .operation
            .request_body
            .as_ref()
            .and_then(|body| body.json_schema())
            .map(resolve),
        HttpMethod::Get | HttpMethod::Delete => None,
    };
    let send_body = body_type.as_ref().map(|ty| {
        args.push(quote! { body: &#ty });
        quote! { .json(body) }
    });

    let has_query = !op.query_params().is_empty();
    let query = has_query.then(|| {
        let params_type = params_ident(&op.method_name);
        args.push(quote! { params: &#params_type });
        quote! {
            if let Some(query) = params.to_query()?.encode() {
                url.push('?');
                url.push_str(&query);
            }
        }
    });
    let url_binding = if has_query {
        quote! { let mut url }
    } else {
        quote! { let url }
    };

    let verb = match op.method {
        HttpMethod::Get => quote! { get },
        HttpMethod::Post => quote! { post },
        HttpMethod::Put => quote! { put },
        HttpMethod::Delete => quote! { delete },
    };

    let success = op
        .operation
        .success_response()
        .and_then(|(_, response)| response.json_schema())
        .map(resolve);
    let (return_type, decode) = match success {
        Some(ty) => (quote! { #ty }, quote! { Ok(serde_json::from_slice(&bytes)?) }),
        None => (quote! { Vec<u8> }, quote! { Ok(bytes.to_vec()) }),
    };

    let docs = method_docs(op);
    let deprecated = op.operation.deprecated.then(|| quote! { #[deprecated] });

    quote! {
        #docs
        #deprecated
        pub fn #fn_ident(&self #(, #args)*) -> Result<#return_type, ApiError> {
            #url_binding = format!(#format_string, #(#format_args),*);
            #query
            let response = self.http.#verb(&url) #send_body .send()?;
            let status = response.status().as_u16();
            if status >= 400 {
                let body = response.text().unwrap_or_default();
                return Err(ApiError::Api { status, body });
            }
            let bytes = response.bytes()?;
            #decode
        }
    }
}

fn method_docs(op: &ClientOperation<'_>) -> TokenStream {
    let mut text = String::new();
    if let Some(summary) = op.operation.summary.as_deref().filter(|s| !s.trim().is_empty()) {
        text.push_str(summary.trim());
        text.push_str("\n\n");
    }
    if let Some(description) = op
        .operation
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
    {
        text.push_str(description.trim());
        text.push_str("\n\n");
    }
    text.push_str(&format!("Sends `{} {}`.", op.method, op.path));
    doc_attrs(&text)
}
