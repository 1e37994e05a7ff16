//! Shared test utilities for lawgen tests.
//!
//! Builders for small in-memory documents, so unit tests don't have to
//! spell out whole OpenAPI YAML files.

use std::collections::BTreeMap;

use lawgen_openapi::{
    HttpMethod, MediaType, Operation, Parameter, ParameterLocation, PathItem, PrimitiveType,
    RequestBody, Response, Schema, Server, Specification,
};
use proc_macro2::TokenStream;

use crate::codegen::format_generated_code;

/// A document with the given component schemas and no paths.
pub fn make_spec(components: Vec<(&str, Schema)>) -> Specification {
    make_spec_with_paths(vec![], components)
}

/// A document with operations and component schemas.
///
/// Operations sharing a path are merged into one path item.
pub fn make_spec_with_paths(
    operations: Vec<(&str, HttpMethod, Operation)>,
    components: Vec<(&str, Schema)>,
) -> Specification {
    let mut spec = Specification {
        openapi: "3.0.3".to_string(),
        servers: vec![Server {
            url: "https://laws.e-gov.go.jp/api/2".to_string(),
            description: None,
        }],
        ..Default::default()
    };
    spec.info.title = "Japan Law API".to_string();
    spec.info.version = "2.0.0".to_string();

    for (path, method, operation) in operations {
        let item: &mut PathItem = spec.paths.entry(path.to_string()).or_default();
        let slot = match method {
            HttpMethod::Get => &mut item.get,
            HttpMethod::Post => &mut item.post,
            HttpMethod::Put => &mut item.put,
            HttpMethod::Delete => &mut item.delete,
        };
        *slot = Some(operation);
    }
    for (name, schema) in components {
        spec.components.schemas.insert(name.to_string(), schema);
    }
    spec
}

/// An object schema with the given required list and properties.
pub fn object(required: &[&str], properties: Vec<(String, Schema)>) -> Schema {
    Schema {
        properties: properties.into_iter().collect::<BTreeMap<_, _>>(),
        required: required.iter().map(|name| name.to_string()).collect(),
        ..Schema::of_type(PrimitiveType::Object)
    }
}

/// A named property for [`object`].
pub fn prop(name: &str, schema: Schema) -> (String, Schema) {
    (name.to_string(), schema)
}

/// A string schema with an `enum`.
pub fn string_enum(values: &[&str]) -> Schema {
    Schema {
        enum_values: values.iter().map(|v| serde_json::json!(v)).collect(),
        ..Schema::of_type(PrimitiveType::String)
    }
}

/// A `$ref` to a component schema by bare name.
pub fn schema_ref(name: &str) -> Schema {
    Schema::reference_to(format!("#/components/schemas/{name}"))
}

/// An optional query parameter.
pub fn query(name: &str, schema: Schema) -> Parameter {
    Parameter::new(name, ParameterLocation::Query, schema)
}

/// A required query parameter.
pub fn required_query(name: &str, schema: Schema) -> Parameter {
    Parameter {
        required: true,
        ..query(name, schema)
    }
}

/// A required string path parameter.
pub fn path_param(name: &str) -> Parameter {
    Parameter::new(
        name,
        ParameterLocation::Path,
        Schema::of_type(PrimitiveType::String),
    )
}

/// An operation with a JSON `200` response of the given schema.
pub fn operation(id: &str, parameters: Vec<Parameter>, response: Option<Schema>) -> Operation {
    let mut responses = BTreeMap::new();
    responses.insert(
        "200".to_string(),
        match response {
            Some(schema) => json_response(schema),
            None => Response {
                description: "ok".to_string(),
                ..Default::default()
            },
        },
    );
    Operation {
        operation_id: (!id.is_empty()).then(|| id.to_string()),
        parameters,
        responses,
        ..Default::default()
    }
}

/// A response with an `application/json` body.
pub fn json_response(schema: Schema) -> Response {
    Response {
        description: "ok".to_string(),
        content: json_content(schema),
    }
}

/// A required JSON request body.
pub fn json_body(schema: Schema) -> RequestBody {
    RequestBody {
        required: true,
        content: json_content(schema),
        ..Default::default()
    }
}

fn json_content(schema: Schema) -> BTreeMap<String, MediaType> {
    let mut content = BTreeMap::new();
    content.insert(
        "application/json".to_string(),
        MediaType {
            schema: Some(schema),
        },
    );
    content
}

/// Formats tokens, panicking with the error if they don't parse.
pub fn render(tokens: &TokenStream) -> String {
    format_generated_code(tokens).expect("generated code should parse")
}
