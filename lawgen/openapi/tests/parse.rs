//! Integration tests for parsing and resolving the law API fixture.
//!
//! These tests verify that:
//! - The fixture parses into the expected paths, operations and components
//! - Every `$ref` in the document resolves to a distinct type name
//! - Success responses and parameters resolve to the expected Rust types

use std::collections::BTreeSet;

use lawgen_openapi::naming::pascal_case;
use lawgen_openapi::{
    HttpMethod, ParseError, RustType, Schema, SchemaKind, Specification, ref_type_name, resolve,
};

const FIXTURE: &str = include_str!("fixtures/lawapi-mini.yaml");

fn fixture() -> Specification {
    Specification::parse(FIXTURE.as_bytes()).expect("fixture should parse")
}

// =============================================================================
// Document shape
// =============================================================================

#[test]
fn fixture_has_expected_metadata() {
    let spec = fixture();
    assert_eq!(spec.info.title, "Japan Law API");
    assert_eq!(spec.base_url(), Some("https://laws.e-gov.go.jp/api/2"));
}

#[test]
fn fixture_operations_in_path_order() {
    let spec = fixture();
    let names: Vec<String> = spec.operations().map(|(_, _, op)| op.method_name()).collect();
    assert_eq!(
        names,
        vec![
            "GetAttachment",
            "GetKeyword",
            "GetLawData",
            "GetLaws",
            "GetRevisions"
        ]
    );
    assert!(spec.operations().all(|(_, method, _)| method == HttpMethod::Get));
}

#[test]
fn deprecated_flag_is_parsed() {
    let spec = fixture();
    let deprecated: Vec<&str> = spec
        .operations()
        .filter(|(_, _, op)| op.deprecated)
        .map(|(path, _, _)| path)
        .collect();
    assert_eq!(deprecated, vec!["/revisions/{law_id_or_num}"]);
}

#[test]
fn schema_kinds_cover_the_fixture() {
    let spec = fixture();
    let schemas = &spec.components.schemas;
    assert!(matches!(schemas["law_data_response"].kind(), SchemaKind::AllOf(_)));
    assert!(matches!(schemas["sentence_text"].kind(), SchemaKind::OneOf(_)));
    assert!(schemas["law_type"].is_string_enum());
    assert!(!schemas["mission"].is_string_enum());
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn distinct_component_names_resolve_to_distinct_types() {
    let spec = fixture();
    let names = spec.sorted_schema_names();

    let resolved: BTreeSet<String> = names
        .iter()
        .map(|name| resolve(&Schema::reference_to(format!("#/components/schemas/{name}"))))
        .map(|ty| ty.to_string())
        .collect();
    let pascal: BTreeSet<String> = names.iter().map(|name| pascal_case(name)).collect();

    assert_eq!(resolved, pascal);
    assert_eq!(resolved.len(), names.len());
}

#[test]
fn success_types_resolve_from_sorted_2xx() {
    let spec = fixture();
    let types: Vec<Option<String>> = spec
        .operations()
        .map(|(_, _, op)| {
            op.success_response()
                .and_then(|(_, response)| response.json_schema())
                .map(|schema| resolve(schema).to_string())
        })
        .collect();

    assert_eq!(
        types,
        vec![
            None,
            Some("KeywordResponse".to_string()),
            Some("LawDataResponse".to_string()),
            Some("LawsResponse".to_string()),
            Some("LawRevisionsResponse".to_string()),
        ]
    );
}

#[test]
fn query_parameters_resolve() {
    let spec = fixture();
    let (path, _, keyword) = spec
        .operations()
        .find(|(_, _, op)| op.method_name() == "GetKeyword")
        .expect("keyword operation");

    let resolved: Vec<(String, String)> = spec
        .effective_parameters(path, keyword)
        .iter()
        .filter(|p| p.is_query())
        .map(|p| {
            let ty = p.schema.as_ref().map(resolve).unwrap_or(RustType::Value);
            (p.name.clone(), ty.to_string())
        })
        .collect();

    assert_eq!(
        resolved,
        vec![
            ("keyword".to_string(), "String".to_string()),
            ("law_num_era".to_string(), "LawNumEra".to_string()),
            ("law_type".to_string(), "Vec<LawType>".to_string()),
            ("asof".to_string(), "Date".to_string()),
            ("limit".to_string(), "i32".to_string()),
        ]
    );
}

#[test]
fn all_of_component_resolves_to_first_reference() {
    let spec = fixture();
    let composed = &spec.components.schemas["law_data_response"];
    assert_eq!(resolve(composed), RustType::Named(ref_type_name("law_item")));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn truncated_fixture_fails_to_parse() {
    let truncated = &FIXTURE[..FIXTURE.len() / 3];
    // cutting mid-document leaves either a structural mismatch or bad syntax
    let result = Specification::parse(format!("{truncated}\n  - [").as_bytes());
    assert!(matches!(result, Err(ParseError::Yaml(_))));
}
