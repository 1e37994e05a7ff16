//! Integration tests for the types artifact.
//!
//! Generates `types.rs` from the law API fixture and checks that every
//! component schema becomes exactly one named item.

use std::collections::BTreeSet;

use lawgen::codegen::{Generator, format_generated_code};
use lawgen::config::GeneratorConfig;
use lawgen_openapi::Specification;
use lawgen_openapi::naming::pascal_case;

const FIXTURE: &str = include_str!("../../openapi/tests/fixtures/lawapi-mini.yaml");

fn fixture() -> Specification {
    Specification::parse(FIXTURE.as_bytes()).expect("fixture should parse")
}

fn generate_types(spec: &Specification) -> (syn::File, String) {
    let config = GeneratorConfig::default();
    let tokens = Generator::new(spec, &config).types_tokens();
    let file = syn::parse2::<syn::File>(tokens.clone()).expect("types artifact should be valid");
    let code = format_generated_code(&tokens).expect("types artifact should format");
    (file, code)
}

/// Names of the top-level type items (structs, enums, aliases).
fn type_item_names(file: &syn::File) -> Vec<String> {
    file.items
        .iter()
        .filter_map(|item| match item {
            syn::Item::Struct(s) => Some(s.ident.to_string()),
            syn::Item::Enum(e) => Some(e.ident.to_string()),
            syn::Item::Type(t) => Some(t.ident.to_string()),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Round trip: one named item per component
// ============================================================================

#[test]
fn every_component_becomes_exactly_one_named_item() {
    let spec = fixture();
    let (file, _) = generate_types(&spec);

    let names = type_item_names(&file);
    let unique: BTreeSet<&String> = names.iter().collect();
    assert_eq!(names.len(), unique.len(), "duplicate items: {names:?}");

    let expected: BTreeSet<String> = spec
        .components
        .schemas
        .keys()
        .map(|name| pascal_case(name))
        .collect();
    let actual: BTreeSet<String> = names.into_iter().collect();
    assert_eq!(actual, expected);
}

#[test]
fn items_follow_sorted_component_order() {
    let spec = fixture();
    let (file, _) = generate_types(&spec);

    let names = type_item_names(&file);
    let expected: Vec<String> = spec
        .sorted_schema_names()
        .into_iter()
        .map(pascal_case)
        .collect();
    assert_eq!(names, expected);
}

#[test]
fn generation_is_deterministic() {
    let spec = fixture();
    let (_, first) = generate_types(&spec);
    let (_, second) = generate_types(&spec);
    assert_eq!(first, second);
}

// ============================================================================
// Shapes
// ============================================================================

#[test]
fn object_schemas_become_structs() {
    let (_, code) = generate_types(&fixture());

    assert!(code.contains("pub struct LawInfo {"));
    assert!(code.contains("pub law_id: String,"));
    assert!(code.contains("pub law_type: Option<LawType>,"));
    assert!(code.contains("pub promulgation_date: Option<Date>,"));
    assert!(code.contains("pub laws: Vec<LawItem>,"));
}

#[test]
fn recursive_struct_is_boxed() {
    let (_, code) = generate_types(&fixture());

    assert!(code.contains("pub parent: Option<Box<Elm>>,"));
    assert!(code.contains("pub children: Option<Vec<Elm>>,"));
}

#[test]
fn all_of_flattens_the_base() {
    let (_, code) = generate_types(&fixture());

    assert!(code.contains("pub struct LawDataResponse {"));
    assert!(code.contains("#[serde(flatten)]"));
    assert!(code.contains("pub law_item: LawItem,"));
    assert!(code.contains("pub law_full_text: Option<Elm>,"));
}

#[test]
fn string_enums_keep_wire_values() {
    let (_, code) = generate_types(&fixture());

    assert!(code.contains("pub enum CategoryCd {"));
    assert!(code.contains("#[serde(rename = \"001\")]"));
    assert!(code.contains("V001,"));
    assert!(code.contains("pub enum LawNumEra {"));
    assert!(code.contains("Reiwa,"));
}

#[test]
fn integer_enum_becomes_alias_with_constants() {
    let (_, code) = generate_types(&fixture());

    assert!(code.contains("pub type Mission = i64;"));
    assert!(code.contains("pub const MISSION_1: Mission = 1"));
    assert!(code.contains("pub const MISSION_2: Mission = 2"));
}

#[test]
fn inline_property_enum_gets_constants() {
    let (_, code) = generate_types(&fixture());

    assert!(code.contains("pub repeal_status: Option<String>,"));
    assert!(code.contains("pub const REPEAL_STATUS_REPEAL: &'static str = \"Repeal\";"));
}

#[test]
fn primitives_and_unions_become_aliases() {
    let (_, code) = generate_types(&fixture());

    assert!(code.contains("pub type Date = chrono::NaiveDate;"));
    assert!(code.contains("pub type SentenceText = serde_json::Value;"));
    assert!(code.contains("pub updated: Option<chrono::DateTime<chrono::Utc>>,"));
}
