//! Integration tests for the client artifact.
//!
//! These tests verify that the generated client code:
//! - Names methods after their operation ids
//! - Sends query parameters with their declared names, repeating keys for
//!   sequences
//! - Surfaces error response bodies verbatim
//! - Formats path templates in template order

use lawgen::codegen::{Generator, format_generated_code};
use lawgen::config::GeneratorConfig;
use lawgen_openapi::Specification;

const FIXTURE: &str = include_str!("../../openapi/tests/fixtures/lawapi-mini.yaml");

fn client_code(config: &GeneratorConfig) -> String {
    let spec = Specification::parse(FIXTURE.as_bytes()).expect("fixture should parse");
    let tokens = Generator::new(&spec, config).client_tokens();
    format_generated_code(&tokens).expect("client artifact should be valid")
}

fn default_client_code() -> String {
    client_code(&GeneratorConfig::default())
}

/// The source of one generated method, from its signature to the next method.
fn method_body<'a>(code: &'a str, name: &str) -> &'a str {
    let start = code
        .find(&format!("pub fn {name}("))
        .unwrap_or_else(|| panic!("method {name} not found"));
    let rest = &code[start..];
    let end = rest[1..].find("pub fn ").map_or(rest.len(), |i| i + 1);
    &rest[..end]
}

// ============================================================================
// Method naming
// ============================================================================

#[test]
fn operation_ids_become_snake_case_methods() {
    let code = default_client_code();

    for name in [
        "get_attachment",
        "get_keyword",
        "get_law_data",
        "get_laws",
        "get_revisions",
    ] {
        assert!(code.contains(&format!("pub fn {name}(")), "missing {name}");
    }
}

#[test]
fn params_structs_only_for_operations_with_query_parameters() {
    let code = default_client_code();

    assert!(code.contains("pub struct GetKeywordParams"));
    assert!(code.contains("pub struct GetLawDataParams"));
    assert!(code.contains("pub struct GetLawsParams"));
    assert!(code.contains("pub struct GetAttachmentParams"));
    assert!(!code.contains("GetRevisionsParams"));
}

#[test]
fn deprecated_operation_is_marked() {
    let code = default_client_code();
    let revisions = code.find("pub fn get_revisions(").expect("get_revisions");
    let deprecated = code[..revisions].rfind("#[deprecated]").expect("#[deprecated]");
    assert!(code[deprecated..revisions].lines().count() <= 2);
}

// ============================================================================
// Query strings
// ============================================================================

#[test]
fn sequences_repeat_the_key_in_order() {
    let code = default_client_code();

    assert!(code.contains("pub category_cd: Option<Vec<CategoryCd>>"));
    assert!(code.contains("query.add(\"category_cd\", item.as_str());"));
    assert!(code.contains("query.add(\"law_type\", item.as_str());"));
}

#[test]
fn required_query_parameter_is_not_optional() {
    let code = default_client_code();

    assert!(code.contains("pub keyword: String,"));
    assert!(code.contains("pub limit: Option<i32>,"));
    assert!(code.contains("pub asof: Option<Date>,"));
}

#[test]
fn date_time_query_values_use_rfc3339() {
    let code = default_client_code();

    assert!(code.contains("pub updated: Option<chrono::DateTime<chrono::Utc>>,"));
    assert!(code.contains("query.set(\"updated\", value.to_rfc3339());"));
}

#[test]
fn query_string_is_form_urlencoded() {
    let code = default_client_code();

    assert!(code.contains("url::form_urlencoded::Serializer::new(String::new())"));
    assert!(code.contains("if let Some(query) = params.to_query()?.encode()"));
}

// ============================================================================
// Responses
// ============================================================================

#[test]
fn error_statuses_surface_the_body() {
    let code = default_client_code();
    let attachment = method_body(&code, "get_attachment");

    assert!(attachment.contains("if status >= 400"));
    assert!(attachment.contains("let body = response.text().unwrap_or_default();"));
    assert!(attachment.contains("return Err(ApiError::Api { status, body });"));
}

#[test]
fn binary_response_returns_bytes() {
    let code = default_client_code();
    let attachment = method_body(&code, "get_attachment");

    assert!(attachment.contains("Result<Vec<u8>, ApiError>"));
    assert!(attachment.contains("Ok(bytes.to_vec())"));
}

#[test]
fn json_response_is_decoded_into_component() {
    let code = default_client_code();
    let law_data = method_body(&code, "get_law_data");

    assert!(law_data.contains("Result<LawDataResponse, ApiError>"));
    assert!(law_data.contains("Ok(serde_json::from_slice(&bytes)?)"));
}

// ============================================================================
// Paths and configuration
// ============================================================================

#[test]
fn path_parameters_are_formatted_into_the_url() {
    let code = default_client_code();
    let law_data = method_body(&code, "get_law_data");

    assert!(law_data.contains("law_id_or_num_or_revision_id: &str"));
    assert!(law_data.contains("\"{}/law_data/{}\""));
    assert!(law_data.contains("self.base_url"));
}

#[test]
fn base_url_and_timeout_come_from_document_and_config() {
    let config = GeneratorConfig {
        client_name: "LawClient".to_string(),
        timeout_secs: 10,
        ..Default::default()
    };
    let code = client_code(&config);

    assert!(code.contains("pub struct LawClient"));
    assert!(code.contains("\"https://laws.e-gov.go.jp/api/2\""));

    let spec = Specification::parse(FIXTURE.as_bytes()).expect("fixture should parse");
    let tokens: String = Generator::new(&spec, &config)
        .client_tokens()
        .to_string()
        .split_whitespace()
        .collect();
    assert!(tokens.contains("std::time::Duration::from_secs(10)"));
}

#[test]
fn module_docs_describe_the_api() {
    let code = default_client_code();

    assert!(code.starts_with("//! Blocking HTTP client for the Japan Law API (version 2.0.0)."));
    assert!(code.contains("//! Law data published by e-Gov."));
    assert!(code.contains("//! - `get_laws` - List laws"));
    assert!(code.contains("client.get_attachment(/* ... */)?;"));
}
