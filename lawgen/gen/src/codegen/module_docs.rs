//! Module documentation generation for the generated artifacts.
//!
//! This module provides the [`ModuleDocBuilder`] struct, which builds the
//! `//!` documentation at the top of both `types.rs` and `client.rs`. The
//! client documentation includes an introduction, a feature list and a usage
//! example.

use std::collections::BTreeMap;

use lawgen_openapi::{HttpMethod, Specification};
use proc_macro2::TokenStream;
use quote::quote;

use crate::codegen::client::plan_operations;
use crate::config::GeneratorConfig;

/// Builds module-level documentation for the generated artifacts.
///
/// The client documentation has these sections:
/// - Introduction paragraph with the API title, version and description
/// - Features section listing methods grouped by HTTP method
/// - Example section with a basic usage example
///
/// ## Examples
///
/// ```
/// use lawgen::codegen::ModuleDocBuilder;
/// use lawgen::config::GeneratorConfig;
/// use lawgen_openapi::Specification;
///
/// let spec = Specification::default();
/// let config = GeneratorConfig::default();
/// let tokens = ModuleDocBuilder::new(&spec, &config).build_client();
/// assert!(tokens.to_string().contains("Example"));
/// ```
pub struct ModuleDocBuilder<'a> {
    spec: &'a Specification,
    config: &'a GeneratorConfig,
}

impl<'a> ModuleDocBuilder<'a> {
    /// Creates a new module documentation builder for the given document.
    pub fn new(spec: &'a Specification, config: &'a GeneratorConfig) -> Self {
        Self { spec, config }
    }

    /// Builds the documentation of the types artifact.
    pub fn build_types(&self) -> TokenStream {
        let mut sections = vec![
            format!("Data types for {}.", self.api_label()),
            "One item per schema in `components.schemas`.".to_string(),
        ];
        sections.extend(self.description_paragraph());
        inner_doc_lines(&sections.join("\n\n"))
    }

    /// Builds the documentation of the client artifact.
    ///
    /// The generated tokens are one `#![doc = "..."]` attribute per line, so
    /// they must come first in the file.
    pub fn build_client(&self) -> TokenStream {
        let mut sections = vec![format!("Blocking HTTP client for {}.", self.api_label())];
        sections.extend(self.description_paragraph());
        sections.push(self.features_section());
        sections.push(self.example_section());
        inner_doc_lines(&sections.join("\n\n"))
    }

    /// `the <title> (version <v>)`, or a generic label for untitled documents.
    fn api_label(&self) -> String {
        let info = &self.spec.info;
        match (info.title.trim(), info.version.trim()) {
            ("", _) => "the API".to_string(),
            (title, "") => format!("the {title}"),
            (title, version) => format!("the {title} (version {version})"),
        }
    }

    fn description_paragraph(&self) -> Option<String> {
        let description = self.spec.info.description.as_deref()?.trim();
        (!description.is_empty()).then(|| description.to_string())
    }

    /// Groups method names by HTTP verb.
    fn categorize_operations(&self) -> BTreeMap<HttpMethod, Vec<(String, String)>> {
        let mut categories: BTreeMap<HttpMethod, Vec<(String, String)>> = BTreeMap::new();
        for op in plan_operations(self.spec) {
            let summary = op
                .operation
                .summary
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(op.path)
                .to_string();
            categories
                .entry(op.method)
                .or_default()
                .push((op.fn_name(), summary));
        }
        categories
    }

    /// Lists every generated method grouped by HTTP verb.
    fn features_section(&self) -> String {
        let categories = self.categorize_operations();
        if categories.is_empty() {
            return "## Features\n\nNo operations defined.".to_string();
        }

        let mut lines = vec!["## Features".to_string()];
        for (method, operations) in &categories {
            lines.push(String::new());
            lines.push(format!("**{method}**:"));
            for (name, summary) in operations {
                lines.push(format!("- `{name}` - {summary}"));
            }
        }
        lines.join("\n")
    }

    /// Usage example built around the first GET operation, or the first
    /// operation if there is no GET.
    fn example_section(&self) -> String {
        let crate_name = self.config.crate_ident();
        let client = &self.config.client_name;

        let operations = plan_operations(self.spec);
        let Some(op) = operations
            .iter()
            .find(|op| op.method == HttpMethod::Get)
            .or_else(|| operations.first())
        else {
            return format!(
                "## Example\n\n```ignore\nuse {crate_name}::client::{client};\n\nlet client = {client}::new()?;\n```"
            );
        };

        let args = if op.parameters.is_empty() && !op.path.contains('{') {
            ""
        } else {
            "/* ... */"
        };
        let method = op.fn_name();

        format!(
            r#"## Example

```ignore
use {crate_name}::client::{{ApiError, {client}}};

fn main() -> Result<(), ApiError> {{
    let client = {client}::new()?;
    let response = client.{method}({args})?;
    println!("{{response:?}}");
    Ok(())
}}
```"#
        )
    }
}

/// One inner `#![doc]` attribute per line of `text`.
fn inner_doc_lines(text: &str) -> TokenStream {
    let lines = text.lines().map(|line| {
        let line = line.trim_end();
        if line.is_empty() {
            String::new()
        } else {
            format!(" {line}")
        }
    });
    quote! { #(#![doc = #lines])* }
}
