//! The OpenAPI document model.
//!
//! Every mapping in the document is a [`BTreeMap`], so anything that walks
//! the model sees keys in lexicographic order and the generated output is
//! stable between runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::ParseError;
use crate::naming::pascal_case;
use crate::schema::Schema;

/// Method name used for every operation that has no `operationId`.
pub const UNKNOWN_OPERATION: &str = "UnknownOperation";

/// HTTP verbs a [`PathItem`] can carry.
///
/// ```
/// use lawgen_openapi::HttpMethod;
/// use strum::IntoEnumIterator;
///
/// assert_eq!(HttpMethod::Get.to_string(), "GET");
/// assert_eq!(HttpMethod::iter().count(), 4);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// Where a parameter is sent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Path,
    Header,
    Cookie,
    /// Any other `in` value; such parameters are never emitted.
    #[serde(other)]
    Other,
}

/// A parsed OpenAPI 3.0 document.
///
/// Built once by [`Specification::parse`] and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Specification {
    /// The `openapi` version string, e.g. `3.0.3`.
    #[serde(default)]
    pub openapi: String,
    #[serde(default)]
    pub info: Info,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    /// URL path template to path item.
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,
    #[serde(default)]
    pub components: Components,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The operations available on one URL path template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// Parameters shared by every operation on this path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
}

impl PathItem {
    /// The operation registered for `method`, if any.
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
        }
    }

    /// Present operations in verb order (GET, POST, PUT, DELETE).
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        HttpMethod::iter().filter_map(|method| self.operation(method).map(|op| (method, op)))
    }
}

/// One callable endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Status code (or pattern such as `2XX`) to response.
    #[serde(default)]
    pub responses: BTreeMap<String, Response>,
    #[serde(default)]
    pub deprecated: bool,
}

impl Operation {
    /// The PascalCase method name derived from `operationId`.
    ///
    /// `-` is replaced by `_` before conversion. Operations without an id all
    /// share [`UNKNOWN_OPERATION`].
    ///
    /// ```
    /// use lawgen_openapi::Operation;
    ///
    /// let op = Operation {
    ///     operation_id: Some("get-law-data".to_string()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(op.method_name(), "GetLawData");
    /// assert_eq!(Operation::default().method_name(), "UnknownOperation");
    /// ```
    pub fn method_name(&self) -> String {
        match self.operation_id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => pascal_case(&id.replace('-', "_")),
            None => UNKNOWN_OPERATION.to_string(),
        }
    }

    /// The first response whose status key starts with `2`.
    ///
    /// Keys are visited in lexicographic order, so `200` wins over `201` and
    /// `2XX`.
    pub fn success_response(&self) -> Option<(&str, &Response)> {
        self.responses
            .iter()
            .find(|(code, _)| code.starts_with('2'))
            .map(|(code, response)| (code.as_str(), response))
    }
}

/// A single operation parameter.
///
/// `name` is both the generated field name source and the verbatim wire key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ParameterLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    /// `$ref` to `#/components/parameters/<name>`.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Parameter {
    /// Creates a parameter with the given location and schema.
    pub fn new(name: impl Into<String>, location: ParameterLocation, schema: Schema) -> Self {
        Self {
            name: name.into(),
            location: Some(location),
            required: location == ParameterLocation::Path,
            schema: Some(schema),
            ..Default::default()
        }
    }

    /// The `$ref` pointer, treating an empty string as absent.
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref().filter(|r| !r.is_empty())
    }

    pub fn is_query(&self) -> bool {
        self.location == Some(ParameterLocation::Query)
    }

    pub fn is_path(&self) -> bool {
        self.location == Some(ParameterLocation::Path)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,
}

impl RequestBody {
    /// The schema of the first JSON media type, if any.
    pub fn json_schema(&self) -> Option<&Schema> {
        json_schema(&self.content)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub content: BTreeMap<String, MediaType>,
}

impl Response {
    /// The schema of the first JSON media type, if any.
    ///
    /// `None` means the body should be treated as raw bytes.
    pub fn json_schema(&self) -> Option<&Schema> {
        json_schema(&self.content)
    }
}

fn json_schema(content: &BTreeMap<String, MediaType>) -> Option<&Schema> {
    content
        .iter()
        .filter(|(media_type, _)| media_type.contains("json"))
        .find_map(|(_, media)| media.schema.as_ref())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// Reusable definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    /// Schema name to schema: the only source of named types.
    #[serde(default)]
    pub schemas: BTreeMap<String, Schema>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, Parameter>,
}

impl Specification {
    /// Parses a YAML (or JSON) OpenAPI document.
    ///
    /// The parse is structural only; references are left for the generator
    /// to resolve.
    ///
    /// ## Errors
    ///
    /// Returns [`ParseError::Empty`] for blank input and [`ParseError::Yaml`]
    /// for malformed syntax or mismatched field types.
    ///
    /// ## Examples
    ///
    /// ```
    /// use lawgen_openapi::Specification;
    ///
    /// let spec = Specification::parse(br#"
    /// openapi: 3.0.3
    /// info: { title: Law API, version: "2" }
    /// servers: [{ url: "https://laws.e-gov.go.jp/api/2" }]
    /// paths: {}
    /// "#).unwrap();
    /// assert_eq!(spec.base_url(), Some("https://laws.e-gov.go.jp/api/2"));
    /// ```
    pub fn parse(bytes: &[u8]) -> Result<Self, ParseError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ParseError::Empty);
        }

        let spec: Specification = serde_yaml::from_slice(bytes)?;

        if !spec.openapi.starts_with("3.0") {
            tracing::warn!(
                version = %spec.openapi,
                "Only OpenAPI 3.0 documents are supported; generating anyway"
            );
        }
        tracing::debug!(
            paths = spec.paths.len(),
            schemas = spec.components.schemas.len(),
            "Parsed OpenAPI document"
        );

        Ok(spec)
    }

    /// The first server URL.
    pub fn base_url(&self) -> Option<&str> {
        self.servers.first().map(|server| server.url.as_str())
    }

    /// Path templates in lexicographic order.
    pub fn sorted_paths(&self) -> Vec<&str> {
        self.paths.keys().map(String::as_str).collect()
    }

    /// Component schema names in lexicographic order.
    pub fn sorted_schema_names(&self) -> Vec<&str> {
        self.components.schemas.keys().map(String::as_str).collect()
    }

    /// Every operation as `(path, method, operation)`, ordered by path and
    /// then by verb.
    pub fn operations(&self) -> impl Iterator<Item = (&str, HttpMethod, &Operation)> {
        self.paths.iter().flat_map(|(path, item)| {
            item.operations()
                .map(move |(method, op)| (path.as_str(), method, op))
        })
    }

    /// Looks up a component parameter by its `$ref` pointer.
    pub fn component_parameter(&self, reference: &str) -> Option<&Parameter> {
        let name = reference.rsplit('/').next().unwrap_or(reference);
        self.components.parameters.get(name)
    }

    /// The effective parameters of an operation.
    ///
    /// Path-level parameters come first unless the operation overrides the
    /// same `(name, in)` pair. Parameter `$ref`s are resolved against
    /// `components.parameters`; unresolvable ones are dropped with a warning.
    pub fn effective_parameters(&self, path: &str, operation: &Operation) -> Vec<Parameter> {
        let resolve = |param: &Parameter| -> Option<Parameter> {
            match param.reference() {
                Some(reference) => {
                    let found = self.component_parameter(reference).cloned();
                    if found.is_none() {
                        tracing::warn!(reference, "Unresolved parameter reference");
                    }
                    found
                }
                None => Some(param.clone()),
            }
        };

        let own: Vec<Parameter> = operation.parameters.iter().filter_map(resolve).collect();
        let inherited = self
            .paths
            .get(path)
            .map(|item| item.parameters.iter().filter_map(resolve).collect::<Vec<_>>())
            .unwrap_or_default();

        let mut merged: Vec<Parameter> = inherited
            .into_iter()
            .filter(|shared| {
                !own.iter()
                    .any(|p| p.name == shared.name && p.location == shared.location)
            })
            .collect();
        merged.extend(own);
        merged
    }
}
