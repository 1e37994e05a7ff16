//! Schema objects.
//!
//! A [`Schema`] is the recursive type descriptor used by parameters, request
//! and response bodies, and the reusable `components.schemas` table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The primitive `type` keyword of an OpenAPI 3.0 schema.
///
/// ```
/// use std::str::FromStr;
/// use lawgen_openapi::PrimitiveType;
///
/// assert_eq!(PrimitiveType::from_str("integer").unwrap(), PrimitiveType::Integer);
/// assert_eq!(PrimitiveType::Array.to_string(), "array");
/// assert!(PrimitiveType::from_str("file").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum PrimitiveType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

/// The closed tag that decides how a schema is turned into a type.
///
/// Returned by [`Schema::kind`]. Exactly one tag applies, checked in the
/// order the variants are declared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaKind<'a> {
    /// A `$ref` pointer to a named component.
    Ref(&'a str),
    /// An `allOf` composition.
    AllOf(&'a [Schema]),
    /// A `oneOf` union.
    OneOf(&'a [Schema]),
    /// An `anyOf` union.
    AnyOf(&'a [Schema]),
    /// A recognised primitive `type`.
    Primitive(PrimitiveType),
    /// No `type`, or one this model does not recognise.
    Untyped,
}

/// A schema object.
///
/// Parsing is purely structural: `$ref` targets are not resolved, enum values
/// are not checked against `type` and `required` is not checked against
/// `properties`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Primitive `type` keyword, kept as written.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Literal values of an `enum` keyword.
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// `$ref` pointer, e.g. `#/components/schemas/LawInfo`.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<Schema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<Schema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<Schema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

impl Schema {
    /// Creates a schema with only a `type` keyword.
    pub fn of_type(schema_type: PrimitiveType) -> Self {
        Self {
            schema_type: Some(schema_type.to_string()),
            ..Default::default()
        }
    }

    /// Creates a schema with a `type` and `format`.
    pub fn with_format(schema_type: PrimitiveType, format: impl Into<String>) -> Self {
        Self {
            format: Some(format.into()),
            ..Self::of_type(schema_type)
        }
    }

    /// Creates a `$ref` schema.
    ///
    /// ```
    /// use lawgen_openapi::Schema;
    ///
    /// let schema = Schema::reference_to("#/components/schemas/LawInfo");
    /// assert_eq!(schema.reference(), Some("#/components/schemas/LawInfo"));
    /// ```
    pub fn reference_to(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            ..Default::default()
        }
    }

    /// Creates an `array` schema with the given item schema.
    pub fn array_of(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of_type(PrimitiveType::Array)
        }
    }

    /// The `$ref` pointer, treating an empty string as absent.
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref().filter(|r| !r.is_empty())
    }

    /// The recognised primitive `type`, if any.
    pub fn primitive(&self) -> Option<PrimitiveType> {
        self.schema_type.as_deref().and_then(|t| t.parse().ok())
    }

    /// The `format` keyword, treating an empty string as absent.
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref().filter(|f| !f.is_empty())
    }

    /// Returns the tag that decides how this schema is typed.
    ///
    /// ```
    /// use lawgen_openapi::{PrimitiveType, Schema, SchemaKind};
    ///
    /// let schema = Schema::of_type(PrimitiveType::Boolean);
    /// assert_eq!(schema.kind(), SchemaKind::Primitive(PrimitiveType::Boolean));
    /// assert_eq!(Schema::default().kind(), SchemaKind::Untyped);
    /// ```
    pub fn kind(&self) -> SchemaKind<'_> {
        if let Some(reference) = self.reference() {
            SchemaKind::Ref(reference)
        } else if !self.all_of.is_empty() {
            SchemaKind::AllOf(&self.all_of)
        } else if !self.one_of.is_empty() {
            SchemaKind::OneOf(&self.one_of)
        } else if !self.any_of.is_empty() {
            SchemaKind::AnyOf(&self.any_of)
        } else if let Some(primitive) = self.primitive() {
            SchemaKind::Primitive(primitive)
        } else {
            SchemaKind::Untyped
        }
    }

    /// Whether `field_name` is listed in `required`.
    ///
    /// ```
    /// use lawgen_openapi::Schema;
    ///
    /// let schema = Schema {
    ///     required: vec!["law_id".to_string()],
    ///     ..Default::default()
    /// };
    /// assert!(schema.is_required("law_id"));
    /// assert!(!schema.is_required("law_num"));
    /// ```
    pub fn is_required(&self, field_name: &str) -> bool {
        self.required.iter().any(|name| name == field_name)
    }

    /// Whether this is a string schema whose `enum` has at least one scalar
    /// value.
    ///
    /// ```
    /// use lawgen_openapi::Schema;
    ///
    /// let schema: Schema = serde_yaml::from_str("type: string\nenum: [null]").unwrap();
    /// assert!(!schema.is_string_enum());
    /// ```
    pub fn is_string_enum(&self) -> bool {
        self.primitive() == Some(PrimitiveType::String)
            && self
                .enum_values
                .iter()
                .any(|v| !(v.is_null() || v.is_array() || v.is_object()))
    }
}
