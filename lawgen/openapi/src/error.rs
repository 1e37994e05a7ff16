//! Error types for OpenAPI document parsing.

use thiserror::Error;

/// Errors that can occur while parsing an OpenAPI document.
///
/// Parsing is all-or-nothing: any of these means no [`Specification`]
/// was produced.
///
/// [`Specification`]: crate::Specification
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input contained no document at all.
    #[error("OpenAPI document is empty")]
    Empty,

    /// Malformed YAML/JSON, or a field whose content does not match the
    /// expected shape (e.g. `required: "yes"` on a parameter).
    #[error("Failed to parse OpenAPI document: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_error_message() {
        assert_eq!(ParseError::Empty.to_string(), "OpenAPI document is empty");
    }

    #[test]
    fn yaml_error_carries_cause() {
        let source = serde_yaml::from_str::<Vec<String>>("{not: [a list").unwrap_err();
        let err: ParseError = source.into();
        let message = err.to_string();
        assert!(message.starts_with("Failed to parse OpenAPI document:"));
        assert!(message.len() > "Failed to parse OpenAPI document:".len());
    }
}
