//! Error types for the lawgen generator.

use thiserror::Error;

/// Errors that can occur during code generation.
///
/// Every variant is fatal: nothing is written once one of these is returned.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Failed to read the input document
    #[error("Failed to read input file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the OpenAPI document
    #[error(transparent)]
    ParseError(#[from] lawgen_openapi::ParseError),

    /// Failed to generate code
    #[error("Code generation failed: {0}")]
    CodeGenError(String),

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}
