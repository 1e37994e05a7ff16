//! Runtime support types for the client artifact.
//!
//! Generates the `ApiError` enum returned by every client method and the
//! `QueryParams` collection used to build query strings.

use proc_macro2::TokenStream;
use quote::quote;

/// Generates the `ApiError` enum for runtime errors.
///
/// The `Api` variant carries the response body verbatim, so a `404` with a
/// plain-text body surfaces that text to the caller.
///
/// ## Generated Code
///
/// ```ignore
/// #[derive(Debug, thiserror::Error)]
/// pub enum ApiError {
///     #[error("HTTP request failed: {0}")]
///     Http(#[from] reqwest::Error),
///     #[error("JSON deserialization failed: {0}")]
///     Json(#[from] serde_json::Error),
///     #[error("API error {status}: {body}")]
///     Api { status: u16, body: String },
/// }
/// ```
pub fn generate_error_type() -> TokenStream {
    quote! {
        /// Errors that can occur when calling the API.
        #[derive(Debug, thiserror::Error)]
        pub enum ApiError {
            /// HTTP request failed (network error, timeout, etc.).
            #[error("HTTP request failed: {0}")]
            Http(#[from] reqwest::Error),

            /// Failed to serialize a query value or deserialize a response.
            #[error("JSON deserialization failed: {0}")]
            Json(#[from] serde_json::Error),

            /// The API answered with a status code of 400 or above.
            #[error("API error {status}: {body}")]
            Api {
                /// HTTP status code from the response.
                status: u16,
                /// Response body text, unmodified.
                body: String,
            },
        }
    }
}

/// Generates the `QueryParams` ordered key/value collection.
///
/// `set` replaces every earlier value of a key in place, `add` appends, and
/// `encode` produces `application/x-www-form-urlencoded` output in insertion
/// order (or `None` when nothing was set).
pub fn generate_query_params_type() -> TokenStream {
    quote! {
        /// Ordered query string parameters.
        ///
        /// Keys may repeat; sequence values are sent as one pair per item.
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct QueryParams {
            pairs: Vec<(String, String)>,
        }

        impl QueryParams {
            /// Creates an empty collection.
            pub fn new() -> Self {
                Self::default()
            }

            /// Sets `key` to a single value, replacing any earlier values.
            pub fn set(&mut self, key: &str, value: impl Into<String>) {
                let value = value.into();
                match self.pairs.iter().position(|(k, _)| k == key) {
                    Some(first) => {
                        self.pairs[first].1 = value;
                        let mut index = 0;
                        self.pairs.retain(|(k, _)| {
                            let keep = index == first || k != key;
                            index += 1;
                            keep
                        });
                    }
                    None => self.pairs.push((key.to_string(), value)),
                }
            }

            /// Appends a value for `key`, keeping earlier ones.
            pub fn add(&mut self, key: &str, value: impl Into<String>) {
                self.pairs.push((key.to_string(), value.into()));
            }

            /// The pairs in insertion order.
            pub fn pairs(&self) -> &[(String, String)] {
                &self.pairs
            }

            pub fn is_empty(&self) -> bool {
                self.pairs.is_empty()
            }

            /// Encodes the pairs as a query string without the leading `?`.
            ///
            /// Returns `None` when there is nothing to send.
            pub fn encode(&self) -> Option<String> {
                if self.pairs.is_empty() {
                    return None;
                }
                Some(
                    url::form_urlencoded::Serializer::new(String::new())
                        .extend_pairs(&self.pairs)
                        .finish(),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::validate_generated_code;
    use crate::test_utils::render;

    #[test]
    fn generate_error_type_produces_valid_syntax() {
        let tokens = generate_error_type();
        assert!(
            validate_generated_code(&tokens).is_ok(),
            "Generated error type should be syntactically valid"
        );
    }

    #[test]
    fn generate_error_type_contains_all_variants() {
        let code = render(&generate_error_type());

        assert!(code.contains("pub enum ApiError"));
        assert!(code.contains("Http(#[from] reqwest::Error)"), "Missing Http variant");
        assert!(code.contains("Json(#[from] serde_json::Error)"), "Missing Json variant");
        assert!(code.contains("Api {"), "Missing Api variant");
        assert!(code.contains("status: u16"));
        assert!(code.contains("body: String"));
    }

    #[test]
    fn api_error_message_includes_status_and_body() {
        let code = render(&generate_error_type());
        assert!(code.contains("#[error(\"API error {status}: {body}\")]"));
    }

    #[test]
    fn query_params_has_builder_methods() {
        let code = render(&generate_query_params_type());

        assert!(code.contains("pub struct QueryParams"));
        assert!(code.contains("pairs: Vec<(String, String)>"));
        assert!(code.contains("pub fn set(&mut self, key: &str, value: impl Into<String>)"));
        assert!(code.contains("pub fn add(&mut self, key: &str, value: impl Into<String>)"));
        assert!(code.contains("pub fn pairs(&self) -> &[(String, String)]"));
        assert!(code.contains("pub fn is_empty(&self) -> bool"));
        assert!(code.contains("pub fn encode(&self) -> Option<String>"));
    }

    #[test]
    fn query_params_encodes_with_form_urlencoded() {
        let code = render(&generate_query_params_type());
        assert!(code.contains("url::form_urlencoded::Serializer::new(String::new())"));
        assert!(code.contains(".extend_pairs(&self.pairs)"));
    }
}
