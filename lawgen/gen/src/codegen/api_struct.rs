//! Client struct generation.
//!
//! Generates the blocking client entry point with its default base URL,
//! the default timeout and the constructors.

use lawgen_openapi::Specification;
use lawgen_openapi::naming::ident;
use proc_macro2::{Literal, TokenStream};
use quote::quote;

use crate::config::GeneratorConfig;

/// Generates the client struct for the given document.
///
/// Creates a struct with:
/// - `DEFAULT_BASE_URL` holding the first server URL (empty when the
///   document declares no servers)
/// - `DEFAULT_TIMEOUT` set from the configuration
/// - `new()` and `with_base_url()` constructors, which are fallible because
///   building the transport is
/// - `with_http_client()` to swap in a preconfigured transport
/// - a `base_url()` accessor
///
/// ## Examples
///
/// ```ignore
/// // Generated code:
/// #[derive(Debug, Clone)]
/// pub struct Client {
///     base_url: String,
///     http: reqwest::blocking::Client,
/// }
///
/// impl Client {
///     pub const DEFAULT_BASE_URL: &'static str = "https://laws.e-gov.go.jp/api/2";
///     pub const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);
///
///     pub fn new() -> Result<Self, ApiError> {
///         Self::with_base_url(Self::DEFAULT_BASE_URL)
///     }
///     // ...
/// }
/// ```
pub fn generate_client_struct(spec: &Specification, config: &GeneratorConfig) -> TokenStream {
    let struct_name = ident(&config.client_name);
    let base_url = spec.base_url().unwrap_or_default();
    let timeout_secs = Literal::u64_unsuffixed(config.timeout_secs);
    let description = if spec.info.title.is_empty() {
        " Blocking API client.".to_string()
    } else {
        format!(" Blocking client for the {}.", spec.info.title)
    };

    quote! {
        #[doc = #description]
        #[derive(Debug, Clone)]
        pub struct #struct_name {
            base_url: String,
            http: reqwest::blocking::Client,
        }

        impl #struct_name {
            /// Base URL of the first server in the document.
            pub const DEFAULT_BASE_URL: &'static str = #base_url;

            /// Timeout applied to every request made by the default transport.
            pub const DEFAULT_TIMEOUT: std::time::Duration =
                std::time::Duration::from_secs(#timeout_secs);

            /// Creates a client for [`Self::DEFAULT_BASE_URL`].
            ///
            /// ## Errors
            ///
            /// Returns [`ApiError::Http`] if the HTTP transport cannot be built.
            pub fn new() -> Result<Self, ApiError> {
                Self::with_base_url(Self::DEFAULT_BASE_URL)
            }

            /// Creates a client for a custom base URL.
            ///
            /// A trailing `/` is removed so paths can be appended verbatim.
            ///
            /// ## Errors
            ///
            /// Returns [`ApiError::Http`] if the HTTP transport cannot be built.
            ///
            /// ## Examples
            ///
            /// ```ignore
            /// let client = Client::with_base_url("http://localhost:8080/api/2")?;
            /// ```
            pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
                let http = reqwest::blocking::Client::builder()
                    .timeout(Self::DEFAULT_TIMEOUT)
                    .build()?;
                let base_url = base_url.into().trim_end_matches('/').to_string();
                Ok(Self { base_url, http })
            }

            /// Replaces the HTTP transport, keeping the base URL.
            pub fn with_http_client(mut self, http: reqwest::blocking::Client) -> Self {
                self.http = http;
                self
            }

            /// The base URL requests are sent to.
            pub fn base_url(&self) -> &str {
                &self.base_url
            }
        }
    }
}
