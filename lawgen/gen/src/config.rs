//! Generator configuration.
//!
//! Built from CLI flags; no configuration file is read.

use crate::errors::GeneratorError;

/// Names reserved by the generated client module.
pub(crate) const RESERVED_CLIENT_NAMES: &[&str] = &["ApiError", "QueryParams"];

/// Settings that shape the generated package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Package (crate) name of the generated library.
    pub package: String,
    /// Name of the generated client struct.
    pub client_name: String,
    /// Request timeout baked into the generated client, in seconds.
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package: "lawapi".to_string(),
            client_name: "Client".to_string(),
            timeout_secs: 30,
        }
    }
}

impl GeneratorConfig {
    /// The package name as a Rust path segment (`-` becomes `_`).
    pub fn crate_ident(&self) -> String {
        self.package.replace('-', "_")
    }

    /// Checks that every setting can be emitted as valid Rust.
    ///
    /// ## Errors
    ///
    /// Returns [`GeneratorError::ConfigError`] if the package name is not a
    /// valid crate name, the client name is not a usable type identifier, or
    /// the timeout is zero.
    ///
    /// ## Examples
    ///
    /// ```
    /// use lawgen::config::GeneratorConfig;
    ///
    /// assert!(GeneratorConfig::default().validate().is_ok());
    ///
    /// let config = GeneratorConfig {
    ///     client_name: "fn".to_string(),
    ///     ..Default::default()
    /// };
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), GeneratorError> {
        let package_ok = self
            .package
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && self
                .package
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !package_ok {
            return Err(GeneratorError::ConfigError(format!(
                "package name '{}' must start with a letter and contain only letters, digits, '_' or '-'",
                self.package
            )));
        }

        if syn::parse_str::<syn::Ident>(&self.client_name).is_err()
            || self.client_name.starts_with("r#")
        {
            return Err(GeneratorError::ConfigError(format!(
                "client name '{}' is not a valid Rust identifier",
                self.client_name
            )));
        }
        if RESERVED_CLIENT_NAMES.contains(&self.client_name.as_str()) {
            return Err(GeneratorError::ConfigError(format!(
                "client name '{}' clashes with a generated type",
                self.client_name
            )));
        }

        if self.timeout_secs == 0 {
            return Err(GeneratorError::ConfigError(
                "timeout must be at least one second".to_string(),
            ));
        }

        Ok(())
    }
}
