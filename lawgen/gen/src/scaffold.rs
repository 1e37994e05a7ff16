//! Package scaffold for the generated client.
//!
//! With `--scaffold` the generator also writes a `lib.rs` next to the two
//! artifacts and a `Cargo.toml` listing the runtime dependencies of the
//! generated code, so the output directory builds as a crate on its own.
//!
//! ## Layout
//!
//! ```text
//! lawapi/
//! ├── Cargo.toml     # [lib] path = "src/lib.rs"
//! └── src/           # --output
//!     ├── lib.rs
//!     ├── types.rs
//!     └── client.rs
//! ```
//!
//! When the output directory has no name of its own (`.`), the manifest is
//! written into it and points at `lib.rs` directly.

use std::path::{Path, PathBuf};

use proc_macro2::TokenStream;
use quote::quote;

use crate::config::GeneratorConfig;

/// Where the scaffold files go for a given output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldLayout {
    pub manifest_path: PathBuf,
    pub lib_path: PathBuf,
    /// `lib.rs` relative to the manifest, with `/` separators.
    pub lib_relative: String,
}

impl ScaffoldLayout {
    /// Computes the layout for `output_dir`.
    ///
    /// ## Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use lawgen::scaffold::ScaffoldLayout;
    ///
    /// let layout = ScaffoldLayout::for_output(Path::new("lawapi/src"));
    /// assert_eq!(layout.manifest_path, Path::new("lawapi/Cargo.toml"));
    /// assert_eq!(layout.lib_relative, "src/lib.rs");
    ///
    /// let layout = ScaffoldLayout::for_output(Path::new("."));
    /// assert_eq!(layout.manifest_path, Path::new("./Cargo.toml"));
    /// assert_eq!(layout.lib_relative, "lib.rs");
    /// ```
    pub fn for_output(output_dir: &Path) -> Self {
        let lib_path = output_dir.join("lib.rs");
        match output_dir.file_name() {
            Some(dir_name) => {
                let parent = output_dir
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or(Path::new("."));
                Self {
                    manifest_path: parent.join("Cargo.toml"),
                    lib_path,
                    lib_relative: format!("{}/lib.rs", dir_name.to_string_lossy()),
                }
            }
            None => Self {
                manifest_path: output_dir.join("Cargo.toml"),
                lib_path,
                lib_relative: "lib.rs".to_string(),
            },
        }
    }
}

/// Renders the `Cargo.toml` of the generated package.
///
/// ## Examples
///
/// ```
/// use lawgen::config::GeneratorConfig;
/// use lawgen::scaffold::render_manifest;
///
/// let manifest = render_manifest(&GeneratorConfig::default(), "src/lib.rs");
/// assert!(manifest.contains("name = \"lawapi\""));
/// assert!(manifest.contains("path = \"src/lib.rs\""));
/// ```
pub fn render_manifest(config: &GeneratorConfig, lib_relative: &str) -> String {
    format!(
        r#"# This file was automatically generated by lawgen. Do not edit manually.

[package]
name = "{package}"
version = "0.1.0"
edition = "2021"
publish = false

[lib]
path = "{lib_relative}"

[dependencies]
chrono = {{ version = "0.4", features = ["serde"] }}
reqwest = {{ version = "0.12", default-features = false, features = ["blocking", "json", "rustls-tls"] }}
serde = {{ version = "1.0", features = ["derive"] }}
serde_json = "1.0"
thiserror = "2.0"
url = "2.5"
"#,
        package = config.package,
    )
}

/// Generates the `lib.rs` of the generated package.
pub fn generate_lib(config: &GeneratorConfig) -> TokenStream {
    let intro = format!(" Generated client library `{}`.", config.package);

    quote! {
        #![doc = #intro]
        //!
        //! - [`types`]: data types for every component schema
        //! - [`client`]: the blocking HTTP client

        pub mod types;
        pub mod client;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::render;

    #[test]
    fn layout_puts_manifest_above_named_output_dir() {
        let layout = ScaffoldLayout::for_output(Path::new("/tmp/out/lawapi/src"));
        assert_eq!(layout.manifest_path, PathBuf::from("/tmp/out/lawapi/Cargo.toml"));
        assert_eq!(layout.lib_path, PathBuf::from("/tmp/out/lawapi/src/lib.rs"));
        assert_eq!(layout.lib_relative, "src/lib.rs");
    }

    #[test]
    fn layout_for_bare_dir_name_uses_current_dir() {
        let layout = ScaffoldLayout::for_output(Path::new("generated"));
        assert_eq!(layout.manifest_path, PathBuf::from("./Cargo.toml"));
        assert_eq!(layout.lib_relative, "generated/lib.rs");
    }

    #[test]
    fn manifest_parses_and_lists_runtime_dependencies() {
        let config = GeneratorConfig {
            package: "law-api".to_string(),
            ..Default::default()
        };
        let manifest = render_manifest(&config, "src/lib.rs");
        let parsed: toml::Value = toml::from_str(&manifest).expect("manifest should be valid TOML");

        assert_eq!(parsed["package"]["name"].as_str(), Some("law-api"));
        assert_eq!(parsed["lib"]["path"].as_str(), Some("src/lib.rs"));

        let deps = parsed["dependencies"].as_table().expect("dependencies table");
        for name in ["chrono", "reqwest", "serde", "serde_json", "thiserror", "url"] {
            assert!(deps.contains_key(name), "missing dependency {name}");
        }
        let reqwest_features = parsed["dependencies"]["reqwest"]["features"]
            .as_array()
            .expect("reqwest features");
        assert!(reqwest_features.iter().any(|f| f.as_str() == Some("blocking")));
    }

    #[test]
    fn lib_declares_both_modules() {
        let code = render(&generate_lib(&GeneratorConfig::default()));
        assert!(code.starts_with("//! Generated client library `lawapi`."));
        assert!(code.contains("pub mod types;"));
        assert!(code.contains("pub mod client;"));
    }
}
