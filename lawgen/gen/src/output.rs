//! Output assembly and file writing for generated code.
//!
//! This module handles the final phase of code generation: validating each
//! artifact with `syn`, formatting it with `prettyplease` and writing it to
//! disk atomically.
//!
//! ## Output Structure
//!
//! ```text
//! <output>/
//! ├── types.rs       # One named item per component schema
//! ├── client.rs      # ApiError, QueryParams, the client and its methods
//! └── lib.rs         # --scaffold only (Cargo.toml goes next to <output>)
//! ```
//!
//! ## Safety Guarantees
//!
//! - **All or nothing**: every artifact is rendered and validated before the
//!   first file is written
//! - **Formatting**: output is formatted with `prettyplease`
//! - **Atomic writes**: each file is written with the temp file + rename
//!   pattern

use std::fs;
use std::path::{Path, PathBuf};

use lawgen_openapi::Specification;
use proc_macro2::TokenStream;

use crate::codegen::Generator;
use crate::config::GeneratorConfig;
use crate::errors::GeneratorError;
use crate::scaffold::{ScaffoldLayout, generate_lib, render_manifest};
use crate::validation::validate_specification;

/// File name of the types artifact.
pub const TYPES_FILE: &str = "types.rs";

/// File name of the client artifact.
pub const CLIENT_FILE: &str = "client.rs";

/// A rendered file, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
}

/// Validates generated code using syn.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if the code fails to parse.
pub fn validate_code(tokens: &TokenStream) -> Result<syn::File, GeneratorError> {
    syn::parse2(tokens.clone())
        .map_err(|e| GeneratorError::CodeGenError(format!("Generated code is invalid: {}", e)))
}

/// Formats generated code using prettyplease, prepending the
/// auto-generated notice as a regular comment.
pub fn format_code(file: &syn::File) -> String {
    let formatted = prettyplease::unparse(file);
    format!(
        "// This code was automatically generated by lawgen. Do not edit manually.\n\n{}",
        formatted
    )
}

/// Writes content to a file atomically using temp file + rename.
///
/// Parent directories are created as needed.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if:
/// - Parent directories cannot be created
/// - The temp file cannot be written
/// - The rename operation fails
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    let temp_path = stage(path, content)?;
    commit(&temp_path, path)
}

/// Writes `content` next to `path` under a `.tmp` extension and returns the
/// temp path.
fn stage(path: &Path, content: &str) -> Result<PathBuf, GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    Ok(temp_path)
}

fn commit(temp_path: &Path, path: &Path) -> Result<(), GeneratorError> {
    fs::rename(temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })
}

fn render(tokens: &TokenStream) -> Result<String, GeneratorError> {
    let file = validate_code(tokens)?;
    Ok(format_code(&file))
}

/// Renders every artifact for a document without touching the disk.
///
/// Returns the types artifact, the client artifact and, with `scaffold`,
/// `lib.rs` and `Cargo.toml`, in that order.
///
/// ## Errors
///
/// Returns `GeneratorError::ConfigError` for an invalid configuration and
/// `GeneratorError::CodeGenError` if any artifact fails to validate.
pub fn render_artifacts(
    spec: &Specification,
    config: &GeneratorConfig,
    output_dir: &Path,
    scaffold: bool,
) -> Result<Vec<Artifact>, GeneratorError> {
    config.validate()?;
    validate_specification(spec, config);

    let generator = Generator::new(spec, config);
    let mut artifacts = vec![
        Artifact {
            path: output_dir.join(TYPES_FILE),
            content: render(&generator.types_tokens())?,
        },
        Artifact {
            path: output_dir.join(CLIENT_FILE),
            content: render(&generator.client_tokens())?,
        },
    ];

    if scaffold {
        let layout = ScaffoldLayout::for_output(output_dir);
        artifacts.push(Artifact {
            path: layout.lib_path,
            content: render(&generate_lib(config))?,
        });
        artifacts.push(Artifact {
            path: layout.manifest_path,
            content: render_manifest(config, &layout.lib_relative),
        });
    }

    tracing::info!(
        files = artifacts.len(),
        output = %output_dir.display(),
        "Rendered artifacts"
    );
    Ok(artifacts)
}

/// Writes rendered artifacts, or prints them when `dry_run` is set.
///
/// Every artifact is staged to a temp file first. Existing files are only
/// replaced once all of them were staged; on failure the staged files are
/// removed and the output directory is left as it was.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if any file cannot be written.
pub fn write_artifacts(artifacts: &[Artifact], dry_run: bool) -> Result<(), GeneratorError> {
    if dry_run {
        for artifact in artifacts {
            println!("=== {} ===\n{}\n", artifact.path.display(), artifact.content);
        }
        return Ok(());
    }

    let mut staged = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        match stage(&artifact.path, &artifact.content) {
            Ok(temp_path) => staged.push(temp_path),
            Err(err) => {
                for temp_path in &staged {
                    if let Err(cleanup) = fs::remove_file(temp_path) {
                        tracing::warn!(
                            path = %temp_path.display(),
                            error = %cleanup,
                            "Failed to remove temp file"
                        );
                    }
                }
                return Err(err);
            }
        }
    }

    for (temp_path, artifact) in staged.iter().zip(artifacts) {
        commit(temp_path, &artifact.path)?;
        tracing::debug!(path = %artifact.path.display(), "Wrote file");
    }
    Ok(())
}

/// Generates and writes both artifacts for a document.
///
/// This is the main entry point for code generation.
///
/// ## Returns
///
/// The rendered artifacts, also when `dry_run` is set.
///
/// ## Errors
///
/// Returns an error if the configuration is invalid, code generation
/// produces invalid Rust, or a file cannot be written. Nothing is written
/// unless every artifact rendered.
pub fn generate_and_write(
    spec: &Specification,
    config: &GeneratorConfig,
    output_dir: &Path,
    dry_run: bool,
    scaffold: bool,
) -> Result<Vec<Artifact>, GeneratorError> {
    let artifacts = render_artifacts(spec, config, output_dir, scaffold)?;
    write_artifacts(&artifacts, dry_run)?;
    Ok(artifacts)
}
