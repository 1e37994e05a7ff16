//! lawgen code generator
//!
//! Generates a typed blocking Rust client from an OpenAPI 3.0 document.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use colored::Colorize;
use lawgen::config::GeneratorConfig;
use lawgen::errors::GeneratorError;
use lawgen::output::{Artifact, generate_and_write};
use lawgen_openapi::Specification;
use tracing::{Level, info};

/// lawgen - turns an OpenAPI 3.0 document into a typed Rust client
#[derive(Parser, Debug)]
#[command(name = "lawgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// OpenAPI document to read (YAML or JSON)
    #[arg(short, long, default_value = "lawapi-v2.yaml")]
    input: PathBuf,

    /// Output directory for types.rs and client.rs
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Package name of the generated library
    #[arg(short, long, default_value = "lawapi")]
    package: String,

    /// Name of the generated client struct
    #[arg(long, default_value = "Client")]
    client_name: String,

    /// Request timeout of the generated client, in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Also write lib.rs and a Cargo.toml for the generated package
    #[arg(long)]
    scaffold: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            package: self.package.clone(),
            client_name: self.client_name.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(artifacts) => {
            if !cli.dry_run {
                print_success(&cli, &artifacts);
            }
        }
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<Vec<Artifact>, GeneratorError> {
    let config = cli.config();
    config.validate()?;

    info!(input = %cli.input.display(), "Reading OpenAPI document");
    let bytes = std::fs::read(&cli.input).map_err(|e| GeneratorError::ReadError {
        path: cli.input.display().to_string(),
        source: e,
    })?;
    let spec = Specification::parse(&bytes)?;
    info!(
        title = %spec.info.title,
        operations = spec.operations().count(),
        schemas = spec.components.schemas.len(),
        "Parsed document"
    );

    generate_and_write(&spec, &config, &cli.output, cli.dry_run, cli.scaffold)
}

fn print_success(cli: &Cli, artifacts: &[Artifact]) {
    println!("{}", "Generated client code:".green().bold());
    for artifact in artifacts {
        println!("  {}", artifact.path.display());
    }

    let crate_name = cli.config().crate_ident();
    let lib_hint = if cli.scaffold {
        String::new()
    } else {
        format!(
            "\nDeclare the modules in {}:\n  pub mod types;\n  pub mod client;\n",
            cli.output.join("lib.rs").display()
        )
    };
    println!(
        "{lib_hint}\nUsage:\n  let client = {crate_name}::client::{}::new()?;",
        cli.client_name
    );
}
