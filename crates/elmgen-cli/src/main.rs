//! elmgen CLI - Elm JSON codec generator
//!
//! Commands:
//! - `elmgen build` - Generate one Elm module from a schema file
//! - `elmgen build-all` - Generate modules for every schema under a directory
//! - `elmgen check` - Validate schema files without writing anything

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod build;
mod build_all;
mod check;
mod manifest;

use manifest::Manifest;

#[derive(Parser)]
#[command(name = "elmgen")]
#[command(author, version, about = "Generate Elm JSON codecs from YAML schemas", long_about = None)]
struct Cli {
    /// Path to elmgen.toml (default: ./elmgen.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one Elm module from a schema file
    Build {
        /// Schema file
        input: PathBuf,

        /// Output file (default: the input with the output extension)
        output: Option<PathBuf>,

        /// Elm module name (default: derived from the output path)
        #[arg(short, long)]
        module: Option<String>,
    },

    /// Generate modules for every schema file under a directory
    BuildAll {
        /// Directory to walk (default: the configured source root)
        root: Option<PathBuf>,
    },

    /// Validate schema files without writing anything
    Check {
        /// Schema files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let manifest = Manifest::load(cli.config.as_deref())?;
    init_logging(cli.verbose, &manifest.generator.log_level);

    let generated_at = chrono::Utc::now().timestamp();

    match cli.command {
        Commands::Build {
            input,
            output,
            module,
        } => {
            build::run(
                &input,
                output.as_deref(),
                module.as_deref(),
                &manifest,
                generated_at,
            )?;
        }
        Commands::BuildAll { root } => {
            build_all::run(root.as_deref(), &manifest, generated_at)?;
        }
        Commands::Check { inputs, json } => {
            check::run(&inputs, json, &manifest)?;
        }
    }

    Ok(())
}

/// Install the stderr subscriber. RUST_LOG wins, then --verbose, then the manifest.
fn init_logging(verbose: bool, configured: &str) {
    let fallback = if verbose { "debug" } else { configured };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
