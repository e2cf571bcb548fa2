//! elmgen.toml parsing and validation

use anyhow::{Context, Result};
use elmgen_core::ImportModules;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default manifest file name, looked up in the working directory
pub const MANIFEST_FILE: &str = "elmgen.toml";

/// elmgen.toml manifest structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub generator: GeneratorSection,

    #[serde(default)]
    pub imports: ImportModules,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorSection {
    /// Module names are derived from output paths relative to this directory
    #[serde(default = "default_source_root")]
    pub source_root: PathBuf,

    #[serde(default = "default_schema_extension")]
    pub schema_extension: String,

    #[serde(default = "default_output_extension")]
    pub output_extension: String,

    /// Log filter used when neither RUST_LOG nor --verbose is given
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_source_root() -> PathBuf {
    PathBuf::from("src")
}

fn default_schema_extension() -> String {
    "yaml".to_string()
}

fn default_output_extension() -> String {
    "elm".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            schema_extension: default_schema_extension(),
            output_extension: default_output_extension(),
            log_level: default_log_level(),
        }
    }
}

impl Manifest {
    /// Load manifest from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read manifest: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse manifest from string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse manifest")
    }

    /// Load the manifest named on the command line, else `./elmgen.toml` if present,
    /// else defaults. The result is validated.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let manifest = match explicit {
            Some(path) => Self::from_file(path)?,
            None if Path::new(MANIFEST_FILE).is_file() => Self::from_file(MANIFEST_FILE)?,
            None => Self::default(),
        };

        manifest.validate()?;
        Ok(manifest)
    }

    /// Validate the manifest
    pub fn validate(&self) -> Result<()> {
        let generator = &self.generator;

        if generator.schema_extension.is_empty() {
            anyhow::bail!("generator.schema_extension cannot be empty");
        }
        if generator.output_extension.is_empty() {
            anyhow::bail!("generator.output_extension cannot be empty");
        }
        if generator.schema_extension == generator.output_extension {
            anyhow::bail!(
                "generator.schema_extension and generator.output_extension must differ (both are \"{}\")",
                generator.schema_extension
            );
        }
        for ext in [&generator.schema_extension, &generator.output_extension] {
            if ext.starts_with('.') {
                anyhow::bail!("Extension \"{ext}\" should be given without a leading dot");
            }
        }

        tracing_subscriber::EnvFilter::try_new(&generator.log_level)
            .with_context(|| format!("Invalid generator.log_level: {}", generator.log_level))?;

        self.imports.validate()?;

        Ok(())
    }
}
