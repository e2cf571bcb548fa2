//! Single-schema generation: read, render, write atomically.

use crate::manifest::Manifest;
use anyhow::{Context, Result};
use elmgen_core::naming::is_module_name;
use elmgen_core::{ModuleEmitter, Schema};
use std::io::Write;
use std::path::{Component, Path, PathBuf};

/// One schema file and where its module goes.
#[derive(Debug, Clone)]
pub struct BuildJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub module_name: String,
}

impl BuildJob {
    /// Plan a build, deriving whatever the caller did not specify.
    pub fn plan(
        input: &Path,
        output: Option<&Path>,
        module_name: Option<&str>,
        manifest: &Manifest,
    ) -> Result<Self> {
        let output = match output {
            Some(path) => path.to_path_buf(),
            None => output_path(input, &manifest.generator.output_extension),
        };

        let module_name = match module_name {
            Some(name) => {
                if !is_module_name(name) {
                    anyhow::bail!("--module {name} is not a valid Elm module name");
                }
                name.to_string()
            }
            None => derive_module_name(&output, &manifest.generator.source_root).with_context(
                || {
                    format!(
                        "Cannot derive an Elm module name from {output:?} relative to {:?}; pass --module",
                        manifest.generator.source_root
                    )
                },
            )?,
        };

        Ok(Self {
            input: input.to_path_buf(),
            output,
            module_name,
        })
    }

    /// Load the schema and render its module.
    pub fn render(&self, emitter: &ModuleEmitter, generated_at: i64) -> Result<String> {
        let source = std::fs::read_to_string(&self.input)
            .with_context(|| format!("Failed to read schema: {:?}", self.input))?;
        let schema = Schema::from_yaml_str(&source)
            .with_context(|| format!("Invalid schema: {:?}", self.input))?;

        emitter
            .emit(&schema, &self.module_name, generated_at)
            .with_context(|| format!("Failed to generate {}", self.module_name))
    }

    /// Render and write the module. Nothing is written if rendering fails.
    pub fn execute(&self, emitter: &ModuleEmitter, generated_at: i64) -> Result<()> {
        let code = self.render(emitter, generated_at)?;
        write_atomic(&self.output, &code)?;

        tracing::info!(
            input = %self.input.display(),
            output = %self.output.display(),
            module = %self.module_name,
            "generated module"
        );
        Ok(())
    }
}

/// Build command implementation
pub fn run(
    input: &Path,
    output: Option<&Path>,
    module_name: Option<&str>,
    manifest: &Manifest,
    generated_at: i64,
) -> Result<()> {
    let job = BuildJob::plan(input, output, module_name, manifest)?;
    let emitter = ModuleEmitter::new(manifest.imports.clone());

    job.execute(&emitter, generated_at)?;

    println!("Generated {} ({})", job.output.display(), job.module_name);
    Ok(())
}

/// Output path for a schema: same location, output extension.
pub fn output_path(input: &Path, output_extension: &str) -> PathBuf {
    input.with_extension(output_extension)
}

/// Elm module name for an output file: its path relative to `source_root`, extension
/// stripped, directories joined with dots. `src/Internal/Api/Objects.elm` becomes
/// `Internal.Api.Objects`.
pub fn derive_module_name(output: &Path, source_root: &Path) -> Option<String> {
    let output = normalize(&output.with_extension(""));
    let source_root = normalize(source_root);
    let relative = output.strip_prefix(&source_root).unwrap_or(output.as_path());

    let segments = relative
        .components()
        .map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;

    let name = segments.join(".");
    is_module_name(&name).then_some(name)
}

// Drop `.` components so `./src/A.elm` and `src/A.elm` compare equal.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Write through a temporary file in the target directory, then rename over the
/// destination.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create directory: {dir:?}"))?;

    let mut file = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {dir:?}"))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {path:?}"))?;
    file.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("Failed to write {path:?}"))?;

    Ok(())
}
