//! Directory builds: every schema under a root, in parallel.

use crate::build::BuildJob;
use crate::manifest::Manifest;
use anyhow::Result;
use elmgen_core::ModuleEmitter;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Outcome of a directory build
#[derive(Debug, Default)]
pub struct BuildSummary {
    pub generated: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, anyhow::Error)>,
}

impl BuildSummary {
    pub fn total(&self) -> usize {
        self.generated.len() + self.failed.len()
    }
}

/// Schema files found below a root, plus the entries the walk could not read.
#[derive(Debug, Default)]
pub struct Discovery {
    pub files: Vec<PathBuf>,
    pub unreadable: Vec<(PathBuf, anyhow::Error)>,
}

/// Find schema files below `root`, sorted by path.
///
/// Entries the walk cannot read (e.g. a directory without permission) are reported
/// in [`Discovery::unreadable`] instead of being skipped.
pub fn discover(root: &Path, schema_extension: &str) -> Result<Discovery> {
    if !root.is_dir() {
        anyhow::bail!("Schema root {root:?} is not a directory");
    }

    let mut discovery = Discovery::default();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                let err = anyhow::Error::new(err).context("Failed to read directory entry");
                discovery.unreadable.push((path, err));
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if path.extension().and_then(|e| e.to_str()) == Some(schema_extension) {
            discovery.files.push(path);
        }
    }
    discovery.files.sort();
    discovery.unreadable.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(discovery)
}

/// Generate a module for every schema below `root`. Failures are collected, not
/// propagated, so one bad file does not stop the others.
pub fn build_tree(root: &Path, manifest: &Manifest, generated_at: i64) -> Result<BuildSummary> {
    let Discovery { files, unreadable } = discover(root, &manifest.generator.schema_extension)?;
    tracing::debug!(root = %root.display(), count = files.len(), "discovered schema files");

    let emitter = ModuleEmitter::new(manifest.imports.clone());

    let results: Vec<(PathBuf, Result<PathBuf>)> = files
        .par_iter()
        .map(|input| {
            let outcome = BuildJob::plan(input, None, None, manifest).and_then(|job| {
                job.execute(&emitter, generated_at)?;
                Ok(job.output)
            });
            (input.clone(), outcome)
        })
        .collect();

    let mut summary = BuildSummary::default();
    for (path, err) in unreadable {
        tracing::warn!(path = %path.display(), "{err:#}");
        summary.failed.push((path, err));
    }
    for (input, outcome) in results {
        match outcome {
            Ok(output) => summary.generated.push(output),
            Err(err) => {
                tracing::warn!(input = %input.display(), "{err:#}");
                summary.failed.push((input, err));
            }
        }
    }

    Ok(summary)
}

/// Build-all command implementation
pub fn run(root: Option<&Path>, manifest: &Manifest, generated_at: i64) -> Result<()> {
    let root = root.unwrap_or(manifest.generator.source_root.as_path());

    println!("Building schemas under {}", root.display());

    let summary = build_tree(root, manifest, generated_at)?;

    for (input, err) in &summary.failed {
        eprintln!("  ✗ {}: {err:#}", input.display());
    }
    println!(
        "Generated {} of {} modules",
        summary.generated.len(),
        summary.total()
    );

    if !summary.failed.is_empty() {
        anyhow::bail!(
            "{} of {} schema files failed",
            summary.failed.len(),
            summary.total()
        );
    }

    Ok(())
}
