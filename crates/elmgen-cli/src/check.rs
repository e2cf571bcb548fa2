//! Dry-run validation of schema files

use crate::build::{derive_module_name, output_path};
use crate::manifest::Manifest;
use anyhow::{Context, Result};
use elmgen_core::{GenError, ModuleEmitter, Schema};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Module name used when none can be derived; only affects the discarded output.
const FALLBACK_MODULE: &str = "Main";

/// Error kind reported for unreadable files
const IO_ERROR_KIND: &str = "io";

/// Result of checking one schema file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub kind: String,
    pub code: u32,
    pub message: String,
}

/// Report for a whole check run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub files: Vec<FileReport>,
    pub failed: usize,
}

impl From<&GenError> for ErrorReport {
    fn from(err: &GenError) -> Self {
        Self {
            kind: err.kind().to_string(),
            code: err.error_code(),
            message: err.to_string(),
        }
    }
}

/// Parse and fully render one schema without writing anything.
pub fn check_file(path: &Path, manifest: &Manifest, emitter: &ModuleEmitter) -> FileReport {
    let failure = |error: ErrorReport| FileReport {
        path: path.to_path_buf(),
        ok: false,
        records: None,
        error: Some(error),
    };

    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            return failure(ErrorReport {
                kind: IO_ERROR_KIND.to_string(),
                code: 0,
                message: err.to_string(),
            });
        }
    };

    let module_name = derive_module_name(
        &output_path(path, &manifest.generator.output_extension),
        &manifest.generator.source_root,
    )
    .unwrap_or_else(|| FALLBACK_MODULE.to_string());

    let rendered = Schema::from_yaml_str(&source).and_then(|schema| {
        emitter
            .emit(&schema, &module_name, 0)
            .map(|_| schema.len())
    });

    match rendered {
        Ok(records) => FileReport {
            path: path.to_path_buf(),
            ok: true,
            records: Some(records),
            error: None,
        },
        Err(err) => failure(ErrorReport::from(&err)),
    }
}

/// Check every input and collect a report.
pub fn check_files(inputs: &[PathBuf], manifest: &Manifest) -> CheckReport {
    let emitter = ModuleEmitter::new(manifest.imports.clone());

    let files: Vec<FileReport> = inputs
        .iter()
        .map(|path| check_file(path, manifest, &emitter))
        .collect();
    let failed = files.iter().filter(|f| !f.ok).count();

    CheckReport { files, failed }
}

/// Check command implementation
pub fn run(inputs: &[PathBuf], json: bool, manifest: &Manifest) -> Result<()> {
    let report = check_files(inputs, manifest);

    if json {
        let out = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{out}");
    } else {
        for file in &report.files {
            match (&file.records, &file.error) {
                (Some(records), _) => {
                    println!("✓ {} ({records} records)", file.path.display())
                }
                (_, Some(error)) => println!("✗ {}: {}", file.path.display(), error.message),
                (None, None) => {}
            }
        }
    }

    if report.failed > 0 {
        anyhow::bail!("{} of {} schema files failed", report.failed, report.files.len());
    }

    if !json {
        println!("\nAll schemas are valid!");
    }
    Ok(())
}
