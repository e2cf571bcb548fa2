//! Whole-module emission.
//!
//! The emitter renders every record of a schema, collects what the renderings used in
//! a [`Usage`], and derives the import list from it. Nothing is imported that the
//! module does not reference, apart from `Json.Decode` and `Json.Encode`.

use crate::config::ImportModules;
use crate::error::{GenError, GenResult};
use crate::naming::is_module_name;
use crate::object::ObjectModel;
use crate::schema::Schema;
use crate::usage::Usage;

/// Renders schemas into Elm modules.
#[derive(Debug, Clone, Default)]
pub struct ModuleEmitter {
    imports: ImportModules,
}

impl ModuleEmitter {
    /// Create an emitter importing helpers from the given modules.
    pub fn new(imports: ImportModules) -> Self {
        Self { imports }
    }

    /// Render a complete module.
    ///
    /// `generated_at` is the Unix time echoed into the header.
    pub fn emit(&self, schema: &Schema, module_name: &str, generated_at: i64) -> GenResult<String> {
        if !is_module_name(module_name) {
            return Err(GenError::structure(format!(
                "module name `{module_name}` is not a valid Elm module name"
            )));
        }
        if schema.is_empty() {
            return Err(GenError::structure("objects must declare at least one record"));
        }

        let mut objects = schema
            .records()
            .map(|(name, decl)| ObjectModel::build(name, decl, schema))
            .collect::<GenResult<Vec<_>>>()?;
        objects.sort_by(|a, b| {
            a.display_name
                .to_lowercase()
                .cmp(&b.display_name.to_lowercase())
                .then_with(|| a.display_name.cmp(&b.display_name))
        });

        let mut usage = Usage::new();
        let mut bodies = Vec::with_capacity(objects.len());
        for object in &objects {
            bodies.push(object.render(schema)?);
            let mut record_usage = Usage::new();
            object.record_usage(&mut record_usage);
            usage.merge(&record_usage);
            tracing::debug!(
                record = %object.name,
                fields = object.arity(),
                self_referencing = object.self_referencing,
                "rendered record"
            );
        }

        let mut code = String::new();
        code.push_str(&module_declaration(module_name, &objects));
        code.push('\n');
        code.push_str(&header(schema, generated_at));
        code.push('\n');
        code.push_str(&self.import_block(&usage));
        code.push_str("\n\n\n");
        code.push_str(&bodies.join("\n\n"));

        Ok(code)
    }

    /// Import lines for everything the usage accumulator saw.
    pub fn import_block(&self, usage: &Usage) -> String {
        let mut lines = Vec::new();

        if usage.dict {
            lines.push("import Dict exposing (Dict)".to_string());
        }

        let decode_exposing = usage.decode_extra_exposing();
        if usage.needs_extended_arity() || !decode_exposing.is_empty() {
            let mut line = format!("import {}", self.imports.decode_extra);
            if usage.needs_extended_arity() {
                line.push_str(" as D");
            }
            if !decode_exposing.is_empty() {
                line.push_str(&format!(" exposing ({})", decode_exposing.join(", ")));
            }
            lines.push(line);
        }

        if usage.maybe_object {
            lines.push(format!(
                "import {} exposing (maybeObject)",
                self.imports.encode_extra
            ));
        }
        if usage.timestamp {
            lines.push(format!(
                "import {} exposing (Timestamp, encodeTimestamp, timestampDecoder)",
                self.imports.timestamp
            ));
        }
        if usage.enums {
            lines.push(format!("import {} as Enums", self.imports.enums));
        }

        lines.push("import Json.Decode as D".to_string());
        lines.push("import Json.Encode as E".to_string());

        lines.join("\n")
    }
}

/// Render a schema into a complete module.
pub fn generate_module(
    schema: &Schema,
    module_name: &str,
    imports: &ImportModules,
    generated_at: i64,
) -> GenResult<String> {
    ModuleEmitter::new(imports.clone()).emit(schema, module_name, generated_at)
}

fn module_declaration(module_name: &str, objects: &[ObjectModel]) -> String {
    let exposed: Vec<String> = objects
        .iter()
        .flat_map(|o| [o.exposed_type(), o.encoder_name(), o.decoder_name()])
        .collect();

    let mut code = format!("module {module_name} exposing\n");
    for (i, name) in exposed.iter().enumerate() {
        let lead = if i == 0 { '(' } else { ',' };
        code.push_str(&format!("    {lead} {name}\n"));
    }
    code.push_str("    )\n");
    code
}

fn header(schema: &Schema, generated_at: i64) -> String {
    format!(
        "{{-| Automatically generated '{}'\n\nSchema version {}\n\nLast generated at Unix time {generated_at}\n\n-}}\n",
        schema.name(),
        schema.version()
    )
}

#[cfg(test)]
#[path = "module/module_tests.rs"]
mod module_tests;
