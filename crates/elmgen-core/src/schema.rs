//! Schema documents: the declarative description of the records of one module.
//!
//! A schema document is YAML:
//!
//! ```yaml
//! name: Sync response
//! version: 1.2.0
//! objects:
//!   Timeline:
//!     description: A slice of the room timeline.
//!     anti_recursion: true
//!     fields:
//!       events:
//!         type: "[ClientEvent]"
//!         required: true
//!       limited:
//!         type: bool
//!         default: false
//! ```
//!
//! Loading is strict about structure (missing `name`, `version`, `objects` or a
//! malformed `fields` mapping are errors) and lenient about unknown keys, which are
//! ignored.

use crate::error::{GenError, GenResult};
use crate::naming::{is_type_identifier, record_display_name};
use crate::resolver;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

/// A loaded schema. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    name: String,
    version: String,
    records: BTreeMap<String, RecordDecl>,
}

/// A record declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDecl {
    /// Documentation for the generated type.
    pub description: String,

    /// Fields keyed by their wire name. Iteration order is key-ascending.
    pub fields: BTreeMap<String, FieldDecl>,

    /// Whether the document asked for recursion breaking (`anti_recursion`).
    pub anti_recursion: bool,

    self_referencing: bool,
}

/// A field declaration, before type resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    /// Unresolved type token, e.g. `[string]` or `Enums.Membership`.
    pub type_token: String,
    pub requiredness: Requiredness,
}

/// How a field's presence and default are handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Requiredness {
    /// `required: true`
    Required,
    /// `required: "now"`: always present once decoded
    SentinelNow,
    /// `required: "never"`: never present, never on the wire
    SentinelNever,
    /// `required: false` (the default), with an optional default value
    Optional { default: Option<DefaultLiteral> },
}

/// A default value, kept as the Elm expression it renders to.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultLiteral {
    Bool(bool),
    Number(String),
    /// Strings are inserted verbatim as Elm expressions.
    Expr(String),
}

impl DefaultLiteral {
    /// Elm source for the default value.
    pub fn to_elm(&self) -> String {
        match self {
            DefaultLiteral::Bool(true) => "True".to_string(),
            DefaultLiteral::Bool(false) => "False".to_string(),
            DefaultLiteral::Number(n) => n.clone(),
            DefaultLiteral::Expr(expr) => expr.clone(),
        }
    }

    fn from_yaml(field: &str, value: &serde_yaml::Value) -> GenResult<Option<Self>> {
        match value {
            serde_yaml::Value::Null => Ok(None),
            serde_yaml::Value::Bool(b) => Ok(Some(DefaultLiteral::Bool(*b))),
            serde_yaml::Value::Number(n) => Ok(Some(DefaultLiteral::Number(n.to_string()))),
            serde_yaml::Value::String(s) if s.trim().is_empty() => Err(GenError::structure(
                format!("field `{field}`: default cannot be an empty expression"),
            )),
            serde_yaml::Value::String(s) => Ok(Some(DefaultLiteral::Expr(s.clone()))),
            _ => Err(GenError::structure(format!(
                "field `{field}`: default must be a boolean, number or Elm expression string"
            ))),
        }
    }
}

// Raw document shapes, straight from serde.

#[derive(Debug, Deserialize)]
struct RawDocument {
    name: String,
    version: serde_yaml::Value,
    objects: BTreeMap<String, RawRecord>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    description: Option<String>,

    #[serde(default)]
    anti_recursion: bool,

    fields: BTreeMap<String, RawField>,
}

#[derive(Debug, Deserialize)]
struct RawField {
    #[serde(rename = "type")]
    type_token: String,

    #[serde(default)]
    required: RequiredFlag,

    #[serde(default)]
    default: Option<serde_yaml::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RequiredFlag {
    Flag(bool),
    Keyword(String),
}

impl Default for RequiredFlag {
    fn default() -> Self {
        RequiredFlag::Flag(false)
    }
}

impl Schema {
    /// Parse and build a schema from YAML source.
    pub fn from_yaml_str(source: &str) -> GenResult<Self> {
        let raw: RawDocument = serde_yaml::from_str(source)?;

        let version = match &raw.version {
            serde_yaml::Value::String(s) => s.clone(),
            serde_yaml::Value::Number(n) => n.to_string(),
            _ => return Err(GenError::structure("version must be a string")),
        };

        let mut records = BTreeMap::new();
        for (record_name, raw_record) in raw.objects {
            let mut fields = BTreeMap::new();
            for (key, raw_field) in raw_record.fields {
                let requiredness = requiredness(&key, raw_field.required, raw_field.default)?;
                fields.insert(
                    key,
                    FieldDecl {
                        type_token: raw_field.type_token,
                        requiredness,
                    },
                );
            }
            records.insert(
                record_name,
                RecordDecl {
                    description: raw_record.description.unwrap_or_default(),
                    fields,
                    anti_recursion: raw_record.anti_recursion,
                    self_referencing: false,
                },
            );
        }

        Self::new(raw.name, version, records)
    }

    /// Build a schema from already-parsed declarations.
    ///
    /// Validates record names and computes the effective self-reference flag of every
    /// record, which resolves every field type once. Resolution errors surface here.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        records: BTreeMap<String, RecordDecl>,
    ) -> GenResult<Self> {
        let name = name.into();
        let version = version.into();

        if name.trim().is_empty() {
            return Err(GenError::structure("name cannot be empty"));
        }
        if version.trim().is_empty() {
            return Err(GenError::structure("version cannot be empty"));
        }
        if records.is_empty() {
            return Err(GenError::structure("objects must declare at least one record"));
        }
        check_doc_text("name", &name)?;
        for (record_name, record) in &records {
            check_doc_text(&format!("record `{record_name}`: description"), &record.description)?;
        }

        let mut display_names = BTreeSet::new();
        for record_name in records.keys() {
            let display = record_display_name(record_name);
            if !is_type_identifier(&display) {
                return Err(GenError::structure(format!(
                    "record `{record_name}` does not form a valid Elm type name"
                )));
            }
            if !display_names.insert(display.clone()) {
                return Err(GenError::structure(format!(
                    "record `{record_name}` collides with another record named `{display}`"
                )));
            }
        }

        let mut schema = Self {
            name,
            version,
            records,
        };

        let mut self_referencing = Vec::new();
        for (record_name, record) in &schema.records {
            let mut detected = record.anti_recursion;
            for decl in record.fields.values() {
                let descriptor = resolver::resolve(&decl.type_token, &schema)?;
                detected |= descriptor.references_record(record_name);
            }
            if detected {
                self_referencing.push(record_name.clone());
            }
        }
        for record_name in self_referencing {
            if let Some(record) = schema.records.get_mut(&record_name) {
                record.self_referencing = true;
            }
        }

        Ok(schema)
    }

    /// Display name of the schema, echoed into the module header.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version string, echoed into the module header.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn records(&self) -> impl Iterator<Item = (&String, &RecordDecl)> {
        self.records.iter()
    }

    pub fn record(&self, name: &str) -> Option<&RecordDecl> {
        self.records.get(name)
    }

    pub fn contains_record(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordDecl {
    /// Create a declaration; the self-reference flag is computed by [`Schema::new`].
    pub fn new(
        description: impl Into<String>,
        fields: BTreeMap<String, FieldDecl>,
        anti_recursion: bool,
    ) -> Self {
        Self {
            description: description.into(),
            fields,
            anti_recursion,
            self_referencing: false,
        }
    }

    /// Whether the record needs a named recursive type and lazy decoder references.
    ///
    /// True when declared with `anti_recursion` or when any field refers back to the
    /// record itself, directly or through a list or dict.
    pub fn is_self_referencing(&self) -> bool {
        self.self_referencing
    }
}

impl FieldDecl {
    pub fn new(type_token: impl Into<String>, requiredness: Requiredness) -> Self {
        Self {
            type_token: type_token.into(),
            requiredness,
        }
    }
}

// Text spliced into a `{-| ... -}` block must not open or close a comment.
fn check_doc_text(what: &str, text: &str) -> GenResult<()> {
    if text.contains("-}") || text.contains("{-") {
        return Err(GenError::structure(format!(
            "{what} cannot contain the Elm comment delimiters `{{-` or `-}}`"
        )));
    }
    Ok(())
}

fn requiredness(
    key: &str,
    flag: RequiredFlag,
    default: Option<serde_yaml::Value>,
) -> GenResult<Requiredness> {
    match flag {
        RequiredFlag::Flag(true) => Ok(Requiredness::Required),
        RequiredFlag::Flag(false) => {
            let default = match &default {
                Some(value) => DefaultLiteral::from_yaml(key, value)?,
                None => None,
            };
            Ok(Requiredness::Optional { default })
        }
        RequiredFlag::Keyword(keyword) => match keyword.as_str() {
            "now" => Ok(Requiredness::SentinelNow),
            "never" => Ok(Requiredness::SentinelNever),
            other => Err(GenError::structure(format!(
                "field `{key}`: required must be true, false, \"now\" or \"never\", got \"{other}\""
            ))),
        },
    }
}
