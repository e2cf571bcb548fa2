//! Type token resolution and per-type Elm renderings.
//!
//! A field's `type` token resolves into a [`TypeDescriptor`] tree:
//!
//! | Token | Descriptor |
//! |-------|------------|
//! | `[T]` | `List(T)` |
//! | `{T}` | `Map(T)` (string keys) |
//! | a record name of the schema | `RecordRef(name)` |
//! | `Enums.Name` | `Enum(Name)` |
//! | `bool`, `int`, `string`, `float`, `timestamp`, `value` | primitives |
//!
//! Rules are checked in that order.
//! Every descriptor renders three pieces of Elm: a type name, an encoder expression and
//! a decoder expression. Compound renderings contain spaces and are wrapped with
//! [`wrap`] by whoever embeds them.

use crate::error::{GenError, GenResult};
use crate::naming::{is_type_identifier, lower_first, record_display_name};
use crate::schema::Schema;
use crate::usage::Usage;

/// Namespace prefix that marks enum tokens.
pub const ENUM_NAMESPACE: &str = "Enums.";

/// A resolved field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    Bool,
    Int,
    String,
    Float,
    Timestamp,
    /// Arbitrary JSON, carried as `E.Value`.
    RawValue,
    /// An enum of the shared enums module, by type name.
    Enum(String),
    /// Another record of the same schema, by schema name.
    RecordRef(String),
    List(Box<TypeDescriptor>),
    Map(Box<TypeDescriptor>),
}

/// Resolve a type token against a schema.
///
/// # Examples
///
/// ```
/// use elmgen_core::resolver::{resolve, TypeDescriptor};
/// # use elmgen_core::schema::Schema;
/// # let schema = Schema::from_yaml_str(
/// #     "name: n\nversion: '1'\nobjects:\n  A:\n    fields: {}\n").unwrap();
///
/// let ty = resolve("[string]", &schema).unwrap();
/// assert_eq!(ty, TypeDescriptor::List(Box::new(TypeDescriptor::String)));
/// assert_eq!(ty.type_name(), "List String");
/// ```
pub fn resolve(token: &str, schema: &Schema) -> GenResult<TypeDescriptor> {
    let token = token.trim();
    tracing::trace!(token, "resolving type token");

    if let Some(inner) = token.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
        return Ok(TypeDescriptor::List(Box::new(resolve(inner, schema)?)));
    }
    if let Some(inner) = token.strip_prefix('{').and_then(|t| t.strip_suffix('}')) {
        return Ok(TypeDescriptor::Map(Box::new(resolve(inner, schema)?)));
    }
    if schema.contains_record(token) {
        return Ok(TypeDescriptor::RecordRef(token.to_string()));
    }
    if let Some(name) = token.strip_prefix(ENUM_NAMESPACE) {
        if !is_type_identifier(name) {
            return Err(GenError::UnresolvedReference(token.to_string()));
        }
        return Ok(TypeDescriptor::Enum(name.to_string()));
    }

    match token {
        "bool" => Ok(TypeDescriptor::Bool),
        "int" => Ok(TypeDescriptor::Int),
        "string" => Ok(TypeDescriptor::String),
        "float" => Ok(TypeDescriptor::Float),
        "timestamp" => Ok(TypeDescriptor::Timestamp),
        "value" => Ok(TypeDescriptor::RawValue),
        _ => Err(GenError::UnknownType(token.to_string())),
    }
}

/// Parenthesize an expression if it contains whitespace.
pub fn wrap(expr: &str) -> String {
    if expr.contains(' ') {
        format!("({expr})")
    } else {
        expr.to_string()
    }
}

impl TypeDescriptor {
    /// Elm type name, e.g. `List (Dict String Int)`.
    pub fn type_name(&self) -> String {
        match self {
            TypeDescriptor::Bool => "Bool".to_string(),
            TypeDescriptor::Int => "Int".to_string(),
            TypeDescriptor::String => "String".to_string(),
            TypeDescriptor::Float => "Float".to_string(),
            TypeDescriptor::Timestamp => "Timestamp".to_string(),
            TypeDescriptor::RawValue => "E.Value".to_string(),
            TypeDescriptor::Enum(name) => format!("{ENUM_NAMESPACE}{name}"),
            TypeDescriptor::RecordRef(name) => record_display_name(name),
            TypeDescriptor::List(child) => format!("List {}", wrap(&child.type_name())),
            TypeDescriptor::Map(child) => format!("Dict String {}", wrap(&child.type_name())),
        }
    }

    /// Elm encoder expression of type `a -> E.Value`.
    pub fn encoder(&self) -> String {
        match self {
            TypeDescriptor::Bool => "E.bool".to_string(),
            TypeDescriptor::Int => "E.int".to_string(),
            TypeDescriptor::String => "E.string".to_string(),
            TypeDescriptor::Float => "E.float".to_string(),
            TypeDescriptor::Timestamp => "encodeTimestamp".to_string(),
            TypeDescriptor::RawValue => "identity".to_string(),
            TypeDescriptor::Enum(name) => format!("{ENUM_NAMESPACE}encode{name}"),
            TypeDescriptor::RecordRef(name) => format!("encode{}", record_display_name(name)),
            TypeDescriptor::List(child) => format!("E.list {}", wrap(&child.encoder())),
            TypeDescriptor::Map(child) => format!("E.dict identity {}", wrap(&child.encoder())),
        }
    }

    /// Elm decoder expression of type `D.Decoder a`.
    ///
    /// References to self-referencing records render as `D.lazy (\_ -> ...)` so the
    /// decoder is not evaluated while the module's top-level values are built.
    pub fn decoder(&self, schema: &Schema) -> GenResult<String> {
        Ok(match self {
            TypeDescriptor::Bool => "D.bool".to_string(),
            TypeDescriptor::Int => "D.int".to_string(),
            TypeDescriptor::String => "D.string".to_string(),
            TypeDescriptor::Float => "D.float".to_string(),
            TypeDescriptor::Timestamp => "timestampDecoder".to_string(),
            TypeDescriptor::RawValue => "D.value".to_string(),
            TypeDescriptor::Enum(name) => {
                format!("{ENUM_NAMESPACE}{}Decoder", lower_first(name))
            }
            TypeDescriptor::RecordRef(name) => {
                let record = schema
                    .record(name)
                    .ok_or_else(|| GenError::UnresolvedReference(name.clone()))?;
                let decoder_name = format!("{}Decoder", lower_first(&record_display_name(name)));
                if record.is_self_referencing() {
                    format!("D.lazy (\\_ -> {decoder_name})")
                } else {
                    decoder_name
                }
            }
            TypeDescriptor::List(child) => format!("D.list {}", wrap(&child.decoder(schema)?)),
            TypeDescriptor::Map(child) => format!("D.dict {}", wrap(&child.decoder(schema)?)),
        })
    }

    /// Record the helper modules this type needs.
    pub fn record_usage(&self, usage: &mut Usage) {
        match self {
            TypeDescriptor::Timestamp => usage.timestamp = true,
            TypeDescriptor::Enum(_) => usage.enums = true,
            TypeDescriptor::List(child) => child.record_usage(usage),
            TypeDescriptor::Map(child) => {
                usage.dict = true;
                child.record_usage(usage);
            }
            TypeDescriptor::Bool
            | TypeDescriptor::Int
            | TypeDescriptor::String
            | TypeDescriptor::Float
            | TypeDescriptor::RawValue
            | TypeDescriptor::RecordRef(_) => {}
        }
    }

    /// Whether this type mentions the given record, directly or through containers.
    pub fn references_record(&self, record: &str) -> bool {
        match self {
            TypeDescriptor::RecordRef(name) => name == record,
            TypeDescriptor::List(child) | TypeDescriptor::Map(child) => {
                child.references_record(record)
            }
            _ => false,
        }
    }

    pub fn is_raw_value(&self) -> bool {
        matches!(self, TypeDescriptor::RawValue)
    }
}

#[cfg(test)]
#[path = "resolver/resolver_tests.rs"]
mod resolver_tests;
