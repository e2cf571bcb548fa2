//! Per-field renderings.
//!
//! A field contributes one line to each of the three artifacts of its record:
//!
//! | Requiredness | annotation | encoder | decoder |
//! |---|---|---|---|
//! | required | `T` | `Just <\| enc data.f` | `D.field "k" dec` |
//! | optional, default | `T` | `Just <\| enc data.f` | `opFieldWithDefault "k" DEFAULT dec` |
//! | optional | `Maybe T` | `Maybe.map enc data.f` | `opField "k" dec` |
//! | `now` | `Maybe T` | `Maybe.map enc data.f` | `D.map Just <\| D.field "k" dec` |
//! | `never` | `Maybe T` | `Nothing` | `D.succeed Nothing` |
//!
//! An optional raw JSON field without default is already a `Maybe E.Value`-shaped
//! value on the encoder side and encodes as bare `data.f`.

use crate::error::{GenError, GenResult};
use crate::naming::{elm_field_name, elm_string, is_value_identifier};
use crate::resolver::{self, TypeDescriptor, wrap};
use crate::schema::{DefaultLiteral, FieldDecl, Requiredness, Schema};
use crate::usage::Usage;

/// One resolved record field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldModel {
    /// Wire key, used verbatim in the JSON object.
    pub key: String,
    /// Normalized Elm record field name.
    pub elm_name: String,
    pub ty: TypeDescriptor,
    pub requiredness: Requiredness,
}

impl FieldModel {
    /// Resolve a field declaration against its schema.
    ///
    /// Fails when the key does not normalize to a lowercase Elm identifier, e.g. `_`
    /// or `2fa`.
    pub fn new(key: &str, decl: &FieldDecl, schema: &Schema) -> GenResult<Self> {
        let elm_name = elm_field_name(key);
        if !is_value_identifier(&elm_name) {
            return Err(GenError::structure(format!(
                "field `{key}` does not form a valid Elm field name"
            )));
        }

        Ok(Self {
            key: key.to_string(),
            elm_name,
            ty: resolver::resolve(&decl.type_token, schema)?,
            requiredness: decl.requiredness.clone(),
        })
    }

    /// Whether the record field is a `Maybe`.
    pub fn is_maybe(&self) -> bool {
        match &self.requiredness {
            Requiredness::Required => false,
            Requiredness::Optional { default } => default.is_none(),
            Requiredness::SentinelNow | Requiredness::SentinelNever => true,
        }
    }

    /// Elm type of the record field.
    pub fn type_annotation(&self) -> String {
        let type_name = self.ty.type_name();
        if self.is_maybe() {
            format!("Maybe {}", wrap(&type_name))
        } else {
            type_name
        }
    }

    /// Expression of type `Maybe E.Value` for the encoder's key list.
    pub fn encoder_fragment(&self) -> String {
        let value = format!("data.{}", self.elm_name);
        match &self.requiredness {
            Requiredness::SentinelNever => "Nothing".to_string(),
            Requiredness::SentinelNow => format!("Maybe.map {} {value}", wrap(&self.ty.encoder())),
            Requiredness::Required | Requiredness::Optional { default: Some(_) } => {
                format!("Just <| {} {value}", self.ty.encoder())
            }
            Requiredness::Optional { default: None } if self.ty.is_raw_value() => value,
            Requiredness::Optional { default: None } => {
                format!("Maybe.map {} {value}", wrap(&self.ty.encoder()))
            }
        }
    }

    /// Decoder expression for the field's value.
    pub fn decoder_fragment(&self, schema: &Schema) -> GenResult<String> {
        let key = elm_string(&self.key);
        let access = match &self.requiredness {
            Requiredness::SentinelNever => return Ok("D.succeed Nothing".to_string()),
            Requiredness::SentinelNow => format!("D.map Just <| D.field {key}"),
            Requiredness::Required => format!("D.field {key}"),
            Requiredness::Optional { default: None } => format!("opField {key}"),
            Requiredness::Optional {
                default: Some(default),
            } => format!("opFieldWithDefault {key} {}", default_expr(default)),
        };
        Ok(format!("{access} {}", wrap(&self.ty.decoder(schema)?)))
    }

    /// Record the helpers this field's renderings reference.
    pub fn record_usage(&self, usage: &mut Usage) {
        self.ty.record_usage(usage);
        match &self.requiredness {
            Requiredness::Optional { default: None } => usage.op_field = true,
            Requiredness::Optional { default: Some(_) } => usage.op_field_with_default = true,
            Requiredness::Required | Requiredness::SentinelNow | Requiredness::SentinelNever => {}
        }
    }
}

// Default expressions are spliced in as a single argument.
fn default_expr(default: &DefaultLiteral) -> String {
    wrap(&default.to_elm())
}
