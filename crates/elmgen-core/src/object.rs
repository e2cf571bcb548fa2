//! Per-record renderings: type definition, encoder and decoder.
//!
//! Output follows elm-format layout so generated modules survive a format pass
//! unchanged. For a record `Point` with fields `x` and `y`:
//!
//! ```elm
//! type alias Point =
//!     { x : Int
//!     , y : Int
//!     }
//!
//!
//! encodePoint : Point -> E.Value
//! encodePoint data =
//!     maybeObject
//!         [ ( "x", Just <| E.int data.x )
//!         , ( "y", Just <| E.int data.y )
//!         ]
//!
//!
//! pointDecoder : D.Decoder Point
//! pointDecoder =
//!     D.map2
//!         (\a b ->
//!             { x = a, y = b }
//!         )
//!         (D.field "x" D.int)
//!         (D.field "y" D.int)
//! ```
//!
//! Self-referencing records become a single-constructor union (`type Tree = Tree {...}`)
//! so the type is not an infinitely expanding alias; the encoder unwraps the constructor
//! in its pattern and [`ObjectModel::construct`] wraps decoded values back into it.

use crate::error::{GenError, GenResult};
use crate::field::FieldModel;
use crate::naming::{elm_string, lower_first, positional_binder, record_display_name};
use crate::resolver::wrap;
use crate::schema::{RecordDecl, Schema};
use crate::usage::Usage;
use std::collections::BTreeMap;

/// One record, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectModel {
    /// Name as declared in the schema.
    pub name: String,
    /// Elm type name.
    pub display_name: String,
    pub description: String,
    pub self_referencing: bool,
    /// Fields in key-ascending order.
    pub fields: Vec<FieldModel>,
}

impl ObjectModel {
    /// Resolve every field of a record declaration.
    pub fn build(name: &str, decl: &RecordDecl, schema: &Schema) -> GenResult<Self> {
        let mut fields = Vec::with_capacity(decl.fields.len());
        let mut seen: BTreeMap<String, &str> = BTreeMap::new();

        for (key, field_decl) in &decl.fields {
            let field = FieldModel::new(key, field_decl, schema)?;
            if let Some(previous) = seen.insert(field.elm_name.clone(), key) {
                return Err(GenError::structure(format!(
                    "record `{name}`: fields `{previous}` and `{key}` both map to Elm field `{}`",
                    field.elm_name
                )));
            }
            fields.push(field);
        }

        Ok(Self {
            name: name.to_string(),
            display_name: record_display_name(name),
            description: decl.description.trim().to_string(),
            self_referencing: decl.is_self_referencing(),
            fields,
        })
    }

    pub fn encoder_name(&self) -> String {
        format!("encode{}", self.display_name)
    }

    pub fn decoder_name(&self) -> String {
        format!("{}Decoder", lower_first(&self.display_name))
    }

    /// Name in the module's exposing list.
    pub fn exposed_type(&self) -> String {
        if self.self_referencing {
            format!("{}(..)", self.display_name)
        } else {
            self.display_name.clone()
        }
    }

    /// Number of decoders combined by the record decoder.
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Build a record value from one expression per field, in field order.
    ///
    /// Self-referencing records wrap the literal in their constructor.
    pub fn construct(&self, values: &[String]) -> String {
        let literal = if self.fields.is_empty() {
            "{}".to_string()
        } else {
            let assignments: Vec<String> = self
                .fields
                .iter()
                .zip(values)
                .map(|(field, value)| format!("{} = {value}", field.elm_name))
                .collect();
            format!("{{ {} }}", assignments.join(", "))
        };

        if self.self_referencing {
            format!("{} {literal}", self.display_name)
        } else {
            literal
        }
    }

    /// Type declaration, preceded by the description as a doc comment.
    pub fn type_definition(&self) -> String {
        let mut code = String::new();

        if !self.description.is_empty() {
            code.push_str(&format!("{{-| {}\n-}}\n", self.description));
        }

        let indent = if self.self_referencing {
            code.push_str(&format!(
                "type {name}\n    = {name}",
                name = self.display_name
            ));
            "        "
        } else {
            code.push_str(&format!("type alias {} =", self.display_name));
            "    "
        };

        if self.fields.is_empty() {
            if self.self_referencing {
                code.push_str(" {}\n");
            } else {
                code.push_str(&format!("\n{indent}{{}}\n"));
            }
            return code;
        }

        code.push('\n');
        for (i, field) in self.fields.iter().enumerate() {
            let lead = if i == 0 { '{' } else { ',' };
            code.push_str(&format!(
                "{indent}{lead} {} : {}\n",
                field.elm_name,
                field.type_annotation()
            ));
        }
        code.push_str(&format!("{indent}}}\n"));

        code
    }

    /// Encoder function. Absent optional fields are dropped by `maybeObject`.
    pub fn encoder(&self) -> String {
        let name = self.encoder_name();
        let pattern = if self.self_referencing {
            format!("({} data)", self.display_name)
        } else {
            "data".to_string()
        };

        let mut code = format!(
            "{name} : {} -> E.Value\n{name} {pattern} =\n",
            self.display_name
        );

        if self.fields.is_empty() {
            code.push_str("    maybeObject []\n");
            return code;
        }

        code.push_str("    maybeObject\n");
        for (i, field) in self.fields.iter().enumerate() {
            let lead = if i == 0 { '[' } else { ',' };
            code.push_str(&format!(
                "        {lead} ( {}, {} )\n",
                elm_string(&field.key),
                field.encoder_fragment()
            ));
        }
        code.push_str("        ]\n");

        code
    }

    /// Decoder function combining one decoder per field.
    pub fn decoder(&self, schema: &Schema) -> GenResult<String> {
        let name = self.decoder_name();
        let mut code = format!("{name} : D.Decoder {}\n{name} =\n", self.display_name);

        if self.fields.is_empty() {
            code.push_str(&format!("    D.succeed {}\n", wrap(&self.construct(&[]))));
            return Ok(code);
        }

        let binders: Vec<String> = (0..self.arity()).map(positional_binder).collect();

        code.push_str(&format!("    {}\n", combinator(self.arity())));
        code.push_str(&format!("        (\\{} ->\n", binders.join(" ")));
        code.push_str(&format!("            {}\n", self.construct(&binders)));
        code.push_str("        )\n");
        for field in &self.fields {
            code.push_str(&format!(
                "        {}\n",
                wrap(&field.decoder_fragment(schema)?)
            ));
        }

        Ok(code)
    }

    /// Type definition, encoder and decoder, two blank lines apart.
    pub fn render(&self, schema: &Schema) -> GenResult<String> {
        Ok([self.type_definition(), self.encoder(), self.decoder(schema)?].join("\n\n"))
    }

    /// Record the helpers this record's renderings reference.
    pub fn record_usage(&self, usage: &mut Usage) {
        usage.maybe_object = true;
        usage.max_arity = usage.max_arity.max(self.arity());
        for field in &self.fields {
            field.record_usage(usage);
        }
    }
}

fn combinator(arity: usize) -> String {
    if arity == 1 {
        "D.map".to_string()
    } else {
        format!("D.map{arity}")
    }
}
