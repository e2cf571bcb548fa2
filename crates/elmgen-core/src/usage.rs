//! Usage accumulator for import synthesis.
//!
//! Every rendering step that emits a reference to a conditional helper flips the
//! matching flag here. The module emitter derives its import list from the merged
//! result instead of inspecting generated text.

/// Highest `D.mapN` arity provided by `Json.Decode` itself.
pub const MAX_BUILTIN_ARITY: usize = 8;

/// Helpers referenced by generated code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    /// `Dict` in a type annotation.
    pub dict: bool,
    /// `opField` in a decoder.
    pub op_field: bool,
    /// `opFieldWithDefault` in a decoder.
    pub op_field_with_default: bool,
    /// `maybeObject` in an encoder.
    pub maybe_object: bool,
    /// `Timestamp`, `encodeTimestamp` or `timestampDecoder`.
    pub timestamp: bool,
    /// Anything from the enums module.
    pub enums: bool,
    /// Largest decoder combinator arity.
    pub max_arity: usize,
}

impl Usage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Combine with the usage of another rendering.
    pub fn merge(&mut self, other: &Usage) {
        self.dict |= other.dict;
        self.op_field |= other.op_field;
        self.op_field_with_default |= other.op_field_with_default;
        self.maybe_object |= other.maybe_object;
        self.timestamp |= other.timestamp;
        self.enums |= other.enums;
        self.max_arity = self.max_arity.max(other.max_arity);
    }

    /// Whether some decoder needs a `mapN` beyond what `Json.Decode` provides.
    pub fn needs_extended_arity(&self) -> bool {
        self.max_arity > MAX_BUILTIN_ARITY
    }

    /// Names the decode-extras module must expose, in import order.
    pub fn decode_extra_exposing(&self) -> Vec<&'static str> {
        let mut exposing = Vec::new();
        if self.op_field {
            exposing.push("opField");
        }
        if self.op_field_with_default {
            exposing.push("opFieldWithDefault");
        }
        exposing
    }
}
