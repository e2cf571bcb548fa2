//! Generator configuration types

use crate::error::{GenError, GenResult};
use crate::naming::is_module_name;
use serde::{Deserialize, Serialize};

/// Elm modules that provide the helpers generated code relies on
///
/// Only the modules a generated file actually uses are imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportModules {
    /// Module exposing `opField` and `opFieldWithDefault`, plus `map9` and above
    #[serde(default = "default_decode_extra")]
    pub decode_extra: String,

    /// Module exposing `maybeObject`
    #[serde(default = "default_encode_extra")]
    pub encode_extra: String,

    /// Module exposing `Timestamp`, `encodeTimestamp` and `timestampDecoder`
    #[serde(default = "default_timestamp")]
    pub timestamp: String,

    /// Module holding the enum types, imported `as Enums`
    #[serde(default = "default_enums")]
    pub enums: String,
}

fn default_decode_extra() -> String {
    "Internal.Tools.DecodeExtra".to_string()
}

fn default_encode_extra() -> String {
    "Internal.Tools.EncodeExtra".to_string()
}

fn default_timestamp() -> String {
    "Internal.Tools.Timestamp".to_string()
}

fn default_enums() -> String {
    "Internal.Tools.SpecEnums".to_string()
}

impl Default for ImportModules {
    fn default() -> Self {
        Self {
            decode_extra: default_decode_extra(),
            encode_extra: default_encode_extra(),
            timestamp: default_timestamp(),
            enums: default_enums(),
        }
    }
}

impl ImportModules {
    /// Check that every configured module is a valid Elm module name
    pub fn validate(&self) -> GenResult<()> {
        for (key, value) in [
            ("decode_extra", &self.decode_extra),
            ("encode_extra", &self.encode_extra),
            ("timestamp", &self.timestamp),
            ("enums", &self.enums),
        ] {
            if !is_module_name(value) {
                return Err(GenError::structure(format!(
                    "imports.{key} `{value}` is not a valid Elm module name"
                )));
            }
        }
        Ok(())
    }
}
