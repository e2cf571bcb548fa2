//! Error types for schema loading and code generation

use thiserror::Error;

/// Result type alias for generator operations
pub type GenResult<T> = Result<T, GenError>;

/// Error type for generator operations
///
/// Every variant is fatal for the schema file being processed: generation stops at the
/// first error and no output is produced for that file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    /// The schema document is malformed or misses a required key
    #[error("schema structure error: {0}")]
    SchemaStructure(String),

    /// A type token matches no grammar rule
    #[error("unknown type `{0}`")]
    UnknownType(String),

    /// A record or enum reference does not resolve within the loaded schema
    #[error("unresolved reference `{0}`")]
    UnresolvedReference(String),
}

impl GenError {
    /// Returns a stable numeric code for the error kind
    pub fn error_code(&self) -> u32 {
        match self {
            GenError::SchemaStructure(_) => 1,
            GenError::UnknownType(_) => 2,
            GenError::UnresolvedReference(_) => 3,
        }
    }

    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            GenError::SchemaStructure(_) => "schema_structure",
            GenError::UnknownType(_) => "unknown_type",
            GenError::UnresolvedReference(_) => "unresolved_reference",
        }
    }

    pub(crate) fn structure(message: impl Into<String>) -> Self {
        GenError::SchemaStructure(message.into())
    }
}

impl From<serde_yaml::Error> for GenError {
    fn from(err: serde_yaml::Error) -> Self {
        GenError::SchemaStructure(err.to_string())
    }
}
