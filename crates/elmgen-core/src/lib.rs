//! elmgen-core - Schema resolution and Elm codec synthesis
//!
//! This crate turns a declarative record schema into an Elm module with a type
//! definition, a JSON encoder and a JSON decoder per record:
//! - [`Schema`] loads and validates a schema document
//! - [`resolver`] maps type tokens to [`TypeDescriptor`]s and their Elm renderings
//! - [`FieldModel`] and [`ObjectModel`] render fields and whole records
//! - [`ModuleEmitter`] orders records and synthesizes imports and exports
//!
//! Everything here is pure: no I/O, no clock. The caller passes the generation
//! timestamp and writes the output.
//!
//! ```
//! use elmgen_core::prelude::*;
//!
//! let schema = Schema::from_yaml_str(r#"
//! name: Example
//! version: "1"
//! objects:
//!   Point:
//!     fields:
//!       x:
//!         type: int
//!         required: true
//! "#)?;
//!
//! let code = ModuleEmitter::default().emit(&schema, "Example.Objects", 0)?;
//! assert!(code.contains("pointDecoder : D.Decoder Point"));
//! # Ok::<(), GenError>(())
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod module;
pub mod naming;
pub mod object;
pub mod resolver;
pub mod schema;
pub mod usage;

pub use config::ImportModules;
pub use error::{GenError, GenResult};
pub use field::FieldModel;
pub use module::{ModuleEmitter, generate_module};
pub use object::ObjectModel;
pub use resolver::TypeDescriptor;
pub use schema::{DefaultLiteral, FieldDecl, RecordDecl, Requiredness, Schema};
pub use usage::Usage;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        GenError, GenResult, ImportModules, ModuleEmitter, Schema, TypeDescriptor,
        generate_module,
    };
}
