//! # Entgen Schema
//!
//! This crate provides the input side of the Entgen pipeline: the data
//! structures describing a source database as an external schema reader
//! reported it, plus the build context handed to the model builder.
//!
//! ## Core Concepts
//!
//! - **Schema**: A named grouping of tables (e.g. `dbo`)
//! - **Table**: One source table with its ordered column list
//! - **Column**: One source column with native/language type names and flags
//! - **SchemaSet**: The ordered set of schemas one build walks
//! - **Parameters**: Key/value build configuration (must contain `UnitOfWork`)
//! - **BuildContext**: Schema set + parameters, consumed read-only by the builder
//!

// Module declarations
pub mod column;
pub mod context;
pub mod serialization;
pub mod table;

// Re-export commonly used types at crate root
pub use column::Column;
pub use context::{BuildContext, PARAM_UNIT_OF_WORK, Parameters, SchemaSet};
pub use serialization::{
    SCHEMA_FILE_EXTENSION, SCHEMA_FILE_VERSION, SchemaFile, load_schema_set,
    load_schema_set_from_string, save_schema_set, schema_set_to_string,
};
pub use table::{Schema, Table};

// Re-export core types that are commonly used with the schema
pub use entgen_core::{BuildError, BuildResult, SystemType, Validatable};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
