//! # Entgen Model
//!
//! This crate provides the output side of the Entgen pipeline: the
//! normalized entity model and the builder that produces it from a
//! schema set.
//!
//! ## Core Concepts
//!
//! - **EntityContext**: Root aggregate of one build run (entities + names)
//! - **Entity**: One source table mapped to one generated type
//! - **Property**: One source column mapped to one generated field
//! - **UniqueNamer**: Collision-free identifier issuing, per namespace
//! - **EntityContextBuilder**: The orchestrator walking the schema set
//!

// ============================================================================
// Modules
// ============================================================================

pub mod builder;
pub mod entity;
pub mod namer;
pub mod serialization;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::{EXCLUDED_NATIVE_TYPES, EntityContextBuilder};
pub use entity::{Entity, EntityContext, EntityHandle, Property, PropertyCollection};
pub use namer::UniqueNamer;
pub use serialization::{
    entity_context_from_string, entity_context_to_string, save_entity_context,
};

// Re-export core types that are commonly used with the model
pub use entgen_core::{BuildError, BuildResult, SystemType};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
