//! # Entgen Core
//!
//! Core types, traits, and error handling for Entgen.
//!
//! This crate provides the foundational building blocks used throughout
//! the Entgen pipeline, including:
//!
//! - **Types**: The closed `SystemType` mapping from language-type names
//!   to generation-target types
//! - **Traits**: Common behaviors like `Validatable`
//! - **Errors**: Unified error handling with `BuildError` and `BuildResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{BuildError, BuildResult, ResultExt};
pub use traits::Validatable;
pub use types::SystemType;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
