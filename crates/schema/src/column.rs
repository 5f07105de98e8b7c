//! Column definitions for source tables
//!
//! This module contains the `Column` struct describing one column as the
//! schema source reported it: name, optional description, the native
//! database type name, the declared language-type name, and the flags the
//! builder classifies from.

use entgen_core::{BuildError, BuildResult, Validatable};
use serde::{Deserialize, Serialize};

// ============================================================================
// Column
// ============================================================================

/// Represents one column of a source table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, exactly as the source reported it
    pub name: String,

    /// Human-readable description from source metadata
    pub description: Option<String>,

    /// Native database type name (e.g. "nvarchar", "rowversion")
    pub native_type: String,

    /// Declared language-type name (e.g. "System.String"), resolved to a
    /// `SystemType` during the build
    pub language_type: String,

    /// Whether the column accepts NULL
    pub is_nullable: bool,

    /// Whether the column is part of the primary key
    pub is_primary_key: bool,

    /// Whether the column auto-increments
    pub auto_increment: bool,
}

impl Column {
    /// Create a new column with the given name and type names
    pub fn new(
        name: impl Into<String>,
        native_type: impl Into<String>,
        language_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            native_type: native_type.into(),
            language_type: language_type.into(),
            is_nullable: false,
            is_primary_key: false,
            auto_increment: false,
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the column as nullable
    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    /// Mark the column as part of the primary key
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    /// Mark the column as auto-incrementing
    pub fn identity(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    // ========================================================================
    // Query methods
    // ========================================================================

    /// Compare the native type name case-insensitively
    pub fn native_type_is(&self, name: &str) -> bool {
        self.native_type.eq_ignore_ascii_case(name)
    }
}

impl Validatable for Column {
    fn validate(&self) -> BuildResult<()> {
        if self.name.is_empty() {
            return Err(BuildError::invalid_schema("Column name cannot be empty"));
        }

        if self.native_type.is_empty() {
            return Err(BuildError::invalid_schema(format!(
                "Column '{}' has no native type",
                self.name
            )));
        }

        if self.language_type.is_empty() {
            return Err(BuildError::invalid_schema(format!(
                "Column '{}' has no language type",
                self.name
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
