//! Serialization and deserialization for schema sets
//!
//! This module provides functionality for saving and loading schema set
//! files, including JSON serialization, file I/O, and file version
//! migration. Schema readers run out-of-process and hand their output to
//! Entgen as one of these files.

use crate::context::SchemaSet;
use entgen_core::{BuildError, BuildResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Constants
// ============================================================================

/// Current schema file version
pub const SCHEMA_FILE_VERSION: u32 = 1;

/// File extension for Entgen schema set files
pub const SCHEMA_FILE_EXTENSION: &str = "entschema";

// ============================================================================
// Schema File Wrapper
// ============================================================================

/// Wrapper for schema set files that includes version information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaFile {
    /// File version for migration purposes
    pub file_version: u32,

    /// The schema set data
    pub schemas: SchemaSet,
}

impl SchemaFile {
    /// Create a new schema file from a schema set
    pub fn new(schemas: SchemaSet) -> Self {
        Self {
            file_version: SCHEMA_FILE_VERSION,
            schemas,
        }
    }

    /// Check if migration is needed
    pub fn needs_migration(&self) -> bool {
        self.file_version < SCHEMA_FILE_VERSION
    }

    /// Migrate to the latest file version
    pub fn migrate(&mut self) -> BuildResult<()> {
        while self.file_version < SCHEMA_FILE_VERSION {
            self.migrate_one_version()?;
        }
        Ok(())
    }

    /// Migrate one version at a time
    fn migrate_one_version(&mut self) -> BuildResult<()> {
        match self.file_version {
            // Add migration logic for each version here
            _ => {
                // No migration needed or unknown version
                self.file_version = SCHEMA_FILE_VERSION;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Save Functions
// ============================================================================

/// Save a schema set to a file
pub fn save_schema_set(schemas: &SchemaSet, path: impl AsRef<Path>) -> BuildResult<()> {
    let path = path.as_ref();
    let file = SchemaFile::new(schemas.clone());

    let json = serde_json::to_string_pretty(&file).map_err(|e| BuildError::FileWrite {
        path: path.to_path_buf(),
        message: format!("Failed to serialize schema set: {}", e),
    })?;

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(path, json).map_err(|e| BuildError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::debug!("Saved schema set to {}", path.display());
    Ok(())
}

/// Save a schema set to a JSON string
pub fn schema_set_to_string(schemas: &SchemaSet) -> BuildResult<String> {
    let file = SchemaFile::new(schemas.clone());
    Ok(serde_json::to_string_pretty(&file)?)
}

// ============================================================================
// Load Functions
// ============================================================================

/// Load a schema set from a file
///
/// Migrates older file versions forward and rejects files newer than
/// this build understands.
pub fn load_schema_set(path: impl AsRef<Path>) -> BuildResult<SchemaSet> {
    let path = path.as_ref();

    let json = std::fs::read_to_string(path).map_err(|e| BuildError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let schemas = load_schema_set_from_string(&json).map_err(|e| BuildError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::debug!(
        "Loaded {} schema(s), {} table(s) from {}",
        schemas.schema_count(),
        schemas.table_count(),
        path.display()
    );
    Ok(schemas)
}

/// Load a schema set from a JSON string
pub fn load_schema_set_from_string(json: &str) -> BuildResult<SchemaSet> {
    let mut file: SchemaFile = serde_json::from_str(json)
        .map_err(|e| BuildError::InvalidFileFormat(e.to_string()))?;

    if file.file_version > SCHEMA_FILE_VERSION {
        return Err(BuildError::FileVersionMismatch {
            expected: SCHEMA_FILE_VERSION,
            found: file.file_version,
        });
    }

    if file.needs_migration() {
        file.migrate()?;
    }

    Ok(file.schemas)
}

// ============================================================================
// Tests
// ============================================================================
