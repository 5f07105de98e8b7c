//! Error types for Entgen
//!
//! This module provides unified error handling across the build pipeline,
//! including configuration errors, type-resolution errors, schema
//! validation errors, and file IO errors.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Entgen
#[derive(Debug, Error)]
pub enum BuildError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Required build parameter missing
    #[error("Missing required build parameter: '{0}'")]
    MissingParameter(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Type Resolution Errors
    // ========================================================================
    /// A column's declared language type could not be resolved
    #[error("Cannot resolve type '{type_name}' for column '{table}.{column}'")]
    TypeResolution {
        table: String,
        column: String,
        type_name: String,
    },

    // ========================================================================
    // Schema Validation Errors
    // ========================================================================
    /// General schema validation error
    #[error("Schema validation error: {0}")]
    InvalidSchema(String),

    /// Table validation failed
    #[error("Table validation failed for '{table}': {message}")]
    TableValidation { table: String, message: String },

    /// Column validation failed
    #[error("Column validation failed for '{table}.{column}': {message}")]
    ColumnValidation {
        table: String,
        column: String,
        message: String,
    },

    /// Duplicate table key within a schema set
    #[error("Duplicate table: '{0}' appears more than once")]
    DuplicateTable(String),

    /// Duplicate column name within a table
    #[error("Duplicate column: '{column}' appears more than once in table '{table}'")]
    DuplicateColumn { table: String, column: String },

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Invalid schema file format
    #[error("Invalid schema file format: {0}")]
    InvalidFileFormat(String),

    /// Schema file version mismatch
    #[error("Schema file version mismatch: expected {expected}, found {found}")]
    FileVersionMismatch { expected: u32, found: u32 },

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl BuildError {
    /// Create a missing-parameter error
    pub fn missing_parameter(key: impl Into<String>) -> Self {
        BuildError::MissingParameter(key.into())
    }

    /// Create a type-resolution error
    pub fn type_resolution(
        table: impl Into<String>,
        column: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        BuildError::TypeResolution {
            table: table.into(),
            column: column.into(),
            type_name: type_name.into(),
        }
    }

    /// Create a schema validation error
    pub fn invalid_schema(msg: impl Into<String>) -> Self {
        BuildError::InvalidSchema(msg.into())
    }

    /// Create a table validation error
    pub fn table_validation(table: impl Into<String>, msg: impl Into<String>) -> Self {
        BuildError::TableValidation {
            table: table.into(),
            message: msg.into(),
        }
    }

    /// Create a column validation error
    pub fn column_validation(
        table: impl Into<String>,
        column: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        BuildError::ColumnValidation {
            table: table.into(),
            column: column.into(),
            message: msg.into(),
        }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        BuildError::Internal(msg.into())
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        BuildError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error is a configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            BuildError::MissingParameter(_) | BuildError::InvalidConfig(_)
        )
    }

    /// Check if this error is a type-resolution error
    pub fn is_type_resolution(&self) -> bool {
        matches!(self, BuildError::TypeResolution { .. })
    }

    /// Check if this error is a schema validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BuildError::InvalidSchema(_)
                | BuildError::TableValidation { .. }
                | BuildError::ColumnValidation { .. }
                | BuildError::DuplicateTable(_)
                | BuildError::DuplicateColumn { .. }
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            BuildError::Io(_) | BuildError::FileRead { .. } | BuildError::FileWrite { .. }
        )
    }
}

/// Result type alias using BuildError
pub type BuildResult<T> = Result<T, BuildError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> BuildResult<T>;
}

impl<T, E: Into<BuildError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> BuildResult<T> {
        self.map_err(|e| {
            let err: BuildError = e.into();
            BuildError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_error() {
        let err = BuildError::missing_parameter("UnitOfWork");
        assert!(err.is_configuration());
        assert!(!err.is_type_resolution());
        assert_eq!(
            err.to_string(),
            "Missing required build parameter: 'UnitOfWork'"
        );
    }

    #[test]
    fn test_type_resolution_error() {
        let err = BuildError::type_resolution("dbo.Customer", "Id", "System.Unknown");
        assert!(err.is_type_resolution());
        assert!(!err.is_configuration());
        assert_eq!(
            err.to_string(),
            "Cannot resolve type 'System.Unknown' for column 'dbo.Customer.Id'"
        );
    }

    #[test]
    fn test_validation_errors() {
        let err = BuildError::table_validation("Customer", "Table name cannot be empty");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Table validation failed for 'Customer': Table name cannot be empty"
        );

        let err = BuildError::DuplicateColumn {
            table: "Customer".to_string(),
            column: "Id".to_string(),
        };
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Duplicate column: 'Id' appears more than once in table 'Customer'"
        );
    }

    #[test]
    fn test_error_with_context() {
        let err = BuildError::with_context("Loading schema", "Permission denied");
        assert_eq!(err.to_string(), "Loading schema: Permission denied");
    }

    #[test]
    fn test_io_error_classification() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BuildError = io_err.into();
        assert!(err.is_io());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_result_ext_adds_context() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = result.with_context("Reading schema file").unwrap_err();
        assert!(err.to_string().starts_with("Reading schema file: "));
    }
}
