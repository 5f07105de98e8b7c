//! Schema and table definitions
//!
//! This module contains the `Schema` and `Table` structs describing the
//! source database as the schema reader exposed it. Enumeration order is
//! preserved everywhere so that repeated builds over the same input
//! produce the same output.

use crate::column::Column;
use entgen_core::{BuildError, BuildResult, Validatable};
use serde::{Deserialize, Serialize};

// ============================================================================
// Table
// ============================================================================

/// Represents one source table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table name, exactly as the source reported it
    pub name: String,

    /// Human-readable description from source metadata
    pub description: Option<String>,

    /// Columns in source enumeration order
    pub columns: Vec<Column>,
}

impl Table {
    /// Create a new table with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            columns: Vec::new(),
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

    /// Add a column
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    // ========================================================================
    // Query methods
    // ========================================================================

    /// Get a column by name
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Check if the table has a column with the given name
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Get the primary key columns
    pub fn primary_key_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.is_primary_key).collect()
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

impl Validatable for Table {
    fn validate(&self) -> BuildResult<()> {
        if self.name.is_empty() {
            return Err(BuildError::invalid_schema("Table name cannot be empty"));
        }

        for column in &self.columns {
            column.validate().map_err(|e| {
                BuildError::column_validation(&self.name, &column.name, e.to_string())
            })?;
        }

        // Check for duplicate column names
        let mut column_names = std::collections::HashSet::new();
        for column in &self.columns {
            if !column_names.insert(&column.name) {
                return Err(BuildError::DuplicateColumn {
                    table: self.name.clone(),
                    column: column.name.clone(),
                });
            }
        }

        Ok(())
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Represents one named schema (a grouping of tables, e.g. `dbo`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema name, exactly as the source reported it
    pub name: String,

    /// Tables in source enumeration order
    pub tables: Vec<Table>,
}

impl Schema {
    /// Create a new schema with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Vec::new(),
        }
    }

    /// Add a table
    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    /// Get a table by name
    pub fn table_by_name(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// The `"<schema>.<table>"` key for a table in this schema
    pub fn table_key(&self, table: &Table) -> String {
        format!("{}.{}", self.name, table.name)
    }

    /// Get the number of tables
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

impl Validatable for Schema {
    fn validate(&self) -> BuildResult<()> {
        if self.name.is_empty() {
            return Err(BuildError::invalid_schema("Schema name cannot be empty"));
        }

        for table in &self.tables {
            table
                .validate()
                .map_err(|e| BuildError::table_validation(self.table_key(table), e.to_string()))?;
        }

        // Check for duplicate table names within the schema
        let mut table_names = std::collections::HashSet::new();
        for table in &self.tables {
            if !table_names.insert(&table.name) {
                return Err(BuildError::DuplicateTable(self.table_key(table)));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
