//! Build context and configuration parameters
//!
//! A [`BuildContext`] bundles everything one build invocation needs: the
//! schema set the external reader produced and the key/value parameters
//! the project configuration supplied. The builder in `entgen_model`
//! consumes it read-only.

use crate::table::Schema;
use entgen_core::{BuildError, BuildResult, Validatable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Constants
// ============================================================================

/// Required parameter naming the logical database/unit of work
pub const PARAM_UNIT_OF_WORK: &str = "UnitOfWork";

// ============================================================================
// Parameters
// ============================================================================

/// Key/value configuration parameters for one build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    values: BTreeMap<String, String>,
}

impl Parameters {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Set a parameter using builder pattern
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Get a parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Get a required parameter value, or fail with a configuration error
    pub fn require(&self, key: &str) -> BuildResult<&str> {
        self.get(key)
            .ok_or_else(|| BuildError::missing_parameter(key))
    }

    /// Check whether a parameter is present
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the parameter set is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over key/value pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// SchemaSet
// ============================================================================

/// The ordered set of schemas one build walks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSet {
    schemas: Vec<Schema>,
}

impl SchemaSet {
    /// Create an empty schema set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a schema set from an ordered list of schemas
    pub fn from_schemas(schemas: Vec<Schema>) -> Self {
        Self { schemas }
    }

    /// Add a schema
    pub fn push(&mut self, schema: Schema) {
        self.schemas.push(schema);
    }

    /// Add a schema using builder pattern
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.push(schema);
        self
    }

    /// All schemas in enumeration order
    pub fn schemas(&self) -> &[Schema] {
        &self.schemas
    }

    /// Get a schema by name
    pub fn schema_by_name(&self, name: &str) -> Option<&Schema> {
        self.schemas.iter().find(|s| s.name == name)
    }

    /// Number of schemas
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Total number of tables across all schemas
    pub fn table_count(&self) -> usize {
        self.schemas.iter().map(Schema::table_count).sum()
    }
}

impl Validatable for SchemaSet {
    fn validate(&self) -> BuildResult<()> {
        for schema in &self.schemas {
            schema.validate()?;
        }

        // Check for duplicate "<schema>.<table>" keys across the set
        let mut keys = std::collections::HashSet::new();
        for schema in &self.schemas {
            for table in &schema.tables {
                let key = schema.table_key(table);
                if !keys.insert(key.clone()) {
                    return Err(BuildError::DuplicateTable(key));
                }
            }
        }

        Ok(())
    }
}

// ============================================================================
// BuildContext
// ============================================================================

/// Everything one build invocation consumes: schemas plus parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildContext {
    /// Configuration parameters (must contain `UnitOfWork`)
    pub parameters: Parameters,

    /// The schema set to transform
    pub schemas: SchemaSet,
}

impl BuildContext {
    /// Create a build context from a schema set and parameters
    pub fn new(schemas: SchemaSet, parameters: Parameters) -> Self {
        Self {
            parameters,
            schemas,
        }
    }

    /// The current schemas, in enumeration order
    pub fn current_schemas(&self) -> &[Schema] {
        self.schemas.schemas()
    }

    /// Get a required parameter value
    pub fn require_parameter(&self, key: &str) -> BuildResult<&str> {
        self.parameters.require(key)
    }

    /// The unit-of-work name, if configured
    pub fn unit_of_work(&self) -> Option<&str> {
        self.parameters.get(PARAM_UNIT_OF_WORK)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;

    #[test]
    fn test_parameters_require() {
        let params = Parameters::new().with(PARAM_UNIT_OF_WORK, "Shop");
        assert_eq!(params.require(PARAM_UNIT_OF_WORK).unwrap(), "Shop");

        let err = params.require("Namespace").unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(err.to_string(), "Missing required build parameter: 'Namespace'");
    }

    #[test]
    fn test_parameters_iteration_is_ordered() {
        let params = Parameters::new()
            .with("Zeta", "1")
            .with("Alpha", "2")
            .with("Mid", "3");
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Alpha", "Mid", "Zeta"]);
    }

    #[test]
    fn test_schema_set_lookup() {
        let set = SchemaSet::new()
            .with_schema(Schema::new("dbo").with_table(Table::new("Customer")))
            .with_schema(Schema::new("sales").with_table(Table::new("Order")));

        assert_eq!(set.schema_count(), 2);
        assert_eq!(set.table_count(), 2);
        assert!(set.schema_by_name("sales").is_some());
        assert!(set.schema_by_name("missing").is_none());
    }

    #[test]
    fn test_schema_set_detects_cross_schema_duplicates() {
        // Same table name in two schemas is fine; the composite key differs.
        let distinct = SchemaSet::new()
            .with_schema(Schema::new("dbo").with_table(Table::new("Order")))
            .with_schema(Schema::new("sales").with_table(Table::new("Order")));
        assert!(distinct.validate().is_ok());

        let duplicated = SchemaSet::new()
            .with_schema(Schema::new("dbo").with_table(Table::new("Order")))
            .with_schema(Schema::new("dbo").with_table(Table::new("Order")));
        assert!(duplicated.validate().is_err());
    }

    #[test]
    fn test_build_context_accessors() {
        let ctx = BuildContext::new(
            SchemaSet::new().with_schema(Schema::new("dbo")),
            Parameters::new().with(PARAM_UNIT_OF_WORK, "Shop"),
        );

        assert_eq!(ctx.current_schemas().len(), 1);
        assert_eq!(ctx.unit_of_work(), Some("Shop"));
        assert!(ctx.require_parameter(PARAM_UNIT_OF_WORK).is_ok());
    }
}
