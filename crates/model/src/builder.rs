//! # Entity Context Builder
//!
//! The `EntityContextBuilder` is the orchestrator of the transform: it
//! walks every schema and table the [`BuildContext`] exposes, creates or
//! reuses entities, assigns names through the [`UniqueNamer`], classifies
//! column semantics, and marks completion.
//!
//! ## Pipeline
//!
//! ```text
//! BuildContext (schemas + parameters)
//!         │
//!         ▼
//!   EntityContextBuilder::build()
//!         │
//!         ├──► resolve_entity()   per (schema, table)
//!         │        ├──► create_entity()      on first encounter
//!         │        └──► create_properties()  unless already processed
//!         ▼
//!   EntityContext { entities, names }
//! ```
//!
//! Entity resolution is idempotent: revisiting a `(schema, table)` key
//! within one build returns the same entity handle and never repopulates
//! properties, so later enrichment passes (e.g. relationship traversal)
//! can re-enter without duplicating naming decisions.

use entgen_core::{BuildError, BuildResult, SystemType};
use entgen_schema::{BuildContext, Column, PARAM_UNIT_OF_WORK, Schema, Table};
use heck::ToPascalCase;

use crate::entity::{Entity, EntityContext, EntityHandle, Property, PropertyCollection};
use crate::namer::UniqueNamer;

// ============================================================================
// Constants
// ============================================================================

/// Native types with no target-language equivalent; their columns never
/// become properties. Matching is case-insensitive.
pub const EXCLUDED_NATIVE_TYPES: [&str; 2] = ["hierarchyid", "sql_variant"];

// ============================================================================
// EntityContextBuilder
// ============================================================================

/// Builds one [`EntityContext`] from one [`BuildContext`].
///
/// The builder owns the [`UniqueNamer`] for the run; construct a fresh
/// builder per build so naming state never leaks across runs. All methods
/// take `&mut self` — the builder is the sole writer to its namer and no
/// concurrent use is supported.
#[derive(Debug, Default)]
pub struct EntityContextBuilder {
    /// Naming authority for every identifier the run issues
    namer: UniqueNamer,
}

impl EntityContextBuilder {
    /// Create a builder with a fresh namer
    pub fn new() -> Self {
        Self::default()
    }

    // ====================================================================
    // Build
    // ====================================================================

    /// Run the full transform on a build context.
    ///
    /// # Steps
    ///
    /// 1. Read the required `UnitOfWork` parameter (fails before any
    ///    schema walk if absent).
    /// 2. Derive the data-context class name through the namer.
    /// 3. Resolve every table of every schema, in enumeration order.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingParameter`] if `UnitOfWork` is not
    /// configured, and [`BuildError::TypeResolution`] if any column's
    /// language type is outside the closed mapping. There is no partial
    /// success: the first error aborts the whole build.
    pub fn build(&mut self, ctx: &BuildContext) -> BuildResult<EntityContext> {
        let database_name = ctx.require_parameter(PARAM_UNIT_OF_WORK)?.to_string();

        let context_candidate = format!("{}Context", database_name.to_pascal_case());
        let class_name = self.namer.unique_class_name(&context_candidate);

        let mut model = EntityContext::new(database_name, class_name);

        for schema in ctx.current_schemas() {
            for table in &schema.tables {
                self.resolve_entity(&mut model, schema, table)?;
            }
        }

        tracing::info!(
            "Built entity context '{}': {} entities, {} properties",
            model.class_name,
            model.entity_count(),
            model.property_count(),
        );
        Ok(model)
    }

    // ====================================================================
    // Entity resolution
    // ====================================================================

    /// Resolve a `(schema, table)` pair into an entity, creating it on
    /// first encounter and reusing it afterwards.
    ///
    /// Properties are populated only while the entity's collection is not
    /// yet marked processed; the entity itself is marked processed on
    /// every call. Returns the entity's handle within `model`.
    pub fn resolve_entity(
        &mut self,
        model: &mut EntityContext,
        schema: &Schema,
        table: &Table,
    ) -> BuildResult<EntityHandle> {
        let key = schema.table_key(table);
        let handle = match model.handle_by_key(&key) {
            Some(handle) => handle,
            None => self.create_entity(model, schema, table),
        };

        let entity = model.entity_mut(handle);
        if !entity.properties.is_processed {
            self.create_properties(entity, table)?;
        }
        entity.is_processed = true;

        Ok(handle)
    }

    /// Create a new entity for the table and register it in the context
    fn create_entity(
        &mut self,
        model: &mut EntityContext,
        schema: &Schema,
        table: &Table,
    ) -> EntityHandle {
        let class_name = self.namer.unique_class_name(&table.name);
        let mapping_name = self.namer.unique_class_name(&format!("{}Map", class_name));
        let context_name = self.namer.unique_context_name(&class_name);

        tracing::debug!(
            "Creating entity '{}' for table '{}'",
            class_name,
            schema.table_key(table),
        );

        model.add_entity(Entity {
            full_name: schema.table_key(table),
            table_name: table.name.clone(),
            table_schema: schema.name.clone(),
            class_name,
            context_name,
            mapping_name,
            description: table.description.clone(),
            properties: PropertyCollection::new(),
            is_processed: false,
        })
    }

    // ====================================================================
    // Property population
    // ====================================================================

    /// Populate the entity's properties from the table's column list and
    /// mark the collection processed
    fn create_properties(&mut self, entity: &mut Entity, table: &Table) -> BuildResult<()> {
        let scope = entity.class_name.clone();

        for column in &table.columns {
            if Self::is_excluded(column) {
                tracing::debug!(
                    "Skipping column '{}.{}': native type '{}' has no target equivalent",
                    entity.full_name,
                    column.name,
                    column.native_type,
                );
                continue;
            }

            let system_type = SystemType::resolve(&column.language_type).ok_or_else(|| {
                BuildError::type_resolution(&entity.full_name, &column.name, &column.language_type)
            })?;

            let property_name = self.namer.unique_name(&scope, &column.name);

            entity.properties.upsert(Property {
                column_name: column.name.clone(),
                property_name,
                description: column.description.clone(),
                native_type: column.native_type.clone(),
                system_type,
                is_primary_key: column.is_primary_key,
                is_nullable: column.is_nullable,
                is_foreign_key: false,
                is_identity: column.auto_increment,
                is_row_version: Self::is_row_version(column),
                is_auto_generated: false,
                is_processed: true,
            });
        }

        entity.properties.is_processed = true;
        Ok(())
    }

    // ====================================================================
    // Column classification
    // ====================================================================

    /// Whether the column's native type is permanently excluded
    fn is_excluded(column: &Column) -> bool {
        EXCLUDED_NATIVE_TYPES
            .iter()
            .any(|t| column.native_type_is(t))
    }

    /// Whether the column is an optimistic-concurrency token
    fn is_row_version(column: &Column) -> bool {
        column.native_type_is("timestamp") || column.native_type_is("rowversion")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use entgen_schema::{Parameters, SchemaSet};

    fn customer_table() -> Table {
        Table::new("Customer")
            .with_description("Customer accounts")
            .with_column(
                Column::new("Id", "int", "System.Int32")
                    .primary_key()
                    .identity(),
            )
            .with_column(
                Column::new("Name", "nvarchar", "System.String")
                    .with_description("Display name")
                    .nullable(),
            )
            .with_column(Column::new("Version", "rowversion", "System.Byte[]"))
    }

    fn shop_context() -> BuildContext {
        BuildContext::new(
            SchemaSet::new().with_schema(Schema::new("dbo").with_table(customer_table())),
            Parameters::new().with(PARAM_UNIT_OF_WORK, "Shop"),
        )
    }

    #[test]
    fn test_build_shop_scenario() {
        let model = EntityContextBuilder::new().build(&shop_context()).unwrap();

        assert_eq!(model.database_name, "Shop");
        assert_eq!(model.class_name, "ShopContext");
        assert_eq!(model.entity_count(), 1);

        let entity = model.entity_by_key("dbo.Customer").unwrap();
        assert_eq!(entity.full_name, "dbo.Customer");
        assert_eq!(entity.table_name, "Customer");
        assert_eq!(entity.table_schema, "dbo");
        assert_eq!(entity.class_name, "Customer");
        assert_eq!(entity.context_name, "Customer");
        assert_eq!(entity.mapping_name, "CustomerMap");
        assert_eq!(entity.description, Some("Customer accounts".to_string()));
        assert!(entity.is_processed);
        assert!(entity.properties.is_processed);
        assert_eq!(entity.property_count(), 3);

        let id = entity.property("Id").unwrap();
        assert_eq!(id.property_name, "Id");
        assert!(id.is_primary_key);
        assert!(id.is_identity);
        assert!(!id.is_nullable);
        assert_eq!(id.system_type, SystemType::Int32);

        let name = entity.property("Name").unwrap();
        assert!(name.is_nullable);
        assert_eq!(name.description, Some("Display name".to_string()));
        assert_eq!(name.native_type, "nvarchar");

        let version = entity.property("Version").unwrap();
        assert!(version.is_row_version);
        assert!(!version.is_primary_key);
    }

    #[test]
    fn test_missing_unit_of_work_fails_before_schema_walk() {
        let ctx = BuildContext::new(
            SchemaSet::new().with_schema(Schema::new("dbo").with_table(customer_table())),
            Parameters::new(),
        );

        let err = EntityContextBuilder::new().build(&ctx).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "Missing required build parameter: 'UnitOfWork'"
        );
    }

    #[test]
    fn test_unresolvable_type_aborts_build() {
        let ctx = BuildContext::new(
            SchemaSet::new().with_schema(
                Schema::new("dbo").with_table(
                    Table::new("Odd")
                        .with_column(Column::new("Blob", "geometry", "System.Geometry")),
                ),
            ),
            Parameters::new().with(PARAM_UNIT_OF_WORK, "Shop"),
        );

        let err = EntityContextBuilder::new().build(&ctx).unwrap_err();
        assert!(err.is_type_resolution());
        assert_eq!(
            err.to_string(),
            "Cannot resolve type 'System.Geometry' for column 'dbo.Odd.Blob'"
        );
    }

    #[test]
    fn test_excluded_native_types_never_become_properties() {
        let table = Table::new("Spatial")
            .with_column(Column::new("Id", "int", "System.Int32").primary_key())
            .with_column(Column::new("Path", "HierarchyId", "System.Object"))
            .with_column(Column::new("Extra", "SQL_VARIANT", "System.Object"));
        let ctx = BuildContext::new(
            SchemaSet::new().with_schema(Schema::new("dbo").with_table(table)),
            Parameters::new().with(PARAM_UNIT_OF_WORK, "Shop"),
        );

        let model = EntityContextBuilder::new().build(&ctx).unwrap();
        let entity = model.entity_by_key("dbo.Spatial").unwrap();

        // Property count = columns − excluded columns.
        assert_eq!(entity.property_count(), 1);
        assert!(entity.property("Path").is_none());
        assert!(entity.property("Extra").is_none());
    }

    #[test]
    fn test_row_version_classification_is_case_insensitive() {
        let table = Table::new("Versioned")
            .with_column(Column::new("A", "ROWVERSION", "System.Byte[]"))
            .with_column(Column::new("B", "TimeStamp", "System.Byte[]"))
            .with_column(Column::new("C", "binary", "System.Byte[]"));
        let ctx = BuildContext::new(
            SchemaSet::new().with_schema(Schema::new("dbo").with_table(table)),
            Parameters::new().with(PARAM_UNIT_OF_WORK, "Shop"),
        );

        let model = EntityContextBuilder::new().build(&ctx).unwrap();
        let entity = model.entity_by_key("dbo.Versioned").unwrap();

        assert!(entity.property("A").unwrap().is_row_version);
        assert!(entity.property("B").unwrap().is_row_version);
        assert!(!entity.property("C").unwrap().is_row_version);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut builder = EntityContextBuilder::new();
        let ctx = shop_context();
        let mut model = builder.build(&ctx).unwrap();

        let schema = &ctx.current_schemas()[0];
        let table = &schema.tables[0];

        let first = builder.resolve_entity(&mut model, schema, table).unwrap();
        let second = builder.resolve_entity(&mut model, schema, table).unwrap();

        // Same handle, no duplicate entity, properties populated once.
        assert_eq!(first, second);
        assert_eq!(model.entity_count(), 1);
        let entity = model.entity(first);
        assert_eq!(entity.property_count(), 3);
        // Re-resolution must not reissue property names with suffixes.
        assert_eq!(entity.property("Id").unwrap().property_name, "Id");
    }

    #[test]
    fn test_same_table_name_across_schemas_is_disambiguated() {
        let order = || {
            Table::new("Order").with_column(Column::new("Id", "int", "System.Int32").primary_key())
        };
        let ctx = BuildContext::new(
            SchemaSet::new()
                .with_schema(Schema::new("dbo").with_table(order()))
                .with_schema(Schema::new("sales").with_table(order())),
            Parameters::new().with(PARAM_UNIT_OF_WORK, "Shop"),
        );

        let model = EntityContextBuilder::new().build(&ctx).unwrap();
        assert_eq!(model.entity_count(), 2);

        let first = model.entity_by_key("dbo.Order").unwrap();
        let second = model.entity_by_key("sales.Order").unwrap();

        assert_eq!(first.class_name, "Order");
        assert_eq!(first.mapping_name, "OrderMap");
        assert_eq!(second.class_name, "Order2");
        assert_eq!(second.mapping_name, "Order2Map");
        // Context names live in their own namespace, disambiguated there too.
        assert_eq!(first.context_name, "Order");
        assert_eq!(second.context_name, "Order2");
    }

    #[test]
    fn test_property_names_unique_only_within_entity() {
        let with_id = |name: &str| {
            Table::new(name).with_column(Column::new("Id", "int", "System.Int32").primary_key())
        };
        let ctx = BuildContext::new(
            SchemaSet::new().with_schema(
                Schema::new("dbo")
                    .with_table(with_id("Customer"))
                    .with_table(with_id("Order")),
            ),
            Parameters::new().with(PARAM_UNIT_OF_WORK, "Shop"),
        );

        let model = EntityContextBuilder::new().build(&ctx).unwrap();

        // Both entities keep the plain "Id" name; scopes are independent.
        for key in ["dbo.Customer", "dbo.Order"] {
            let entity = model.entity_by_key(key).unwrap();
            assert_eq!(entity.property("Id").unwrap().property_name, "Id");
        }
    }

    #[test]
    fn test_context_class_name_collides_with_table_names() {
        // A table that normalizes to the data-context class name must be
        // disambiguated; the context name was issued first.
        let ctx = BuildContext::new(
            SchemaSet::new().with_schema(
                Schema::new("dbo").with_table(
                    Table::new("ShopContext")
                        .with_column(Column::new("Id", "int", "System.Int32").primary_key()),
                ),
            ),
            Parameters::new().with(PARAM_UNIT_OF_WORK, "Shop"),
        );

        let model = EntityContextBuilder::new().build(&ctx).unwrap();
        assert_eq!(model.class_name, "ShopContext");
        let entity = model.entity_by_key("dbo.ShopContext").unwrap();
        assert_eq!(entity.class_name, "ShopContext2");
    }

    #[test]
    fn test_foreign_key_flags_stay_false() {
        let model = EntityContextBuilder::new().build(&shop_context()).unwrap();
        let entity = model.entity_by_key("dbo.Customer").unwrap();
        for property in entity.properties.iter() {
            assert!(!property.is_foreign_key);
            assert!(!property.is_auto_generated);
            assert!(property.is_processed);
        }
    }

    #[test]
    fn test_source_casing_is_preserved_in_keys() {
        let ctx = BuildContext::new(
            SchemaSet::new().with_schema(
                Schema::new("Sales").with_table(
                    Table::new("customer_order")
                        .with_column(Column::new("id", "int", "System.Int32").primary_key()),
                ),
            ),
            Parameters::new().with(PARAM_UNIT_OF_WORK, "Shop"),
        );

        let model = EntityContextBuilder::new().build(&ctx).unwrap();
        let entity = model.entity_by_key("Sales.customer_order").unwrap();

        // Keys keep source casing; generated names are normalized.
        assert_eq!(entity.table_name, "customer_order");
        assert_eq!(entity.class_name, "CustomerOrder");
        assert_eq!(entity.property("id").unwrap().property_name, "Id");
    }
}
