//! Entity model definitions
//!
//! This module contains the normalized output graph of one build run:
//! [`EntityContext`] (the root aggregate), [`Entity`] (one table mapped to
//! one generated type), and [`Property`] (one column mapped to one
//! generated field). Entities are stored in insertion order and addressed
//! by index handles; the `"<schema>.<table>"` key maps to a handle through
//! an explicit index rather than by scanning.

use entgen_core::SystemType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Property
// ============================================================================

/// Represents one generated field, mapped from a source column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Source column name (immutable key within the entity)
    pub column_name: String,

    /// Generated field identifier, unique within the owning entity
    pub property_name: String,

    /// Human-readable description from source metadata
    pub description: Option<String>,

    /// Native database type name, copied verbatim from the source
    pub native_type: String,

    /// Resolved generation-target type
    pub system_type: SystemType,

    /// Whether the column is part of the primary key
    pub is_primary_key: bool,

    /// Whether the column accepts NULL
    pub is_nullable: bool,

    /// Reserved for the relationship enrichment pass; always false here
    pub is_foreign_key: bool,

    /// Whether the column auto-increments
    pub is_identity: bool,

    /// Whether the column is an optimistic-concurrency token
    pub is_row_version: bool,

    /// Reserved for the relationship enrichment pass; always false here
    pub is_auto_generated: bool,

    /// Whether the builder has populated this property
    pub is_processed: bool,
}

// ============================================================================
// PropertyCollection
// ============================================================================

/// Ordered collection of properties, keyed by column name
///
/// Carries its own processed flag, separate from the owning entity's:
/// multi-pass callers may query one without the other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyCollection {
    /// Properties in insertion order
    items: Vec<Property>,

    /// Lookup: column name → index into `items`
    index: HashMap<String, usize>,

    /// Whether the builder has fully populated this collection
    pub is_processed: bool,
}

impl PropertyCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// All properties in insertion order
    pub fn items(&self) -> &[Property] {
        &self.items
    }

    /// Get a property by column name
    pub fn by_column(&self, column_name: &str) -> Option<&Property> {
        self.index.get(column_name).map(|&i| &self.items[i])
    }

    /// Insert a property, or replace the existing one with the same
    /// column name in place (insertion order is preserved on replace)
    pub fn upsert(&mut self, property: Property) -> usize {
        match self.index.get(&property.column_name) {
            Some(&i) => {
                self.items[i] = property;
                i
            }
            None => {
                let i = self.items.len();
                self.index.insert(property.column_name.clone(), i);
                self.items.push(property);
                i
            }
        }
    }

    /// Check if a property exists for the column name
    pub fn contains(&self, column_name: &str) -> bool {
        self.index.contains_key(column_name)
    }

    /// Number of properties
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over properties in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.items.iter()
    }
}

// ============================================================================
// Entity
// ============================================================================

/// Represents one source table mapped to one generated type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// The `"<schema>.<table>"` key, in exact source casing (immutable)
    pub full_name: String,

    /// Source table name, unchanged by renaming
    pub table_name: String,

    /// Source schema name, unchanged by renaming
    pub table_schema: String,

    /// Generated entity class identifier (class-name namespace)
    pub class_name: String,

    /// Generated data-context member identifier (context-name namespace)
    pub context_name: String,

    /// Generated mapping class identifier (class-name namespace)
    pub mapping_name: String,

    /// Human-readable description from source metadata
    pub description: Option<String>,

    /// Properties keyed by column name
    pub properties: PropertyCollection,

    /// Whether the builder has finished this entity
    pub is_processed: bool,
}

impl Entity {
    /// Get a property by column name
    pub fn property(&self, column_name: &str) -> Option<&Property> {
        self.properties.by_column(column_name)
    }

    /// Get the primary key properties
    pub fn primary_key_properties(&self) -> Vec<&Property> {
        self.properties.iter().filter(|p| p.is_primary_key).collect()
    }

    /// Get the row-version property, if the table has a concurrency token
    pub fn row_version_property(&self) -> Option<&Property> {
        self.properties.iter().find(|p| p.is_row_version)
    }

    /// Number of properties
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}

// ============================================================================
// EntityContext
// ============================================================================

/// Handle to an entity inside an [`EntityContext`]
pub type EntityHandle = usize;

/// Root aggregate for one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EntityContextData")]
pub struct EntityContext {
    /// Logical database name, from the `UnitOfWork` parameter
    pub database_name: String,

    /// Generated data-context class identifier
    pub class_name: String,

    /// Entities in insertion order
    entities: Vec<Entity>,

    /// Lookup: `"<schema>.<table>"` key → index into `entities`.
    /// Derived state; never serialized, rebuilt on deserialize.
    #[serde(skip)]
    index: HashMap<String, usize>,
}

/// Serialization shape for [`EntityContext`]: the persisted fields only
#[derive(Deserialize)]
struct EntityContextData {
    database_name: String,
    class_name: String,
    entities: Vec<Entity>,
}

impl From<EntityContextData> for EntityContext {
    fn from(data: EntityContextData) -> Self {
        let index = data
            .entities
            .iter()
            .enumerate()
            .map(|(i, e)| (e.full_name.clone(), i))
            .collect();
        Self {
            database_name: data.database_name,
            class_name: data.class_name,
            entities: data.entities,
            index,
        }
    }
}

impl EntityContext {
    /// Create an empty context for the given database and class names
    pub fn new(database_name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            database_name: database_name.into(),
            class_name: class_name.into(),
            entities: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// All entities in insertion order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Number of entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Get an entity handle by its `"<schema>.<table>"` key
    pub fn handle_by_key(&self, key: &str) -> Option<EntityHandle> {
        self.index.get(key).copied()
    }

    /// Get an entity by its `"<schema>.<table>"` key
    pub fn entity_by_key(&self, key: &str) -> Option<&Entity> {
        self.handle_by_key(key).map(|h| &self.entities[h])
    }

    /// Get an entity by handle
    pub fn entity(&self, handle: EntityHandle) -> &Entity {
        &self.entities[handle]
    }

    /// Get a mutable entity by handle
    pub fn entity_mut(&mut self, handle: EntityHandle) -> &mut Entity {
        &mut self.entities[handle]
    }

    /// Add an entity, returning its handle.
    ///
    /// At most one entity may exist per key: adding an entity whose
    /// `full_name` is already present returns the existing handle and
    /// drops the new value.
    pub fn add_entity(&mut self, entity: Entity) -> EntityHandle {
        if let Some(handle) = self.handle_by_key(&entity.full_name) {
            return handle;
        }
        let handle = self.entities.len();
        self.index.insert(entity.full_name.clone(), handle);
        self.entities.push(entity);
        handle
    }

    /// Total number of properties across all entities
    pub fn property_count(&self) -> usize {
        self.entities.iter().map(Entity::property_count).sum()
    }
}

// ============================================================================
// Tests
// ============================================================================
