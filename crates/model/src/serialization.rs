//! Serialization for built entity contexts
//!
//! The build output is an in-memory object graph; these helpers export it
//! as JSON for external template/rendering collaborators that run
//! out-of-process. No wire format is defined beyond this JSON dump.

use crate::entity::EntityContext;
use entgen_core::{BuildError, BuildResult};
use std::path::Path;

// ============================================================================
// Save Functions
// ============================================================================

/// Save an entity context to a JSON file
pub fn save_entity_context(model: &EntityContext, path: impl AsRef<Path>) -> BuildResult<()> {
    let path = path.as_ref();

    let json = entity_context_to_string(model)?;

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

    tracing::debug!("Saved entity context to {}", path.display());
    Ok(())
}

/// Serialize an entity context to a pretty JSON string
pub fn entity_context_to_string(model: &EntityContext) -> BuildResult<String> {
    Ok(serde_json::to_string_pretty(model)?)
}

/// Deserialize an entity context from a JSON string
pub fn entity_context_from_string(json: &str) -> BuildResult<EntityContext> {
    serde_json::from_str(json).map_err(|e| BuildError::InvalidFileFormat(e.to_string()))
}

// ============================================================================
// Tests
// ============================================================================
