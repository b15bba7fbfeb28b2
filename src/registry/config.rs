//! Pool configuration records and manifest files
//!
//! Supports saving and loading pool manifests in RON (Rusty Object
//! Notation) and JSON formats.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entity::PoolKey;
use crate::loader::LoadToken;

fn default_capacity() -> usize {
    10
}

fn default_max_size() -> usize {
    10_000
}

/// Configuration for one keyed pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolDefinition {
    /// Key the pool and its template are addressed by
    pub key: PoolKey,
    /// Loader address of the entity template
    pub load_token: LoadToken,
    /// Entities created up front during initialization
    #[serde(default)]
    pub preload_count: usize,
    /// Initial free-list capacity
    #[serde(default = "default_capacity")]
    pub default_capacity: usize,
    /// Retained-entity bound, enforced at release time
    #[serde(default = "default_max_size")]
    pub max_size: usize,
}

impl PoolDefinition {
    /// Create a definition with default capacities and no preload
    pub fn new(key: impl Into<PoolKey>, load_token: impl Into<LoadToken>) -> Self {
        Self {
            key: key.into(),
            load_token: load_token.into(),
            preload_count: 0,
            default_capacity: default_capacity(),
            max_size: default_max_size(),
        }
    }

    /// Set the number of entities created up front
    #[must_use]
    pub fn with_preload(mut self, count: usize) -> Self {
        self.preload_count = count;
        self
    }

    /// Set the free-list capacity and the retained-entity bound
    #[must_use]
    pub fn with_capacity(mut self, default_capacity: usize, max_size: usize) -> Self {
        self.default_capacity = default_capacity;
        self.max_size = max_size;
        self
    }

    /// Check the definition is addressable.
    ///
    /// A preload count above `max_size` is allowed; the extra entities are
    /// created and immediately destroyed during warm-up.
    ///
    /// # Errors
    ///
    /// Returns an error when the key or the load token is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.key.is_valid() {
            return Err(ConfigError::MissingKey);
        }
        if !self.load_token.is_valid() {
            return Err(ConfigError::InvalidToken {
                key: self.key.clone(),
            });
        }
        Ok(())
    }
}

/// Rejected definition entries
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The definition carries an empty key
    #[error("pool definition has an empty key")]
    MissingKey,
    /// The definition carries an empty load token
    #[error("pool `{key}` has an empty load token")]
    InvalidToken {
        /// Key of the offending definition
        key: PoolKey,
    },
}

/// A serializable set of pool definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolManifest {
    /// Manifest name
    pub name: String,
    /// Manifest version for compatibility
    pub version: u32,
    /// All pool definitions in the manifest
    pub pools: Vec<PoolDefinition>,
}

impl PoolManifest {
    /// Create a new empty manifest
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: 1,
            pools: Vec::new(),
        }
    }

    /// Add a pool definition to the manifest
    pub fn add(&mut self, definition: PoolDefinition) -> usize {
        let index = self.pools.len();
        self.pools.push(definition);
        index
    }

    /// Save the manifest to a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<(), ManifestError> {
        let ron_string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ManifestError::Serialize(e.to_string()))?;
        fs::write(path, ron_string).map_err(|e| ManifestError::Io(e.to_string()))?;
        Ok(())
    }

    /// Load a manifest from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|e| ManifestError::Io(e.to_string()))?;
        let manifest: PoolManifest =
            ron::from_str(&content).map_err(|e| ManifestError::Deserialize(e.to_string()))?;
        Ok(manifest)
    }

    /// Save the manifest to a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), ManifestError> {
        let json_string = serde_json::to_string_pretty(self)
            .map_err(|e| ManifestError::Serialize(e.to_string()))?;
        fs::write(path, json_string).map_err(|e| ManifestError::Io(e.to_string()))?;
        Ok(())
    }

    /// Load a manifest from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|e| ManifestError::Io(e.to_string()))?;
        let manifest: PoolManifest = serde_json::from_str(&content)
            .map_err(|e| ManifestError::Deserialize(e.to_string()))?;
        Ok(manifest)
    }

    /// Get the number of pool definitions
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Check if the manifest is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

impl Default for PoolManifest {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// Errors that can occur during manifest file operations
#[derive(Debug, Clone, Error)]
pub enum ManifestError {
    /// IO error
    #[error("IO error: {0}")]
    Io(String),
    /// Serialization error
    #[error("serialization error: {0}")]
    Serialize(String),
    /// Deserialization error
    #[error("deserialization error: {0}")]
    Deserialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_serialization_ron() {
        let mut manifest = PoolManifest::new("Combat Pools");
        manifest.add(
            PoolDefinition::new("enemy/grunt", "prefabs/grunt")
                .with_preload(8)
                .with_capacity(8, 32),
        );

        let ron_str =
            ron::ser::to_string_pretty(&manifest, ron::ser::PrettyConfig::default()).unwrap();
        assert!(ron_str.contains("enemy/grunt"));

        let loaded: PoolManifest = ron::from_str(&ron_str).unwrap();
        assert_eq!(loaded.name, "Combat Pools");
        assert_eq!(loaded.pool_count(), 1);
        assert_eq!(loaded.pools[0].preload_count, 8);
        assert_eq!(loaded.pools[0].max_size, 32);
    }

    #[test]
    fn test_manifest_serialization_json() {
        let mut manifest = PoolManifest::new("JSON Pools");
        manifest.add(PoolDefinition::new("fx/sparks", "prefabs/sparks"));

        let json_str = serde_json::to_string(&manifest).unwrap();
        let loaded: PoolManifest = serde_json::from_str(&json_str).unwrap();
        assert_eq!(loaded.name, "JSON Pools");
        assert_eq!(loaded.pools[0].key.as_str(), "fx/sparks");
    }

    #[test]
    fn test_definition_defaults_apply_on_deserialize() {
        let json = r#"{"key": "a", "load_token": "prefabs/a"}"#;
        let definition: PoolDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(definition.preload_count, 0);
        assert_eq!(definition.default_capacity, 10);
        assert_eq!(definition.max_size, 10_000);
    }

    #[test]
    fn test_validate_rejects_empty_key_and_token() {
        let no_key = PoolDefinition::new("", "prefabs/a");
        assert_eq!(no_key.validate(), Err(ConfigError::MissingKey));

        let no_token = PoolDefinition::new("a", "");
        assert!(matches!(
            no_token.validate(),
            Err(ConfigError::InvalidToken { .. })
        ));

        let fine = PoolDefinition::new("a", "prefabs/a");
        assert_eq!(fine.validate(), Ok(()));
    }
}
