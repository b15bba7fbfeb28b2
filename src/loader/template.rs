//! Template blueprints and their loader-facing addresses

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::entity::{PoolKey, PooledEntity};
use crate::pool::PoolContainer;

/// Address of a template inside the external asset subsystem
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadToken(String);

impl LoadToken {
    /// Create a new load token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the raw token string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the token is usable (non-empty)
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
    }
}

impl std::fmt::Display for LoadToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LoadToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

/// Immutable blueprint a pool instantiates entities from.
pub trait EntityTemplate: Send + Sync {
    /// Create one inactive instance scoped to `container`.
    ///
    /// Returns `None` when the template cannot produce an instance with the
    /// pooled-entity capability set; the registry treats that as a contract
    /// violation and builds no pool for this template.
    fn instantiate(&self, container: &PoolContainer) -> Option<Box<dyn PooledEntity>>;
}

/// A template that finished loading, paired with the token needed to
/// release its loader handle later.
pub struct LoadedTemplate {
    /// Pool key the template was requested for
    pub key: PoolKey,
    /// Loader address the template came from
    pub token: LoadToken,
    /// The loaded blueprint
    pub template: Arc<dyn EntityTemplate>,
}

impl std::fmt::Debug for LoadedTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedTemplate")
            .field("key", &self.key)
            .field("token", &self.token)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_validity() {
        assert!(!LoadToken::new("").is_valid());
        assert!(LoadToken::new("prefabs/rocket").is_valid());
    }

    #[test]
    fn test_token_display_matches_raw() {
        let token = LoadToken::from("prefabs/rocket");
        assert_eq!(token.to_string(), token.as_str());
    }
}
