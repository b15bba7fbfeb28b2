//! Pool key identity

use serde::{Deserialize, Serialize};

/// Identifies one pool and its template.
///
/// Keys are opaque to the pooling system: only equality and hashing matter,
/// and both must stay stable for the lifetime of a registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoolKey(String);

impl PoolKey {
    /// Create a new key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the raw key string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the key is usable (non-empty)
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
    }
}

impl std::fmt::Display for PoolKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PoolKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_equality_and_display() {
        let a = PoolKey::new("enemy/grunt");
        let b = PoolKey::from("enemy/grunt");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "enemy/grunt");
    }

    #[test]
    fn test_empty_key_is_invalid() {
        assert!(!PoolKey::new("").is_valid());
        assert!(PoolKey::new("projectile").is_valid());
    }
}
