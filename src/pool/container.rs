//! Per-pool grouping handle

use crate::entity::PoolKey;

/// Groups every instance of one pool under a shared scope.
///
/// The container carries no behavior of its own: hosts receive it during
/// instantiation and may use it to parent entities spatially or
/// hierarchically. Every entity of key K is instantiated against
/// container K.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolContainer {
    key: PoolKey,
    label: String,
}

impl PoolContainer {
    /// Create the container for a pool key
    pub fn new(key: PoolKey) -> Self {
        let label = format!("pool:{key}");
        Self { key, label }
    }

    /// Key of the pool this container scopes
    #[must_use]
    pub fn key(&self) -> &PoolKey {
        &self.key
    }

    /// Human-readable scope label, e.g. for naming a host-side parent node
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}
