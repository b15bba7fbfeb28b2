//! The capability contract every pool-able entity satisfies

use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::{Quat, Vec3};

use super::key::PoolKey;
use super::transform::Transform;

/// Global counter for generating unique registry IDs
static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identity of one pool registry instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistryId(u64);

impl RegistryId {
    /// Allocate the next unused registry ID
    pub(crate) fn next() -> Self {
        Self(NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Back-reference from an entity to the registry and pool that own it.
///
/// Bound exactly once, inside the pool's creation function, and never
/// reassigned afterwards. It carries plain identity rather than a pointer:
/// an entity uses it to name where it should be returned, without keeping
/// the registry alive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityOwner {
    /// Registry the entity was created by
    pub registry: RegistryId,
    /// Key of the pool the entity belongs to
    pub key: PoolKey,
}

/// Capability set required of every pooled entity.
///
/// Pools drive the lifecycle through these hooks; the host supplies the
/// actual rendering, physics, or gameplay behavior behind them. Spawning is
/// two-phase: an acquired entity is still inactive, the caller (or the
/// registry) applies the transform first and activates after, so a recycled
/// entity is never observable at a stale position.
pub trait PooledEntity: Send {
    /// Make the entity observable/live (`true`) or dormant (`false`)
    fn set_active(&mut self, active: bool);

    /// Whether the entity is currently active
    fn is_active(&self) -> bool;

    /// Place the entity. Must be called before activation when spawning.
    fn set_transform(&mut self, position: Vec3, rotation: Quat);

    /// Current placement of the entity
    fn transform(&self) -> Transform;

    /// Fired every time the entity leaves its pool, before activation
    fn on_spawn(&mut self);

    /// Fired every time the entity is retained back into its pool
    fn on_return(&mut self);

    /// Fired once, right before the entity is dropped for good
    fn on_destroy(&mut self);

    /// Record the owning registry and pool. Called exactly once, at creation.
    fn bind(&mut self, owner: EntityOwner);

    /// The owner recorded by [`PooledEntity::bind`], if any
    fn owner(&self) -> Option<&EntityOwner>;

    /// Access the concrete host object behind the contract
    fn as_any(&self) -> &dyn Any;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_ids_are_unique() {
        let a = RegistryId::next();
        let b = RegistryId::next();
        assert_ne!(a, b);
        assert!(b.raw() > a.raw());
    }

    #[test]
    fn test_owner_equality_covers_registry_and_key() {
        let id = RegistryId::next();
        let a = EntityOwner {
            registry: id,
            key: PoolKey::new("a"),
        };
        let same = EntityOwner {
            registry: id,
            key: PoolKey::new("a"),
        };
        let other_key = EntityOwner {
            registry: id,
            key: PoolKey::new("b"),
        };
        assert_eq!(a, same);
        assert_ne!(a, other_key);
    }
}
