//! Bounded per-key entity pool
//!
//! Recycles entity instances instead of constructing and destroying them on
//! every spawn. The pool keeps a LIFO free list of idle entities and grows
//! through a creation function; the retained-size bound is enforced at
//! release time only, so an acquire can always be served.
//!
//! # Capacity policy
//!
//! - `acquire` never fails due to capacity: an empty free list always falls
//!   back to the creation function, even past `max_size`.
//! - `release` enforces the bound: once `max_size` entities are idle, a
//!   released entity is destroyed instead of retained.

use crate::entity::{EntityOwner, PooledEntity};

// ============================================================================
// Creation function
// ============================================================================

/// Creates one new, bound, inactive instance for the pool.
///
/// Fires no lifecycle hook itself; `acquire` fires `on_spawn` on whatever
/// entity it hands out, fresh or recycled.
pub type CreateFn = Box<dyn FnMut() -> Option<Box<dyn PooledEntity>> + Send>;

// ============================================================================
// Entity pool
// ============================================================================

/// A bounded store of reusable entities for one pool key.
pub struct EntityPool {
    /// Identity stamped onto every entity this pool creates
    owner: EntityOwner,
    /// Idle entities, reused in LIFO order
    idle: Vec<Box<dyn PooledEntity>>,
    /// Retained-entity bound, enforced at release time
    max_size: usize,
    /// Entities created and not yet destroyed (idle or caller-held)
    live: usize,
    /// Fallback used when the free list is empty
    create: CreateFn,
}

impl EntityPool {
    /// Create a pool.
    ///
    /// `default_capacity` sizes the free-list allocation up front;
    /// `max_size` bounds how many idle entities are retained.
    pub fn new(
        owner: EntityOwner,
        default_capacity: usize,
        max_size: usize,
        create: CreateFn,
    ) -> Self {
        Self {
            owner,
            idle: Vec::with_capacity(default_capacity),
            max_size,
            live: 0,
            create,
        }
    }

    /// Take an entity out of the pool.
    ///
    /// Reuses the most recently released idle entity, or invokes the
    /// creation function when none is idle. Fires `on_spawn` on the entity
    /// handed out; the entity is still inactive and carries no guaranteed
    /// transform.
    ///
    /// Returns `None` only when the creation function fails.
    pub fn acquire(&mut self) -> Option<Box<dyn PooledEntity>> {
        let mut entity = if let Some(entity) = self.idle.pop() {
            entity
        } else {
            match (self.create)() {
                Some(entity) => {
                    self.live += 1;
                    entity
                }
                None => {
                    log::error!(
                        "pool `{}`: creation function produced no entity",
                        self.owner.key
                    );
                    return None;
                }
            }
        };
        entity.on_spawn();
        Some(entity)
    }

    /// Give an entity back to the pool.
    ///
    /// With `max_size` entities already idle the entity is destroyed
    /// (`on_destroy`, no `on_return`). Otherwise `on_return` fires, the
    /// entity is deactivated and appended to the free list.
    ///
    /// An entity this pool does not own is rejected and handed back as
    /// `Some`.
    pub fn release(&mut self, mut entity: Box<dyn PooledEntity>) -> Option<Box<dyn PooledEntity>> {
        if entity.owner() != Some(&self.owner) {
            log::error!("pool `{}` rejected an entity it does not own", self.owner.key);
            return Some(entity);
        }

        if self.idle.len() >= self.max_size {
            entity.on_destroy();
            self.live -= 1;
            return None;
        }

        entity.on_return();
        entity.set_active(false);
        self.idle.push(entity);
        None
    }

    /// Warm the free list with up to `count` idle entities.
    ///
    /// Acquires `count` entities and releases them all again, so the free
    /// list ends up at `min(count, max_size)`. No entity is activated.
    pub fn preload(&mut self, count: usize) {
        let mut warmed = Vec::with_capacity(count);
        for _ in 0..count {
            match self.acquire() {
                Some(entity) => warmed.push(entity),
                None => break,
            }
        }
        for entity in warmed {
            let rejected = self.release(entity);
            debug_assert!(rejected.is_none());
        }
    }

    /// Destroy every idle entity.
    ///
    /// Currently acquired entities are unaffected; their ownership stays
    /// with the caller that holds them.
    pub fn destroy_all(&mut self) {
        let drained = self.idle.len();
        for mut entity in self.idle.drain(..) {
            entity.on_destroy();
        }
        self.live -= drained;
        if drained > 0 {
            log::debug!("pool `{}`: destroyed {drained} idle entities", self.owner.key);
        }
    }

    /// Identity stamped onto this pool's entities
    #[must_use]
    pub fn owner(&self) -> &EntityOwner {
        &self.owner
    }

    /// Number of idle entities ready for reuse
    #[must_use]
    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }

    /// Entities created and not yet destroyed, idle or caller-held
    #[must_use]
    pub const fn live_count(&self) -> usize {
        self.live
    }

    /// Retained-entity bound
    #[must_use]
    pub const fn max_size(&self) -> usize {
        self.max_size
    }
}

impl std::fmt::Debug for EntityPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityPool")
            .field("key", &self.owner.key)
            .field("idle", &self.idle.len())
            .field("live", &self.live)
            .field("max_size", &self.max_size)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
