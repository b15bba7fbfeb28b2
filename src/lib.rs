//! Pooled entity spawning with asynchronously loaded templates
//!
//! This crate manages keyed pools of reusable entities:
//! - templates are loaded concurrently through an injected async loader;
//!   a failed load costs only its own pool, never the batch
//! - each loaded template gets a bounded pool that recycles instances
//!   instead of reconstructing them
//! - spawning is two-phase (place, then activate), so a recycled entity
//!   is never observable at a stale position
//!
//! [`registry::PoolRegistry`] is the entry point: build it from a list of
//! [`registry::PoolDefinition`]s and a [`loader::TemplateLoader`], await
//! `initialize()`, then spawn and despawn by key.

pub mod entity;
pub mod loader;
pub mod pool;
pub mod registry;

// Re-exports for convenience
pub use glam;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::entity::{EntityOwner, PoolKey, PooledEntity, RegistryId, Transform};
    pub use crate::loader::{
        EntityTemplate, LoadError, LoadFuture, LoadToken, LoadedTemplate, TemplateLoader,
        TemplateStore,
    };
    pub use crate::pool::{CreateFn, EntityPool, PoolContainer};
    pub use crate::registry::{
        ConfigError, InitState, ManifestError, PoolDefinition, PoolManifest, PoolRegistry,
    };
    pub use glam::{Quat, Vec3};
}
