//! Pool-able entity identity and lifecycle contract
//!
//! Defines what the pooling system expects of a host entity:
//! - a stable [`PoolKey`] naming the category it belongs to
//! - the [`PooledEntity`] capability set (activation, placement, hooks)
//! - the [`EntityOwner`] back-reference bound once at creation

mod contract;
mod key;
mod transform;

#[cfg(test)]
pub(crate) mod testing;

pub use contract::{EntityOwner, PooledEntity, RegistryId};
pub use key::PoolKey;
pub use transform::Transform;
