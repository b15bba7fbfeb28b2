//! Keyed entity pools
//!
//! [`EntityPool`] recycles instances for one key; [`PoolContainer`] is the
//! per-key scope entities are instantiated under.

mod container;
mod entity_pool;

pub use container::PoolContainer;
pub use entity_pool::{CreateFn, EntityPool};
