//! The pool registry: addressable surface for spawning and returning
//! pooled entities

use std::sync::Arc;

use glam::{Quat, Vec3};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::entity::{EntityOwner, PoolKey, PooledEntity, RegistryId};
use crate::loader::{EntityTemplate, LoadedTemplate, TemplateLoader, TemplateStore};
use crate::pool::{CreateFn, EntityPool, PoolContainer};

use super::config::{PoolDefinition, PoolManifest};
use super::state::InitState;

/// Manages a set of keyed entity pools and their async-loaded templates.
///
/// Construction is two-step: build the registry, then await
/// [`PoolRegistry::initialize`] before spawning. Initialization loads every
/// configured template concurrently, waits for all of them to settle, and
/// builds one pool per success; a failed load costs only its own pool,
/// discoverable through [`PoolRegistry::has_pool`].
pub struct PoolRegistry {
    id: RegistryId,
    state: InitState,
    definitions: Vec<PoolDefinition>,
    store: TemplateStore,
    pools: FxHashMap<PoolKey, EntityPool>,
    templates: FxHashMap<PoolKey, Arc<dyn EntityTemplate>>,
    containers: FxHashMap<PoolKey, PoolContainer>,
}

impl PoolRegistry {
    /// Create a registry over a definition list and a template loader.
    ///
    /// Nothing is loaded until [`PoolRegistry::initialize`] runs.
    pub fn new(definitions: Vec<PoolDefinition>, loader: Arc<dyn TemplateLoader>) -> Self {
        Self {
            id: RegistryId::next(),
            state: InitState::default(),
            definitions,
            store: TemplateStore::new(loader),
            pools: FxHashMap::default(),
            templates: FxHashMap::default(),
            containers: FxHashMap::default(),
        }
    }

    /// Create a registry from a manifest
    pub fn from_manifest(manifest: PoolManifest, loader: Arc<dyn TemplateLoader>) -> Self {
        Self::new(manifest.pools, loader)
    }

    /// Load all configured templates and build their pools.
    ///
    /// Every valid definition's load is issued concurrently; the registry
    /// waits for all of them to settle, then builds pools synchronously and
    /// becomes `Ready`. Invalid definitions and failed loads are logged and
    /// skipped, never fatal. Calling this while `Initializing` or `Ready`
    /// is a warned no-op. Must be awaited inside a Tokio runtime.
    pub async fn initialize(&mut self) {
        match self.state {
            InitState::Initializing | InitState::Ready => {
                log::warn!("initialize ignored: registry is already {}", self.state);
                return;
            }
            InitState::Uninitialized => {}
        }
        self.state = InitState::Initializing;

        let mut seen: FxHashSet<PoolKey> = FxHashSet::default();
        let mut requests = Vec::with_capacity(self.definitions.len());
        for definition in &self.definitions {
            if let Err(err) = definition.validate() {
                log::error!("skipping pool definition: {err}");
                continue;
            }
            if !seen.insert(definition.key.clone()) {
                log::warn!(
                    "skipping duplicate pool definition for key `{}`",
                    definition.key
                );
                continue;
            }
            requests.push((definition.key.clone(), definition.load_token.clone()));
        }

        let loaded = self.store.load_batch(requests).await;
        for entry in loaded {
            self.build_pool(entry);
        }

        self.state = InitState::Ready;
        log::info!("pool registry ready with {} pools", self.pools.len());
    }

    /// Build the pool, container, and warm-up for one loaded template.
    fn build_pool(&mut self, loaded: LoadedTemplate) {
        let LoadedTemplate {
            key,
            token,
            template,
        } = loaded;

        let Some((preload_count, default_capacity, max_size)) = self
            .definitions
            .iter()
            .find(|d| d.key == key)
            .map(|d| (d.preload_count, d.default_capacity, d.max_size))
        else {
            log::error!("loaded template `{token}` matches no definition; releasing");
            self.store.release(&token);
            return;
        };

        let container = PoolContainer::new(key.clone());

        // Capability probe: the template must yield a pool-able instance.
        match template.instantiate(&container) {
            Some(mut probe) => probe.on_destroy(),
            None => {
                log::error!("template for pool `{key}` does not produce a pool-able entity");
                self.store.release(&token);
                return;
            }
        }

        let owner = EntityOwner {
            registry: self.id,
            key: key.clone(),
        };
        let create: CreateFn = {
            let template = Arc::clone(&template);
            let container = container.clone();
            let owner = owner.clone();
            Box::new(move || {
                let mut entity = template.instantiate(&container)?;
                entity.bind(owner.clone());
                Some(entity)
            })
        };

        let mut pool = EntityPool::new(owner, default_capacity, max_size, create);
        pool.preload(preload_count);
        log::debug!("built pool `{key}`: preload {preload_count}, max {max_size}");

        self.templates.insert(key.clone(), template);
        self.containers.insert(key.clone(), container);
        self.pools.insert(key, pool);
    }

    /// Take an entity from the keyed pool and activate it in place.
    ///
    /// The entity comes up at whatever transform its template produced;
    /// use [`PoolRegistry::spawn_at`] to place it first. Returns `None`,
    /// with a warning, when the registry is not ready or the key has no
    /// pool.
    pub fn spawn(&mut self, key: &PoolKey) -> Option<Box<dyn PooledEntity>> {
        let mut entity = self.acquire(key)?;
        entity.set_active(true);
        Some(entity)
    }

    /// Take an entity from the keyed pool, place it, then activate it.
    ///
    /// The transform is applied strictly before activation, so the entity
    /// is never observable at a stale position.
    pub fn spawn_at(
        &mut self,
        key: &PoolKey,
        position: Vec3,
        rotation: Quat,
    ) -> Option<Box<dyn PooledEntity>> {
        let mut entity = self.acquire(key)?;
        entity.set_transform(position, rotation);
        entity.set_active(true);
        Some(entity)
    }

    fn acquire(&mut self, key: &PoolKey) -> Option<Box<dyn PooledEntity>> {
        if !self.state.is_ready() {
            log::warn!("spawn for `{key}` ignored: registry is {}", self.state);
            return None;
        }
        let Some(pool) = self.pools.get_mut(key) else {
            log::warn!("spawn for `{key}` ignored: no such pool");
            return None;
        };
        pool.acquire()
    }

    /// Give a spawned entity back to its pool.
    ///
    /// The pool retains it idle, or destroys it when already holding
    /// `max_size` idle entities. `None` means the pool took the entity.
    /// When the registry is not ready, the key has no pool, or the entity
    /// belongs elsewhere, the entity is handed back as `Some` and stays
    /// the caller's responsibility; it is never silently destroyed.
    pub fn despawn(
        &mut self,
        key: &PoolKey,
        entity: Box<dyn PooledEntity>,
    ) -> Option<Box<dyn PooledEntity>> {
        if !self.state.is_ready() {
            log::warn!("despawn for `{key}` ignored: registry is {}", self.state);
            return Some(entity);
        }
        let Some(pool) = self.pools.get_mut(key) else {
            log::warn!("despawn for `{key}` ignored: no such pool; caller keeps the entity");
            return Some(entity);
        };
        if entity.owner().map(|owner| owner.registry) != Some(self.id) {
            log::warn!("despawn for `{key}` rejected: entity belongs to another registry");
            return Some(entity);
        }
        pool.release(entity)
    }

    /// Check whether a pool was built for the key
    #[must_use]
    pub fn has_pool(&self, key: &PoolKey) -> bool {
        self.pools.contains_key(key)
    }

    /// Get the loaded template behind a key
    #[must_use]
    pub fn loaded_template(&self, key: &PoolKey) -> Option<Arc<dyn EntityTemplate>> {
        self.templates.get(key).cloned()
    }

    /// Get the container scoping a key's entities
    #[must_use]
    pub fn container(&self, key: &PoolKey) -> Option<&PoolContainer> {
        self.containers.get(key)
    }

    /// Get a key's pool, e.g. for stats
    #[must_use]
    pub fn pool(&self, key: &PoolKey) -> Option<&EntityPool> {
        self.pools.get(key)
    }

    /// Check if initialization completed
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.state.is_ready()
    }

    /// Check if initialization is in flight
    #[must_use]
    pub const fn is_initializing(&self) -> bool {
        self.state.is_initializing()
    }

    /// Current readiness state
    #[must_use]
    pub const fn state(&self) -> InitState {
        self.state
    }

    /// Number of pools built
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Identity of this registry
    #[must_use]
    pub const fn id(&self) -> RegistryId {
        self.id
    }

    /// Destroy all idle entities and release every loader handle.
    ///
    /// Entities currently held by callers are unaffected. Safe to call
    /// more than once; also runs on drop. After a teardown the registry
    /// serves no pools.
    pub fn shutdown(&mut self) {
        for pool in self.pools.values_mut() {
            pool.destroy_all();
        }
        self.pools.clear();
        self.containers.clear();
        self.templates.clear();
        self.store.release_all();
    }
}

impl Drop for PoolRegistry {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for PoolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolRegistry")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("pools", &self.pools.len())
            .finish()
    }
}
