//! Loader boundary and the template store adapter
//!
//! [`TemplateLoader`] is the injected asset subsystem; [`TemplateStore`]
//! wraps it, fanning batches of loads out concurrently and tracking every
//! successfully loaded token so the handles can be released in bulk at
//! teardown.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use thiserror::Error;
use tokio::task::JoinSet;

use crate::entity::PoolKey;

use super::template::{EntityTemplate, LoadToken, LoadedTemplate};

/// Why a template failed to load
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    /// The loader has no template behind the token
    #[error("no template for load token `{0}`")]
    NotFound(LoadToken),
    /// The loader failed while producing the template
    #[error("loading `{token}` failed: {reason}")]
    Failed {
        /// Token the load was issued for
        token: LoadToken,
        /// Loader-supplied failure description
        reason: String,
    },
}

/// Future returned by [`TemplateLoader::load`]
pub type LoadFuture =
    Pin<Box<dyn Future<Output = Result<Arc<dyn EntityTemplate>, LoadError>> + Send>>;

/// The external asset subsystem, seen from the pooling side.
///
/// Implementations must tolerate many concurrent `load` calls; each call is
/// independent and one failure must not abort its siblings.
pub trait TemplateLoader: Send + Sync + 'static {
    /// Begin loading the template addressed by `token`
    fn load(&self, token: &LoadToken) -> LoadFuture;

    /// Release the handle behind a previously loaded token
    fn release(&self, token: &LoadToken);
}

/// Wraps the loader and retains every outstanding handle for bulk release.
pub struct TemplateStore {
    loader: Arc<dyn TemplateLoader>,
    outstanding: FxHashSet<LoadToken>,
}

impl TemplateStore {
    /// Create a store over the given loader
    pub fn new(loader: Arc<dyn TemplateLoader>) -> Self {
        Self {
            loader,
            outstanding: FxHashSet::default(),
        }
    }

    /// Load every requested template concurrently and wait for all of them
    /// to settle.
    ///
    /// Individual failures are logged and skipped; they never abort the
    /// rest of the batch. Results arrive in completion order. Must be
    /// awaited inside a Tokio runtime.
    pub async fn load_batch(
        &mut self,
        requests: Vec<(PoolKey, LoadToken)>,
    ) -> Vec<LoadedTemplate> {
        let mut tasks = JoinSet::new();
        for (key, token) in requests {
            let loader = Arc::clone(&self.loader);
            tasks.spawn(async move {
                let result = loader.load(&token).await;
                (key, token, result)
            });
        }

        let mut loaded = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((key, token, Ok(template))) => {
                    self.outstanding.insert(token.clone());
                    loaded.push(LoadedTemplate {
                        key,
                        token,
                        template,
                    });
                }
                Ok((key, _, Err(err))) => {
                    log::error!("template load for pool `{key}` failed: {err}");
                }
                Err(err) => {
                    log::error!("template load task failed: {err}");
                }
            }
        }
        loaded
    }

    /// Release one outstanding handle.
    ///
    /// No-op for tokens the store does not hold.
    pub fn release(&mut self, token: &LoadToken) {
        if self.outstanding.remove(token) {
            self.loader.release(token);
        }
    }

    /// Release every outstanding handle. Safe to call more than once.
    pub fn release_all(&mut self) {
        for token in std::mem::take(&mut self.outstanding) {
            self.loader.release(&token);
        }
    }

    /// Number of handles currently held
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }
}

impl std::fmt::Debug for TemplateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateStore")
            .field("outstanding", &self.outstanding.len())
            .finish()
    }
}
