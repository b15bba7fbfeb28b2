//! Asynchronous template loading
//!
//! The asset subsystem is injected behind the [`TemplateLoader`] trait;
//! [`TemplateStore`] adapts it for the registry: concurrent batch loads,
//! per-entry failure isolation, and bulk handle release at teardown.

mod store;
mod template;

pub use store::{LoadError, LoadFuture, TemplateLoader, TemplateStore};
pub use template::{EntityTemplate, LoadToken, LoadedTemplate};
