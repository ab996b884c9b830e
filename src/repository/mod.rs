//! Repository layer holding the catalog state

pub mod catalog;

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::CatalogConfig;

pub use catalog::Catalog;

/// Shared handle on one catalog instance.
///
/// A single lock guards the shelf, the membership list and the loan register
/// together. Mutations hold the write lock for the whole transition.
#[derive(Clone)]
pub struct Repository {
    catalog: Arc<RwLock<Catalog>>,
}

impl Repository {
    /// Create a repository around an empty catalog
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(Catalog::new(config.allow_duplicate_isbn))),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Catalog> {
        self.catalog.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, Catalog> {
        self.catalog.write().await
    }
}
