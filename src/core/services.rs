//! Unified service container for memdex
//!
//! Provides shared access to all core services.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::search::SearchService;
use crate::core::storage::ItemStore;
use std::sync::Arc;

/// Unified services container
///
/// All adapters use this same struct for service access.
#[derive(Clone)]
pub struct Services {
    /// Item store for CRUD, batch and maintenance operations
    pub store: Arc<ItemStore>,

    /// Search service for BM25 queries
    pub search: Arc<SearchService>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Open the store and create services from configuration
    pub fn open(config: Config) -> Result<Self> {
        let store = Arc::new(ItemStore::open(&config.storage)?);
        let search = Arc::new(SearchService::new(Arc::clone(&store), &config.search));

        Ok(Self {
            store,
            search,
            config: Arc::new(config),
        })
    }

    /// Resolve a list page size against configured defaults
    pub fn list_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.config.list.default_limit)
            .min(self.config.list.max_limit)
    }

    /// Release the store; further writes are refused
    pub fn close(&self) -> Result<()> {
        self.store.close()
    }
}
