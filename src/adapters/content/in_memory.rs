//! In-memory content store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::ports::{ContentStore, ContentStoreError, PageContent};

/// Content store backed by a page list held in memory.
///
/// Matches the same way the PostgreSQL store does: the first page, in
/// insertion order, whose text contains the query case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentStore {
    pages: Arc<RwLock<Vec<PageContent>>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pages(pages: Vec<PageContent>) -> Self {
        Self {
            pages: Arc::new(RwLock::new(pages)),
        }
    }

    pub fn insert(&self, page: PageContent) -> Result<(), ContentStoreError> {
        self.pages
            .write()
            .map_err(|e| ContentStoreError::Unavailable(e.to_string()))?
            .push(page);
        Ok(())
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn find_matching(&self, query: &str) -> Result<Option<PageContent>, ContentStoreError> {
        let needle = query.to_lowercase();
        let pages = self
            .pages
            .read()
            .map_err(|e| ContentStoreError::Unavailable(e.to_string()))?;
        Ok(pages
            .iter()
            .find(|page| page.content.to_lowercase().contains(&needle))
            .cloned())
    }
}
