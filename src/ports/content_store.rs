//! Content Store Port - Interface for searching scraped site content.
//!
//! The crawler that fills the store lives outside this service; only the
//! lookup is needed here.

use async_trait::async_trait;

/// Errors that can occur while searching stored content
#[derive(Debug, thiserror::Error)]
pub enum ContentStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Content store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for ContentStoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}

/// A stored page of site text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub url: String,
    pub title: Option<String>,
    pub content: String,
}

impl PageContent {
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            content: content.into(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// First `max_chars` characters of the page text.
    pub fn excerpt(&self, max_chars: usize) -> &str {
        match self.content.char_indices().nth(max_chars) {
            Some((end, _)) => &self.content[..end],
            None => &self.content,
        }
    }
}

/// Port for looking up stored site content
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// First page whose text contains `query`, compared case-insensitively.
    ///
    /// # Errors
    /// Returns `ContentStoreError` if the backing store cannot be queried
    async fn find_matching(&self, query: &str) -> Result<Option<PageContent>, ContentStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_counts_characters_not_bytes() {
        let page = PageContent::new("https://softcodix.com", "héllo wörld");
        assert_eq!(page.excerpt(4), "héll");
        assert_eq!(page.excerpt(100), "héllo wörld");
    }
}
