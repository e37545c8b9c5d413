//! PostgreSQL implementation of ContentStore.
//!
//! Reads the `page_contents` table filled by the site crawler:
//!
//! | column         | type          |
//! |----------------|---------------|
//! | `id`           | `bigserial`   |
//! | `url`          | `text` unique |
//! | `title`        | `text` null   |
//! | `content`      | `text`        |
//! | `last_scraped` | `timestamptz` |

use async_trait::async_trait;
use sqlx::PgPool;

use crate::ports::{ContentStore, ContentStoreError, PageContent};

/// PostgreSQL implementation of the ContentStore port.
pub struct PostgresContentStore {
    pool: PgPool,
}

impl PostgresContentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PageRow {
    url: String,
    title: Option<String>,
    content: String,
}

impl From<PageRow> for PageContent {
    fn from(row: PageRow) -> Self {
        Self {
            url: row.url,
            title: row.title,
            content: row.content,
        }
    }
}

/// Escapes `LIKE` wildcards so the query matches literally.
fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl ContentStore for PostgresContentStore {
    async fn find_matching(&self, query: &str) -> Result<Option<PageContent>, ContentStoreError> {
        let row: Option<PageRow> = sqlx::query_as(
            r#"
            SELECT url, title, content
            FROM page_contents
            WHERE content ILIKE $1 ESCAPE '\'
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(like_pattern(query))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PageContent::from))
    }
}
