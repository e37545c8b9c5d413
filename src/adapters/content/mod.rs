//! Content Store Adapters.
//!
//! - `PostgresContentStore` - `ILIKE` lookup over crawled pages
//! - `InMemoryContentStore` - fixed page list, for tests and database-less runs

mod in_memory;
mod postgres;

pub use in_memory::InMemoryContentStore;
pub use postgres::PostgresContentStore;
