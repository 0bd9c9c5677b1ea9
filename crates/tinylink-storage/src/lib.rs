pub mod config;
pub mod memory;
pub mod postgres;

pub use config::DatabaseConfig;
pub use memory::InMemoryStorage;
pub use postgres::PostgresStorage;
pub use tinylink_core::{Result, StorageError, UrlRepository};
