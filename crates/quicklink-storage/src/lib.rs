//! Storage backends for the quicklink URL store.

pub mod config;
pub mod memory;
pub mod postgres;

pub use config::StoreConfig;
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use quicklink_core::error::{Result, StoreError};
pub use quicklink_core::{Alias, ReadStore, RecordId, TargetUrl, UrlRecord, UrlStore};
