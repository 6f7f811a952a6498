use crate::alias::Alias;
use crate::error::Result;
use crate::record::{RecordId, TargetUrl};
use async_trait::async_trait;

/// A read-only view of a URL store.
///
/// This trait provides only the read operations from [`UrlStore`],
/// allowing front ends that only resolve aliases to hold read access.
#[async_trait]
pub trait ReadStore: Send + Sync + 'static {
    /// Looks up the target URL stored under `alias`.
    /// Returns `Err(NotFound)` if no record matches.
    async fn get(&self, alias: &Alias) -> Result<TargetUrl>;

    /// Checks whether a record with `alias` is currently stored.
    async fn exists(&self, alias: &Alias) -> Result<bool>;

    /// Verifies connectivity to the backing store.
    async fn ping(&self) -> Result<()>;
}

#[async_trait]
pub trait UrlStore: ReadStore {
    /// Inserts a new record and returns the id the store assigned to it.
    /// Returns `Err(DuplicateAlias)` if the alias is already taken.
    async fn save(&self, url: &TargetUrl, alias: &Alias) -> Result<RecordId>;

    /// Deletes the record with the given id.
    ///
    /// Deleting an id that does not exist is not an error; the returned
    /// flag is `true` only if a record was removed.
    async fn delete(&self, id: &RecordId) -> Result<bool>;

    /// Releases every resource held by the store. Idempotent.
    ///
    /// Any operation issued afterwards fails with `Connection`.
    async fn close(&self);
}
