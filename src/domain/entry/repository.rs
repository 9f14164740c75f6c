use async_trait::async_trait;

use super::{EntryFilter, EntryUpdate, FmeaEntry, NewEntry};
use crate::domain::DomainResult;

/// Entry store contract.
///
/// Each operation is atomic at the granularity of one entry; a failed
/// write leaves prior state intact. `list` without filters returns all
/// entries ordered by creation time, newest first.
#[async_trait]
pub trait EntryRepositoryInterface: Send + Sync {
    async fn create(&self, data: NewEntry) -> DomainResult<FmeaEntry>;

    async fn get(&self, id: i32) -> DomainResult<Option<FmeaEntry>>;
    async fn list(&self, filter: &EntryFilter) -> DomainResult<Vec<FmeaEntry>>;

    /// Applies the given fields and refreshes `updated_at`. Returns
    /// `None` when the entry does not exist.
    async fn update(&self, id: i32, update: EntryUpdate) -> DomainResult<Option<FmeaEntry>>;

    /// Fails with `DomainError::NotFound` when the entry does not exist.
    async fn delete(&self, id: i32) -> DomainResult<()>;

    async fn count(&self) -> DomainResult<u64>;
}
