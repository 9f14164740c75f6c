use async_trait::async_trait;

use super::{Action, ActionUpdate, ActionWithEntry, NewAction};
use crate::domain::DomainResult;

#[async_trait]
pub trait ActionRepositoryInterface: Send + Sync {
    async fn create(&self, data: NewAction) -> DomainResult<Action>;

    async fn get(&self, id: i32) -> DomainResult<Option<Action>>;

    /// All actions joined with the parent entry function, newest first.
    async fn list(&self) -> DomainResult<Vec<ActionWithEntry>>;

    /// Applies the given fields and refreshes `updated_at`. Returns
    /// `None` when the action does not exist.
    async fn update(&self, id: i32, update: ActionUpdate) -> DomainResult<Option<Action>>;

    /// Fails with `DomainError::NotFound` when the action does not exist.
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
