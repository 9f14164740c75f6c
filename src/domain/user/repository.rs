use async_trait::async_trait;

use super::{CreateUserData, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn create_user(&self, data: CreateUserData) -> DomainResult<User>;

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    async fn count(&self) -> DomainResult<u64>;
}
