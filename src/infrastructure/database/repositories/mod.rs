mod action_repository;
mod entry_repository;
mod repository_provider;
mod user_repository;

pub use action_repository::SeaOrmActionRepository;
pub use entry_repository::SeaOrmEntryRepository;
pub use repository_provider::{clone_connection, SeaOrmRepositoryProvider};
pub use user_repository::SeaOrmUserRepository;
