//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::repositories::RepositoryProvider;
use crate::domain::{ActionRepositoryInterface, EntryRepositoryInterface, UserRepositoryInterface};

/// Clone a [`DatabaseConnection`].
///
/// `DatabaseConnection` normally derives `Clone`, but that derive is
/// disabled whenever sea-orm's `mock` feature is active — which it is for
/// the whole crate during `cargo test`, because the test dev-dependency
/// enables it and Cargo unifies features. Each connection variant wraps a
/// reference-counted pool handle, so this reproduces exactly the cheap
/// handle-clone the derived impl provides for the real (SQLite) connection.
pub fn clone_connection(db: &DatabaseConnection) -> DatabaseConnection {
    match db {
        DatabaseConnection::SqlxSqlitePoolConnection(conn) => {
            DatabaseConnection::SqlxSqlitePoolConnection(conn.clone())
        }
        DatabaseConnection::Disconnected => DatabaseConnection::Disconnected,
        // Other variants (e.g. the mock connection pulled in under `cargo
        // test`) never reach this production path.
        #[allow(unreachable_patterns)]
        _ => panic!("unsupported DatabaseConnection variant"),
    }
}

use super::action_repository::SeaOrmActionRepository;
use super::entry_repository::SeaOrmEntryRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository
/// accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let entry = repos.entries().get(1).await?;
/// let actions = repos.actions().list().await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    entries: SeaOrmEntryRepository,
    actions: SeaOrmActionRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(clone_connection(&db)),
            entries: SeaOrmEntryRepository::new(clone_connection(&db)),
            actions: SeaOrmActionRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepositoryInterface {
        &self.users
    }

    fn entries(&self) -> &dyn EntryRepositoryInterface {
        &self.entries
    }

    fn actions(&self) -> &dyn ActionRepositoryInterface {
        &self.actions
    }
}
