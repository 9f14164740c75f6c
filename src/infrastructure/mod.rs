//! External concerns: database, entities, migrations, repositories

pub mod database;

pub use database::{init_database, DatabaseConfig};
