//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_fmea_entries;
mod m20240101_000003_create_actions;
mod m20240101_000004_add_mitigation_tracking_to_actions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_fmea_entries::Migration),
            Box::new(m20240101_000003_create_actions::Migration),
            Box::new(m20240101_000004_add_mitigation_tracking_to_actions::Migration),
        ]
    }
}
