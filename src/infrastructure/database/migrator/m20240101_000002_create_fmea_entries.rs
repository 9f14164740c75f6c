//! Migration to create fmea_entries table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FmeaEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FmeaEntries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FmeaEntries::Function)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FmeaEntries::FailureMode)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FmeaEntries::FailureEffect).text().not_null())
                    .col(ColumnDef::new(FmeaEntries::Severity).integer().not_null())
                    .col(ColumnDef::new(FmeaEntries::FailureCause).text().not_null())
                    .col(ColumnDef::new(FmeaEntries::Occurrence).integer().not_null())
                    .col(
                        ColumnDef::new(FmeaEntries::TestMethod)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FmeaEntries::Detection).integer().not_null())
                    .col(ColumnDef::new(FmeaEntries::Actions).text().null())
                    .col(
                        ColumnDef::new(FmeaEntries::Status)
                            .string_len(50)
                            .not_null()
                            .default("Offen"),
                    )
                    .col(ColumnDef::new(FmeaEntries::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(FmeaEntries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FmeaEntries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fmea_entries_created_by")
                            .from(FmeaEntries::Table, FmeaEntries::CreatedBy)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Create indexes
        manager
            .create_index(
                Index::create()
                    .name("idx_fmea_entries_status")
                    .table(FmeaEntries::Table)
                    .col(FmeaEntries::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_fmea_entries_created_at")
                    .table(FmeaEntries::Table)
                    .col(FmeaEntries::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FmeaEntries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FmeaEntries {
    Table,
    Id,
    Function,
    FailureMode,
    FailureEffect,
    Severity,
    FailureCause,
    Occurrence,
    TestMethod,
    Detection,
    Actions,
    Status,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
