//! Migration to create actions table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Actions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Actions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Actions::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Actions::Description).text().null())
                    .col(ColumnDef::new(Actions::AssignedTo).string_len(100).null())
                    .col(
                        ColumnDef::new(Actions::Priority)
                            .string_len(20)
                            .not_null()
                            .default("Mittel"),
                    )
                    .col(
                        ColumnDef::new(Actions::Status)
                            .string_len(50)
                            .not_null()
                            .default("Offen"),
                    )
                    .col(ColumnDef::new(Actions::DueDate).date().null())
                    .col(ColumnDef::new(Actions::FmeaEntryId).integer().null())
                    .col(ColumnDef::new(Actions::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(Actions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Actions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_actions_fmea_entry")
                            .from(Actions::Table, Actions::FmeaEntryId)
                            .to(FmeaEntries::Table, FmeaEntries::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_actions_created_by")
                            .from(Actions::Table, Actions::CreatedBy)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_actions_fmea_entry_id")
                    .table(Actions::Table)
                    .col(Actions::FmeaEntryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Actions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Actions {
    Table,
    Id,
    Title,
    Description,
    AssignedTo,
    Priority,
    Status,
    DueDate,
    FmeaEntryId,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum FmeaEntries {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
