//! FMEA entry entity for database.
//!
//! The table stores only the three raw ratings; RPN and risk tier are
//! derived in the domain model on every read and never persisted.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Entry status, stored as the German form label
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
pub enum EntryStatus {
    #[sea_orm(string_value = "Offen")]
    Open,
    #[sea_orm(string_value = "In Bearbeitung")]
    InProgress,
    #[sea_orm(string_value = "Abgeschlossen")]
    Completed,
}

impl Default for EntryStatus {
    fn default() -> Self {
        Self::Open
    }
}

/// FMEA entry model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fmea_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub function: String,
    pub failure_mode: String,
    #[sea_orm(column_type = "Text")]
    pub failure_effect: String,
    /// Severity rating, 1-10
    pub severity: i32,
    #[sea_orm(column_type = "Text")]
    pub failure_cause: String,
    /// Occurrence rating, 1-10
    pub occurrence: i32,
    pub test_method: String,
    /// Detection rating, 1-10
    pub detection: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub actions: Option<String>,
    pub status: EntryStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::action::Entity")]
    Actions,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::action::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Actions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
