//! Remediation action entity for database.
//!
//! `fmea_entry_id` is a weak reference: deleting the parent entry sets
//! it to NULL instead of cascading. The post-mitigation rating triple is
//! stored raw; the derived "neue RPZ" is computed in the domain model.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Action priority, stored as the German form label
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ActionPriority {
    #[sea_orm(string_value = "Niedrig")]
    Low,
    #[sea_orm(string_value = "Mittel")]
    Medium,
    #[sea_orm(string_value = "Hoch")]
    High,
}

impl Default for ActionPriority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Action model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "actions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub priority: ActionPriority,
    pub status: String,
    pub due_date: Option<Date>,
    pub fmea_entry_id: Option<i32>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    // Mitigation tracking
    pub responsible: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub measure_taken: Option<String>,
    pub implemented_at: Option<Date>,
    pub implemented_by: Option<String>,

    // Post-mitigation re-rating, each 1-10 when present
    pub new_severity: Option<i32>,
    pub new_occurrence: Option<i32>,
    pub new_detection: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fmea_entry::Entity",
        from = "Column::FmeaEntryId",
        to = "super::fmea_entry::Column::Id"
    )]
    FmeaEntry,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::fmea_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FmeaEntry.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
