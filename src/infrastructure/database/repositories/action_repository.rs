use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, QueryOrder, Set,
};

use crate::domain::{
    Action, ActionPriority, ActionRepositoryInterface, ActionUpdate, ActionWithEntry, DomainError,
    DomainResult, NewAction,
};
use crate::infrastructure::database::entities::{action, fmea_entry};

pub struct SeaOrmActionRepository {
    db: DatabaseConnection,
}

impl SeaOrmActionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_priority_to_domain(priority: action::ActionPriority) -> ActionPriority {
    match priority {
        action::ActionPriority::Low => ActionPriority::Low,
        action::ActionPriority::Medium => ActionPriority::Medium,
        action::ActionPriority::High => ActionPriority::High,
    }
}

fn domain_priority_to_entity(priority: ActionPriority) -> action::ActionPriority {
    match priority {
        ActionPriority::Low => action::ActionPriority::Low,
        ActionPriority::Medium => action::ActionPriority::Medium,
        ActionPriority::High => action::ActionPriority::High,
    }
}

fn action_model_to_domain(model: action::Model) -> Action {
    Action {
        id: model.id,
        title: model.title,
        description: model.description,
        assigned_to: model.assigned_to,
        priority: entity_priority_to_domain(model.priority),
        status: model.status,
        due_date: model.due_date,
        fmea_entry_id: model.fmea_entry_id,
        created_by: model.created_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
        responsible: model.responsible,
        measure_taken: model.measure_taken,
        implemented_at: model.implemented_at,
        implemented_by: model.implemented_by,
        new_severity: model.new_severity,
        new_occurrence: model.new_occurrence,
        new_detection: model.new_detection,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl ActionRepositoryInterface for SeaOrmActionRepository {
    async fn create(&self, data: NewAction) -> DomainResult<Action> {
        let now = Utc::now();

        let new_action = action::ActiveModel {
            id: NotSet,
            title: Set(data.title),
            description: Set(data.description),
            assigned_to: Set(data.assigned_to),
            priority: Set(domain_priority_to_entity(data.priority)),
            status: Set(data.status),
            due_date: Set(data.due_date),
            fmea_entry_id: Set(data.fmea_entry_id),
            created_by: Set(data.created_by),
            created_at: Set(now),
            updated_at: Set(now),
            responsible: Set(data.responsible),
            measure_taken: Set(data.measure_taken),
            implemented_at: Set(data.implemented_at),
            implemented_by: Set(data.implemented_by),
            new_severity: Set(data.new_severity),
            new_occurrence: Set(data.new_occurrence),
            new_detection: Set(data.new_detection),
        };

        let inserted = new_action.insert(&self.db).await.map_err(db_err)?;
        Ok(action_model_to_domain(inserted))
    }

    async fn get(&self, id: i32) -> DomainResult<Option<Action>> {
        let model = action::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(action_model_to_domain))
    }

    async fn list(&self) -> DomainResult<Vec<ActionWithEntry>> {
        let rows = action::Entity::find()
            .find_also_related(fmea_entry::Entity)
            .order_by_desc(action::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|(model, entry)| ActionWithEntry {
                action: action_model_to_domain(model),
                entry_function: entry.map(|e| e.function),
            })
            .collect())
    }

    async fn update(&self, id: i32, update: ActionUpdate) -> DomainResult<Option<Action>> {
        let existing = action::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: action::ActiveModel = existing.into();

        if let Some(title) = update.title {
            active.title = Set(title);
        }
        if let Some(description) = update.description {
            active.description = Set(Some(description));
        }
        if let Some(assigned_to) = update.assigned_to {
            active.assigned_to = Set(Some(assigned_to));
        }
        if let Some(priority) = update.priority {
            active.priority = Set(domain_priority_to_entity(priority));
        }
        if let Some(status) = update.status {
            active.status = Set(status);
        }
        if let Some(due_date) = update.due_date {
            active.due_date = Set(Some(due_date));
        }
        // Outer Option toggles the change, inner Option detaches the link
        if let Some(entry_link) = update.fmea_entry_id {
            active.fmea_entry_id = Set(entry_link);
        }
        if let Some(responsible) = update.responsible {
            active.responsible = Set(Some(responsible));
        }
        if let Some(measure_taken) = update.measure_taken {
            active.measure_taken = Set(Some(measure_taken));
        }
        if let Some(implemented_at) = update.implemented_at {
            active.implemented_at = Set(Some(implemented_at));
        }
        if let Some(implemented_by) = update.implemented_by {
            active.implemented_by = Set(Some(implemented_by));
        }
        if let Some(new_severity) = update.new_severity {
            active.new_severity = Set(Some(new_severity));
        }
        if let Some(new_occurrence) = update.new_occurrence {
            active.new_occurrence = Set(Some(new_occurrence));
        }
        if let Some(new_detection) = update.new_detection {
            active.new_detection = Set(Some(new_detection));
        }

        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(action_model_to_domain(updated)))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = action::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "Action",
                id: id.to_string(),
            });
        }

        Ok(())
    }
}
