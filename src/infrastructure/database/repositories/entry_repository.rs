use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::domain::{
    DomainError, DomainResult, EntryFilter, EntryRepositoryInterface, EntryStatus, EntryUpdate,
    FmeaEntry, NewEntry,
};
use crate::infrastructure::database::entities::fmea_entry;

pub struct SeaOrmEntryRepository {
    db: DatabaseConnection,
}

impl SeaOrmEntryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_status_to_domain(status: fmea_entry::EntryStatus) -> EntryStatus {
    match status {
        fmea_entry::EntryStatus::Open => EntryStatus::Open,
        fmea_entry::EntryStatus::InProgress => EntryStatus::InProgress,
        fmea_entry::EntryStatus::Completed => EntryStatus::Completed,
    }
}

fn domain_status_to_entity(status: EntryStatus) -> fmea_entry::EntryStatus {
    match status {
        EntryStatus::Open => fmea_entry::EntryStatus::Open,
        EntryStatus::InProgress => fmea_entry::EntryStatus::InProgress,
        EntryStatus::Completed => fmea_entry::EntryStatus::Completed,
    }
}

fn entry_model_to_domain(model: fmea_entry::Model) -> FmeaEntry {
    FmeaEntry {
        id: model.id,
        function: model.function,
        failure_mode: model.failure_mode,
        failure_effect: model.failure_effect,
        severity: model.severity,
        failure_cause: model.failure_cause,
        occurrence: model.occurrence,
        test_method: model.test_method,
        detection: model.detection,
        actions: model.actions,
        status: entity_status_to_domain(model.status),
        created_by: model.created_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl EntryRepositoryInterface for SeaOrmEntryRepository {
    async fn create(&self, data: NewEntry) -> DomainResult<FmeaEntry> {
        let now = Utc::now();

        let new_entry = fmea_entry::ActiveModel {
            id: NotSet,
            function: Set(data.function),
            failure_mode: Set(data.failure_mode),
            failure_effect: Set(data.failure_effect),
            severity: Set(data.severity),
            failure_cause: Set(data.failure_cause),
            occurrence: Set(data.occurrence),
            test_method: Set(data.test_method),
            detection: Set(data.detection),
            actions: Set(data.actions),
            status: Set(domain_status_to_entity(data.status)),
            created_by: Set(data.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = new_entry.insert(&self.db).await.map_err(db_err)?;
        Ok(entry_model_to_domain(inserted))
    }

    async fn get(&self, id: i32) -> DomainResult<Option<FmeaEntry>> {
        let model = fmea_entry::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(entry_model_to_domain))
    }

    async fn list(&self, filter: &EntryFilter) -> DomainResult<Vec<FmeaEntry>> {
        let mut query =
            fmea_entry::Entity::find().order_by_desc(fmea_entry::Column::CreatedAt);

        // Substring search across the four descriptive fields
        if let Some(ref search) = filter.search {
            query = query.filter(
                fmea_entry::Column::Function
                    .contains(search)
                    .or(fmea_entry::Column::FailureMode.contains(search))
                    .or(fmea_entry::Column::FailureCause.contains(search))
                    .or(fmea_entry::Column::FailureEffect.contains(search)),
            );
        }

        // Exact status match
        if let Some(status) = filter.status {
            query = query.filter(fmea_entry::Column::Status.eq(domain_status_to_entity(status)));
        }

        let models = query.all(&self.db).await.map_err(db_err)?;
        let mut entries: Vec<FmeaEntry> =
            models.into_iter().map(entry_model_to_domain).collect();

        // The risk tier is derived, not indexed: filter after the fetch
        if let Some(risk) = filter.risk {
            entries.retain(|entry| entry.risk_level() == risk);
        }

        Ok(entries)
    }

    async fn update(&self, id: i32, update: EntryUpdate) -> DomainResult<Option<FmeaEntry>> {
        let existing = fmea_entry::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: fmea_entry::ActiveModel = existing.into();

        if let Some(function) = update.function {
            active.function = Set(function);
        }
        if let Some(failure_mode) = update.failure_mode {
            active.failure_mode = Set(failure_mode);
        }
        if let Some(failure_effect) = update.failure_effect {
            active.failure_effect = Set(failure_effect);
        }
        if let Some(severity) = update.severity {
            active.severity = Set(severity);
        }
        if let Some(failure_cause) = update.failure_cause {
            active.failure_cause = Set(failure_cause);
        }
        if let Some(occurrence) = update.occurrence {
            active.occurrence = Set(occurrence);
        }
        if let Some(test_method) = update.test_method {
            active.test_method = Set(test_method);
        }
        if let Some(detection) = update.detection {
            active.detection = Set(detection);
        }
        if let Some(actions) = update.actions {
            active.actions = Set(Some(actions));
        }
        if let Some(status) = update.status {
            active.status = Set(domain_status_to_entity(status));
        }

        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(entry_model_to_domain(updated)))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = fmea_entry::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "FMEA entry",
                id: id.to_string(),
            });
        }

        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        fmea_entry::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskLevel;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(id: i32, severity: i32, occurrence: i32, detection: i32) -> fmea_entry::Model {
        let now = Utc::now();
        fmea_entry::Model {
            id,
            function: "Motor starten".to_string(),
            failure_mode: "Motor startet nicht".to_string(),
            failure_effect: "Produktionsausfall".to_string(),
            severity,
            failure_cause: "Leere Batterie".to_string(),
            occurrence,
            test_method: "Spannungsmessung".to_string(),
            detection,
            actions: None,
            status: fmea_entry::EntryStatus::Open,
            created_by: "user-1".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn delete_of_a_missing_id_reports_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = SeaOrmEntryRepository::new(db);
        let err = repo.delete(42).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
        assert!(err.to_string().contains("42"));
    }

    #[tokio::test]
    async fn risk_filter_is_applied_after_the_fetch() {
        // rpn 48 (low), 60 (medium), 112 (high)
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([vec![
                model(1, 8, 3, 2),
                model(2, 10, 2, 3),
                model(3, 7, 4, 4),
            ]])
            .into_connection();

        let repo = SeaOrmEntryRepository::new(db);
        let filter = EntryFilter {
            risk: Some(RiskLevel::High),
            ..Default::default()
        };

        let entries = repo.list(&filter).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, 3);
        assert_eq!(entries[0].rpn(), 112);
    }

    #[tokio::test]
    async fn get_maps_the_row_into_the_domain_model() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([vec![model(7, 10, 2, 3)]])
            .into_connection();

        let repo = SeaOrmEntryRepository::new(db);
        let entry = repo.get(7).await.unwrap().unwrap();

        assert_eq!(entry.id, 7);
        assert_eq!(entry.status, EntryStatus::Open);
        assert_eq!(entry.rpn(), 60);
    }
}
