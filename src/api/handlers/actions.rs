//! Remediation action management handlers (admin only)

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::handlers::domain_error_response;
use crate::api::validated_json::ValidatedJson;
use crate::auth::AuthenticatedUser;
use crate::domain::{
    ActionPriority, ActionUpdate, ActionWithEntry, NewAction, RepositoryProvider,
};

/// Actions state
#[derive(Clone)]
pub struct ActionsState {
    pub repos: Arc<dyn RepositoryProvider>,
}

/// Maßnahme mit berechneter neuer RPZ
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse {
    /// Eindeutige ID der Maßnahme
    pub id: i32,
    /// Titel
    pub title: String,
    /// Beschreibung
    pub description: Option<String>,
    /// Zugewiesen an
    pub assigned_to: Option<String>,
    /// Priorität: `Niedrig`, `Mittel`, `Hoch`
    pub priority: String,
    /// Status (Freitext, Standard `Offen`)
    pub status: String,
    /// Fälligkeitsdatum (ISO 8601)
    pub due_date: Option<NaiveDate>,
    /// ID des zugehörigen FMEA-Eintrags; `null` wenn nicht verknüpft
    pub fmea_entry_id: Option<i32>,
    /// Funktion des zugehörigen FMEA-Eintrags
    pub fmea_function: Option<String>,
    /// Verantwortlicher für die Umsetzung
    pub responsible: Option<String>,
    /// Getroffene Maßnahme
    pub measure_taken: Option<String>,
    /// Umgesetzt am
    pub implemented_at: Option<NaiveDate>,
    /// Umgesetzt durch
    pub implemented_by: Option<String>,
    /// Neue Bedeutung nach Umsetzung (1-10)
    pub new_severity: Option<i32>,
    /// Neues Auftreten nach Umsetzung (1-10)
    pub new_occurrence: Option<i32>,
    /// Neue Entdeckung nach Umsetzung (1-10)
    pub new_detection: Option<i32>,
    /// Neue RPZ; nur gesetzt wenn alle drei neuen Bewertungen vorliegen,
    /// bei jedem Lesen neu berechnet
    pub new_rpn: Option<i32>,
    /// ID des anlegenden Benutzers
    pub created_by: String,
    /// Angelegt am (ISO 8601)
    pub created_at: String,
    /// Zuletzt geändert am (ISO 8601)
    pub updated_at: String,
}

impl From<ActionWithEntry> for ActionResponse {
    fn from(row: ActionWithEntry) -> Self {
        let ActionWithEntry {
            action: a,
            entry_function,
        } = row;
        let new_rpn = a.new_rpn();
        Self {
            id: a.id,
            title: a.title,
            description: a.description,
            assigned_to: a.assigned_to,
            priority: a.priority.to_string(),
            status: a.status,
            due_date: a.due_date,
            fmea_entry_id: a.fmea_entry_id,
            fmea_function: entry_function,
            responsible: a.responsible,
            measure_taken: a.measure_taken,
            implemented_at: a.implemented_at,
            implemented_by: a.implemented_by,
            new_severity: a.new_severity,
            new_occurrence: a.new_occurrence,
            new_detection: a.new_detection,
            new_rpn,
            created_by: a.created_by,
            created_at: a.created_at.to_rfc3339(),
            updated_at: a.updated_at.to_rfc3339(),
        }
    }
}

impl From<crate::domain::Action> for ActionResponse {
    fn from(action: crate::domain::Action) -> Self {
        ActionWithEntry {
            action,
            entry_function: None,
        }
        .into()
    }
}

/// Anlage einer Maßnahme
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateActionRequest {
    /// Titel
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Beschreibung
    pub description: Option<String>,
    /// Zugewiesen an
    pub assigned_to: Option<String>,
    /// Priorität: `Niedrig`, `Mittel`, `Hoch`; Standard `Mittel`
    pub priority: Option<String>,
    /// Status; Standard `Offen`
    pub status: Option<String>,
    /// Fälligkeitsdatum (ISO 8601, z. B. `2024-06-30`)
    pub due_date: Option<NaiveDate>,
    /// ID des zugehörigen FMEA-Eintrags
    pub fmea_entry_id: Option<i32>,
    /// Verantwortlicher für die Umsetzung
    pub responsible: Option<String>,
    /// Getroffene Maßnahme
    pub measure_taken: Option<String>,
    /// Umgesetzt am
    pub implemented_at: Option<NaiveDate>,
    /// Umgesetzt durch
    pub implemented_by: Option<String>,
    /// Neue Bedeutung, 1-10
    #[validate(range(min = 1, max = 10))]
    pub new_severity: Option<i32>,
    /// Neues Auftreten, 1-10
    #[validate(range(min = 1, max = 10))]
    pub new_occurrence: Option<i32>,
    /// Neue Entdeckung, 1-10
    #[validate(range(min = 1, max = 10))]
    pub new_detection: Option<i32>,
}

/// Änderung einer Maßnahme
///
/// Alle Felder optional — nur übergebene Felder werden geändert.
/// `fmea_entry_id: null` löst die Verknüpfung nicht; dazu dient
/// `detach_entry`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateActionRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    /// Priorität: `Niedrig`, `Mittel`, `Hoch`
    pub priority: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<NaiveDate>,
    /// Neue Verknüpfung zu einem FMEA-Eintrag
    pub fmea_entry_id: Option<i32>,
    /// `true` löst die Verknüpfung zum FMEA-Eintrag
    #[serde(default)]
    pub detach_entry: bool,
    pub responsible: Option<String>,
    pub measure_taken: Option<String>,
    pub implemented_at: Option<NaiveDate>,
    pub implemented_by: Option<String>,
    /// Neue Bedeutung, 1-10
    #[validate(range(min = 1, max = 10))]
    pub new_severity: Option<i32>,
    /// Neues Auftreten, 1-10
    #[validate(range(min = 1, max = 10))]
    pub new_occurrence: Option<i32>,
    /// Neue Entdeckung, 1-10
    #[validate(range(min = 1, max = 10))]
    pub new_detection: Option<i32>,
}

fn parse_priority(raw: &str) -> Result<ActionPriority, (StatusCode, Json<ApiResponse<()>>)> {
    raw.parse::<ActionPriority>()
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, Json(ApiResponse::error(e))))
}

/// Liste aller Maßnahmen
///
/// Enthält pro Maßnahme die Funktion des verknüpften FMEA-Eintrags.
/// Sortiert nach Anlagedatum, neueste zuerst.
#[utoipa::path(
    get,
    path = "/api/v1/actions",
    tag = "Actions",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Liste der Maßnahmen", body = ApiResponse<Vec<ActionResponse>>),
        (status = 403, description = "Keine Berechtigung")
    )
)]
pub async fn list_actions(
    State(state): State<ActionsState>,
) -> Result<Json<ApiResponse<Vec<ActionResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.actions().list().await {
        Ok(rows) => {
            let responses: Vec<ActionResponse> = rows.into_iter().map(Into::into).collect();
            Ok(Json(ApiResponse::success(responses)))
        }
        Err(e) => Err(domain_error_response(e)),
    }
}

/// Neue Maßnahme anlegen
#[utoipa::path(
    post,
    path = "/api/v1/actions",
    tag = "Actions",
    security(("bearer_auth" = [])),
    request_body = CreateActionRequest,
    responses(
        (status = 201, description = "Maßnahme angelegt", body = ApiResponse<ActionResponse>),
        (status = 403, description = "Keine Berechtigung"),
        (status = 422, description = "Pflichtfeld fehlt oder Bewertung außerhalb 1-10")
    )
)]
pub async fn create_action(
    State(state): State<ActionsState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(req): ValidatedJson<CreateActionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ActionResponse>>), (StatusCode, Json<ApiResponse<()>>)> {
    let priority = match req.priority.as_deref() {
        Some(raw) => parse_priority(raw)?,
        None => ActionPriority::default(),
    };

    let data = NewAction {
        title: req.title,
        description: req.description,
        assigned_to: req.assigned_to,
        priority,
        status: req.status.unwrap_or_else(|| "Offen".to_string()),
        due_date: req.due_date,
        fmea_entry_id: req.fmea_entry_id,
        created_by: user.user_id,
        responsible: req.responsible,
        measure_taken: req.measure_taken,
        implemented_at: req.implemented_at,
        implemented_by: req.implemented_by,
        new_severity: req.new_severity,
        new_occurrence: req.new_occurrence,
        new_detection: req.new_detection,
    };

    match state.repos.actions().create(data).await {
        Ok(action) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(action.into())),
        )),
        Err(e) => Err(domain_error_response(e)),
    }
}

/// Maßnahme ändern
#[utoipa::path(
    put,
    path = "/api/v1/actions/{id}",
    tag = "Actions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "ID der Maßnahme")),
    request_body = UpdateActionRequest,
    responses(
        (status = 200, description = "Maßnahme aktualisiert", body = ApiResponse<ActionResponse>),
        (status = 403, description = "Keine Berechtigung"),
        (status = 404, description = "Maßnahme nicht gefunden")
    )
)]
pub async fn update_action(
    State(state): State<ActionsState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateActionRequest>,
) -> Result<Json<ApiResponse<ActionResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let priority = match req.priority.as_deref() {
        Some(raw) => Some(parse_priority(raw)?),
        None => None,
    };

    let entry_link = if req.detach_entry {
        Some(None)
    } else {
        req.fmea_entry_id.map(Some)
    };

    let update = ActionUpdate {
        title: req.title,
        description: req.description,
        assigned_to: req.assigned_to,
        priority,
        status: req.status,
        due_date: req.due_date,
        fmea_entry_id: entry_link,
        responsible: req.responsible,
        measure_taken: req.measure_taken,
        implemented_at: req.implemented_at,
        implemented_by: req.implemented_by,
        new_severity: req.new_severity,
        new_occurrence: req.new_occurrence,
        new_detection: req.new_detection,
    };

    match state.repos.actions().update(id, update).await {
        Ok(Some(action)) => Ok(Json(ApiResponse::success(action.into()))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Action {} not found", id))),
        )),
        Err(e) => Err(domain_error_response(e)),
    }
}

/// Maßnahme löschen
#[utoipa::path(
    delete,
    path = "/api/v1/actions/{id}",
    tag = "Actions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "ID der Maßnahme")),
    responses(
        (status = 200, description = "Maßnahme gelöscht"),
        (status = 403, description = "Keine Berechtigung"),
        (status = 404, description = "Maßnahme nicht gefunden")
    )
)]
pub async fn delete_action(
    State(state): State<ActionsState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.actions().delete(id).await {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(domain_error_response(e)),
    }
}
