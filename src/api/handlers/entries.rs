//! FMEA entry management handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::handlers::domain_error_response;
use crate::api::validated_json::ValidatedJson;
use crate::auth::AuthenticatedUser;
use crate::domain::{
    AccessGate, EntryFilter, EntryStatus, EntryUpdate, FmeaEntry, NewEntry, RepositoryProvider,
    RequiredRole, RiskLevel,
};

/// Entries state
#[derive(Clone)]
pub struct EntriesState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub gate: Arc<dyn AccessGate>,
}

/// FMEA-Eintrag mit berechneter RPZ und Risikostufe
#[derive(Debug, Serialize, ToSchema)]
pub struct EntryResponse {
    /// Eindeutige ID des Eintrags
    pub id: i32,
    /// Betrachtete Funktion (z. B. "Motor starten")
    pub function: String,
    /// Fehlerart
    pub failure_mode: String,
    /// Fehlerfolge
    pub failure_effect: String,
    /// Bedeutung der Fehlerfolge (1-10)
    pub severity: i32,
    /// Fehlerursache
    pub failure_cause: String,
    /// Auftretenswahrscheinlichkeit (1-10)
    pub occurrence: i32,
    /// Prüfmaßnahme
    pub test_method: String,
    /// Entdeckungswahrscheinlichkeit (1-10)
    pub detection: i32,
    /// Maßnahmen (Freitext)
    pub actions: Option<String>,
    /// Status: `Offen`, `In Bearbeitung`, `Abgeschlossen`
    pub status: String,
    /// Risikoprioritätszahl, bei jedem Lesen neu berechnet
    pub rpn: i32,
    /// Risikostufe: `high` (RPZ > 100), `medium` (50 < RPZ ≤ 100), `low`
    pub risk_level: String,
    /// ID des anlegenden Benutzers
    pub created_by: String,
    /// Angelegt am (ISO 8601)
    pub created_at: String,
    /// Zuletzt geändert am (ISO 8601)
    pub updated_at: String,
}

impl From<FmeaEntry> for EntryResponse {
    fn from(e: FmeaEntry) -> Self {
        let rpn = e.rpn();
        let risk_level = e.risk_level().to_string();
        Self {
            id: e.id,
            function: e.function,
            failure_mode: e.failure_mode,
            failure_effect: e.failure_effect,
            severity: e.severity,
            failure_cause: e.failure_cause,
            occurrence: e.occurrence,
            test_method: e.test_method,
            detection: e.detection,
            actions: e.actions,
            status: e.status.to_string(),
            rpn,
            risk_level,
            created_by: e.created_by,
            created_at: e.created_at.to_rfc3339(),
            updated_at: e.updated_at.to_rfc3339(),
        }
    }
}

/// Anlage eines FMEA-Eintrags
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "function": "Motor starten",
    "failure_mode": "Motor startet nicht",
    "failure_effect": "Produktionsausfall",
    "severity": 8,
    "failure_cause": "Leere Batterie",
    "occurrence": 3,
    "test_method": "Spannungsmessung",
    "detection": 2,
    "status": "Offen"
}))]
pub struct CreateEntryRequest {
    /// Betrachtete Funktion
    #[validate(length(min = 1, max = 200))]
    pub function: String,
    /// Fehlerart
    #[validate(length(min = 1, max = 200))]
    pub failure_mode: String,
    /// Fehlerfolge
    #[validate(length(min = 1))]
    pub failure_effect: String,
    /// Bedeutung, 1-10
    #[validate(range(min = 1, max = 10))]
    pub severity: i32,
    /// Fehlerursache
    #[validate(length(min = 1))]
    pub failure_cause: String,
    /// Auftreten, 1-10
    #[validate(range(min = 1, max = 10))]
    pub occurrence: i32,
    /// Prüfmaßnahme
    #[validate(length(min = 1, max = 200))]
    pub test_method: String,
    /// Entdeckung, 1-10
    #[validate(range(min = 1, max = 10))]
    pub detection: i32,
    /// Maßnahmen (optional)
    pub actions: Option<String>,
    /// Status; Standard `Offen`
    pub status: Option<String>,
}

/// Änderung eines FMEA-Eintrags
///
/// Alle Felder optional — nur übergebene Felder werden geändert.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEntryRequest {
    #[validate(length(min = 1, max = 200))]
    pub function: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub failure_mode: Option<String>,
    #[validate(length(min = 1))]
    pub failure_effect: Option<String>,
    /// Bedeutung, 1-10
    #[validate(range(min = 1, max = 10))]
    pub severity: Option<i32>,
    #[validate(length(min = 1))]
    pub failure_cause: Option<String>,
    /// Auftreten, 1-10
    #[validate(range(min = 1, max = 10))]
    pub occurrence: Option<i32>,
    #[validate(length(min = 1, max = 200))]
    pub test_method: Option<String>,
    /// Entdeckung, 1-10
    #[validate(range(min = 1, max = 10))]
    pub detection: Option<i32>,
    pub actions: Option<String>,
    pub status: Option<String>,
}

/// Filterparameter der Eintragsliste
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListEntriesParams {
    /// Volltextsuche über Funktion, Fehlerart, Fehlerursache und Fehlerfolge
    pub search: Option<String>,
    /// Risikofilter: `high`, `medium`, `low`
    pub risk_filter: Option<String>,
    /// Statusfilter: `Offen`, `In Bearbeitung`, `Abgeschlossen`
    pub status_filter: Option<String>,
}

fn parse_status(raw: &str) -> Result<EntryStatus, (StatusCode, Json<ApiResponse<()>>)> {
    raw.parse::<EntryStatus>()
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, Json(ApiResponse::error(e))))
}

fn parse_risk(raw: &str) -> Result<RiskLevel, (StatusCode, Json<ApiResponse<()>>)> {
    raw.parse::<RiskLevel>()
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, Json(ApiResponse::error(e))))
}

/// Liste aller FMEA-Einträge
///
/// Sortiert nach Anlagedatum, neueste zuerst. RPZ und Risikostufe
/// werden pro Eintrag neu berechnet; der Risikofilter greift daher
/// nach dem Laden.
#[utoipa::path(
    get,
    path = "/api/v1/entries",
    tag = "Entries",
    security(("bearer_auth" = [])),
    params(ListEntriesParams),
    responses(
        (status = 200, description = "Liste der Einträge", body = ApiResponse<Vec<EntryResponse>>),
        (status = 401, description = "Nicht angemeldet"),
        (status = 422, description = "Unbekannter Filterwert")
    )
)]
pub async fn list_entries(
    State(state): State<EntriesState>,
    Query(params): Query<ListEntriesParams>,
) -> Result<Json<ApiResponse<Vec<EntryResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let mut filter = EntryFilter {
        search: params.search.clone(),
        ..Default::default()
    };

    if let Some(ref raw) = params.status_filter {
        filter.status = Some(parse_status(raw)?);
    }
    if let Some(ref raw) = params.risk_filter {
        filter.risk = Some(parse_risk(raw)?);
    }

    match state.repos.entries().list(&filter).await {
        Ok(entries) => {
            let responses: Vec<EntryResponse> = entries.into_iter().map(Into::into).collect();
            Ok(Json(ApiResponse::success(responses)))
        }
        Err(e) => Err(domain_error_response(e)),
    }
}

/// Einzelner FMEA-Eintrag
#[utoipa::path(
    get,
    path = "/api/v1/entries/{id}",
    tag = "Entries",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "ID des Eintrags")),
    responses(
        (status = 200, description = "Der Eintrag", body = ApiResponse<EntryResponse>),
        (status = 404, description = "Eintrag nicht gefunden")
    )
)]
pub async fn get_entry(
    State(state): State<EntriesState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<EntryResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.entries().get(id).await {
        Ok(Some(entry)) => Ok(Json(ApiResponse::success(entry.into()))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("FMEA entry {} not found", id))),
        )),
        Err(e) => Err(domain_error_response(e)),
    }
}

/// Neuen FMEA-Eintrag anlegen
///
/// Der anlegende Benutzer wird aus der Sitzung übernommen.
#[utoipa::path(
    post,
    path = "/api/v1/entries",
    tag = "Entries",
    security(("bearer_auth" = [])),
    request_body = CreateEntryRequest,
    responses(
        (status = 201, description = "Eintrag angelegt", body = ApiResponse<EntryResponse>),
        (status = 422, description = "Pflichtfeld fehlt oder Bewertung außerhalb 1-10")
    )
)]
pub async fn create_entry(
    State(state): State<EntriesState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(req): ValidatedJson<CreateEntryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EntryResponse>>), (StatusCode, Json<ApiResponse<()>>)> {
    let status = match req.status.as_deref() {
        Some(raw) => parse_status(raw)?,
        None => EntryStatus::default(),
    };

    let data = NewEntry {
        function: req.function,
        failure_mode: req.failure_mode,
        failure_effect: req.failure_effect,
        severity: req.severity,
        failure_cause: req.failure_cause,
        occurrence: req.occurrence,
        test_method: req.test_method,
        detection: req.detection,
        actions: req.actions,
        status,
        created_by: user.user_id,
    };

    match state.repos.entries().create(data).await {
        Ok(entry) => Ok((StatusCode::CREATED, Json(ApiResponse::success(entry.into())))),
        Err(e) => Err(domain_error_response(e)),
    }
}

/// FMEA-Eintrag ändern
///
/// `updated_at` wird automatisch aktualisiert.
#[utoipa::path(
    put,
    path = "/api/v1/entries/{id}",
    tag = "Entries",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "ID des Eintrags")),
    request_body = UpdateEntryRequest,
    responses(
        (status = 200, description = "Eintrag aktualisiert", body = ApiResponse<EntryResponse>),
        (status = 404, description = "Eintrag nicht gefunden"),
        (status = 422, description = "Bewertung außerhalb 1-10")
    )
)]
pub async fn update_entry(
    State(state): State<EntriesState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateEntryRequest>,
) -> Result<Json<ApiResponse<EntryResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let status = match req.status.as_deref() {
        Some(raw) => Some(parse_status(raw)?),
        None => None,
    };

    let update = EntryUpdate {
        function: req.function,
        failure_mode: req.failure_mode,
        failure_effect: req.failure_effect,
        severity: req.severity,
        failure_cause: req.failure_cause,
        occurrence: req.occurrence,
        test_method: req.test_method,
        detection: req.detection,
        actions: req.actions,
        status,
    };

    match state.repos.entries().update(id, update).await {
        Ok(Some(entry)) => Ok(Json(ApiResponse::success(entry.into()))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("FMEA entry {} not found", id))),
        )),
        Err(e) => Err(domain_error_response(e)),
    }
}

/// FMEA-Eintrag löschen
///
/// Nur für Administratoren. Verknüpfte Maßnahmen bleiben erhalten und
/// verlieren lediglich ihre Verknüpfung.
#[utoipa::path(
    delete,
    path = "/api/v1/entries/{id}",
    tag = "Entries",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "ID des Eintrags")),
    responses(
        (status = 200, description = "Eintrag gelöscht"),
        (status = 403, description = "Keine Berechtigung"),
        (status = 404, description = "Eintrag nicht gefunden")
    )
)]
pub async fn delete_entry(
    State(state): State<EntriesState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .gate
        .authorize(&user.identity(), RequiredRole::Admin)
        .map_err(domain_error_response)?;

    match state.repos.entries().delete(id).await {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(domain_error_response(e)),
    }
}
