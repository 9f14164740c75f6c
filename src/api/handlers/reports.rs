//! CSV export and dashboard statistics handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::ApiResponse;
use crate::api::handlers::domain_error_response;
use crate::application::services::{compute_statistics, export_entries_csv, Statistics};
use crate::domain::{EntryFilter, RepositoryProvider};

/// Reports state
#[derive(Clone)]
pub struct ReportsState {
    pub repos: Arc<dyn RepositoryProvider>,
}

/// Kennzahlen über alle FMEA-Einträge
#[derive(Debug, Serialize, ToSchema)]
pub struct StatisticsResponse {
    /// Gesamtzahl der Einträge
    pub total_entries: usize,
    pub risk_distribution: RiskCounts,
    pub status_distribution: StatusCounts,
    /// Anteil abgeschlossener Einträge in Prozent, eine Nachkommastelle
    pub completion_rate: f64,
}

/// Einträge je Risikostufe
#[derive(Debug, Serialize, ToSchema)]
pub struct RiskCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Einträge je Status
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusCounts {
    pub open: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl From<Statistics> for StatisticsResponse {
    fn from(stats: Statistics) -> Self {
        Self {
            total_entries: stats.total_entries,
            risk_distribution: RiskCounts {
                high: stats.risk_distribution.high,
                medium: stats.risk_distribution.medium,
                low: stats.risk_distribution.low,
            },
            status_distribution: StatusCounts {
                open: stats.status_distribution.open,
                in_progress: stats.status_distribution.in_progress,
                completed: stats.status_distribution.completed,
            },
            completion_rate: stats.completion_rate,
        }
    }
}

/// CSV-Export aller FMEA-Einträge
///
/// Semikolon-getrennt, deutsche Spaltenüberschriften, RPZ pro Zeile neu
/// berechnet. Der Dateiname enthält den Exportzeitpunkt.
#[utoipa::path(
    get,
    path = "/api/v1/export",
    tag = "Reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "CSV-Datei", body = String, content_type = "text/csv"),
        (status = 401, description = "Nicht angemeldet")
    )
)]
pub async fn export_csv(
    State(state): State<ReportsState>,
) -> Result<Response, (StatusCode, Json<ApiResponse<()>>)> {
    let entries = state
        .repos
        .entries()
        .list(&EntryFilter::default())
        .await
        .map_err(domain_error_response)?;

    let bytes = export_entries_csv(&entries).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to render CSV: {}", e))),
        )
    })?;

    let filename = format!("FMEA_Export_{}.csv", Utc::now().format("%Y%m%d_%H%M%S"));
    let headers = [
        (
            header::CONTENT_TYPE,
            "text/csv; charset=utf-8".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", filename),
        ),
    ];

    Ok((headers, bytes).into_response())
}

/// Kennzahlen
///
/// Gesamtzahl, Verteilung nach Risikostufe und Status sowie die
/// Abschlussquote. Risikostufen werden aus den Bewertungen neu
/// berechnet.
#[utoipa::path(
    get,
    path = "/api/v1/statistics",
    tag = "Reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Kennzahlen", body = ApiResponse<StatisticsResponse>),
        (status = 401, description = "Nicht angemeldet")
    )
)]
pub async fn get_statistics(
    State(state): State<ReportsState>,
) -> Result<Json<ApiResponse<StatisticsResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let entries = state
        .repos
        .entries()
        .list(&EntryFilter::default())
        .await
        .map_err(domain_error_response)?;

    let stats = compute_statistics(&entries);
    Ok(Json(ApiResponse::success(stats.into())))
}
