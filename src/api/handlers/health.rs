//! Health check endpoint

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Dienststatus
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` wenn der Dienst läuft
    pub status: String,
    /// Version des FMEA-Service (aus Cargo.toml)
    pub version: String,
}

/// Verfügbarkeitsprüfung
///
/// Keine Anmeldung erforderlich; gedacht für Monitoring.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Dienst läuft", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
