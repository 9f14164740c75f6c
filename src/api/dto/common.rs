//! Common API DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard-Antworthülle der API
///
/// Alle REST-Endpunkte liefern ihre Daten in dieser Hülle.
/// Bei Erfolg: `{"success": true, "data": {...}}`,
/// bei Fehlern: `{"success": false, "error": "Beschreibung"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` wenn die Anfrage erfolgreich war
    pub success: bool,
    /// Nutzdaten; `null` im Fehlerfall
    pub data: Option<T>,
    /// Fehlerbeschreibung; `null` bei Erfolg
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}
