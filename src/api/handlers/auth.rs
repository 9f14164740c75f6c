//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::handlers::domain_error_response;
use crate::api::validated_json::ValidatedJson;
use crate::auth::{AuthService, AuthenticatedUser};
use crate::domain::{AccessGate, DomainError, RepositoryProvider};

/// Auth state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub auth: Arc<AuthService>,
    pub repos: Arc<dyn RepositoryProvider>,
}

/// Anmeldedaten
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Benutzername
    #[validate(length(min = 1, max = 80))]
    pub username: String,
    /// Passwort
    #[validate(length(min = 1))]
    pub password: String,
}

/// Antwort nach erfolgreicher Anmeldung
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer-Token für den `Authorization`-Header
    pub token: String,
    pub token_type: String,
    /// Gültigkeit des Tokens in Sekunden
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Angaben zum angemeldeten Benutzer
#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    /// Rolle: `admin` oder `user`
    pub role: String,
}

/// Anmeldung
///
/// Prüft die Anmeldedaten und eröffnet eine Sitzung. Die Antwort
/// enthält das Bearer-Token; es wird bei jeder weiteren Anfrage im
/// `Authorization`-Header mitgeschickt.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Anmeldung erfolgreich", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Ungültige Anmeldedaten")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let identity = match state
        .auth
        .authenticate(&request.username, &request.password)
        .await
    {
        Ok(identity) => identity,
        Err(DomainError::Auth(message)) => {
            return Err((StatusCode::UNAUTHORIZED, Json(ApiResponse::error(message))));
        }
        Err(e) => return Err(domain_error_response(e)),
    };

    let session = state
        .auth
        .open_session(&identity)
        .map_err(domain_error_response)?;

    let response = LoginResponse {
        token: session.token,
        token_type: "Bearer".to_string(),
        expires_in: session.expires_in,
        user: UserInfo {
            id: identity.id,
            username: identity.username,
            role: identity.role.to_string(),
        },
    };

    Ok(Json(ApiResponse::success(response)))
}

/// Abmeldung
///
/// Schließt die aktuelle Sitzung; das Token ist danach ungültig.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Abmeldung erfolgreich"),
        (status = 401, description = "Nicht angemeldet")
    )
)]
pub async fn logout(
    State(state): State<AuthHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Json<ApiResponse<()>> {
    if !state.auth.close_session(&user.session_id) {
        tracing::debug!("logout for already closed session {}", user.session_id);
    }

    Json(ApiResponse::success(()))
}

/// Aktueller Benutzer
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Angaben zum angemeldeten Benutzer", body = ApiResponse<UserInfo>),
        (status = 401, description = "Nicht angemeldet")
    )
)]
pub async fn get_current_user(
    State(state): State<AuthHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<UserInfo>>, (StatusCode, Json<ApiResponse<()>>)> {
    let db_user = state
        .repos
        .users()
        .find_by_id(&user.user_id)
        .await
        .map_err(domain_error_response)?;

    let Some(db_user) = db_user else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("User not found")),
        ));
    };

    Ok(Json(ApiResponse::success(UserInfo {
        id: db_user.id,
        username: db_user.username,
        role: db_user.role.to_string(),
    })))
}
