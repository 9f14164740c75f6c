//! Authentication middleware for Axum

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::{Identity, UserRole};

use super::jwt::{verify_token, AuthError, Claims, JwtConfig};
use super::sessions::SharedSessionRegistry;

/// Authentication state containing JWT config and the session registry
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
    pub sessions: SharedSessionRegistry,
}

/// Authenticated user information extracted from a verified token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub username: String,
    pub role: UserRole,
    pub session_id: String,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
            role: claims.role.parse().unwrap_or(UserRole::User),
            session_id: claims.jti,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Identity to hand to the access gate
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.user_id.clone(),
            username: self.username.clone(),
            role: self.role,
        }
    }
}

/// Extract token from Authorization header
fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// Session authentication middleware - requires a valid token whose
/// session is still open in the registry.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(&auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => {
            if claims.is_expired() {
                return auth_error_response(AuthError::ExpiredToken);
            }

            if !auth_state.sessions.is_active(&claims.jti) {
                return auth_error_response(AuthError::SessionClosed);
            }

            let user = AuthenticatedUser::from_claims(claims);
            request.extensions_mut().insert(user);

            next.run(request).await
        }
        Err(_) => auth_error_response(AuthError::InvalidToken),
    }
}

/// Admin-only middleware - must be layered inside `auth_middleware`
pub async fn admin_middleware(request: Request<Body>, next: Next) -> Response {
    let user = request.extensions().get::<AuthenticatedUser>();

    match user {
        Some(user) if user.is_admin() => next.run(request).await,
        Some(_) => auth_error_response(AuthError::InsufficientPermissions),
        None => auth_error_response(AuthError::MissingToken),
    }
}

/// Create an authentication error response
fn auth_error_response(error: AuthError) -> Response {
    let status = match error {
        AuthError::InsufficientPermissions => StatusCode::FORBIDDEN,
        _ => StatusCode::UNAUTHORIZED,
    };

    let body = Json(json!({
        "success": false,
        "error": error.to_string(),
    }));

    (status, body).into_response()
}
