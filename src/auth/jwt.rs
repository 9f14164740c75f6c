//! JWT Token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: i64,
    /// Issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "super-secret-key-change-in-production".to_string()),
            expiration_hours: std::env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(24),
            issuer: "fmea-service".to_string(),
        }
    }
}

/// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Username
    pub username: String,
    /// User role
    pub role: String,
    /// Session ID; the session registry tracks it until logout
    pub jti: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Create new claims for a user, with a fresh session ID
    pub fn new(user_id: &str, username: &str, role: &str, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(config.expiration_hours);

        Self {
            sub: user_id.to_string(),
            username: username.to_string(),
            role: role.to_string(),
            jti: uuid::Uuid::new_v4().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Encode claims into a signed JWT
pub fn create_token(
    claims: &Claims,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify and decode a JWT token
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

/// Errors that can occur during authentication
#[derive(Debug, Clone)]
pub enum AuthError {
    /// Token is missing
    MissingToken,
    /// Token is invalid
    InvalidToken,
    /// Token has expired
    ExpiredToken,
    /// Session was closed by logout
    SessionClosed,
    /// Insufficient permissions
    InsufficientPermissions,
    /// Invalid credentials
    InvalidCredentials,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingToken => write!(f, "Missing authentication token"),
            Self::InvalidToken => write!(f, "Invalid authentication token"),
            Self::ExpiredToken => write!(f, "Token has expired"),
            Self::SessionClosed => write!(f, "Session is no longer active"),
            Self::InsufficientPermissions => write!(f, "Insufficient permissions"),
            Self::InvalidCredentials => write!(f, "Invalid credentials"),
        }
    }
}

impl std::error::Error for AuthError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_verify_token() {
        let config = JwtConfig::default();
        let claims = Claims::new("user-123", "testuser", "admin", &config);
        let token = create_token(&claims, &config).unwrap();

        let decoded = verify_token(&token, &config).unwrap();
        assert_eq!(decoded.sub, "user-123");
        assert_eq!(decoded.username, "testuser");
        assert_eq!(decoded.role, "admin");
        assert_eq!(decoded.jti, claims.jti);
        assert!(!decoded.is_expired());
    }

    #[test]
    fn test_invalid_token() {
        let config = JwtConfig::default();
        let result = verify_token("invalid-token", &config);
        assert!(result.is_err());
    }

    #[test]
    fn each_session_gets_a_fresh_id() {
        let config = JwtConfig::default();
        let a = Claims::new("user-123", "testuser", "user", &config);
        let b = Claims::new("user-123", "testuser", "user", &config);
        assert_ne!(a.jti, b.jti);
    }
}
