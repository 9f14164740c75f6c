//! Access gate implementation backed by the user store.
//!
//! `AuthService` owns the credential check (bcrypt), the role check, and
//! the session lifecycle: a successful login opens a session in the
//! registry and hands out a signed bearer token; logout closes it.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    AccessGate, DomainError, DomainResult, Identity, RequiredRole, UserRepositoryInterface,
};

use super::jwt::{create_token, Claims, JwtConfig};
use super::password::verify_password;
use super::sessions::SharedSessionRegistry;

/// Identical message for unknown usernames and wrong passwords, so the
/// response never reveals whether an account exists.
const REJECTED: &str = "invalid credentials";

/// A freshly opened session.
#[derive(Debug, Clone)]
pub struct OpenedSession {
    /// Signed bearer token to hand to the client
    pub token: String,
    /// Registry key of the session
    pub session_id: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

pub struct AuthService {
    users: Arc<dyn UserRepositoryInterface>,
    jwt_config: JwtConfig,
    sessions: SharedSessionRegistry,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepositoryInterface>,
        jwt_config: JwtConfig,
        sessions: SharedSessionRegistry,
    ) -> Self {
        Self {
            users,
            jwt_config,
            sessions,
        }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    /// Open a session for an authenticated identity and issue its token.
    pub fn open_session(&self, identity: &Identity) -> DomainResult<OpenedSession> {
        let claims = Claims::new(
            &identity.id,
            &identity.username,
            &identity.role.to_string(),
            &self.jwt_config,
        );
        let token = create_token(&claims, &self.jwt_config)
            .map_err(|e| DomainError::Auth(format!("failed to issue token: {}", e)))?;

        self.sessions.open(claims.jti.clone(), claims.exp);

        Ok(OpenedSession {
            token,
            session_id: claims.jti,
            expires_in: self.jwt_config.expiration_hours * 3600,
        })
    }

    /// Close a session. Returns `false` when it was not open.
    pub fn close_session(&self, session_id: &str) -> bool {
        self.sessions.close(session_id)
    }
}

#[async_trait]
impl AccessGate for AuthService {
    async fn authenticate(&self, username: &str, password: &str) -> DomainResult<Identity> {
        let Some(user) = self.users.find_by_username(username).await? else {
            return Err(DomainError::Auth(REJECTED.to_string()));
        };

        if !verify_password(password, &user.password_hash).unwrap_or(false) {
            return Err(DomainError::Auth(REJECTED.to_string()));
        }

        Ok(Identity {
            id: user.id,
            username: user.username,
            role: user.role,
        })
    }

    fn authorize(&self, identity: &Identity, required: RequiredRole) -> DomainResult<()> {
        match required {
            RequiredRole::Authenticated => Ok(()),
            RequiredRole::Admin if identity.is_admin() => Ok(()),
            RequiredRole::Admin => Err(DomainError::Auth("admin role required".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;
    use crate::auth::sessions::SessionRegistry;
    use crate::domain::{CreateUserData, User, UserRole};
    use chrono::Utc;

    struct FixedUsers {
        users: Vec<User>,
    }

    #[async_trait]
    impl UserRepositoryInterface for FixedUsers {
        async fn create_user(&self, _data: CreateUserData) -> DomainResult<User> {
            unreachable!("not used in these tests")
        }

        async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
            Ok(self.users.iter().find(|u| u.username == username).cloned())
        }

        async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
            Ok(self.users.iter().find(|u| u.id == id).cloned())
        }

        async fn count(&self) -> DomainResult<u64> {
            Ok(self.users.len() as u64)
        }
    }

    fn service_with(users: Vec<User>) -> AuthService {
        AuthService::new(
            Arc::new(FixedUsers { users }),
            JwtConfig::default(),
            SessionRegistry::shared(),
        )
    }

    fn user(username: &str, password: &str, role: UserRole) -> User {
        User {
            id: format!("id-{}", username),
            username: username.to_string(),
            password_hash: hash_password(password).unwrap(),
            role,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn authenticate_accepts_a_valid_credential_pair() {
        let service = service_with(vec![user("admin", "admin123", UserRole::Admin)]);
        let identity = service.authenticate("admin", "admin123").await.unwrap();
        assert_eq!(identity.username, "admin");
        assert!(identity.is_admin());
    }

    #[tokio::test]
    async fn rejection_does_not_reveal_whether_the_username_exists() {
        let service = service_with(vec![user("admin", "admin123", UserRole::Admin)]);

        let wrong_password = service.authenticate("admin", "nope").await.unwrap_err();
        let unknown_user = service.authenticate("ghost", "nope").await.unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn authorize_gates_admin_operations() {
        let service = service_with(vec![]);
        let admin = Identity {
            id: "a".into(),
            username: "admin".into(),
            role: UserRole::Admin,
        };
        let plain = Identity {
            id: "u".into(),
            username: "user".into(),
            role: UserRole::User,
        };

        assert!(service.authorize(&admin, RequiredRole::Admin).is_ok());
        assert!(service.authorize(&plain, RequiredRole::Admin).is_err());
        assert!(service.authorize(&plain, RequiredRole::Authenticated).is_ok());
    }

    #[tokio::test]
    async fn logout_closes_the_session() {
        let service = service_with(vec![user("user", "user123", UserRole::User)]);
        let identity = service.authenticate("user", "user123").await.unwrap();

        let session = service.open_session(&identity).unwrap();
        assert!(service.sessions.is_active(&session.session_id));

        assert!(service.close_session(&session.session_id));
        assert!(!service.sessions.is_active(&session.session_id));
    }
}
