//! Access gate: credential verification and role checks.
//!
//! The gate is an injectable seam between the HTTP layer and the user
//! store. Handlers receive an [`Identity`] threaded through the request
//! rather than consulting any ambient global state.

use async_trait::async_trait;

use super::error::DomainResult;
use super::user::UserRole;

/// Authenticated caller identity, threaded through each operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub username: String,
    pub role: UserRole,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Role requirement for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredRole {
    /// Any valid session is enough
    Authenticated,
    /// Destructive operations: delete entries, manage actions
    Admin,
}

/// Maps a credential pair to an identity and gates operations by role.
#[async_trait]
pub trait AccessGate: Send + Sync {
    /// Verify a credential pair against the user store.
    ///
    /// The same rejection is returned for an unknown username and for a
    /// wrong password, so the response never reveals whether an account
    /// exists.
    async fn authenticate(&self, username: &str, password: &str) -> DomainResult<Identity>;

    /// Check that an identity satisfies a role requirement.
    fn authorize(&self, identity: &Identity, required: RequiredRole) -> DomainResult<()>;
}
