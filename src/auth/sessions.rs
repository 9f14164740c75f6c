//! In-memory session registry.
//!
//! A session opens on successful login and closes on logout; a token
//! whose session ID is no longer registered does not authenticate, even
//! if the JWT itself has not expired yet. The registry is process-local:
//! a restart logs everyone out, which is acceptable for a small internal
//! tool.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;

#[derive(Debug, Clone)]
struct Session {
    expires_at: i64,
}

/// Registry of currently open sessions, keyed by the token's session ID.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, Session>,
}

/// Shared handle used by middleware and handlers
pub type SharedSessionRegistry = Arc<SessionRegistry>;

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedSessionRegistry {
        Arc::new(Self::new())
    }

    /// Register a freshly issued session.
    pub fn open(&self, session_id: impl Into<String>, expires_at: i64) {
        self.sessions.insert(session_id.into(), Session { expires_at });
    }

    /// Whether the session is still open. Expired sessions are dropped
    /// on the way out.
    pub fn is_active(&self, session_id: &str) -> bool {
        let now = Utc::now().timestamp();
        // The read guard must be released before removing from the map.
        let live = match self.sessions.get(session_id) {
            Some(session) => session.expires_at > now,
            None => return false,
        };
        if !live {
            self.sessions.remove(session_id);
        }
        live
    }

    /// Close a session. Returns `false` when it was not open.
    pub fn close(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    pub fn active_count(&self) -> usize {
        let now = Utc::now().timestamp();
        self.sessions
            .iter()
            .filter(|entry| entry.value().expires_at > now)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_then_close() {
        let registry = SessionRegistry::new();
        let exp = Utc::now().timestamp() + 3600;

        registry.open("sid-1", exp);
        assert!(registry.is_active("sid-1"));
        assert_eq!(registry.active_count(), 1);

        assert!(registry.close("sid-1"));
        assert!(!registry.is_active("sid-1"));
        assert!(!registry.close("sid-1"));
    }

    #[test]
    fn unknown_session_is_not_active() {
        let registry = SessionRegistry::new();
        assert!(!registry.is_active("nope"));
    }

    #[test]
    fn expired_session_is_not_active() {
        let registry = SessionRegistry::new();
        registry.open("sid-1", Utc::now().timestamp() - 1);
        assert!(!registry.is_active("sid-1"));
        assert_eq!(registry.active_count(), 0);
    }
}
