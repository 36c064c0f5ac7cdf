//! Process-wide authentication state.
//!
//! [`Session`] is a cheap handle shared by the gateway, the catalog
//! controller and the front end. All writes go through
//! [`Session::set_authenticated`] or, for a 401 seen by the gateway,
//! [`Session::expire`]. Observers can [`Session::subscribe`] to react to a
//! forced logout regardless of which view issued the failing call.

use std::sync::Arc;

use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Never logged in, logged out, or login failed.
    Anonymous,
    Authenticated,
    /// The service answered 401; the user must be sent back to login.
    Expired,
}

#[derive(Debug, Clone)]
pub struct Session {
    tx: Arc<watch::Sender<SessionStatus>>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionStatus::Anonymous);
        Self { tx: Arc::new(tx) }
    }

    /// Records the outcome of a login or logout.
    pub fn set_authenticated(&self, authenticated: bool) {
        let status = if authenticated {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Anonymous
        };
        let previous = self.tx.send_replace(status);
        if previous != status {
            tracing::debug!(?previous, ?status, "session status changed");
        }
    }

    /// Clears the authenticated flag after an unauthorized response.
    pub fn expire(&self) {
        let previous = self.tx.send_replace(SessionStatus::Expired);
        if previous != SessionStatus::Expired {
            tracing::warn!(?previous, "session expired; redirecting to login");
        }
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        *self.tx.borrow()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.status() == SessionStatus::Authenticated
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.status() == SessionStatus::Expired
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.tx.subscribe()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
