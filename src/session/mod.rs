//! Persisted login session: bearer token plus the signed-in user.
//!
//! The session lives in the same injected store as the rest of the client
//! state, under the keys `token` and `user`. Clearing it is the hard side
//! effect of an HTTP 401: the retry policy wipes the session and broadcasts
//! an expiry event so the UI surface can send the user back to login.

use crate::client::types::User;
use crate::store::KeyValueStore;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the serialized user.
pub const USER_KEY: &str = "user";

/// Events emitted when the session changes out from under the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The backend rejected the token (HTTP 401); the session was cleared
    /// and the user must log in again.
    Expired,
}

/// Token and user persistence over the injected store.
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    events_tx: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (events_tx, _) = broadcast::channel(4);
        Self { store, events_tx }
    }

    /// The stored bearer token, if logged in.
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY)
    }

    /// The stored user, if logged in.
    ///
    /// A user blob that no longer parses clears the whole session rather
    /// than surfacing an error: stale state is equivalent to logged out.
    pub fn current_user(&self) -> Option<User> {
        let raw = self.store.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Stored user is corrupt, clearing session");
                self.clear();
                None
            }
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    /// Persist a fresh login.
    pub fn save(&self, token: &str, user: &User) {
        self.store.set(TOKEN_KEY, token);
        match serde_json::to_string(user) {
            Ok(raw) => self.store.set(USER_KEY, &raw),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize user"),
        }
        tracing::debug!(username = %user.username, "Session saved");
    }

    /// Remove the token and user. Safe to call when already logged out.
    pub fn clear(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
    }

    /// Clear the session and notify subscribers that the backend rejected
    /// the token. Used by the retry policy on HTTP 401.
    pub fn expire(&self) {
        tracing::warn!("Session rejected by backend, clearing credentials");
        self.clear();
        // No subscribers is fine: expiry is still reported via the error.
        let _ = self.events_tx.send(SessionEvent::Expired);
    }

    /// Subscribe to session events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events_tx.subscribe()
    }
}
