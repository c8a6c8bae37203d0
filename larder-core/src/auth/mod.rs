//! Session state and request authorization.
//!
//! [`Session`] holds the bearer credential and broadcasts sign-in/sign-out
//! events. [`AuthProvider`] decorates outgoing requests with that credential
//! and owns the logout flow.

mod provider;
mod revoker;

pub use provider::AuthProvider;
pub use revoker::{CredentialRevoker, EndpointRevoker, NoopRevoker};

use std::fmt;
use std::sync::{PoisonError, RwLock};
use tokio::sync::broadcast;

/// Capacity of the session event channel. Subscribers that fall this far
/// behind observe a `Lagged` error and resume at the newest event.
const EVENT_CAPACITY: usize = 16;

/// Bearer token for the backend API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn,
    Ended,
}

/// Holder of the current credential.
pub struct Session {
    credential: RwLock<Option<Credential>>,
    events: broadcast::Sender<SessionEvent>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session with no credential.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            credential: RwLock::new(None),
            events,
        }
    }

    /// Create a session, signed in when a non-blank token is given.
    pub fn with_token(token: Option<String>) -> Self {
        let session = Self::new();
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            *session.write() = Some(Credential::new(token));
        }
        session
    }

    /// Store a credential and notify subscribers.
    pub fn sign_in(&self, token: impl Into<String>) {
        *self.write() = Some(Credential::new(token));
        tracing::info!("session started");
        let _ = self.events.send(SessionEvent::SignedIn);
    }

    pub fn credential(&self) -> Option<Credential> {
        self.credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_active(&self) -> bool {
        self.credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Drop the credential and notify subscribers.
    pub(crate) fn end(&self) {
        *self.write() = None;
        tracing::info!("session ended");
        let _ = self.events.send(SessionEvent::Ended);
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<Credential>> {
        self.credential.write().unwrap_or_else(PoisonError::into_inner)
    }
}
