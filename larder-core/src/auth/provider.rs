use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::revoker::{CredentialRevoker, EndpointRevoker, NoopRevoker};
use super::Session;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::{ApiRequest, HttpTransport, RawResponse};

/// Authorizes outgoing requests with the session credential.
pub struct AuthProvider {
    session: Arc<Session>,
    transport: Arc<dyn HttpTransport>,
    revoker: Arc<dyn CredentialRevoker>,
    logging_out: AtomicBool,
}

/// Clears the busy flag when logout finishes, whichever way it exits.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl AuthProvider {
    /// Create a provider whose logout is local only.
    pub fn new(session: Arc<Session>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            session,
            transport,
            revoker: Arc::new(NoopRevoker),
            logging_out: AtomicBool::new(false),
        }
    }

    /// Build the session and revoker from configuration.
    pub fn from_config(config: &ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let session = Arc::new(Session::with_token(config.token.clone()));
        let provider = Self::new(session, transport.clone());
        match &config.logout_path {
            Some(path) => provider.with_revoker(Arc::new(EndpointRevoker::new(transport, path))),
            None => provider,
        }
    }

    pub fn with_revoker(mut self, revoker: Arc<dyn CredentialRevoker>) -> Self {
        self.revoker = revoker;
        self
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Send `request` with the current credential attached.
    ///
    /// Fails with `Unauthenticated` without touching the network when no
    /// credential is held. Any HTTP status is returned as a response.
    pub async fn authorized_request(
        &self,
        request: ApiRequest,
    ) -> Result<RawResponse, ClientError> {
        let Some(credential) = self.session.credential() else {
            tracing::warn!(
                method = %request.method,
                path = %request.path(),
                "request rejected: not signed in"
            );
            return Err(ClientError::Unauthenticated);
        };

        let request = request.bearer(credential.token());
        self.transport.send(request).await
    }

    /// Whether a logout is currently in flight.
    pub fn is_logging_out(&self) -> bool {
        self.logging_out.load(Ordering::Acquire)
    }

    /// End the session.
    ///
    /// A second call while one is in flight fails with `LogoutInProgress`.
    /// If the revoker fails, the credential is kept and the error returned.
    /// Without a session this is a no-op.
    pub async fn logout(&self) -> Result<(), ClientError> {
        if self
            .logging_out
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("logout ignored: already in progress");
            return Err(ClientError::LogoutInProgress);
        }
        let _guard = BusyGuard(&self.logging_out);

        let Some(credential) = self.session.credential() else {
            tracing::debug!("logout without a session");
            return Ok(());
        };

        if let Err(e) = self.revoker.revoke(&credential).await {
            tracing::warn!(error = %e, "logout failed, keeping session");
            return Err(e);
        }

        self.session.end();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Credential, SessionEvent};
    use crate::http::{Method, MockTransport};
    use async_trait::async_trait;
    use tokio::sync::Notify;

    fn signed_in(mock: Arc<MockTransport>) -> AuthProvider {
        let session = Arc::new(Session::with_token(Some("tok".to_string())));
        AuthProvider::new(session, mock)
    }

    #[tokio::test]
    async fn test_attaches_bearer() {
        let mock = MockTransport::new().with_status(Method::GET, "/ingredients/getAll", 200, "{}");
        let mock = Arc::new(mock);
        let auth = signed_in(mock.clone());

        auth.authorized_request(ApiRequest::get(["ingredients", "getAll"]))
            .await
            .unwrap();

        assert_eq!(mock.last_call().unwrap().bearer.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_unauthenticated_never_hits_transport() {
        let mock = Arc::new(MockTransport::new());
        let auth = AuthProvider::new(Arc::new(Session::new()), mock.clone());

        let err = auth
            .authorized_request(ApiRequest::get(["ingredients", "getAll"]))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Unauthenticated));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_logout_clears_and_broadcasts() {
        let auth = signed_in(Arc::new(MockTransport::new()));
        let mut events = auth.session().subscribe();

        auth.logout().await.unwrap();

        assert!(!auth.session().is_active());
        assert_eq!(events.recv().await.unwrap(), SessionEvent::Ended);
        assert!(!auth.is_logging_out());
    }

    struct FailingRevoker;

    #[async_trait]
    impl CredentialRevoker for FailingRevoker {
        async fn revoke(&self, _credential: &Credential) -> Result<(), ClientError> {
            Err(ClientError::Transport("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_failed_logout_keeps_session() {
        let auth = signed_in(Arc::new(MockTransport::new())).with_revoker(Arc::new(FailingRevoker));

        assert!(auth.logout().await.is_err());
        assert!(auth.session().is_active());
        assert!(!auth.is_logging_out());
    }

    /// Revoker that blocks until released, to hold a logout in flight.
    struct GatedRevoker {
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl CredentialRevoker for GatedRevoker {
        async fn revoke(&self, _credential: &Credential) -> Result<(), ClientError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_second_logout_rejected_while_in_flight() {
        let gate = Arc::new(GatedRevoker {
            entered: Notify::new(),
            release: Notify::new(),
        });
        let auth = signed_in(Arc::new(MockTransport::new())).with_revoker(gate.clone());
        let auth = Arc::new(auth);

        let first = tokio::spawn({
            let auth = auth.clone();
            async move { auth.logout().await }
        });
        gate.entered.notified().await;

        assert!(auth.is_logging_out());
        let second = auth.logout().await;
        assert!(matches!(second, Err(ClientError::LogoutInProgress)));
        assert!(auth.session().is_active());

        gate.release.notify_one();
        first.await.unwrap().unwrap();
        assert!(!auth.session().is_active());
        assert!(!auth.is_logging_out());
    }

    #[tokio::test]
    async fn test_from_config_uses_endpoint_revoker() {
        let mock = MockTransport::new().with_status(Method::POST, "/auth/logout", 204, "");
        let mock = Arc::new(mock);
        let config = ClientConfig::default()
            .with_token(Some("tok".to_string()))
            .with_logout_path(Some("/auth/logout".to_string()));
        let auth = AuthProvider::from_config(&config, mock.clone());

        auth.logout().await.unwrap();

        assert_eq!(mock.last_call().unwrap().path(), "/auth/logout");
        assert!(!auth.session().is_active());
    }
}
