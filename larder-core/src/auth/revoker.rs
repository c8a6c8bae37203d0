use async_trait::async_trait;
use std::sync::Arc;

use super::Credential;
use crate::api::error_from_response;
use crate::error::ClientError;
use crate::http::{ApiRequest, HttpTransport};

/// Server-side half of logout.
#[async_trait]
pub trait CredentialRevoker: Send + Sync {
    /// Invalidate the credential with the backend. An error aborts the logout.
    async fn revoke(&self, credential: &Credential) -> Result<(), ClientError>;
}

/// Revoker for backends with stateless tokens: logout is purely local.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRevoker;

#[async_trait]
impl CredentialRevoker for NoopRevoker {
    async fn revoke(&self, _credential: &Credential) -> Result<(), ClientError> {
        Ok(())
    }
}

/// Revokes the credential by POSTing to a backend endpoint with it attached.
pub struct EndpointRevoker {
    transport: Arc<dyn HttpTransport>,
    segments: Vec<String>,
}

impl EndpointRevoker {
    /// `path` is relative to the API origin, e.g. "/auth/logout".
    pub fn new(transport: Arc<dyn HttpTransport>, path: &str) -> Self {
        let segments = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            transport,
            segments,
        }
    }
}

#[async_trait]
impl CredentialRevoker for EndpointRevoker {
    async fn revoke(&self, credential: &Credential) -> Result<(), ClientError> {
        let request = ApiRequest::post(self.segments.clone()).bearer(credential.token());
        let response = self.transport.send(request).await?;
        if response.is_success() {
            Ok(())
        } else {
            Err(error_from_response(&response))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Method, MockTransport};

    #[tokio::test]
    async fn test_endpoint_revoker_posts_with_token() {
        let mock = MockTransport::new().with_status(Method::POST, "/auth/logout", 200, "");
        let mock = Arc::new(mock);
        let revoker = EndpointRevoker::new(mock.clone(), "/auth/logout");

        revoker.revoke(&Credential::new("tok")).await.unwrap();

        let call = mock.last_call().unwrap();
        assert_eq!(call.bearer.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_endpoint_revoker_surfaces_backend_message() {
        let body = r#"{"message":"auth service down"}"#;
        let mock = MockTransport::new().with_status(Method::POST, "/auth/logout", 503, body);
        let mock = Arc::new(mock);
        let revoker = EndpointRevoker::new(mock, "auth/logout");

        let err = revoker.revoke(&Credential::new("tok")).await.unwrap_err();
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.to_string(), "API error (503): auth service down");
    }
}
