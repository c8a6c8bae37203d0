use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutOutcome {
    SignedOut,
    /// A logout was already running; this press did nothing.
    Ignored,
}

/// The header's logout button.
#[derive(Clone)]
pub struct LogoutControl {
    auth: Arc<AuthProvider>,
}

impl LogoutControl {
    pub fn new(auth: Arc<AuthProvider>) -> Self {
        Self { auth }
    }

    pub fn is_busy(&self) -> bool {
        self.auth.is_logging_out()
    }

    pub fn is_disabled(&self) -> bool {
        self.is_busy()
    }

    pub fn label(&self) -> &'static str {
        if self.is_busy() {
            "Signing out..."
        } else {
            "Sign out"
        }
    }

    /// Handle a press. Presses while busy are ignored; failures are returned
    /// with the control re-enabled and the session intact.
    pub async fn press(&self) -> Result<LogoutOutcome, ClientError> {
        if self.is_disabled() {
            return Ok(LogoutOutcome::Ignored);
        }
        match self.auth.logout().await {
            Ok(()) => Ok(LogoutOutcome::SignedOut),
            Err(ClientError::LogoutInProgress) => Ok(LogoutOutcome::Ignored),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Session;
    use crate::http::{Method, MockTransport};

    #[tokio::test]
    async fn test_press_signs_out() {
        let session = Arc::new(Session::with_token(Some("tok".to_string())));
        let transport = Arc::new(MockTransport::new());
        let auth = Arc::new(AuthProvider::new(session.clone(), transport));
        let control = LogoutControl::new(auth);

        assert_eq!(control.label(), "Sign out");
        assert_eq!(control.press().await.unwrap(), LogoutOutcome::SignedOut);
        assert!(!session.is_active());
        assert!(!control.is_disabled());
    }

    #[tokio::test]
    async fn test_failed_press_reenables() {
        let mock = MockTransport::new().with_status(Method::POST, "/auth/logout", 500, "");
        let config = crate::config::ClientConfig::default()
            .with_token(Some("tok".to_string()))
            .with_logout_path(Some("/auth/logout".to_string()));
        let auth = Arc::new(AuthProvider::from_config(&config, Arc::new(mock)));
        let control = LogoutControl::new(auth.clone());

        let err = control.press().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(auth.session().is_active());
        assert!(!control.is_disabled());
    }
}
