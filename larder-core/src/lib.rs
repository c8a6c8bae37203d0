pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod notifications;
pub mod upload;
pub mod views;

pub use api::ApiClient;
pub use auth::{AuthProvider, Credential, Session, SessionEvent};
pub use config::ClientConfig;
pub use error::{ClientError, ConfigError};
pub use http::{HttpTransport, MockTransport, ReqwestTransport};
pub use notifications::{GuardedChannel, NoopChannel, NotificationChannel, NotificationLifecycle};
pub use upload::Upload;
