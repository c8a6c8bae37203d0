//! Live-notification connection lifecycle.
//!
//! The channel is constructed once at startup and injected wherever it is
//! needed. Interactive front ends pass a [`GuardedChannel`] around a real
//! [`Connector`]; non-interactive ones pass [`NoopChannel`].
//!
//! [`NotificationLifecycle`] ties the channel to navigation: entering any
//! route other than login with an active session connects, leaving a route
//! disconnects, and the end of the session disconnects.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::auth::{Session, SessionEvent};
use crate::error::ClientError;
use crate::views::Route;

/// Connect/disconnect capability for the live-update connection.
///
/// Implementations must make both operations idempotent: connecting twice
/// keeps one connection, disconnecting while disconnected does nothing.
pub trait NotificationChannel: Send + Sync {
    fn connect(&self);
    fn disconnect(&self);
    fn is_connected(&self) -> bool;
}

/// Channel for environments with no live updates. Every call is a no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopChannel;

impl NotificationChannel for NoopChannel {
    fn connect(&self) {}

    fn disconnect(&self) {}

    fn is_connected(&self) -> bool {
        false
    }
}

/// Opens and closes one underlying connection.
pub trait Connector: Send + Sync {
    type Connection: Send;

    fn open(&self) -> Result<Self::Connection, ClientError>;
    fn close(&self, connection: Self::Connection);
}

/// Channel that owns at most one connection from its connector.
pub struct GuardedChannel<C: Connector> {
    connector: C,
    connection: Mutex<Option<C::Connection>>,
}

impl<C: Connector> GuardedChannel<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            connection: Mutex::new(None),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<C::Connection>> {
        self.connection.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: Connector> NotificationChannel for GuardedChannel<C> {
    fn connect(&self) {
        let mut slot = self.slot();
        if slot.is_some() {
            tracing::debug!("notification channel already connected");
            return;
        }
        match self.connector.open() {
            Ok(connection) => {
                *slot = Some(connection);
                tracing::info!("notification channel connected");
            }
            Err(e) => tracing::warn!(error = %e, "notification channel failed to connect"),
        }
    }

    fn disconnect(&self) {
        if let Some(connection) = self.slot().take() {
            self.connector.close(connection);
            tracing::info!("notification channel disconnected");
        }
    }

    fn is_connected(&self) -> bool {
        self.slot().is_some()
    }
}

/// Connector that runs a listener future as a tokio task per connection.
///
/// The listener owns the wire protocol; closing the connection aborts it.
pub struct TaskConnector<F> {
    listener: F,
}

impl<F, Fut> TaskConnector<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = ()> + Send + 'static,
{
    pub fn new(listener: F) -> Self {
        Self { listener }
    }
}

impl<F, Fut> Connector for TaskConnector<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = ()> + Send + 'static,
{
    type Connection = JoinHandle<()>;

    fn open(&self) -> Result<JoinHandle<()>, ClientError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| ClientError::Transport(format!("No async runtime: {}", e)))?;
        Ok(runtime.spawn((self.listener)()))
    }

    fn close(&self, connection: JoinHandle<()>) {
        connection.abort();
    }
}

/// Drives the channel from route changes and session state.
#[derive(Clone)]
pub struct NotificationLifecycle {
    channel: Arc<dyn NotificationChannel>,
    session: Arc<Session>,
}

impl NotificationLifecycle {
    pub fn new(channel: Arc<dyn NotificationChannel>, session: Arc<Session>) -> Self {
        Self { channel, session }
    }

    pub fn channel(&self) -> &Arc<dyn NotificationChannel> {
        &self.channel
    }

    /// A view for `route` was mounted. Returns whether a connect was requested.
    pub fn enter_route(&self, route: Route) -> bool {
        if route.is_login() || !self.session.is_active() {
            tracing::debug!(route = route.path(), "notification channel stays idle");
            return false;
        }
        self.channel.connect();
        true
    }

    /// The current view is being torn down. Safe to call when never connected.
    pub fn leave_route(&self) {
        self.channel.disconnect();
    }

    /// Disconnect whenever the session ends. Runs until the session is dropped.
    pub fn watch_session(&self) -> JoinHandle<()> {
        let mut events = self.session.subscribe();
        let channel = self.channel.clone();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(SessionEvent::Ended) => channel.disconnect(),
                    Ok(SessionEvent::SignedIn) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "session events lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}
