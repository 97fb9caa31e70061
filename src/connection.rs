//! Connection lifecycle management.
//!
//! A [`Connection`] owns exactly one native session handle
//! (`postgres::Client`) behind a mutex. The mutex is the serialized access
//! point: at most one native call runs against the handle at any instant,
//! across all calling threads. A `None` slot means disconnected; liveness is
//! never cached, it is re-checked against the handle's status on demand.

use std::sync::Mutex;

use postgres::{Client, NoTls};
use tracing::{debug, warn};

use crate::credentials::Credentials;
use crate::error::RopeError;

/// A single logical connection to a PostgreSQL server.
///
/// May transition disconnected -> connected any number of times via
/// [`Connection::reconnect`]. Dropping the connection tears the session down
/// best-effort; teardown errors are swallowed since no caller is present to
/// receive them.
pub struct Connection {
    client: Mutex<Option<Client>>,
    credentials: Credentials,
}

impl Connection {
    /// Perform the native login handshake synchronously.
    ///
    /// # Errors
    ///
    /// Returns [`RopeError::ConnectionFailed`] with the driver's diagnostic
    /// if the server is unreachable or rejects the handshake.
    pub fn connect(credentials: Credentials) -> Result<Self, RopeError> {
        debug!(
            host = %credentials.host,
            port = credentials.port,
            db_name = %credentials.db_name,
            "connecting"
        );
        let client = credentials
            .to_pg_config()
            .connect(NoTls)
            .map_err(|e| RopeError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client: Mutex::new(Some(client)),
            credentials,
        })
    }

    /// Whether the handle is present and its session status reports open.
    ///
    /// Like the native status check, this reads the handle's view of the
    /// session rather than probing the server: a session the server just
    /// killed may still report connected until a call observes the loss.
    /// Taken under the same lock as query execution.
    pub fn is_connected(&self) -> bool {
        match self.client.lock() {
            Ok(guard) => guard.as_ref().is_some_and(|client| !client.is_closed()),
            Err(_) => false,
        }
    }

    /// Release the native handle.
    ///
    /// # Errors
    ///
    /// Closing an already-disconnected connection fails with
    /// [`RopeError::ConnectionFailed`].
    pub fn close(&self) -> Result<(), RopeError> {
        let mut guard = self
            .client
            .lock()
            .map_err(|_| RopeError::ConnectionFailed("connection lock poisoned".to_string()))?;

        match guard.take() {
            Some(client) => {
                debug!("closing connection");
                client
                    .close()
                    .map_err(|e| RopeError::ConnectionFailed(e.to_string()))
            }
            None => Err(RopeError::ConnectionFailed(
                "connection is already closed".to_string(),
            )),
        }
    }

    /// Restore a broken session in place.
    ///
    /// Re-establishes the session from the stored credentials and swaps the
    /// new handle into the slot under the lock; the repair is driven to
    /// completion before returning. On failure the broken handle stays in
    /// place. With no handle at all this is a no-op: reconnect only repairs
    /// a previously-connected instance.
    ///
    /// # Errors
    ///
    /// Returns [`RopeError::ReconnectFailed`] if the session could not be
    /// re-established.
    pub fn reconnect(&self) -> Result<(), RopeError> {
        let mut guard = self.client.lock().map_err(|_| RopeError::ReconnectFailed)?;

        if guard.is_none() {
            return Ok(());
        }

        debug!("re-establishing session");
        match self.credentials.to_pg_config().connect(NoTls) {
            Ok(client) => {
                *guard = Some(client);
                debug!("session re-established");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "reconnect failed");
                Err(RopeError::ReconnectFailed)
            }
        }
    }

    /// Run a native call against the handle with exclusive access.
    ///
    /// This is the sole synchronization point: the closure holds the lock
    /// for the duration of the native call, so calls from concurrent
    /// threads are mutually exclusive in lock-acquisition order.
    ///
    /// # Errors
    ///
    /// Returns [`RopeError::ConnectionFailed`] when no handle is present.
    pub(crate) fn with_client<T>(
        &self,
        f: impl FnOnce(&mut Client) -> T,
    ) -> Result<T, RopeError> {
        let mut guard = self
            .client
            .lock()
            .map_err(|_| RopeError::ConnectionFailed("connection lock poisoned".to_string()))?;

        match guard.as_mut() {
            Some(client) => Ok(f(client)),
            None => Err(RopeError::ConnectionFailed(
                "connection is closed".to_string(),
            )),
        }
    }
}
