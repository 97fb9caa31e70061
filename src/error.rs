//! Error taxonomy.
//!
//! Every failure surfaced by this layer is one of the variants below.
//! Callers branch on the kind: `ConnectionFailed` and `ReconnectFailed` are
//! worth retrying after repairing the connection; `InvalidQuery` and `Fatal`
//! are permanent rejections of that particular statement.

use thiserror::Error;

use crate::sqlstate::ServerErrorCode;

/// Connectivity layer error types.
#[derive(Error, Debug)]
pub enum RopeError {
    /// The handshake failed, the transport dropped, or a native call
    /// produced no server response.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The statement text was empty. Checked locally, never dispatched.
    #[error("Empty query")]
    EmptyQuery,

    /// The statement was rejected without a structured server error report
    /// (e.g. a parameter-count mismatch).
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The server reported an error with a structured SQLSTATE field.
    #[error("Fatal server error [{code}]: {message}")]
    Fatal {
        code: ServerErrorCode,
        message: String,
    },

    /// The in-place session repair did not succeed.
    #[error("Reconnect failed")]
    ReconnectFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_display_carries_code_and_message() {
        let err = RopeError::Fatal {
            code: ServerErrorCode::DivisionByZero,
            message: "division by zero".to_string(),
        };
        let shown = err.to_string();
        assert!(shown.contains("22012"));
        assert!(shown.contains("division by zero"));
    }

    #[test]
    fn test_connection_failed_display() {
        let err = RopeError::ConnectionFailed("could not connect to server".to_string());
        assert_eq!(
            err.to_string(),
            "Connection failed: could not connect to server"
        );
    }

    #[test]
    fn test_empty_query_display() {
        assert_eq!(RopeError::EmptyQuery.to_string(), "Empty query");
    }

    #[test]
    fn test_reconnect_failed_display() {
        assert_eq!(RopeError::ReconnectFailed.to_string(), "Reconnect failed");
    }
}
