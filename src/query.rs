//! Query execution.
//!
//! [`run_query`] marshals parameters into the text wire format, dispatches
//! the statement through the connection's serialized access point, and
//! classifies the raw server response into a [`QueryResult`] or a
//! [`RopeError`]. A stale session is repaired once before dispatch; beyond
//! that nothing is retried.

use std::fmt::Display;

use bytes::BytesMut;
use postgres::types::{Format, IsNull, ToSql, Type};
use tracing::{debug, warn};

use crate::connection::Connection;
use crate::error::RopeError;
use crate::result::QueryResult;
use crate::sqlstate::ServerErrorCode;

/// Ordered positional parameters for `$1`-style placeholders.
///
/// Each value is stringified before transmission; the server performs the
/// cast. Parameter count is not pre-validated against the placeholder
/// count; a mismatch surfaces as [`RopeError::InvalidQuery`].
pub type Params<'a> = &'a [&'a (dyn Display + Sync)];

/// A parameter transmitted in text format.
///
/// The buffer is owned for the duration of the native call only and never
/// escapes it. Accepts any server-side type; the server parses the textual
/// representation.
#[derive(Debug)]
struct TextParam(String);

impl ToSql for TextParam {
    fn to_sql(
        &self,
        _ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        out.extend_from_slice(self.0.as_bytes());
        Ok(IsNull::No)
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    fn encode_format(&self, _ty: &Type) -> Format {
        Format::Text
    }

    // accepts() is unconditionally true, so the checked variant has no type
    // guard to apply.
    fn to_sql_checked(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        self.to_sql(ty, out)
    }
}

/// Execute a statement with ordered positional parameters.
///
/// 1. If the connection reports not connected, repair it once via
///    [`Connection::reconnect`]; [`RopeError::ReconnectFailed`] propagates.
/// 2. An empty statement fails with [`RopeError::EmptyQuery`] before any
///    dispatch.
/// 3. Parameters are stringified and sent in text format through the
///    serialized access point (an empty list is the plain-execute case).
/// 4. The response is classified totally: success wraps the raw rows,
///    a structured server error report becomes [`RopeError::Fatal`] with
///    its SQLSTATE mapped, transport loss becomes
///    [`RopeError::ConnectionFailed`], anything else
///    [`RopeError::InvalidQuery`]. Fatal/invalid outcomes surface once,
///    never retried.
pub fn run_query(
    conn: &Connection,
    statement: &str,
    params: Params,
) -> Result<QueryResult, RopeError> {
    if !conn.is_connected() {
        warn!("stale session detected before dispatch, attempting repair");
        conn.reconnect()?;
    }

    if statement.is_empty() {
        return Err(RopeError::EmptyQuery);
    }

    let owned: Vec<TextParam> = params.iter().map(|p| TextParam(p.to_string())).collect();
    let borrowed: Vec<&(dyn ToSql + Sync)> =
        owned.iter().map(|p| p as &(dyn ToSql + Sync)).collect();

    debug!(params = borrowed.len(), "dispatching statement");
    let outcome = conn.with_client(|client| client.query(statement, &borrowed))?;

    match outcome {
        Ok(rows) => Ok(QueryResult::new(rows)),
        Err(err) => Err(classify(err)),
    }
}

/// Execute a statement with no parameters.
pub fn run_query_no_params(conn: &Connection, statement: &str) -> Result<QueryResult, RopeError> {
    run_query(conn, statement, &[])
}

/// Classify a failed native call.
///
/// Total over every error the driver produces. A structured server error
/// report always carries a SQLSTATE field; unmapped codes fall back to
/// `ServerErrorCode::Unknown` rather than failing classification.
fn classify(err: postgres::Error) -> RopeError {
    if let Some(db_err) = err.as_db_error() {
        RopeError::Fatal {
            code: ServerErrorCode::from_code(db_err.code().code()),
            message: db_err.message().to_string(),
        }
    } else if err.is_closed() {
        RopeError::ConnectionFailed(err.to_string())
    } else {
        RopeError::InvalidQuery(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_param_writes_utf8_bytes() {
        let param = TextParam("42".to_string());
        let mut buf = BytesMut::new();
        let is_null = param.to_sql(&Type::INT4, &mut buf).unwrap();
        assert!(matches!(is_null, IsNull::No));
        assert_eq!(&buf[..], b"42");
    }

    #[test]
    fn test_text_param_declares_text_format() {
        let param = TextParam("anything".to_string());
        assert!(matches!(param.encode_format(&Type::TEXT), Format::Text));
        assert!(matches!(param.encode_format(&Type::INT4), Format::Text));
    }

    #[test]
    fn test_text_param_accepts_any_type() {
        assert!(<TextParam as ToSql>::accepts(&Type::TEXT));
        assert!(<TextParam as ToSql>::accepts(&Type::INT4));
        assert!(<TextParam as ToSql>::accepts(&Type::TIMESTAMPTZ));
        assert!(<TextParam as ToSql>::accepts(&Type::BYTEA));
    }

    #[test]
    fn test_heterogeneous_params_stringify() {
        let values: Vec<&(dyn Display + Sync)> = vec![&42i64, &"hello", &1.5f64, &true];
        let marshalled: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        assert_eq!(marshalled, vec!["42", "hello", "1.5", "true"]);
    }
}
