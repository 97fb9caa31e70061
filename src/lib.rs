//! rope - PostgreSQL connectivity layer
//!
//! Provides a single logical connection to a PostgreSQL server with
//! serialized query execution, typed error classification, and transparent
//! reconnection of a dropped session.
//!
//! # Architecture
//!
//! A [`Connection`] owns exactly one native session handle
//! (`postgres::Client`) behind a mutex; every native call routes through
//! that single serialization point, so concurrent callers are mutually
//! exclusive against the shared handle. Queries are dispatched with
//! [`run_query`]/[`run_query_no_params`], which stringify parameters into
//! text format, detect a stale session before dispatch (repairing it once),
//! and classify the server's response into a [`QueryResult`] envelope or a
//! [`RopeError`].
//!
//! Row decoding is deliberately out of scope: a [`QueryResult`] transfers
//! ownership of the raw rows to the result-decoding layer.

mod connection;
mod credentials;
mod error;
mod query;
mod result;
mod sqlstate;

pub use connection::Connection;
pub use credentials::Credentials;
pub use error::RopeError;
pub use query::{run_query, run_query_no_params, Params};
pub use result::QueryResult;
pub use sqlstate::ServerErrorCode;
