//! Core request/response types for the gateway.
//!
//! - `SqlRequest` / `QueryResult`: guarded text-to-SQL contract
//! - `AskRequest`, `ContextAnswerRequest`, `AdvisorReply`: advisory operations
//! - `GatewayError`: error type for all operations
//! - `Result`: convenient result type alias

pub mod error;
pub mod request;

pub use error::{GatewayError, Result};
pub use request::{AdvisorReply, AskRequest, ContextAnswerRequest, QueryResult, SqlRequest};
