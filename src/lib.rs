//! AgriBase AI gateway - Rust core library
//!
//! Thin orchestration layer between the AgriBase web front end and a
//! text-completion LLM:
//! - Guarded text-to-SQL: one `SELECT` or nothing
//! - Advisory answers, free-form or grounded in retrieved rows
//! - District name suggestions for the autocomplete widget
//!
//! Can be used as:
//! - Standalone Rust library (`SqlGenerator`, `Advisor`)
//! - HTTP service (`agribase serve`)

pub mod config;
pub mod districts;
pub mod llm;
pub mod logging;
pub mod otel;
pub mod server;
pub mod types;

pub use config::{GatewayConfig, LlmConfig};
pub use districts::DistrictDirectory;
pub use llm::{Advisor, CompletionOracle, GuardPolicy, LlmClient, SqlGenerator};
pub use types::{GatewayError, QueryResult, Result};
