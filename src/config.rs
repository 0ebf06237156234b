//! Gateway configuration.
//!
//! The CLI fills these from flags with environment fallbacks; library users
//! can call `from_env` directly.

use crate::llm::GuardPolicy;
use crate::types::{GatewayError, Result};
use std::path::PathBuf;

/// Default model, matching the hosted deployment.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

/// Default request timeout for oracle calls.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Oracle client configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API key for the provider
    pub api_key: String,

    /// Model name; also selects the provider
    pub model: String,

    /// Base URL override (proxies, local gateways)
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Load from environment variables.
    ///
    /// - `GEMINI_API_KEY` (required)
    /// - `AGRIBASE_MODEL` (default: `gemini-2.5-flash-lite`)
    /// - `AGRIBASE_LLM_BASE_URL` (optional)
    /// - `AGRIBASE_LLM_TIMEOUT_SECS` (default: 60)
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing or the timeout is not a number
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            GatewayError::ConfigError("GEMINI_API_KEY environment variable not set".to_string())
        })?;

        let model = std::env::var("AGRIBASE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url = std::env::var("AGRIBASE_LLM_BASE_URL").ok().filter(|s| !s.is_empty());

        let timeout_secs = match std::env::var("AGRIBASE_LLM_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| {
                GatewayError::ConfigError(format!("Invalid AGRIBASE_LLM_TIMEOUT_SECS: {}", raw))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self { api_key, model, base_url, timeout_secs })
    }
}

/// Full gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Oracle settings
    pub llm: LlmConfig,

    /// Guard applied to generated SQL
    pub guard: GuardPolicy,

    /// District names file (newline-separated or JSON array)
    pub districts_path: Option<PathBuf>,

    /// Listen address for `serve`
    pub bind: String,
}

impl GatewayConfig {
    /// Load from environment variables.
    ///
    /// Adds `AGRIBASE_GUARD`, `AGRIBASE_DISTRICTS` and `AGRIBASE_BIND` on top
    /// of `LlmConfig::from_env`.
    pub fn from_env() -> Result<Self> {
        let llm = LlmConfig::from_env()?;

        let guard = match std::env::var("AGRIBASE_GUARD") {
            Ok(raw) => raw.parse()?,
            Err(_) => GuardPolicy::default(),
        };

        let districts_path = std::env::var("AGRIBASE_DISTRICTS").ok().map(PathBuf::from);
        let bind = std::env::var("AGRIBASE_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());

        Ok(Self { llm, guard, districts_path, bind })
    }
}
