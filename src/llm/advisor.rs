//! Advisory answers: template fill and forward.
//!
//! Unlike SQL generation, oracle failures here are surfaced to the caller.

use crate::llm::oracle::CompletionOracle;
use crate::llm::prompts;
use crate::types::{AdvisorReply, GatewayError, Result};
use std::sync::Arc;

/// Reply used when the oracle returns only whitespace to `ask`.
pub const ASK_FALLBACK: &str =
    "I could not generate an answer. Please try rephrasing your question.";

/// Reply used when the oracle returns only whitespace to `answer_with_context`.
pub const CONTEXT_FALLBACK: &str =
    "I could not interpret the retrieved data clearly enough to answer. Please try rephrasing.";

/// Forwards advisory questions to the oracle.
#[derive(Clone)]
pub struct Advisor {
    oracle: Arc<dyn CompletionOracle>,
}

impl Advisor {
    pub fn new(oracle: Arc<dyn CompletionOracle>) -> Self {
        Self { oracle }
    }

    /// Answer a free-form agricultural question.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::LlmError` ("AI service error: ...") if the oracle fails
    pub async fn ask(&self, message: &str) -> Result<AdvisorReply> {
        let prompt = prompts::ask_prompt(message);
        self.forward(&prompt, ASK_FALLBACK).await
    }

    /// Answer a question using rows retrieved by `sql`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::LlmError` ("AI service error: ...") if the oracle fails
    pub async fn answer_with_context(
        &self,
        message: &str,
        sql: &str,
        db_result_summary: &str,
    ) -> Result<AdvisorReply> {
        let prompt = prompts::context_answer_prompt(message, sql, db_result_summary);
        self.forward(&prompt, CONTEXT_FALLBACK).await
    }

    async fn forward(&self, prompt: &str, fallback: &str) -> Result<AdvisorReply> {
        let text = self
            .oracle
            .complete(prompt)
            .await
            .map_err(|e| GatewayError::llm(format!("AI service error: {}", e.detail())))?;

        let trimmed = text.trim();
        let response = if trimmed.is_empty() { fallback } else { trimmed };

        Ok(AdvisorReply { response: response.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct EchoOracle(std::result::Result<&'static str, &'static str>);

    #[async_trait]
    impl CompletionOracle for EchoOracle {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            self.0.map(str::to_string).map_err(GatewayError::llm)
        }

        fn model(&self) -> &str {
            "echo"
        }
    }

    fn advisor(reply: std::result::Result<&'static str, &'static str>) -> Advisor {
        Advisor::new(Arc::new(EchoOracle(reply)))
    }

    #[tokio::test]
    async fn test_ask_trims_response() {
        let reply = advisor(Ok("  Sow Boro seedlings in December.\n")).ask("When to sow Boro?").await.unwrap();
        assert_eq!(reply.response, "Sow Boro seedlings in December.");
    }

    #[tokio::test]
    async fn test_blank_response_uses_fallback() {
        let reply = advisor(Ok(" \n ")).ask("q").await.unwrap();
        assert_eq!(reply.response, ASK_FALLBACK);

        let reply = advisor(Ok("")).answer_with_context("q", "SELECT 1", "").await.unwrap();
        assert_eq!(reply.response, CONTEXT_FALLBACK);
    }

    #[tokio::test]
    async fn test_oracle_failure_is_surfaced() {
        let err = advisor(Err("quota exhausted")).ask("q").await.unwrap_err();
        assert!(matches!(
            &err,
            GatewayError::LlmError(msg) if msg == "AI service error: quota exhausted"
        ));
    }
}
