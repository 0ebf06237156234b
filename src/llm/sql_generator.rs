//! Guarded natural language to SQL generation.

use crate::llm::guard::{self, GuardPolicy};
use crate::llm::oracle::CompletionOracle;
use crate::llm::prompts;
use crate::types::QueryResult;
use std::sync::Arc;
use tracing::{info, warn};

/// Asks the oracle for a single `SELECT` and filters what comes back.
///
/// Holds a shared handle to the process-wide oracle; cloning is cheap.
#[derive(Clone)]
pub struct SqlGenerator {
    oracle: Arc<dyn CompletionOracle>,
    policy: GuardPolicy,
}

impl SqlGenerator {
    /// Create generator with the default prefix-only guard.
    pub fn new(oracle: Arc<dyn CompletionOracle>) -> Self {
        Self::with_policy(oracle, GuardPolicy::default())
    }

    /// Create generator with an explicit guard policy.
    pub fn with_policy(oracle: Arc<dyn CompletionOracle>, policy: GuardPolicy) -> Self {
        Self { oracle, policy }
    }

    /// Active guard policy.
    pub fn policy(&self) -> GuardPolicy {
        self.policy
    }

    /// Generate a read-only query for `question` against `schema_summary`.
    ///
    /// Never fails: oracle errors and guard rejections both yield
    /// `QueryResult { sql: None }`. The cause is only visible in logs.
    pub async fn generate(&self, question: &str, schema_summary: &str) -> QueryResult {
        let prompt = prompts::sql_prompt(question, schema_summary);

        let raw = match self.oracle.complete(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "SQL generation failed at oracle");
                return QueryResult::rejected();
            }
        };

        match guard::check(&raw, self.policy) {
            Ok(sql) => {
                info!(policy = self.policy.as_str(), chars = sql.len(), "SQL accepted");
                QueryResult::accepted(sql)
            }
            Err(rejection) => {
                warn!(
                    policy = self.policy.as_str(),
                    reason = rejection.as_str(),
                    "SQL rejected by guard"
                );
                QueryResult::rejected()
            }
        }
    }
}
