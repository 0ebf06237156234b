//! LLM-powered SQL generation and advisory answers.

pub mod advisor;
pub mod guard;
pub mod oracle;
pub mod prompts;
pub mod sql_generator;

pub use advisor::Advisor;
pub use guard::GuardPolicy;
pub use oracle::{CompletionOracle, LlmClient, LlmProvider};
pub use sql_generator::SqlGenerator;
