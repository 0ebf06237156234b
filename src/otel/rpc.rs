//! Handler invocation instrumentation.
//!
//! One span per callable invocation, tagged with a fresh request ID.

use tracing::{field, span, Level, Span};
use uuid::Uuid;

/// Callable methods exposed by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcMethod {
    GenerateSql,
    AskGemini,
    AnswerWithContext,
    SearchDistricts,
}

impl RpcMethod {
    /// Method name as exposed on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GenerateSql => "generateSql",
            Self::AskGemini => "askGemini",
            Self::AnswerWithContext => "answerWithContext",
            Self::SearchDistricts => "search_districts",
        }
    }
}

/// Create handler span.
///
/// # Returns
///
/// Server span with `rpc.method` and a v4 `request.id`; `rpc.outcome` is
/// filled by `record_rpc_outcome`
pub fn rpc_span(method: RpcMethod) -> Span {
    span!(
        Level::INFO,
        "rpc",
        otel.name = method.as_str(),
        otel.kind = "server",
        rpc.system = "agribase",
        rpc.method = method.as_str(),
        request.id = %Uuid::new_v4(),
        rpc.outcome = field::Empty,
    )
}

/// Record invocation outcome ("ok", "null_sql", "invalid_argument", "internal").
pub fn record_rpc_outcome(outcome: &str) {
    Span::current().record("rpc.outcome", outcome);
}
