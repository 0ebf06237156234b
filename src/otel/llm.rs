//! Oracle call instrumentation.

use tracing::{field, span, Level, Span};

/// GenAI operation types (maps to `gen_ai.operation.name`).
#[derive(Debug, Clone, Copy)]
pub enum LlmOperation {
    /// Single-prompt content generation
    GenerateContent,
    /// Chat-style completion
    Chat,
}

impl LlmOperation {
    /// Get operation name as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GenerateContent => "generate_content",
            Self::Chat => "chat",
        }
    }
}

/// Create oracle call span with semantic conventions.
///
/// # Arguments
///
/// * `operation` - GenAI operation type
/// * `system` - Provider name (`gemini`, `openai`, `anthropic`)
/// * `model` - Requested model
///
/// # Returns
///
/// Client span; `gen_ai.response.chars` is filled by `record_llm_response`
pub fn llm_span(operation: LlmOperation, system: &str, model: &str) -> Span {
    span!(
        Level::INFO,
        "gen_ai",
        otel.name = format!("{} {}", operation.as_str(), model),
        otel.kind = "client",
        gen_ai.system = system,
        gen_ai.operation.name = operation.as_str(),
        gen_ai.request.model = model,
        gen_ai.response.chars = field::Empty,
    )
}

/// Record response size in the current oracle span.
pub fn record_llm_response(chars: usize) {
    Span::current().record("gen_ai.response.chars", chars);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names() {
        assert_eq!(LlmOperation::GenerateContent.as_str(), "generate_content");
        assert_eq!(LlmOperation::Chat.as_str(), "chat");
    }

    #[test]
    fn test_llm_span_creation() {
        let span = llm_span(LlmOperation::GenerateContent, "gemini", "gemini-2.5-flash-lite");
        assert_eq!(span.metadata().unwrap().name(), "gen_ai");
    }
}
