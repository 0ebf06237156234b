//! Tracing instrumentation for gateway operations.
//!
//! Follows OpenTelemetry semantic conventions where they exist:
//! - GenAI client spans: https://opentelemetry.io/docs/specs/semconv/gen-ai/
//! - RPC server spans: https://opentelemetry.io/docs/specs/semconv/rpc/
//!
//! **Span naming**: `{gen_ai.operation.name} {gen_ai.request.model}` for
//! oracle calls, `{rpc.method}` for handler invocations.
//!
//! Prompt and completion text are never recorded, only their sizes.
//!
//! # Example
//!
//! ```rust,ignore
//! use agribase_ai::otel::{rpc_span, RpcMethod};
//!
//! let span = rpc_span(RpcMethod::GenerateSql);
//! let _guard = span.entered();
//! ```

pub mod llm;
pub mod rpc;

pub use llm::{llm_span, record_llm_response, LlmOperation};
pub use rpc::{record_rpc_outcome, rpc_span, RpcMethod};
