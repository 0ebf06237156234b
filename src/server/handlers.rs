//! Route handlers.

use super::callable::{parse_data, CallableError, CallableResponse};
use super::AppState;
use crate::districts::DEFAULT_LIMIT;
use crate::otel::{record_rpc_outcome, rpc_span, RpcMethod};
use crate::types::{AdvisorReply, AskRequest, ContextAnswerRequest, QueryResult, SqlRequest};
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{warn, Instrument};

type CallableResult<T> = Result<CallableResponse<T>, CallableError>;

/// `POST /generateSql`
///
/// Always answers with a `result`; oracle failures become `{"sql": null}`.
pub async fn generate_sql(State(state): State<AppState>, body: Bytes) -> CallableResult<QueryResult> {
    async move {
        let req: SqlRequest = parse_data(&body).inspect_err(record_error)?;
        let result = state.generator.generate(&req.user_message, &req.schema_summary).await;
        record_rpc_outcome(if result.is_accepted() { "ok" } else { "null_sql" });
        Ok::<_, CallableError>(CallableResponse(result))
    }
    .instrument(rpc_span(RpcMethod::GenerateSql))
    .await
}

/// `POST /askGemini`
pub async fn ask(State(state): State<AppState>, body: Bytes) -> CallableResult<AdvisorReply> {
    async move {
        let req: AskRequest = parse_data(&body).inspect_err(record_error)?;
        let reply = state
            .advisor
            .ask(&req.message)
            .await
            .map_err(CallableError::from)
            .inspect_err(record_error)?;
        record_rpc_outcome("ok");
        Ok::<_, CallableError>(CallableResponse(reply))
    }
    .instrument(rpc_span(RpcMethod::AskGemini))
    .await
}

/// `POST /answerWithContext`
pub async fn answer_with_context(
    State(state): State<AppState>,
    body: Bytes,
) -> CallableResult<AdvisorReply> {
    async move {
        let req: ContextAnswerRequest = parse_data(&body).inspect_err(record_error)?;
        let reply = state
            .advisor
            .answer_with_context(&req.user_message, &req.sql, &req.db_result_summary)
            .await
            .map_err(CallableError::from)
            .inspect_err(record_error)?;
        record_rpc_outcome("ok");
        Ok::<_, CallableError>(CallableResponse(reply))
    }
    .instrument(rpc_span(RpcMethod::AnswerWithContext))
    .await
}

fn record_error(err: &CallableError) {
    warn!(status = err.status.as_str(), message = %err.message, "callable failed");
    record_rpc_outcome(err.status.as_str());
}

/// Query string for district search.
///
/// `limit` is kept as text; anything that is not a count falls back to the default.
#[derive(Debug, Deserialize)]
pub struct DistrictQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<String>,
}

impl DistrictQuery {
    fn limit(&self) -> usize {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_LIMIT)
    }
}

/// `GET /search_districts?q=...`
pub async fn search_districts(
    State(state): State<AppState>,
    Query(params): Query<DistrictQuery>,
) -> Json<Vec<String>> {
    rpc_span(RpcMethod::SearchDistricts).in_scope(|| {
        let results = state.districts.search(&params.q, params.limit());
        record_rpc_outcome("ok");
        Json(results)
    })
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
    pub guard: &'static str,
    pub districts: usize,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        model: state.model.clone(),
        guard: state.generator.policy().as_str(),
        districts: state.districts.len(),
    })
}
