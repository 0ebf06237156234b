//! Request and result shapes exchanged with callers.

use serde::{Deserialize, Deserializer, Serialize};

/// Treat a missing or `null` text field as empty.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Natural-language question plus the schema it should be answered against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlRequest {
    /// User question, passed to the oracle verbatim
    pub user_message: String,

    /// Free-text table/column description, not verified
    #[serde(default, deserialize_with = "null_as_empty")]
    pub schema_summary: String,
}

/// Outcome of guarded SQL generation.
///
/// `sql` is `None` when no usable query could be produced, whatever the cause.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Generated `SELECT` statement, serialized as `null` when absent
    pub sql: Option<String>,
}

impl QueryResult {
    /// Result carrying an accepted query.
    pub fn accepted(sql: impl Into<String>) -> Self {
        Self { sql: Some(sql.into()) }
    }

    /// The absence-of-query sentinel.
    pub fn rejected() -> Self {
        Self { sql: None }
    }

    /// Check whether a query was produced.
    pub fn is_accepted(&self) -> bool {
        self.sql.is_some()
    }
}

/// Free-form advisory question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    /// User question
    pub message: String,
}

/// Question plus the data retrieved for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextAnswerRequest {
    /// Original user question
    pub user_message: String,

    /// SQL that produced the data
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sql: String,

    /// Retrieved rows rendered as text or JSON
    #[serde(default, deserialize_with = "null_as_empty")]
    pub db_result_summary: String,
}

/// Text answer from an advisory operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorReply {
    /// Trimmed oracle answer, or a fixed fallback when the oracle said nothing
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_result_serializes_null() {
        let value = serde_json::to_value(QueryResult::rejected()).unwrap();
        assert_eq!(value, json!({"sql": null}));

        let value = serde_json::to_value(QueryResult::accepted("SELECT 1")).unwrap();
        assert_eq!(value, json!({"sql": "SELECT 1"}));
    }

    #[test]
    fn test_sql_request_camel_case() {
        let req: SqlRequest = serde_json::from_value(json!({
            "userMessage": "Which crop did best?",
            "schemaSummary": "yield_summary(Crop, \"2023-24_Production_MT\")"
        }))
        .unwrap();
        assert_eq!(req.user_message, "Which crop did best?");
        assert!(req.schema_summary.starts_with("yield_summary"));
    }

    #[test]
    fn test_context_request_defaults() {
        let req: ContextAnswerRequest =
            serde_json::from_value(json!({"userMessage": "q"})).unwrap();
        assert!(req.sql.is_empty());
        assert!(req.db_result_summary.is_empty());

        let req: ContextAnswerRequest =
            serde_json::from_value(json!({"userMessage": "q", "sql": null, "dbResultSummary": null}))
                .unwrap();
        assert!(req.sql.is_empty());
        assert!(req.db_result_summary.is_empty());
    }

    #[test]
    fn test_null_schema_summary_is_empty() {
        let req: SqlRequest =
            serde_json::from_value(json!({"userMessage": "q", "schemaSummary": null})).unwrap();
        assert_eq!(req.schema_summary, "");

        let req: SqlRequest = serde_json::from_value(json!({"userMessage": "q"})).unwrap();
        assert_eq!(req.schema_summary, "");

        assert!(serde_json::from_value::<SqlRequest>(json!({"userMessage": "q", "schemaSummary": 3})).is_err());
    }
}
