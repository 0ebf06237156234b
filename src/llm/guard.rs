//! Textual guardrail for oracle-generated SQL.
//!
//! The guard never parses SQL. It isolates the first `;`-delimited segment of
//! the oracle output and checks its leading token. `GuardPolicy::Strict`
//! additionally rejects data-modifying keywords anywhere in the segment.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;

use crate::types::GatewayError;

/// Keywords rejected by the strict policy (whole words, case-insensitive).
const FORBIDDEN_KEYWORDS: &[&str] = &[
    "INSERT", "UPDATE", "DELETE", "DROP", "ALTER", "CREATE", "REPLACE",
    "ATTACH", "DETACH", "PRAGMA", "VACUUM", "TRUNCATE",
];

/// Guard policy applied to candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardPolicy {
    /// Leading `SELECT` check only
    #[default]
    Prefix,
    /// Leading `SELECT` plus forbidden-keyword scan
    Strict,
}

impl GuardPolicy {
    /// Get policy name as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prefix => "prefix",
            Self::Strict => "strict",
        }
    }
}

impl FromStr for GuardPolicy {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prefix" => Ok(Self::Prefix),
            "strict" => Ok(Self::Strict),
            other => Err(GatewayError::ConfigError(format!(
                "Unknown guard policy '{}' (expected 'prefix' or 'strict')",
                other
            ))),
        }
    }
}

/// Why a candidate was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Candidate does not begin with `SELECT`
    NotSelect,
    /// Strict policy found a data-modifying keyword
    ForbiddenKeyword(String),
}

impl Rejection {
    /// Short label for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotSelect => "not_select",
            Self::ForbiddenKeyword(_) => "forbidden_keyword",
        }
    }
}

/// Isolate the candidate statement from raw oracle output.
///
/// Takes everything before the first `;` (the whole text if there is none)
/// and trims surrounding whitespace.
///
/// # Examples
///
/// - `"SELECT 1;\n-- note"` → `"SELECT 1"`
/// - `"  SELECT 2  "` → `"SELECT 2"`
pub fn extract_candidate(raw: &str) -> &str {
    raw.split(';').next().unwrap_or_default().trim()
}

/// Check the leading-token condition.
///
/// Matches on the uppercased text, so `select` and `Select` pass too.
pub fn starts_with_select(candidate: &str) -> bool {
    candidate.to_uppercase().starts_with("SELECT")
}

fn forbidden_keyword_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(r"(?i)\b({})\b", FORBIDDEN_KEYWORDS.join("|"));
        Regex::new(&pattern).expect("forbidden keyword pattern is valid")
    })
}

/// Find the first forbidden keyword in a candidate, uppercased.
pub fn find_forbidden_keyword(candidate: &str) -> Option<String> {
    forbidden_keyword_regex()
        .find(candidate)
        .map(|m| m.as_str().to_ascii_uppercase())
}

/// Apply the guard to raw oracle output.
///
/// # Returns
///
/// The trimmed candidate if accepted, otherwise the rejection reason
pub fn check(raw: &str, policy: GuardPolicy) -> Result<String, Rejection> {
    let candidate = extract_candidate(raw);

    if !starts_with_select(candidate) {
        return Err(Rejection::NotSelect);
    }

    if policy == GuardPolicy::Strict {
        if let Some(keyword) = find_forbidden_keyword(candidate) {
            return Err(Rejection::ForbiddenKeyword(keyword));
        }
    }

    Ok(candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extract_candidate() {
        assert_eq!(
            extract_candidate("SELECT * FROM crop_data WHERE year = '2023-24';\n-- note"),
            "SELECT * FROM crop_data WHERE year = '2023-24'"
        );
        assert_eq!(extract_candidate("  SELECT 1  "), "SELECT 1");
        assert_eq!(extract_candidate(";SELECT 1"), "");
        assert_eq!(extract_candidate(""), "");
    }

    #[test]
    fn test_starts_with_select() {
        assert!(starts_with_select("SELECT 1"));
        assert!(starts_with_select("select crop from yield_summary"));
        assert!(starts_with_select("SeLeCt 1"));
        // Prefix check only, not a token check.
        assert!(starts_with_select("SELECTED"));

        assert!(!starts_with_select("DROP TABLE crop_data"));
        assert!(!starts_with_select("I cannot answer that."));
        assert!(!starts_with_select("```sql\nSELECT 1\n```"));
        assert!(!starts_with_select("WITH t AS (SELECT 1) SELECT * FROM t"));
    }

    #[test]
    fn test_check_scenarios() {
        assert_eq!(
            check("SELECT * FROM crop_data WHERE year = '2023-24';\n-- note", GuardPolicy::Prefix),
            Ok("SELECT * FROM crop_data WHERE year = '2023-24'".to_string())
        );
        assert_eq!(check("I cannot answer that.", GuardPolicy::Prefix), Err(Rejection::NotSelect));
        assert_eq!(check("DROP TABLE crop_data;", GuardPolicy::Prefix), Err(Rejection::NotSelect));
    }

    #[test]
    fn test_strict_policy_rejects_keywords() {
        let raw = "SELECT * FROM t WHERE note = 'x' OR 1=1 -- DELETE later";
        assert!(check(raw, GuardPolicy::Prefix).is_ok());
        assert_eq!(
            check(raw, GuardPolicy::Strict),
            Err(Rejection::ForbiddenKeyword("DELETE".to_string()))
        );

        // Whole words only: column names containing keywords are fine.
        let raw = "SELECT updated_at, created_by FROM crop_data";
        assert!(check(raw, GuardPolicy::Strict).is_ok());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("prefix".parse::<GuardPolicy>().unwrap(), GuardPolicy::Prefix);
        assert_eq!(" STRICT ".parse::<GuardPolicy>().unwrap(), GuardPolicy::Strict);
        assert!("parser".parse::<GuardPolicy>().is_err());
    }

    proptest! {
        #[test]
        fn prop_non_select_is_rejected(raw in "\\PC*") {
            let candidate = extract_candidate(&raw);
            prop_assume!(!candidate.to_uppercase().starts_with("SELECT"));
            prop_assert_eq!(check(&raw, GuardPolicy::Prefix), Err(Rejection::NotSelect));
        }

        #[test]
        fn prop_select_is_returned_verbatim(
            lead in "[ \t\n]{0,3}",
            body in "[a-zA-Z0-9_ ,.*='()-]{0,40}",
            tail in "[^;]{0,20}",
        ) {
            let statement = format!("SELECT{}", body);
            let raw = format!("{}{};{}", lead, statement, tail);
            let expected = statement.trim().to_string();
            prop_assert_eq!(check(&raw, GuardPolicy::Prefix), Ok(expected));
        }
    }
}
