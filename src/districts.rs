//! District name directory backing the autocomplete endpoint.

use crate::types::{GatewayError, Result};
use std::cmp::Ordering;
use std::path::Path;
use tracing::info;

/// Default number of suggestions returned.
pub const DEFAULT_LIMIT: usize = 10;

/// Minimum Jaro-Winkler similarity for fuzzy suggestions.
const FUZZY_THRESHOLD: f64 = 0.85;

/// Immutable, sorted set of district names.
#[derive(Debug, Clone, Default)]
pub struct DistrictDirectory {
    /// Display names, sorted and deduplicated
    names: Vec<String>,
    /// Lowercased names, parallel to `names`
    folded: Vec<String>,
}

impl DistrictDirectory {
    /// Build from any list of names.
    ///
    /// Names are trimmed; blanks and exact duplicates are dropped.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        names.sort();
        names.dedup();

        let folded = names.iter().map(|n| n.to_lowercase()).collect();
        Self { names, folded }
    }

    /// Load names from a file.
    ///
    /// Accepts a JSON array of strings or one name per line.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::IoError` if the file cannot be read, or
    /// `GatewayError::DistrictError` if it looks like JSON but is not an
    /// array of strings
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let directory = if content.trim_start().starts_with('[') {
            let names: Vec<String> = serde_json::from_str(&content).map_err(|e| {
                GatewayError::DistrictError(format!("{}: {}", path.display(), e))
            })?;
            Self::new(names)
        } else {
            Self::new(content.lines())
        };

        info!(path = %path.display(), districts = directory.len(), "Loaded district directory");
        Ok(directory)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All names in sorted order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Suggest district names for a partial query.
    ///
    /// # Algorithm
    ///
    /// 1. Blank query → no suggestions
    /// 2. Case-insensitive prefix matches, alphabetical
    /// 3. Other case-insensitive substring matches, alphabetical
    /// 4. Only if steps 2-3 found nothing: fuzzy matches
    ///    (Jaro-Winkler ≥ 0.85) by descending similarity
    ///
    /// At most `limit` names are returned.
    pub fn search(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut prefix = Vec::new();
        let mut contains = Vec::new();
        for (name, folded) in self.names.iter().zip(&self.folded) {
            if folded.starts_with(&needle) {
                prefix.push(name);
            } else if folded.contains(&needle) {
                contains.push(name);
            }
        }

        if !prefix.is_empty() || !contains.is_empty() {
            return prefix
                .into_iter()
                .chain(contains)
                .take(limit)
                .cloned()
                .collect();
        }

        let mut fuzzy: Vec<(f64, &String)> = self
            .names
            .iter()
            .zip(&self.folded)
            .map(|(name, folded)| (strsim::jaro_winkler(&needle, folded), name))
            .filter(|(score, _)| *score >= FUZZY_THRESHOLD)
            .collect();
        fuzzy.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal).then_with(|| a.1.cmp(b.1)));

        fuzzy.into_iter().take(limit).map(|(_, name)| name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn directory() -> DistrictDirectory {
        DistrictDirectory::new([
            "Dhaka", "Dhaka Division", "Dinajpur", "Bogura", "Chattogram",
            "Moulvibazar", "Narayanganj", "Gazipur", "Bagerhat", "Dhaka",
        ])
    }

    #[test]
    fn test_new_sorts_and_dedups() {
        let dir = DistrictDirectory::new(["  Rajshahi ", "", "Khulna", "Rajshahi"]);
        assert_eq!(dir.names(), &["Khulna".to_string(), "Rajshahi".to_string()]);
        assert_eq!(dir.len(), 2);
    }

    #[test]
    fn test_blank_query_returns_nothing() {
        assert!(directory().search("", 10).is_empty());
        assert!(directory().search("   ", 10).is_empty());
    }

    #[test]
    fn test_prefix_matches_before_substring() {
        let results = directory().search("na", 10);
        // "Narayanganj" starts with "na"; "Dinajpur" only contains it.
        assert_eq!(results, vec!["Narayanganj", "Dinajpur"]);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(directory().search("DHA", 10), vec!["Dhaka", "Dhaka Division"]);
    }

    #[test]
    fn test_limit() {
        assert_eq!(directory().search("a", 2).len(), 2);
        assert!(directory().search("a", 0).is_empty());
    }

    #[test]
    fn test_fuzzy_fallback() {
        // Common alternate spelling.
        let results = directory().search("Chittagram", 10);
        assert_eq!(results.first().map(String::as_str), Some("Chattogram"));

        assert!(directory().search("zzzz", 10).is_empty());
    }

    #[test]
    fn test_load_lines() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Sylhet\nRangpur\n\nBarishal").unwrap();

        let dir = DistrictDirectory::load(file.path()).unwrap();
        assert_eq!(dir.names(), &["Barishal", "Rangpur", "Sylhet"]);
    }

    #[test]
    fn test_load_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"["Jessore", "Cumilla"]"#).unwrap();

        let dir = DistrictDirectory::load(file.path()).unwrap();
        assert_eq!(dir.names(), &["Cumilla", "Jessore"]);
    }

    #[test]
    fn test_load_bad_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[1, 2]"#).unwrap();

        let err = DistrictDirectory::load(file.path()).unwrap_err();
        assert!(matches!(err, GatewayError::DistrictError(_)));
    }
}
