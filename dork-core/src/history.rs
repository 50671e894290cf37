use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const HISTORY_KEY: &str = "search-history";
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    pub id: String,
    pub domain: String,
    pub dork_id: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results_found: Option<bool>,
}

/// Searches launched from the catalog, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHistory {
    entries: Vec<SearchHistoryEntry>,
    limit: usize,
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl SearchHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    /// Restore persisted entries, trimmed to the limit.
    pub fn with_entries(limit: usize, mut entries: Vec<SearchHistoryEntry>) -> Self {
        entries.truncate(limit);
        Self { entries, limit }
    }

    pub fn record(&mut self, domain: &str, dork_id: &str) -> SearchHistoryEntry {
        let entry = SearchHistoryEntry {
            id: uuid::Uuid::new_v4().to_string(),
            domain: domain.to_string(),
            dork_id: dork_id.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            results_found: None,
        };
        self.entries.insert(0, entry.clone());
        self.entries.truncate(self.limit);
        entry
    }

    pub fn entries(&self) -> &[SearchHistoryEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_newest_first() {
        let mut history = SearchHistory::default();
        history.record("a.com", "ef-001");
        history.record("b.com", "ef-002");

        let entries = history.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].domain, "b.com");
        assert_eq!(entries[1].dork_id, "ef-001");
        assert_ne!(entries[0].id, entries[1].id);
        assert!(chrono::DateTime::parse_from_rfc3339(&entries[0].timestamp).is_ok());
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = SearchHistory::new(2);
        history.record("1", "d");
        history.record("2", "d");
        history.record("3", "d");
        let domains: Vec<&str> = history.entries().iter().map(|e| e.domain.as_str()).collect();
        assert_eq!(domains, vec!["3", "2"]);
    }

    #[test]
    fn test_zero_limit_keeps_nothing() {
        let mut history = SearchHistory::new(0);
        history.record("a", "b");
        assert!(history.entries().is_empty());
    }
}
