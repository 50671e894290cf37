use serde::Deserialize;

use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::render::{DEFAULT_PLACEHOLDER, DEFAULT_SEARCH_URL};

/// Session settings passed from the host as JSON. Every field is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub placeholder: String,
    pub search_url: String,
    /// Directory for persisted state; `None` keeps everything in memory.
    pub data_dir: Option<String>,
    /// Replaces the shipped catalog when set.
    pub catalog_path: Option<String>,
    pub copy_ack_ms: u64,
    pub history_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            data_dir: None,
            catalog_path: None,
            copy_ack_ms: 2_000,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl SessionConfig {
    pub fn from_json(json: Option<&str>) -> Result<Self, serde_json::Error> {
        match json.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(s) => serde_json::from_str(s),
        }
    }
}
