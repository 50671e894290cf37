use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("reading catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("duplicate dork id '{0}'")]
    DuplicateId(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io on key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("storage encode: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A host-supplied name that matches no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
