//! Interactive query builder.
//!
//! The builder edits an ordered list of `(operator, value)` parts and joins
//! the non-blank ones into a single query string.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[default]
    #[serde(rename = "site:")]
    Site,
    #[serde(rename = "inurl:")]
    InUrl,
    #[serde(rename = "intext:")]
    InText,
    #[serde(rename = "intitle:")]
    InTitle,
    #[serde(rename = "filetype:")]
    FileType,
    #[serde(rename = "ext:")]
    Ext,
    #[serde(rename = "cache:")]
    Cache,
    #[serde(rename = "link:")]
    Link,
    #[serde(rename = "related:")]
    Related,
}

impl Operator {
    pub const ALL: [Operator; 9] = [
        Operator::Site,
        Operator::InUrl,
        Operator::InText,
        Operator::InTitle,
        Operator::FileType,
        Operator::Ext,
        Operator::Cache,
        Operator::Link,
        Operator::Related,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Operator::Site => "site:",
            Operator::InUrl => "inurl:",
            Operator::InText => "intext:",
            Operator::InTitle => "intitle:",
            Operator::FileType => "filetype:",
            Operator::Ext => "ext:",
            Operator::Cache => "cache:",
            Operator::Link => "link:",
            Operator::Related => "related:",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Operator::Site => "Search within a specific website",
            Operator::InUrl => "Find pages with keyword in URL",
            Operator::InText => "Find pages with keyword in text",
            Operator::InTitle => "Find pages with keyword in title",
            Operator::FileType => "Search for specific file types",
            Operator::Ext => "Search for file extensions",
            Operator::Cache => "View cached version of page",
            Operator::Link => "Find pages linking to URL",
            Operator::Related => "Find related websites",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.token() == token)
    }
}

pub const FILE_TYPE_SUGGESTIONS: &[&str] = &[
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "txt", "log", "sql", "env", "config", "xml", "json",
];

pub const KEYWORD_SUGGESTIONS: &[&str] = &[
    "admin", "login", "password", "secret", "api", "key", "token", "config", "backup", "db",
];

/// Ready-made templated queries, `(name, query)`.
pub const QUICK_TEMPLATES: &[(&str, &str)] = &[
    (
        "Find Exposed Credentials",
        "site:{DOMAIN} ext:env \"DB_PASSWORD\" | \"API_KEY\"",
    ),
    (
        "Discover Login Pages",
        "site:{DOMAIN} inurl:admin | inurl:login | inurl:signin",
    ),
    (
        "Search Config Files",
        "site:{DOMAIN} ext:xml | ext:conf | ext:config intext:\"password\"",
    ),
    (
        "Find SQL Files",
        "site:{DOMAIN} ext:sql intext:\"INSERT INTO\" | \"CREATE TABLE\"",
    ),
    (
        "Locate Backup Files",
        "site:{DOMAIN} ext:bak | ext:backup | ext:old",
    ),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPart {
    pub operator: Operator,
    #[serde(default)]
    pub value: String,
}

impl QueryPart {
    pub fn new(operator: Operator, value: impl Into<String>) -> Self {
        Self {
            operator,
            value: value.into(),
        }
    }
}

/// Join the parts whose value is not blank as `operator ++ value`, separated
/// by single spaces.
pub fn build_query(parts: &[QueryPart]) -> String {
    parts
        .iter()
        .filter(|p| !p.value.trim().is_empty())
        .map(|p| format!("{}{}", p.operator.token(), p.value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Which field of a part an update targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartField {
    Operator(Operator),
    Value(String),
}

impl PartField {
    /// `field` is `"operator"` (with `value` an operator token) or `"value"`.
    pub fn parse(field: &str, value: String) -> Result<Self, ParseError> {
        match field {
            "operator" => Operator::from_token(&value)
                .map(PartField::Operator)
                .ok_or_else(|| ParseError::new("operator", &value)),
            "value" => Ok(PartField::Value(value)),
            other => Err(ParseError::new("part field", other)),
        }
    }
}

/// Convert a 1-based part position, as the host numbers parts, to an index.
pub fn part_index(position: usize) -> Option<usize> {
    position.checked_sub(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Suggestion {
    FileType,
    Keyword,
}

impl FromStr for Suggestion {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file-type" | "filetype" => Ok(Suggestion::FileType),
            "keyword" => Ok(Suggestion::Keyword),
            _ => Err(ParseError::new("suggestion", s)),
        }
    }
}

/// Editable part list plus the last built query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBuilder {
    parts: Vec<QueryPart>,
    built: String,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self {
            parts: vec![QueryPart::default()],
            built: String::new(),
        }
    }
}

impl QueryBuilder {
    pub fn parts(&self) -> &[QueryPart] {
        &self.parts
    }

    pub fn built(&self) -> &str {
        &self.built
    }

    pub fn add(&mut self) {
        self.parts.push(QueryPart::default());
    }

    /// Remove the part at `index`. The last remaining part is never removed.
    pub fn remove(&mut self, index: usize) -> bool {
        if self.parts.len() <= 1 || index >= self.parts.len() {
            return false;
        }
        self.parts.remove(index);
        true
    }

    /// `remove` addressed by 1-based position.
    pub fn remove_at(&mut self, position: usize) -> bool {
        part_index(position).is_some_and(|i| self.remove(i))
    }

    pub fn update(&mut self, index: usize, field: PartField) -> bool {
        let Some(part) = self.parts.get_mut(index) else {
            return false;
        };
        match field {
            PartField::Operator(op) => part.operator = op,
            PartField::Value(v) => part.value = v,
        }
        true
    }

    /// `update` addressed by 1-based position.
    pub fn update_at(&mut self, position: usize, field: PartField) -> bool {
        part_index(position).is_some_and(|i| self.update(i, field))
    }

    pub fn build(&mut self) -> &str {
        self.built = build_query(&self.parts);
        &self.built
    }

    /// Fill the first part with an empty value from a suggestion chip.
    pub fn suggest(&mut self, kind: Suggestion, value: &str) -> bool {
        let Some(part) = self.parts.iter_mut().find(|p| p.value.is_empty()) else {
            return false;
        };
        let operator = match kind {
            Suggestion::FileType => Operator::Ext,
            Suggestion::Keyword => Operator::InUrl,
        };
        *part = QueryPart::new(operator, value);
        true
    }

    /// Replace the built query with the template called `name`.
    pub fn use_template(&mut self, name: &str) -> Option<&str> {
        let (_, query) = QUICK_TEMPLATES.iter().find(|(n, _)| *n == name)?;
        self.built = query.to_string();
        Some(&self.built)
    }
}
