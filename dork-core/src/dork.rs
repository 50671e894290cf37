//! Catalog record types.
//!
//! Categories, severities and vulnerability classes are closed enums so an
//! out-of-range value is rejected when a catalog is deserialized instead of
//! being carried around as an inert string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    ExposedFiles,
    Vulnerabilities,
    CloudStorage,
    Authentication,
    CmsPlatforms,
    SensitiveData,
    NetworkDevices,
    Databases,
    Custom,
}

impl Category {
    /// Every category in chip order. `Custom` is last and is not offered as a
    /// filter chip by the host.
    pub const ALL: [Category; 9] = [
        Category::ExposedFiles,
        Category::Vulnerabilities,
        Category::CloudStorage,
        Category::Authentication,
        Category::CmsPlatforms,
        Category::SensitiveData,
        Category::NetworkDevices,
        Category::Databases,
        Category::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ExposedFiles => "exposed-files",
            Category::Vulnerabilities => "vulnerabilities",
            Category::CloudStorage => "cloud-storage",
            Category::Authentication => "authentication",
            Category::CmsPlatforms => "cms-platforms",
            Category::SensitiveData => "sensitive-data",
            Category::NetworkDevices => "network-devices",
            Category::Databases => "databases",
            Category::Custom => "custom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::ExposedFiles => "Exposed Files",
            Category::Vulnerabilities => "Vulnerabilities",
            Category::CloudStorage => "Cloud Storage",
            Category::Authentication => "Authentication",
            Category::CmsPlatforms => "CMS Platforms",
            Category::SensitiveData => "Sensitive Data",
            Category::NetworkDevices => "Network Devices",
            Category::Databases => "Databases",
            Category::Custom => "Custom",
        }
    }

}

impl FromStr for Category {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseError::new("category", s))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk rating. Variants are declared lowest first so the derived `Ord`
/// ranks `Critical` highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Display order, most severe first.
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Info,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Info => "info",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Info => "Info",
        }
    }

}

impl FromStr for Severity {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sev| sev.as_str() == s)
            .ok_or_else(|| ParseError::new("severity", s))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VulnerabilityType {
    Xss,
    Sqli,
    Ssrf,
    Lfi,
    Rce,
    OpenRedirect,
    Idor,
    Xxe,
    General,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dork {
    pub id: String,
    pub title: String,
    pub description: String,
    pub query: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vulnerability_type: Option<VulnerabilityType>,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<String>>,
}

impl Dork {
    /// Text values of a searchable field. `tags` yields one value per tag so a
    /// match never spans two tags.
    pub fn field_values(&self, field: &str) -> Vec<&str> {
        match field {
            "title" => vec![self.title.as_str()],
            "description" => vec![self.description.as_str()],
            "tags" => self.tags.iter().map(String::as_str).collect(),
            "category" => vec![self.category.as_str()],
            _ => Vec::new(),
        }
    }
}

/// A dork the user assembled in the builder and saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomDork {
    #[serde(flatten)]
    pub dork: Dork,
    pub created_at: String,
}

/// Export shape for a named set of dorks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DorkCollection {
    pub name: String,
    pub description: String,
    pub dorks: Vec<Dork>,
    pub created_at: String,
    pub updated_at: String,
}

#[cfg(test)]
pub(crate) fn sample(id: &str, category: Category, severity: Severity) -> Dork {
    Dork {
        id: id.to_string(),
        title: format!("Title {id}"),
        description: format!("Description {id}"),
        query: "site:{DOMAIN}".to_string(),
        category,
        vulnerability_type: None,
        severity,
        platform: None,
        tags: Vec::new(),
        examples: None,
        references: None,
    }
}
