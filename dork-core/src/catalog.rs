use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::dork::{Category, Dork, Severity};
use crate::error::CatalogError;

static BUILTIN: &str = include_str!("../data/dorks.json");

/// Read-only collection of dorks in catalog order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    dorks: Vec<Dork>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(dorks: Vec<Dork>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(dorks.len());
        for dork in &dorks {
            if !seen.insert(dork.id.as_str()) {
                return Err(CatalogError::DuplicateId(dork.id.clone()));
            }
        }
        Ok(Self { dorks })
    }

    /// The catalog shipped with the plugin.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let dorks: Vec<Dork> = serde_json::from_str(json)?;
        Self::new(dorks)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let dorks: Vec<Dork> = serde_yaml::from_str(yaml)?;
        Self::new(dorks)
    }

    /// Load a user catalog; `.yaml`/`.yml` files are read as YAML, anything
    /// else as JSON.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&text)?,
            _ => Self::from_json(&text)?,
        };
        tracing::info!(count = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Append dorks after the existing ones. Ids already present are skipped.
    pub fn extend<I: IntoIterator<Item = Dork>>(&mut self, extra: I) -> usize {
        let mut added = 0;
        for dork in extra {
            if self.get(&dork.id).is_some() {
                tracing::warn!(id = %dork.id, "skipping dork with duplicate id");
                continue;
            }
            self.dorks.push(dork);
            added += 1;
        }
        added
    }

    pub fn dorks(&self) -> &[Dork] {
        &self.dorks
    }

    pub fn len(&self) -> usize {
        self.dorks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dorks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Dork> {
        self.dorks.iter().find(|d| d.id == id)
    }

    /// Number of dorks per category; categories without dorks are absent.
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for dork in &self.dorks {
            *counts.entry(dork.category).or_insert(0) += 1;
        }
        counts
    }

    pub fn severity_counts(&self) -> BTreeMap<Severity, usize> {
        let mut counts = BTreeMap::new();
        for dork in &self.dorks {
            *counts.entry(dork.severity).or_insert(0) += 1;
        }
        counts
    }
}
