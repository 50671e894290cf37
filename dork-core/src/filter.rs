use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dork::{Category, Dork, Severity};
use crate::error::ParseError;

/// Fields the free-text search looks at.
pub const SEARCHABLE_FIELDS: &[&str] = &["title", "description", "tags", "category"];

/// Whether `needle` occurs, ignoring case, in any value of any searchable
/// field.
///
/// ```text
/// needle "WordPress"
/// └── keep rows where
///     ├─ the title or description contains "wordpress", or
///     ├─ some tag contains "wordpress", or
///     └─ the category id contains "wordpress"
/// ```
///
/// `needle` must already be lower-case. An empty needle matches everything.
fn text_matches(dork: &Dork, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    SEARCHABLE_FIELDS.iter().any(|field| {
        dork.field_values(field)
            .iter()
            .any(|val| val.to_lowercase().contains(needle))
    })
}

/// Predicate state behind the catalog list.
///
/// Empty `categories` or `severities` place no constraint on that class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub query: String,
    pub categories: Vec<Category>,
    pub severities: Vec<Severity>,
}

/// One-click scans offered next to the target input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    Wordpress,
    Sqli,
    Subdomains,
}

impl FromStr for Preset {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wordpress" => Ok(Preset::Wordpress),
            "sqli" => Ok(Preset::Sqli),
            "subdomains" => Ok(Preset::Subdomains),
            _ => Err(ParseError::new("preset", s)),
        }
    }
}

/// A one-shot filter call from the host: the filter state plus the targets to
/// render against and the ids to flag as favorites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FilterRequest {
    #[serde(flatten)]
    pub state: FilterState,
    pub targets: Vec<String>,
    pub favorites: Vec<String>,
}

impl FilterState {
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Add the category if absent, remove it if present.
    pub fn toggle_category(&mut self, category: Category) {
        if let Some(pos) = self.categories.iter().position(|c| *c == category) {
            self.categories.remove(pos);
        } else {
            self.categories.push(category);
        }
    }

    pub fn toggle_severity(&mut self, severity: Severity) {
        if let Some(pos) = self.severities.iter().position(|s| *s == severity) {
            self.severities.remove(pos);
        } else {
            self.severities.push(severity);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn has_active_filters(&self) -> bool {
        !self.query.is_empty() || !self.categories.is_empty() || !self.severities.is_empty()
    }

    /// Presets overwrite only the fields they name.
    pub fn apply_preset(&mut self, preset: Preset) {
        match preset {
            Preset::Wordpress => {
                self.categories = vec![Category::CmsPlatforms];
                self.query = "wordpress".to_string();
            }
            Preset::Sqli => {
                self.severities = vec![Severity::Critical, Severity::High];
                self.query = "sql".to_string();
            }
            Preset::Subdomains => {
                self.query = "subdomain".to_string();
            }
        }
    }

    /// Empty selections place no constraint.
    pub fn matches(&self, dork: &Dork) -> bool {
        text_matches(dork, &self.query.to_lowercase())
            && (self.categories.is_empty() || self.categories.contains(&dork.category))
            && (self.severities.is_empty() || self.severities.contains(&dork.severity))
    }
}

/// Records passing every active predicate, in input order.
#[tracing::instrument(skip(records), fields(record_count = records.len()))]
pub fn filter_dorks<'a>(records: &'a [Dork], state: &FilterState) -> Vec<&'a Dork> {
    records.iter().filter(|dork| state.matches(dork)).collect()
}

/// Records whose id is in `favorite_ids`, in catalog order.
pub fn favorite_dorks<'a, S>(records: &'a [Dork], favorite_ids: &S) -> Vec<&'a Dork>
where
    S: crate::favorites::ContainsId + ?Sized,
{
    records
        .iter()
        .filter(|dork| favorite_ids.contains_id(&dork.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dork::sample;
    use std::collections::HashSet;

    fn catalog() -> Vec<Dork> {
        let mut wp = sample("cms-1", Category::CmsPlatforms, Severity::Critical);
        wp.title = "Config leak".to_string();
        wp.query = "site:{DOMAIN} inurl:wp-config.php".to_string();
        wp.tags = vec!["configuration".to_string()];

        let mut sql = sample("vuln-1", Category::Vulnerabilities, Severity::High);
        sql.title = "SQL Errors".to_string();
        sql.tags = vec!["sqli".to_string(), "errors".to_string()];

        let mut plugins = sample("cms-2", Category::CmsPlatforms, Severity::Info);
        plugins.description = "List installed WordPress plugins".to_string();

        let mut bucket = sample("cloud-1", Category::CloudStorage, Severity::Medium);
        bucket.tags = vec!["s3".to_string(), "aws".to_string()];

        vec![wp, sql, plugins, bucket]
    }

    fn ids(dorks: &[&Dork]) -> Vec<String> {
        dorks.iter().map(|d| d.id.clone()).collect()
    }

    #[test]
    fn test_empty_state_is_identity() {
        let records = catalog();
        let out = filter_dorks(&records, &FilterState::default());
        assert_eq!(out.len(), records.len());
        assert!(out.iter().zip(records.iter()).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_empty_selection_means_no_constraint() {
        let records = catalog();
        let state = FilterState {
            query: String::new(),
            categories: vec![],
            severities: vec![Severity::Critical],
        };
        // The empty category set must not empty the result.
        assert_eq!(ids(&filter_dorks(&records, &state)), vec!["cms-1"]);
    }

    #[test]
    fn test_category_selection_sound_and_complete() {
        let records = catalog();
        let state = FilterState {
            categories: vec![Category::CmsPlatforms, Category::CloudStorage],
            ..Default::default()
        };
        let out = filter_dorks(&records, &state);
        assert!(out.iter().all(|d| state.categories.contains(&d.category)));
        let expected: Vec<&Dork> = records
            .iter()
            .filter(|d| state.categories.contains(&d.category))
            .collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let records = catalog();
        let upper = FilterState {
            query: "WORDPRESS".to_string(),
            ..Default::default()
        };
        let lower = FilterState {
            query: "wordpress".to_string(),
            ..Default::default()
        };
        assert_eq!(filter_dorks(&records, &upper), filter_dorks(&records, &lower));
        assert_eq!(ids(&filter_dorks(&records, &lower)), vec!["cms-2"]);
    }

    #[test]
    fn test_query_covers_tags_and_category() {
        let records = catalog();
        let by_tag = FilterState {
            query: "AWS".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_dorks(&records, &by_tag)), vec!["cloud-1"]);

        let by_category = FilterState {
            query: "cms-plat".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_dorks(&records, &by_category)), vec!["cms-1", "cms-2"]);
    }

    #[test]
    fn test_query_ignores_query_text() {
        // "wp-config" only appears in the query template, which is not searched.
        let records = catalog();
        let state = FilterState {
            query: "wp-config".to_string(),
            ..Default::default()
        };
        assert!(filter_dorks(&records, &state).is_empty());
    }

    #[test]
    fn test_wordpress_critical_example_excluded() {
        let records = catalog();
        let state = FilterState {
            query: "wordpress".to_string(),
            categories: vec![],
            severities: vec![Severity::Critical, Severity::High],
        };
        // cms-1 is critical but says nothing about wordpress outside its query;
        // cms-2 mentions wordpress but is only info.
        assert!(filter_dorks(&records, &state).is_empty());
    }

    #[test]
    fn test_predicates_and_together() {
        let records = catalog();
        let state = FilterState {
            query: "title".to_string(),
            categories: vec![Category::CmsPlatforms],
            severities: vec![Severity::Info],
        };
        assert_eq!(ids(&filter_dorks(&records, &state)), vec!["cms-2"]);
        assert!(records.iter().filter(|d| state.matches(d)).all(|d| d.id == "cms-2"));
    }

    #[test]
    fn test_toggle_and_clear() {
        let mut state = FilterState::default();
        assert!(!state.has_active_filters());

        state.toggle_category(Category::Databases);
        state.toggle_severity(Severity::Low);
        state.toggle_category(Category::CloudStorage);
        assert_eq!(state.categories, vec![Category::Databases, Category::CloudStorage]);

        state.toggle_category(Category::Databases);
        assert_eq!(state.categories, vec![Category::CloudStorage]);
        assert!(state.has_active_filters());

        state.set_query("x");
        state.clear();
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn test_presets_only_touch_named_fields() {
        let mut state = FilterState {
            query: String::new(),
            categories: vec![Category::Databases],
            severities: vec![Severity::Info],
        };
        state.apply_preset(Preset::Sqli);
        assert_eq!(state.query, "sql");
        assert_eq!(state.categories, vec![Category::Databases]);
        assert_eq!(state.severities, vec![Severity::Critical, Severity::High]);

        state.apply_preset(Preset::Wordpress);
        assert_eq!(state.categories, vec![Category::CmsPlatforms]);
        assert_eq!(state.severities, vec![Severity::Critical, Severity::High]);

        state.apply_preset(Preset::Subdomains);
        assert_eq!(state.query, "subdomain");
        assert_eq!("sqli".parse(), Ok(Preset::Sqli));
        assert!("joomla".parse::<Preset>().is_err());
    }

    #[test]
    fn test_favorites_follow_catalog_order() {
        let records = catalog();
        let favs: HashSet<String> = ["cloud-1", "cms-1"].iter().map(|s| s.to_string()).collect();
        assert_eq!(ids(&favorite_dorks(&records, &favs)), vec!["cms-1", "cloud-1"]);
    }

    #[test]
    fn test_filter_request_from_host_json() {
        let json = r#"{"query":"wp","severities":["critical"],"targets":["a.com"]}"#;
        let req: FilterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.state.query, "wp");
        assert!(req.state.categories.is_empty());
        assert_eq!(req.state.severities, vec![Severity::Critical]);
        assert_eq!(req.targets, vec!["a.com"]);
        assert!(req.favorites.is_empty());

        let empty: FilterRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, FilterRequest::default());
    }
}
