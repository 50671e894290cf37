//! Host session state.
//!
//! A `Session` owns everything the catalog browser mutates: filter state,
//! favorites, targets, the builder, the copy acknowledgement and the search
//! history. The shipped catalog (plus saved custom dorks) is read-only here.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};

use crate::ack::CopyAck;
use crate::builder::QueryBuilder;
use crate::catalog::Catalog;
use crate::config::SessionConfig;
use crate::dork::{Category, CustomDork, Dork, DorkCollection, Severity};
use crate::error::{CatalogError, ParseError};
use crate::favorites::Favorites;
use crate::filter::{favorite_dorks, filter_dorks, FilterState, Preset};
use crate::history::{SearchHistory, SearchHistoryEntry, HISTORY_KEY};
use crate::render::{render_with, search_url};
use crate::row::{DorkRow, RowContext};
use crate::stats::Stats;
use crate::storage::{load_json, save_json, FileStore, KeyValueStore, MemoryStore};
use crate::targets::TargetList;

pub const CUSTOM_DORKS_KEY: &str = "custom-dorks";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
}

impl FromStr for ExportFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            _ => Err(ParseError::new("export format", s)),
        }
    }
}

#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    catalog: Catalog,
    custom: Vec<CustomDork>,
    pub filter: FilterState,
    store: Box<dyn KeyValueStore>,
    favorites: Favorites,
    pub targets: TargetList,
    pub builder: QueryBuilder,
    copied: CopyAck,
    history: SearchHistory,
}

impl Session {
    /// Open a session using the store implied by `config.data_dir`.
    pub fn open(config: SessionConfig) -> Result<Self, CatalogError> {
        let store: Box<dyn KeyValueStore> = match &config.data_dir {
            Some(dir) => Box::new(FileStore::new(dir)),
            None => Box::new(MemoryStore::default()),
        };
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_path(Path::new(path))?,
            None => Catalog::builtin()?,
        };
        Ok(Self::with_store(config, catalog, store))
    }

    #[tracing::instrument(skip(catalog, store), fields(catalog_len = catalog.len()))]
    pub fn with_store(
        config: SessionConfig,
        mut catalog: Catalog,
        store: Box<dyn KeyValueStore>,
    ) -> Self {
        let favorites = Favorites::initialize(store.as_ref());

        let custom: Vec<CustomDork> = load_json(store.as_ref(), CUSTOM_DORKS_KEY);
        catalog.extend(custom.iter().map(|c| c.dork.clone()));

        let entries: Vec<SearchHistoryEntry> = load_json(store.as_ref(), HISTORY_KEY);
        let history = SearchHistory::with_entries(config.history_limit, entries);

        Self {
            copied: CopyAck::new(Duration::from_millis(config.copy_ack_ms)),
            config,
            catalog,
            custom,
            filter: FilterState::default(),
            store,
            favorites,
            targets: TargetList::default(),
            builder: QueryBuilder::default(),
            history,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // ── filtering ────────────────────────────────────────────────────────────

    pub fn set_query(&mut self, query: &str) {
        self.filter.set_query(query);
    }

    pub fn toggle_category(&mut self, category: Category) {
        self.filter.toggle_category(category);
    }

    pub fn toggle_severity(&mut self, severity: Severity) {
        self.filter.toggle_severity(severity);
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        self.filter.apply_preset(preset);
    }

    pub fn visible(&self) -> Vec<&Dork> {
        filter_dorks(self.catalog.dorks(), &self.filter)
    }

    pub fn favorite_dorks(&self) -> Vec<&Dork> {
        favorite_dorks(self.catalog.dorks(), &self.favorites)
    }

    /// Rows for the dorks currently passing the filter.
    pub fn visible_rows(&self) -> Vec<DorkRow> {
        self.rows(self.visible())
    }

    pub fn favorite_rows(&self) -> Vec<DorkRow> {
        self.rows(self.favorite_dorks())
    }

    fn rows(&self, dorks: Vec<&Dork>) -> Vec<DorkRow> {
        let is_favorite = |id: &str| self.favorites.contains(id);
        let is_copied = |id: &str| self.copied.is_active(id);
        let ctx = RowContext {
            placeholder: &self.config.placeholder,
            search_url: &self.config.search_url,
            targets: self.targets.as_slice(),
            is_favorite: &is_favorite,
            is_copied: &is_copied,
        };
        dorks.into_iter().map(|d| DorkRow::build(d, &ctx)).collect()
    }

    // ── favorites ────────────────────────────────────────────────────────────

    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        self.favorites.toggle(id, self.store.as_mut())
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    // ── copy / search ────────────────────────────────────────────────────────

    /// Text for the clipboard: the raw template, or the query rendered for
    /// `target`. Marks the copy acknowledgement for the dork.
    pub fn copy(&mut self, id: &str, target: Option<&str>) -> Option<String> {
        let dork = self.catalog.get(id)?;
        let text = match target {
            Some(t) => render_with(&dork.query, &self.config.placeholder, t),
            None => dork.query.clone(),
        };
        self.copied.mark(id);
        Some(text)
    }

    pub fn is_copied(&self, id: &str) -> bool {
        self.copied.is_active(id)
    }

    /// Search URL for a dork rendered against `target`, recorded in history.
    #[tracing::instrument(skip(self))]
    pub fn search(&mut self, id: &str, target: &str) -> Option<String> {
        let dork = self.catalog.get(id)?;
        let rendered = render_with(&dork.query, &self.config.placeholder, target);
        let url = search_url(&self.config.search_url, &rendered);

        self.history.record(target, id);
        save_json(self.store.as_mut(), HISTORY_KEY, self.history.entries());
        Some(url)
    }

    /// Search URL for the builder's last built query.
    pub fn builder_search_url(&self) -> Option<String> {
        let built = self.builder.built();
        if built.is_empty() {
            return None;
        }
        Some(search_url(&self.config.search_url, built))
    }

    pub fn history(&self) -> &[SearchHistoryEntry] {
        self.history.entries()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        save_json(self.store.as_mut(), HISTORY_KEY, self.history.entries());
    }

    // ── custom dorks ─────────────────────────────────────────────────────────

    /// Save the builder's last built query as a custom dork. Returns the new
    /// dork, or `None` when nothing has been built yet.
    #[tracing::instrument(skip(self, description))]
    pub fn save_custom(&mut self, title: &str, description: &str) -> Option<Dork> {
        let query = self.builder.built().trim();
        if query.is_empty() {
            return None;
        }
        let title = match title.trim() {
            "" => query,
            t => t,
        };

        let dork = Dork {
            id: format!("custom-{}", uuid::Uuid::new_v4()),
            title: title.to_string(),
            description: description.to_string(),
            query: query.to_string(),
            category: Category::Custom,
            vulnerability_type: None,
            severity: Severity::Info,
            platform: None,
            tags: vec!["custom".to_string()],
            examples: None,
            references: None,
        };
        self.custom.push(CustomDork {
            dork: dork.clone(),
            created_at: now_rfc3339(),
        });
        self.catalog.extend([dork.clone()]);
        save_json(self.store.as_mut(), CUSTOM_DORKS_KEY, &self.custom);
        tracing::info!(id = %dork.id, "saved custom dork");
        Some(dork)
    }

    pub fn custom_dorks(&self) -> &[CustomDork] {
        &self.custom
    }

    // ── export / stats ───────────────────────────────────────────────────────

    pub fn favorites_collection(&self) -> DorkCollection {
        let now = now_rfc3339();
        DorkCollection {
            name: "Favorites".to_string(),
            description: format!("{} favorited dorks", self.favorites.len()),
            dorks: self.favorite_dorks().into_iter().cloned().collect(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn export_favorites(&self, format: ExportFormat) -> String {
        let collection = self.favorites_collection();
        match format {
            ExportFormat::Yaml => serde_yaml::to_string(&collection)
                .unwrap_or_else(|e| format!("YAML formatting error: {}", e)),
            ExportFormat::Json => serde_json::to_string_pretty(&collection)
                .unwrap_or_else(|e| format!("JSON formatting error: {}", e)),
        }
    }

    pub fn stats(&self) -> Stats {
        Stats {
            total: self.catalog.len(),
            filtered: self.visible().len(),
            targets: self.targets.len(),
            favorites: self.favorites.len(),
        }
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dork::sample;

    fn session() -> Session {
        let mut wp = sample("cms-1", Category::CmsPlatforms, Severity::Critical);
        wp.query = "site:{DOMAIN} inurl:wp-config.php".to_string();
        let mut plugins = sample("cms-2", Category::CmsPlatforms, Severity::Info);
        plugins.tags = vec!["wordpress".to_string()];
        let db = sample("db-1", Category::Databases, Severity::High);

        let catalog = Catalog::new(vec![wp, plugins, db]).unwrap();
        Session::with_store(
            SessionConfig::default(),
            catalog,
            Box::new(MemoryStore::default()),
        )
    }

    #[test]
    fn test_open_builtin_session() {
        let session = Session::open(SessionConfig::default()).unwrap();
        assert_eq!(session.stats().total, session.catalog().len());
        assert_eq!(session.stats().filtered, session.catalog().len());
    }

    #[test]
    fn test_filter_and_stats() {
        let mut session = session();
        session.apply_preset(Preset::Wordpress);
        let ids: Vec<&str> = session.visible().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["cms-2"]);

        session.targets.add_batch("a.com, b.com");
        session.toggle_favorite("db-1");
        assert_eq!(
            session.stats(),
            Stats {
                total: 3,
                filtered: 1,
                targets: 2,
                favorites: 1
            }
        );

        session.clear_filters();
        assert_eq!(session.visible().len(), 3);
    }

    #[test]
    fn test_rows_carry_rendered_targets() {
        let mut session = session();
        session.targets.add_batch("example.com");
        session.toggle_severity(Severity::Critical);

        let rows = session.visible_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rendered[0].query, "site:example.com inurl:wp-config.php");
        assert!(!rows[0].favorite);
    }

    #[test]
    fn test_favorite_rows_follow_catalog_order() {
        let mut session = session();
        session.toggle_favorite("db-1");
        session.toggle_favorite("cms-1");
        let ids: Vec<String> = session.favorite_rows().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["cms-1", "db-1"]);
    }

    #[test]
    fn test_copy_marks_ack() {
        let mut session = session();
        assert_eq!(
            session.copy("cms-1", Some("example.com")).as_deref(),
            Some("site:example.com inurl:wp-config.php")
        );
        assert!(session.is_copied("cms-1"));
        assert_eq!(
            session.copy("cms-1", None).as_deref(),
            Some("site:{DOMAIN} inurl:wp-config.php")
        );
        assert_eq!(session.copy("missing", None), None);
    }

    #[test]
    fn test_search_records_history() {
        let mut session = session();
        let url = session.search("cms-1", "example.com").unwrap();
        assert_eq!(
            url,
            "https://www.google.com/search?q=site%3Aexample.com%20inurl%3Awp-config.php"
        );
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].dork_id, "cms-1");
        assert!(session.search("missing", "example.com").is_none());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_save_custom_from_builder() {
        let mut session = session();
        assert!(session.save_custom("Nothing", "").is_none());

        session
            .builder
            .update(0, crate::builder::PartField::Value("example.com".into()));
        session.builder.build();
        let dork = session.save_custom("", "my query").unwrap();

        assert!(dork.id.starts_with("custom-"));
        assert_eq!(dork.title, "site:example.com");
        assert_eq!(dork.category, Category::Custom);
        assert_eq!(session.catalog().len(), 4);
        assert_eq!(session.custom_dorks().len(), 1);
        assert!(session.builder_search_url().is_some());
    }

    #[test]
    fn test_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let config = SessionConfig {
            data_dir: Some(dir.path().display().to_string()),
            ..Default::default()
        };
        {
            let mut session = Session::open(config.clone()).unwrap();
            session.toggle_favorite("ef-001");
            session.search("ef-001", "example.com");
            session.builder.use_template("Find SQL Files");
            session.save_custom("SQL files", "");
        }

        let session = Session::open(config).unwrap();
        assert!(session.is_favorite("ef-001"));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.custom_dorks().len(), 1);
        let custom_id = &session.custom_dorks()[0].dork.id;
        assert!(session.catalog().get(custom_id).is_some());
    }

    #[test]
    fn test_export_formats() {
        let mut session = session();
        session.toggle_favorite("db-1");

        let json = session.export_favorites(ExportFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["dorks"][0]["id"], "db-1");

        let yaml = session.export_favorites("YAML".parse().unwrap());
        assert!(yaml.contains("name: Favorites"));
        assert!(yaml.contains("id: db-1"));

        assert!("csv".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_one_store_backs_all_state() {
        let mut store = MemoryStore::default();
        store.set("favorites", r#"["cms-2"]"#).unwrap();
        let seeded = serde_json::json!([{
            "id": "h1",
            "domain": "a.com",
            "dork_id": "cms-2",
            "timestamp": "2024-01-01T00:00:00Z",
        }]);
        store.set("search-history", &seeded.to_string()).unwrap();

        let mut session =
            Session::with_store(SessionConfig::default(), session().catalog, Box::new(store));
        assert!(session.is_favorite("cms-2"));
        assert_eq!(session.history()[0].domain, "a.com");

        session.toggle_favorite("db-1");
        session.search("db-1", "b.com");
        assert_eq!(
            session.store.get("favorites").as_deref(),
            Some(r#"["cms-2","db-1"]"#)
        );
        let history: Vec<SearchHistoryEntry> = load_json(session.store.as_ref(), HISTORY_KEY);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].domain, "b.com");
    }
}
