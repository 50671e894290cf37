//! Host-facing projection of a dork.
//!
//! Rows carry everything a card needs: labels, favorite/copied flags and the
//! query rendered for each target along with its search URL.

use serde::Serialize;

use crate::dork::{Category, Dork, Severity};
use crate::render::{render_with, search_url};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedQuery {
    pub target: String,
    pub query: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DorkRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub query: String,
    pub category: Category,
    pub category_label: &'static str,
    pub severity: Severity,
    pub severity_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    pub tags: Vec<String>,
    pub favorite: bool,
    pub copied: bool,
    pub rendered: Vec<RenderedQuery>,
}

/// Per-call inputs for building rows.
pub struct RowContext<'a> {
    pub placeholder: &'a str,
    pub search_url: &'a str,
    pub targets: &'a [String],
    pub is_favorite: &'a dyn Fn(&str) -> bool,
    pub is_copied: &'a dyn Fn(&str) -> bool,
}

impl DorkRow {
    pub fn build(dork: &Dork, ctx: &RowContext<'_>) -> Self {
        let rendered = ctx
            .targets
            .iter()
            .map(|target| {
                let query = render_with(&dork.query, ctx.placeholder, target);
                RenderedQuery {
                    target: target.clone(),
                    url: search_url(ctx.search_url, &query),
                    query,
                }
            })
            .collect();

        Self {
            id: dork.id.clone(),
            title: dork.title.clone(),
            description: dork.description.clone(),
            query: dork.query.clone(),
            category: dork.category,
            category_label: dork.category.label(),
            severity: dork.severity,
            severity_label: dork.severity.label(),
            platform: dork.platform.clone(),
            tags: dork.tags.clone(),
            favorite: (ctx.is_favorite)(&dork.id),
            copied: (ctx.is_copied)(&dork.id),
            rendered,
        }
    }
}
