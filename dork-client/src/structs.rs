use dork_core::builder::QueryPart;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RenderAllArgs {
    pub query: String,
    #[serde(default)]
    pub targets: Vec<String>,
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildQueryArgs {
    #[serde(default)]
    pub parts: Vec<QueryPart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveCustomArgs {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}
