use std::collections::HashSet;
use std::str::FromStr;
use std::sync::OnceLock;

use dork_core::dork::{Category, Severity};
use dork_core::error::ParseError;
use dork_core::filter::{favorite_dorks, filter_dorks, FilterRequest};
use dork_core::render::{DEFAULT_PLACEHOLDER, DEFAULT_SEARCH_URL};
use dork_core::row::{DorkRow, RowContext};
use dork_core::{Catalog, Dork};
use mlua::prelude::*;
use serde::Serialize;

static CATALOG: OnceLock<Catalog> = OnceLock::new();

/// The shipped catalog, parsed once per process.
pub fn builtin() -> LuaResult<&'static Catalog> {
    if let Some(catalog) = CATALOG.get() {
        return Ok(catalog);
    }
    let catalog = Catalog::builtin().map_err(LuaError::external)?;
    Ok(CATALOG.get_or_init(|| catalog))
}

#[derive(Serialize)]
struct Chip {
    value: &'static str,
    label: &'static str,
}

fn to_rows(dorks: Vec<&Dork>, args: &FilterRequest) -> Vec<DorkRow> {
    let favorites: HashSet<&str> = args.favorites.iter().map(String::as_str).collect();
    let is_favorite = |id: &str| favorites.contains(id);
    let is_copied = |_: &str| false;
    let ctx = RowContext {
        placeholder: DEFAULT_PLACEHOLDER,
        search_url: DEFAULT_SEARCH_URL,
        targets: &args.targets,
        is_favorite: &is_favorite,
        is_copied: &is_copied,
    };
    dorks.into_iter().map(|d| DorkRow::build(d, &ctx)).collect()
}

fn parse_args(json: Option<String>) -> LuaResult<FilterRequest> {
    match json.as_deref().map(str::trim) {
        None | Some("") => Ok(FilterRequest::default()),
        Some(s) => {
            serde_json::from_str(s).map_err(|e| LuaError::external(format!("bad json: {e}")))
        }
    }
}

#[tracing::instrument]
pub fn get_catalog(_lua: &Lua, _args: ()) -> LuaResult<String> {
    serde_json::to_string(builtin()?.dorks()).map_err(LuaError::external)
}

/// Stateless filter over the shipped catalog.
#[tracing::instrument]
pub fn filter(_lua: &Lua, json: Option<String>) -> LuaResult<String> {
    let args = parse_args(json)?;
    let catalog = builtin()?;
    let rows = to_rows(filter_dorks(catalog.dorks(), &args.state), &args);
    serde_json::to_string(&rows).map_err(LuaError::external)
}

#[tracing::instrument]
pub fn favorites(_lua: &Lua, json: Option<String>) -> LuaResult<String> {
    let args = parse_args(json)?;
    let ids: HashSet<String> = args.favorites.iter().cloned().collect();
    let catalog = builtin()?;
    let rows = to_rows(favorite_dorks(catalog.dorks(), &ids), &args);
    serde_json::to_string(&rows).map_err(LuaError::external)
}

pub fn category_counts(_lua: &Lua, _args: ()) -> LuaResult<String> {
    serde_json::to_string(&builtin()?.category_counts()).map_err(LuaError::external)
}

pub fn severity_counts(_lua: &Lua, _args: ()) -> LuaResult<String> {
    serde_json::to_string(&builtin()?.severity_counts()).map_err(LuaError::external)
}

/// Filter chips in display order. `custom` is not offered as a chip.
pub fn categories(_lua: &Lua, _args: ()) -> LuaResult<String> {
    let chips: Vec<Chip> = Category::ALL
        .iter()
        .filter(|c| **c != Category::Custom)
        .map(|c| Chip {
            value: c.as_str(),
            label: c.label(),
        })
        .collect();
    serde_json::to_string(&chips).map_err(LuaError::external)
}

pub fn severities(_lua: &Lua, _args: ()) -> LuaResult<String> {
    let chips: Vec<Chip> = Severity::ALL
        .iter()
        .map(|s| Chip {
            value: s.as_str(),
            label: s.label(),
        })
        .collect();
    serde_json::to_string(&chips).map_err(LuaError::external)
}

/// Parse a host-supplied name into one of the core enums.
pub fn parse<T>(s: &str) -> LuaResult<T>
where
    T: FromStr<Err = ParseError>,
{
    s.parse().map_err(LuaError::external)
}
