use dork_core::render::{
    render_all, render_with, search_url, DEFAULT_PLACEHOLDER, DEFAULT_SEARCH_URL,
};
use mlua::prelude::*;

use crate::structs::RenderAllArgs;

pub fn render(_lua: &Lua, (query, target): (String, String)) -> LuaResult<String> {
    Ok(render_with(&query, DEFAULT_PLACEHOLDER, &target))
}

#[tracing::instrument]
pub fn render_many(_lua: &Lua, json: String) -> LuaResult<String> {
    let args: RenderAllArgs =
        serde_json::from_str(&json).map_err(|e| LuaError::external(format!("bad json: {e}")))?;
    let placeholder = args.placeholder.as_deref().unwrap_or(DEFAULT_PLACEHOLDER);
    let rendered = render_all(&args.query, placeholder, &args.targets);
    serde_json::to_string(&rendered).map_err(LuaError::external)
}

pub fn get_search_url(_lua: &Lua, (query, base): (String, Option<String>)) -> LuaResult<String> {
    Ok(search_url(base.as_deref().unwrap_or(DEFAULT_SEARCH_URL), &query))
}
