use dork_core::builder::{
    build_query, Operator, FILE_TYPE_SUGGESTIONS, KEYWORD_SUGGESTIONS, QUICK_TEMPLATES,
};
use mlua::prelude::*;
use serde::Serialize;

use crate::structs::BuildQueryArgs;

#[derive(Serialize)]
struct OperatorInfo {
    value: &'static str,
    description: &'static str,
}

#[derive(Serialize)]
struct Template {
    name: &'static str,
    query: &'static str,
}

#[derive(Serialize)]
struct Suggestions {
    file_types: &'static [&'static str],
    keywords: &'static [&'static str],
}

#[tracing::instrument]
pub fn build(_lua: &Lua, json: String) -> LuaResult<String> {
    let args: BuildQueryArgs =
        serde_json::from_str(&json).map_err(|e| LuaError::external(format!("bad json: {e}")))?;
    Ok(build_query(&args.parts))
}

pub fn operators(_lua: &Lua, _args: ()) -> LuaResult<String> {
    let ops: Vec<OperatorInfo> = Operator::ALL
        .iter()
        .map(|op| OperatorInfo {
            value: op.token(),
            description: op.description(),
        })
        .collect();
    serde_json::to_string(&ops).map_err(LuaError::external)
}

pub fn quick_templates(_lua: &Lua, _args: ()) -> LuaResult<String> {
    let templates: Vec<Template> = QUICK_TEMPLATES
        .iter()
        .map(|(name, query)| Template { name, query })
        .collect();
    serde_json::to_string(&templates).map_err(LuaError::external)
}

pub fn suggestions(_lua: &Lua, _args: ()) -> LuaResult<String> {
    serde_json::to_string(&Suggestions {
        file_types: FILE_TYPE_SUGGESTIONS,
        keywords: KEYWORD_SUGGESTIONS,
    })
    .map_err(LuaError::external)
}
