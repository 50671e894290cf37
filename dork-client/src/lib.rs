// lib.rs
use mlua::prelude::*;
use mlua::Lua;
use std::backtrace::Backtrace;
use std::panic;
use tracing::error;

use crate::cmd::builder::{build, operators, quick_templates, suggestions};
use crate::cmd::catalog::{
    categories, category_counts, favorites, filter, get_catalog, severities, severity_counts,
};
use crate::cmd::render::{get_search_url, render, render_many};
use crate::session::new_session;

cfg_if::cfg_if! {
    if #[cfg(feature = "telemetry")] {
        use dork_telemetry as logging;
    } else {
        mod log;
        use log as logging;
    }
}

mod cmd;
mod session;
mod structs;

#[mlua::lua_module(skip_memory_check)]
fn dork_client(lua: &Lua) -> LuaResult<mlua::Table> {
    let exports = lua.create_table()?;
    exports.set(
        "init_logging",
        lua.create_function(|_, (path, endpoint): (String, Option<String>)| {
            let endpoint = endpoint.unwrap_or_else(|| "http://localhost:4317".to_string());
            logging::setup_logger(&path, &endpoint)
                .map_err(|e| LuaError::external(format!("{:?}", e)))?;
            Ok(())
        })?,
    )?;

    let default = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let bt = Backtrace::force_capture();
        error!(target: "panic",
               "panic: {panic_info}\n\nBacktrace:\n{bt}");
        default(panic_info);
    }));

    exports.set("catalog", lua.create_function(get_catalog)?)?;
    exports.set("filter", lua.create_function(filter)?)?;
    exports.set("favorites", lua.create_function(favorites)?)?;
    exports.set("categories", lua.create_function(categories)?)?;
    exports.set("severities", lua.create_function(severities)?)?;
    exports.set("category_counts", lua.create_function(category_counts)?)?;
    exports.set("severity_counts", lua.create_function(severity_counts)?)?;

    exports.set("render", lua.create_function(render)?)?;
    exports.set("render_all", lua.create_function(render_many)?)?;
    exports.set("search_url", lua.create_function(get_search_url)?)?;

    exports.set("build_query", lua.create_function(build)?)?;
    exports.set("operators", lua.create_function(operators)?)?;
    exports.set("quick_templates", lua.create_function(quick_templates)?)?;
    exports.set("suggestions", lua.create_function(suggestions)?)?;

    exports.set("new_session", lua.create_function(new_session)?)?;

    Ok(exports)
}
