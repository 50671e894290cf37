use dork_core::builder::{PartField, Suggestion};
use dork_core::config::SessionConfig;
use dork_core::dork::{Category, Severity};
use dork_core::filter::Preset;
use dork_core::session::ExportFormat;
use dork_core::Session;
use mlua::{prelude::*, UserData, UserDataMethods};
use serde::Serialize;

use crate::cmd::catalog::parse;
use crate::structs::SaveCustomArgs;

/// Lua handle over one browsing session. Part indexes coming from Lua are
/// 1-based.
pub struct DorkSession {
    inner: Session,
}

impl DorkSession {
    #[tracing::instrument(skip(config))]
    pub fn open(config: Option<String>) -> LuaResult<Self> {
        let config = SessionConfig::from_json(config.as_deref())
            .map_err(|e| LuaError::external(format!("bad json: {e}")))?;
        let inner = Session::open(config).map_err(LuaError::external)?;
        Ok(Self { inner })
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> LuaResult<String> {
    serde_json::to_string(value).map_err(LuaError::external)
}

impl UserData for DorkSession {
    fn add_methods<M: UserDataMethods<Self>>(m: &mut M) {
        // filters
        m.add_method_mut("set_query", |_, this, query: String| {
            this.inner.set_query(&query);
            Ok(())
        });
        m.add_method_mut("toggle_category", |_, this, category: String| {
            this.inner.toggle_category(parse::<Category>(&category)?);
            Ok(())
        });
        m.add_method_mut("toggle_severity", |_, this, severity: String| {
            this.inner.toggle_severity(parse::<Severity>(&severity)?);
            Ok(())
        });
        m.add_method_mut("clear_filters", |_, this, ()| {
            this.inner.clear_filters();
            Ok(())
        });
        m.add_method_mut("apply_preset", |_, this, preset: String| {
            this.inner.apply_preset(parse::<Preset>(&preset)?);
            Ok(())
        });
        m.add_method("filter_state", |_, this, ()| to_json(&this.inner.filter));
        m.add_method("has_active_filters", |_, this, ()| {
            Ok(this.inner.filter.has_active_filters())
        });
        m.add_method("visible", |_, this, ()| to_json(&this.inner.visible_rows()));

        // favorites
        m.add_method("favorite_dorks", |_, this, ()| {
            to_json(&this.inner.favorite_rows())
        });
        m.add_method_mut("toggle_favorite", |_, this, id: String| {
            Ok(this.inner.toggle_favorite(&id))
        });
        m.add_method("is_favorite", |_, this, id: String| {
            Ok(this.inner.is_favorite(&id))
        });
        m.add_method("export_favorites", |_, this, format: Option<String>| {
            let format = parse::<ExportFormat>(format.as_deref().unwrap_or("json"))?;
            Ok(this.inner.export_favorites(format))
        });

        // targets
        m.add_method_mut("add_targets", |_, this, input: String| {
            Ok(this.inner.targets.add_batch(&input))
        });
        m.add_method_mut("remove_target", |_, this, domain: String| {
            Ok(this.inner.targets.remove(&domain))
        });
        m.add_method_mut("clear_targets", |_, this, ()| {
            this.inner.targets.clear();
            Ok(())
        });
        m.add_method("targets", |_, this, ()| {
            to_json(this.inner.targets.as_slice())
        });

        // builder
        m.add_method("builder_parts", |_, this, ()| {
            to_json(this.inner.builder.parts())
        });
        m.add_method_mut("builder_add", |_, this, ()| {
            this.inner.builder.add();
            Ok(())
        });
        m.add_method_mut("builder_remove", |_, this, index: usize| {
            Ok(this.inner.builder.remove_at(index))
        });
        m.add_method_mut(
            "builder_update",
            |_, this, (index, field, value): (usize, String, String)| {
                let field = PartField::parse(&field, value).map_err(LuaError::external)?;
                Ok(this.inner.builder.update_at(index, field))
            },
        );
        m.add_method_mut("builder_build", |_, this, ()| {
            Ok(this.inner.builder.build().to_string())
        });
        m.add_method("builder_built", |_, this, ()| {
            Ok(this.inner.builder.built().to_string())
        });
        m.add_method_mut(
            "builder_suggest",
            |_, this, (kind, value): (String, String)| {
                let kind = parse::<Suggestion>(&kind)?;
                Ok(this.inner.builder.suggest(kind, &value))
            },
        );
        m.add_method_mut("builder_template", |_, this, name: String| {
            Ok(this.inner.builder.use_template(&name).map(str::to_string))
        });
        m.add_method("builder_search_url", |_, this, ()| {
            Ok(this.inner.builder_search_url())
        });
        m.add_method_mut("save_custom", |_, this, json: Option<String>| {
            let args: SaveCustomArgs = match json {
                Some(json) => serde_json::from_str(&json)
                    .map_err(|e| LuaError::external(format!("bad json: {e}")))?,
                None => SaveCustomArgs::default(),
            };
            match this.inner.save_custom(&args.title, &args.description) {
                Some(dork) => to_json(&dork).map(Some),
                None => Ok(None),
            }
        });
        m.add_method("custom_dorks", |_, this, ()| {
            to_json(this.inner.custom_dorks())
        });

        // copy / search
        m.add_method_mut("copy", |_, this, (id, target): (String, Option<String>)| {
            Ok(this.inner.copy(&id, target.as_deref()))
        });
        m.add_method("is_copied", |_, this, id: String| Ok(this.inner.is_copied(&id)));
        m.add_method_mut("search", |_, this, (id, target): (String, String)| {
            Ok(this.inner.search(&id, &target))
        });
        m.add_method("history", |_, this, ()| to_json(this.inner.history()));
        m.add_method_mut("clear_history", |_, this, ()| {
            this.inner.clear_history();
            Ok(())
        });

        m.add_method("stats", |_, this, ()| to_json(&this.inner.stats()));
    }
}

pub fn new_session(_lua: &Lua, config: Option<String>) -> LuaResult<DorkSession> {
    DorkSession::open(config)
}
