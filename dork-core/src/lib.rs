//! Catalog engine for the DorkGenius Neovim plugin.
//!
//! Everything here is synchronous and free of Lua types: the `dork-client`
//! crate wraps it for the editor.
//!
//! ```text
//! Catalog ──► filter::filter_dorks(FilterState) ──► visible dorks
//!    │                                                 │
//!    └──► filter::favorite_dorks(Favorites)            ▼
//!                                      render::render_with(placeholder, target)
//!                                                      │
//!                                                      ▼
//!                                           render::search_url(base)
//! ```

pub mod ack;
pub mod builder;
pub mod catalog;
pub mod config;
pub mod dork;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod history;
pub mod render;
pub mod row;
pub mod session;
pub mod stats;
pub mod storage;
pub mod targets;

pub use catalog::Catalog;
pub use config::SessionConfig;
pub use dork::{Category, Dork, Severity};
pub use error::{CatalogError, ParseError, StorageError};
pub use filter::{filter_dorks, FilterState, Preset};
pub use render::{render, render_with};
pub use session::Session;
