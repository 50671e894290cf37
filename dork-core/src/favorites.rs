use std::collections::{BTreeSet, HashSet};

use crate::storage::{load_json, save_json, KeyValueStore};

pub const FAVORITES_KEY: &str = "favorites";

/// Membership test shared by the favorites filter and plain id sets.
pub trait ContainsId {
    fn contains_id(&self, id: &str) -> bool;
}

impl ContainsId for HashSet<String> {
    fn contains_id(&self, id: &str) -> bool {
        self.contains(id)
    }
}

impl ContainsId for BTreeSet<String> {
    fn contains_id(&self, id: &str) -> bool {
        self.contains(id)
    }
}

/// Favorited dork ids.
///
/// `initialize` reads the persisted set once from the injected store; every
/// `toggle` is followed by `on_change`, which writes the whole set back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    ids: BTreeSet<String>,
}

impl Favorites {
    #[tracing::instrument(skip(store))]
    pub fn initialize(store: &dyn KeyValueStore) -> Self {
        let stored: Vec<String> = load_json(store, FAVORITES_KEY);
        let ids: BTreeSet<String> = stored.into_iter().collect();
        tracing::debug!(count = ids.len(), "favorites loaded");
        Self { ids }
    }

    /// Flip membership of `id` and persist. Returns whether `id` is now a
    /// favorite.
    pub fn toggle(&mut self, id: &str, store: &mut dyn KeyValueStore) -> bool {
        let now_favorite = if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        };
        self.on_change(store);
        now_favorite
    }

    fn on_change(&self, store: &mut dyn KeyValueStore) {
        let ids: Vec<&String> = self.ids.iter().collect();
        save_json(store, FAVORITES_KEY, &ids);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &BTreeSet<String> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl ContainsId for Favorites {
    fn contains_id(&self, id: &str) -> bool {
        self.contains(id)
    }
}
