use serde::Serialize;

/// Counters for the stats panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub filtered: usize,
    pub targets: usize,
    pub favorites: usize,
}
