//! Backend database statistics.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseStats {
    pub chat_history_count: u64,
    pub spellbook_memories_count: u64,
}

/// Response of `GET /stats`: the stats object or `{"stats": {...}}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StatsPayload {
    Bare(DatabaseStats),
    Envelope { stats: Option<DatabaseStats> },
}

impl StatsPayload {
    pub fn into_stats(self) -> Option<DatabaseStats> {
        match self {
            StatsPayload::Bare(stats) => Some(stats),
            StatsPayload::Envelope { stats } => stats,
        }
    }
}
