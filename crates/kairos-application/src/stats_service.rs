use kairos_core::stats::DatabaseStats;
use kairos_core::{KairosApi, Result};
use std::sync::Arc;

use crate::require;

/// Reads backend database statistics.
#[derive(Clone)]
pub struct StatsService {
    api: Arc<dyn KairosApi>,
}

impl StatsService {
    pub fn new(api: Arc<dyn KairosApi>) -> Self {
        Self { api }
    }

    pub async fn get_stats(&self) -> Result<DatabaseStats> {
        let stats = self.api.stats().await?;
        require(stats, "Failed to get database stats")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockApi;

    #[tokio::test]
    async fn returns_stats_or_fails() {
        let api = Arc::new(MockApi::new());
        let service = StatsService::new(api.clone());

        assert!(service.get_stats().await.is_err());

        *api.stats.lock().unwrap() = Some(DatabaseStats {
            chat_history_count: 8,
            spellbook_memories_count: 2,
        });
        assert_eq!(service.get_stats().await.unwrap().chat_history_count, 8);
    }
}
