//! In-memory roster store

use std::collections::HashMap;

use async_trait::async_trait;
use duel_battle::Creature;
use tokio::sync::RwLock;

use super::{RosterStore, StoreError};

/// Rosters held in process memory; nothing survives a restart
#[derive(Debug, Default)]
pub struct MemoryRosterStore {
    rosters: RwLock<HashMap<String, Vec<Creature>>>,
}

impl MemoryRosterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RosterStore for MemoryRosterStore {
    async fn load(&self, player: &str) -> Result<Vec<Creature>, StoreError> {
        Ok(self
            .rosters
            .read()
            .await
            .get(player)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(&self, player: &str, roster: &[Creature]) -> Result<(), StoreError> {
        self.rosters
            .write()
            .await
            .insert(player.to_string(), roster.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_battle::Stats;

    #[tokio::test]
    async fn test_roundtrip() {
        let store = MemoryRosterStore::new();
        assert!(store.load("ash").await.unwrap().is_empty());

        let roster = vec![Creature::new("pikachu", vec!["electric".into()], Stats::new())];
        store.save("ash", &roster).await.unwrap();
        assert_eq!(store.load("ash").await.unwrap(), roster);
        assert!(store.load("gary").await.unwrap().is_empty());
    }
}
