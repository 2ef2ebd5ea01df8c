//! One pretty-printed JSON file per player

use std::path::PathBuf;

use async_trait::async_trait;
use duel_battle::Creature;

use super::{RosterStore, StoreError};
use crate::record::CreatureRecord;

/// Stores each roster as `<dir>/<player>_pokemon.json`
#[derive(Debug, Clone)]
pub struct JsonRosterStore {
    dir: PathBuf,
}

impl JsonRosterStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File backing a player's roster
    pub fn path_for(&self, player: &str) -> Result<PathBuf, StoreError> {
        if player.is_empty()
            || player.contains(['/', '\\'])
            || player == "."
            || player == ".."
        {
            return Err(StoreError::InvalidKey(player.to_string()));
        }
        Ok(self.dir.join(format!("{player}_pokemon.json")))
    }
}

#[async_trait]
impl RosterStore for JsonRosterStore {
    async fn load(&self, player: &str) -> Result<Vec<Creature>, StoreError> {
        let path = self.path_for(player)?;
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let records: Vec<CreatureRecord> = serde_json::from_str(&raw)?;
        Ok(records.iter().map(CreatureRecord::to_creature).collect())
    }

    async fn save(&self, player: &str, roster: &[Creature]) -> Result<(), StoreError> {
        let path = self.path_for(player)?;
        let records: Vec<CreatureRecord> = roster.iter().map(CreatureRecord::from).collect();
        let json = serde_json::to_vec_pretty(&records)?;

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, json).await?;
        tracing::debug!(player, path = %path.display(), creatures = roster.len(), "roster saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_battle::Stats;

    fn creature(name: &str) -> Creature {
        Creature::new(
            name,
            vec!["fire".into()],
            Stats {
                hp: 39,
                attack: 52,
                ..Stats::new()
            },
        )
    }

    #[tokio::test]
    async fn test_missing_roster_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonRosterStore::new(dir.path());
        assert!(store.load("ash").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonRosterStore::new(dir.path());

        let mut charmander = creature("charmander");
        charmander.level = 2;
        charmander.accumulated_exp = 30;
        charmander.hp = 10;
        let roster = vec![charmander, creature("vulpix")];

        store.save("ash", &roster).await.unwrap();
        assert!(dir.path().join("ash_pokemon.json").exists());
        assert_eq!(store.load("ash").await.unwrap(), roster);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonRosterStore::new(dir.path());

        store.save("ash", &[creature("charmander")]).await.unwrap();
        store.save("ash", &[creature("vulpix")]).await.unwrap();

        let roster = store.load("ash").await.unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].name, "vulpix");
    }

    #[tokio::test]
    async fn test_rejects_path_like_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonRosterStore::new(dir.path());

        for name in ["../ash", "a/b", "a\\b", ""] {
            assert!(matches!(
                store.load(name).await,
                Err(StoreError::InvalidKey(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonRosterStore::new(dir.path());
        std::fs::write(dir.path().join("ash_pokemon.json"), "[{").unwrap();

        assert!(matches!(store.load("ash").await, Err(StoreError::Json(_))));
    }
}
