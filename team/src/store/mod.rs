//! Roster gateway: every roster read and write goes through [`RosterStore`]

mod json;
mod memory;

pub use json::JsonRosterStore;
pub use memory::MemoryRosterStore;

use async_trait::async_trait;
use duel_battle::Creature;
use duel_protocol::{DuelError, ErrorKind};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid player name for storage: {0:?}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<StoreError> for DuelError {
    fn from(err: StoreError) -> Self {
        DuelError::with_detail(ErrorKind::Storage, err.to_string())
    }
}

/// Persistent rosters, keyed by player name
///
/// A player with no stored roster has an empty one. Saves replace the whole
/// roster; concurrent saves for the same player are last-write-wins.
#[async_trait]
pub trait RosterStore: Send + Sync {
    async fn load(&self, player: &str) -> Result<Vec<Creature>, StoreError>;

    async fn save(&self, player: &str, roster: &[Creature]) -> Result<(), StoreError>;
}
