//! Session registry: registered players and running battles
//!
//! The tables live behind a single `std::sync::Mutex` that is never held
//! across an `.await`. Each battle has its own `tokio::sync::Mutex` so turns
//! in one battle never wait on another. When both are needed the battle lock
//! is taken first.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use duel_battle::{Battle, BattleId, Creature, Side};
use duel_protocol::{DuelError, ErrorKind};
use duel_team::{RosterStore, StoreError};
use thiserror::Error;
use tracing::info;

/// Creatures each side commits to a battle
pub const BATTLE_TEAM_SIZE: usize = 3;

pub type SharedBattle = Arc<tokio::sync::Mutex<Battle>>;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("player already registered: {0}")]
    AlreadyRegistered(String),

    #[error("unknown player: {0}")]
    UnknownPlayer(String),

    #[error("player already in battle: {0}")]
    AlreadyInBattle(String),

    #[error("{player} has {available} battle-ready creatures, needs {}", BATTLE_TEAM_SIZE)]
    InsufficientRoster { player: String, available: usize },

    #[error("{0} is not in a battle")]
    BattleNotFound(String),

    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl From<RegistryError> for DuelError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::AlreadyRegistered(player) => {
                DuelError::with_detail(ErrorKind::AlreadyRegistered, player)
            }
            RegistryError::UnknownPlayer(player) => {
                DuelError::with_detail(ErrorKind::UnknownPlayer, player)
            }
            RegistryError::AlreadyInBattle(player) => {
                DuelError::with_detail(ErrorKind::AlreadyInBattle, player)
            }
            RegistryError::InsufficientRoster { player, .. } => {
                DuelError::with_detail(ErrorKind::InsufficientRoster, player)
            }
            RegistryError::BattleNotFound(player) => {
                DuelError::with_detail(ErrorKind::BattleNotFound, player)
            }
            RegistryError::Invalid(detail) => DuelError::with_detail(ErrorKind::Malformed, detail),
            RegistryError::Storage(err) => err.into(),
        }
    }
}

#[derive(Default)]
struct Tables {
    players: HashSet<String>,
    player_battles: HashMap<String, BattleId>,
    battles: HashMap<BattleId, SharedBattle>,
}

impl Tables {
    /// Both players must be registered and free; unknown players are reported first
    fn check_available(&self, players: [&str; 2]) -> Result<(), RegistryError> {
        if let Some(player) = players.iter().find(|p| !self.players.contains(**p)) {
            return Err(RegistryError::UnknownPlayer(player.to_string()));
        }
        if let Some(player) = players.iter().find(|p| self.player_battles.contains_key(**p)) {
            return Err(RegistryError::AlreadyInBattle(player.to_string()));
        }
        Ok(())
    }
}

pub struct SessionRegistry {
    tables: Mutex<Tables>,
    store: Arc<dyn RosterStore>,
}

impl SessionRegistry {
    pub fn new(store: Arc<dyn RosterStore>) -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            store,
        }
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        // Tables are only mutated through complete insert/remove calls
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register(&self, name: &str) -> Result<(), RegistryError> {
        if name.trim().is_empty() {
            return Err(RegistryError::Invalid("player name is empty".to_string()));
        }
        if !self.tables().players.insert(name.to_string()) {
            return Err(RegistryError::AlreadyRegistered(name.to_string()));
        }
        info!(player = %name, "player registered");
        Ok(())
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.tables().players.contains(name)
    }

    pub fn in_battle(&self, name: &str) -> bool {
        self.tables().player_battles.contains_key(name)
    }

    pub fn player_count(&self) -> usize {
        self.tables().players.len()
    }

    pub fn battle_count(&self) -> usize {
        self.tables().battles.len()
    }

    /// Start a battle between `initiator` and `opponent`.
    ///
    /// Each side commits the first three non-fainted creatures of its roster.
    /// The initiator moves first. Both players are checked again when the
    /// battle is installed, so two racing starts cannot put a player in two
    /// battles.
    pub async fn begin_battle(
        &self,
        initiator: &str,
        opponent: &str,
    ) -> Result<(BattleId, String), RegistryError> {
        if initiator == opponent {
            return Err(RegistryError::Invalid(format!(
                "{initiator} cannot battle themselves"
            )));
        }
        self.tables().check_available([initiator, opponent])?;

        let initiator_side = self.snapshot(initiator).await?;
        let opponent_side = self.snapshot(opponent).await?;

        let id = {
            let mut tables = self.tables();
            tables.check_available([initiator, opponent])?;

            let mut rng = rand::thread_rng();
            let mut id = BattleId::generate(&mut rng);
            while tables.battles.contains_key(&id) {
                id = BattleId::generate(&mut rng);
            }

            let battle = Battle::new(id.clone(), initiator_side, opponent_side);
            tables
                .battles
                .insert(id.clone(), Arc::new(tokio::sync::Mutex::new(battle)));
            tables
                .player_battles
                .insert(initiator.to_string(), id.clone());
            tables.player_battles.insert(opponent.to_string(), id.clone());
            id
        };

        info!(battle = %id, initiator = %initiator, opponent = %opponent, "battle started");
        Ok((id, initiator.to_string()))
    }

    async fn snapshot(&self, player: &str) -> Result<Side, RegistryError> {
        let roster = self.store.load(player).await?;
        let committed: Vec<Creature> = roster
            .into_iter()
            .filter(|c| !c.is_fainted())
            .take(BATTLE_TEAM_SIZE)
            .collect();
        if committed.len() < BATTLE_TEAM_SIZE {
            return Err(RegistryError::InsufficientRoster {
                player: player.to_string(),
                available: committed.len(),
            });
        }
        Ok(Side::new(player, committed))
    }

    /// Battle the player is currently in
    pub fn battle_for(&self, player: &str) -> Result<(BattleId, SharedBattle), RegistryError> {
        let tables = self.tables();
        if !tables.players.contains(player) {
            return Err(RegistryError::UnknownPlayer(player.to_string()));
        }
        let id = tables
            .player_battles
            .get(player)
            .ok_or_else(|| RegistryError::BattleNotFound(player.to_string()))?;
        let battle = tables
            .battles
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::BattleNotFound(player.to_string()))?;
        Ok((id.clone(), battle))
    }

    /// Drop a battle and free both players. Ending an unknown battle is a no-op.
    pub fn end_battle(&self, id: &BattleId) -> Option<SharedBattle> {
        let mut tables = self.tables();
        let battle = tables.battles.remove(id)?;
        tables.player_battles.retain(|_, battle_id| battle_id != id);
        info!(battle = %id, "battle ended");
        Some(battle)
    }
}
