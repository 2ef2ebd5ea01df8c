//! Battle - per-battle state machine

use rand::{Rng, RngCore};

use crate::experience;
use crate::types::Side;

/// Opaque battle identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BattleId(pub String);

impl BattleId {
    /// Draw a fresh random identifier (16 hex digits)
    pub fn generate<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Self(format!("{:016x}", rng.next_u64()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BattleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Battle lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleState {
    /// Waiting for the current mover to act
    AwaitingAction,
    /// Terminal: one side won (index into the sides array)
    Concluded { winner: usize },
}

/// A battle between two players
///
/// Each side holds a snapshot of the creatures it committed. `turn` indexes
/// the side whose player must act next. Side 0 is the initiating player and
/// moves first.
#[derive(Debug, Clone)]
pub struct Battle {
    id: BattleId,

    pub(crate) sides: [Side; 2],

    /// Index of the side whose turn it is
    pub(crate) turn: usize,

    pub(crate) state: BattleState,

    /// Whether the winners have already been credited
    exp_awarded: bool,
}

impl Battle {
    /// Create a battle; `initiator` moves first
    pub fn new(id: BattleId, initiator: Side, opponent: Side) -> Self {
        Self {
            id,
            sides: [initiator, opponent],
            turn: 0,
            state: BattleState::AwaitingAction,
            exp_awarded: false,
        }
    }

    pub fn id(&self) -> &BattleId {
        &self.id
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    /// Check if the battle has ended
    pub fn is_concluded(&self) -> bool {
        matches!(self.state, BattleState::Concluded { .. })
    }

    /// Name of the player who must act next
    pub fn current_mover(&self) -> &str {
        &self.sides[self.turn].player
    }

    /// Get a side by index (0 = initiator, 1 = opponent)
    pub fn side(&self, index: usize) -> Option<&Side> {
        self.sides.get(index)
    }

    /// Iterate over both sides
    pub fn sides(&self) -> impl Iterator<Item = &Side> {
        self.sides.iter()
    }

    /// Find which side a player is on
    pub fn side_of(&self, player: &str) -> Option<usize> {
        self.sides.iter().position(|s| s.player == player)
    }

    /// Names of both players
    pub fn players(&self) -> [&str; 2] {
        [&self.sides[0].player, &self.sides[1].player]
    }

    /// Winner's side, once concluded
    pub fn winner(&self) -> Option<&Side> {
        match self.state {
            BattleState::Concluded { winner } => self.sides.get(winner),
            BattleState::AwaitingAction => None,
        }
    }

    /// Loser's side, once concluded
    pub fn loser(&self) -> Option<&Side> {
        match self.state {
            BattleState::Concluded { winner } => self.sides.get(1 - winner),
            BattleState::AwaitingAction => None,
        }
    }

    pub(crate) fn flip_turn(&mut self) {
        self.turn = 1 - self.turn;
    }

    pub(crate) fn conclude(&mut self, winner: usize) {
        self.state = BattleState::Concluded { winner };
    }

    /// Credit the winning side with the losing side's experience.
    ///
    /// Runs at most once per battle; returns the per-creature share, or
    /// `None` if the battle is still running or was already settled.
    pub fn award_experience<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<u32> {
        let BattleState::Concluded { winner } = self.state else {
            return None;
        };
        if self.exp_awarded {
            return None;
        }
        self.exp_awarded = true;

        let pool = experience::exp_pool(self.sides[1 - winner].committed());
        let mut winners: Vec<_> = self.sides[winner].committed_mut().collect();
        Some(experience::distribute(&mut winners, pool, rng))
    }
}
