//! Turn resolution: applying one player action to a battle

use duel_protocol::{DuelError, ErrorKind, ServerResponse, Stat, TurnAction};
use rand::Rng;
use thiserror::Error;

use super::battle::{Battle, BattleState};
use crate::query::{Neutral, TypeEffectiveness};
use crate::types::Creature;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    #[error("it is {expected}'s turn")]
    NotYourTurn { expected: String },

    #[error("{0} is not part of this battle")]
    UnknownPlayer(String),

    #[error("creature not found in battle: {0}")]
    CreatureNotFound(String),

    #[error("battle already concluded")]
    Concluded,
}

impl From<BattleError> for DuelError {
    fn from(err: BattleError) -> Self {
        match err {
            BattleError::NotYourTurn { expected } => {
                DuelError::with_detail(ErrorKind::NotYourTurn, expected)
            }
            BattleError::UnknownPlayer(player) => {
                DuelError::with_detail(ErrorKind::UnknownPlayer, player)
            }
            BattleError::CreatureNotFound(name) => {
                DuelError::with_detail(ErrorKind::CreatureNotFound, name)
            }
            // A finished battle no longer exists as far as players are concerned
            BattleError::Concluded => DuelError::new(ErrorKind::BattleNotFound),
        }
    }
}

/// Normal attacks pit attack against defense, special attacks special-attack
/// against special-defense
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackKind {
    Normal,
    Special,
}

impl AttackKind {
    /// Offense and matching defense stat for this kind of attack
    pub fn stats(&self) -> (Stat, Stat) {
        match self {
            AttackKind::Normal => (Stat::Attack, Stat::Defense),
            AttackKind::Special => (Stat::SpecialAttack, Stat::SpecialDefense),
        }
    }
}

/// What an accepted action did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Defender's active creature was hit and is still standing
    Damage {
        kind: AttackKind,
        damage: u32,
        remaining_hp: u32,
    },
    /// Defender's active creature fainted; its side fights on
    Fainted {
        kind: AttackKind,
        damage: u32,
        name: String,
    },
    /// The acting side swapped in another creature
    Switched { name: String },
    /// The battle concluded
    Won { winner: String },
}

impl From<TurnOutcome> for ServerResponse {
    fn from(outcome: TurnOutcome) -> Self {
        match outcome {
            TurnOutcome::Damage {
                damage,
                remaining_hp,
                ..
            } => ServerResponse::Damage {
                damage,
                remaining_hp,
            },
            TurnOutcome::Fainted { name, .. } => ServerResponse::Fainted(name),
            TurnOutcome::Switched { name } => ServerResponse::Switched(name),
            TurnOutcome::Won { winner } => ServerResponse::Won(winner),
        }
    }
}

/// Damage dealt by one attack: `max(1, floor((offense - defense) * multiplier))`
pub fn compute_damage(
    attacker: &Creature,
    defender: &Creature,
    kind: AttackKind,
    effectiveness: &dyn TypeEffectiveness,
) -> u32 {
    let (offense, defense) = kind.stats();
    let raw = i64::from(attacker.stats.get(offense)) - i64::from(defender.stats.get(defense));
    let multiplier = effectiveness.multiplier(&attacker.types, &defender.types);
    let scaled = (raw as f64 * multiplier).floor() as i64;
    scaled.clamp(1, i64::from(u32::MAX)) as u32
}

impl Battle {
    /// Apply one action with neutral type effectiveness
    pub fn apply<R: Rng + ?Sized>(
        &mut self,
        actor: &str,
        action: &TurnAction,
        rng: &mut R,
    ) -> Result<TurnOutcome, BattleError> {
        self.apply_with(actor, action, &Neutral, rng)
    }

    /// Apply one action for `actor`.
    ///
    /// Rejected actions leave the battle untouched. Every accepted action that
    /// does not end the battle passes the turn to the other player, switches
    /// included.
    pub fn apply_with<R: Rng + ?Sized>(
        &mut self,
        actor: &str,
        action: &TurnAction,
        effectiveness: &dyn TypeEffectiveness,
        rng: &mut R,
    ) -> Result<TurnOutcome, BattleError> {
        if self.state != BattleState::AwaitingAction {
            return Err(BattleError::Concluded);
        }

        let acting = self
            .side_of(actor)
            .ok_or_else(|| BattleError::UnknownPlayer(actor.to_string()))?;

        if acting != self.turn {
            return Err(BattleError::NotYourTurn {
                expected: self.current_mover().to_string(),
            });
        }

        let outcome = match action {
            TurnAction::Attack => self.attack(acting, effectiveness, rng),
            TurnAction::SwitchTo(name) => {
                if !self.sides[acting].switch_to(name) {
                    return Err(BattleError::CreatureNotFound(name.clone()));
                }
                TurnOutcome::Switched { name: name.clone() }
            }
            TurnAction::Surrender => self.win(1 - acting),
        };

        if !self.is_concluded() {
            self.flip_turn();
        }

        Ok(outcome)
    }

    fn attack<R: Rng + ?Sized>(
        &mut self,
        acting: usize,
        effectiveness: &dyn TypeEffectiveness,
        rng: &mut R,
    ) -> TurnOutcome {
        let defending = 1 - acting;
        let kind = if rng.gen_bool(0.5) {
            AttackKind::Normal
        } else {
            AttackKind::Special
        };

        let damage = match (self.sides[acting].active(), self.sides[defending].active()) {
            (Some(attacker), Some(defender)) => {
                Some(compute_damage(attacker, defender, kind, effectiveness))
            }
            _ => None,
        };
        // Both rotations are non-empty while the battle is running
        let Some(damage) = damage else {
            return self.win(acting);
        };

        let defender_side = &mut self.sides[defending];
        let remaining_hp = defender_side
            .active_mut()
            .map_or(0, |defender| defender.take_damage(damage));

        if remaining_hp > 0 {
            return TurnOutcome::Damage {
                kind,
                damage,
                remaining_hp,
            };
        }

        let name = defender_side
            .retire_fainted_active()
            .map(|c| c.name.clone())
            .unwrap_or_default();

        if defender_side.all_fainted() {
            return self.win(acting);
        }

        TurnOutcome::Fainted { kind, damage, name }
    }

    fn win(&mut self, winner: usize) -> TurnOutcome {
        self.conclude(winner);
        TurnOutcome::Won {
            winner: self.sides[winner].player.clone(),
        }
    }
}
