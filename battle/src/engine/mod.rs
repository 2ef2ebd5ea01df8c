//! Battle state machine and turn resolution

mod battle;
mod resolver;

pub use battle::{Battle, BattleId, BattleState};
pub use resolver::{AttackKind, BattleError, TurnOutcome, compute_damage};
