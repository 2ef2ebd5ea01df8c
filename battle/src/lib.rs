//! Battle engine and domain types for the duel creature-battle service.
//!
//! This crate holds everything with real state in the service: creatures,
//! battle snapshots, the turn resolver and the experience engine. It performs
//! no I/O; randomness is always passed in so callers (and tests) control it.
//!
//! # Overview
//!
//! `duel-battle` sits between `duel-protocol` (wire format) and the server:
//!
//! ```text
//! duel-protocol (wire format)
//!        │
//!        ▼
//! duel-battle (domain types + engine) ← THIS CRATE
//!        │
//!        ├─> duel-team (roster persistence)
//!        └─> duel-server (session registry + dispatcher)
//! ```
//!
//! # Main Types
//!
//! - [`Creature`] - a battling creature with stats, level and experience
//! - [`Side`] - one player's committed snapshot in a battle
//! - [`Battle`] - battle state machine (`AwaitingAction` → `Concluded`)
//! - [`TurnOutcome`] - what an accepted action did
//! - [`experience`] - leveling, battle rewards and donation
//!
//! # Example Usage
//!
//! ```ignore
//! use duel_battle::{Battle, BattleId, Side, TurnAction};
//!
//! let mut rng = rand::thread_rng();
//! let mut battle = Battle::new(BattleId::generate(&mut rng), ash_side, gary_side);
//!
//! let outcome = battle.apply("ash", &TurnAction::Attack, &mut rng)?;
//! if battle.is_concluded() {
//!     battle.award_experience(&mut rng);
//! }
//! ```

pub mod engine;
pub mod experience;
pub mod query;
pub mod types;

// Re-export main types at crate root for convenience
pub use engine::{
    AttackKind, Battle, BattleError, BattleId, BattleState, TurnOutcome, compute_damage,
};
pub use experience::{Donation, ExperienceError, distribute_battle_exp, donate, level_up};
pub use query::{Neutral, TypeEffectiveness, shares_type};
pub use types::{Creature, Side, Stats};

// Re-export commonly used protocol types
pub use duel_protocol::{Stat, TurnAction};
