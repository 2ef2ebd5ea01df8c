//! Experience and leveling
//!
//! Experience reaches a creature two ways: as a share of the losing side's
//! experience when a battle concludes, or by donation from another creature
//! in the same roster. After every credit the creature levels up for as long
//! as its accumulated experience covers `level * 100`.

use duel_protocol::{DuelError, ErrorKind};
use rand::Rng;
use thiserror::Error;

use crate::types::Creature;

/// Experience consumed per level: a creature at level `n` needs `n * EXP_PER_LEVEL`
pub const EXP_PER_LEVEL: u32 = 100;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExperienceError {
    #[error("creature not found: {0}")]
    CreatureNotFound(String),

    #[error("{donor} and {recipient} share no type")]
    TypeMismatch { donor: String, recipient: String },

    #[error("{0} cannot donate to itself")]
    SameCreature(String),
}

impl From<ExperienceError> for DuelError {
    fn from(err: ExperienceError) -> Self {
        match err {
            ExperienceError::CreatureNotFound(name) => {
                DuelError::with_detail(ErrorKind::CreatureNotFound, name)
            }
            ExperienceError::TypeMismatch { donor, recipient } => {
                DuelError::with_detail(ErrorKind::TypeMismatch, format!("{donor}:{recipient}"))
            }
            ExperienceError::SameCreature(name) => {
                DuelError::with_detail(ErrorKind::Malformed, format!("{name} cannot donate to itself"))
            }
        }
    }
}

/// Result of a donation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Donation {
    /// Experience moved from donor to recipient
    pub transferred: u32,
    /// Levels the recipient gained
    pub levels_gained: u32,
}

/// Level a creature up while it has enough experience. Returns levels gained.
///
/// Each level-up consumes `level * 100` experience and scales every stat
/// except speed by a fresh factor in `[1.5, 2.0)`. Current HP is kept.
pub fn level_up<R: Rng + ?Sized>(creature: &mut Creature, rng: &mut R) -> u32 {
    let mut gained = 0;
    loop {
        let required = creature.level.saturating_mul(EXP_PER_LEVEL);
        if creature.accumulated_exp < required {
            break;
        }
        creature.accumulated_exp -= required;
        creature.level += 1;
        let ev: f64 = rng.gen_range(0.5..1.0);
        creature.stats.grow(1.0 + ev);
        gained += 1;
    }
    creature.hp = creature.hp.min(creature.max_hp());
    gained
}

/// Add experience to a creature and level it up. Returns levels gained.
pub fn credit<R: Rng + ?Sized>(creature: &mut Creature, amount: u32, rng: &mut R) -> u32 {
    creature.accumulated_exp = creature.accumulated_exp.saturating_add(amount);
    level_up(creature, rng)
}

/// Total experience held by a set of creatures
pub fn exp_pool<'a>(creatures: impl IntoIterator<Item = &'a Creature>) -> u64 {
    creatures
        .into_iter()
        .map(|c| u64::from(c.accumulated_exp))
        .sum()
}

/// Split `pool` evenly across `winners`, dropping the remainder.
///
/// Returns the share each winner received.
pub fn distribute<R: Rng + ?Sized>(winners: &mut [&mut Creature], pool: u64, rng: &mut R) -> u32 {
    if winners.is_empty() {
        return 0;
    }
    let share = (pool / winners.len() as u64).min(u64::from(u32::MAX)) as u32;
    for creature in winners.iter_mut() {
        credit(creature, share, rng);
    }
    share
}

/// Credit `winners` with an even split of the experience `losers` hold
pub fn distribute_battle_exp<R: Rng + ?Sized>(
    winners: &mut [Creature],
    losers: &[Creature],
    rng: &mut R,
) -> u32 {
    let pool = exp_pool(losers);
    let mut refs: Vec<&mut Creature> = winners.iter_mut().collect();
    distribute(&mut refs, pool, rng)
}

/// Move all of `donor`'s experience to `recipient` and remove the donor.
///
/// Both must be in `roster` and share at least one type tag. On error the
/// roster is left untouched.
pub fn donate<R: Rng + ?Sized>(
    roster: &mut Vec<Creature>,
    donor: &str,
    recipient: &str,
    rng: &mut R,
) -> Result<Donation, ExperienceError> {
    if donor == recipient {
        return Err(ExperienceError::SameCreature(donor.to_string()));
    }

    let donor_idx = roster
        .iter()
        .position(|c| c.name == donor)
        .ok_or_else(|| ExperienceError::CreatureNotFound(donor.to_string()))?;
    let recipient_idx = roster
        .iter()
        .position(|c| c.name == recipient)
        .ok_or_else(|| ExperienceError::CreatureNotFound(recipient.to_string()))?;

    if !roster[donor_idx].shares_type_with(&roster[recipient_idx]) {
        return Err(ExperienceError::TypeMismatch {
            donor: donor.to_string(),
            recipient: recipient.to_string(),
        });
    }

    let removed = roster.remove(donor_idx);
    let recipient_idx = if recipient_idx > donor_idx {
        recipient_idx - 1
    } else {
        recipient_idx
    };

    let transferred = removed.accumulated_exp;
    let levels_gained = credit(&mut roster[recipient_idx], transferred, rng);

    Ok(Donation {
        transferred,
        levels_gained,
    })
}
