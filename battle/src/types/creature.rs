//! Creature state

use duel_protocol::CreatureSummary;

use super::stats::Stats;
use crate::query::shares_type;

/// A battling creature owned by a player
///
/// `name` is the identity key within a roster. HP always stays within
/// `0..=stats.hp`; a creature at 0 HP is fainted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creature {
    /// Name (unique within its roster)
    pub name: String,

    /// Elemental type tags (one or more)
    pub types: Vec<String>,

    /// Base stats; `stats.hp` is the maximum HP
    pub stats: Stats,

    /// Current HP
    pub hp: u32,

    /// Level (1 and up)
    pub level: u32,

    /// Unspent experience, consumed on leveling
    pub accumulated_exp: u32,

    /// Catalog base experience (informational)
    pub base_exp: u32,
}

impl Creature {
    /// Create a freshly captured creature at level 1 with full HP
    pub fn new(name: impl Into<String>, types: Vec<String>, stats: Stats) -> Self {
        Self {
            name: name.into(),
            types,
            hp: stats.hp,
            stats,
            level: 1,
            accumulated_exp: 0,
            base_exp: 0,
        }
    }

    /// Maximum HP
    pub fn max_hp(&self) -> u32 {
        self.stats.hp
    }

    /// Check if the creature has fainted
    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    /// Subtract damage from HP, clamped at 0. Returns the remaining HP.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        self.hp = self.hp.saturating_sub(damage);
        self.hp
    }

    /// Check if this creature shares at least one type tag with another
    pub fn shares_type_with(&self, other: &Creature) -> bool {
        shares_type(&self.types, &other.types)
    }

    /// Summary shown to the owner in roster listings
    pub fn summary(&self) -> CreatureSummary {
        CreatureSummary {
            name: self.name.clone(),
            types: self.types.clone(),
            level: self.level,
            hp: self.hp,
            max_hp: self.max_hp(),
            accumulated_exp: self.accumulated_exp,
            attack: self.stats.attack,
            special_attack: self.stats.special_attack,
            defense: self.stats.defense,
            special_defense: self.stats.special_defense,
            speed: self.stats.speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulbasaur() -> Creature {
        Creature::new(
            "bulbasaur",
            vec!["grass".into(), "poison".into()],
            Stats {
                hp: 45,
                attack: 49,
                defense: 49,
                special_attack: 65,
                special_defense: 65,
                speed: 45,
            },
        )
    }

    #[test]
    fn test_new_creature() {
        let c = bulbasaur();
        assert_eq!(c.level, 1);
        assert_eq!(c.accumulated_exp, 0);
        assert_eq!(c.hp, 45);
        assert_eq!(c.max_hp(), 45);
        assert!(!c.is_fainted());
    }

    #[test]
    fn test_take_damage_clamps() {
        let mut c = bulbasaur();
        assert_eq!(c.take_damage(10), 35);
        assert_eq!(c.take_damage(100), 0);
        assert!(c.is_fainted());
    }

    #[test]
    fn test_shares_type_with() {
        let c = bulbasaur();
        let mut other = bulbasaur();
        other.types = vec!["poison".into()];
        assert!(c.shares_type_with(&other));

        other.types = vec!["fire".into()];
        assert!(!c.shares_type_with(&other));
    }

    #[test]
    fn test_summary() {
        let mut c = bulbasaur();
        c.hp = 20;
        let summary = c.summary();
        assert_eq!(summary.name, "bulbasaur");
        assert_eq!(summary.hp, 20);
        assert_eq!(summary.max_hp, 45);
        assert_eq!(summary.special_attack, 65);
    }
}
