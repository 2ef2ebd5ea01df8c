//! Creature stats

use duel_protocol::Stat;

/// Base stats of a creature
///
/// `hp` is the maximum HP; current HP lives on the creature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
}

impl Stats {
    /// Create new stats (all at 0)
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a stat value
    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::SpecialAttack => self.special_attack,
            Stat::SpecialDefense => self.special_defense,
            Stat::Speed => self.speed,
        }
    }

    /// Set a stat value
    pub fn set(&mut self, stat: Stat, value: u32) {
        match stat {
            Stat::Hp => self.hp = value,
            Stat::Attack => self.attack = value,
            Stat::Defense => self.defense = value,
            Stat::SpecialAttack => self.special_attack = value,
            Stat::SpecialDefense => self.special_defense = value,
            Stat::Speed => self.speed = value,
        }
    }

    /// Multiply every stat except speed by `factor`, rounding down
    pub fn grow(&mut self, factor: f64) {
        for stat in Stat::ALL {
            if stat == Stat::Speed {
                continue;
            }
            let grown = (self.get(stat) as f64 * factor).floor();
            self.set(stat, grown.min(u32::MAX as f64) as u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Stats {
        Stats {
            hp: 45,
            attack: 49,
            defense: 49,
            special_attack: 65,
            special_defense: 65,
            speed: 45,
        }
    }

    #[test]
    fn test_get_set() {
        let mut stats = Stats::new();
        stats.set(Stat::SpecialAttack, 70);
        assert_eq!(stats.get(Stat::SpecialAttack), 70);
        assert_eq!(stats.special_attack, 70);
        assert_eq!(stats.get(Stat::Attack), 0);
    }

    #[test]
    fn test_grow_skips_speed() {
        let mut stats = sample();
        stats.grow(1.5);

        assert_eq!(stats.hp, 67);
        assert_eq!(stats.attack, 73);
        assert_eq!(stats.defense, 73);
        assert_eq!(stats.special_attack, 97);
        assert_eq!(stats.special_defense, 97);
        assert_eq!(stats.speed, 45);
    }

    #[test]
    fn test_grow_rounds_down() {
        let mut stats = Stats {
            attack: 3,
            ..Stats::new()
        };
        stats.grow(1.99);
        assert_eq!(stats.attack, 5);
    }
}
