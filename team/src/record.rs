//! On-disk shape of creatures, shared by catalog and roster files

use duel_battle::{Creature, Stat, Stats};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRecord {
    pub name: String,
    pub value: u32,
}

/// A creature as stored in `pokedex.json` or a roster file
///
/// Catalog entries only carry `name`, `type`, `base_exp` and `stats`; the
/// remaining fields default to a freshly captured creature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureRecord {
    pub name: String,

    #[serde(rename = "type", default)]
    pub types: Vec<String>,

    #[serde(default)]
    pub base_exp: u32,

    #[serde(default)]
    pub stats: Vec<StatRecord>,

    #[serde(default = "default_level")]
    pub level: u32,

    #[serde(default)]
    pub accumulated_exp: u32,

    /// Current HP; absent means full
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<u32>,
}

fn default_level() -> u32 {
    1
}

impl CreatureRecord {
    /// Collect the stat list into [`Stats`]; unknown stat names are skipped
    pub fn stats(&self) -> Stats {
        let mut stats = Stats::new();
        for record in &self.stats {
            match Stat::parse(&record.name) {
                Some(stat) => stats.set(stat, record.value),
                None => tracing::debug!(creature = %self.name, stat = %record.name, "skipping unknown stat"),
            }
        }
        stats
    }

    pub fn to_creature(&self) -> Creature {
        let stats = self.stats();
        let mut creature = Creature::new(self.name.clone(), self.types.clone(), stats);
        creature.hp = self.hp.unwrap_or(stats.hp).min(stats.hp);
        creature.level = self.level.max(1);
        creature.accumulated_exp = self.accumulated_exp;
        creature.base_exp = self.base_exp;
        creature
    }
}

impl From<&Creature> for CreatureRecord {
    fn from(creature: &Creature) -> Self {
        Self {
            name: creature.name.clone(),
            types: creature.types.clone(),
            base_exp: creature.base_exp,
            stats: Stat::ALL
                .iter()
                .map(|stat| StatRecord {
                    name: stat.as_str().to_string(),
                    value: creature.stats.get(*stat),
                })
                .collect(),
            level: creature.level,
            accumulated_exp: creature.accumulated_exp,
            hp: Some(creature.hp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_ENTRY: &str = r#"{
        "name": "bulbasaur",
        "type": ["grass", "poison"],
        "base_exp": 64,
        "stats": [
            {"name": "hp", "value": 45},
            {"name": "attack", "value": 49},
            {"name": "defense", "value": 49},
            {"name": "special-attack", "value": 65},
            {"name": "special-defense", "value": 65},
            {"name": "speed", "value": 45},
            {"name": "accuracy", "value": 100}
        ]
    }"#;

    #[test]
    fn test_catalog_entry_defaults() {
        let record: CreatureRecord = serde_json::from_str(CATALOG_ENTRY).unwrap();
        assert_eq!(record.level, 1);
        assert_eq!(record.accumulated_exp, 0);
        assert_eq!(record.hp, None);

        let creature = record.to_creature();
        assert_eq!(creature.types, vec!["grass", "poison"]);
        assert_eq!(creature.base_exp, 64);
        assert_eq!(creature.stats.special_attack, 65);
        // Captured at full health
        assert_eq!(creature.hp, 45);
        assert_eq!(creature.max_hp(), 45);
    }

    #[test]
    fn test_hp_clamped_to_max() {
        let mut record: CreatureRecord = serde_json::from_str(CATALOG_ENTRY).unwrap();
        record.hp = Some(500);
        assert_eq!(record.to_creature().hp, 45);
    }

    #[test]
    fn test_creature_record_preserves_progress() {
        let mut creature = serde_json::from_str::<CreatureRecord>(CATALOG_ENTRY)
            .unwrap()
            .to_creature();
        creature.level = 3;
        creature.accumulated_exp = 42;
        creature.hp = 0;

        let record = CreatureRecord::from(&creature);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""type":["grass","poison"]"#));
        assert!(json.contains(r#""special-defense""#));

        let restored = serde_json::from_str::<CreatureRecord>(&json)
            .unwrap()
            .to_creature();
        assert_eq!(restored, creature);
        assert!(restored.is_fainted());
    }
}
