//! Roster listing types
//!
//! These types represent the JSON payload of a `roster:` response.

use serde::{Deserialize, Serialize};

/// One creature in a player's roster, as shown to its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureSummary {
    /// Creature name (unique within the roster)
    pub name: String,

    /// Elemental type tags
    #[serde(default)]
    pub types: Vec<String>,

    /// Level (1 and up)
    pub level: u32,

    /// Current HP
    pub hp: u32,

    /// Maximum HP
    pub max_hp: u32,

    /// Unspent experience
    pub accumulated_exp: u32,

    pub attack: u32,
    pub special_attack: u32,
    pub defense: u32,
    pub special_defense: u32,
    pub speed: u32,
}
