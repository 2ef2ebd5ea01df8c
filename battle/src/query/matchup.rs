//! Type matchup helpers

/// Damage multiplier applied from attacker and defender type tags.
///
/// No effectiveness table is defined for this game; [`Neutral`] is the
/// multiplier in use. Implement this trait to plug in a real chart.
pub trait TypeEffectiveness: Send + Sync {
    fn multiplier(&self, attacker_types: &[String], defender_types: &[String]) -> f64;
}

/// Every matchup is neutral (1x)
#[derive(Debug, Clone, Copy, Default)]
pub struct Neutral;

impl TypeEffectiveness for Neutral {
    fn multiplier(&self, _attacker_types: &[String], _defender_types: &[String]) -> f64 {
        1.0
    }
}

/// Check if two tag lists have at least one type in common (case-insensitive)
pub fn shares_type(a: &[String], b: &[String]) -> bool {
    a.iter()
        .any(|t1| b.iter().any(|t2| t1.eq_ignore_ascii_case(t2)))
}
