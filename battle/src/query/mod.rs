//! Type queries used by the turn resolver and donation rules
//!
//! This module provides the elemental-type helpers the battle engine relies
//! on: tag matching for donation, and the effectiveness extension point used
//! when computing damage.

mod matchup;

pub use matchup::{Neutral, TypeEffectiveness, shares_type};
