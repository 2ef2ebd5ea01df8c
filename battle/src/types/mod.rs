//! Domain types for battle state

mod creature;
mod side;
mod stats;

pub use creature::Creature;
pub use side::Side;
pub use stats::Stats;
