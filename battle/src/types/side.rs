//! Side (player) state

use super::creature::Creature;

/// One player's side of a battle
///
/// `creatures` is the snapshot committed to this battle, in rotation order:
/// index 0 is the active creature. Fainted creatures leave the rotation and
/// are kept in `fainted` so experience and write-back still see them.
#[derive(Debug, Clone)]
pub struct Side {
    /// Player's name
    pub player: String,

    /// Non-fainted creatures, active first
    pub creatures: Vec<Creature>,

    /// Creatures that fainted during this battle
    pub fainted: Vec<Creature>,
}

impl Side {
    /// Create a new side from a battle snapshot
    pub fn new(player: impl Into<String>, creatures: Vec<Creature>) -> Self {
        Self {
            player: player.into(),
            creatures,
            fainted: Vec::new(),
        }
    }

    /// Get the active creature
    pub fn active(&self) -> Option<&Creature> {
        self.creatures.first()
    }

    /// Get the active creature mutably
    pub fn active_mut(&mut self) -> Option<&mut Creature> {
        self.creatures.first_mut()
    }

    /// Count non-fainted creatures
    pub fn alive_count(&self) -> usize {
        self.creatures.len()
    }

    /// Check if every committed creature has fainted
    pub fn all_fainted(&self) -> bool {
        self.creatures.is_empty()
    }

    /// Find a creature in the rotation by name
    pub fn find_creature(&self, name: &str) -> Option<usize> {
        self.creatures.iter().position(|c| c.name == name)
    }

    /// Make the named creature active. Returns false if it is not in the rotation.
    pub fn switch_to(&mut self, name: &str) -> bool {
        match self.find_creature(name) {
            Some(idx) => {
                self.creatures.swap(0, idx);
                true
            }
            None => false,
        }
    }

    /// Move the active creature out of the rotation if it has fainted
    pub fn retire_fainted_active(&mut self) -> Option<&Creature> {
        if !self.active()?.is_fainted() {
            return None;
        }
        let fainted = self.creatures.remove(0);
        self.fainted.push(fainted);
        self.fainted.last()
    }

    /// Iterate over every committed creature, fainted or not
    pub fn committed(&self) -> impl Iterator<Item = &Creature> {
        self.creatures.iter().chain(self.fainted.iter())
    }

    /// Iterate mutably over every committed creature
    pub fn committed_mut(&mut self) -> impl Iterator<Item = &mut Creature> {
        self.creatures.iter_mut().chain(self.fainted.iter_mut())
    }

    /// Number of committed creatures
    pub fn committed_count(&self) -> usize {
        self.creatures.len() + self.fainted.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Stats;

    fn creature(name: &str, hp: u32) -> Creature {
        let mut c = Creature::new(
            name,
            vec!["normal".into()],
            Stats {
                hp: 50,
                ..Stats::new()
            },
        );
        c.hp = hp;
        c
    }

    fn create_test_side() -> Side {
        Side::new(
            "ash",
            vec![
                creature("pikachu", 50),
                creature("charizard", 50),
                creature("squirtle", 50),
            ],
        )
    }

    #[test]
    fn test_new_side() {
        let side = create_test_side();
        assert_eq!(side.player, "ash");
        assert_eq!(side.active().unwrap().name, "pikachu");
        assert_eq!(side.alive_count(), 3);
        assert!(side.fainted.is_empty());
    }

    #[test]
    fn test_switch_to() {
        let mut side = create_test_side();

        assert!(side.switch_to("squirtle"));
        assert_eq!(side.active().unwrap().name, "squirtle");
        assert_eq!(side.creatures[2].name, "pikachu");

        assert!(!side.switch_to("mewtwo"));
        assert_eq!(side.active().unwrap().name, "squirtle");
    }

    #[test]
    fn test_retire_fainted_active() {
        let mut side = create_test_side();

        // Not fainted: nothing happens
        assert!(side.retire_fainted_active().is_none());

        side.active_mut().unwrap().hp = 0;
        assert_eq!(side.retire_fainted_active().unwrap().name, "pikachu");
        assert_eq!(side.active().unwrap().name, "charizard");
        assert_eq!(side.alive_count(), 2);
        assert_eq!(side.committed_count(), 3);

        // Fainted creatures can no longer be switched in
        assert!(!side.switch_to("pikachu"));
    }

    #[test]
    fn test_all_fainted() {
        let mut side = create_test_side();
        assert!(!side.all_fainted());

        for _ in 0..3 {
            side.active_mut().unwrap().hp = 0;
            side.retire_fainted_active();
        }
        assert!(side.all_fainted());
        assert!(side.active().is_none());
        assert_eq!(side.committed().count(), 3);
    }
}
