use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered tier shared by quests, heroes and equipment: D < C < B < A < S.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    D = 0,
    C = 1,
    B = 2,
    A = 3,
    S = 4,
}

impl Rank {
    pub const ALL: [Rank; 5] = [Rank::D, Rank::C, Rank::B, Rank::A, Rank::S];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rank::D => "D",
            Rank::C => "C",
            Rank::B => "B",
            Rank::A => "A",
            Rank::S => "S",
        }
    }

    /// The next rank up, or `None` at S.
    pub fn next(&self) -> Option<Rank> {
        Rank::ALL.get(self.index() + 1).copied()
    }

    /// Maximum combat rounds for an encounter at this rank.
    pub fn max_combat_rounds(&self) -> u32 {
        match self {
            Rank::D => 3,
            Rank::C => 4,
            Rank::B => 5,
            Rank::A => 5,
            Rank::S => 6,
        }
    }

    /// Number of enemies generated for an encounter at this rank.
    pub fn enemy_count(&self) -> usize {
        match self {
            Rank::D | Rank::C => 2,
            Rank::B | Rank::A => 3,
            Rank::S => 4,
        }
    }

    /// Level cap for heroes of this rank.
    pub fn level_cap(&self) -> u32 {
        10 * (self.index() as u32 + 1)
    }

    /// Highest value a base stat may reach through level-ups at this rank.
    pub fn stat_ceiling(&self) -> u32 {
        match self {
            Rank::D => 30,
            Rank::C => 45,
            Rank::B => 60,
            Rank::A => 80,
            Rank::S => 99,
        }
    }

    /// Upper bound on a single stat's gain per level-up.
    pub fn stat_gain_cap(&self) -> u32 {
        match self {
            Rank::D | Rank::C => 1,
            Rank::B | Rank::A => 2,
            Rank::S => 3,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_ordering() {
        assert!(Rank::D < Rank::C);
        assert!(Rank::C < Rank::B);
        assert!(Rank::A < Rank::S);
    }

    #[test]
    fn test_round_cap_within_bounds() {
        for rank in Rank::ALL {
            let rounds = rank.max_combat_rounds();
            assert!((3..=6).contains(&rounds), "{} has {} rounds", rank, rounds);
        }
    }

    #[test]
    fn test_next_rank() {
        assert_eq!(Rank::D.next(), Some(Rank::C));
        assert_eq!(Rank::S.next(), None);
    }
}
