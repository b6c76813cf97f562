use crate::core::constants::{NUM_STATS, STAT_MAX, STAT_MIN};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StatType {
    Strength,
    Dexterity,
    Intelligence,
    Vitality,
    Luck,
}

impl StatType {
    pub fn all() -> [StatType; NUM_STATS] {
        [
            StatType::Strength,
            StatType::Dexterity,
            StatType::Intelligence,
            StatType::Vitality,
            StatType::Luck,
        ]
    }

    pub fn abbrev(&self) -> &str {
        match self {
            StatType::Strength => "STR",
            StatType::Dexterity => "DEX",
            StatType::Intelligence => "INT",
            StatType::Vitality => "VIT",
            StatType::Luck => "LUCK",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            StatType::Strength => 0,
            StatType::Dexterity => 1,
            StatType::Intelligence => 2,
            StatType::Vitality => 3,
            StatType::Luck => 4,
        }
    }
}

/// The five base stats of a hero, each held within `STAT_MIN..=STAT_MAX`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    values: [u32; NUM_STATS],
}

impl Default for Stats {
    fn default() -> Self {
        Self::uniform(10)
    }
}

impl Stats {
    pub fn uniform(value: u32) -> Self {
        Self {
            values: [value.clamp(STAT_MIN, STAT_MAX); NUM_STATS],
        }
    }

    pub fn new(str: u32, dex: u32, int: u32, vit: u32, luck: u32) -> Self {
        let mut stats = Self::uniform(STAT_MIN);
        stats.set(StatType::Strength, str);
        stats.set(StatType::Dexterity, dex);
        stats.set(StatType::Intelligence, int);
        stats.set(StatType::Vitality, vit);
        stats.set(StatType::Luck, luck);
        stats
    }

    pub fn get(&self, stat: StatType) -> u32 {
        self.values[stat.index()]
    }

    /// Sets a stat, clamping into the legal range.
    pub fn set(&mut self, stat: StatType, value: u32) {
        self.values[stat.index()] = value.clamp(STAT_MIN, STAT_MAX);
    }

    /// Raises a stat by `amount` without exceeding `ceiling`. Returns the
    /// amount actually gained.
    pub fn raise(&mut self, stat: StatType, amount: u32, ceiling: u32) -> u32 {
        let current = self.get(stat);
        let target = current.saturating_add(amount).min(ceiling.min(STAT_MAX));
        if target <= current {
            return 0;
        }
        self.values[stat.index()] = target;
        target - current
    }

    pub fn total(&self) -> u32 {
        self.values.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats() {
        let stats = Stats::default();
        for stat in StatType::all() {
            assert_eq!(stats.get(stat), 10);
        }
    }

    #[test]
    fn test_set_clamps() {
        let mut stats = Stats::default();
        stats.set(StatType::Strength, 500);
        assert_eq!(stats.get(StatType::Strength), STAT_MAX);
        stats.set(StatType::Luck, 0);
        assert_eq!(stats.get(StatType::Luck), STAT_MIN);
    }

    #[test]
    fn test_raise_respects_ceiling() {
        let mut stats = Stats::new(29, 10, 10, 10, 10);
        assert_eq!(stats.raise(StatType::Strength, 3, 30), 1);
        assert_eq!(stats.get(StatType::Strength), 30);
        assert_eq!(stats.raise(StatType::Strength, 3, 30), 0);
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, stat) in StatType::all().iter().enumerate() {
            assert_eq!(stat.index(), i);
        }
    }
}
