use super::attributes::{StatType, Stats};
use super::types::Hero;
use crate::core::constants::*;
use crate::items::EquipmentCatalog;

/// Effective value of a stat: base plus every success-relevant equipment
/// bonus. Mount slots never contribute; unknown item ids count as zero.
pub fn effective_stat(hero: &Hero, stat: StatType, catalog: &EquipmentCatalog) -> u32 {
    let bonus: u32 = hero
        .equipment
        .iter_gear()
        .map(|id| catalog.stat_bonus(id, stat))
        .sum();
    hero.base_stat(stat) + bonus
}

/// All five effective stats at once. Values may exceed `STAT_MAX` since
/// equipment stacks on top of the bounded base.
pub fn effective_stats(hero: &Hero, catalog: &EquipmentCatalog) -> [u32; NUM_STATS] {
    let mut values = [0; NUM_STATS];
    for stat in StatType::all() {
        values[stat.index()] = effective_stat(hero, stat, catalog);
    }
    values
}

/// Average effective stat across a roster. Returns 0.0 for an empty slice.
pub fn average_effective_stat(heroes: &[&Hero], stat: StatType, catalog: &EquipmentCatalog) -> f64 {
    if heroes.is_empty() {
        return 0.0;
    }
    let total: u32 = heroes
        .iter()
        .map(|h| effective_stat(h, stat, catalog))
        .sum();
    total as f64 / heroes.len() as f64
}

/// Combat numbers derived from effective stats and gear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedStats {
    pub max_hp: u32,
    pub defense: u32,
    pub strength: u32,
    pub dexterity: u32,
    pub intelligence: u32,
    pub luck: u32,
}

impl DerivedStats {
    /// Derived stats for a bare stat block with no gear.
    pub fn from_stats(stats: &Stats) -> Self {
        Self::build(
            [
                stats.get(StatType::Strength),
                stats.get(StatType::Dexterity),
                stats.get(StatType::Intelligence),
                stats.get(StatType::Vitality),
                stats.get(StatType::Luck),
            ],
            0,
        )
    }

    /// Derived stats for a hero including equipped gear.
    pub fn for_hero(hero: &Hero, catalog: &EquipmentCatalog) -> Self {
        let armor: u32 = hero
            .equipment
            .iter_gear()
            .map(|id| catalog.defense_bonus(id))
            .sum();
        Self::build(effective_stats(hero, catalog), armor)
    }

    fn build(values: [u32; NUM_STATS], armor: u32) -> Self {
        let vit = values[StatType::Vitality.index()];
        Self {
            // Max HP = HERO_BASE_HP + VIT × HP_PER_VIT
            max_hp: HERO_BASE_HP + vit * HP_PER_VIT,
            // Defense = VIT / DEFENSE_VIT_DIVISOR + armor
            defense: vit / DEFENSE_VIT_DIVISOR + armor,
            strength: values[StatType::Strength.index()],
            dexterity: values[StatType::Dexterity.index()],
            intelligence: values[StatType::Intelligence.index()],
            luck: values[StatType::Luck.index()],
        }
    }

    pub fn stat(&self, stat: StatType) -> u32 {
        match stat {
            StatType::Strength => self.strength,
            StatType::Dexterity => self.dexterity,
            StatType::Intelligence => self.intelligence,
            StatType::Vitality => (self.max_hp - HERO_BASE_HP) / HP_PER_VIT,
            StatType::Luck => self.luck,
        }
    }
}
