use crate::character::attributes::StatType;
use crate::core::rank::Rank;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every equipment slot a hero has. Only gear slots feed stat math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Accessory,
    Mount,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 4] = [
        EquipmentSlot::Weapon,
        EquipmentSlot::Armor,
        EquipmentSlot::Accessory,
        EquipmentSlot::Mount,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "Weapon",
            EquipmentSlot::Armor => "Armor",
            EquipmentSlot::Accessory => "Accessory",
            EquipmentSlot::Mount => "Mount",
        }
    }

    /// Mounts only shorten travel; they never feed success or combat math.
    pub fn affects_quest_success(&self) -> bool {
        !matches!(self, EquipmentSlot::Mount)
    }
}

/// Slots that can hold stat-bearing gear. Mounts have no variant here, so
/// a mount can never be described as gear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GearSlot {
    Weapon,
    Armor,
    Accessory,
}

impl From<GearSlot> for EquipmentSlot {
    fn from(slot: GearSlot) -> Self {
        match slot {
            GearSlot::Weapon => EquipmentSlot::Weapon,
            GearSlot::Armor => EquipmentSlot::Armor,
            GearSlot::Accessory => EquipmentSlot::Accessory,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatBonuses {
    #[serde(default)]
    pub str: u32,
    #[serde(default)]
    pub dex: u32,
    #[serde(default)]
    pub int: u32,
    #[serde(default)]
    pub vit: u32,
    #[serde(default)]
    pub luck: u32,
}

impl StatBonuses {
    pub fn get(&self, stat: StatType) -> u32 {
        match stat {
            StatType::Strength => self.str,
            StatType::Dexterity => self.dex,
            StatType::Intelligence => self.int,
            StatType::Vitality => self.vit,
            StatType::Luck => self.luck,
        }
    }

    pub fn total(&self) -> u32 {
        self.str + self.dex + self.int + self.vit + self.luck
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearTemplate {
    pub id: String,
    pub name: String,
    pub slot: GearSlot,
    pub rank: Rank,
    #[serde(default)]
    pub bonuses: StatBonuses,
    /// Flat damage reduction in combat (armor mostly).
    #[serde(default)]
    pub defense: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountTemplate {
    pub id: String,
    pub name: String,
    pub rank: Rank,
    /// Fraction of travel time removed, e.g. 0.15 for 15%.
    pub travel_reduction: f64,
}

/// Read-only catalog of every equippable item id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentCatalog {
    #[serde(default)]
    pub gear: BTreeMap<String, GearTemplate>,
    #[serde(default)]
    pub mounts: BTreeMap<String, MountTemplate>,
}

impl EquipmentCatalog {
    pub fn gear(&self, id: &str) -> Option<&GearTemplate> {
        self.gear.get(id)
    }

    pub fn mount(&self, id: &str) -> Option<&MountTemplate> {
        self.mounts.get(id)
    }

    /// Resolves the slot an item occupies, or `None` for unknown ids.
    pub fn slot_of(&self, id: &str) -> Option<EquipmentSlot> {
        if let Some(gear) = self.gear(id) {
            return Some(gear.slot.into());
        }
        self.mount(id).map(|_| EquipmentSlot::Mount)
    }

    /// Bonus an item grants to a stat. Unknown ids grant nothing.
    pub fn stat_bonus(&self, id: &str, stat: StatType) -> u32 {
        self.gear(id).map_or(0, |g| g.bonuses.get(stat))
    }

    pub fn defense_bonus(&self, id: &str) -> u32 {
        self.gear(id).map_or(0, |g| g.defense)
    }

    pub fn travel_reduction(&self, id: &str) -> f64 {
        self.mount(id).map_or(0.0, |m| m.travel_reduction)
    }

    pub fn add_gear(&mut self, gear: GearTemplate) {
        self.gear.insert(gear.id.clone(), gear);
    }

    pub fn add_mount(&mut self, mount: MountTemplate) {
        self.mounts.insert(mount.id.clone(), mount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> EquipmentCatalog {
        let mut catalog = EquipmentCatalog::default();
        catalog.add_gear(GearTemplate {
            id: "iron_sword".to_string(),
            name: "Iron Sword".to_string(),
            slot: GearSlot::Weapon,
            rank: Rank::D,
            bonuses: StatBonuses {
                str: 3,
                ..Default::default()
            },
            defense: 0,
        });
        catalog.add_mount(MountTemplate {
            id: "pony".to_string(),
            name: "Pony".to_string(),
            rank: Rank::D,
            travel_reduction: 0.1,
        });
        catalog
    }

    #[test]
    fn test_slot_of() {
        let catalog = sample_catalog();
        assert_eq!(catalog.slot_of("iron_sword"), Some(EquipmentSlot::Weapon));
        assert_eq!(catalog.slot_of("pony"), Some(EquipmentSlot::Mount));
        assert_eq!(catalog.slot_of("missing"), None);
    }

    #[test]
    fn test_unknown_item_grants_zero() {
        let catalog = sample_catalog();
        assert_eq!(catalog.stat_bonus("missing", StatType::Strength), 0);
        assert_eq!(catalog.travel_reduction("missing"), 0.0);
    }

    #[test]
    fn test_mount_grants_no_stats() {
        let catalog = sample_catalog();
        for stat in StatType::all() {
            assert_eq!(catalog.stat_bonus("pony", stat), 0);
        }
        assert!(!EquipmentSlot::Mount.affects_quest_success());
        assert!(EquipmentSlot::Weapon.affects_quest_success());
    }
}
