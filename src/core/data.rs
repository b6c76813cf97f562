//! Built-in balance tables backing `GameConfig::default()`.

use super::config::{
    CombatConfig, DropTable, GameConfig, RankRewards, Recipe, StatRange, SuccessConfig,
};
use super::rank::Rank;
use crate::character::types::{HeroClass, Race};
use crate::combat::types::{EnemyBehavior, EnemyTemplate};
use crate::guild::types::{Faction, GuildLevel, ReputationTier};
use crate::items::types::{EquipmentCatalog, GearSlot, GearTemplate, MountTemplate, StatBonuses};
use crate::quest::types::DropEntry;
use std::collections::BTreeMap;

fn bonuses(str: u32, dex: u32, int: u32, vit: u32, luck: u32) -> StatBonuses {
    StatBonuses {
        str,
        dex,
        int,
        vit,
        luck,
    }
}

fn gear(id: &str, name: &str, slot: GearSlot, rank: Rank, bonuses: StatBonuses, defense: u32) -> GearTemplate {
    GearTemplate {
        id: id.to_string(),
        name: name.to_string(),
        slot,
        rank,
        bonuses,
        defense,
    }
}

fn mount(id: &str, name: &str, rank: Rank, travel_reduction: f64) -> MountTemplate {
    MountTemplate {
        id: id.to_string(),
        name: name.to_string(),
        rank,
        travel_reduction,
    }
}

fn enemy(name: &str, hp: u32, power: u32, defense: u32, behavior: EnemyBehavior) -> EnemyTemplate {
    EnemyTemplate {
        name: name.to_string(),
        hp,
        power,
        defense,
        behavior,
    }
}

fn drop(material: &str, chance: f64, quantity: u32) -> DropEntry {
    DropEntry {
        material: material.to_string(),
        chance,
        quantity,
    }
}

fn catalog() -> EquipmentCatalog {
    use GearSlot::*;
    let mut catalog = EquipmentCatalog::default();
    for item in [
        gear("iron_sword", "Iron Sword", Weapon, Rank::D, bonuses(2, 0, 0, 0, 0), 0),
        gear("oak_bow", "Oak Bow", Weapon, Rank::D, bonuses(0, 2, 0, 0, 0), 0),
        gear("apprentice_staff", "Apprentice Staff", Weapon, Rank::D, bonuses(0, 0, 2, 0, 0), 0),
        gear("steel_blade", "Steel Blade", Weapon, Rank::C, bonuses(4, 1, 0, 0, 0), 0),
        gear("leather_armor", "Leather Armor", Armor, Rank::D, bonuses(0, 0, 0, 1, 0), 1),
        gear("chainmail", "Chainmail", Armor, Rank::C, bonuses(0, 0, 0, 2, 0), 3),
        gear("lucky_charm", "Lucky Charm", Accessory, Rank::D, bonuses(0, 0, 0, 0, 2), 0),
        gear("sages_amulet", "Sage's Amulet", Accessory, Rank::C, bonuses(0, 0, 2, 0, 1), 0),
    ] {
        catalog.add_gear(item);
    }
    for item in [
        mount("pony", "Pony", Rank::D, 0.10),
        mount("warhorse", "Warhorse", Rank::C, 0.15),
        mount("griffin", "Griffin", Rank::A, 0.30),
    ] {
        catalog.add_mount(item);
    }
    catalog
}

fn enemy_tables() -> BTreeMap<Rank, Vec<EnemyTemplate>> {
    use EnemyBehavior::*;
    BTreeMap::from([
        (
            Rank::D,
            vec![
                enemy("Giant Rat", 20, 4, 0, Skirmisher),
                enemy("Goblin", 28, 5, 0, Brute),
                enemy("Cave Spider", 18, 4, 0, Venomous),
            ],
        ),
        (
            Rank::C,
            vec![
                enemy("Orc Raider", 45, 8, 1, Brute),
                enemy("Bandit Archer", 35, 7, 0, Skirmisher),
                enemy("Goblin Shaman", 30, 5, 0, Shaman),
                enemy("Giant Scorpion", 40, 6, 1, Venomous),
            ],
        ),
        (
            Rank::B,
            vec![
                enemy("Troll", 80, 12, 2, Brute),
                enemy("Wyvern Whelp", 60, 10, 1, Venomous),
                enemy("Dark Acolyte", 50, 8, 0, Shaman),
                enemy("Assassin", 55, 11, 0, Skirmisher),
            ],
        ),
        (
            Rank::A,
            vec![
                enemy("Ogre Warlord", 120, 16, 3, Brute),
                enemy("Basilisk", 100, 14, 2, Venomous),
                enemy("Lich Adept", 80, 12, 1, Shaman),
                enemy("Shadow Stalker", 90, 15, 1, Skirmisher),
            ],
        ),
        (
            Rank::S,
            vec![
                enemy("Ancient Golem", 180, 20, 5, Brute),
                enemy("Hydra", 160, 18, 3, Venomous),
                enemy("Archlich", 130, 16, 2, Shaman),
                enemy("Demon Blade", 140, 22, 2, Skirmisher),
            ],
        ),
    ])
}

fn drop_tables() -> BTreeMap<Rank, DropTable> {
    let table = |entries: Vec<DropEntry>, rare: DropEntry| DropTable {
        entries,
        rare: Some(rare),
    };
    BTreeMap::from([
        (
            Rank::D,
            table(
                vec![drop("iron_ore", 0.4, 1), drop("hide", 0.3, 1)],
                drop("spirit_essence", 1.0, 1),
            ),
        ),
        (
            Rank::C,
            table(
                vec![drop("iron_ore", 0.4, 2), drop("hide", 0.3, 2), drop("spirit_essence", 0.1, 1)],
                drop("moonsilver", 1.0, 1),
            ),
        ),
        (
            Rank::B,
            table(
                vec![drop("moonsilver", 0.2, 1), drop("spirit_essence", 0.2, 1)],
                drop("phoenix_ash", 1.0, 1),
            ),
        ),
        (
            Rank::A,
            table(
                vec![drop("moonsilver", 0.3, 2), drop("phoenix_ash", 0.1, 1)],
                drop("dragon_scale", 1.0, 1),
            ),
        ),
        (
            Rank::S,
            table(
                vec![drop("dragon_scale", 0.2, 1), drop("phoenix_ash", 0.2, 1)],
                drop("starmetal", 1.0, 1),
            ),
        ),
    ])
}

fn recipes() -> Vec<Recipe> {
    let recipe = |id: &str, inputs: &[(&str, u32)], gold_cost: u64, output: &str| Recipe {
        id: id.to_string(),
        inputs: inputs.iter().map(|(m, n)| (m.to_string(), *n)).collect(),
        gold_cost,
        output: output.to_string(),
        output_count: 1,
    };
    vec![
        recipe("forge_iron_sword", &[("iron_ore", 3)], 20, "iron_sword"),
        recipe("tan_leather_armor", &[("hide", 4)], 15, "leather_armor"),
        recipe("forge_chainmail", &[("iron_ore", 6), ("hide", 2)], 60, "chainmail"),
        recipe("carve_lucky_charm", &[("spirit_essence", 1), ("hide", 1)], 30, "lucky_charm"),
        recipe(
            "bind_phoenix_feather",
            &[("phoenix_ash", 1), ("spirit_essence", 2)],
            200,
            "phoenix_feather",
        ),
    ]
}

fn reputation_tiers() -> Vec<ReputationTier> {
    [
        ("Hated", -1000, 0.75),
        ("Unfriendly", -200, 0.9),
        ("Neutral", -50, 1.0),
        ("Friendly", 200, 1.1),
        ("Honored", 500, 1.2),
        ("Exalted", 1000, 1.35),
    ]
    .into_iter()
    .map(|(name, min_reputation, reward_multiplier)| ReputationTier {
        name: name.to_string(),
        min_reputation,
        reward_multiplier,
    })
    .collect()
}

fn guild_levels() -> Vec<GuildLevel> {
    [
        (1, 0, 8, 2, Rank::D),
        (2, 100, 10, 3, Rank::C),
        (3, 300, 12, 4, Rank::B),
        (4, 800, 14, 5, Rank::A),
        (5, 2000, 16, 6, Rank::S),
    ]
    .into_iter()
    .map(|(level, xp_required, hero_slots, quest_slots, max_tavern_rank)| GuildLevel {
        level,
        xp_required,
        hero_slots,
        quest_slots,
        max_tavern_rank,
    })
    .collect()
}

fn factions() -> Vec<Faction> {
    let faction = |id: &str, name: &str, rival: Option<&str>| Faction {
        id: id.to_string(),
        name: name.to_string(),
        rival: rival.map(str::to_string),
    };
    vec![
        faction("crown", "The Crown", Some("thieves_guild")),
        faction("thieves_guild", "Thieves' Guild", Some("crown")),
        faction("mages_circle", "Mages' Circle", None),
        faction("wild_hunt", "The Wild Hunt", None),
    ]
}

pub fn default_config() -> GameConfig {
    let stat_ranges = BTreeMap::from([
        (Rank::D, StatRange { min: 6, max: 12 }),
        (Rank::C, StatRange { min: 10, max: 16 }),
        (Rank::B, StatRange { min: 14, max: 22 }),
        (Rank::A, StatRange { min: 20, max: 30 }),
        (Rank::S, StatRange { min: 28, max: 40 }),
    ]);
    let race_bonuses = BTreeMap::from([
        (Race::Human, bonuses(1, 1, 1, 1, 1)),
        (Race::Elf, bonuses(0, 2, 1, 0, 0)),
        (Race::Dwarf, bonuses(1, 0, 0, 2, 0)),
        (Race::Orc, bonuses(3, 0, 0, 0, 0)),
        (Race::Halfling, bonuses(0, 1, 0, 0, 2)),
    ]);
    let class_bonuses = BTreeMap::from([
        (HeroClass::Knight, bonuses(1, 0, 0, 2, 0)),
        (HeroClass::Warrior, bonuses(3, 0, 0, 0, 0)),
        (HeroClass::Archer, bonuses(0, 3, 0, 0, 0)),
        (HeroClass::Mage, bonuses(0, 0, 3, 0, 0)),
        (HeroClass::Cleric, bonuses(0, 0, 2, 1, 0)),
        (HeroClass::Rogue, bonuses(0, 2, 0, 0, 1)),
    ]);
    let hire_costs = BTreeMap::from([
        (Rank::D, 100),
        (Rank::C, 250),
        (Rank::B, 600),
        (Rank::A, 1500),
        (Rank::S, 4000),
    ]);
    let rank_rewards = [
        (Rank::D, 20, 10, 5, 0.10),
        (Rank::C, 40, 15, 8, 0.15),
        (Rank::B, 80, 20, 10, 0.20),
        (Rank::A, 150, 30, 15, 0.25),
        (Rank::S, 300, 50, 25, 0.30),
    ]
    .into_iter()
    .map(|(rank, guild_xp, reputation_gain, reputation_loss, death_chance)| {
        (
            rank,
            RankRewards {
                guild_xp,
                reputation_gain,
                reputation_loss,
                death_chance,
            },
        )
    })
    .collect();

    GameConfig {
        success: SuccessConfig::default(),
        combat: CombatConfig::default(),
        stat_ranges,
        race_bonuses,
        class_bonuses,
        hire_costs,
        rank_rewards,
        catalog: catalog(),
        enemy_tables: enemy_tables(),
        drop_tables: drop_tables(),
        recipes: recipes(),
        reputation_tiers: reputation_tiers(),
        guild_levels: guild_levels(),
        factions: factions(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::types::EquipmentSlot;

    #[test]
    fn test_mounts_never_carry_stats() {
        let config = default_config();
        for id in config.catalog.mounts.keys() {
            assert_eq!(config.catalog.slot_of(id), Some(EquipmentSlot::Mount));
            assert_eq!(config.catalog.gear(id), None);
        }
    }

    #[test]
    fn test_every_recipe_output_is_known() {
        let config = default_config();
        for recipe in &config.recipes {
            let known = config.catalog.slot_of(&recipe.output).is_some()
                || recipe.output == crate::core::constants::REVIVAL_ITEM_ID;
            assert!(known, "recipe {} makes unknown {}", recipe.id, recipe.output);
        }
    }

    #[test]
    fn test_rivals_reference_real_factions() {
        let config = default_config();
        for faction in &config.factions {
            if let Some(rival) = &faction.rival {
                assert!(config.faction(rival).is_some());
            }
        }
    }

    #[test]
    fn test_every_rank_has_a_rare_drop() {
        let config = default_config();
        for rank in Rank::ALL {
            assert!(config.drop_table(rank).and_then(|t| t.rare.as_ref()).is_some());
        }
    }
}
