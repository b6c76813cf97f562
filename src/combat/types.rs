use crate::character::derived_stats::DerivedStats;
use crate::character::types::{Hero, HeroClass, HeroId};
use crate::core::constants::HERO_BASE_POWER;
use crate::items::EquipmentCatalog;
use serde::{Deserialize, Serialize};

/// Table-driven enemy AI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyBehavior {
    /// Lands a heavy blow every third round.
    Brute,
    /// Goes after the weakest hero.
    Skirmisher,
    /// Every hit adds a poison stack.
    Venomous,
    /// Heals a hurt ally, otherwise attacks.
    Shaman,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub name: String,
    pub hp: u32,
    pub power: u32,
    #[serde(default)]
    pub defense: u32,
    pub behavior: EnemyBehavior,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Heroes,
    Enemies,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Heroes => Side::Enemies,
            Side::Enemies => Side::Heroes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Hero(HeroClass),
    Enemy(EnemyBehavior),
}

/// Buffs and debuffs. Counters are rounds remaining and tick down at the
/// end of every round.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Buffs {
    pub taunt: u32,
    pub block: u32,
    pub evade: u32,
    pub blessed: u32,
    /// Next attack is a guaranteed crit.
    pub aim: bool,
    /// Takes extra damage from heroes for the rest of the fight.
    pub tracked: bool,
    /// Skips its next turn.
    pub stunned: bool,
    /// Barrier absorb pool.
    pub shield: u32,
    pub poison: u32,
}

/// Per-encounter wrapper around a hero or an enemy.
#[derive(Debug, Clone, PartialEq)]
pub struct Combatant {
    pub name: String,
    pub hero_id: Option<HeroId>,
    pub role: Role,
    pub hp: u32,
    pub max_hp: u32,
    pub power: u32,
    /// Value of the stat this combatant's attacks scale with.
    pub scaling: u32,
    pub defense: u32,
    pub dexterity: u32,
    pub luck: u32,
    pub damage_boost: f64,
    pub buffs: Buffs,
    pub cooldown: u32,
    pub damage_dealt: u32,
}

impl Combatant {
    pub fn from_hero(hero: &Hero, catalog: &EquipmentCatalog, damage_boost: f64) -> Self {
        let derived = DerivedStats::for_hero(hero, catalog);
        Self::from_derived(hero, &derived, damage_boost)
    }

    pub fn from_derived(hero: &Hero, derived: &DerivedStats, damage_boost: f64) -> Self {
        Self {
            name: hero.name.clone(),
            hero_id: Some(hero.id),
            role: Role::Hero(hero.class),
            hp: derived.max_hp,
            max_hp: derived.max_hp,
            power: HERO_BASE_POWER,
            scaling: derived.stat(hero.class.scaling_stat()),
            defense: derived.defense,
            dexterity: derived.dexterity,
            luck: derived.luck,
            damage_boost,
            buffs: Buffs::default(),
            cooldown: 0,
            damage_dealt: 0,
        }
    }

    pub fn from_template(template: &EnemyTemplate, name: String) -> Self {
        Self {
            name,
            hero_id: None,
            role: Role::Enemy(template.behavior),
            hp: template.hp.max(1),
            max_hp: template.hp.max(1),
            power: template.power,
            scaling: 0,
            defense: template.defense,
            dexterity: 0,
            luck: 0,
            damage_boost: 0.0,
            buffs: Buffs::default(),
            cooldown: 0,
            damage_dealt: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.hp as f64 / self.max_hp as f64
    }

    /// Removes up to `amount` HP and returns how much was actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Restores up to `amount` HP on a living combatant. The dead stay dead.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let restored = amount.min(self.max_hp - self.hp);
        self.hp += restored;
        restored
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionType {
    Strike,
    Cleave,
    Shoot,
    Track,
    Aim,
    Taunt,
    Block,
    ShieldBash,
    Fireball,
    Barrier,
    Heal,
    Bless,
    Smite,
    Evade,
    PoisonStab,
    Attack,
    HeavyBlow,
    VenomStrike,
    Mend,
    PoisonTick,
    Stunned,
    Dodge,
    Defeated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CombatLogEntry {
    pub round: u32,
    pub actor: String,
    pub action: ActionType,
    pub target: Option<String>,
    /// Damage dealt, HP restored or shield granted.
    pub value: u32,
    pub is_crit: bool,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    Victory,
    Defeat,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatSummary {
    /// Total HP the enemy side lost.
    pub hero_damage: u32,
    /// Total HP the hero side lost.
    pub enemy_damage: u32,
    pub damage_by_combatant: Vec<(String, u32)>,
    pub mvp: Option<HeroId>,
    pub heroes_surviving: usize,
    pub enemies_surviving: usize,
    pub fallen_heroes: Vec<HeroId>,
}

/// Everything that outlives a combat resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatReport {
    pub outcome: CombatOutcome,
    pub rounds: u32,
    pub log: Vec<CombatLogEntry>,
    pub summary: CombatSummary,
}

impl CombatReport {
    pub fn is_victory(&self) -> bool {
        self.outcome == CombatOutcome::Victory
    }
}
