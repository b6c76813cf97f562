//! Round-based battle resolution.
//!
//! A battle is built from hero and enemy combatants, runs to a wipe or the
//! rank's round cap, and returns a [`CombatReport`]. The mutable battle
//! state never leaves this module.

use super::ai::{choose_enemy_action, choose_hero_action, Action};
use super::math::*;
use super::types::*;
use crate::character::types::Hero;
use crate::core::config::{CombatConfig, GameConfig};
use crate::core::constants::*;
use crate::core::rank::Rank;
use crate::party::types::Party;
use rand::Rng;

struct Battle {
    heroes: Vec<Combatant>,
    enemies: Vec<Combatant>,
    round: u32,
    log: Vec<CombatLogEntry>,
    hero_damage: u32,
    enemy_damage: u32,
}

impl Battle {
    fn side(&self, side: Side) -> &[Combatant] {
        match side {
            Side::Heroes => &self.heroes,
            Side::Enemies => &self.enemies,
        }
    }

    fn wiped(&self, side: Side) -> bool {
        !self.side(side).iter().any(|c| c.is_alive())
    }

    fn is_over(&self) -> bool {
        self.wiped(Side::Heroes) || self.wiped(Side::Enemies)
    }

    fn record(
        &mut self,
        actor: &str,
        action: ActionType,
        target: Option<&str>,
        value: u32,
        is_crit: bool,
        message: String,
    ) {
        self.log.push(CombatLogEntry {
            round: self.round,
            actor: actor.to_string(),
            action,
            target: target.map(str::to_string),
            value,
            is_crit,
            message,
        });
    }

    /// Resolves one hit from `attacker` on `target` of the opposing side.
    /// Returns HP actually removed.
    #[allow(clippy::too_many_arguments)]
    fn hit<R: Rng>(
        &mut self,
        side: Side,
        attacker: usize,
        target: usize,
        action: ActionType,
        factor: f64,
        force_crit: bool,
        config: &CombatConfig,
        rng: &mut R,
    ) -> u32 {
        let (attackers, defenders) = match side {
            Side::Heroes => (&mut self.heroes, &mut self.enemies),
            Side::Enemies => (&mut self.enemies, &mut self.heroes),
        };
        let a = &attackers[attacker];
        let base = (base_damage(a.power, a.scaling) as f64 * factor).floor() as u32;
        let crit = force_crit || roll_crit(crit_chance(config, a.luck), rng);
        let mods = AttackModifiers {
            damage_boost: a.damage_boost,
            blessed: a.buffs.blessed > 0,
            tracked_target: side == Side::Heroes && defenders[target].buffs.tracked,
            crit,
        };
        let attacker_name = a.name.clone();
        let raw = modified_damage(base, &mods);

        let d = &mut defenders[target];
        let target_name = d.name.clone();
        if d.buffs.evade > 0 && roll_evade(rng) {
            let message = format!("{} dodges {}'s attack", target_name, attacker_name);
            self.record(&target_name, ActionType::Dodge, Some(&attacker_name), 0, false, message);
            return 0;
        }
        let m = mitigate(raw, d.buffs.block > 0, d.buffs.shield, d.defense);
        d.buffs.shield -= m.absorbed;
        let lost = d.take_damage(m.hp_damage);
        let killed = !d.is_alive();

        attackers[attacker].damage_dealt += lost;
        match side {
            Side::Heroes => self.hero_damage += lost,
            Side::Enemies => self.enemy_damage += lost,
        }
        let verb = if crit { "critically hits" } else { "hits" };
        let message = format!(
            "{} {} {} with {:?} for {} damage",
            attacker_name, verb, target_name, action, lost
        );
        self.record(&attacker_name, action, Some(&target_name), lost, crit, message);
        if killed {
            let message = format!("{} falls", target_name);
            self.record(&target_name, ActionType::Defeated, None, 0, false, message);
        }
        lost
    }

    fn act<R: Rng>(&mut self, side: Side, actor: usize, config: &CombatConfig, rng: &mut R) {
        let name = self.side(side)[actor].name.clone();
        let stunned = match side {
            Side::Heroes => &mut self.heroes[actor].buffs.stunned,
            Side::Enemies => &mut self.enemies[actor].buffs.stunned,
        };
        if *stunned {
            *stunned = false;
            let message = format!("{} is stunned and loses the turn", name);
            self.record(&name, ActionType::Stunned, None, 0, false, message);
            return;
        }

        let action = match self.side(side)[actor].role {
            Role::Hero(class) => {
                choose_hero_action(class, actor, &self.heroes, &self.enemies, self.round)
            }
            Role::Enemy(behavior) => {
                choose_enemy_action(behavior, &self.enemies, &self.heroes, self.round, rng)
            }
        };
        if let Some(action) = action {
            self.perform(side, actor, action, config, rng);
        }
    }

    fn perform<R: Rng>(
        &mut self,
        side: Side,
        actor: usize,
        action: Action,
        config: &CombatConfig,
        rng: &mut R,
    ) {
        let name = self.side(side)[actor].name.clone();
        let target = action.target.unwrap_or(actor);
        match action.kind {
            ActionType::Strike
            | ActionType::Fireball
            | ActionType::Smite
            | ActionType::Attack => {
                self.hit(side, actor, target, action.kind, 1.0, false, config, rng);
            }
            ActionType::Shoot => {
                let aimed = std::mem::take(&mut self.heroes[actor].buffs.aim);
                self.hit(side, actor, target, action.kind, 1.0, aimed, config, rng);
            }
            ActionType::HeavyBlow => {
                self.hit(side, actor, target, action.kind, HEAVY_BLOW_MULTIPLIER, false, config, rng);
            }
            ActionType::Cleave => {
                let targets: Vec<usize> = self
                    .side(side.opponent())
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| c.is_alive())
                    .map(|(i, _)| i)
                    .collect();
                for t in targets {
                    self.hit(side, actor, t, action.kind, CLEAVE_FACTOR, false, config, rng);
                }
            }
            ActionType::ShieldBash => {
                self.hit(side, actor, target, action.kind, 1.0, false, config, rng);
                self.heroes[actor].cooldown = SHIELD_BASH_COOLDOWN;
                let foe = &mut self.enemies[target];
                if foe.is_alive() {
                    foe.buffs.stunned = true;
                }
            }
            ActionType::PoisonStab | ActionType::VenomStrike => {
                let lost = self.hit(side, actor, target, action.kind, 1.0, false, config, rng);
                let foe = match side {
                    Side::Heroes => &mut self.enemies[target],
                    Side::Enemies => &mut self.heroes[target],
                };
                if lost > 0 && foe.is_alive() {
                    foe.buffs.poison += 1;
                }
            }
            ActionType::Track => {
                let foe = &mut self.enemies[target];
                foe.buffs.tracked = true;
                let message = format!("{} marks {} for the party", name, foe.name);
                let foe_name = foe.name.clone();
                self.record(&name, action.kind, Some(&foe_name), 0, false, message);
            }
            ActionType::Aim => {
                self.heroes[actor].buffs.aim = true;
                let message = format!("{} takes careful aim", name);
                self.record(&name, action.kind, None, 0, false, message);
            }
            ActionType::Taunt => {
                self.heroes[actor].buffs.taunt = TAUNT_ROUNDS;
                let message = format!("{} taunts the enemy", name);
                self.record(&name, action.kind, None, 0, false, message);
            }
            ActionType::Block => {
                self.heroes[actor].buffs.block = BLOCK_ROUNDS;
                let message = format!("{} raises a guard", name);
                self.record(&name, action.kind, None, 0, false, message);
            }
            ActionType::Evade => {
                self.heroes[actor].buffs.evade = EVADE_ROUNDS;
                let message = format!("{} slips into the shadows", name);
                self.record(&name, action.kind, None, 0, false, message);
            }
            ActionType::Barrier => {
                let me = &self.heroes[actor];
                let amount = base_damage(me.power, me.scaling);
                let ally = &mut self.heroes[target];
                ally.buffs.shield = amount;
                let ally_name = ally.name.clone();
                let message = format!("{} shields {} for {}", name, ally_name, amount);
                self.record(&name, action.kind, Some(&ally_name), amount, false, message);
            }
            ActionType::Heal | ActionType::Mend => {
                let allies = match side {
                    Side::Heroes => &mut self.heroes,
                    Side::Enemies => &mut self.enemies,
                };
                let amount = base_damage(allies[actor].power, allies[actor].scaling);
                let restored = allies[target].heal(amount);
                let ally_name = allies[target].name.clone();
                let message = format!("{} heals {} for {}", name, ally_name, restored);
                self.record(&name, action.kind, Some(&ally_name), restored, false, message);
            }
            ActionType::Bless => {
                let ally = &mut self.heroes[target];
                ally.buffs.blessed = BLESS_ROUNDS;
                let ally_name = ally.name.clone();
                let message = format!("{} blesses {}", name, ally_name);
                self.record(&name, action.kind, Some(&ally_name), 0, false, message);
            }
            ActionType::PoisonTick | ActionType::Stunned | ActionType::Dodge | ActionType::Defeated => {}
        }
    }

    /// Every living member of `side` acts once, in list order. Stops as
    /// soon as either side is wiped.
    fn take_turns<R: Rng>(&mut self, side: Side, config: &CombatConfig, rng: &mut R) {
        for actor in 0..self.side(side).len() {
            if self.is_over() {
                return;
            }
            if self.side(side)[actor].is_alive() {
                self.act(side, actor, config, rng);
            }
        }
    }

    /// Poison ticks, then every duration counts down.
    fn end_round(&mut self) {
        for side in [Side::Heroes, Side::Enemies] {
            for i in 0..self.side(side).len() {
                let c = match side {
                    Side::Heroes => &mut self.heroes[i],
                    Side::Enemies => &mut self.enemies[i],
                };
                if !c.is_alive() {
                    continue;
                }
                if c.buffs.poison > 0 {
                    let lost = c.take_damage(poison_damage(c.buffs.poison));
                    c.buffs.poison -= 1;
                    let name = c.name.clone();
                    let died = !c.is_alive();
                    match side {
                        Side::Heroes => self.enemy_damage += lost,
                        Side::Enemies => self.hero_damage += lost,
                    }
                    let message = format!("{} takes {} poison damage", name, lost);
                    self.record(&name, ActionType::PoisonTick, None, lost, false, message);
                    if died {
                        let message = format!("{} succumbs to poison", name);
                        self.record(&name, ActionType::Defeated, None, 0, false, message);
                    }
                }
            }
        }
        for c in self.heroes.iter_mut().chain(self.enemies.iter_mut()) {
            c.buffs.taunt = c.buffs.taunt.saturating_sub(1);
            c.buffs.block = c.buffs.block.saturating_sub(1);
            c.buffs.evade = c.buffs.evade.saturating_sub(1);
            c.buffs.blessed = c.buffs.blessed.saturating_sub(1);
            c.cooldown = c.cooldown.saturating_sub(1);
        }
    }

    fn summed_hp(&self, side: Side) -> u32 {
        self.side(side).iter().map(|c| c.hp).sum()
    }

    fn into_report(self, outcome: CombatOutcome) -> CombatReport {
        let mvp = self
            .heroes
            .iter()
            .filter(|c| c.damage_dealt > 0)
            .max_by_key(|c| c.damage_dealt)
            .and_then(|c| c.hero_id);
        let summary = CombatSummary {
            hero_damage: self.hero_damage,
            enemy_damage: self.enemy_damage,
            damage_by_combatant: self
                .heroes
                .iter()
                .chain(self.enemies.iter())
                .map(|c| (c.name.clone(), c.damage_dealt))
                .collect(),
            mvp,
            heroes_surviving: self.heroes.iter().filter(|c| c.is_alive()).count(),
            enemies_surviving: self.enemies.iter().filter(|c| c.is_alive()).count(),
            fallen_heroes: self
                .heroes
                .iter()
                .filter(|c| !c.is_alive())
                .filter_map(|c| c.hero_id)
                .collect(),
        };
        tracing::debug!(
            "Combat ended in {:?} after {} rounds ({} dealt, {} taken)",
            outcome,
            self.round,
            summary.hero_damage,
            summary.enemy_damage
        );
        CombatReport {
            outcome,
            rounds: self.round,
            log: self.log,
            summary,
        }
    }
}

/// Runs a battle between prepared combatants.
///
/// Initiative is rolled once: d20 plus average hero DEX / 5 against d20
/// plus `enemy_initiative`, ties to the heroes. The first side acts first
/// every round. At the round cap the side with more summed HP wins; a tie
/// goes to the enemies.
pub fn run_battle<R: Rng>(
    heroes: Vec<Combatant>,
    enemies: Vec<Combatant>,
    max_rounds: u32,
    enemy_initiative: u32,
    config: &CombatConfig,
    rng: &mut R,
) -> CombatReport {
    let mut battle = Battle {
        heroes,
        enemies,
        round: 0,
        log: Vec::new(),
        hero_damage: 0,
        enemy_damage: 0,
    };
    if battle.wiped(Side::Enemies) {
        return battle.into_report(CombatOutcome::Victory);
    }
    if battle.wiped(Side::Heroes) {
        return battle.into_report(CombatOutcome::Defeat);
    }

    let avg_dex = battle.heroes.iter().map(|c| c.dexterity).sum::<u32>() / battle.heroes.len() as u32;
    let hero_roll = roll_initiative(avg_dex / INITIATIVE_DEX_DIVISOR, rng);
    let enemy_roll = roll_initiative(enemy_initiative, rng);
    let order = if hero_roll >= enemy_roll {
        [Side::Heroes, Side::Enemies]
    } else {
        [Side::Enemies, Side::Heroes]
    };

    for round in 1..=max_rounds.max(1) {
        battle.round = round;
        for side in order {
            battle.take_turns(side, config, rng);
        }
        if !battle.is_over() {
            battle.end_round();
        }
        if battle.wiped(Side::Enemies) {
            return battle.into_report(CombatOutcome::Victory);
        }
        if battle.wiped(Side::Heroes) {
            return battle.into_report(CombatOutcome::Defeat);
        }
    }

    let outcome = if battle.summed_hp(Side::Heroes) > battle.summed_hp(Side::Enemies) {
        CombatOutcome::Victory
    } else {
        CombatOutcome::Defeat
    };
    battle.into_report(outcome)
}

/// Draws the rank's enemies from the configured table.
pub fn generate_enemies<R: Rng>(config: &GameConfig, rank: Rank, rng: &mut R) -> Vec<Combatant> {
    let table = config.enemy_table(rank);
    if table.is_empty() {
        tracing::warn!("No enemy table for rank {}", rank);
        return Vec::new();
    }
    (0..rank.enemy_count())
        .map(|i| {
            let template = &table[rng.gen_range(0..table.len())];
            Combatant::from_template(template, format!("{} {}", template.name, i + 1))
        })
        .collect()
}

/// Resolves a combat quest for a roster. Party trait damage applies only
/// when the roster is exactly the party.
pub fn resolve_combat<R: Rng>(
    heroes: &[&Hero],
    party: Option<&Party>,
    rank: Rank,
    config: &GameConfig,
    rng: &mut R,
) -> CombatReport {
    let roster: Vec<_> = heroes.iter().map(|h| h.id).collect();
    let damage_boost = party
        .filter(|p| p.matches_roster(&roster))
        .map_or(0.0, |p| p.trait_bonuses().damage_bonus);
    let hero_side = heroes
        .iter()
        .map(|h| Combatant::from_hero(h, &config.catalog, damage_boost))
        .collect();
    let enemies = generate_enemies(config, rank, rng);
    run_battle(
        hero_side,
        enemies,
        rank.max_combat_rounds(),
        rank.index() as u32,
        &config.combat,
        rng,
    )
}
