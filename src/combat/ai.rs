//! Rule-based action selection for heroes (by class) and enemies (by
//! behavior). Selection never mutates the battle; it only names an action
//! and a target index.

use super::types::{ActionType, Combatant, EnemyBehavior};
use crate::character::types::HeroClass;
use crate::combat::math::base_damage;
use crate::core::constants::*;
use rand::Rng;

/// A chosen action. `target` indexes the opposing side for offensive
/// actions and the actor's own side for support actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionType,
    pub target: Option<usize>,
}

impl Action {
    fn on(kind: ActionType, target: usize) -> Self {
        Self {
            kind,
            target: Some(target),
        }
    }

    fn solo(kind: ActionType) -> Self {
        Self { kind, target: None }
    }
}

fn living(side: &[Combatant]) -> impl Iterator<Item = (usize, &Combatant)> {
    side.iter().enumerate().filter(|(_, c)| c.is_alive())
}

/// Heroes focus a tracked enemy, otherwise the first one standing.
pub fn hero_target(foes: &[Combatant]) -> Option<usize> {
    living(foes)
        .find(|(_, c)| c.buffs.tracked)
        .or_else(|| living(foes).next())
        .map(|(i, _)| i)
}

/// Living ally with the lowest HP fraction below the hurt threshold.
fn most_hurt(allies: &[Combatant], filter: impl Fn(&Combatant) -> bool) -> Option<usize> {
    living(allies)
        .filter(|(_, c)| c.hp_fraction() < HURT_ALLY_FRACTION && filter(c))
        .min_by(|(_, a), (_, b)| a.hp_fraction().total_cmp(&b.hp_fraction()))
        .map(|(i, _)| i)
}

/// Picks a hero's action for this turn from its class rules.
pub fn choose_hero_action(
    class: HeroClass,
    actor: usize,
    allies: &[Combatant],
    foes: &[Combatant],
    round: u32,
) -> Option<Action> {
    let me = &allies[actor];
    let target = hero_target(foes)?;
    let action = match class {
        HeroClass::Knight => {
            let someone_taunting = living(allies).any(|(_, c)| c.buffs.taunt > 0);
            if !someone_taunting {
                Action::solo(ActionType::Taunt)
            } else if me.hp_fraction() < LOW_HP_FRACTION && me.buffs.block == 0 {
                Action::solo(ActionType::Block)
            } else if me.cooldown == 0 && !foes[target].buffs.stunned {
                Action::on(ActionType::ShieldBash, target)
            } else {
                Action::on(ActionType::Strike, target)
            }
        }
        HeroClass::Warrior => {
            if living(foes).count() >= 2 {
                Action::solo(ActionType::Cleave)
            } else {
                Action::on(ActionType::Strike, target)
            }
        }
        HeroClass::Archer => {
            if me.buffs.aim {
                Action::on(ActionType::Shoot, target)
            } else if !living(foes).any(|(_, c)| c.buffs.tracked) {
                Action::on(ActionType::Track, target)
            } else if round % AIM_EVERY_ROUNDS == 0 {
                Action::solo(ActionType::Aim)
            } else {
                Action::on(ActionType::Shoot, target)
            }
        }
        HeroClass::Mage => match most_hurt(allies, |c| c.buffs.shield == 0) {
            Some(ally) => Action::on(ActionType::Barrier, ally),
            None => Action::on(ActionType::Fireball, target),
        },
        HeroClass::Cleric => {
            if let Some(ally) = most_hurt(allies, |_| true) {
                Action::on(ActionType::Heal, ally)
            } else if !living(allies).any(|(_, c)| c.buffs.blessed > 0) {
                let strongest = living(allies)
                    .max_by_key(|(i, c)| (base_damage(c.power, c.scaling), std::cmp::Reverse(*i)))
                    .map(|(i, _)| i)
                    .unwrap_or(actor);
                Action::on(ActionType::Bless, strongest)
            } else {
                Action::on(ActionType::Smite, target)
            }
        }
        HeroClass::Rogue => {
            if me.hp_fraction() < HURT_ALLY_FRACTION && me.buffs.evade == 0 {
                Action::solo(ActionType::Evade)
            } else if foes[target].buffs.poison < MAX_POISON_STACKS_TARGET {
                Action::on(ActionType::PoisonStab, target)
            } else {
                Action::on(ActionType::Strike, target)
            }
        }
    };
    Some(action)
}

/// Picks the hero an enemy swings at. A taunting hero draws every attack.
fn enemy_target<R: Rng>(behavior: EnemyBehavior, heroes: &[Combatant], rng: &mut R) -> Option<usize> {
    if let Some((i, _)) = living(heroes).find(|(_, c)| c.buffs.taunt > 0) {
        return Some(i);
    }
    if behavior == EnemyBehavior::Skirmisher {
        return living(heroes).min_by_key(|(_, c)| c.hp).map(|(i, _)| i);
    }
    let alive: Vec<usize> = living(heroes).map(|(i, _)| i).collect();
    if alive.is_empty() {
        return None;
    }
    Some(alive[rng.gen_range(0..alive.len())])
}

/// Picks an enemy's action from its behavior table.
pub fn choose_enemy_action<R: Rng>(
    behavior: EnemyBehavior,
    allies: &[Combatant],
    heroes: &[Combatant],
    round: u32,
    rng: &mut R,
) -> Option<Action> {
    if behavior == EnemyBehavior::Shaman {
        if let Some(ally) = most_hurt(allies, |_| true) {
            return Some(Action::on(ActionType::Mend, ally));
        }
    }
    let target = enemy_target(behavior, heroes, rng)?;
    let kind = match behavior {
        EnemyBehavior::Brute if round % HEAVY_BLOW_EVERY_ROUNDS == 0 => ActionType::HeavyBlow,
        EnemyBehavior::Venomous => ActionType::VenomStrike,
        _ => ActionType::Attack,
    };
    Some(Action::on(kind, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::attributes::Stats;
    use crate::character::types::{Hero, Race};
    use crate::combat::types::EnemyTemplate;
    use crate::core::rank::Rank;
    use crate::items::EquipmentCatalog;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn hero(id: u32, class: HeroClass) -> Combatant {
        let h = Hero::new(id, format!("H{}", id), Race::Human, class, Rank::D, Stats::default());
        Combatant::from_hero(&h, &EquipmentCatalog::default(), 0.0)
    }

    fn enemy(behavior: EnemyBehavior) -> Combatant {
        let t = EnemyTemplate {
            name: "Foe".to_string(),
            hp: 40,
            power: 5,
            defense: 0,
            behavior,
        };
        Combatant::from_template(&t, "Foe".to_string())
    }

    #[test]
    fn test_knight_taunts_first() {
        let allies = vec![hero(1, HeroClass::Knight)];
        let foes = vec![enemy(EnemyBehavior::Brute)];
        let action = choose_hero_action(HeroClass::Knight, 0, &allies, &foes, 1).unwrap();
        assert_eq!(action.kind, ActionType::Taunt);
    }

    #[test]
    fn test_knight_blocks_when_low() {
        let mut allies = vec![hero(1, HeroClass::Knight)];
        allies[0].buffs.taunt = 1;
        allies[0].hp = allies[0].max_hp / 4;
        let foes = vec![enemy(EnemyBehavior::Brute)];
        let action = choose_hero_action(HeroClass::Knight, 0, &allies, &foes, 2).unwrap();
        assert_eq!(action.kind, ActionType::Block);
    }

    #[test]
    fn test_knight_bashes_then_strikes() {
        let mut allies = vec![hero(1, HeroClass::Knight)];
        allies[0].buffs.taunt = 1;
        let mut foes = vec![enemy(EnemyBehavior::Brute)];
        let bash = choose_hero_action(HeroClass::Knight, 0, &allies, &foes, 1).unwrap();
        assert_eq!(bash, Action::on(ActionType::ShieldBash, 0));
        foes[0].buffs.stunned = true;
        let strike = choose_hero_action(HeroClass::Knight, 0, &allies, &foes, 1).unwrap();
        assert_eq!(strike.kind, ActionType::Strike);
    }

    #[test]
    fn test_warrior_cleaves_groups() {
        let allies = vec![hero(1, HeroClass::Warrior)];
        let mut foes = vec![enemy(EnemyBehavior::Brute), enemy(EnemyBehavior::Brute)];
        assert_eq!(
            choose_hero_action(HeroClass::Warrior, 0, &allies, &foes, 1).unwrap().kind,
            ActionType::Cleave
        );
        foes[1].hp = 0;
        assert_eq!(
            choose_hero_action(HeroClass::Warrior, 0, &allies, &foes, 1).unwrap().kind,
            ActionType::Strike
        );
    }

    #[test]
    fn test_archer_tracks_then_aims_on_third_round() {
        let allies = vec![hero(1, HeroClass::Archer)];
        let mut foes = vec![enemy(EnemyBehavior::Brute)];
        assert_eq!(
            choose_hero_action(HeroClass::Archer, 0, &allies, &foes, 1).unwrap().kind,
            ActionType::Track
        );
        foes[0].buffs.tracked = true;
        assert_eq!(
            choose_hero_action(HeroClass::Archer, 0, &allies, &foes, 2).unwrap().kind,
            ActionType::Shoot
        );
        assert_eq!(
            choose_hero_action(HeroClass::Archer, 0, &allies, &foes, 3).unwrap().kind,
            ActionType::Aim
        );
    }

    #[test]
    fn test_cleric_heals_most_hurt() {
        let mut allies = vec![
            hero(1, HeroClass::Cleric),
            hero(2, HeroClass::Warrior),
            hero(3, HeroClass::Rogue),
        ];
        allies[1].hp = allies[1].max_hp / 3;
        allies[2].hp = allies[2].max_hp / 5;
        let foes = vec![enemy(EnemyBehavior::Brute)];
        let action = choose_hero_action(HeroClass::Cleric, 0, &allies, &foes, 1).unwrap();
        assert_eq!(action, Action::on(ActionType::Heal, 2));
    }

    #[test]
    fn test_mage_skips_shielded_ally() {
        let mut allies = vec![hero(1, HeroClass::Mage), hero(2, HeroClass::Knight)];
        allies[1].hp = 5;
        allies[1].buffs.shield = 10;
        let foes = vec![enemy(EnemyBehavior::Brute)];
        let action = choose_hero_action(HeroClass::Mage, 0, &allies, &foes, 1).unwrap();
        assert_eq!(action.kind, ActionType::Fireball);
    }

    #[test]
    fn test_rogue_stacks_poison_then_strikes() {
        let allies = vec![hero(1, HeroClass::Rogue)];
        let mut foes = vec![enemy(EnemyBehavior::Brute)];
        assert_eq!(
            choose_hero_action(HeroClass::Rogue, 0, &allies, &foes, 1).unwrap().kind,
            ActionType::PoisonStab
        );
        foes[0].buffs.poison = MAX_POISON_STACKS_TARGET;
        assert_eq!(
            choose_hero_action(HeroClass::Rogue, 0, &allies, &foes, 1).unwrap().kind,
            ActionType::Strike
        );
    }

    #[test]
    fn test_no_living_foes_means_no_action() {
        let allies = vec![hero(1, HeroClass::Warrior)];
        let mut foes = vec![enemy(EnemyBehavior::Brute)];
        foes[0].hp = 0;
        assert_eq!(choose_hero_action(HeroClass::Warrior, 0, &allies, &foes, 1), None);
    }

    #[test]
    fn test_taunt_draws_enemy_attacks() {
        let mut heroes = vec![hero(1, HeroClass::Mage), hero(2, HeroClass::Knight)];
        heroes[1].buffs.taunt = 2;
        let foes = vec![enemy(EnemyBehavior::Skirmisher)];
        let mut rng = test_rng();
        for round in 1..=5 {
            let action =
                choose_enemy_action(EnemyBehavior::Skirmisher, &foes, &heroes, round, &mut rng).unwrap();
            assert_eq!(action.target, Some(1));
        }
    }

    #[test]
    fn test_skirmisher_hits_weakest() {
        let mut heroes = vec![hero(1, HeroClass::Mage), hero(2, HeroClass::Rogue)];
        heroes[1].hp = 3;
        let foes = vec![enemy(EnemyBehavior::Skirmisher)];
        let action =
            choose_enemy_action(EnemyBehavior::Skirmisher, &foes, &heroes, 1, &mut test_rng()).unwrap();
        assert_eq!(action.target, Some(1));
    }

    #[test]
    fn test_brute_heavy_blow_every_third_round() {
        let heroes = vec![hero(1, HeroClass::Mage)];
        let foes = vec![enemy(EnemyBehavior::Brute)];
        let mut rng = test_rng();
        let kinds: Vec<_> = (1..=3)
            .map(|r| choose_enemy_action(EnemyBehavior::Brute, &foes, &heroes, r, &mut rng).unwrap().kind)
            .collect();
        assert_eq!(kinds, vec![ActionType::Attack, ActionType::Attack, ActionType::HeavyBlow]);
    }

    #[test]
    fn test_shaman_mends_hurt_ally() {
        let heroes = vec![hero(1, HeroClass::Mage)];
        let mut foes = vec![enemy(EnemyBehavior::Shaman), enemy(EnemyBehavior::Brute)];
        foes[1].hp = 5;
        let action =
            choose_enemy_action(EnemyBehavior::Shaman, &foes, &heroes, 1, &mut test_rng()).unwrap();
        assert_eq!(action, Action::on(ActionType::Mend, 1));
    }
}
