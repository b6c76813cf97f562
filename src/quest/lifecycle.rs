//! Quest phases: available → traveling → executing → awaiting claim →
//! returning → completed.
//!
//! Entry points validate before touching state. Phase progress is driven
//! by [`crate::core::tick::advance`], which calls [`step_quest`] for each
//! active quest.

use super::success::compute_success_chance;
use super::types::{ActiveQuest, PhaseTimings, Quest, QuestId, QuestOutcome, QuestPhase};
use crate::character::types::{Hero, HeroId, HeroStatus};
use crate::combat::logic::resolve_combat;
use crate::core::config::GameConfig;
use crate::core::constants::{MAX_ROSTER_SIZE, MIN_TRAVEL_FRACTION};
use crate::core::error::{GuildError, Result};
use crate::core::game_state::GuildState;
use crate::core::tick::TickEvent;
use crate::items::types::EquipmentCatalog;
use crate::party::logic::party_for_roster;
use crate::party::types::Party;
use crate::rewards::logic::{apply_claim, ClaimReport};
use rand::Rng;

/// Puts a quest on the available board under a fresh id.
pub fn post_quest(state: &mut GuildState, mut quest: Quest) -> QuestId {
    let id = state.allocate_quest_id();
    quest.id = id;
    tracing::debug!("Posted quest {} ({}, rank {})", id, quest.name, quest.rank);
    state.board.available.push(quest);
    id
}

/// Travel seconds after party, trait and mount reductions. Never below
/// `MIN_TRAVEL_FRACTION` of the base duration.
pub fn travel_time(
    quest: &Quest,
    heroes: &[&Hero],
    party: Option<&Party>,
    catalog: &EquipmentCatalog,
) -> f64 {
    let roster: Vec<HeroId> = heroes.iter().map(|h| h.id).collect();
    let party = party.filter(|p| p.matches_roster(&roster));
    let tier = party.map_or(0.0, |p| p.tier_bonuses().travel_reduction);
    let traits = party.map_or(0.0, |p| p.trait_bonuses().travel_reduction);
    let mount = heroes
        .iter()
        .filter_map(|h| h.equipment.mount.as_deref())
        .map(|id| catalog.travel_reduction(id))
        .fold(0.0, f64::max);

    let base = quest.travel_duration;
    (base * (1.0 - tier - traits - mount)).max(base * MIN_TRAVEL_FRACTION)
}

fn check_roster(state: &GuildState, roster: &[HeroId]) -> Result<()> {
    if roster.is_empty() {
        return Err(GuildError::EmptyRoster);
    }
    if roster.len() > MAX_ROSTER_SIZE {
        return Err(GuildError::InvalidRosterSize(roster.len()));
    }
    for (i, id) in roster.iter().enumerate() {
        if roster[..i].contains(id) {
            return Err(GuildError::DuplicateHero(*id));
        }
        let hero = state.heroes.get(id).ok_or(GuildError::HeroNotFound(*id))?;
        if !hero.is_alive() {
            return Err(GuildError::HeroDead(*id));
        }
        if !hero.is_idle() {
            return Err(GuildError::HeroBusy {
                id: *id,
                status: hero.status,
            });
        }
    }
    Ok(())
}

/// Sends a roster of 1 to 4 idle heroes on an available quest.
pub fn assign_quest(
    state: &mut GuildState,
    config: &GameConfig,
    quest_id: QuestId,
    roster: &[HeroId],
) -> Result<()> {
    let index = state
        .board
        .available
        .iter()
        .position(|q| q.id == quest_id)
        .ok_or(GuildError::QuestNotAvailable(quest_id))?;
    check_roster(state, roster)?;
    if state.board.active.len() >= state.guild.quest_slots {
        return Err(GuildError::QuestSlotsFull(state.guild.quest_slots));
    }

    let quest = &state.board.available[index];
    let heroes: Vec<&Hero> = roster.iter().filter_map(|id| state.heroes.get(id)).collect();
    let best = heroes.iter().map(|h| h.rank).max().unwrap_or(quest.rank);
    if quest.rank.index() > best.index() + 1 {
        return Err(GuildError::RankTooHigh {
            quest: quest.rank,
            best,
        });
    }

    let party_id = party_for_roster(state, roster);
    let party = party_id.and_then(|id| state.parties.get(&id));
    let travel = travel_time(quest, &heroes, party, &config.catalog);
    let timings = PhaseTimings {
        travel,
        execute: quest.execute_duration,
        return_trip: travel,
    };

    let quest = state.board.available.remove(index);
    for id in roster {
        if let Some(hero) = state.heroes.get_mut(id) {
            hero.status = HeroStatus::Traveling;
        }
    }
    tracing::debug!(
        "Quest {} assigned to {:?} (travel {:.1}s)",
        quest_id,
        roster,
        travel
    );
    state.board.active.push(ActiveQuest {
        quest,
        phase: QuestPhase::Traveling,
        phase_elapsed: 0.0,
        roster: roster.to_vec(),
        party_id,
        timings,
        outcome: None,
    });
    Ok(())
}

/// Claims a quest awaiting its claim: applies rewards and consequences,
/// then sends the survivors home.
pub fn claim_quest<R: Rng>(
    state: &mut GuildState,
    config: &GameConfig,
    quest_id: QuestId,
    rng: &mut R,
) -> Result<ClaimReport> {
    let report = apply_claim(state, config, quest_id, rng)?;

    let heroes = &mut state.heroes;
    if let Some(active) = state.board.active.iter_mut().find(|a| a.id() == quest_id) {
        active.roster.retain(|id| heroes.contains_key(id));
        active.phase = QuestPhase::Returning;
        active.phase_elapsed = 0.0;
        for id in &active.roster {
            if let Some(hero) = heroes.get_mut(id) {
                hero.status = HeroStatus::Returning;
            }
        }
    }
    Ok(report)
}

/// Rolls the cached outcome at the start of execution. The quest fails
/// when the roll lands below `1 - chance`.
fn resolve_outcome<R: Rng>(
    state: &GuildState,
    config: &GameConfig,
    active: &ActiveQuest,
    rng: &mut R,
) -> QuestOutcome {
    let heroes: Vec<&Hero> = active
        .roster
        .iter()
        .filter_map(|id| state.heroes.get(id))
        .collect();
    let party = active.party_id.and_then(|id| state.parties.get(&id));
    let chance = match compute_success_chance(
        &active.quest,
        &heroes,
        party,
        &config.catalog,
        &config.success,
    ) {
        Ok(chance) => chance,
        Err(e) => {
            tracing::warn!("Quest {}: {}, using floor chance", active.id(), e);
            config.success.floor
        }
    };
    let roll = rng.gen::<f64>();
    let combat = active
        .quest
        .is_combat
        .then(|| resolve_combat(&heroes, party, active.quest.rank, config, rng));
    let success = roll >= 1.0 - chance && combat.as_ref().map_or(true, |c| c.is_victory());
    QuestOutcome {
        success,
        roll,
        chance,
        combat,
    }
}

fn set_status(state: &mut GuildState, roster: &[HeroId], status: HeroStatus) {
    for id in roster {
        if let Some(hero) = state.heroes.get_mut(id) {
            hero.status = status;
        }
    }
}

/// Idle, or resting while injuries heal.
fn release_heroes(state: &mut GuildState, roster: &[HeroId]) {
    for id in roster {
        if let Some(hero) = state.heroes.get_mut(id) {
            if hero.is_alive() {
                hero.status = if hero.rest_remaining > 0.0 {
                    HeroStatus::Resting
                } else {
                    HeroStatus::Idle
                };
            }
        }
    }
}

fn roster_problem(state: &GuildState, active: &ActiveQuest) -> Option<String> {
    active.roster.iter().find_map(|id| match state.heroes.get(id) {
        None => Some(format!("hero {} is missing", id)),
        Some(hero) if !hero.is_alive() => Some(format!("hero {} is dead", id)),
        Some(_) => None,
    })
}

/// Crosses one phase boundary. `PhaseChanged` is emitted first, followed
/// by whatever the new phase produced (`QuestResolved`, `QuestCompleted`).
fn transition<R: Rng>(
    state: &mut GuildState,
    config: &GameConfig,
    active: &mut ActiveQuest,
    rng: &mut R,
    events: &mut Vec<TickEvent>,
) {
    let from = active.phase;
    let to = match from {
        QuestPhase::Traveling => QuestPhase::Executing,
        QuestPhase::Executing => QuestPhase::AwaitingClaim,
        QuestPhase::Returning => QuestPhase::Completed,
        QuestPhase::AwaitingClaim | QuestPhase::Completed => return,
    };
    tracing::debug!("Quest {}: {} -> {}", active.id(), from.name(), to.name());
    active.phase = to;
    active.phase_elapsed = 0.0;
    events.push(TickEvent::PhaseChanged {
        quest_id: active.id(),
        from,
        to,
    });

    match to {
        QuestPhase::Executing => {
            let outcome = resolve_outcome(state, config, active, rng);
            events.push(TickEvent::QuestResolved {
                quest_id: active.id(),
                success: outcome.success,
                chance: outcome.chance,
                combat_victory: outcome.combat.as_ref().map(|c| c.is_victory()),
            });
            active.outcome = Some(outcome);
            set_status(state, &active.roster, HeroStatus::Questing);
        }
        QuestPhase::Completed => {
            release_heroes(state, &active.roster);
            state.board.completed.push(active.id());
            events.push(TickEvent::QuestCompleted {
                quest_id: active.id(),
            });
        }
        _ => {}
    }
}

/// Moves one active quest forward by `dt` seconds, carrying leftover time
/// across as many phase boundaries as it covers. The quest must already
/// be detached from `state.board.active`. Returns true once the quest is
/// finished and should leave the active pool.
pub fn step_quest<R: Rng>(
    state: &mut GuildState,
    config: &GameConfig,
    active: &mut ActiveQuest,
    dt: f64,
    rng: &mut R,
    events: &mut Vec<TickEvent>,
) -> bool {
    if let Some(reason) = roster_problem(state, active) {
        tracing::warn!("Quest {} auto-completed: {}", active.id(), reason);
        release_heroes(state, &active.roster);
        active.phase = QuestPhase::Completed;
        state.board.completed.push(active.id());
        events.push(TickEvent::QuestAutoCompleted {
            quest_id: active.id(),
            reason,
        });
        return true;
    }

    let mut remaining = dt;
    while let Some(duration) = active.phase_duration() {
        let need = (duration - active.phase_elapsed).max(0.0);
        if remaining > 0.0 && remaining >= need {
            remaining -= need;
            transition(state, config, active, rng, events);
        } else {
            active.phase_elapsed += remaining.max(0.0);
            break;
        }
    }
    active.phase == QuestPhase::Completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::attributes::{StatType, Stats};
    use crate::character::types::{HeroClass, Race};
    use crate::core::rank::Rank;
    use crate::items::types::MountTemplate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn add_hero(state: &mut GuildState, class: HeroClass, rank: Rank) -> HeroId {
        let id = state.allocate_hero_id();
        state.heroes.insert(
            id,
            Hero::new(id, format!("Hero {}", id), Race::Human, class, rank, Stats::uniform(10)),
        );
        id
    }

    fn quest(rank: Rank) -> Quest {
        Quest::new("Escort the caravan".to_string(), rank, StatType::Strength, 10)
    }

    #[test]
    fn test_post_quest_assigns_ids() {
        let mut state = GuildState::new("G".to_string());
        let a = post_quest(&mut state, quest(Rank::D));
        let b = post_quest(&mut state, quest(Rank::D));
        assert_eq!((a, b), (1, 2));
        assert_eq!(state.board.available[1].id, 2);
    }

    #[test]
    fn test_assign_moves_quest_and_heroes() {
        let config = GameConfig::default();
        let mut state = GuildState::new("G".to_string());
        let hero = add_hero(&mut state, HeroClass::Warrior, Rank::D);
        let id = post_quest(&mut state, quest(Rank::D));

        assign_quest(&mut state, &config, id, &[hero]).unwrap();
        assert!(state.board.available.is_empty());
        let active = state.board.active_quest(id).unwrap();
        assert_eq!(active.phase, QuestPhase::Traveling);
        assert_eq!(active.timings.travel, 60.0);
        assert_eq!(active.timings.return_trip, 60.0);
        assert_eq!(state.heroes[&hero].status, HeroStatus::Traveling);
    }

    #[test]
    fn test_assign_validation_leaves_state_untouched() {
        let config = GameConfig::default();
        let mut state = GuildState::new("G".to_string());
        let a = add_hero(&mut state, HeroClass::Warrior, Rank::D);
        let b = add_hero(&mut state, HeroClass::Mage, Rank::D);
        state.heroes.get_mut(&b).unwrap().status = HeroStatus::Resting;
        let id = post_quest(&mut state, quest(Rank::D));
        let before = state.clone();

        let assign = |state: &mut GuildState, quest_id, roster: &[HeroId]| {
            assign_quest(state, &config, quest_id, roster).unwrap_err()
        };
        assert_eq!(assign(&mut state, 99, &[a]), GuildError::QuestNotAvailable(99));
        assert_eq!(assign(&mut state, id, &[]), GuildError::EmptyRoster);
        assert_eq!(assign(&mut state, id, &[a, a]), GuildError::DuplicateHero(a));
        assert_eq!(assign(&mut state, id, &[a, 42]), GuildError::HeroNotFound(42));
        assert_eq!(assign(&mut state, id, &[1, 2, 3, 4, 5]), GuildError::InvalidRosterSize(5));
        assert_eq!(
            assign(&mut state, id, &[b]),
            GuildError::HeroBusy {
                id: b,
                status: HeroStatus::Resting
            }
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_assign_respects_quest_slots() {
        let config = GameConfig::default();
        let mut state = GuildState::new("G".to_string());
        state.guild.quest_slots = 1;
        let a = add_hero(&mut state, HeroClass::Warrior, Rank::D);
        let b = add_hero(&mut state, HeroClass::Mage, Rank::D);
        let first = post_quest(&mut state, quest(Rank::D));
        let second = post_quest(&mut state, quest(Rank::D));

        assign_quest(&mut state, &config, first, &[a]).unwrap();
        assert_eq!(
            assign_quest(&mut state, &config, second, &[b]).unwrap_err(),
            GuildError::QuestSlotsFull(1)
        );
    }

    #[test]
    fn test_assign_rank_gate() {
        let config = GameConfig::default();
        let mut state = GuildState::new("G".to_string());
        let hero = add_hero(&mut state, HeroClass::Warrior, Rank::D);
        let easy = post_quest(&mut state, quest(Rank::C));
        let hard = post_quest(&mut state, quest(Rank::B));

        assert_eq!(
            assign_quest(&mut state, &config, hard, &[hero]).unwrap_err(),
            GuildError::RankTooHigh {
                quest: Rank::B,
                best: Rank::D
            }
        );
        assert!(assign_quest(&mut state, &config, easy, &[hero]).is_ok());
    }

    #[test]
    fn test_travel_time_uses_best_mount_and_floor() {
        let mut catalog = EquipmentCatalog::default();
        catalog.add_mount(MountTemplate {
            id: "mule".to_string(),
            name: "Mule".to_string(),
            rank: Rank::D,
            travel_reduction: 0.1,
        });
        catalog.add_mount(MountTemplate {
            id: "dragon".to_string(),
            name: "Dragon".to_string(),
            rank: Rank::S,
            travel_reduction: 0.95,
        });
        let q = quest(Rank::D);
        let mut a = Hero::new(1, "A".to_string(), Race::Human, HeroClass::Warrior, Rank::D, Stats::uniform(10));
        let mut b = Hero::new(2, "B".to_string(), Race::Elf, HeroClass::Archer, Rank::D, Stats::uniform(10));
        a.equipment.mount = Some("mule".to_string());
        assert!((travel_time(&q, &[&a, &b], None, &catalog) - 54.0).abs() < 1e-9);

        b.equipment.mount = Some("dragon".to_string());
        assert!((travel_time(&q, &[&a, &b], None, &catalog) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_claim_before_gate_is_rejected() {
        let config = GameConfig::default();
        let mut state = GuildState::new("G".to_string());
        let hero = add_hero(&mut state, HeroClass::Warrior, Rank::D);
        let id = post_quest(&mut state, quest(Rank::D));
        assign_quest(&mut state, &config, id, &[hero]).unwrap();

        assert_eq!(
            claim_quest(&mut state, &config, id, &mut test_rng()).unwrap_err(),
            GuildError::NotAwaitingClaim(id)
        );
        assert_eq!(state.heroes[&hero].status, HeroStatus::Traveling);
    }

    #[test]
    fn test_step_through_every_phase() {
        let config = GameConfig::default();
        let mut state = GuildState::new("G".to_string());
        let hero = add_hero(&mut state, HeroClass::Warrior, Rank::D);
        let id = post_quest(&mut state, quest(Rank::D));
        assign_quest(&mut state, &config, id, &[hero]).unwrap();
        let mut rng = test_rng();
        let mut events = Vec::new();

        let mut active = state.board.active.remove(0);
        assert!(!step_quest(&mut state, &config, &mut active, 1000.0, &mut rng, &mut events));
        assert_eq!(active.phase, QuestPhase::AwaitingClaim);
        assert!(active.outcome.is_some());
        assert_eq!(state.heroes[&hero].status, HeroStatus::Questing);
        assert_eq!(events.len(), 3);
        assert!(matches!(
            events[0],
            TickEvent::PhaseChanged { to: QuestPhase::Executing, .. }
        ));
        assert!(matches!(events[1], TickEvent::QuestResolved { .. }));
        assert!(matches!(
            events[2],
            TickEvent::PhaseChanged { to: QuestPhase::AwaitingClaim, .. }
        ));
        state.board.active.push(active);

        claim_quest(&mut state, &config, id, &mut rng).unwrap();
        assert_eq!(state.heroes[&hero].status, HeroStatus::Returning);

        let mut active = state.board.active.remove(0);
        assert!(step_quest(&mut state, &config, &mut active, 60.0, &mut rng, &mut events));
        assert!(state.board.completed.contains(&id));
        assert!(matches!(
            state.heroes[&hero].status,
            HeroStatus::Idle | HeroStatus::Resting
        ));
    }
}
