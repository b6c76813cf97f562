//! The per-frame simulation step.
//!
//! [`advance`] moves every resting hero and active quest forward by `dt`
//! seconds and returns a [`TickResult`] describing what happened, so the
//! host can update its presentation without the core knowing about it.

use crate::character::types::{HeroId, HeroStatus};
use crate::core::config::GameConfig;
use crate::core::game_state::GuildState;
use crate::quest::lifecycle::step_quest;
use crate::quest::types::{QuestId, QuestPhase};
use rand::Rng;

/// A single event produced by [`advance`].
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    // ── Quests ──────────────────────────────────────────────────
    /// A quest crossed a phase boundary.
    PhaseChanged {
        quest_id: QuestId,
        from: QuestPhase,
        to: QuestPhase,
    },

    /// The outcome was rolled as the roster began executing.
    QuestResolved {
        quest_id: QuestId,
        success: bool,
        chance: f64,
        combat_victory: Option<bool>,
    },

    /// The roster made it home and the quest left the active pool.
    QuestCompleted { quest_id: QuestId },

    /// The roster became inconsistent and the quest was closed early.
    QuestAutoCompleted { quest_id: QuestId, reason: String },

    // ── Heroes ──────────────────────────────────────────────────
    /// A resting hero finished recovering and is idle again.
    HeroRecovered { hero_id: HeroId },
}

#[derive(Debug, Clone, Default)]
pub struct TickResult {
    /// Events produced during this step, in order.
    pub events: Vec<TickEvent>,
}

impl TickResult {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

fn recover_heroes(state: &mut GuildState, dt: f64, result: &mut TickResult) {
    for hero in state.heroes.values_mut() {
        if hero.status != HeroStatus::Resting {
            continue;
        }
        hero.rest_remaining -= dt;
        if hero.rest_remaining <= 0.0 {
            hero.rest_remaining = 0.0;
            hero.status = HeroStatus::Idle;
            tracing::debug!("{} recovered", hero.name);
            result.events.push(TickEvent::HeroRecovered { hero_id: hero.id });
        }
    }
}

/// Advances the world by `dt` seconds. Non-positive `dt` changes nothing.
pub fn advance<R: Rng>(
    state: &mut GuildState,
    config: &GameConfig,
    dt: f64,
    rng: &mut R,
) -> TickResult {
    let mut result = TickResult::default();
    if dt.is_nan() || dt <= 0.0 {
        return result;
    }

    // ── 1. Rest recovery ────────────────────────────────────────
    recover_heroes(state, dt, &mut result);

    // ── 2. Quest phases ─────────────────────────────────────────
    let active = std::mem::take(&mut state.board.active);
    let mut still_active = Vec::with_capacity(active.len());
    for mut quest in active {
        let finished = step_quest(state, config, &mut quest, dt, rng, &mut result.events);
        if !finished {
            still_active.push(quest);
        }
    }
    state.board.active = still_active;

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::attributes::{StatType, Stats};
    use crate::character::types::{Hero, HeroClass, Race};
    use crate::core::rank::Rank;
    use crate::quest::lifecycle::{assign_quest, claim_quest, post_quest};
    use crate::quest::types::Quest;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    /// One idle D-rank warrior on a 60s travel, 30s execute quest.
    fn started() -> (GuildState, GameConfig, QuestId, HeroId) {
        let config = GameConfig::default();
        let mut state = GuildState::new("G".to_string());
        let hero_id = state.allocate_hero_id();
        state.heroes.insert(
            hero_id,
            Hero::new(hero_id, "Bram".to_string(), Race::Dwarf, HeroClass::Warrior, Rank::D, Stats::uniform(10)),
        );
        let quest = Quest::new("Rat cellar".to_string(), Rank::D, StatType::Strength, 10);
        let quest_id = post_quest(&mut state, quest);
        assign_quest(&mut state, &config, quest_id, &[hero_id]).unwrap();
        (state, config, quest_id, hero_id)
    }

    fn phase(state: &GuildState, id: QuestId) -> QuestPhase {
        state.board.active_quest(id).unwrap().phase
    }

    #[test]
    fn test_zero_dt_changes_nothing() {
        let (mut state, config, _, _) = started();
        let before = state.clone();
        let result = advance(&mut state, &config, 0.0, &mut test_rng());
        assert!(result.is_empty());
        assert_eq!(state, before);
        advance(&mut state, &config, -5.0, &mut test_rng());
        assert_eq!(state, before);
    }

    #[test]
    fn test_partial_dt_accumulates() {
        let (mut state, config, id, _) = started();
        let mut rng = test_rng();
        advance(&mut state, &config, 25.0, &mut rng);
        advance(&mut state, &config, 25.0, &mut rng);
        let active = state.board.active_quest(id).unwrap();
        assert_eq!(active.phase, QuestPhase::Traveling);
        assert_eq!(active.phase_elapsed, 50.0);
    }

    #[test]
    fn test_dt_equal_to_phase_crosses_one_boundary() {
        let (mut state, config, id, hero) = started();
        let result = advance(&mut state, &config, 60.0, &mut test_rng());
        assert_eq!(phase(&state, id), QuestPhase::Executing);
        assert_eq!(state.board.active_quest(id).unwrap().phase_elapsed, 0.0);
        assert_eq!(state.heroes[&hero].status, HeroStatus::Questing);
        assert!(result.events.contains(&TickEvent::PhaseChanged {
            quest_id: id,
            from: QuestPhase::Traveling,
            to: QuestPhase::Executing,
        }));
    }

    #[test]
    fn test_large_dt_carries_overflow_and_stops_at_claim_gate() {
        let (mut state, config, id, _) = started();
        let result = advance(&mut state, &config, 10_000.0, &mut test_rng());
        assert_eq!(phase(&state, id), QuestPhase::AwaitingClaim);
        let changes = result
            .events
            .iter()
            .filter(|e| matches!(e, TickEvent::PhaseChanged { .. }))
            .count();
        assert_eq!(changes, 2);
        assert!(state.board.active_quest(id).unwrap().outcome.is_some());
    }

    #[test]
    fn test_overflow_lands_inside_next_phase() {
        let (mut state, config, id, _) = started();
        advance(&mut state, &config, 70.0, &mut test_rng());
        let active = state.board.active_quest(id).unwrap();
        assert_eq!(active.phase, QuestPhase::Executing);
        assert!((active.phase_elapsed - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_outcome_is_rolled_once() {
        let (mut state, config, id, _) = started();
        let mut rng = test_rng();
        advance(&mut state, &config, 60.0, &mut rng);
        let first = state.board.active_quest(id).unwrap().outcome.clone();
        advance(&mut state, &config, 30.0, &mut rng);
        advance(&mut state, &config, 500.0, &mut rng);
        assert_eq!(state.board.active_quest(id).unwrap().outcome, first);
    }

    #[test]
    fn test_full_lifecycle_completes() {
        let (mut state, config, id, hero) = started();
        let mut rng = test_rng();
        advance(&mut state, &config, 90.0, &mut rng);
        claim_quest(&mut state, &config, id, &mut rng).unwrap();
        assert_eq!(phase(&state, id), QuestPhase::Returning);

        let result = advance(&mut state, &config, 60.0, &mut rng);
        assert!(result.events.contains(&TickEvent::QuestCompleted { quest_id: id }));
        assert!(state.board.active.is_empty());
        assert_eq!(state.board.completed, vec![id]);
        assert_ne!(state.heroes[&hero].status, HeroStatus::Returning);
    }

    #[test]
    fn test_missing_hero_auto_completes_quest() {
        let (mut state, config, id, hero) = started();
        let helper = state.allocate_hero_id();
        state.heroes.insert(
            helper,
            Hero::new(helper, "Ilsa".to_string(), Race::Elf, HeroClass::Archer, Rank::D, Stats::uniform(10)),
        );
        state.board.active[0].roster.push(helper);
        state.heroes.remove(&hero);

        let result = advance(&mut state, &config, 1.0, &mut test_rng());
        assert!(matches!(
            result.events.as_slice(),
            [TickEvent::QuestAutoCompleted { quest_id, .. }] if *quest_id == id
        ));
        assert!(state.board.active.is_empty());
        assert!(state.board.completed.contains(&id));
        assert_eq!(state.heroes[&helper].status, HeroStatus::Idle);
    }

    #[test]
    fn test_resting_heroes_recover() {
        let (mut state, config, _, _) = started();
        let id = state.allocate_hero_id();
        let mut hero = Hero::new(id, "Wren".to_string(), Race::Halfling, HeroClass::Rogue, Rank::D, Stats::uniform(10));
        hero.status = HeroStatus::Resting;
        hero.rest_remaining = 100.0;
        state.heroes.insert(id, hero);
        let mut rng = test_rng();

        advance(&mut state, &config, 40.0, &mut rng);
        assert_eq!(state.heroes[&id].status, HeroStatus::Resting);
        assert_eq!(state.heroes[&id].rest_remaining, 60.0);

        let result = advance(&mut state, &config, 60.0, &mut rng);
        assert!(result.events.contains(&TickEvent::HeroRecovered { hero_id: id }));
        assert_eq!(state.heroes[&id].status, HeroStatus::Idle);
    }
}
