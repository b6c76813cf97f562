//! Owning facade over the guild simulation.
//!
//! [`GuildEngine`] holds the world, the read-only configuration and the one
//! seeded RNG every random decision draws from. Two engines built with the
//! same seed and driven with the same calls end in identical states.

use super::config::GameConfig;
use super::error::{GuildError, Result};
use super::game_state::GuildState;
use super::rank::Rank;
use super::tick::{advance, TickResult};
use crate::character::hiring::hire_hero;
use crate::character::types::{Hero, HeroClass, HeroId, Race};
use crate::items::equipment::{equip_item, unequip_item};
use crate::items::inventory::craft;
use crate::items::types::EquipmentSlot;
use crate::party::logic::{disband_party, form_party, party_for_roster, replace_member};
use crate::party::types::{Party, PartyId, ReplacementRecord};
use crate::quest::lifecycle::{assign_quest, claim_quest, post_quest};
use crate::quest::success::{success_breakdown, SuccessBreakdown};
use crate::quest::types::{Quest, QuestId};
use crate::rewards::logic::ClaimReport;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub struct GuildEngine {
    state: GuildState,
    config: GameConfig,
    rng: ChaCha8Rng,
}

impl GuildEngine {
    /// A fresh guild.
    pub fn new(guild_name: String, config: GameConfig, seed: u64) -> Self {
        Self::from_state(GuildState::new(guild_name), config, seed)
    }

    /// Resumes from an existing state (for save/load).
    pub fn from_state(state: GuildState, config: GameConfig, seed: u64) -> Self {
        Self {
            state,
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> &GuildState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn into_state(self) -> GuildState {
        self.state
    }

    pub fn advance(&mut self, dt: f64) -> TickResult {
        advance(&mut self.state, &self.config, dt, &mut self.rng)
    }

    pub fn hire(&mut self, name: String, race: Race, class: HeroClass, rank: Rank) -> Result<HeroId> {
        hire_hero(&mut self.state, &self.config, name, race, class, rank, &mut self.rng)
    }

    pub fn post_quest(&mut self, quest: Quest) -> QuestId {
        post_quest(&mut self.state, quest)
    }

    pub fn assign(&mut self, quest_id: QuestId, roster: &[HeroId]) -> Result<()> {
        assign_quest(&mut self.state, &self.config, quest_id, roster)
    }

    pub fn claim(&mut self, quest_id: QuestId) -> Result<ClaimReport> {
        claim_quest(&mut self.state, &self.config, quest_id, &mut self.rng)
    }

    /// Success chance a roster would have on an available quest, without
    /// assigning it.
    pub fn preview_success(&self, quest_id: QuestId, roster: &[HeroId]) -> Result<SuccessBreakdown> {
        let quest = self
            .state
            .board
            .available
            .iter()
            .find(|q| q.id == quest_id)
            .ok_or(GuildError::QuestNotAvailable(quest_id))?;
        let heroes = roster
            .iter()
            .map(|id| self.state.heroes.get(id).ok_or(GuildError::HeroNotFound(*id)))
            .collect::<Result<Vec<&Hero>>>()?;
        let party = party_for_roster(&self.state, roster).and_then(|id| self.state.parties.get(&id));
        success_breakdown(quest, &heroes, party, &self.config.catalog, &self.config.success)
    }

    pub fn equip(&mut self, hero_id: HeroId, item_id: &str) -> Result<Option<String>> {
        equip_item(&mut self.state, &self.config.catalog, hero_id, item_id)
    }

    pub fn unequip(&mut self, hero_id: HeroId, slot: EquipmentSlot) -> Result<String> {
        unequip_item(&mut self.state, hero_id, slot)
    }

    pub fn form_party(&mut self, hero_ids: &[HeroId], name: String) -> Result<PartyId> {
        form_party(&mut self.state, hero_ids, name)
    }

    pub fn replace_member(
        &mut self,
        party_id: PartyId,
        outgoing: HeroId,
        incoming: HeroId,
        train: bool,
    ) -> Result<ReplacementRecord> {
        replace_member(&mut self.state, party_id, outgoing, incoming, train)
    }

    pub fn disband(&mut self, party_id: PartyId) -> Result<Party> {
        disband_party(&mut self.state, party_id)
    }

    pub fn craft(&mut self, recipe_id: &str) -> Result<String> {
        craft(&mut self.state, &self.config, recipe_id)
    }
}
