//! Party formation, member replacement and per-quest progression.

use super::types::*;
use crate::character::types::{HeroClass, HeroId};
use crate::core::constants::*;
use crate::core::error::{GuildError, Result};
use crate::core::game_state::GuildState;
use std::collections::BTreeSet;

/// Looks up a hero's class, including heroes already in the graveyard.
fn class_of(state: &GuildState, hero_id: HeroId) -> Option<HeroClass> {
    state.heroes.get(&hero_id).map(|h| h.class).or_else(|| {
        state
            .graveyard
            .iter()
            .find(|g| g.hero_id == hero_id)
            .map(|g| g.class)
    })
}

fn party_is_busy(state: &GuildState, party: &Party) -> bool {
    party.members.iter().any(|id| {
        state
            .heroes
            .get(id)
            .is_some_and(|h| h.status.is_on_quest())
    })
}

/// Forms an official party from exactly four unaffiliated living heroes of
/// four distinct classes. The party starts Fresh.
pub fn form_party(state: &mut GuildState, hero_ids: &[HeroId], name: String) -> Result<PartyId> {
    if hero_ids.len() != PARTY_SIZE {
        return Err(GuildError::InvalidPartySize(hero_ids.len()));
    }
    let mut seen = BTreeSet::new();
    let mut classes = BTreeSet::new();
    for &id in hero_ids {
        if !seen.insert(id) {
            return Err(GuildError::DuplicateHero(id));
        }
        let hero = state.heroes.get(&id).ok_or(GuildError::HeroNotFound(id))?;
        if !hero.is_alive() {
            return Err(GuildError::HeroDead(id));
        }
        if let Some(party) = hero.party_id {
            return Err(GuildError::AlreadyInParty { hero: id, party });
        }
        if !classes.insert(hero.class) {
            return Err(GuildError::DuplicateClass);
        }
    }
    if state.parties.len() >= MAX_PARTIES {
        return Err(GuildError::PartyLimitReached(MAX_PARTIES));
    }

    let members = [hero_ids[0], hero_ids[1], hero_ids[2], hero_ids[3]];
    let id = state.allocate_party_id();
    for member in members {
        if let Some(hero) = state.heroes.get_mut(&member) {
            hero.party_id = Some(id);
        }
    }
    state
        .proto_parties
        .retain(|p| !p.members.iter().any(|m| members.contains(m)));
    tracing::info!("Formed party {} '{}' with heroes {:?}", id, name, members);
    state.parties.insert(id, Party::new(id, name, members));
    Ok(id)
}

/// Retires a party. Members keep their stats but lose the affiliation.
pub fn disband_party(state: &mut GuildState, party_id: PartyId) -> Result<Party> {
    let party = state
        .parties
        .get(&party_id)
        .ok_or(GuildError::PartyNotFound(party_id))?;
    if party_is_busy(state, party) {
        return Err(GuildError::PartyBusy(party_id));
    }
    let party = match state.parties.remove(&party_id) {
        Some(party) => party,
        None => return Err(GuildError::PartyNotFound(party_id)),
    };
    for member in party.members {
        if let Some(hero) = state.heroes.get_mut(&member) {
            hero.party_id = None;
        }
    }
    tracing::info!("Disbanded party {} '{}'", party.id, party.name);
    Ok(party)
}

/// Swaps `outgoing` for `incoming`. A same-class successor pays the
/// reduced penalty; optional training spends gold to shorten bonding and
/// halve its penalty. All checks run before any state changes.
pub fn replace_member(
    state: &mut GuildState,
    party_id: PartyId,
    outgoing: HeroId,
    incoming: HeroId,
    train: bool,
) -> Result<ReplacementRecord> {
    let party = state
        .parties
        .get(&party_id)
        .ok_or(GuildError::PartyNotFound(party_id))?;
    if !party.contains(outgoing) {
        return Err(GuildError::NotAPartyMember {
            hero: outgoing,
            party: party_id,
        });
    }
    if party_is_busy(state, party) {
        return Err(GuildError::PartyBusy(party_id));
    }
    if !party.can_replace() {
        return Err(GuildError::ReplacementLimitReached(party_id));
    }
    if party.contains(incoming) {
        return Err(GuildError::DuplicateHero(incoming));
    }

    let newcomer = state
        .heroes
        .get(&incoming)
        .ok_or(GuildError::HeroNotFound(incoming))?;
    if !newcomer.is_alive() {
        return Err(GuildError::HeroDead(incoming));
    }
    if let Some(other) = newcomer.party_id {
        return Err(GuildError::AlreadyInParty {
            hero: incoming,
            party: other,
        });
    }
    if !newcomer.is_idle() {
        return Err(GuildError::HeroBusy {
            id: incoming,
            status: newcomer.status,
        });
    }
    let incoming_class = newcomer.class;
    let completed = party.total_quests_completed;
    let clashes = party
        .members
        .iter()
        .filter(|&&m| m != outgoing)
        .any(|&m| class_of(state, m) == Some(incoming_class));
    if clashes {
        return Err(GuildError::DuplicateClass);
    }
    if train && state.guild.gold < PARTY_TRAINING_COST {
        return Err(GuildError::InsufficientGold {
            needed: PARTY_TRAINING_COST,
            available: state.guild.gold,
        });
    }

    let kind = if class_of(state, outgoing) == Some(incoming_class) {
        ReplacementKind::Succession
    } else {
        ReplacementKind::Standard
    };
    let (deduction, mut bonding_quests, mut penalty) = kind.penalty();
    let deduction = deduction.min(completed);
    if train {
        bonding_quests = bonding_quests.saturating_sub(1).max(1);
        penalty *= TRAINING_PENALTY_MULTIPLIER;
        state.guild.gold -= PARTY_TRAINING_COST;
    }

    let record = ReplacementRecord {
        departed: outgoing,
        joined: incoming,
        kind,
        trained: train,
        quests_deducted: deduction,
    };
    if let Some(party) = state.parties.get_mut(&party_id) {
        party.total_quests_completed -= deduction;
        for slot in party.members.iter_mut() {
            if *slot == outgoing {
                *slot = incoming;
            }
        }
        party.bonding.retain(|b| b.hero_id != outgoing);
        party.bonding.push(BondingRecord {
            hero_id: incoming,
            quests_remaining: bonding_quests,
            success_penalty: penalty,
        });
        party.replacements.push(record.clone());
    }
    if let Some(hero) = state.heroes.get_mut(&outgoing) {
        hero.party_id = None;
    }
    if let Some(hero) = state.heroes.get_mut(&incoming) {
        hero.party_id = Some(party_id);
    }
    tracing::info!(
        "Party {}: hero {} replaced by {} ({:?}, trained: {})",
        party_id,
        outgoing,
        incoming,
        kind,
        train
    );
    Ok(record)
}

/// Finds the formed party whose membership is exactly `roster`.
pub fn party_for_roster(state: &GuildState, roster: &[HeroId]) -> Option<PartyId> {
    state
        .parties
        .values()
        .find(|p| p.matches_roster(roster))
        .map(|p| p.id)
}

/// What one claimed quest did to a party.
#[derive(Debug, Clone, PartialEq)]
pub struct PartyProgress {
    pub tier_before: PartyTier,
    pub tier_after: PartyTier,
    pub traits_unlocked: Vec<PartyTrait>,
}

/// Counts down the bonding slot of every roster hero in `party`. Applies
/// to any claimed quest the bonding member went on, with or without the
/// rest of the party. Returns the heroes who finished bonding.
pub fn count_down_bonding(party: &mut Party, roster: &[HeroId]) -> Vec<HeroId> {
    let mut completed = Vec::new();
    for record in party.bonding.iter_mut() {
        if !roster.contains(&record.hero_id) {
            continue;
        }
        record.quests_remaining = record.quests_remaining.saturating_sub(1);
        if record.quests_remaining == 0 {
            completed.push(record.hero_id);
        }
    }
    party.bonding.retain(|b| b.quests_remaining > 0);
    if !completed.is_empty() {
        tracing::debug!("Party {}: heroes {:?} finished bonding", party.id, completed);
    }
    completed
}

/// Records a quest claimed by the full party: success counts toward tier,
/// milestone counters advance and traits unlock.
pub fn record_party_quest(
    party: &mut Party,
    success: bool,
    combat_victory: bool,
    flawless: bool,
) -> PartyProgress {
    let tier_before = party.tier();
    if success {
        party.total_quests_completed += 1;
    }
    if combat_victory {
        party.combat_victories += 1;
    }
    if flawless {
        party.flawless_quests += 1;
    }

    let mut traits_unlocked = Vec::new();
    for t in PartyTrait::ALL {
        if !party.traits.contains(&t) && t.is_earned(party) {
            party.traits.push(t);
            traits_unlocked.push(t);
        }
    }

    let tier_after = party.tier();
    if tier_after != tier_before {
        tracing::info!(
            "Party {} advanced from {} to {}",
            party.id,
            tier_before.name(),
            tier_after.name()
        );
    }
    PartyProgress {
        tier_before,
        tier_after,
        traits_unlocked,
    }
}
