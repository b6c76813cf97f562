//! Informal groups of four that quest together before becoming a party.

use super::logic::form_party;
use super::types::PartyId;
use crate::character::types::HeroId;
use crate::core::constants::{PARTY_SIZE, PROTO_PARTY_THRESHOLD};
use crate::core::game_state::GuildState;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Tracker for a group of four unaffiliated heroes. Earns no bonuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtoParty {
    /// Sorted so the same group always maps to the same tracker.
    pub members: [HeroId; PARTY_SIZE],
    pub quests_together: BTreeMap<HeroId, u32>,
}

impl ProtoParty {
    pub fn new(mut members: [HeroId; PARTY_SIZE]) -> Self {
        members.sort_unstable();
        Self {
            members,
            quests_together: members.iter().map(|&m| (m, 0)).collect(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.members
            .iter()
            .all(|m| self.quests_together.get(m).copied().unwrap_or(0) >= PROTO_PARTY_THRESHOLD)
    }
}

/// Returns the sorted group if `roster` qualifies for proto tracking:
/// four living, unaffiliated heroes of distinct classes.
fn trackable_group(state: &GuildState, roster: &[HeroId]) -> Option<[HeroId; PARTY_SIZE]> {
    if roster.len() != PARTY_SIZE {
        return None;
    }
    let mut classes = BTreeSet::new();
    for id in roster {
        let hero = state.heroes.get(id)?;
        if !hero.is_alive() || hero.party_id.is_some() || !classes.insert(hero.class) {
            return None;
        }
    }
    let mut group = [roster[0], roster[1], roster[2], roster[3]];
    group.sort_unstable();
    Some(group)
}

/// Records a claimed quest for an unaffiliated group and promotes the
/// group to an official party once every member reaches the threshold.
pub fn record_proto_quest(state: &mut GuildState, roster: &[HeroId]) -> Option<PartyId> {
    let group = trackable_group(state, roster)?;

    let index = match state.proto_parties.iter().position(|p| p.members == group) {
        Some(index) => index,
        None => {
            state.proto_parties.push(ProtoParty::new(group));
            state.proto_parties.len() - 1
        }
    };
    let tracker = &mut state.proto_parties[index];
    for count in tracker.quests_together.values_mut() {
        *count += 1;
    }
    if !tracker.is_ready() {
        return None;
    }

    let name = state
        .heroes
        .get(&group[0])
        .map(|h| format!("{}'s Company", h.name))
        .unwrap_or_else(|| "Company".to_string());
    match form_party(state, &group, name) {
        Ok(party_id) => {
            tracing::info!("Proto-party {:?} promoted to party {}", group, party_id);
            Some(party_id)
        }
        Err(e) => {
            tracing::debug!("Proto-party {:?} could not be promoted: {}", group, e);
            None
        }
    }
}

/// Drops trackers that can no longer be promoted: a member died, left
/// the roster or joined a party. Returns how many were dropped.
pub fn prune_proto_parties(state: &mut GuildState) -> usize {
    let heroes = &state.heroes;
    let before = state.proto_parties.len();
    state.proto_parties.retain(|p| {
        p.members.iter().all(|id| {
            heroes
                .get(id)
                .is_some_and(|h| h.is_alive() && h.party_id.is_none())
        })
    });
    let dropped = before - state.proto_parties.len();
    if dropped > 0 {
        tracing::debug!("Dropped {} stale proto-party trackers", dropped);
    }
    dropped
}
