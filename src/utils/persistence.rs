//! Saving and loading the guild.
//!
//! A save holds the logical entity set only: guild, heroes, graveyard,
//! parties, proto-party trackers, inventory and the available board.
//! Active quests are dropped and every hero comes back idle.
//!
//! On disk the payload is wrapped in a JSON envelope carrying a format
//! version, the save time and a SHA-256 checksum of the payload text.

use crate::character::types::{GraveRecord, Hero, HeroId, HeroStatus};
use crate::core::config::GameConfig;
use crate::core::error::LoadError;
use crate::core::game_state::GuildState;
use crate::guild::types::Guild;
use crate::items::inventory::Inventory;
use crate::party::proto::{prune_proto_parties, ProtoParty};
use crate::party::types::Party;
use crate::quest::types::{Quest, QuestBoard};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub guild: Guild,
    pub heroes: Vec<Hero>,
    #[serde(default)]
    pub graveyard: Vec<GraveRecord>,
    #[serde(default)]
    pub parties: Vec<Party>,
    #[serde(default)]
    pub proto_parties: Vec<ProtoParty>,
    #[serde(default)]
    pub inventory: Inventory,
    #[serde(default)]
    pub available_quests: Vec<Quest>,
}

impl SaveData {
    pub fn capture(state: &GuildState) -> Self {
        Self {
            guild: state.guild.clone(),
            heroes: state.heroes.values().cloned().collect(),
            graveyard: state.graveyard.clone(),
            parties: state.parties.values().cloned().collect(),
            proto_parties: state.proto_parties.clone(),
            inventory: state.inventory.clone(),
            available_quests: state.board.available.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SaveEnvelope {
    version: u32,
    /// Unix seconds.
    saved_at: i64,
    /// Lowercase hex SHA-256 of `payload`.
    checksum: String,
    payload: String,
}

fn checksum(payload: &str) -> String {
    Sha256::digest(payload.as_bytes())
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Serializes a save into its checksummed envelope.
pub fn encode(save: &SaveData) -> Result<String, LoadError> {
    let payload = serde_json::to_string(save)?;
    let envelope = SaveEnvelope {
        version: SAVE_VERSION,
        saved_at: chrono::Utc::now().timestamp(),
        checksum: checksum(&payload),
        payload,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Parses an envelope, verifying version and checksum.
pub fn decode(text: &str) -> Result<SaveData, LoadError> {
    let envelope: SaveEnvelope = serde_json::from_str(text)?;
    if envelope.version != SAVE_VERSION {
        return Err(LoadError::UnsupportedVersion(envelope.version));
    }
    if checksum(&envelope.payload) != envelope.checksum {
        return Err(LoadError::ChecksumMismatch);
    }
    Ok(serde_json::from_str(&envelope.payload)?)
}

fn unknown(what: String) -> LoadError {
    LoadError::UnknownReference(what)
}

/// Rebuilds a live state from a save. Every cross-reference is checked,
/// statuses reset to idle, and id counters resume past the largest id in
/// use.
pub fn rehydrate(save: SaveData, config: &GameConfig) -> Result<GuildState, LoadError> {
    let fallen: BTreeSet<HeroId> = save.graveyard.iter().map(|g| g.hero_id).collect();

    let mut heroes = BTreeMap::new();
    for mut hero in save.heroes {
        if fallen.contains(&hero.id) {
            return Err(unknown(format!("hero {} is both alive and buried", hero.id)));
        }
        for item in hero.equipment.iter_gear().chain(hero.equipment.mount.as_deref()) {
            if config.catalog.slot_of(item).is_none() {
                return Err(unknown(format!("item {} on hero {}", item, hero.id)));
            }
        }
        hero.status = HeroStatus::Idle;
        hero.rest_remaining = 0.0;
        let id = hero.id;
        if heroes.insert(id, hero).is_some() {
            return Err(unknown(format!("duplicate hero {}", id)));
        }
    }

    let mut parties = BTreeMap::new();
    for party in save.parties {
        for member in party.members {
            if !heroes.contains_key(&member) && !fallen.contains(&member) {
                return Err(unknown(format!("member {} of party {}", member, party.id)));
            }
        }
        let id = party.id;
        if parties.insert(id, party).is_some() {
            return Err(unknown(format!("duplicate party {}", id)));
        }
    }

    for hero in heroes.values() {
        if let Some(party_id) = hero.party_id {
            match parties.get(&party_id) {
                Some(party) if party.contains(hero.id) => {}
                _ => return Err(unknown(format!("party {} of hero {}", party_id, hero.id))),
            }
        }
    }
    for proto in &save.proto_parties {
        let unknown_member = proto
            .members
            .iter()
            .find(|id| !heroes.contains_key(*id) && !fallen.contains(*id));
        if let Some(missing) = unknown_member {
            return Err(unknown(format!("hero {} in proto-party", missing)));
        }
    }

    let next_hero_id = heroes.keys().chain(fallen.iter()).max().map_or(1, |id| id + 1);
    let next_party_id = parties.keys().max().map_or(1, |id| id + 1);
    let next_quest_id = save
        .available_quests
        .iter()
        .map(|q| q.id)
        .chain(save.graveyard.iter().map(|g| g.quest_id))
        .max()
        .map_or(1, |id| id + 1);

    let mut state = GuildState {
        guild: save.guild,
        heroes,
        graveyard: save.graveyard,
        parties,
        proto_parties: save.proto_parties,
        inventory: save.inventory,
        board: QuestBoard {
            available: save.available_quests,
            ..QuestBoard::default()
        },
        next_hero_id,
        next_party_id,
        next_quest_id,
    };
    // Groups that lost a member can never be promoted.
    prune_proto_parties(&mut state);
    Ok(state)
}

/// Reads and writes the save file.
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Uses the platform data directory, creating it if needed.
    pub fn new() -> Result<Self, LoadError> {
        let project_dirs =
            ProjectDirs::from("", "", "guildhall").ok_or(LoadError::NoSaveDirectory)?;
        let data_dir = project_dirs.data_dir();
        fs::create_dir_all(data_dir)?;
        Ok(Self {
            save_path: data_dir.join("save.json"),
        })
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    pub fn save(&self, state: &GuildState) -> Result<(), LoadError> {
        let text = encode(&SaveData::capture(state))?;
        if let Some(parent) = self.save_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.save_path, text)?;
        tracing::debug!("Saved guild {} to {}", state.guild.name, self.save_path.display());
        Ok(())
    }

    pub fn load(&self, config: &GameConfig) -> Result<GuildState, LoadError> {
        let text = fs::read_to_string(&self.save_path)?;
        rehydrate(decode(&text)?, config)
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }
}
