use crate::character::types::{GraveRecord, Hero, HeroId};
use crate::guild::types::Guild;
use crate::items::inventory::Inventory;
use crate::party::proto::ProtoParty;
use crate::party::types::{Party, PartyId};
use crate::quest::types::{QuestBoard, QuestId};
use std::collections::BTreeMap;

/// The whole mutable world, passed explicitly into every entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildState {
    pub guild: Guild,
    pub heroes: BTreeMap<HeroId, Hero>,
    pub graveyard: Vec<GraveRecord>,
    pub parties: BTreeMap<PartyId, Party>,
    pub proto_parties: Vec<ProtoParty>,
    pub inventory: Inventory,
    pub board: QuestBoard,
    pub next_hero_id: HeroId,
    pub next_party_id: PartyId,
    pub next_quest_id: QuestId,
}

impl GuildState {
    pub fn new(guild_name: String) -> Self {
        Self {
            guild: Guild::new(guild_name),
            heroes: BTreeMap::new(),
            graveyard: Vec::new(),
            parties: BTreeMap::new(),
            proto_parties: Vec::new(),
            inventory: Inventory::new(),
            board: QuestBoard::default(),
            next_hero_id: 1,
            next_party_id: 1,
            next_quest_id: 1,
        }
    }

    pub fn allocate_hero_id(&mut self) -> HeroId {
        let id = self.next_hero_id;
        self.next_hero_id += 1;
        id
    }

    pub fn allocate_party_id(&mut self) -> PartyId {
        let id = self.next_party_id;
        self.next_party_id += 1;
        id
    }

    pub fn allocate_quest_id(&mut self) -> QuestId {
        let id = self.next_quest_id;
        self.next_quest_id += 1;
        id
    }

    pub fn living_hero_count(&self) -> usize {
        self.heroes.values().filter(|h| h.is_alive()).count()
    }

    /// The party a hero belongs to, as recorded by the party itself.
    pub fn party_of(&self, hero_id: HeroId) -> Option<&Party> {
        self.parties.values().find(|p| p.contains(hero_id))
    }
}
