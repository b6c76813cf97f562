use super::types::{EquipmentCatalog, EquipmentSlot};
use crate::character::types::HeroId;
use crate::core::error::{GuildError, Result};
use crate::core::game_state::GuildState;
use serde::{Deserialize, Serialize};

/// Hero equipment slots, holding catalog item ids.
///
/// IMPORTANT: New slots need `#[serde(default)]` so older saves still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default)]
    pub weapon: Option<String>,
    #[serde(default)]
    pub armor: Option<String>,
    #[serde(default)]
    pub accessory: Option<String>,
    #[serde(default)]
    pub mount: Option<String>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&str> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.as_deref(),
            EquipmentSlot::Armor => self.armor.as_deref(),
            EquipmentSlot::Accessory => self.accessory.as_deref(),
            EquipmentSlot::Mount => self.mount.as_deref(),
        }
    }

    /// Puts `item` in `slot`, returning whatever was there before.
    pub fn set(&mut self, slot: EquipmentSlot, item: Option<String>) -> Option<String> {
        let target = match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Accessory => &mut self.accessory,
            EquipmentSlot::Mount => &mut self.mount,
        };
        std::mem::replace(target, item)
    }

    /// Item ids in slots that feed success and combat math (never the mount).
    pub fn iter_gear(&self) -> impl Iterator<Item = &str> {
        EquipmentSlot::ALL
            .into_iter()
            .filter(|slot| slot.affects_quest_success())
            .filter_map(move |slot| self.get(slot))
    }
}

/// Equips an owned item on an idle or resting hero. The displaced item, if
/// any, goes back to the guild inventory and is returned.
pub fn equip_item(
    state: &mut GuildState,
    catalog: &EquipmentCatalog,
    hero_id: HeroId,
    item_id: &str,
) -> Result<Option<String>> {
    let hero = state
        .heroes
        .get(&hero_id)
        .ok_or(GuildError::HeroNotFound(hero_id))?;
    if !hero.is_alive() {
        return Err(GuildError::HeroDead(hero_id));
    }
    if hero.status.is_on_quest() {
        return Err(GuildError::HeroBusy {
            id: hero_id,
            status: hero.status,
        });
    }
    let slot = catalog
        .slot_of(item_id)
        .ok_or_else(|| GuildError::UnknownItem(item_id.to_string()))?;
    state.inventory.take_item(item_id)?;

    let displaced = match state.heroes.get_mut(&hero_id) {
        Some(hero) => hero.equipment.set(slot, Some(item_id.to_string())),
        None => None,
    };
    if let Some(old) = &displaced {
        state.inventory.add_item(old, 1);
    }
    tracing::debug!("Hero {} equipped {} in {}", hero_id, item_id, slot.name());
    Ok(displaced)
}

/// Removes the item in `slot` and returns it to the guild inventory.
pub fn unequip_item(state: &mut GuildState, hero_id: HeroId, slot: EquipmentSlot) -> Result<String> {
    let hero = state
        .heroes
        .get_mut(&hero_id)
        .ok_or(GuildError::HeroNotFound(hero_id))?;
    if hero.status.is_on_quest() {
        return Err(GuildError::HeroBusy {
            id: hero_id,
            status: hero.status,
        });
    }
    let removed = hero
        .equipment
        .set(slot, None)
        .ok_or_else(|| GuildError::SlotEmpty(slot.name().to_string()))?;
    state.inventory.add_item(&removed, 1);
    Ok(removed)
}
