//! Guild-owned items and crafting materials.

use crate::core::config::GameConfig;
use crate::core::error::{GuildError, Result};
use crate::core::game_state::GuildState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    /// Unequipped items (gear, mounts, consumables) by id.
    #[serde(default)]
    pub items: BTreeMap<String, u32>,
    #[serde(default)]
    pub materials: BTreeMap<String, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item_count(&self, id: &str) -> u32 {
        self.items.get(id).copied().unwrap_or(0)
    }

    pub fn material_count(&self, id: &str) -> u32 {
        self.materials.get(id).copied().unwrap_or(0)
    }

    pub fn add_item(&mut self, id: &str, count: u32) {
        if count > 0 {
            *self.items.entry(id.to_string()).or_insert(0) += count;
        }
    }

    /// Removes one item, failing if none is owned.
    pub fn take_item(&mut self, id: &str) -> Result<()> {
        match self.items.get_mut(id) {
            Some(count) if *count > 0 => {
                *count -= 1;
                if *count == 0 {
                    self.items.remove(id);
                }
                Ok(())
            }
            _ => Err(GuildError::ItemNotOwned(id.to_string())),
        }
    }

    /// Removes up to `count` of an item and returns how many were removed.
    pub fn take_up_to(&mut self, id: &str, count: u32) -> u32 {
        let Some(owned) = self.items.get_mut(id) else {
            return 0;
        };
        let taken = count.min(*owned);
        *owned -= taken;
        if *owned == 0 {
            self.items.remove(id);
        }
        taken
    }

    pub fn add_material(&mut self, id: &str, count: u32) {
        if count > 0 {
            *self.materials.entry(id.to_string()).or_insert(0) += count;
        }
    }

    fn check_materials(&self, needs: &[(String, u32)]) -> Result<()> {
        for (material, needed) in needs {
            let available = self.material_count(material);
            if available < *needed {
                return Err(GuildError::InsufficientMaterials {
                    material: material.clone(),
                    needed: *needed,
                    available,
                });
            }
        }
        Ok(())
    }

    fn consume_materials(&mut self, needs: &[(String, u32)]) {
        for (material, needed) in needs {
            if let Some(count) = self.materials.get_mut(material) {
                *count = count.saturating_sub(*needed);
                if *count == 0 {
                    self.materials.remove(material);
                }
            }
        }
    }
}

/// Crafts a recipe, consuming its materials and gold and adding the
/// output to the inventory. Nothing changes if any input is missing.
pub fn craft(state: &mut GuildState, config: &GameConfig, recipe_id: &str) -> Result<String> {
    let recipe = config
        .recipes
        .iter()
        .find(|r| r.id == recipe_id)
        .ok_or_else(|| GuildError::UnknownRecipe(recipe_id.to_string()))?;

    state.inventory.check_materials(&recipe.inputs)?;
    if state.guild.gold < recipe.gold_cost {
        return Err(GuildError::InsufficientGold {
            needed: recipe.gold_cost,
            available: state.guild.gold,
        });
    }

    state.inventory.consume_materials(&recipe.inputs);
    state.guild.gold -= recipe.gold_cost;
    state.inventory.add_item(&recipe.output, recipe.output_count);
    tracing::debug!("Crafted {}x {}", recipe.output_count, recipe.output);
    Ok(recipe.output.clone())
}
