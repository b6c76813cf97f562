use super::types::Guild;
use crate::core::config::GameConfig;
use crate::core::constants::RIVAL_REPUTATION_FRACTION;

/// Adds guild XP and applies every level threshold it crosses. Returns the
/// new level if the guild levelled up.
pub fn add_guild_xp(guild: &mut Guild, config: &GameConfig, xp: u64) -> Option<u32> {
    guild.xp += xp;
    let start_level = guild.level;

    let reached = config
        .guild_levels
        .iter()
        .filter(|l| l.xp_required <= guild.xp)
        .max_by_key(|l| l.level);
    if let Some(level) = reached {
        if level.level > guild.level {
            guild.apply_level(level);
        }
    }

    if guild.level > start_level {
        tracing::info!(
            "Guild {} reached level {} (hero slots {}, quest slots {}, tavern rank {})",
            guild.name,
            guild.level,
            guild.hero_slots,
            guild.quest_slots,
            guild.max_tavern_rank
        );
        Some(guild.level)
    } else {
        None
    }
}

/// Changes reputation with a faction. A gain also costs standing with the
/// faction's rival at half the gain. Returns every (faction, delta) applied.
pub fn apply_reputation(
    guild: &mut Guild,
    config: &GameConfig,
    faction_id: &str,
    delta: i32,
) -> Vec<(String, i32)> {
    let mut changes = Vec::new();
    if delta == 0 {
        return changes;
    }
    *guild.reputation.entry(faction_id.to_string()).or_insert(0) += delta;
    changes.push((faction_id.to_string(), delta));

    if delta > 0 {
        let rival = config.faction(faction_id).and_then(|f| f.rival.clone());
        if let Some(rival) = rival {
            let penalty = -((delta as f64 * RIVAL_REPUTATION_FRACTION).round() as i32);
            if penalty != 0 {
                *guild.reputation.entry(rival.clone()).or_insert(0) += penalty;
                changes.push((rival, penalty));
            }
        }
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rank::Rank;

    #[test]
    fn test_guild_xp_without_level() {
        let config = GameConfig::default();
        let mut guild = Guild::new("G".to_string());
        assert_eq!(add_guild_xp(&mut guild, &config, 10), None);
        assert_eq!(guild.xp, 10);
        assert_eq!(guild.level, 1);
    }

    #[test]
    fn test_guild_level_up_raises_caps() {
        let config = GameConfig::default();
        let mut guild = Guild::new("G".to_string());
        let level2 = config.guild_levels.iter().find(|l| l.level == 2).unwrap().clone();

        assert_eq!(add_guild_xp(&mut guild, &config, level2.xp_required), Some(2));
        assert_eq!(guild.quest_slots, level2.quest_slots);
        assert_eq!(guild.max_tavern_rank, level2.max_tavern_rank);
        assert!(guild.max_tavern_rank > Rank::D);
    }

    #[test]
    fn test_guild_xp_crosses_several_levels() {
        let config = GameConfig::default();
        let mut guild = Guild::new("G".to_string());
        let top = config.guild_levels.iter().max_by_key(|l| l.level).unwrap().clone();
        assert_eq!(add_guild_xp(&mut guild, &config, top.xp_required), Some(top.level));
        assert_eq!(guild.max_tavern_rank, Rank::S);
    }

    #[test]
    fn test_reputation_gain_penalises_rival() {
        let config = GameConfig::default();
        let mut guild = Guild::new("G".to_string());
        let changes = apply_reputation(&mut guild, &config, "crown", 20);
        assert_eq!(guild.reputation_with("crown"), 20);
        assert_eq!(guild.reputation_with("thieves_guild"), -10);
        assert_eq!(changes.len(), 2);
    }

    #[test]
    fn test_reputation_loss_spares_rival() {
        let config = GameConfig::default();
        let mut guild = Guild::new("G".to_string());
        apply_reputation(&mut guild, &config, "crown", -8);
        assert_eq!(guild.reputation_with("crown"), -8);
        assert_eq!(guild.reputation_with("thieves_guild"), 0);
    }

    #[test]
    fn test_faction_without_rival() {
        let config = GameConfig::default();
        let mut guild = Guild::new("G".to_string());
        let changes = apply_reputation(&mut guild, &config, "mages_circle", 15);
        assert_eq!(changes, vec![("mages_circle".to_string(), 15)]);
    }
}
