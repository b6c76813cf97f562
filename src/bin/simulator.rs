//! Guildhall Headless Balance Simulator
//!
//! Runs a guild through repeated quest cycles without any UI and prints a
//! summary per run. Uses the same engine entry points a host would.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --cycles N      Quest cycles per run (default: 50)
//!   --seed N        RNG seed (default: 42)
//!   --runs N        Number of runs with incrementing seeds (default: 1)
//!   --config FILE   Load balance tables from JSON instead of the defaults
//!   --quiet         Only the final summary line
//!
//! Logging follows `RUST_LOG`, e.g. `RUST_LOG=guildhall=debug`.

use guildhall::character::attributes::StatType;
use guildhall::character::types::{HeroClass, HeroId, Race};
use guildhall::core::config::GameConfig;
use guildhall::core::constants::REST_SECONDS_PER_INJURY;
use guildhall::core::engine::GuildEngine;
use guildhall::core::rank::Rank;
use guildhall::core::tick::TickEvent;
use guildhall::quest::types::{Quest, QuestPhase, RewardTable};
use std::path::Path;
use tracing_subscriber::EnvFilter;

// ── CLI Configuration ────────────────────────────────────────────────

struct SimConfig {
    cycles: u32,
    seed: u64,
    runs: u32,
    config_path: Option<String>,
    quiet: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cycles: 50,
            seed: 42,
            runs: 1,
            config_path: None,
            quiet: false,
        }
    }
}

fn parse_args() -> Result<SimConfig, String> {
    let args: Vec<String> = std::env::args().collect();
    let mut config = SimConfig::default();
    let mut i = 1;
    let value = |i: usize, flag: &str| -> Result<String, String> {
        args.get(i)
            .cloned()
            .ok_or_else(|| format!("{} requires a value", flag))
    };
    while i < args.len() {
        match args[i].as_str() {
            "--cycles" => {
                i += 1;
                config.cycles = value(i, "--cycles")?
                    .parse()
                    .map_err(|_| "--cycles requires a number".to_string())?;
            }
            "--seed" => {
                i += 1;
                config.seed = value(i, "--seed")?
                    .parse()
                    .map_err(|_| "--seed requires a number".to_string())?;
            }
            "--runs" => {
                i += 1;
                config.runs = value(i, "--runs")?
                    .parse()
                    .map_err(|_| "--runs requires a number".to_string())?;
            }
            "--config" => {
                i += 1;
                config.config_path = Some(value(i, "--config")?);
            }
            "--quiet" => config.quiet = true,
            other => return Err(format!("Unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(config)
}

// ── Run Statistics ───────────────────────────────────────────────────

#[derive(Default)]
struct RunStats {
    quests: u32,
    successes: u32,
    combats: u32,
    victories: u32,
    deaths: u32,
    auto_completed: u32,
    gold_earned: u64,
    parties_promoted: u32,
}

const ROSTER: [(&str, Race, HeroClass); 4] = [
    ("Aldric", Race::Human, HeroClass::Knight),
    ("Sylva", Race::Elf, HeroClass::Archer),
    ("Morwen", Race::Halfling, HeroClass::Mage),
    ("Brother Tam", Race::Dwarf, HeroClass::Cleric),
];

fn quest_for_cycle(cycle: u32) -> Quest {
    let stats = [StatType::Strength, StatType::Dexterity, StatType::Intelligence];
    let mut quest = Quest::new(
        format!("Contract #{}", cycle + 1),
        Rank::D,
        stats[cycle as usize % stats.len()],
        12,
    );
    quest.is_combat = cycle % 2 == 1;
    quest.faction = Some(if cycle % 3 == 0 { "crown" } else { "mages_circle" }.to_string());
    quest.rewards = RewardTable {
        gold: 60,
        xp: 40,
        drops: Vec::new(),
    };
    quest
}

fn simulate(config: &GameConfig, sim: &SimConfig, seed: u64) -> Result<(RunStats, GuildEngine), String> {
    let mut engine = GuildEngine::new(format!("Guild {}", seed), config.clone(), seed);
    let mut stats = RunStats::default();

    for cycle in 0..sim.cycles {
        // Let the injured finish resting, then top the roster back up to four.
        engine.advance(REST_SECONDS_PER_INJURY * 2.0);
        let mut roster: Vec<HeroId> = engine.state().heroes.keys().copied().collect();
        for (name, race, class) in ROSTER {
            if roster.len() >= 4 {
                break;
            }
            let taken = roster
                .iter()
                .any(|id| engine.state().heroes.get(id).is_some_and(|h| h.class == class));
            if !taken {
                match engine.hire(name.to_string(), race, class, Rank::D) {
                    Ok(id) => roster.push(id),
                    Err(e) => tracing::warn!("Cycle {}: cannot hire {}: {}", cycle, name, e),
                }
            }
        }
        if roster.is_empty() {
            break;
        }
        roster.truncate(4);

        let quest_id = engine.post_quest(quest_for_cycle(cycle));
        engine.assign(quest_id, &roster).map_err(|e| e.to_string())?;
        stats.quests += 1;

        for event in engine.advance(10_000.0).events {
            match event {
                TickEvent::QuestResolved { combat_victory, .. } => {
                    if let Some(victory) = combat_victory {
                        stats.combats += 1;
                        stats.victories += victory as u32;
                    }
                }
                TickEvent::QuestAutoCompleted { .. } => stats.auto_completed += 1,
                _ => {}
            }
        }
        let awaiting = engine
            .state()
            .board
            .active_quest(quest_id)
            .is_some_and(|a| a.phase == QuestPhase::AwaitingClaim);
        if !awaiting {
            continue;
        }

        let report = engine.claim(quest_id).map_err(|e| e.to_string())?;
        stats.successes += report.success as u32;
        stats.deaths += report.deaths().len() as u32;
        stats.gold_earned += report.gold;
        stats.parties_promoted += report.promoted_party.is_some() as u32;
        if !sim.quiet {
            println!(
                "  cycle {:>3}: {:<14} {:>4} gold  deaths {}",
                cycle + 1,
                if report.success { "success" } else { "failure" },
                report.gold,
                report.deaths().len()
            );
        }
        engine.advance(10_000.0);
    }
    Ok((stats, engine))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let sim = match parse_args() {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    let config = match &sim.config_path {
        Some(path) => match GameConfig::from_file(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    for run in 0..sim.runs {
        let seed = sim.seed + run as u64;
        match simulate(&config, &sim, seed) {
            Ok((stats, engine)) => {
                let state = engine.state();
                println!(
                    "seed {}: {}/{} quests won, {}/{} fights won, {} deaths, {} auto-completed, \
                     {} gold earned, {} parties formed, guild level {}",
                    seed,
                    stats.successes,
                    stats.quests,
                    stats.victories,
                    stats.combats,
                    stats.deaths,
                    stats.auto_completed,
                    stats.gold_earned,
                    stats.parties_promoted,
                    state.guild.level
                );
            }
            Err(e) => {
                eprintln!("seed {}: run aborted: {}", seed, e);
                std::process::exit(1);
            }
        }
    }
}
