//! Headless boss encounter simulator.
//!
//! Loads boss and profile content, stages one boss against a player and an
//! AI squad, and runs the fight at a fixed time step.
//! Run with: `cargo run -p encounter-sim -- --boss tail_warden --squad 3`

mod runner;
mod world;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use encounter_content::{BossLoader, BossRoster, ConfigLoader, ProfileLoader, ProfileTable};
use encounter_core::{CombatAiProfile, EncounterConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use runner::{SimOptions, Simulation, Summary};

/// Headless boss encounter simulator
#[derive(Parser)]
#[command(name = "encounter-sim")]
#[command(about = "Run a boss encounter tick by tick", long_about = None)]
#[command(version)]
struct Cli {
    /// Boss to fight, by name or zone (e.g. tail_warden, "Engine Guardian")
    #[arg(short, long, default_value = "tail_warden")]
    boss: String,

    /// Extra bosses (RON catalog) layered over the built-in roster
    #[arg(long, value_name = "FILE", env = "ENCOUNTER_ROSTER")]
    roster: Option<PathBuf>,

    /// Profile tuning overrides (TOML)
    #[arg(long, value_name = "FILE", env = "ENCOUNTER_PROFILES")]
    profiles: Option<PathBuf>,

    /// Encounter configuration (TOML)
    #[arg(long, value_name = "FILE", env = "ENCOUNTER_CONFIG")]
    config: Option<PathBuf>,

    /// Seed for every AI's dice
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Seconds per tick
    #[arg(long, default_value_t = 0.1)]
    dt: f32,

    /// Give up after this many seconds
    #[arg(long, default_value_t = 300.0)]
    duration: f32,

    /// Number of AI fighting alongside the boss
    #[arg(long, default_value_t = 3)]
    squad: usize,

    /// Squad temperaments, cycled over the squad
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "disciplined,cunning,brute",
        value_parser = parse_profile
    )]
    profile: Vec<CombatAiProfile>,

    /// Damage per second the player deals
    #[arg(long, default_value_t = 15.0)]
    player_dps: f32,

    /// Player health pool
    #[arg(long, default_value_t = 1000.0)]
    player_health: f32,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "FILE", env = "ENCOUNTER_LOG_FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = setup_logging(cli.log_file.as_deref())?;

    if cli.dt <= 0.0 {
        anyhow::bail!("--dt must be positive, got {}", cli.dt);
    }
    if cli.squad > 0 && cli.profile.is_empty() {
        anyhow::bail!("--profile needs at least one profile for a squad of {}", cli.squad);
    }

    let mut roster = BossRoster::with_presets();
    if let Some(path) = &cli.roster {
        roster.extend(BossLoader::load(path)?);
    }
    let profiles = match &cli.profiles {
        Some(path) => ProfileLoader::load(path)?,
        None => ProfileTable::new(),
    };
    let config = match &cli.config {
        Some(path) => ConfigLoader::load(path)?,
        None => EncounterConfig::default(),
    };

    let template = roster.get(&cli.boss).cloned().with_context(|| {
        let known: Vec<&str> = roster.names().collect();
        format!("Unknown boss '{}'. Known: {}", cli.boss, known.join(", "))
    })?;
    let fight = template
        .build(world::BOSS, &config)
        .with_context(|| format!("Boss '{}' cannot be staged", template.name))?;

    let options = SimOptions {
        seed: cli.seed,
        dt: cli.dt,
        duration: cli.duration,
        player_dps: cli.player_dps,
        player_health: cli.player_health,
        squad: cli.profile.iter().copied().cycle().take(cli.squad).collect(),
    };
    let summary = Simulation::new(options, fight, template.max_health, profiles, config).run();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn parse_profile(name: &str) -> Result<CombatAiProfile, String> {
    name.parse().map_err(|_| {
        let known: Vec<&str> = CombatAiProfile::ALL.iter().map(|p| p.as_ref()).collect();
        format!("unknown profile '{}' (expected one of {})", name, known.join(", "))
    })
}

/// Logs to stderr, and to `log_file` as well when given.
fn setup_logging(
    log_file: Option<&Path>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let Some(path) = log_file else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
        return Ok(None);
    };

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let file_name = path
        .file_name()
        .with_context(|| format!("Log path {} has no file name", path.display()))?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::info!("Log file: {}", path.display());
    Ok(Some(guard))
}

fn print_summary(summary: &Summary) {
    println!("{} : {:?} after {:.1}s", summary.boss, summary.outcome, summary.elapsed);
    println!(
        "  boss {:.0}% ({}), player {:.0} hp",
        summary.boss_health_percent * 100.0,
        summary.final_phase,
        summary.player_health
    );
    for mark in &summary.phases {
        println!("  {:>7.2}s  {}", mark.at, mark.phase);
    }
    if let Some(at) = summary.enraged_at {
        println!("  enraged at {:.1}s", at);
    }
    println!(
        "  specials: {} started, {} hit, {} missed, {} cancelled",
        summary.attacks_started,
        summary.attacks_hit,
        summary.attacks_missed,
        summary.wind_ups_cancelled
    );
    println!(
        "  adds: {} spawned, {} defeated",
        summary.world.adds_spawned, summary.adds_defeated
    );
    println!(
        "  damage: {:.0} to boss, {:.0} to player, {} hazards sprung",
        summary.world.damage_to_boss,
        summary.world.damage_to_player,
        summary.world.hazards_triggered
    );
    println!(
        "  defense: {} blocks, {} dodges, {} counters",
        summary.defense.blocks, summary.defense.dodges, summary.defense.counters
    );
    for (kind, count) in &summary.directives {
        println!("  {:<15} {}", kind, count);
    }
}
