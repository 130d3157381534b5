#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Bastion scenario without a window.

mod scenario;
mod session;

use std::path::PathBuf;

use anyhow::Result;
use bastion_world::{query, World};
use clap::Parser;

use crate::session::Session;

/// Command-line arguments accepted by the headless driver.
#[derive(Debug, Parser)]
#[command(name = "bastion", about = "Runs a Bastion scenario headlessly")]
struct CliArgs {
    /// Scenario file describing the level, balancing data and spawns.
    #[arg(long, value_name = "PATH")]
    scenario: PathBuf,
    /// Maximum number of ticks to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u32,
    /// Overrides the spawn seed declared by the scenario.
    #[arg(long)]
    seed: Option<u64>,
}

/// Entry point for the Bastion command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = CliArgs::parse();
    let (scenario, level) = scenario::load(&args.scenario)?;
    let seed = args.seed.unwrap_or(scenario.spawning.seed);
    log::info!(
        "loaded {} level(s) of {}x{} from {}",
        level.grid().level_count(),
        scenario.level.width,
        scenario.level.height,
        args.scenario.display()
    );
    if let Some(spawn) = level.spawn(0) {
        log::info!(
            "player spawns at ({}, {}), exit {}",
            spawn.column(),
            spawn.row(),
            level.exit(0).map_or_else(
                || "absent".to_owned(),
                |exit| format!("at ({}, {})", exit.column(), exit.row())
            )
        );
    }

    let world = World::new(level, scenario.simulation);
    let mut session = Session::new(world, scenario.spawning, seed);
    println!("{}", query::welcome_banner(session.world()));

    session.place_turrets(&scenario.turrets);
    let summary = session.run(args.ticks);

    println!("ticks simulated: {}", summary.ticks);
    println!("enemies spawned: {}", summary.spawned);
    println!("enemies defeated: {}", summary.defeated);
    println!("turret shots: {}", summary.shots);
    println!("player health: {}", summary.player_health);
    match summary.base_health {
        Some(health) => println!("base health: {health}"),
        None => println!("bases lost: {}", summary.bases_lost),
    }
    println!(
        "outcome: {}",
        if summary.player_defeated {
            "overrun"
        } else {
            "holding"
        }
    );

    Ok(())
}
