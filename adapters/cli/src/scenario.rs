//! Scenario files describing a headless session.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use bastion_core::{CellCoord, EnemyKind, GridDimensions, SimulationSettings, TurretKind};
use bastion_world::Level;
use serde::Deserialize;

/// Parsed scenario file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Scenario {
    pub(crate) level: LevelSection,
    #[serde(default)]
    pub(crate) simulation: SimulationSettings,
    #[serde(default)]
    pub(crate) turrets: Vec<TurretPlacement>,
    #[serde(default)]
    pub(crate) spawning: SpawningSection,
}

/// Level grid declaration. Files are resolved relative to the scenario file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct LevelSection {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) files: Vec<PathBuf>,
}

/// Turret placed before the first tick.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TurretPlacement {
    pub(crate) kind: TurretKind,
    pub(crate) column: u32,
    pub(crate) row: u32,
}

impl TurretPlacement {
    pub(crate) const fn cell(&self) -> CellCoord {
        CellCoord::new(self.column, self.row)
    }
}

/// Enemy spawn schedule.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SpawningSection {
    /// Total number of enemies to spawn.
    pub(crate) count: u32,
    /// Kind of every spawned enemy; kinds rotate when absent.
    pub(crate) kind: Option<EnemyKind>,
    /// Seed of the spawn cell generator.
    pub(crate) seed: u64,
    /// Ticks between two spawns; zero spawns everything before the first tick.
    pub(crate) interval_ticks: u32,
    /// Minimum Chebyshev distance between a spawn cell and the player.
    pub(crate) min_player_distance: u32,
}

impl Default for SpawningSection {
    fn default() -> Self {
        Self {
            count: 4,
            kind: None,
            seed: 7,
            interval_ticks: 0,
            min_player_distance: 3,
        }
    }
}

/// Reads the scenario file and every level it references.
pub(crate) fn load(path: &Path) -> Result<(Scenario, Level)> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario {}", path.display()))?;
    let scenario = parse(&source)
        .with_context(|| format!("failed to parse scenario {}", path.display()))?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let sources = scenario
        .level
        .files
        .iter()
        .map(|file| {
            let level_path = base.join(file);
            fs::read_to_string(&level_path)
                .with_context(|| format!("failed to read level {}", level_path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let dimensions = GridDimensions::new(scenario.level.width, scenario.level.height);
    let level = Level::from_csv_sources(dimensions, &sources)
        .with_context(|| format!("failed to load levels of {}", path.display()))?;

    Ok((scenario, level))
}

fn parse(source: &str) -> Result<Scenario> {
    Ok(toml::from_str(source)?)
}
