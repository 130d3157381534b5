//! Headless tick loop wiring the world to its systems.

use bastion_core::{CellCoord, Command, EnemyKind, Event};
use bastion_system_enemy_ai::EnemyAi;
use bastion_system_turret_targeting::TurretTargeting;
use bastion_world::{self as world, query, World};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::scenario::{SpawningSection, TurretPlacement};

const ROTATION: [EnemyKind; 3] = [EnemyKind::Crawler, EnemyKind::Brute, EnemyKind::Stalker];

/// Aggregated results of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) ticks: u64,
    pub(crate) spawned: u32,
    pub(crate) defeated: u32,
    pub(crate) shots: u32,
    pub(crate) player_health: u32,
    pub(crate) player_defeated: bool,
    pub(crate) base_health: Option<u32>,
    pub(crate) bases_lost: u32,
}

/// Drives the world and its systems one tick at a time.
pub(crate) struct Session {
    world: World,
    ai: EnemyAi,
    targeting: TurretTargeting,
    spawning: SpawningSection,
    rng: ChaCha8Rng,
    summary: Summary,
    events: Vec<Event>,
    commands: Vec<Command>,
}

impl Session {
    pub(crate) fn new(world: World, spawning: SpawningSection, seed: u64) -> Self {
        Self {
            world,
            ai: EnemyAi::new(),
            targeting: TurretTargeting::new(),
            spawning,
            rng: ChaCha8Rng::seed_from_u64(seed),
            summary: Summary::default(),
            events: Vec::new(),
            commands: Vec::new(),
        }
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn place_turrets(&mut self, placements: &[TurretPlacement]) {
        for placement in placements {
            self.submit(Command::PlaceTurret {
                kind: placement.kind,
                cell: placement.cell(),
            });
        }
        self.flush();
    }

    /// Runs up to `ticks` ticks, stopping early once the player falls or
    /// every scheduled enemy has been spawned and deactivated.
    pub(crate) fn run(&mut self, ticks: u32) -> Summary {
        if self.spawning.interval_ticks == 0 {
            while self.summary.spawned < self.spawning.count {
                if !self.spawn_next() {
                    break;
                }
            }
            self.flush();
        }

        for _ in 0..ticks {
            self.step();

            if self.summary.player_defeated {
                break;
            }
            let exhausted = self.summary.spawned >= self.spawning.count;
            if exhausted && query::enemy_view(&self.world).is_empty() {
                break;
            }
        }

        self.summary.player_health = query::player(&self.world).health;
        self.summary.base_health = query::base_health(&self.world);
        self.summary
    }

    fn step(&mut self) {
        self.submit(Command::Tick);
        let tick = query::tick_index(&self.world);

        let interval = u64::from(self.spawning.interval_ticks);
        if interval > 0 && tick % interval == 0 && self.summary.spawned < self.spawning.count {
            let _ = self.spawn_next();
        }

        let enemies = query::enemy_view(&self.world);
        let turrets = query::turret_view(&self.world);
        let goal = Some(query::goal(&self.world));
        let pathfinding = query::settings(&self.world).pathfinding;
        let grid = query::tile_grid(&self.world);

        self.commands.clear();
        self.ai.handle(
            &self.events,
            &enemies,
            goal,
            grid.dimensions(),
            &pathfinding,
            |cell| grid.is_blocked(cell),
            &mut self.commands,
        );
        self.targeting
            .handle(&self.events, &turrets, &enemies, &mut self.commands);

        let commands = std::mem::take(&mut self.commands);
        for command in &commands {
            self.submit(*command);
        }
        self.commands = commands;
        self.flush();
    }

    fn spawn_next(&mut self) -> bool {
        let Some(cell) = self.pick_spawn_cell() else {
            log::warn!("no walkable cell left for spawning");
            return false;
        };

        let kind = self.spawning.kind.unwrap_or_else(|| {
            let index = usize::try_from(self.summary.spawned).unwrap_or(0) % ROTATION.len();
            ROTATION[index]
        });
        self.summary.spawned = self.summary.spawned.saturating_add(1);
        self.submit(Command::SpawnEnemy { kind, cell });
        true
    }

    fn pick_spawn_cell(&mut self) -> Option<CellCoord> {
        let grid = query::tile_grid(&self.world);
        let player = query::player(&self.world).cell;
        let dimensions = grid.dimensions();
        let open: Vec<CellCoord> = (0..dimensions.cell_count())
            .filter_map(|index| dimensions.cell_at(index))
            .filter(|cell| !grid.is_blocked(*cell) && *cell != player)
            .collect();

        let distant: Vec<CellCoord> = open
            .iter()
            .copied()
            .filter(|cell| cell.chebyshev_distance(player) >= self.spawning.min_player_distance)
            .collect();

        if distant.is_empty() {
            open.choose(&mut self.rng).copied()
        } else {
            distant.choose(&mut self.rng).copied()
        }
    }

    fn submit(&mut self, command: Command) {
        world::apply(&mut self.world, command, &mut self.events);
    }

    fn flush(&mut self) {
        for event in self.events.drain(..) {
            match event {
                Event::EnemyDeactivated { .. } => {
                    self.summary.defeated = self.summary.defeated.saturating_add(1);
                }
                Event::TurretFired { .. } => {
                    self.summary.shots = self.summary.shots.saturating_add(1);
                }
                Event::PlayerDefeated => self.summary.player_defeated = true,
                Event::BaseDestroyed { level } => {
                    log::warn!("base on level {level} destroyed");
                    self.summary.bases_lost = self.summary.bases_lost.saturating_add(1);
                }
                Event::TimeAdvanced { tick } => self.summary.ticks = tick,
                Event::EnemySpawnRejected { kind, cell, reason } => {
                    log::warn!("{kind:?} spawn at {cell:?} rejected: {reason:?}");
                }
                Event::TurretPlacementRejected { kind, cell, reason } => {
                    log::warn!("{kind:?} turret at {cell:?} rejected: {reason:?}");
                }
                Event::LevelAdvanced { level, .. } => log::info!("entered level {level}"),
                _ => {}
            }
            log::debug!("{event:?}");
        }
    }
}
