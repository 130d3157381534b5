#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Bastion.
//!
//! The world owns the [`TileGrid`] and every entity. Commands are applied one
//! at a time through [`apply`], so an entity processed later in a tick sees
//! the grid mutations of entities processed before it.

pub mod level;
pub mod motion;
pub mod tiles;

use std::collections::BTreeMap;

use bastion_core::{
    CellCoord, Command, Direction, EnemyId, EnemyIntent, EnemyKind, EnemyProfile, EnemySnapshot,
    EnemyState, Event, HarvestError, PlacementError, RemovalError, SimulationSettings, SpawnError,
    TileCode, TileKind, TurretId, TurretKind, WELCOME_BANNER,
};

pub use level::{Level, LevelError};
pub use motion::{MicroStepMover, MobilePosition, StepReport};
pub use tiles::{RowOrder, TileGrid};

/// Represents the authoritative Bastion world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: TileGrid,
    spawns: Vec<CellCoord>,
    exits: Vec<Option<CellCoord>>,
    settings: SimulationSettings,
    mover: MicroStepMover,
    player: Player,
    base_health: u32,
    enemies: Vec<Enemy>,
    turrets: BTreeMap<TurretId, Turret>,
    next_enemy_id: u32,
    next_turret_id: u32,
    tick_index: u64,
}

impl World {
    /// Creates a world on the first level of the provided level set.
    #[must_use]
    pub fn new(level: Level, settings: SimulationSettings) -> Self {
        let (grid, spawns, exits) = level.into_parts();
        let spawn = spawns.first().copied().unwrap_or(CellCoord::new(0, 0));
        let player = Player::spawn_at(spawn, settings.player.max_health);

        Self {
            banner: WELCOME_BANNER,
            grid,
            spawns,
            exits,
            mover: MicroStepMover::new(settings.steps_per_tile),
            base_health: settings.base.max_health,
            settings,
            player,
            enemies: Vec::new(),
            turrets: BTreeMap::new(),
            next_enemy_id: 0,
            next_turret_id: 0,
            tick_index: 0,
        }
    }

    fn advance_tick(&mut self, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced {
            tick: self.tick_index,
        });

        for turret in self.turrets.values_mut() {
            turret.cooldown = turret.cooldown.saturating_sub(1);
        }

        let besieged = self.base_standing();
        let mut base_fell = false;
        let mut deactivated = Vec::new();
        for enemy in &mut self.enemies {
            enemy.attack_cooldown = enemy.attack_cooldown.saturating_sub(1);

            match enemy.state {
                EnemyState::Dead => {
                    enemy.state_ticks = enemy.state_ticks.saturating_sub(1);
                    if enemy.state_ticks == 0 {
                        deactivated.push(enemy.id);
                    }
                }
                EnemyState::Frozen => {
                    enemy.state_ticks = enemy.state_ticks.saturating_sub(1);
                    if enemy.state_ticks == 0 {
                        enemy.transition(EnemyState::Moving, out_events);
                    }
                }
                EnemyState::Attack if enemy.attack_cooldown == 0 => {
                    if besieged && self.base_health > 0 {
                        enemy.attack_cooldown = enemy.profile.attack_cooldown_ticks.max(1);
                        self.base_health =
                            self.base_health.saturating_sub(enemy.profile.attack_damage);
                        out_events.push(Event::BaseDamaged {
                            enemy: enemy.id,
                            remaining: self.base_health,
                        });
                        base_fell |= self.base_health == 0;
                    } else if !besieged && self.player.health > 0 {
                        enemy.attack_cooldown = enemy.profile.attack_cooldown_ticks.max(1);
                        self.player.take_hit(enemy.id, enemy.profile.attack_damage, out_events);
                    }
                }
                EnemyState::Attack | EnemyState::Moving | EnemyState::Blocked => {}
            }
        }

        if base_fell {
            let level = self.grid.active_level();
            let cleared = self.grid.replace_kind(TileKind::BasePart, TileCode::EMPTY);
            log::info!("base on level {level} destroyed, {cleared} part(s) cleared");
            out_events.push(Event::BaseDestroyed { level });
        }

        if deactivated.is_empty() {
            return;
        }

        self.enemies.retain(|enemy| !deactivated.contains(&enemy.id));
        for enemy in deactivated {
            log::debug!("enemy {} deactivated", enemy.get());
            out_events.push(Event::EnemyDeactivated { enemy });
        }
    }

    fn spawn_enemy(&mut self, kind: EnemyKind, cell: CellCoord, out_events: &mut Vec<Event>) {
        let rejection = if !self.grid.is_in_bounds(cell) {
            Some(SpawnError::OutOfBounds)
        } else if self.grid.is_blocked(cell) {
            Some(SpawnError::Blocked)
        } else {
            None
        };

        if let Some(reason) = rejection {
            out_events.push(Event::EnemySpawnRejected { kind, cell, reason });
            return;
        }

        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id = self.next_enemy_id.saturating_add(1);
        let profile = *self.settings.enemies.profile(kind);
        self.enemies.push(Enemy::spawn(id, kind, profile, cell));
        out_events.push(Event::EnemySpawned {
            enemy: id,
            kind,
            cell,
        });
    }

    fn steer_enemy(&mut self, enemy: EnemyId, intent: EnemyIntent, out_events: &mut Vec<Event>) {
        let grid = &self.grid;
        let mover = self.mover;
        let Some(enemy) = self.enemies.iter_mut().find(|candidate| candidate.id == enemy) else {
            return;
        };

        if !enemy.state.accepts_intents() {
            return;
        }

        match intent {
            EnemyIntent::Advance(direction) => {
                enemy.transition(EnemyState::Moving, out_events);
                let from = enemy.cell();
                let Some(target) = from.neighbor(direction, grid.dimensions()) else {
                    return;
                };
                let report = mover.advance_to(
                    &mut enemy.position,
                    target,
                    enemy.profile.speed,
                    grid.dimensions(),
                    |cell| grid.is_blocked(cell),
                );
                if report.blocked_x || report.blocked_y {
                    log::trace!("enemy {} held back by a wall: {report:?}", enemy.id.get());
                }
                let to = enemy.cell();
                if from != to {
                    out_events.push(Event::EnemyMoved {
                        enemy: enemy.id,
                        from,
                        to,
                    });
                }
            }
            EnemyIntent::Attack => enemy.transition(EnemyState::Attack, out_events),
            EnemyIntent::Hold => enemy.transition(EnemyState::Blocked, out_events),
        }
    }

    fn move_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let grid = &self.grid;
        let from = self.player.cell();
        let report = self.mover.advance_toward(
            &mut self.player.position,
            direction,
            self.settings.player.speed,
            grid.dimensions(),
            |cell| grid.is_blocked(cell),
        );
        if report.blocked_x || report.blocked_y || report.clamped {
            log::trace!("player move {direction:?} held back: {report:?}");
        }
        let to = self.player.cell();
        if from == to {
            return;
        }

        out_events.push(Event::PlayerMoved { from, to });

        let level = self.grid.active_level();
        if self.exit_of(level) == Some(to) {
            out_events.push(Event::ExitReached { level });
            self.advance_level(out_events);
        }
    }

    fn advance_level(&mut self, out_events: &mut Vec<Event>) {
        let next = self.grid.active_level().saturating_add(1);
        let Some(spawn) = usize::try_from(next)
            .ok()
            .and_then(|index| self.spawns.get(index).copied())
        else {
            return;
        };

        if !self.grid.select_level(next) {
            return;
        }

        log::info!("advancing to level {next}");
        self.player.position = MobilePosition::at(spawn);
        self.base_health = self.settings.base.max_health;
        self.enemies.clear();
        self.turrets.clear();
        out_events.push(Event::LevelAdvanced { level: next, spawn });
    }

    fn exit_of(&self, level: u32) -> Option<CellCoord> {
        self.exits
            .get(usize::try_from(level).ok()?)
            .copied()
            .flatten()
    }

    fn base_standing(&self) -> bool {
        self.base_health > 0 && self.grid.find_first_kind(TileKind::BasePart).is_some()
    }

    fn place_turret(&mut self, kind: TurretKind, cell: CellCoord, out_events: &mut Vec<Event>) {
        let rejection = match self.grid.value(cell).map(TileCode::kind) {
            None => Some(PlacementError::OutOfBounds),
            Some(TileKind::Ground) if self.player.cell() == cell => {
                Some(PlacementError::OccupiedByPlayer)
            }
            Some(TileKind::Ground) => None,
            Some(_) => Some(PlacementError::NotGround),
        };

        if let Some(reason) = rejection {
            out_events.push(Event::TurretPlacementRejected { kind, cell, reason });
            return;
        }

        let _ = self.grid.set_value(cell, TileCode::TURRET);
        let id = TurretId::new(self.next_turret_id);
        self.next_turret_id = self.next_turret_id.saturating_add(1);
        let _ = self.turrets.insert(
            id,
            Turret {
                id,
                kind,
                cell,
                cooldown: 0,
            },
        );
        out_events.push(Event::TurretPlaced {
            turret: id,
            kind,
            cell,
        });
    }

    fn remove_turret(&mut self, turret: TurretId, out_events: &mut Vec<Event>) {
        let Some(removed) = self.turrets.remove(&turret) else {
            out_events.push(Event::TurretRemovalRejected {
                turret,
                reason: RemovalError::MissingTurret,
            });
            return;
        };

        let _ = self.grid.set_value(removed.cell, TileCode::EMPTY);
        out_events.push(Event::TurretRemoved {
            turret,
            cell: removed.cell,
        });
    }

    fn fire_turret(&mut self, turret: TurretId, enemy: EnemyId, out_events: &mut Vec<Event>) {
        let Some(turret) = self.turrets.get_mut(&turret) else {
            return;
        };
        if turret.cooldown > 0 {
            return;
        }
        let Some(target) = self
            .enemies
            .iter_mut()
            .find(|candidate| candidate.id == enemy && candidate.state != EnemyState::Dead)
        else {
            return;
        };

        let profile = *self.settings.turrets.profile(turret.kind);
        turret.cooldown = profile.cooldown_ticks;
        out_events.push(Event::TurretFired {
            turret: turret.id,
            enemy,
        });

        target.health = target.health.saturating_sub(profile.damage);
        out_events.push(Event::EnemyDamaged {
            enemy,
            remaining: target.health,
        });

        if target.health == 0 {
            target.state_ticks = target.profile.death_ticks;
            target.transition(EnemyState::Dead, out_events);
        } else if profile.freeze_ticks > 0 {
            target.state_ticks = profile.freeze_ticks;
            target.transition(EnemyState::Frozen, out_events);
        }
    }

    fn harvest(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        let rejection = match self.grid.value(cell).map(TileCode::kind) {
            None => Some(HarvestError::OutOfBounds),
            Some(TileKind::Resource) if self.player.cell().chebyshev_distance(cell) == 1 => None,
            Some(TileKind::Resource) => Some(HarvestError::NotAdjacent),
            Some(_) => Some(HarvestError::NotResource),
        };

        if let Some(reason) = rejection {
            out_events.push(Event::HarvestRejected { cell, reason });
            return;
        }

        let _ = self.grid.set_value(cell, TileCode::EMPTY);
        self.player.resources = self.player.resources.saturating_add(1);
        out_events.push(Event::ResourceHarvested {
            cell,
            total: self.player.resources,
        });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => world.advance_tick(out_events),
        Command::SpawnEnemy { kind, cell } => world.spawn_enemy(kind, cell, out_events),
        Command::SteerEnemy { enemy, intent } => world.steer_enemy(enemy, intent, out_events),
        Command::MovePlayer { direction } => world.move_player(direction, out_events),
        Command::PlaceTurret { kind, cell } => world.place_turret(kind, cell, out_events),
        Command::RemoveTurret { turret } => world.remove_turret(turret, out_events),
        Command::FireTurret { turret, enemy } => world.fire_turret(turret, enemy, out_events),
        Command::Harvest { cell } => world.harvest(cell, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use bastion_core::{
        CellCoord, EnemyView, PlayerSnapshot, SimulationSettings, TileKind, TurretId,
        TurretSnapshot, TurretView,
    };

    use super::{TileGrid, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the world's tile grid.
    #[must_use]
    pub fn tile_grid(world: &World) -> &TileGrid {
        &world.grid
    }

    /// Provides read-only access to the balancing data the world runs with.
    #[must_use]
    pub fn settings(world: &World) -> &SimulationSettings {
        &world.settings
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures a read-only view of the enemies inhabiting the level.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.iter().map(|enemy| enemy.snapshot()).collect())
    }

    /// Captures a read-only view of the turrets placed in the level.
    #[must_use]
    pub fn turret_view(world: &World) -> TurretView {
        let snapshots = world
            .turrets
            .values()
            .map(|turret| TurretSnapshot {
                id: turret.id,
                kind: turret.kind,
                cell: turret.cell,
                range: world.settings.turrets.profile(turret.kind).range,
                ready: turret.cooldown == 0,
            })
            .collect();
        TurretView::from_snapshots(snapshots)
    }

    /// Identifier of the turret standing on the provided cell, if any.
    #[must_use]
    pub fn turret_at(world: &World, cell: CellCoord) -> Option<TurretId> {
        world
            .turrets
            .values()
            .find(|turret| turret.cell == cell)
            .map(|turret| turret.id)
    }

    /// Captures the player's state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            cell: world.player.cell(),
            health: world.player.health,
            resources: world.player.resources,
        }
    }

    /// Remaining integrity of the base, or `None` when the active level has
    /// no standing base.
    #[must_use]
    pub fn base_health(world: &World) -> Option<u32> {
        world.base_standing().then_some(world.base_health)
    }

    /// Cell enemies converge on: the first standing base part in row-major
    /// order, or the player's cell when the level has no base.
    #[must_use]
    pub fn goal(world: &World) -> CellCoord {
        if world.base_standing() {
            if let Some(part) = world.grid.find_first_kind(TileKind::BasePart) {
                return part;
            }
        }
        world.player.cell()
    }
}

#[derive(Clone, Debug)]
struct Player {
    position: MobilePosition,
    health: u32,
    resources: u32,
}

impl Player {
    fn spawn_at(cell: CellCoord, health: u32) -> Self {
        Self {
            position: MobilePosition::at(cell),
            health,
            resources: 0,
        }
    }

    fn cell(&self) -> CellCoord {
        self.position.cell().unwrap_or(CellCoord::new(0, 0))
    }

    fn take_hit(&mut self, enemy: EnemyId, damage: u32, out_events: &mut Vec<Event>) {
        self.health = self.health.saturating_sub(damage);
        out_events.push(Event::PlayerDamaged {
            enemy,
            remaining: self.health,
        });
        if self.health == 0 {
            log::info!("player defeated by enemy {}", enemy.get());
            out_events.push(Event::PlayerDefeated);
        }
    }
}

#[derive(Clone, Debug)]
struct Enemy {
    id: EnemyId,
    kind: EnemyKind,
    profile: EnemyProfile,
    position: MobilePosition,
    state: EnemyState,
    health: u32,
    state_ticks: u32,
    attack_cooldown: u32,
}

impl Enemy {
    fn spawn(id: EnemyId, kind: EnemyKind, profile: EnemyProfile, cell: CellCoord) -> Self {
        Self {
            id,
            kind,
            profile,
            position: MobilePosition::at(cell),
            state: EnemyState::Moving,
            health: profile.max_health.max(1),
            state_ticks: 0,
            attack_cooldown: 0,
        }
    }

    fn cell(&self) -> CellCoord {
        self.position.cell().unwrap_or(CellCoord::new(0, 0))
    }

    fn transition(&mut self, to: EnemyState, out_events: &mut Vec<Event>) {
        if self.state == to {
            return;
        }

        log::debug!("enemy {} {:?} -> {:?}", self.id.get(), self.state, to);
        out_events.push(Event::EnemyStateChanged {
            enemy: self.id,
            from: self.state,
            to,
        });
        self.state = to;
    }

    fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            kind: self.kind,
            cell: self.cell(),
            state: self.state,
            health: self.health,
            attack_range: self.profile.attack_range,
        }
    }
}

#[derive(Clone, Debug)]
struct Turret {
    id: TurretId,
    kind: TurretKind,
    cell: CellCoord,
    cooldown: u32,
}
