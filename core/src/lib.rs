#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Bastion engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.
//!
//! The tile code taxonomy in [`TileCode`] doubles as the level file format, so
//! its numeric ranges are fixed.

mod settings;

pub use settings::{
    BaseProfile, EnemyProfile, EnemyRoster, PlayerProfile, SimulationSettings, TurretProfile,
    TurretRoster,
};

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Bastion.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the simulation by a single tick.
    Tick,
    /// Requests that a new enemy enters the level at the provided cell.
    SpawnEnemy {
        /// Kind of enemy to create.
        kind: EnemyKind,
        /// Cell the enemy should occupy after spawning.
        cell: CellCoord,
    },
    /// Hands the controller's decision for a single enemy to the world.
    SteerEnemy {
        /// Identifier of the enemy being steered.
        enemy: EnemyId,
        /// Decision computed for the enemy this tick.
        intent: EnemyIntent,
    },
    /// Requests that the player moves toward the provided direction.
    MovePlayer {
        /// Direction of travel for this tick.
        direction: Direction,
    },
    /// Requests placement of a turret on the provided cell.
    PlaceTurret {
        /// Type of turret to construct.
        kind: TurretKind,
        /// Cell that receives the turret tile code.
        cell: CellCoord,
    },
    /// Requests removal of an existing turret.
    RemoveTurret {
        /// Identifier of the turret targeted for removal.
        turret: TurretId,
    },
    /// Requests that a turret discharges at an enemy.
    FireTurret {
        /// Turret that fires.
        turret: TurretId,
        /// Enemy that receives the hit.
        enemy: EnemyId,
    },
    /// Requests that the player harvests a resource deposit.
    Harvest {
        /// Cell holding the resource deposit.
        cell: CellCoord,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Index of the tick that just started.
        tick: u64,
    },
    /// Confirms that an enemy entered the level.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Kind of the spawned enemy.
        kind: EnemyKind,
        /// Cell the enemy occupies.
        cell: CellCoord,
    },
    /// Reports that an enemy spawn request was rejected.
    EnemySpawnRejected {
        /// Kind requested for the spawn.
        kind: EnemyKind,
        /// Cell requested for the spawn.
        cell: CellCoord,
        /// Specific reason the spawn failed.
        reason: SpawnError,
    },
    /// Confirms that an enemy crossed into a new tile.
    EnemyMoved {
        /// Identifier of the enemy that moved.
        enemy: EnemyId,
        /// Tile occupied before the move.
        from: CellCoord,
        /// Tile occupied after the move.
        to: CellCoord,
    },
    /// Announces a transition of an enemy's behaviour state.
    EnemyStateChanged {
        /// Identifier of the enemy.
        enemy: EnemyId,
        /// State before the transition.
        from: EnemyState,
        /// State after the transition.
        to: EnemyState,
    },
    /// Reports that an enemy took damage.
    EnemyDamaged {
        /// Identifier of the damaged enemy.
        enemy: EnemyId,
        /// Health remaining after the hit.
        remaining: u32,
    },
    /// Announces that a dead enemy finished its death animation and left the registry.
    EnemyDeactivated {
        /// Identifier of the removed enemy.
        enemy: EnemyId,
    },
    /// Confirms that the player crossed into a new tile.
    PlayerMoved {
        /// Tile occupied before the move.
        from: CellCoord,
        /// Tile occupied after the move.
        to: CellCoord,
    },
    /// Reports that an attacking enemy damaged the player.
    PlayerDamaged {
        /// Enemy responsible for the hit.
        enemy: EnemyId,
        /// Health remaining after the hit.
        remaining: u32,
    },
    /// Announces that the player's health reached zero.
    PlayerDefeated,
    /// Reports that an attacking enemy damaged the base.
    BaseDamaged {
        /// Enemy responsible for the hit.
        enemy: EnemyId,
        /// Base integrity remaining after the hit.
        remaining: u32,
    },
    /// Announces that the base fell and its parts were cleared from the level.
    BaseDestroyed {
        /// Level the base stood on.
        level: u32,
    },
    /// Confirms that a turret was placed.
    TurretPlaced {
        /// Identifier allocated to the turret.
        turret: TurretId,
        /// Type of turret that was placed.
        kind: TurretKind,
        /// Cell now holding the turret tile code.
        cell: CellCoord,
    },
    /// Reports that a turret placement request was rejected.
    TurretPlacementRejected {
        /// Type of turret requested.
        kind: TurretKind,
        /// Cell provided in the request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a turret was removed.
    TurretRemoved {
        /// Identifier of the removed turret.
        turret: TurretId,
        /// Cell that was reset to empty ground.
        cell: CellCoord,
    },
    /// Reports that a turret removal request was rejected.
    TurretRemovalRejected {
        /// Identifier provided in the request.
        turret: TurretId,
        /// Specific reason the removal failed.
        reason: RemovalError,
    },
    /// Confirms that a turret discharged at an enemy.
    TurretFired {
        /// Turret that fired.
        turret: TurretId,
        /// Enemy that was hit.
        enemy: EnemyId,
    },
    /// Confirms that a resource deposit was harvested.
    ResourceHarvested {
        /// Cell that held the deposit.
        cell: CellCoord,
        /// Total resources collected so far.
        total: u32,
    },
    /// Reports that a harvest request was rejected.
    HarvestRejected {
        /// Cell provided in the request.
        cell: CellCoord,
        /// Specific reason the harvest failed.
        reason: HarvestError,
    },
    /// Announces that the player stepped onto the level exit.
    ExitReached {
        /// Level the exit belongs to.
        level: u32,
    },
    /// Announces that the next level became active.
    LevelAdvanced {
        /// Index of the level that became active.
        level: u32,
        /// Cell the player spawned on.
        spawn: CellCoord,
    },
}

/// Integer code stored per grid cell.
///
/// Level files encode these values literally:
///
/// | Range | Meaning |
/// |---|---|
/// | 0–98 | walkable ground and pickups |
/// | 99 | level exit |
/// | 100–199 | blocking structures, with the exceptions below |
/// | 136–139 | base structure parts (blocking) |
/// | 140–144 | resource deposits (blocking, harvestable) |
/// | 150 | turret (not blocking) |
/// | 200 | player spawn marker |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCode(i32);

impl TileCode {
    /// Plain walkable ground.
    pub const EMPTY: Self = Self(0);
    /// Level exit marker.
    pub const EXIT: Self = Self(99);
    /// Generic wall segment.
    pub const WALL: Self = Self(101);
    /// Turret placement.
    pub const TURRET: Self = Self(150);
    /// Player spawn marker, erased when the level loads.
    pub const PLAYER_SPAWN: Self = Self(200);

    /// Wraps a raw tile code.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Retrieves the raw tile code.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Classifies the code according to the tile taxonomy.
    #[must_use]
    pub const fn kind(self) -> TileKind {
        match self.0 {
            0..=98 => TileKind::Ground,
            99 => TileKind::Exit,
            136..=139 => TileKind::BasePart,
            140..=144 => TileKind::Resource,
            150 => TileKind::Turret,
            100..=199 => TileKind::Structure,
            200 => TileKind::PlayerSpawn,
            _ => TileKind::Unclassified,
        }
    }

    /// Reports whether the code blocks movement and path expansion.
    ///
    /// Every code in `[100, 200)` blocks except the turret code.
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        self.0 >= 100 && self.0 < 200 && self.0 != Self::TURRET.0
    }
}

/// Semantic classification of a [`TileCode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// Walkable terrain variants and collectible pickups.
    Ground,
    /// Level exit marker.
    Exit,
    /// Walls and map borders.
    Structure,
    /// Parts of the defended base structure.
    BasePart,
    /// Harvestable resource deposit.
    Resource,
    /// Player-placed turret.
    Turret,
    /// Player spawn marker.
    PlayerSpawn,
    /// Code outside every known range.
    Unclassified,
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Computes the Chebyshev distance, the step count of an 8-connected walk.
    #[must_use]
    pub fn chebyshev_distance(self, other: CellCoord) -> u32 {
        self.column()
            .abs_diff(other.column())
            .max(self.row().abs_diff(other.row()))
    }

    /// Computes the straight-line distance between two cells in tile units.
    #[must_use]
    pub fn euclidean_distance(self, other: CellCoord) -> f32 {
        let dx = self.column().abs_diff(other.column()) as f32;
        let dy = self.row().abs_diff(other.row()) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns the neighbouring cell in the provided direction, if it lies inside the grid.
    #[must_use]
    pub fn neighbor(self, direction: Direction, dimensions: GridDimensions) -> Option<CellCoord> {
        let (dx, dy) = direction.delta();
        let column = self.column.checked_add_signed(dx)?;
        let row = self.row.checked_add_signed(dy)?;
        let cell = CellCoord::new(column, row);
        dimensions.contains(cell).then_some(cell)
    }
}

/// Fixed dimensions of a level grid measured in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDimensions {
    width: u32,
    height: u32,
}

impl GridDimensions {
    /// Creates a new dimension descriptor.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells in a single level.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let count = u64::from(self.width) * u64::from(self.height);
        usize::try_from(count).unwrap_or(0)
    }

    /// Reports whether the cell lies within `[0, width) x [0, height)`.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.width && cell.row() < self.height
    }

    /// Row-major offset of the cell, `row * width + column`.
    ///
    /// This is the only linearisation used by the grid and by search
    /// workspaces.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }

        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.width).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    /// Inverse of [`GridDimensions::index`].
    #[must_use]
    pub fn cell_at(&self, index: usize) -> Option<CellCoord> {
        if index >= self.cell_count() {
            return None;
        }

        let width = usize::try_from(self.width).ok()?;
        let column = u32::try_from(index % width).ok()?;
        let row = u32::try_from(index / width).ok()?;
        Some(CellCoord::new(column, row))
    }

    /// Mirrors the row index so top-down and bottom-up origins map onto each other.
    #[must_use]
    pub fn flip_row(&self, cell: CellCoord) -> Option<CellCoord> {
        if !self.contains(cell) {
            return None;
        }

        Some(CellCoord::new(cell.column(), self.height - cell.row() - 1))
    }
}

/// Compass directions available to mobile entities.
///
/// Rows grow toward the south, columns toward the east.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Diagonal movement toward the upper right.
    NorthEast,
    /// Movement toward increasing column indices.
    East,
    /// Diagonal movement toward the lower right.
    SouthEast,
    /// Movement toward increasing row indices.
    South,
    /// Diagonal movement toward the lower left.
    SouthWest,
    /// Movement toward decreasing column indices.
    West,
    /// Diagonal movement toward the upper left.
    NorthWest,
}

impl Direction {
    /// Cardinal directions in expansion order.
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Cardinal directions followed by diagonals, in expansion order.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// Column and row delta of a single step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::NorthEast => (1, -1),
            Self::East => (1, 0),
            Self::SouthEast => (1, 1),
            Self::South => (0, 1),
            Self::SouthWest => (-1, 1),
            Self::West => (-1, 0),
            Self::NorthWest => (-1, -1),
        }
    }

    /// Reports whether the direction moves along both axes.
    #[must_use]
    pub const fn is_diagonal(self) -> bool {
        let (dx, dy) = self.delta();
        dx != 0 && dy != 0
    }

    /// Direction of a single step between two 8-adjacent cells.
    ///
    /// Returns `None` when the cells are identical or further than one step
    /// apart.
    #[must_use]
    pub fn between(from: CellCoord, to: CellCoord) -> Option<Direction> {
        let dx = i64::from(to.column()) - i64::from(from.column());
        let dy = i64::from(to.row()) - i64::from(from.row());

        Self::ALL.into_iter().find(|direction| {
            let (step_x, step_y) = direction.delta();
            i64::from(step_x) == dx && i64::from(step_y) == dy
        })
    }
}

/// Neighbourhood used when expanding search nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    /// Orthogonal neighbours only.
    Four,
    /// Orthogonal and diagonal neighbours.
    #[default]
    Eight,
}

impl Connectivity {
    /// Neighbour offsets visited for this connectivity.
    #[must_use]
    pub fn directions(self) -> &'static [Direction] {
        match self {
            Self::Four => &Direction::CARDINAL,
            Self::Eight => &Direction::ALL,
        }
    }
}

/// Distance estimate used to order the search frontier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heuristic {
    /// Sum of absolute axis deltas.
    Manhattan,
    /// Straight-line distance, truncated to an integer.
    #[default]
    Euclidean,
}

/// Parameters of a single path search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PathQuery {
    /// Heuristic estimating the remaining distance.
    pub heuristic: Heuristic,
    /// Multiplier applied to the heuristic; values above 1 favour greedy expansion.
    pub weight: u32,
    /// Neighbourhood expanded from every node.
    pub connectivity: Connectivity,
    /// Optional cap on the number of closed nodes before the search gives up.
    pub max_expansions: Option<u32>,
}

impl Default for PathQuery {
    fn default() -> Self {
        Self {
            heuristic: Heuristic::Euclidean,
            weight: 10,
            connectivity: Connectivity::Eight,
            max_expansions: None,
        }
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a turret.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TurretId(u32);

impl TurretId {
    /// Creates a new turret identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the turret identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Types of enemies that can enter a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Fast, fragile melee enemy.
    Crawler,
    /// Slow enemy with a large health pool.
    Brute,
    /// Enemy that attacks from a distance.
    Stalker,
}

/// Types of turrets the player can construct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurretKind {
    /// Turret dealing plain damage.
    Basic,
    /// Turret that freezes its target.
    Frost,
}

/// Behaviour state of an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyState {
    /// Following a path toward the goal.
    Moving,
    /// Within attack range of the goal.
    Attack,
    /// Immobilised by a status effect; reverts to moving on its own.
    Frozen,
    /// Path search came back empty; the enemy idles.
    Blocked,
    /// Health depleted. Terminal.
    Dead,
}

impl EnemyState {
    /// Reports whether controller intents are honoured in this state.
    #[must_use]
    pub const fn accepts_intents(self) -> bool {
        !matches!(self, Self::Frozen | Self::Dead)
    }
}

/// Decision taken by the enemy controller for a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyIntent {
    /// Walk toward the provided direction.
    Advance(Direction),
    /// Attack the goal from the current position.
    Attack,
    /// No route exists; stay put.
    Hold,
}

/// Reasons an enemy spawn request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnError {
    /// The requested cell lies outside the grid.
    OutOfBounds,
    /// The requested cell holds a blocking tile.
    Blocked,
}

/// Reasons a turret placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The requested cell lies outside the grid.
    OutOfBounds,
    /// The requested cell is not plain ground.
    NotGround,
    /// The player stands on the requested cell.
    OccupiedByPlayer,
}

/// Reasons a turret removal request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemovalError {
    /// No turret with the provided identifier exists.
    MissingTurret,
}

/// Reasons a harvest request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HarvestError {
    /// The requested cell lies outside the grid.
    OutOfBounds,
    /// The requested cell does not hold a resource deposit.
    NotResource,
    /// The player does not stand next to the deposit.
    NotAdjacent,
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Kind of the enemy.
    pub kind: EnemyKind,
    /// Tile currently occupied by the enemy.
    pub cell: CellCoord,
    /// Current behaviour state.
    pub state: EnemyState,
    /// Remaining health.
    pub health: u32,
    /// Distance in tiles from which the enemy attacks its goal.
    pub attack_range: f32,
}

/// Read-only snapshot describing all enemies within the level.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot captured for the provided enemy.
    #[must_use]
    pub fn get(&self, enemy: EnemyId) -> Option<&EnemySnapshot> {
        self.snapshots
            .binary_search_by_key(&enemy, |snapshot| snapshot.id)
            .ok()
            .and_then(|index| self.snapshots.get(index))
    }

    /// Reports whether the view holds no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Immutable representation of a single turret's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurretSnapshot {
    /// Identifier allocated to the turret by the world.
    pub id: TurretId,
    /// Kind of turret that was constructed.
    pub kind: TurretKind,
    /// Cell holding the turret.
    pub cell: CellCoord,
    /// Targeting range measured in tiles.
    pub range: f32,
    /// Indicates whether the turret finished its cooldown.
    pub ready: bool,
}

/// Read-only snapshot describing all turrets placed within the level.
#[derive(Clone, Debug, Default)]
pub struct TurretView {
    snapshots: Vec<TurretSnapshot>,
}

impl TurretView {
    /// Creates a new turret view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TurretSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured turret snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &TurretSnapshot> {
        self.snapshots.iter()
    }
}

/// Immutable representation of the player used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerSnapshot {
    /// Tile currently occupied by the player.
    pub cell: CellCoord,
    /// Remaining health.
    pub health: u32,
    /// Resources harvested so far.
    pub resources: u32,
}
