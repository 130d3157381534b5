//! Sub-tile movement shared by every mobile entity.
//!
//! A [`MobilePosition`] is a whole tile index plus a micro-step offset inside
//! that tile. [`MicroStepMover::advance`] integrates one tick of movement per
//! axis, snaps the tile index when the offset crosses the tile edge, and asks
//! the caller-provided blocking predicate before committing the new tile.

use bastion_core::{CellCoord, Direction, GridDimensions};
use glam::{IVec2, Vec2};

/// Tile index, micro-step offset and heading of a mobile entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MobilePosition {
    tile: IVec2,
    micro: IVec2,
    heading: Vec2,
}

impl MobilePosition {
    /// Places an entity at the origin of the provided tile.
    #[must_use]
    pub fn at(cell: CellCoord) -> Self {
        Self {
            tile: IVec2::new(to_i32(cell.column()), to_i32(cell.row())),
            micro: IVec2::ZERO,
            heading: Vec2::ZERO,
        }
    }

    /// Creates a position from raw components.
    #[must_use]
    pub const fn from_parts(tile: IVec2, micro: IVec2) -> Self {
        Self {
            tile,
            micro,
            heading: Vec2::ZERO,
        }
    }

    /// Whole tile index.
    #[must_use]
    pub const fn tile(&self) -> IVec2 {
        self.tile
    }

    /// Micro-step offset within the current tile.
    #[must_use]
    pub const fn micro(&self) -> IVec2 {
        self.micro
    }

    /// Direction of the most recent movement request.
    #[must_use]
    pub const fn heading(&self) -> Vec2 {
        self.heading
    }

    /// Grid cell of the tile index, if it is non-negative.
    #[must_use]
    pub fn cell(&self) -> Option<CellCoord> {
        to_cell(self.tile)
    }
}

/// Summary of a single [`MicroStepMover::advance`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// The tile index changed on at least one axis.
    pub tile_changed: bool,
    /// A horizontal tile change was reverted because the destination was blocked.
    pub blocked_x: bool,
    /// A vertical tile change was reverted because the destination was blocked.
    pub blocked_y: bool,
    /// The boundary constraint had to clamp the tile index.
    pub clamped: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn orthogonal(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    fn unit(self) -> IVec2 {
        match self {
            Self::X => IVec2::X,
            Self::Y => IVec2::Y,
        }
    }

    fn of(self, vector: IVec2) -> i32 {
        match self {
            Self::X => vector.x,
            Self::Y => vector.y,
        }
    }

    fn set(self, vector: &mut IVec2, value: i32) {
        match self {
            Self::X => vector.x = value,
            Self::Y => vector.y = value,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AxisOutcome {
    Stayed,
    Crossed,
    Blocked,
}

/// Integrates micro-step movement against a blocking predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MicroStepMover {
    steps_per_tile: i32,
}

impl MicroStepMover {
    /// Creates a mover subdividing each tile into `steps_per_tile` steps (at least one).
    #[must_use]
    pub fn new(steps_per_tile: u32) -> Self {
        Self {
            steps_per_tile: i32::try_from(steps_per_tile.max(1)).unwrap_or(i32::MAX),
        }
    }

    /// Number of micro steps per tile edge.
    #[must_use]
    pub const fn steps_per_tile(&self) -> i32 {
        self.steps_per_tile
    }

    /// Per-axis micro-step velocity for a heading travelled at `speed` steps per tick.
    #[must_use]
    pub fn velocity(heading: Vec2, speed: u32) -> IVec2 {
        (heading.normalize_or_zero() * speed as f32)
            .round()
            .as_ivec2()
    }

    /// Advances the position by one tick toward a compass direction.
    pub fn advance_toward<F>(
        &self,
        position: &mut MobilePosition,
        direction: Direction,
        speed: u32,
        dimensions: GridDimensions,
        is_blocked: F,
    ) -> StepReport
    where
        F: Fn(CellCoord) -> bool,
    {
        let (dx, dy) = direction.delta();
        let heading = Vec2::new(dx as f32, dy as f32);
        self.advance(position, heading, speed, dimensions, is_blocked)
    }

    /// Advances the position by one tick along `heading`.
    ///
    /// The horizontal axis is integrated before the vertical one. Each axis
    /// moves the tile index by at most one, whatever the speed. A tile change
    /// is committed only if neither the destination cell nor, while the entity
    /// straddles two cells on the orthogonal axis, the second destination cell
    /// is blocked. Cells outside the grid are not consulted; [`constrain`]
    /// clamps the result afterwards.
    pub fn advance<F>(
        &self,
        position: &mut MobilePosition,
        heading: Vec2,
        speed: u32,
        dimensions: GridDimensions,
        is_blocked: F,
    ) -> StepReport
    where
        F: Fn(CellCoord) -> bool,
    {
        position.heading = heading;
        let velocity = Self::velocity(heading, speed);
        self.integrate(position, velocity, dimensions, &is_blocked)
    }

    /// Advances the position by one tick toward the origin of `target`.
    ///
    /// The heading runs from the sub-tile position to the target origin. An
    /// axis that is off target moves by at least one micro step and never
    /// past the origin, so an offset across the direction of travel drains
    /// to zero instead of leaving the entity straddling a wall.
    pub fn advance_to<F>(
        &self,
        position: &mut MobilePosition,
        target: CellCoord,
        speed: u32,
        dimensions: GridDimensions,
        is_blocked: F,
    ) -> StepReport
    where
        F: Fn(CellCoord) -> bool,
    {
        let target_tile = IVec2::new(to_i32(target.column()), to_i32(target.row()));
        let remaining = (target_tile - position.tile) * self.steps_per_tile - position.micro;
        let heading = remaining.as_vec2();
        position.heading = heading;

        if speed == 0 {
            return StepReport::default();
        }

        let velocity = Self::velocity(heading, speed);
        let velocity = IVec2::new(
            approach(velocity.x, remaining.x),
            approach(velocity.y, remaining.y),
        );
        self.integrate(position, velocity, dimensions, &is_blocked)
    }

    fn integrate<F>(
        &self,
        position: &mut MobilePosition,
        velocity: IVec2,
        dimensions: GridDimensions,
        is_blocked: &F,
    ) -> StepReport
    where
        F: Fn(CellCoord) -> bool,
    {
        let mut report = StepReport::default();

        for axis in [Axis::X, Axis::Y] {
            match self.step_axis(position, axis, axis.of(velocity), dimensions, is_blocked) {
                AxisOutcome::Stayed => {}
                AxisOutcome::Crossed => report.tile_changed = true,
                AxisOutcome::Blocked => match axis {
                    Axis::X => report.blocked_x = true,
                    Axis::Y => report.blocked_y = true,
                },
            }
        }

        report.clamped = constrain(position, dimensions);
        report
    }

    fn step_axis<F>(
        &self,
        position: &mut MobilePosition,
        axis: Axis,
        velocity: i32,
        dimensions: GridDimensions,
        is_blocked: &F,
    ) -> AxisOutcome
    where
        F: Fn(CellCoord) -> bool,
    {
        if velocity == 0 {
            return AxisOutcome::Stayed;
        }

        let previous_tile = position.tile;
        let proposed = axis.of(position.micro).saturating_add(velocity);

        let (tile_delta, micro) = if proposed >= self.steps_per_tile {
            (1, 0)
        } else if proposed < 0 {
            (-1, self.steps_per_tile - 1)
        } else {
            axis.set(&mut position.micro, proposed);
            return AxisOutcome::Stayed;
        };

        axis.set(&mut position.micro, micro);
        position.tile += axis.unit() * tile_delta;

        let orthogonal = axis.orthogonal();
        let straddling = orthogonal.of(position.micro) != 0;
        let mut destinations = [Some(position.tile), None];
        if straddling {
            destinations[1] = Some(position.tile + orthogonal.unit());
        }

        let blocked = destinations
            .into_iter()
            .flatten()
            .filter_map(to_cell)
            .filter(|cell| dimensions.contains(*cell))
            .any(|cell| is_blocked(cell));

        if blocked {
            position.tile = previous_tile;
            return AxisOutcome::Blocked;
        }

        AxisOutcome::Crossed
    }
}

/// Clamps the tile index into `[0, width-1] x [0, height-1]`.
///
/// Returns `true` when the index had to be adjusted. Runs independently of
/// blocking so no sequence of moves can leave the grid.
pub fn constrain(position: &mut MobilePosition, dimensions: GridDimensions) -> bool {
    let max = IVec2::new(
        to_i32(dimensions.width()).saturating_sub(1).max(0),
        to_i32(dimensions.height()).saturating_sub(1).max(0),
    );
    let clamped = position.tile.clamp(IVec2::ZERO, max);
    if clamped == position.tile {
        return false;
    }

    position.tile = clamped;
    true
}

/// Velocity along one axis limited to the distance left on that axis.
fn approach(velocity: i32, remaining: i32) -> i32 {
    if remaining == 0 {
        return 0;
    }
    velocity.saturating_abs().clamp(1, remaining.saturating_abs()) * remaining.signum()
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn to_cell(tile: IVec2) -> Option<CellCoord> {
    let column = u32::try_from(tile.x).ok()?;
    let row = u32::try_from(tile.y).ok()?;
    Some(CellCoord::new(column, row))
}
