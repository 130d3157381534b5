#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-tick enemy controller that turns path searches into steering intents.

use bastion_core::{
    CellCoord, Command, Connectivity, Direction, EnemyIntent, EnemySnapshot, EnemyView, Event,
    GridDimensions, PathQuery,
};
use bastion_system_pathfinding::{PathFinder, PathOutcome};

/// Pure system that reacts to time advancing and emits one intent per active enemy.
#[derive(Debug, Default)]
pub struct EnemyAi {
    finder: PathFinder,
    path: Vec<CellCoord>,
    approaches: Vec<CellCoord>,
}

impl EnemyAi {
    /// Creates a controller with an empty search workspace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes world events and the enemy view to emit steering commands.
    ///
    /// Nothing is emitted unless the batch contains [`Event::TimeAdvanced`].
    /// `goal` is re-resolved by the caller every tick; frozen and dead enemies
    /// are skipped. A blocked goal, such as a base part, is approached through
    /// its nearest walkable neighbour and attacked from there.
    pub fn handle<F>(
        &mut self,
        events: &[Event],
        enemies: &EnemyView,
        goal: Option<CellCoord>,
        dimensions: GridDimensions,
        query: &PathQuery,
        is_blocked: F,
        out: &mut Vec<Command>,
    ) where
        F: Fn(CellCoord) -> bool,
    {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        let Some(goal) = goal else {
            return;
        };

        for enemy in enemies.iter() {
            if !enemy.state.accepts_intents() {
                continue;
            }

            if let Some(intent) = self.decide(enemy, goal, dimensions, query, &is_blocked) {
                out.push(Command::SteerEnemy {
                    enemy: enemy.id,
                    intent,
                });
            }
        }
    }

    fn decide<F>(
        &mut self,
        enemy: &EnemySnapshot,
        goal: CellCoord,
        dimensions: GridDimensions,
        query: &PathQuery,
        is_blocked: &F,
    ) -> Option<EnemyIntent>
    where
        F: Fn(CellCoord) -> bool,
    {
        if enemy.cell.euclidean_distance(goal) <= enemy.attack_range {
            return Some(EnemyIntent::Attack);
        }

        let outcome = self.search(enemy.cell, goal, dimensions, query, is_blocked);
        if !outcome.is_found() {
            log::trace!("enemy {} holds: {outcome:?}", enemy.id.get());
            return Some(EnemyIntent::Hold);
        }

        let Some(&next) = self.path.first() else {
            return Some(EnemyIntent::Hold);
        };

        let Some(direction) = Direction::between(enemy.cell, next) else {
            log::warn!(
                "enemy {} received non-adjacent step ({}, {}) -> ({}, {})",
                enemy.id.get(),
                enemy.cell.column(),
                enemy.cell.row(),
                next.column(),
                next.row()
            );
            return None;
        };

        if !direction.is_diagonal() {
            return Some(EnemyIntent::Advance(direction));
        }

        // Diagonal steps are walked through an open orthogonal neighbour.
        let (horizontal, vertical) = split_diagonal(direction);
        for step in [horizontal, vertical] {
            if enemy
                .cell
                .neighbor(step, dimensions)
                .is_some_and(|cell| !is_blocked(cell))
            {
                return Some(EnemyIntent::Advance(step));
            }
        }

        // Both corners are walls; only an orthogonal route can be walked.
        let orthogonal = PathQuery {
            connectivity: Connectivity::Four,
            ..*query
        };
        let outcome = self.search(enemy.cell, goal, dimensions, &orthogonal, is_blocked);
        let detour = self
            .path
            .first()
            .and_then(|&next| Direction::between(enemy.cell, next));
        match detour {
            Some(step) if outcome.is_found() => Some(EnemyIntent::Advance(step)),
            _ => {
                log::trace!("enemy {} squeezed between corners: {outcome:?}", enemy.id.get());
                Some(EnemyIntent::Hold)
            }
        }
    }

    /// Searches toward `goal`, or toward its walkable neighbours nearest first
    /// when the goal itself is blocked. Leaves the route in `self.path`.
    fn search<F>(
        &mut self,
        start: CellCoord,
        goal: CellCoord,
        dimensions: GridDimensions,
        query: &PathQuery,
        is_blocked: &F,
    ) -> PathOutcome
    where
        F: Fn(CellCoord) -> bool,
    {
        self.approaches.clear();
        if is_blocked(goal) {
            self.approaches.extend(
                query
                    .connectivity
                    .directions()
                    .iter()
                    .filter_map(|&direction| goal.neighbor(direction, dimensions))
                    .filter(|&cell| !is_blocked(cell)),
            );
            self.approaches.sort_by_key(|cell| cell.manhattan_distance(start));
        } else {
            self.approaches.push(goal);
        }

        let mut outcome = PathOutcome::BlockedEndpoint;
        for &target in &self.approaches {
            outcome = self
                .finder
                .find_path(dimensions, start, target, query, is_blocked, &mut self.path);
            if matches!(outcome, PathOutcome::Found | PathOutcome::AtTarget) {
                break;
            }
        }
        outcome
    }
}

fn split_diagonal(direction: Direction) -> (Direction, Direction) {
    let (dx, dy) = direction.delta();
    let horizontal = if dx > 0 {
        Direction::East
    } else {
        Direction::West
    };
    let vertical = if dy > 0 {
        Direction::South
    } else {
        Direction::North
    };
    (horizontal, vertical)
}
