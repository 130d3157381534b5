#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Weighted A* search over a tile grid.
//!
//! The [`PathFinder`] owns its open list, came-from table and closed flags and
//! reuses them across searches; they are only reallocated when the grid
//! dimensions change. Blocking is supplied by the caller as a closure so the
//! search always observes the grid as it is at call time.

mod heuristic;

use std::{cmp::Ordering, collections::BinaryHeap};

use bastion_core::{CellCoord, Connectivity, GridDimensions, PathQuery};

pub use heuristic::{estimate, euclidean, manhattan};

/// Reason a search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathOutcome {
    /// A route was produced.
    Found,
    /// Start and target coincide; the route is empty.
    AtTarget,
    /// Start or target is blocked; no node was examined.
    BlockedEndpoint,
    /// Start or target lies outside the grid.
    OutOfBounds,
    /// The open list was exhausted before reaching the target.
    Unreachable,
    /// A single-cell route was discarded because the Manhattan distance between
    /// its endpoints exceeds one.
    RejectedSingleStep,
    /// The configured expansion cap was reached.
    ExpansionLimit,
}

impl PathOutcome {
    /// Reports whether the search produced a non-empty route.
    #[must_use]
    pub const fn is_found(self) -> bool {
        matches!(self, Self::Found)
    }
}

/// Counters describing the most recent search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes moved to the closed set.
    pub expanded: u32,
    /// Entries pushed onto the open list.
    pub pushed: u32,
}

/// Reusable weighted A* search.
#[derive(Debug, Default)]
pub struct PathFinder {
    dimensions: Option<GridDimensions>,
    open: BinaryHeap<OpenEntry>,
    records: Vec<NodeRecord>,
    closed: Vec<bool>,
    sequence: u64,
    stats: SearchStats,
}

impl PathFinder {
    /// Creates a path finder with an empty workspace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters gathered by the most recent call to [`PathFinder::find_path`].
    #[must_use]
    pub const fn last_stats(&self) -> SearchStats {
        self.stats
    }

    /// Searches for a route from `start` to `target`.
    ///
    /// On success `out` holds the cells after `start` up to and including
    /// `target`. Every other outcome leaves `out` empty. A failed search is
    /// never an error; the returned [`PathOutcome`] names the reason.
    pub fn find_path<F>(
        &mut self,
        dimensions: GridDimensions,
        start: CellCoord,
        target: CellCoord,
        query: &PathQuery,
        is_blocked: F,
        out: &mut Vec<CellCoord>,
    ) -> PathOutcome
    where
        F: Fn(CellCoord) -> bool,
    {
        out.clear();
        self.stats = SearchStats::default();

        let (Some(start_index), Some(target_index)) =
            (dimensions.index(start), dimensions.index(target))
        else {
            return PathOutcome::OutOfBounds;
        };

        if is_blocked(start) || is_blocked(target) {
            return PathOutcome::BlockedEndpoint;
        }

        if start_index == target_index {
            return PathOutcome::AtTarget;
        }

        self.prepare_workspace(dimensions);
        self.records[start_index] = NodeRecord {
            g: 0,
            h: 0,
            parent: Some(start_index),
        };
        self.push(0, start_index);

        let mut outcome = PathOutcome::Unreachable;
        while let Some(entry) = self.open.pop() {
            if entry.index == target_index {
                outcome = PathOutcome::Found;
                break;
            }
            if self.closed[entry.index] {
                continue;
            }
            if query
                .max_expansions
                .is_some_and(|limit| self.stats.expanded >= limit)
            {
                outcome = PathOutcome::ExpansionLimit;
                break;
            }

            self.closed[entry.index] = true;
            self.stats.expanded = self.stats.expanded.saturating_add(1);
            self.relax_neighbors(dimensions, entry.index, target, query, &is_blocked);
        }
        self.open.clear();

        log::trace!(
            "path search ({}, {}) -> ({}, {}): {:?} after {} expansions",
            start.column(),
            start.row(),
            target.column(),
            target.row(),
            outcome,
            self.stats.expanded
        );

        if outcome != PathOutcome::Found {
            return outcome;
        }

        if !self.reconstruct(dimensions, target_index, out) {
            return PathOutcome::Unreachable;
        }

        let single = out.len() == 1;
        let distance = start.manhattan_distance(target);
        // Under 8-connectivity the wide check is followed by the orthogonal
        // one, which also rejects a lone diagonal step. Both are kept as
        // observed; whether a lone diagonal should pass is still open.
        if single && query.connectivity == Connectivity::Eight && distance > 2 {
            out.clear();
            return PathOutcome::RejectedSingleStep;
        }
        if single && distance > 1 {
            out.clear();
            return PathOutcome::RejectedSingleStep;
        }

        PathOutcome::Found
    }

    fn prepare_workspace(&mut self, dimensions: GridDimensions) {
        let cell_count = dimensions.cell_count();
        if self.dimensions == Some(dimensions) && self.records.len() == cell_count {
            self.records.fill(NodeRecord::UNVISITED);
            self.closed.fill(false);
        } else {
            self.records.clear();
            self.records.resize(cell_count, NodeRecord::UNVISITED);
            self.closed.clear();
            self.closed.resize(cell_count, false);
            self.dimensions = Some(dimensions);
        }

        self.open.clear();
        self.sequence = 0;
    }

    fn relax_neighbors<F>(
        &mut self,
        dimensions: GridDimensions,
        index: usize,
        target: CellCoord,
        query: &PathQuery,
        is_blocked: &F,
    ) where
        F: Fn(CellCoord) -> bool,
    {
        let Some(cell) = dimensions.cell_at(index) else {
            return;
        };
        let g = self.records[index].g.saturating_add(1);

        for &direction in query.connectivity.directions() {
            let Some(neighbor) = cell.neighbor(direction, dimensions) else {
                continue;
            };
            let Some(neighbor_index) = dimensions.index(neighbor) else {
                continue;
            };
            if self.closed[neighbor_index] || is_blocked(neighbor) {
                continue;
            }

            let h = estimate(query.heuristic, neighbor, target, query.weight);
            let f = g.saturating_add(h);
            let record = &mut self.records[neighbor_index];
            if record.parent.is_none() || f < record.f() {
                *record = NodeRecord {
                    g,
                    h,
                    parent: Some(index),
                };
                self.push(f, neighbor_index);
            }
        }
    }

    fn push(&mut self, f: u32, index: usize) {
        self.open.push(OpenEntry {
            f,
            sequence: self.sequence,
            index,
        });
        self.sequence = self.sequence.wrapping_add(1);
        self.stats.pushed = self.stats.pushed.saturating_add(1);
    }

    fn reconstruct(
        &self,
        dimensions: GridDimensions,
        target_index: usize,
        out: &mut Vec<CellCoord>,
    ) -> bool {
        let mut current = target_index;
        for _ in 0..self.records.len() {
            let Some(parent) = self.records[current].parent else {
                out.clear();
                return false;
            };
            if parent == current {
                out.reverse();
                return true;
            }
            let Some(cell) = dimensions.cell_at(current) else {
                out.clear();
                return false;
            };
            out.push(cell);
            current = parent;
        }

        out.clear();
        false
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct NodeRecord {
    g: u32,
    h: u32,
    parent: Option<usize>,
}

impl NodeRecord {
    const UNVISITED: Self = Self {
        g: 0,
        h: 0,
        parent: None,
    };

    fn f(self) -> u32 {
        self.g.saturating_add(self.h)
    }
}

/// Open-list entry ordered so the heap pops the lowest `f`, oldest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct OpenEntry {
    f: u32,
    sequence: u64,
    index: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
