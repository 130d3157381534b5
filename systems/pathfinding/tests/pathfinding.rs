use std::cell::Cell;

use bastion_core::{CellCoord, Connectivity, GridDimensions, Heuristic, PathQuery, TileCode};
use bastion_system_pathfinding::{PathFinder, PathOutcome};
use bastion_world::TileGrid;

fn open_grid(width: u32, height: u32) -> TileGrid {
    TileGrid::new(GridDimensions::new(width, height), 1)
}

fn four_connected() -> PathQuery {
    PathQuery {
        heuristic: Heuristic::Manhattan,
        weight: 1,
        connectivity: Connectivity::Four,
        max_expansions: None,
    }
}

fn eight_connected() -> PathQuery {
    PathQuery::default()
}

fn search(
    finder: &mut PathFinder,
    grid: &TileGrid,
    start: CellCoord,
    target: CellCoord,
    query: &PathQuery,
) -> (PathOutcome, Vec<CellCoord>) {
    let mut path = Vec::new();
    let outcome = finder.find_path(
        grid.dimensions(),
        start,
        target,
        query,
        |cell| grid.is_blocked(cell),
        &mut path,
    );
    (outcome, path)
}

fn assert_walkable_chain(grid: &TileGrid, start: CellCoord, path: &[CellCoord]) {
    let mut previous = start;
    for cell in path {
        assert!(
            previous.chebyshev_distance(*cell) == 1,
            "{previous:?} -> {cell:?} is not a single step"
        );
        assert!(!grid.is_blocked(*cell), "{cell:?} is blocked");
        previous = *cell;
    }
}

#[test]
fn open_grid_diagonal_route_takes_chebyshev_steps() {
    let grid = open_grid(5, 5);
    let mut finder = PathFinder::new();
    let start = CellCoord::new(0, 0);
    let target = CellCoord::new(4, 4);

    let (outcome, path) = search(&mut finder, &grid, start, target, &eight_connected());

    assert_eq!(outcome, PathOutcome::Found);
    assert_eq!(path.len(), 4);
    assert_eq!(path.last(), Some(&target));
    assert!(!path.contains(&start));
    assert_walkable_chain(&grid, start, &path);
}

#[test]
fn open_grid_orthogonal_route_takes_manhattan_steps() {
    let grid = open_grid(5, 5);
    let mut finder = PathFinder::new();
    let start = CellCoord::new(0, 0);
    let target = CellCoord::new(4, 4);

    let (outcome, path) = search(&mut finder, &grid, start, target, &four_connected());

    assert_eq!(outcome, PathOutcome::Found);
    assert_eq!(path.len(), 8);
    assert_eq!(path.last(), Some(&target));
    for pair in path.windows(2) {
        assert_eq!(pair[0].manhattan_distance(pair[1]), 1);
    }
}

#[test]
fn blocked_target_returns_empty_without_expanding() {
    let mut grid = open_grid(5, 5);
    let target = CellCoord::new(3, 3);
    let _ = grid.set_value(target, TileCode::new(105));
    let mut finder = PathFinder::new();

    let (outcome, path) = search(
        &mut finder,
        &grid,
        CellCoord::new(0, 0),
        target,
        &eight_connected(),
    );

    assert_eq!(outcome, PathOutcome::BlockedEndpoint);
    assert!(path.is_empty());
    assert_eq!(finder.last_stats().expanded, 0);
}

#[test]
fn blocked_start_consults_only_the_endpoints() {
    let calls = Cell::new(0_u32);
    let start = CellCoord::new(2, 2);
    let mut finder = PathFinder::new();
    let mut path = vec![CellCoord::new(1, 1)];

    let outcome = finder.find_path(
        GridDimensions::new(5, 5),
        start,
        CellCoord::new(4, 0),
        &eight_connected(),
        |cell| {
            calls.set(calls.get() + 1);
            cell == start
        },
        &mut path,
    );

    assert_eq!(outcome, PathOutcome::BlockedEndpoint);
    assert!(path.is_empty());
    assert!(calls.get() <= 2);
}

#[test]
fn out_of_bounds_endpoint_returns_empty() {
    let grid = open_grid(4, 4);
    let mut finder = PathFinder::new();

    let (outcome, path) = search(
        &mut finder,
        &grid,
        CellCoord::new(0, 0),
        CellCoord::new(4, 1),
        &four_connected(),
    );

    assert_eq!(outcome, PathOutcome::OutOfBounds);
    assert!(path.is_empty());
}

#[test]
fn separating_wall_exhausts_the_open_list() {
    let mut grid = open_grid(5, 5);
    for row in 0..5 {
        let _ = grid.set_value(CellCoord::new(2, row), TileCode::WALL);
    }
    let mut finder = PathFinder::new();

    for query in [four_connected(), eight_connected()] {
        let (outcome, path) = search(
            &mut finder,
            &grid,
            CellCoord::new(0, 2),
            CellCoord::new(4, 2),
            &query,
        );

        assert_eq!(outcome, PathOutcome::Unreachable);
        assert!(path.is_empty());
        assert_eq!(finder.last_stats().expanded, 10);
    }
}

#[test]
fn route_detours_around_walls() {
    let mut grid = open_grid(5, 5);
    for row in 0..4 {
        let _ = grid.set_value(CellCoord::new(2, row), TileCode::WALL);
    }
    let mut finder = PathFinder::new();
    let start = CellCoord::new(0, 0);
    let target = CellCoord::new(4, 0);

    let (outcome, path) = search(&mut finder, &grid, start, target, &four_connected());

    assert_eq!(outcome, PathOutcome::Found);
    assert!(path.contains(&CellCoord::new(2, 4)));
    assert_eq!(path.len(), 12);
    assert_walkable_chain(&grid, start, &path);
}

#[test]
fn turret_cells_remain_traversable() {
    let mut grid = open_grid(5, 3);
    for row in 0..3 {
        let _ = grid.set_value(CellCoord::new(2, row), TileCode::WALL);
    }
    let gap = CellCoord::new(2, 1);
    let _ = grid.set_value(gap, TileCode::TURRET);
    let mut finder = PathFinder::new();

    let (outcome, path) = search(
        &mut finder,
        &grid,
        CellCoord::new(0, 1),
        CellCoord::new(4, 1),
        &four_connected(),
    );

    assert_eq!(outcome, PathOutcome::Found);
    assert_eq!(path.len(), 4);
    assert!(path.contains(&gap));
}

#[test]
fn grid_mutations_are_observed_by_the_next_search() {
    let mut grid = open_grid(5, 3);
    for row in [0, 2] {
        let _ = grid.set_value(CellCoord::new(2, row), TileCode::WALL);
    }
    let mut finder = PathFinder::new();
    let start = CellCoord::new(0, 1);
    let target = CellCoord::new(4, 1);

    let (outcome, _) = search(&mut finder, &grid, start, target, &eight_connected());
    assert_eq!(outcome, PathOutcome::Found);

    let _ = grid.set_value(CellCoord::new(2, 1), TileCode::new(140));
    let (outcome, path) = search(&mut finder, &grid, start, target, &eight_connected());
    assert_eq!(outcome, PathOutcome::Unreachable);
    assert!(path.is_empty());
}

#[test]
fn adjacent_orthogonal_target_keeps_single_step() {
    let grid = open_grid(5, 5);
    let mut finder = PathFinder::new();
    let start = CellCoord::new(2, 2);
    let target = CellCoord::new(2, 3);

    for query in [four_connected(), eight_connected()] {
        let (outcome, path) = search(&mut finder, &grid, start, target, &query);
        assert_eq!(outcome, PathOutcome::Found);
        assert_eq!(path, vec![target]);
    }
}

#[test]
fn adjacent_diagonal_target_is_rejected_under_eight_connectivity() {
    let grid = open_grid(5, 5);
    let mut finder = PathFinder::new();

    let (outcome, path) = search(
        &mut finder,
        &grid,
        CellCoord::new(2, 2),
        CellCoord::new(3, 3),
        &eight_connected(),
    );

    assert_eq!(outcome, PathOutcome::RejectedSingleStep);
    assert!(path.is_empty());
}

#[test]
fn identical_inputs_produce_identical_routes() {
    let mut grid = open_grid(8, 6);
    for (column, row) in [(3, 0), (3, 1), (3, 2), (5, 3), (5, 4), (5, 5), (1, 4)] {
        let _ = grid.set_value(CellCoord::new(column, row), TileCode::WALL);
    }
    let start = CellCoord::new(0, 0);
    let target = CellCoord::new(7, 5);

    for query in [four_connected(), eight_connected()] {
        let mut first_finder = PathFinder::new();
        let (first_outcome, first) = search(&mut first_finder, &grid, start, target, &query);
        let (second_outcome, second) = search(&mut first_finder, &grid, start, target, &query);
        let mut fresh_finder = PathFinder::new();
        let (_, fresh) = search(&mut fresh_finder, &grid, start, target, &query);

        assert_eq!(first_outcome, PathOutcome::Found);
        assert_eq!(first_outcome, second_outcome);
        assert_eq!(first, second);
        assert_eq!(first, fresh);
        assert_walkable_chain(&grid, start, &first);
    }
}

#[test]
fn expansion_cap_stops_the_search() {
    let grid = open_grid(10, 10);
    let mut finder = PathFinder::new();
    let query = PathQuery {
        max_expansions: Some(3),
        ..four_connected()
    };

    let (outcome, path) = search(
        &mut finder,
        &grid,
        CellCoord::new(0, 0),
        CellCoord::new(9, 9),
        &query,
    );

    assert_eq!(outcome, PathOutcome::ExpansionLimit);
    assert!(path.is_empty());
    assert_eq!(finder.last_stats().expanded, 3);
}
