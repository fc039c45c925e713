mod determinism;
mod grid;
mod simple;
mod timeout;
mod weighted;

use super::grid::OccupancyGrid;
use super::reconstruct::{CellPath, reconstruct};
use super::search::{CostModel, SearchConfig, SearchOutcome, find_path};
use super::types::Cell;

/// Helper to create a Cell.
fn c(x: i32, y: i32) -> Cell {
    Cell::new(x, y)
}

/// Build a grid from text rows: `.` free, `#` blocked, a digit `d` is a
/// passable cell of value `d / 10`.
fn grid(rows: &[&str]) -> OccupancyGrid {
    let rows: Vec<Vec<f64>> = rows
        .iter()
        .map(|r| {
            r.chars()
                .map(|ch| match ch {
                    '.' => 0.0,
                    '#' => 1.0,
                    d => d.to_digit(10).map(|v| v as f64 / 10.0).unwrap(),
                })
                .collect()
        })
        .collect();
    OccupancyGrid::from_rows(&rows, 1).unwrap()
}

fn free_grid(width: usize, height: usize) -> OccupancyGrid {
    OccupancyGrid::new(width, height, 1).unwrap()
}

fn uniform() -> SearchConfig {
    SearchConfig::default()
}

fn weighted() -> SearchConfig {
    SearchConfig {
        cost_model: CostModel::Weighted,
        ..SearchConfig::default()
    }
}

/// Search and reconstruct; an empty vec means no path.
fn solve(grid: &OccupancyGrid, start: Cell, goal: Cell, cfg: &SearchConfig) -> Vec<Cell> {
    let outcome = find_path(grid, start, goal, cfg);
    path_of(&outcome, start, goal)
}

fn path_of(outcome: &SearchOutcome, start: Cell, goal: Cell) -> Vec<Cell> {
    match reconstruct(&outcome.came_from, start, goal) {
        CellPath::Path(p) => p,
        CellPath::Unreachable => Vec::new(),
    }
}

/// Assert a path runs start to goal in unit steps through passable cells.
/// Start and goal are exempt from the passability check.
fn assert_valid_path(grid: &OccupancyGrid, path: &[Cell], start: Cell, goal: Cell) {
    assert_eq!(path.first(), Some(&start), "path should begin at start");
    assert_eq!(path.last(), Some(&goal), "path should end at goal");
    for w in path.windows(2) {
        assert!(w[0].is_adjacent(w[1]), "{} -> {} is not a unit step", w[0], w[1]);
    }
    if path.len() > 2 {
        for &cell in &path[1..path.len() - 1] {
            assert!(grid.is_passable(cell), "path crosses blocked cell {cell}");
        }
    }
}
