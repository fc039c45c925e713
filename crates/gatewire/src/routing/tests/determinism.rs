use super::*;
use crate::routing::serialize::{path_to_string, string_to_path};

/// Run a query repeatedly and assert identical paths every time.
fn assert_deterministic(g: &OccupancyGrid, start: Cell, goal: Cell, cfg: &SearchConfig, iterations: usize) {
    let reference = path_to_string(&solve(g, start, goal, cfg));
    for i in 1..iterations {
        let again = path_to_string(&solve(g, start, goal, cfg));
        assert_eq!(reference, again, "Non-deterministic result on iteration {i}");
    }
}

fn maze() -> OccupancyGrid {
    grid(&[
        "..........", //
        ".###.####.", //
        ".#.....3#.", //
        ".#.###.#..", //
        "...#...#.#", //
        "##.#.###..", //
        "...5......",
    ])
}

#[test]
fn open_grid_is_deterministic() {
    assert_deterministic(&free_grid(12, 12), c(0, 0), c(11, 11), &uniform(), 20);
}

#[test]
fn maze_is_deterministic() {
    let g = maze();
    assert_deterministic(&g, c(0, 0), c(9, 6), &uniform(), 20);
    assert_deterministic(&g, c(0, 0), c(9, 6), &weighted(), 20);
    assert_deterministic(&g, c(4, 2), c(0, 6), &uniform(), 20);
}

#[test]
fn equal_length_tie_is_stable() {
    // The Euclidean heuristic pulls toward the diagonal; ties go east first.
    let path = solve(&free_grid(4, 4), c(0, 0), c(2, 2), &uniform());
    assert_eq!(path_to_string(&path), "(0,0)-(1,0)-(1,1)-(2,1)-(2,2)");
}

#[test]
fn path_text_round_trips() {
    let path = solve(&maze(), c(0, 0), c(9, 6), &uniform());
    assert!(!path.is_empty());
    let text = path_to_string(&path);
    assert_eq!(string_to_path(&text), Some(path));
}
