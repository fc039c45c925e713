use super::*;
use crate::routing::search::find_path_observed;
use std::collections::HashMap;

/// Start and goal at the ends of row 1, whose middle cells are expensive.
fn toll_row(middle: &str) -> OccupancyGrid {
    grid(&[".....", &format!(".{middle}.")])
}

#[test]
fn weighted_prefers_cheaper_longer_detour() {
    // Straight: 3 cells at 1.9 plus one at 1.0 = 6.7. Over the top: 6 steps = 6.0.
    let g = toll_row("999");
    let start = c(0, 1);
    let goal = c(4, 1);

    let outcome = find_path(&g, start, goal, &weighted());
    let path = path_of(&outcome, start, goal);
    assert_valid_path(&g, &path, start, goal);
    assert_eq!(path.len(), 7);
    assert!(path.iter().all(|p| g.value(*p) == Some(0.0)));
    assert_eq!(outcome.cost_so_far[&goal], 6.0);
}

#[test]
fn uniform_ignores_weights() {
    let g = toll_row("999");
    let path = solve(&g, c(0, 1), c(4, 1), &uniform());
    assert_eq!(path, vec![c(0, 1), c(1, 1), c(2, 1), c(3, 1), c(4, 1)]);
}

#[test]
fn weighted_crosses_cheap_toll() {
    // Straight: 3 x 1.1 + 1.0 = 4.3, still cheaper than the 6.0 detour.
    let g = toll_row("111");
    let outcome = find_path(&g, c(0, 1), c(4, 1), &weighted());
    let path = path_of(&outcome, c(0, 1), c(4, 1));
    assert_eq!(path.len(), 5);
    assert!((outcome.cost_so_far[&c(4, 1)] - 4.3).abs() < 1e-9);
}

#[test]
fn weighted_equals_uniform_on_zero_grid() {
    let g = grid(&[
        "......", //
        ".##.#.", //
        "...#..", //
        ".#....",
    ]);
    let a = solve(&g, c(0, 0), c(5, 3), &uniform());
    let b = solve(&g, c(0, 0), c(5, 3), &weighted());
    assert_eq!(a, b);
}

#[test]
fn relaxation_costs_only_decrease() {
    let g = grid(&[
        "..5..9..", //
        ".#9#.#..", //
        "..3..2.#", //
        "#.#.##..", //
        "..7.....",
    ]);
    let mut last: HashMap<Cell, f64> = HashMap::new();
    let mut relaxations = 0;
    let outcome = find_path_observed(&g, c(0, 0), c(7, 4), &weighted(), |cell, previous, new| {
        relaxations += 1;
        assert_eq!(previous, last.get(&cell).copied(), "previous cost of {cell} misreported");
        if let Some(old) = previous {
            assert!(new < old, "cost of {cell} rose from {old} to {new}");
        }
        last.insert(cell, new);
    });
    assert!(outcome.is_reached());
    assert!(relaxations >= last.len());
    for (cell, cost) in &outcome.cost_so_far {
        assert_eq!(last.get(cell), Some(cost));
    }
}
