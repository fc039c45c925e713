use super::*;

#[test]
fn straight_horizontal() {
    let g = free_grid(5, 1);
    let path = solve(&g, c(0, 0), c(4, 0), &uniform());
    assert_eq!(path, vec![c(0, 0), c(1, 0), c(2, 0), c(3, 0), c(4, 0)]);
}

#[test]
fn straight_vertical_upwards() {
    let g = free_grid(1, 4);
    let path = solve(&g, c(0, 3), c(0, 0), &uniform());
    assert_eq!(path, vec![c(0, 3), c(0, 2), c(0, 1), c(0, 0)]);
}

#[test]
fn adjacent_cells() {
    let g = free_grid(3, 3);
    assert_eq!(solve(&g, c(1, 1), c(2, 1), &uniform()), vec![c(1, 1), c(2, 1)]);
    assert_eq!(solve(&g, c(1, 1), c(1, 0), &uniform()), vec![c(1, 1), c(1, 0)]);
}

#[test]
fn free_grid_path_is_manhattan_length() {
    let g = free_grid(6, 6);
    let start = c(0, 0);
    let goal = c(4, 3);
    let path = solve(&g, start, goal, &uniform());
    assert_valid_path(&g, &path, start, goal);
    assert_eq!(path.len() as i32, start.manhattan_to(goal) + 1);
}

#[test]
fn reverse_query_has_same_length() {
    let g = grid(&[
        ".....", //
        ".##..", //
        "..#..", //
        "..#.#", //
        ".....",
    ]);
    let forward = solve(&g, c(0, 0), c(3, 2), &uniform());
    let backward = solve(&g, c(3, 2), c(0, 0), &uniform());
    assert!(!forward.is_empty());
    assert_eq!(forward.len(), backward.len());
}

#[test]
fn ties_expand_east_first() {
    // Both L-shapes cost 2; the east neighbour is queued before the south one.
    let g = free_grid(3, 3);
    let path = solve(&g, c(0, 0), c(1, 1), &uniform());
    assert_eq!(path, vec![c(0, 0), c(1, 0), c(1, 1)]);
}

#[test]
fn cost_so_far_at_goal_is_step_count() {
    let g = free_grid(5, 5);
    let outcome = find_path(&g, c(0, 0), c(2, 3), &uniform());
    assert!(outcome.is_reached());
    assert_eq!(outcome.cost_so_far[&c(2, 3)], 5.0);
    assert_eq!(outcome.came_from[&c(0, 0)], None);
}
