use super::*;
use crate::routing::search::Termination;
use std::time::{Duration, Instant};

/// A 1000x1000 grid whose goal is walled in, so the search would otherwise
/// have to exhaust about a million cells.
fn slow_grid() -> (OccupancyGrid, Cell, Cell) {
    let mut g = free_grid(1000, 1000);
    let goal = c(500, 500);
    for d in crate::routing::types::Direction::ALL {
        g.set(goal.step(d), 1.0).unwrap();
    }
    (g, c(0, 0), goal)
}

fn with_timeout(timeout: Duration) -> SearchConfig {
    SearchConfig {
        timeout,
        ..uniform()
    }
}

#[test]
fn zero_timeout_gives_up_quickly() {
    let (g, start, goal) = slow_grid();
    let began = Instant::now();
    let outcome = find_path(&g, start, goal, &with_timeout(Duration::ZERO));
    assert_eq!(outcome.termination, Termination::TimedOut);
    assert!(began.elapsed() < Duration::from_millis(500));
    assert!(outcome.came_from.is_empty());
    assert!(outcome.cost_so_far.is_empty());
    assert!(path_of(&outcome, start, goal).is_empty());
}

#[test]
fn short_timeout_is_respected() {
    let (g, start, goal) = slow_grid();
    let timeout = Duration::from_millis(5);
    let outcome = find_path(&g, start, goal, &with_timeout(timeout));
    assert_eq!(outcome.termination, Termination::TimedOut);
    assert!(outcome.elapsed >= timeout);
    assert!(outcome.elapsed < timeout + Duration::from_millis(500));
    assert!(outcome.expanded > 0);
}

#[test]
fn generous_timeout_reaches_goal() {
    let g = free_grid(50, 50);
    let outcome = find_path(&g, c(0, 0), c(49, 49), &with_timeout(Duration::from_secs(30)));
    assert_eq!(outcome.termination, Termination::Reached);
    assert_eq!(path_of(&outcome, c(0, 0), c(49, 49)).len(), 99);
}

#[test]
fn start_equal_goal_ignores_timeout() {
    let g = free_grid(3, 3);
    let outcome = find_path(&g, c(1, 1), c(1, 1), &with_timeout(Duration::ZERO));
    assert!(outcome.is_reached());
    assert_eq!(path_of(&outcome, c(1, 1), c(1, 1)), vec![c(1, 1)]);
}
