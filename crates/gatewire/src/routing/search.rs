use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::grid::OccupancyGrid;
use super::types::{Cell, Direction};

/// Default wall-clock budget for one search.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// How a move into a cell is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostModel {
    /// Every move costs 1. Cell values only decide passability.
    #[default]
    Uniform,
    /// A move costs `1 + value` of the destination cell. With all passable
    /// cells at 0 this is identical to `Uniform`.
    Weighted,
}

impl CostModel {
    fn step_cost(self, destination_value: f64) -> f64 {
        match self {
            CostModel::Uniform => 1.0,
            CostModel::Weighted => 1.0 + destination_value,
        }
    }
}

impl fmt::Display for CostModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostModel::Uniform => f.write_str("uniform"),
            CostModel::Weighted => f.write_str("weighted"),
        }
    }
}

impl std::str::FromStr for CostModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uniform" => Ok(CostModel::Uniform),
            "weighted" => Ok(CostModel::Weighted),
            other => Err(format!(
                "Invalid cost model: {other}. Must be 'uniform' or 'weighted'."
            )),
        }
    }
}

/// Search parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Wall-clock budget; checked once per node popped from the frontier.
    pub timeout: Duration,
    /// Multiplier on the Euclidean heuristic. Above 1.0 the heuristic is
    /// inadmissible: the search explores less and may return a longer path.
    pub heuristic_scale: f64,
    pub cost_model: CostModel,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            heuristic_scale: 1.0,
            cost_model: CostModel::Uniform,
        }
    }
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The goal was popped from the frontier.
    Reached,
    /// The frontier ran dry without reaching the goal.
    Exhausted,
    /// The time budget ran out.
    TimedOut,
    /// Start or goal lies outside the grid.
    OutOfBounds,
}

/// Everything a search produced.
///
/// On any termination other than `Reached` both maps are empty.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Predecessor of each visited cell; the start maps to `None`.
    pub came_from: HashMap<Cell, Option<Cell>>,
    /// Cheapest known cost from the start.
    pub cost_so_far: HashMap<Cell, f64>,
    pub termination: Termination,
    /// Nodes popped and expanded.
    pub expanded: usize,
    pub elapsed: Duration,
}

impl SearchOutcome {
    fn failed(termination: Termination, expanded: usize, elapsed: Duration) -> Self {
        Self {
            came_from: HashMap::new(),
            cost_so_far: HashMap::new(),
            termination,
            expanded,
            elapsed,
        }
    }

    pub fn is_reached(&self) -> bool {
        self.termination == Termination::Reached
    }
}

/// Frontier entry. BinaryHeap is a max-heap, so ordering is reversed:
/// lowest priority first, then earliest insertion.
#[derive(Debug)]
struct FrontierEntry {
    priority: f64,
    seq: u64,
    cell: Cell,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .partial_cmp(&self.priority)
            .unwrap_or(Ordering::Equal)
            .then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Euclidean distance between two cells.
pub fn heuristic(from: Cell, to: Cell) -> f64 {
    from.euclidean_to(to)
}

/// A* from `start` to `goal` over 4-connected passable cells.
///
/// The goal cell is exempt from the passability check because wire terminals
/// sit on component edges. Never fails: unreachable goals, timeouts and
/// off-grid endpoints are reported through [`Termination`].
pub fn find_path(
    grid: &OccupancyGrid,
    start: Cell,
    goal: Cell,
    config: &SearchConfig,
) -> SearchOutcome {
    find_path_observed(grid, start, goal, config, |_, _, _| {})
}

/// [`find_path`] with a hook called on every relaxation as
/// `(cell, previous_cost, new_cost)`.
pub fn find_path_observed<F>(
    grid: &OccupancyGrid,
    start: Cell,
    goal: Cell,
    config: &SearchConfig,
    mut on_relax: F,
) -> SearchOutcome
where
    F: FnMut(Cell, Option<f64>, f64),
{
    let started = Instant::now();

    if !grid.in_bounds(start) || !grid.in_bounds(goal) {
        debug!(%start, %goal, "endpoint outside {}x{} grid", grid.width(), grid.height());
        return SearchOutcome::failed(Termination::OutOfBounds, 0, started.elapsed());
    }

    let mut came_from: HashMap<Cell, Option<Cell>> = HashMap::new();
    let mut cost_so_far: HashMap<Cell, f64> = HashMap::new();
    came_from.insert(start, None);
    cost_so_far.insert(start, 0.0);
    on_relax(start, None, 0.0);

    if start == goal {
        return SearchOutcome {
            came_from,
            cost_so_far,
            termination: Termination::Reached,
            expanded: 0,
            elapsed: started.elapsed(),
        };
    }

    let mut frontier = BinaryHeap::new();
    let mut seq = 0_u64;
    frontier.push(FrontierEntry {
        priority: 0.0,
        seq,
        cell: start,
    });

    let mut expanded = 0_usize;

    while let Some(entry) = frontier.pop() {
        if started.elapsed() > config.timeout {
            warn!(
                %start,
                %goal,
                expanded,
                timeout_ms = config.timeout.as_millis() as u64,
                "route search timed out"
            );
            return SearchOutcome::failed(Termination::TimedOut, expanded, started.elapsed());
        }

        let current = entry.cell;
        if current == goal {
            debug!(%start, %goal, expanded, "route search reached goal");
            return SearchOutcome {
                came_from,
                cost_so_far,
                termination: Termination::Reached,
                expanded,
                elapsed: started.elapsed(),
            };
        }

        let current_cost = match cost_so_far.get(&current) {
            Some(&c) => c,
            None => continue,
        };
        // A cheaper route to this cell was pushed after this entry.
        let h_current = heuristic(current, goal) * config.heuristic_scale;
        if entry.priority > current_cost + h_current {
            continue;
        }
        expanded += 1;

        for dir in Direction::ALL {
            let next = current.step(dir);
            let value = if grid.is_passable(next) {
                grid.value(next).unwrap_or_default()
            } else if next == goal {
                0.0
            } else {
                continue;
            };

            let new_cost = current_cost + config.cost_model.step_cost(value);
            let previous = cost_so_far.get(&next).copied();
            if previous.is_none_or(|old| new_cost < old) {
                cost_so_far.insert(next, new_cost);
                on_relax(next, previous, new_cost);
                seq += 1;
                frontier.push(FrontierEntry {
                    priority: new_cost + heuristic(next, goal) * config.heuristic_scale,
                    seq,
                    cell: next,
                });
                came_from.insert(next, Some(current));
            }
        }
    }

    debug!(%start, %goal, expanded, "route search exhausted frontier");
    SearchOutcome::failed(Termination::Exhausted, expanded, started.elapsed())
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn frontier_pops_lowest_priority_first() {
        let mut heap = BinaryHeap::new();
        heap.push(FrontierEntry {
            priority: 3.0,
            seq: 0,
            cell: Cell::new(0, 0),
        });
        heap.push(FrontierEntry {
            priority: 1.0,
            seq: 1,
            cell: Cell::new(1, 0),
        });
        heap.push(FrontierEntry {
            priority: 1.0,
            seq: 2,
            cell: Cell::new(2, 0),
        });
        assert_eq!(heap.pop().unwrap().cell, Cell::new(1, 0));
        assert_eq!(heap.pop().unwrap().cell, Cell::new(2, 0));
        assert_eq!(heap.pop().unwrap().cell, Cell::new(0, 0));
    }

    #[test]
    fn heuristic_is_euclidean() {
        assert_eq!(heuristic(Cell::new(0, 0), Cell::new(3, 4)), 5.0);
        assert_eq!(heuristic(Cell::new(2, 2), Cell::new(2, 2)), 0.0);
    }

    #[test]
    fn weighted_step_includes_cell_value() {
        assert_eq!(CostModel::Uniform.step_cost(0.5), 1.0);
        assert_eq!(CostModel::Weighted.step_cost(0.5), 1.5);
        assert_eq!(CostModel::Weighted.step_cost(0.0), 1.0);
    }

    #[test]
    fn cost_model_parses() {
        assert_eq!("weighted".parse::<CostModel>(), Ok(CostModel::Weighted));
        assert!("fast".parse::<CostModel>().is_err());
    }
}
