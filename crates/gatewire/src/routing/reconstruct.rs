use std::collections::HashMap;

use tracing::warn;

use super::types::Cell;

/// A reconstructed cell path, or the explicit absence of one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellPath {
    /// Start to goal inclusive. A single cell when start == goal.
    Path(Vec<Cell>),
    Unreachable,
}

impl CellPath {
    pub fn cells(&self) -> Option<&[Cell]> {
        match self {
            CellPath::Path(cells) => Some(cells),
            CellPath::Unreachable => None,
        }
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, CellPath::Unreachable)
    }
}

/// Walk predecessors back from `goal` to `start` and reverse.
///
/// The map may come from a search that stopped early, so a chain that breaks
/// before reaching `start` (missing entry, `None` predecessor, or a loop) yields
/// `Unreachable` rather than a partial path.
pub fn reconstruct(came_from: &HashMap<Cell, Option<Cell>>, start: Cell, goal: Cell) -> CellPath {
    if !came_from.contains_key(&goal) {
        return CellPath::Unreachable;
    }

    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        // Any honest chain visits each cell at most once.
        if path.len() > came_from.len() {
            warn!(%start, %goal, "predecessor chain loops");
            return CellPath::Unreachable;
        }
        match came_from.get(&current) {
            Some(Some(prev)) => {
                current = *prev;
                path.push(current);
            }
            _ => {
                warn!(%start, %goal, at = %current, "predecessor chain broken");
                return CellPath::Unreachable;
            }
        }
    }

    path.reverse();
    CellPath::Path(path)
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn chain(pairs: &[((i32, i32), Option<(i32, i32)>)]) -> HashMap<Cell, Option<Cell>> {
        pairs
            .iter()
            .map(|&((x, y), p)| (Cell::new(x, y), p.map(|(px, py)| Cell::new(px, py))))
            .collect()
    }

    #[test]
    fn walks_back_and_reverses() {
        let map = chain(&[
            ((0, 0), None),
            ((1, 0), Some((0, 0))),
            ((1, 1), Some((1, 0))),
        ]);
        assert_eq!(
            reconstruct(&map, Cell::new(0, 0), Cell::new(1, 1)),
            CellPath::Path(vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)])
        );
    }

    #[test]
    fn missing_goal_is_unreachable() {
        let map = chain(&[((0, 0), None)]);
        assert!(reconstruct(&map, Cell::new(0, 0), Cell::new(3, 3)).is_unreachable());
    }

    #[test]
    fn empty_map_is_unreachable() {
        let map = HashMap::new();
        assert!(reconstruct(&map, Cell::new(0, 0), Cell::new(0, 0)).is_unreachable());
    }

    #[test]
    fn start_equals_goal_is_single_cell() {
        let map = chain(&[((2, 2), None)]);
        assert_eq!(
            reconstruct(&map, Cell::new(2, 2), Cell::new(2, 2)),
            CellPath::Path(vec![Cell::new(2, 2)])
        );
    }

    #[test]
    fn broken_chain_is_unreachable() {
        // (2,0) points at (1,0), which was never recorded.
        let map = chain(&[((0, 0), None), ((2, 0), Some((1, 0)))]);
        assert!(reconstruct(&map, Cell::new(0, 0), Cell::new(2, 0)).is_unreachable());
    }

    #[test]
    fn chain_ending_at_wrong_root_is_unreachable() {
        let map = chain(&[((5, 5), None), ((5, 6), Some((5, 5)))]);
        assert!(reconstruct(&map, Cell::new(0, 0), Cell::new(5, 6)).is_unreachable());
    }

    #[test]
    fn loop_is_unreachable() {
        let map = chain(&[((1, 0), Some((2, 0))), ((2, 0), Some((1, 0)))]);
        assert!(reconstruct(&map, Cell::new(0, 0), Cell::new(1, 0)).is_unreachable());
    }
}
