use crate::error::GridError;

use super::types::{Cell, Direction, Point, Rect};

/// Value of a free cell.
pub const FREE: f64 = 0.0;
/// Value of a blocked cell. Anything at or above this is impassable.
pub const BLOCKED: f64 = 1.0;
/// Upper bound on grid size; larger canvases are a caller bug.
pub const MAX_CELLS: usize = 16 * 1024 * 1024;

/// Rasterized canvas occupancy.
///
/// Row-major storage, `cells[y * width + x]`, i.e. `grid[row][col] = grid[y][x]`.
/// Values below [`BLOCKED`] are passable; the fractional part is an extra step
/// cost used by weighted routing.
///
/// `generation` records which scene state the grid was built from so a router
/// can refuse to search a stale snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    cell_size: u32,
    cells: Vec<f64>,
    generation: u64,
}

impl OccupancyGrid {
    /// An all-free grid of `width × height` cells.
    pub fn new(width: usize, height: usize, cell_size: u32) -> Result<Self, GridError> {
        if cell_size == 0 {
            return Err(GridError::ZeroCellSize);
        }
        let cells = width
            .checked_mul(height)
            .filter(|&n| n <= MAX_CELLS)
            .ok_or(GridError::TooLarge {
                cells: width.saturating_mul(height),
                limit: MAX_CELLS,
            })?;
        Ok(Self {
            width,
            height,
            cell_size,
            cells: vec![FREE; cells],
            generation: 0,
        })
    }

    /// Build a grid from explicit rows, `rows[y][x]`.
    pub fn from_rows(rows: &[Vec<f64>], cell_size: u32) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        let mut grid = Self::new(width, height, cell_size)?;
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::RaggedRows {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &value) in row.iter().enumerate() {
                grid.set(Cell::new(x as i32, y as i32), value)?;
            }
        }
        Ok(grid)
    }

    /// Stamp the scene generation this grid reflects.
    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `0 <= x < width && 0 <= y < height`.
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| cell.y as usize * self.width + cell.x as usize)
    }

    /// Stored value, `None` outside the grid.
    pub fn value(&self, cell: Cell) -> Option<f64> {
        self.index(cell).map(|i| self.cells[i])
    }

    /// In bounds and below [`BLOCKED`].
    pub fn is_passable(&self, cell: Cell) -> bool {
        self.value(cell).is_some_and(|v| v < BLOCKED)
    }

    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.value(cell).is_some_and(|v| v >= BLOCKED)
    }

    pub fn set(&mut self, cell: Cell, value: f64) -> Result<(), GridError> {
        if value.is_nan() || value < 0.0 {
            return Err(GridError::InvalidValue {
                x: cell.x,
                y: cell.y,
                value,
            });
        }
        let i = self.index(cell).ok_or(GridError::CellOutOfBounds {
            x: cell.x,
            y: cell.y,
        })?;
        self.cells[i] = value;
        Ok(())
    }

    /// Mark every cell the rectangle touches as blocked, clipped to the grid.
    ///
    /// Columns `[floor(x/cs), ceil((x+w)/cs))`, rows likewise. A component
    /// only partially covering a cell still blocks it.
    pub fn block_rect(&mut self, rect: &Rect) {
        let cs = self.cell_size as f64;
        let x0 = (rect.x / cs).floor().max(0.0) as usize;
        let y0 = (rect.y / cs).floor().max(0.0) as usize;
        let x1 = ((rect.right() / cs).ceil().max(0.0) as usize).min(self.width);
        let y1 = ((rect.bottom() / cs).ceil().max(0.0) as usize).min(self.height);
        for y in y0..y1 {
            let row = y * self.width;
            self.cells[row + x0.min(x1)..row + x1].fill(BLOCKED);
        }
    }

    /// Cell containing a pixel point.
    pub fn cell_of(&self, p: Point) -> Cell {
        p.to_cell(self.cell_size)
    }

    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v >= BLOCKED).count()
    }

    /// Rows in order, for rendering.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    /// Weighted copy: free cells 4-adjacent to a blocked cell get `penalty`
    /// added (kept below [`BLOCKED`]). Wires then prefer a gap next to
    /// components when a detour is cheap.
    pub fn with_clearance_penalty(&self, penalty: f64) -> Self {
        let penalty = penalty.clamp(0.0, 0.99);
        let mut out = self.clone();
        if penalty == 0.0 {
            return out;
        }
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let cell = Cell::new(x, y);
                if !self.is_passable(cell) {
                    continue;
                }
                let hugs_obstacle = Direction::ALL
                    .iter()
                    .any(|&d| self.is_blocked(cell.step(d)));
                if hugs_obstacle {
                    let i = y as usize * self.width + x as usize;
                    out.cells[i] = (self.cells[i] + penalty).min(0.99);
                }
            }
        }
        out
    }
}

/// Rasterize component footprints into a fresh grid.
///
/// The grid is `ceil(height_px / cell_size)` rows by `ceil(width_px / cell_size)`
/// columns, all free except cells touched by a footprint. Pure: identical
/// inputs give identical grids.
pub fn build_grid(
    width_px: f64,
    height_px: f64,
    cell_size: u32,
    components: &[Rect],
) -> Result<OccupancyGrid, GridError> {
    if cell_size == 0 {
        return Err(GridError::ZeroCellSize);
    }
    if !(width_px.is_finite() && height_px.is_finite()) || width_px <= 0.0 || height_px <= 0.0 {
        return Err(GridError::InvalidCanvas {
            width: width_px,
            height: height_px,
        });
    }
    let cs = cell_size as f64;
    let cols = (width_px / cs).ceil() as usize;
    let rows = (height_px / cs).ceil() as usize;

    let mut grid = OccupancyGrid::new(cols, rows, cell_size)?;
    for rect in components {
        grid.block_rect(rect);
    }
    Ok(grid)
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn dimensions_round_up() {
        let grid = build_grid(110.0, 50.0, 20, &[]).unwrap();
        assert_eq!(grid.width(), 6);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.blocked_count(), 0);
    }

    #[test]
    fn aligned_rect_blocks_exact_cells() {
        let grid = build_grid(100.0, 100.0, 20, &[Rect::new(20.0, 40.0, 40.0, 20.0)]).unwrap();
        assert!(grid.is_blocked(Cell::new(1, 2)));
        assert!(grid.is_blocked(Cell::new(2, 2)));
        assert!(!grid.is_blocked(Cell::new(3, 2)));
        assert!(!grid.is_blocked(Cell::new(1, 3)));
        assert_eq!(grid.blocked_count(), 2);
    }

    #[test]
    fn partial_overlap_blocks_whole_cell() {
        let grid = build_grid(100.0, 100.0, 20, &[Rect::new(10.0, 10.0, 20.0, 5.0)]).unwrap();
        assert!(grid.is_blocked(Cell::new(0, 0)));
        assert!(grid.is_blocked(Cell::new(1, 0)));
        assert_eq!(grid.blocked_count(), 2);
    }

    #[test]
    fn rect_is_clipped_to_grid() {
        let grid = build_grid(60.0, 60.0, 20, &[Rect::new(-40.0, 40.0, 200.0, 100.0)]).unwrap();
        assert_eq!(grid.blocked_count(), 3);
        assert!(grid.is_blocked(Cell::new(0, 2)));
        assert!(grid.is_blocked(Cell::new(2, 2)));
    }

    #[test]
    fn rect_fully_outside_is_ignored() {
        let grid = build_grid(60.0, 60.0, 20, &[Rect::new(200.0, 200.0, 20.0, 20.0)]).unwrap();
        assert_eq!(grid.blocked_count(), 0);
    }

    #[test]
    fn zero_cell_size_fails_fast() {
        assert_eq!(
            build_grid(100.0, 100.0, 0, &[]),
            Err(GridError::ZeroCellSize)
        );
    }

    #[test]
    fn invalid_canvas_fails_fast() {
        assert!(matches!(
            build_grid(-5.0, 100.0, 20, &[]),
            Err(GridError::InvalidCanvas { .. })
        ));
        assert!(matches!(
            build_grid(f64::NAN, 100.0, 20, &[]),
            Err(GridError::InvalidCanvas { .. })
        ));
    }

    #[test]
    fn oversized_grid_fails_fast() {
        assert!(matches!(
            OccupancyGrid::new(100_000, 100_000, 1),
            Err(GridError::TooLarge { .. })
        ));
    }

    #[test]
    fn ragged_rows_rejected() {
        let rows = vec![vec![0.0, 0.0], vec![0.0]];
        assert!(matches!(
            OccupancyGrid::from_rows(&rows, 20),
            Err(GridError::RaggedRows { row: 1, .. })
        ));
    }

    #[test]
    fn indexing_is_row_major() {
        // 3 wide, 2 tall: grid[y][x].
        let rows = vec![vec![0.0, 0.0, 1.0], vec![0.0, 0.0, 0.0]];
        let grid = OccupancyGrid::from_rows(&rows, 20).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert!(grid.is_blocked(Cell::new(2, 0)));
        assert!(!grid.is_blocked(Cell::new(0, 2)));
        assert!(!grid.in_bounds(Cell::new(0, 2)));
    }

    #[test]
    fn clearance_penalty_only_touches_free_neighbours() {
        let rows = vec![
            vec![0.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0],
        ];
        let grid = OccupancyGrid::from_rows(&rows, 20).unwrap();
        let weighted = grid.with_clearance_penalty(0.5);
        assert_eq!(weighted.value(Cell::new(1, 0)), Some(0.5));
        assert_eq!(weighted.value(Cell::new(0, 0)), Some(0.0));
        assert_eq!(weighted.value(Cell::new(1, 1)), Some(BLOCKED));
        assert_eq!(weighted.blocked_count(), 1);
    }

    #[test]
    fn set_rejects_bad_values() {
        let mut grid = OccupancyGrid::new(2, 2, 20).unwrap();
        assert!(grid.set(Cell::new(0, 0), -1.0).is_err());
        assert!(grid.set(Cell::new(5, 0), 0.0).is_err());
        assert!(grid.set(Cell::new(1, 1), 0.25).is_ok());
    }
}
