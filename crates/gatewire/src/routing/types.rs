use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Integer grid cell. `x` is the column, `y` the row; grids index as `[y][x]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Step one unit in the given direction.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Manhattan distance to another cell.
    pub fn manhattan_to(self, other: Cell) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Straight-line distance to another cell.
    pub fn euclidean_to(self, other: Cell) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        dx.hypot(dy)
    }

    /// Whether `other` is one unit step away on exactly one axis.
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan_to(other) == 1
    }

    /// Top-left corner of this cell in pixel space.
    pub fn to_point(self, cell_size: u32) -> Point {
        let cs = cell_size as f64;
        Point::new(self.x as f64 * cs, self.y as f64 * cs)
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Cardinal direction for travel. `ALL` is the expansion order of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    South,
    West,
    North,
}

impl Direction {
    /// All four directions in expansion order: (+1,0), (0,+1), (-1,0), (0,-1).
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::North,
    ];

    /// Column/row offset of one step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::North => (0, -1),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }

    /// Direction of travel from `a` to an adjacent `b`.
    pub fn between(a: Cell, b: Cell) -> Option<Direction> {
        match (b.x - a.x, b.y - a.y) {
            (1, 0) => Some(Direction::East),
            (0, 1) => Some(Direction::South),
            (-1, 0) => Some(Direction::West),
            (0, -1) => Some(Direction::North),
            _ => None,
        }
    }
}

/// Pixel-space point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Cell containing this point (floor division by the cell size).
    pub fn to_cell(self, cell_size: u32) -> Cell {
        let cs = cell_size as f64;
        Cell::new((self.x / cs).floor() as i32, (self.y / cs).floor() as i32)
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Distance from this point to the segment `a`–`b`.
    /// A zero-length segment degrades to the distance to `a`.
    pub fn distance_to_segment(self, a: Point, b: Point) -> f64 {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let len_sq = dx * dx + dy * dy;
        if len_sq == 0.0 {
            return self.distance_to(a);
        }
        let t = (((self.x - a.x) * dx + (self.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
        self.distance_to(Point::new(a.x + t * dx, a.y + t * dy))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Axis-aligned pixel rectangle (component footprint).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive containment test, edges count as inside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Pixel polyline produced from a routed cell path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    points: Vec<Point>,
}

impl Polyline {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Scale every cell by the cell size.
    pub fn from_cells(cells: &[Cell], cell_size: u32) -> Self {
        Self {
            points: cells.iter().map(|c| c.to_point(cell_size)).collect(),
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Consecutive point pairs, in drawing order.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Total drawn length in pixels.
    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| a.distance_to(b)).sum()
    }

    /// Endpoints plus every point where the direction changes.
    pub fn corners(&self) -> Vec<Point> {
        if self.points.len() <= 2 {
            return self.points.clone();
        }
        let mut out = vec![self.points[0]];
        for w in self.points.windows(3) {
            let (a, b, c) = (w[0], w[1], w[2]);
            let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
            if cross != 0.0 {
                out.push(b);
            }
        }
        if let Some(&last) = self.points.last() {
            out.push(last);
        }
        out
    }

    /// Hit test: is `p` within `tolerance` pixels of any segment?
    pub fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        match self.points.as_slice() {
            [] => false,
            [only] => p.distance_to(*only) <= tolerance,
            _ => self
                .segments()
                .any(|(a, b)| p.distance_to_segment(a, b) <= tolerance),
        }
    }
}

/// Why a wire currently has no route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnroutableReason {
    /// Obstacles separate the endpoints.
    NoPath,
    /// The search ran out of its time budget.
    TimedOut,
    /// An endpoint lies outside the grid.
    OutOfBounds,
}

impl fmt::Display for UnroutableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnroutableReason::NoPath => "no path",
            UnroutableReason::TimedOut => "timed out",
            UnroutableReason::OutOfBounds => "endpoint outside grid",
        };
        f.write_str(s)
    }
}

/// Result of routing one wire.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// A route was found: the cell path and its pixel polyline.
    Routed { cells: Vec<Cell>, polyline: Polyline },
    /// No route right now. Expected while components overlap or during edits.
    Unroutable(UnroutableReason),
}

impl RouteOutcome {
    pub fn polyline(&self) -> Option<&Polyline> {
        match self {
            RouteOutcome::Routed { polyline, .. } => Some(polyline),
            RouteOutcome::Unroutable(_) => None,
        }
    }

    pub fn cells(&self) -> Option<&[Cell]> {
        match self {
            RouteOutcome::Routed { cells, .. } => Some(cells),
            RouteOutcome::Unroutable(_) => None,
        }
    }
}
