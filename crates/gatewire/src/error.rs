//! Error types for grid construction, routing and scene editing.
//!
//! Routing failures (no path, timeout, endpoint off the grid) are not errors;
//! they are reported as [`RouteOutcome::Unroutable`](crate::routing::types::RouteOutcome).
//! The types here cover caller mistakes that should fail fast.

use thiserror::Error;

/// Malformed grid input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    /// Cell size of zero pixels
    #[error("cell size must be at least 1 pixel")]
    ZeroCellSize,

    /// Negative, zero or non-finite canvas dimensions
    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },

    /// Grid would exceed the cell budget
    #[error("grid of {cells} cells exceeds the limit of {limit}")]
    TooLarge { cells: usize, limit: usize },

    /// Rows of different lengths
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Negative or NaN cell value
    #[error("invalid cell value {value} at ({x},{y})")]
    InvalidValue { x: i32, y: i32, value: f64 },

    /// Write outside the grid
    #[error("cell ({x},{y}) is outside the grid")]
    CellOutOfBounds { x: i32, y: i32 },
}

/// Errors raised by the wire router itself.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RouteError {
    /// The provider could not build a grid
    #[error("occupancy grid: {0}")]
    Grid(#[from] GridError),

    /// The grid was built from an older scene than the one being routed
    #[error("stale occupancy grid: built at generation {grid}, scene is at {current}")]
    StaleGrid { grid: u64, current: u64 },
}

/// Errors raised while editing or loading a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Two components share a name
    #[error("duplicate component name '{0}'")]
    DuplicateName(String),

    /// No component with that name
    #[error("unknown component '{0}'")]
    UnknownComponent(String),

    /// Component exists but has no such terminal
    #[error("component '{component}' has no terminal '{terminal}'")]
    UnknownTerminal { component: String, terminal: String },

    /// Terminal reference did not parse
    #[error("invalid terminal reference '{0}', expected <component>.<terminal>")]
    InvalidTerminalRef(String),

    /// Both wire ends on the same terminal
    #[error("wire would connect '{0}' to itself")]
    SelfConnection(String),

    /// Same pair of terminals already wired
    #[error("'{from}' and '{to}' are already connected")]
    DuplicateWire { from: String, to: String },

    /// No wire at that index
    #[error("no wire with index {0}")]
    UnknownWire(usize),

    /// Rotation other than a multiple of 90 degrees
    #[error("rotation must be 0, 90, 180 or 270 degrees, got {0}")]
    InvalidRotation(u16),

    /// Bad scene geometry
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Router failure
    #[error(transparent)]
    Route(#[from] RouteError),

    /// Scene file could not be parsed or written
    #[error("scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
