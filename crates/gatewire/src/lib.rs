//! Obstacle-aware orthogonal wire routing for a logic schematic editor.
//!
//! [`routing`] holds the grid builder, the A* search, path reconstruction and
//! the pixel-level [`WireRouter`](routing::WireRouter). [`scene`] is the
//! schematic model (blocks, pins, wires) that feeds grids to the router and
//! decides what to reroute after an edit.

pub mod config;
pub mod error;
pub mod routing;
pub mod scene;
