pub mod grid;
pub mod reconstruct;
pub mod search;
pub mod serialize;
pub mod types;

#[cfg(test)]
mod tests;

use tracing::{debug, warn};

use crate::error::{GridError, RouteError};
use grid::OccupancyGrid;
use reconstruct::{CellPath, reconstruct};
use search::{CostModel, SearchConfig, Termination, find_path};
use types::{Point, Polyline, RouteOutcome, UnroutableReason};

/// Default pixel size of one grid cell.
pub const DEFAULT_GRID_SIZE: u32 = 20;
/// Default hit-test tolerance around a wire, in pixels.
pub const DEFAULT_HIT_TOLERANCE: f64 = 5.0;

/// Source of occupancy grids for the router.
///
/// The canvas (or a test) hands the router a provider instead of the router
/// reaching for the scene. Every call must rasterize the current layout.
pub trait GridProvider {
    /// Generation of the layout the provider currently describes.
    fn generation(&self) -> u64;

    /// Build a grid for the current layout.
    fn occupancy_grid(&self) -> Result<OccupancyGrid, GridError>;
}

impl GridProvider for OccupancyGrid {
    fn generation(&self) -> u64 {
        OccupancyGrid::generation(self)
    }

    fn occupancy_grid(&self) -> Result<OccupancyGrid, GridError> {
        Ok(self.clone())
    }
}

/// Configuration for the wire router.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouterConfig {
    pub search: SearchConfig,
    /// Extra cost on free cells bordering a component, weighted mode only.
    pub clearance_penalty: f64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            clearance_penalty: 0.0,
        }
    }
}

/// Turns a pair of pixel endpoints into a routed pixel polyline.
#[derive(Debug, Clone, Default)]
pub struct WireRouter {
    config: RouterConfig,
}

impl WireRouter {
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Route between two pixel points using a fresh grid from `provider`.
    ///
    /// Fails only if the provider cannot build a grid or hands back a grid
    /// from an older generation. Every routing outcome, including "no path",
    /// is `Ok`.
    pub fn route<P>(&self, from: Point, to: Point, provider: &P) -> Result<RouteOutcome, RouteError>
    where
        P: GridProvider + ?Sized,
    {
        let current = provider.generation();
        let grid = provider.occupancy_grid()?;
        if grid.generation() != current {
            return Err(RouteError::StaleGrid {
                grid: grid.generation(),
                current,
            });
        }
        Ok(self.route_on(&grid, from, to))
    }

    /// Route between two pixel points on an already built grid.
    pub fn route_on(&self, grid: &OccupancyGrid, from: Point, to: Point) -> RouteOutcome {
        let start = grid.cell_of(from);
        let goal = grid.cell_of(to);

        let weighted;
        let search_grid = if self.config.search.cost_model == CostModel::Weighted
            && self.config.clearance_penalty > 0.0
        {
            weighted = grid.with_clearance_penalty(self.config.clearance_penalty);
            &weighted
        } else {
            grid
        };

        let outcome = find_path(search_grid, start, goal, &self.config.search);
        let reason = match outcome.termination {
            Termination::Reached => None,
            Termination::Exhausted => Some(UnroutableReason::NoPath),
            Termination::TimedOut => Some(UnroutableReason::TimedOut),
            Termination::OutOfBounds => Some(UnroutableReason::OutOfBounds),
        };
        if let Some(reason) = reason {
            debug!(%from, %to, %reason, expanded = outcome.expanded, "wire unroutable");
            return RouteOutcome::Unroutable(reason);
        }

        match reconstruct(&outcome.came_from, start, goal) {
            CellPath::Path(cells) => {
                let polyline = Polyline::from_cells(&cells, grid.cell_size());
                debug!(
                    %from,
                    %to,
                    cells = cells.len(),
                    expanded = outcome.expanded,
                    elapsed_us = outcome.elapsed.as_micros() as u64,
                    "wire routed"
                );
                RouteOutcome::Routed { cells, polyline }
            }
            CellPath::Unreachable => {
                warn!(%from, %to, "search reached goal but path could not be rebuilt");
                RouteOutcome::Unroutable(UnroutableReason::NoPath)
            }
        }
    }
}
