use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use super::router;
use crate::cli::RoutingArgs;
use gatewire::config::Config;
use gatewire::routing::GridProvider;
use gatewire::routing::serialize::render_grid;
use gatewire::routing::types::Cell;
use gatewire::scene::Scene;

pub fn run(file: &Path, routes: bool, args: &RoutingArgs) -> Result<()> {
    let mut scene =
        Scene::load(file).with_context(|| format!("Failed to load {}", file.display()))?;

    let mut paths: Vec<Vec<Cell>> = Vec::new();
    if routes {
        let config = Config::load_or_default();
        scene.reroute_all(&router(&config, args)?)?;
        // Polyline points sit on cell corners, so they map back exactly.
        let cs = scene.grid_size();
        paths = scene
            .wires()
            .iter()
            .filter_map(|w| w.polyline())
            .map(|line| line.points().iter().map(|p| p.to_cell(cs)).collect())
            .collect();
    }

    let grid = scene.occupancy_grid()?;
    println!(
        "{} {}x{} cells, {} px each, {} blocked",
        file.display().to_string().bold(),
        grid.width(),
        grid.height(),
        grid.cell_size(),
        grid.blocked_count()
    );
    let refs: Vec<&[Cell]> = paths.iter().map(|p| p.as_slice()).collect();
    print!("{}", render_grid(&grid, &refs));
    Ok(())
}
