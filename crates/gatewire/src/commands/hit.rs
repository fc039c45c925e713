use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use super::describe_wire;
use gatewire::config::Config;
use gatewire::routing::types::Point;
use gatewire::scene::Scene;

pub fn run(file: &Path, x: f64, y: f64, tolerance: Option<f64>) -> Result<()> {
    let config = Config::load_or_default();
    let tolerance = tolerance.unwrap_or_else(|| config.hit_tolerance());
    if !tolerance.is_finite() || tolerance < 0.0 {
        anyhow::bail!("Invalid tolerance: {tolerance}. Must be a non-negative number of pixels.");
    }

    let mut scene =
        Scene::load(file).with_context(|| format!("Failed to load {}", file.display()))?;
    scene.reroute_all(&super::router(&config, &Default::default())?)?;

    let p = Point::new(x, y);
    match scene.component_at(p) {
        Some(name) => println!("{} {name}", "component:".bold()),
        None => println!("{} {}", "component:".bold(), "none".dimmed()),
    }
    match scene.wire_at(p, tolerance) {
        Some(i) => println!("{} {}", "wire:".bold(), describe_wire(&scene, i)),
        None => println!("{} {}", "wire:".bold(), "none".dimmed()),
    }
    Ok(())
}
