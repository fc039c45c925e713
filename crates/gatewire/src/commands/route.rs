use anyhow::{Context, Result};
use colored::Colorize;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::{describe_wire, router};
use crate::cli::RoutingArgs;
use gatewire::config::Config;
use gatewire::routing::WireRouter;
use gatewire::routing::types::Point;
use gatewire::scene::Scene;
use gatewire::scene::wire::WireRoute;

#[derive(Serialize)]
struct SceneReport {
    file: PathBuf,
    wires: Vec<WireReport>,
}

#[derive(Serialize)]
struct WireReport {
    from: String,
    to: String,
    routed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    points: Vec<Point>,
}

fn route_file(file: &Path, router: &WireRouter) -> Result<Scene> {
    let mut scene =
        Scene::load(file).with_context(|| format!("Failed to load {}", file.display()))?;
    scene
        .reroute_all(router)
        .with_context(|| format!("Failed to route {}", file.display()))?;
    Ok(scene)
}

fn report(file: &Path, scene: &Scene) -> SceneReport {
    let wires = scene
        .wires()
        .iter()
        .map(|w| {
            let (routed, reason, points) = match &w.route {
                WireRoute::Routed(line) => (true, None, line.corners()),
                WireRoute::Unroutable(reason) => (false, Some(reason.to_string()), Vec::new()),
                WireRoute::Pending => (false, Some("pending".to_string()), Vec::new()),
            };
            WireReport {
                from: w.from.to_string(),
                to: w.to.to_string(),
                routed,
                reason,
                points,
            }
        })
        .collect();
    SceneReport {
        file: file.to_path_buf(),
        wires,
    }
}

/// Route every wire of each scene. Scenes are independent, so they are routed
/// in parallel; wires within a scene are routed in order.
pub fn run(files: &[PathBuf], json: bool, args: &RoutingArgs) -> Result<()> {
    let config = Config::load_or_default();
    let router = router(&config, args)?;

    let results: Vec<(&PathBuf, Result<Scene>)> = files
        .par_iter()
        .map(|f| (f, route_file(f, &router)))
        .collect();

    let mut failed = 0;
    let mut reports = Vec::new();
    for (file, result) in results {
        match result {
            Ok(scene) => {
                if json {
                    reports.push(report(file, &scene));
                } else {
                    let routed = scene.wires().iter().filter(|w| w.polyline().is_some()).count();
                    println!(
                        "{} {}/{} wires routed",
                        file.display().to_string().bold(),
                        routed,
                        scene.wires().len()
                    );
                    for i in 0..scene.wires().len() {
                        println!("  {}", describe_wire(&scene, i));
                    }
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("{} {e:#}", "error:".red().bold());
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    if failed > 0 {
        anyhow::bail!("{failed} of {} scene(s) failed", files.len());
    }
    Ok(())
}
