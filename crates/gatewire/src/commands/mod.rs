pub mod completion;
pub mod config;
pub mod edit;
pub mod grid;
pub mod hit;
pub mod route;

use anyhow::Result;
use colored::Colorize;
use std::time::Duration;

use crate::cli::RoutingArgs;
use gatewire::config::Config;
use gatewire::routing::WireRouter;
use gatewire::routing::search::CostModel;
use gatewire::scene::Scene;
use gatewire::scene::wire::WireRoute;

/// Config file settings with command-line overrides applied.
pub fn router(config: &Config, args: &RoutingArgs) -> Result<WireRouter> {
    let mut rc = config.router_config();
    if let Some(ms) = args.timeout_ms {
        rc.search.timeout = Duration::from_millis(ms);
    }
    if let Some(scale) = args.heuristic_scale {
        if !scale.is_finite() || scale < 0.0 {
            anyhow::bail!("Invalid heuristic scale: {scale}. Must be a non-negative number.");
        }
        rc.search.heuristic_scale = scale;
    }
    if args.weighted {
        rc.search.cost_model = CostModel::Weighted;
    }
    Ok(WireRouter::new(rc))
}

/// One line per wire: endpoints, then the route or why there is none.
pub fn describe_wire(scene: &Scene, index: usize) -> String {
    let Ok(wire) = scene.wire(index) else {
        return format!("#{index} missing");
    };
    let ends = format!("#{index} {} -> {}", wire.from, wire.to);
    match &wire.route {
        WireRoute::Routed(line) => format!(
            "{ends}  {} ({} cells, {} corners, {:.0} px)",
            "routed".green(),
            line.len(),
            line.corners().len().saturating_sub(2),
            line.length()
        ),
        WireRoute::Unroutable(reason) => format!("{ends}  {}", format!("unroutable: {reason}").yellow()),
        WireRoute::Pending => format!("{ends}  {}", "pending".dimmed()),
    }
}

pub fn print_version() {
    println!("{} {}", "gatewire".bold(), env!("CARGO_PKG_VERSION"));
}
