use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use gatewire::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();
    let router = config.router_config();
    let (width, height) = config.canvas_size();

    if path.exists() {
        println!("{} {}", "Config file:".bold(), path.display());
    } else {
        println!(
            "{} {} {}",
            "Config file:".bold(),
            path.display(),
            "(not created yet, showing defaults)".dimmed()
        );
    }
    println!();
    println!("{}", "routing".cyan().bold());
    println!("  grid_size:           {}", config.grid_size());
    println!("  timeout_ms:          {}", router.search.timeout.as_millis());
    println!("  heuristic_scale:     {}", router.search.heuristic_scale);
    println!("  cost_model:          {}", router.search.cost_model);
    println!("  clearance_penalty:   {}", router.clearance_penalty);
    println!("  hit_tolerance:       {}", config.hit_tolerance());
    println!("  reroute_all_on_move: {}", config.reroute_all_on_move());
    println!("{}", "canvas".cyan().bold());
    println!("  width:               {width}");
    println!("  height:              {height}");
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!("{} {key} = {value}", "Set".green().bold());
    println!("Saved to {}", path.display());
    Ok(())
}
