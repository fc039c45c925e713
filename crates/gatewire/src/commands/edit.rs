use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use super::{describe_wire, router};
use crate::cli::RoutingArgs;
use gatewire::config::Config;
use gatewire::scene::{Component, Scene};
use gatewire::scene::block::{Block, BlockKind};
use gatewire::scene::pin::{Pin, PinKind};
use gatewire::scene::placement::Rotation;
use gatewire::scene::wire::TerminalRef;

/// Load a scene for editing. Wires stay `Pending` until an edit routes them.
fn load(file: &Path) -> Result<Scene> {
    Scene::load(file).with_context(|| format!("Failed to load {}", file.display()))
}

fn save(scene: &Scene, file: &Path, output: Option<&Path>) -> Result<()> {
    let target = output.unwrap_or(file);
    scene
        .save(target)
        .with_context(|| format!("Failed to write {}", target.display()))
}

fn print_wires(scene: &Scene, indices: &[usize]) {
    for &i in indices {
        println!("  {}", describe_wire(scene, i));
    }
}

pub fn new(
    file: &Path,
    width: Option<f64>,
    height: Option<f64>,
    grid_size: Option<u32>,
    force: bool,
    quiet: bool,
) -> Result<()> {
    if file.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            file.display()
        );
    }
    let config = Config::load_or_default();
    let (default_w, default_h) = config.canvas_size();
    let scene = Scene::new(
        width.unwrap_or(default_w),
        height.unwrap_or(default_h),
        grid_size.unwrap_or_else(|| config.grid_size()),
    )?;
    save(&scene, file, None)?;
    if !quiet {
        println!(
            "{} {} ({}x{} px, {} px grid)",
            "Created".green().bold(),
            file.display(),
            scene.width(),
            scene.height(),
            scene.grid_size()
        );
    }
    Ok(())
}

pub fn add(file: &Path, kind: &str, name: &str, x: f64, y: f64, lanes: u32, quiet: bool) -> Result<()> {
    let config = Config::load_or_default();
    let router = router(&config, &RoutingArgs::default())?;
    let mut scene = load(file)?;

    if let Ok(block_kind) = kind.parse::<BlockKind>() {
        scene.add_block(Block::new(name, block_kind, x, y))?;
    } else {
        let pin = match kind.parse::<PinKind>() {
            Ok(PinKind::Bus) => Pin::bus(name, lanes, x, y),
            Ok(pin_kind) => Pin::new(name, pin_kind, x, y),
            Err(_) => anyhow::bail!(
                "Unknown component kind: {kind}. Blocks: {}. Pins: input, output, bus.",
                BlockKind::ALL
                    .iter()
                    .map(|k| k.label().to_lowercase())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        };
        scene.add_pin(pin)?;
    }
    // Snap and clamp the new component like a dropped one.
    scene.complete_move(name, x, y, &router)?;
    save(&scene, file, None)?;

    if !quiet {
        if let Some(c) = scene.component(name) {
            let p = c.placement();
            println!(
                "{} {name} at ({}, {})",
                "Added".green().bold(),
                p.x,
                p.y
            );
            for (terminal, at) in c.terminals() {
                println!("  {name}.{terminal} {}", at.to_string().dimmed());
            }
        }
    }
    Ok(())
}

pub fn remove(file: &Path, name: &str, quiet: bool) -> Result<()> {
    let mut scene = load(file)?;
    let removed = scene.remove_component(name)?;
    save(&scene, file, None)?;
    if !quiet {
        println!("{} {name}", "Removed".green().bold());
        for wire in &removed {
            println!("  {} {} -> {}", "dropped wire".yellow(), wire.from, wire.to);
        }
    }
    Ok(())
}

pub fn move_component(
    file: &Path,
    component: &str,
    x: f64,
    y: f64,
    output: Option<&Path>,
    args: &RoutingArgs,
    quiet: bool,
) -> Result<()> {
    let config = Config::load_or_default();
    let router = router(&config, args)?;
    let mut scene = load(file)?;

    let mut rerouted = scene.complete_move(component, x, y, &router)?;
    if config.reroute_all_on_move() {
        scene.reroute_all(&router)?;
        rerouted = (0..scene.wires().len()).collect();
    }
    save(&scene, file, output)?;

    if !quiet {
        if let Some(c) = scene.component(component) {
            let p = c.placement();
            println!("{} {component} to ({}, {})", "Moved".green().bold(), p.x, p.y);
        }
        print_wires(&scene, &rerouted);
    }
    Ok(())
}

pub fn rotate(
    file: &Path,
    component: &str,
    degrees: u16,
    output: Option<&Path>,
    args: &RoutingArgs,
    quiet: bool,
) -> Result<()> {
    let by = Rotation::try_from(degrees)?;
    let config = Config::load_or_default();
    let router = router(&config, args)?;
    let mut scene = load(file)?;

    let rerouted = scene.rotate(component, by, &router)?;
    save(&scene, file, output)?;

    if !quiet {
        if let Some(c) = scene.component(component) {
            println!(
                "{} {component} to {}",
                "Rotated".green().bold(),
                c.placement().rotation
            );
        }
        print_wires(&scene, &rerouted);
    }
    Ok(())
}

pub fn connect(
    file: &Path,
    from: &str,
    to: &str,
    output: Option<&Path>,
    args: &RoutingArgs,
    quiet: bool,
) -> Result<()> {
    let from: TerminalRef = from.parse()?;
    let to: TerminalRef = to.parse()?;
    let config = Config::load_or_default();
    let router = router(&config, args)?;
    let mut scene = load(file)?;

    let index = scene.connect(from, to, &router)?;
    save(&scene, file, output)?;

    if !quiet {
        println!("{}", "Connected".green().bold());
        print_wires(&scene, &[index]);
    }
    Ok(())
}
