use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gatewire")]
#[command(author, version, about)]
#[command(long_about = "Schematic capture with obstacle-aware wire routing.\n\n\
    Scenes are JSON files of logic blocks, I/O pins and the wires between\n\
    their terminals. Wires are routed around components on a grid.\n\n\
    Examples:\n  \
    gatewire new adder.json                      Create an empty scene\n  \
    gatewire add adder.json and G1 100 100       Place an AND gate\n  \
    gatewire connect adder.json A.P G1.IN1       Wire a pin to a gate\n  \
    gatewire route adder.json --json             Print routed wires\n  \
    gatewire grid adder.json --routes            Draw the occupancy grid")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase output verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Per-invocation overrides of the configured router settings.
#[derive(Args, Clone, Default)]
pub struct RoutingArgs {
    /// Search time budget per wire, in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Heuristic multiplier; above 1.0 searches less but may find longer paths
    #[arg(long)]
    pub heuristic_scale: Option<f64>,

    /// Charge each step 1 + the destination cell value
    #[arg(long)]
    pub weighted: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty scene file
    New {
        /// Scene file to create
        file: PathBuf,

        /// Canvas width in pixels (default from config)
        #[arg(long)]
        width: Option<f64>,

        /// Canvas height in pixels (default from config)
        #[arg(long)]
        height: Option<f64>,

        /// Grid cell size in pixels (default from config)
        #[arg(long)]
        grid_size: Option<u32>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Place a block (not, and, nand, or, nor, xor, xnor, dff, mux) or pin (input, output, bus)
    Add {
        /// Scene file
        file: PathBuf,

        /// Component kind
        kind: String,

        /// Unique component name
        name: String,

        /// Left edge in pixels
        x: f64,

        /// Top edge in pixels
        y: f64,

        /// Number of lanes for a bus pin
        #[arg(long, default_value = "1")]
        lanes: u32,
    },

    /// Remove a component and the wires attached to it
    Remove {
        /// Scene file
        file: PathBuf,

        /// Component name
        name: String,
    },

    /// Move a component (snapped to the grid) and reroute its wires
    Move {
        /// Scene file
        file: PathBuf,

        /// Component name
        component: String,

        /// New left edge in pixels
        #[arg(allow_negative_numbers = true)]
        x: f64,

        /// New top edge in pixels
        #[arg(allow_negative_numbers = true)]
        y: f64,

        /// Write the result here instead of overwriting the scene
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        routing: RoutingArgs,
    },

    /// Rotate a component clockwise by 90, 180 or 270 degrees
    Rotate {
        /// Scene file
        file: PathBuf,

        /// Component name
        component: String,

        /// Degrees clockwise
        #[arg(default_value = "90")]
        degrees: u16,

        /// Write the result here instead of overwriting the scene
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        routing: RoutingArgs,
    },

    /// Connect two terminals (component.terminal) with a routed wire
    Connect {
        /// Scene file
        file: PathBuf,

        /// Source terminal, e.g. A.P
        from: String,

        /// Destination terminal, e.g. G1.IN1
        to: String,

        /// Write the result here instead of overwriting the scene
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        routing: RoutingArgs,
    },

    /// Route every wire of one or more scenes and print the result
    Route {
        /// Scene files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        routing: RoutingArgs,
    },

    /// Print the occupancy grid of a scene as ASCII
    Grid {
        /// Scene file
        file: PathBuf,

        /// Overlay routed wires
        #[arg(long)]
        routes: bool,

        #[command(flatten)]
        routing: RoutingArgs,
    },

    /// Report the wire and component under a canvas point
    Hit {
        /// Scene file
        file: PathBuf,

        /// X in pixels
        x: f64,

        /// Y in pixels
        y: f64,

        /// Pick distance around wires in pixels (default from config)
        #[arg(long)]
        tolerance: Option<f64>,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. routing.grid_size, routing.timeout_ms, canvas.width)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let quiet = self.quiet;
        match self.command {
            Commands::New {
                file,
                width,
                height,
                grid_size,
                force,
            } => crate::commands::edit::new(&file, width, height, grid_size, force, quiet),
            Commands::Add {
                file,
                kind,
                name,
                x,
                y,
                lanes,
            } => crate::commands::edit::add(&file, &kind, &name, x, y, lanes, quiet),
            Commands::Remove { file, name } => crate::commands::edit::remove(&file, &name, quiet),
            Commands::Move {
                file,
                component,
                x,
                y,
                output,
                routing,
            } => crate::commands::edit::move_component(
                &file,
                &component,
                x,
                y,
                output.as_deref(),
                &routing,
                quiet,
            ),
            Commands::Rotate {
                file,
                component,
                degrees,
                output,
                routing,
            } => crate::commands::edit::rotate(
                &file,
                &component,
                degrees,
                output.as_deref(),
                &routing,
                quiet,
            ),
            Commands::Connect {
                file,
                from,
                to,
                output,
                routing,
            } => crate::commands::edit::connect(&file, &from, &to, output.as_deref(), &routing, quiet),
            Commands::Route {
                files,
                json,
                routing,
            } => crate::commands::route::run(&files, json, &routing),
            Commands::Grid {
                file,
                routes,
                routing,
            } => crate::commands::grid::run(&file, routes, &routing),
            Commands::Hit {
                file,
                x,
                y,
                tolerance,
            } => crate::commands::hit::run(&file, x, y, tolerance),
            Commands::Config { command } => crate::commands::config::run(command),
            Commands::Completion { shell } => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Commands::Version => {
                crate::commands::print_version();
                Ok(())
            }
        }
    }
}
