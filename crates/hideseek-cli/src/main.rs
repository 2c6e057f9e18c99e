//! hideseek CLI.
//!
//! - `hideseek run` - play one Hider/Seeker round on a map
//! - `hideseek path` - show the A* route between two tiles
//! - `hideseek check-config` - validate a run config and print it with defaults filled in

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use hideseek_nav::{find_path, Grid, TileGrid, TilePos};
use hideseek_sim::{
    AsciiRenderer, JsonLinesRenderer, NullRenderer, Renderer, SimConfig, Simulation, DEFAULT_MAP,
};

#[derive(Parser)]
#[command(name = "hideseek")]
#[command(about = "Grid hide-and-seek between two autonomous agents", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a round until the Hider is caught or the tick budget is spent
    Run {
        /// Map layout file (`.` grass, `T` tree, `R` rock, `~` water); built-in map if omitted
        #[arg(long)]
        map: Option<PathBuf>,

        /// Run config (.yaml, .yml or .json)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured seed
        #[arg(long)]
        seed: Option<u64>,

        /// Override the configured tick budget
        #[arg(long)]
        ticks: Option<u64>,

        /// How to draw each tick
        #[arg(long, value_enum, default_value_t = RenderMode::Ascii)]
        render: RenderMode,

        /// Draw only every Nth tick (ascii only)
        #[arg(long, default_value_t = 1)]
        every: u64,
    },

    /// Print the shortest path between two tiles
    Path {
        #[arg(long)]
        map: Option<PathBuf>,

        /// Start tile as `x,y`
        #[arg(long, value_parser = parse_tile)]
        from: TilePos,

        /// Goal tile as `x,y`
        #[arg(long, value_parser = parse_tile)]
        to: TilePos,
    },

    /// Validate a config file; prints the defaults when no file is given
    CheckConfig {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RenderMode {
    Ascii,
    Json,
    None,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose.
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match cli.command {
        Commands::Run {
            map,
            config,
            seed,
            ticks,
            render,
            every,
        } => run_round(map.as_deref(), config.as_deref(), seed, ticks, render, every),
        Commands::Path { map, from, to } => show_path(map.as_deref(), from, to),
        Commands::CheckConfig { config } => check_config(config.as_deref()),
    }
}

fn parse_tile(s: &str) -> Result<TilePos, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in `{s}`: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in `{s}`: {e}"))?;
    Ok(TilePos::new(x, y))
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    match path {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(SimConfig::default()),
    }
}

fn load_map(path: Option<&Path>, tile_size: f32) -> Result<TileGrid> {
    let text = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read map from {}", path.display()))?,
        None => DEFAULT_MAP.to_string(),
    };
    let grid = TileGrid::from_ascii(&text, tile_size).context("Failed to parse map")?;
    Ok(grid)
}

fn run_round(
    map: Option<&Path>,
    config: Option<&Path>,
    seed: Option<u64>,
    ticks: Option<u64>,
    render: RenderMode,
    every: u64,
) -> Result<()> {
    let mut config = load_config(config)?;
    if let Some(seed) = seed {
        config.seed = seed;
    }
    let max_ticks = ticks.unwrap_or(config.max_ticks);

    let grid = load_map(map, config.tile_size)?;
    let (cols, rows) = grid.dimensions();
    tracing::info!(cols, rows, seed = config.seed, max_ticks, "Starting round");

    let mut sim = Simulation::new(grid, &config).context("Failed to set up simulation")?;

    let stdout = io::stdout().lock();
    let mut renderer: Box<dyn Renderer> = match render {
        RenderMode::Ascii => Box::new(AsciiRenderer::new(stdout).every(every)),
        RenderMode::Json => Box::new(JsonLinesRenderer::new(stdout)),
        RenderMode::None => Box::new(NullRenderer),
    };

    let outcome = sim.run(max_ticks, renderer.as_mut())?;
    if outcome.caught {
        tracing::info!(ticks = outcome.ticks, "Hider caught");
    } else {
        tracing::info!(ticks = outcome.ticks, "Hider survived");
    }
    Ok(())
}

fn show_path(map: Option<&Path>, from: TilePos, to: TilePos) -> Result<()> {
    let grid = load_map(map, SimConfig::default().tile_size)?;
    for (name, tile) in [("from", from), ("to", to)] {
        if !grid.is_walkable(tile) {
            bail!("--{name} {tile} is not a walkable tile");
        }
    }

    let path = find_path(&grid, from, to);
    if path.is_empty() && from != to {
        bail!("no path from {from} to {to}");
    }

    let layout = grid.to_string();
    let mut out = io::stdout().lock();
    for (y, line) in layout.lines().enumerate() {
        let row: String = line
            .chars()
            .enumerate()
            .map(|(x, glyph)| {
                let tile = TilePos::new(x as i32, y as i32);
                if tile == from {
                    'A'
                } else if tile == to {
                    'B'
                } else if path.contains(&tile) {
                    '*'
                } else {
                    glyph
                }
            })
            .collect();
        writeln!(out, "{row}")?;
    }
    writeln!(out, "{} steps", path.len())?;
    Ok(())
}

fn check_config(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    if let Some(path) = path {
        tracing::info!(path = %path.display(), "Config is valid");
    }
    let yaml = serde_yaml::to_string(&config).context("Failed to serialize config")?;
    print!("{yaml}");
    Ok(())
}
