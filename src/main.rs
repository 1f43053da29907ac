use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::GameConfig;
use grid_snake::modes::{HeadlessMode, PlayMode};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Classic snake on a fixed grid")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "play")]
    mode: Mode,

    /// Preset to start from
    #[arg(long, default_value = "classic")]
    variant: Variant,

    /// JSON config file; replaces the preset
    #[arg(long)]
    config: Option<PathBuf>,

    /// Play field width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Play field height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Pixels per grid cell
    #[arg(long)]
    pitch: Option<u32>,

    /// Delay between ticks in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Ticks to simulate in headless mode
    #[arg(long, default_value = "1000")]
    ticks: u64,

    /// Seed for headless food placement (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Where log output goes; the terminal belongs to the game
    #[arg(long, default_value = "grid_snake.log")]
    log_file: PathBuf,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Play,
    /// Let the autopilot play without a terminal and print a JSON report
    Headless,
}

#[derive(Clone, ValueEnum)]
enum Variant {
    /// 40px cells, sprites, 150ms ticks
    Classic,
    /// 20px cells, sprites, faster ticks
    Fine,
    /// Plain blocks with sound cues and a pause after crashes
    Arcade,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => match cli.variant {
            Variant::Classic => GameConfig::classic(),
            Variant::Fine => GameConfig::fine(),
            Variant::Arcade => GameConfig::arcade(),
        },
    };

    if let Some(width) = cli.width {
        config.screen_width = width;
    }
    if let Some(height) = cli.height {
        config.screen_height = height;
    }
    if let Some(pitch) = cli.pitch {
        config.grid_pitch = pitch;
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_delay_ms = tick_ms;
    }

    config.validate().context("Invalid game configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_file)?;
    let config = resolve_config(&cli)?;
    tracing::info!(?config, "configuration resolved");

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Play => {
            let mut play_mode = PlayMode::new(config)?;
            play_mode.run().await?;
        }
        Mode::Headless => {
            let seed = cli.seed.unwrap_or_else(rand::random);
            tracing::info!(seed, "headless seed");

            let report = HeadlessMode::new(config, seed, cli.ticks)?.run();
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{json}");
        }
    }

    Ok(())
}
