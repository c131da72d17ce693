use anyhow::{Context, Result};
use clap::Parser;
use pico_snake::game::GameConfig;
use pico_snake::modes::PlayMode;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Level;

#[derive(Parser)]
#[command(name = "pico_snake")]
#[command(version, about = "Classic Snake on a 320x240 handheld screen, in your terminal")]
struct Cli {
    /// JSON file with game constants; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frames per second of the update/render loop
    #[arg(long)]
    fps: Option<u32>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log verbosity
    #[arg(long, default_value = "info")]
    log_level: Level,
}

fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };

    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .init();
    Ok(())
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };

    if let Some(fps) = cli.fps {
        config.frame_rate = fps;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = load_config(&cli)?;

    if cli.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let mut play_mode = PlayMode::new(config, cli.seed)?;
    play_mode.run().await?;

    let summary = play_mode.finish();
    println!(
        "Final score: {} (level {}, {} moves)",
        summary.score, summary.level, summary.moves
    );

    Ok(())
}
