use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use slidekit_core::{AppConfig, Deck};

mod commands;

use commands::simulate::Variant;

#[derive(Parser)]
#[command(name = "slidekit")]
#[command(author, version, about = "Slider engine with a terminal front-end")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (defaults to ~/.config/slidekit/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Deck file with slide content (defaults to the built-in sample)
    #[arg(short, long, global = true)]
    deck: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// Drive one slider headlessly and print a JSON frame per step
    Simulate {
        /// Which slider to drive
        #[arg(short, long, value_enum, default_value_t = Variant::Projects)]
        variant: Variant,
        /// Viewport width in pixels
        #[arg(short, long, default_value_t = 1280.0)]
        width: f64,
        /// Comma-separated steps, e.g. "next,goto:2,drag:-300,resize:800,tick"
        #[arg(short, long, default_value = "")]
        script: String,
    },
    /// List deck contents
    Deck,
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file path
    Path,
    /// Print the effective configuration
    Show,
    /// Write the default configuration if no file exists
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = Arc::new(
        AppConfig::load_from(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?,
    );

    let tui = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, tui)?;

    let deck = match &cli.deck {
        Some(path) => Deck::load(path)
            .with_context(|| format!("Failed to load deck from {}", path.display()))?,
        None => Deck::sample(),
    };

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config, deck).await,
        Some(Commands::Simulate {
            variant,
            width,
            script,
        }) => commands::simulate::run(&config, &deck, variant, width, &script),
        Some(Commands::Deck) => commands::deck::run(&deck),
        Some(Commands::Config { action }) => match action {
            ConfigAction::Path => commands::config::path(&config_path),
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init => commands::config::init(&config_path),
        },
    }
}

/// Initialize logging. `RUST_LOG` wins over `general.log_level`; while the
/// TUI owns the terminal, logs go to a file in the data dir.
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    let (file_layer, stderr_layer) = if to_file {
        let log_path = config.log_path();
        if let Some(parent) = log_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        let layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file));
        (Some(layer), None)
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr);
        (None, Some(layer))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}
