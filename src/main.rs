//! Calculatrice CLI - standalone calculator server

use calculatrice::config::expand_path;
use calculatrice::locale::Locale;
use calculatrice::{Config, Core};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "calculatrice")]
#[command(author = "Calculatrice Team")]
#[command(version)]
#[command(about = "Calculatrice - server-rendered calculator with session history", long_about = None)]
struct Args {
    /// Path to configuration file [default: ~/.calculatrice/config.toml]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override server host
    #[arg(long)]
    host: Option<String>,

    /// Override page language (en, fr)
    #[arg(long)]
    locale: Option<Locale>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initialize a new config file with defaults
    #[arg(long)]
    init: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("calculatrice={},tower_http=debug", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = args
        .config
        .as_deref()
        .map(expand_path)
        .unwrap_or_else(Config::default_path);

    // Handle --init flag
    if args.init {
        if config_path.exists() {
            tracing::warn!("Config file already exists: {}", config_path.display());
            return Ok(());
        }
        Config::create_default(&config_path)?;
        tracing::info!("Created default config at: {}", config_path.display());
        return Ok(());
    }

    // Load configuration
    let mut config = if config_path.exists() {
        Config::from_file(&config_path)?
    } else {
        tracing::warn!(
            "Config file not found at {}, using defaults",
            config_path.display()
        );
        Config::default()
    };

    config.apply_env_overrides();

    // Apply CLI overrides
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(locale) = args.locale {
        config.display.locale = locale;
    }

    let core = Core::new(config)?;

    core.start_session_sweeper();

    // Blocks until shutdown
    core.start_api_server().await?;

    Ok(())
}
