//! orage-agent main entry point
//!
//! This binary serves as the main entry point for the agent.
//! It handles CLI parsing, logging setup, and daemon initialization.

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use orage_agent::bus::BusManager;
use orage_agent::calendar::FsCalendar;
use orage_agent::config::Config;
use orage_agent::control::ControlHandler;
use orage_agent::wake::{MonitorFactory, WakeObserverRegistry};
use orage_agent::{APP_NAME, VERSION};
use std::path::Path;
use std::sync::Arc;
use tokio::signal;

/// D-Bus remote-control and suspend/resume monitoring agent for Orage
#[derive(Parser, Debug)]
#[command(name = APP_NAME, version = VERSION, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        default_value = "/etc/orage-agent/config.toml"
    )]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the agent daemon
    Start,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    info!("Starting {} v{}", APP_NAME, VERSION);

    // Execute command
    if let Err(e) = run(cli).await {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize structured logging with tracing
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the CLI command
async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Start => {
            if !Path::new(&cli.config).exists() {
                info!("No configuration file at {}, using defaults", cli.config);
            }
            let config = Config::load_or_default(&cli.config)?;

            let calendar = Arc::new(FsCalendar::new());
            let handler = Arc::new(ControlHandler::new(calendar));

            // Name acquisition failure only degrades the remote-control
            // feature; the agent keeps running.
            let mut bus = BusManager::new(&config.control.well_known_name);
            if config.control.enabled {
                if let Err(e) = bus.acquire_name(handler).await {
                    error!("Remote control disabled: {}", e);
                }
            } else {
                info!("Remote control disabled by configuration");
            }

            let registry = Arc::new(WakeObserverRegistry::new());
            let monitor = if config.wake.enabled {
                registry.register(|| info!("Resumed from suspend, reminders due for re-evaluation"));
                let factory = MonitorFactory::new(&config.wake.backends);
                factory.attach(registry.clone()).await
            } else {
                info!("Wake monitoring disabled by configuration");
                None
            };

            info!("Agent started");
            shutdown_signal().await;

            info!("Shutting down agent");
            if let Some(monitor) = monitor {
                monitor.detach().await;
            }
            bus.release().await;
            Ok(())
        }
        Commands::Version => {
            println!("{} v{}", APP_NAME, VERSION);
            Ok(())
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
