//! Display manager entry point.

use std::net::IpAddr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use display_manager::api::{create_router, AppState};
use display_manager::config::Config;
use display_manager::metrics;
use display_manager::modes::ModeRegistry;
use display_manager::utils::shutdown_signal;

/// Central control service for switching a display between modes.
#[derive(Parser, Debug)]
#[command(name = "display-manager")]
#[command(about = "Serve the display, control and status pages plus the mode API")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// Address to bind the HTTP server to.
    #[arg(long)]
    host: Option<IpAddr>,

    /// HTTP server port.
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// Address to bind the HTTP server to.
        #[arg(long)]
        host: Option<IpAddr>,

        /// HTTP server port.
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Print the configured display modes.
    ListModes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Configuration drives logging, so load it first
    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    init_logging(&config, args.verbose);

    match args.command {
        Some(Command::Serve { host, port }) => cmd_serve(config, host, port).await,
        Some(Command::CheckConfig) => cmd_check_config(config),
        Some(Command::ListModes) => cmd_list_modes(),
        None => cmd_serve(config, args.host, args.port).await,
    }
}

fn init_logging(config: &Config, verbose: bool) {
    let filter = if verbose || config.verbose {
        EnvFilter::new("display_manager=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let (json, text) = if config.log_json {
        (Some(fmt::layer().json()), None)
    } else {
        (None, Some(fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .init();
}

/// Check configuration validity.
fn cmd_check_config(config: Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("DISPLAY MANAGER - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    print!("Checking default mode... ");
    match AppState::from_config(&config) {
        Ok(_) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Default mode is not usable"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen Address: {}", config.socket_addr());
    println!("  Default Mode: {}", config.default_mode);
    println!("  Log Filter: {}", config.rust_log);
    println!("  Log Format: {}", if config.log_json { "JSON" } else { "Text" });
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Print the configured display modes.
fn cmd_list_modes() -> anyhow::Result<()> {
    let registry = ModeRegistry::builtin();

    println!("{:<12} {:<20} URL", "ID", "NAME");
    for mode in registry.iter() {
        println!("{:<12} {:<20} {}", mode.id, mode.name, mode.url);
    }

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(
    mut config: Config,
    host: Option<IpAddr>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    // Override with CLI args if provided
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    let mut app_state = AppState::from_config(&config)?;
    match metrics::install_recorder() {
        Ok(handle) => app_state = app_state.with_metrics(handle),
        Err(e) => warn!("Prometheus recorder unavailable: {}", e),
    }
    metrics::init_metrics();

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;

    info!("========================================");
    info!("DISPLAY MANAGER STARTED");
    info!("========================================");
    info!("Available modes: {:?}", app_state.modes.registry().ids());
    info!("Default mode: {}", config.default_mode);
    info!("Control page: http://{}/control", addr);
    info!("Display page: http://{}/", addr);
    info!("========================================");

    let router = create_router(app_state);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Display manager stopped");
    Ok(())
}
