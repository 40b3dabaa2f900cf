//! Reveal service entry point.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use keyhole::api::{create_router, AppState};
use keyhole::config::{ConfigStore, Settings, SERVICE_API_KEY};
use keyhole::error::ServiceError;
use keyhole::metrics;
use keyhole::utils::shutdown_signal;

/// Minimal HTTP service that reveals a configured API key.
#[derive(Parser, Debug)]
#[command(name = "keyhole")]
#[command(about = "Serves the configured ServiceApiKey on GET /reveal-secret")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP listen port (overrides the PORT env var).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Run {
        /// HTTP listen port (overrides the PORT env var).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("keyhole=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Initialize metrics
    metrics::init_metrics();

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config()?,
        Some(Command::Run { port }) => cmd_run(port).await?,
        None => cmd_run(args.port).await?,
    }

    Ok(())
}

/// Check configuration validity.
fn cmd_check_config() -> keyhole::Result<()> {
    println!("======================================================================");
    println!("KEYHOLE - CONFIGURATION CHECK");
    println!("======================================================================");

    // Load settings
    print!("Loading settings... ");
    let settings = match Settings::load() {
        Ok(s) => {
            println!("OK");
            s
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(e.into());
        }
    };

    // Validate settings
    print!("Validating settings... ");
    match settings.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(ServiceError::InvalidConfig(e));
        }
    }

    // Check the revealed key
    print!("Checking {}... ", SERVICE_API_KEY);
    match &settings.service_api_key {
        Some(_) => println!("set"),
        None => println!("NOT SET (endpoint will return an empty body)"),
    }

    // Show settings summary
    println!("----------------------------------------------------------------------");
    println!("Settings Summary:");
    println!("  Listen Port: {}", settings.port);
    println!("  HTTPS Redirect Port: {}", settings.https_port);
    println!("  Log Level: {}", settings.rust_log);
    println!("  Verbose: {}", settings.verbose);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server.
async fn cmd_run(port_override: Option<u16>) -> keyhole::Result<()> {
    // Load settings
    info!("Loading settings...");
    let mut settings = Settings::load().map_err(|e| {
        error!("Failed to load settings: {}", e);
        ServiceError::Config(e)
    })?;

    // Override with CLI args if provided
    if let Some(port) = port_override {
        settings.port = port;
    }

    // Validate settings
    settings.validate().map_err(|e| {
        error!("Invalid settings: {}", e);
        ServiceError::InvalidConfig(e)
    })?;

    info!("Settings loaded successfully");
    info!("Listen port: {}", settings.port);
    info!("HTTPS redirect port: {}", settings.https_port);

    // Snapshot the configuration store
    let store = ConfigStore::from_env();
    if store.get(SERVICE_API_KEY).is_none() {
        warn!(
            "{} is not set; /reveal-secret will return an empty body",
            SERVICE_API_KEY
        );
    }

    // Create app state
    let app_state = AppState::new(store, settings.https_port);

    // Start HTTP server
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    let router = create_router(app_state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
