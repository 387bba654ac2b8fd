//! Door service binary.
//!
//! Configuration precedence: defaults, then `DK_*` environment variables,
//! then command-line flags.

use anyhow::{Context, Result};
use clap::Parser;
use dk_04_door_service::{DoorService, DoorServiceConfig, LoggingActuator};
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Door service: opens the door for authenticated clients
#[derive(Parser, Debug)]
#[command(name = "door-service")]
#[command(about = "Listens for HMAC-signed unlock commands and drives the door relay")]
struct Args {
    /// JSON list of authorised apps: objects with Key (base64), Name, DevName, DevEmail
    tokens: Option<PathBuf>,

    /// What port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind
    #[arg(long)]
    host: Option<IpAddr>,

    /// Only accept requests from local network addresses
    #[arg(long)]
    local_only: bool,

    /// Longest a single command may hold the door open (seconds)
    #[arg(long)]
    max_open_seconds: Option<i64>,
}

fn env_override<T: std::str::FromStr>(name: &str, target: &mut T) {
    if let Ok(raw) = std::env::var(name) {
        match raw.parse() {
            Ok(value) => *target = value,
            Err(_) => warn!(var = name, value = %raw, "Ignoring unparsable environment override"),
        }
    }
}

fn load_config(args: &Args) -> DoorServiceConfig {
    let mut config = DoorServiceConfig::default();

    // Override from environment
    env_override("DK_DOOR_HOST", &mut config.host);
    env_override("DK_DOOR_PORT", &mut config.port);
    env_override("DK_LOCAL_ONLY", &mut config.local_only);
    env_override("DK_MAX_OPEN_SECONDS", &mut config.max_open_seconds);
    env_override("DK_MAX_BODY_BYTES", &mut config.max_body_bytes);
    if let Ok(path) = std::env::var("DK_TOKENS_FILE") {
        config.tokens_file = Some(PathBuf::from(path));
    }

    // Command line wins
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    if args.local_only {
        config.local_only = true;
    }
    if let Some(max) = args.max_open_seconds {
        config.max_open_seconds = max;
    }
    if let Some(tokens) = &args.tokens {
        config.tokens_file = Some(tokens.clone());
    }

    config
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let config = load_config(&args);
    config.validate().context("invalid door service configuration")?;

    // Relay hardware is driven outside this process; log transitions instead
    let service = DoorService::from_config(config, Arc::new(LoggingActuator))
        .context("starting door service")?;
    tokio::select! {
        result = service.run() => result?,
        _ = tokio::signal::ctrl_c() => info!("Received shutdown signal"),
    }
    Ok(())
}
