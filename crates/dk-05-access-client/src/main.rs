//! Access client binary.
//!
//! Configuration precedence: defaults, then `DK_*` environment variables,
//! then command-line flags.

use anyhow::{Context, Result};
use clap::Parser;
use dk_01_time_policy::SystemClock;
use dk_02_passcode_validator::{KeySet, TotpSecret};
use dk_03_signed_request::SharedSecret;
use dk_05_access_client::{
    enroll_all, load_accounts, AccessClient, AccessClientConfig, AuthorizationGate, ConfigError,
    DoorClient,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Access client: turns keypad codes into door commands
#[derive(Parser, Debug)]
#[command(name = "access-client")]
#[command(about = "Validates TOTP passcodes against enrolled accounts and opens the door")]
struct Args {
    /// JSON list of accounts: objects with name, email, "time policy", secret (base32)
    accounts: Option<PathBuf>,

    /// Base64 key shared with the door service
    api_key: Option<String>,

    /// Number of seconds to open the door for
    #[arg(short, long)]
    seconds_granted: Option<i64>,

    /// Port the door service listens on
    #[arg(short = 'p', long)]
    door_port: Option<u16>,

    /// Host running the door service
    #[arg(long)]
    door_host: Option<String>,

    /// Seconds to refuse input after a failed attempt
    #[arg(long)]
    cooldown: Option<u64>,

    /// Parse time policies on each attempt instead of at startup
    #[arg(long)]
    lazy_policies: bool,

    /// Print a fresh base32 TOTP secret for enrolling someone, then exit
    #[arg(long)]
    new_secret: bool,
}

fn env_override<T: std::str::FromStr>(name: &str, target: &mut T) {
    if let Ok(raw) = std::env::var(name) {
        match raw.parse() {
            Ok(value) => *target = value,
            Err(_) => warn!(var = name, "Ignoring unparsable environment override"),
        }
    }
}

fn load_config(args: &Args) -> AccessClientConfig {
    let mut config = AccessClientConfig::default();

    // Override from environment
    env_override("DK_DOOR_HOST", &mut config.door_host);
    env_override("DK_DOOR_PORT", &mut config.door_port);
    env_override("DK_SECONDS_GRANTED", &mut config.seconds_granted);
    env_override("DK_COOLDOWN_SECS", &mut config.cooldown_secs);
    env_override("DK_EAGER_POLICIES", &mut config.eager_policies);
    if let Ok(path) = std::env::var("DK_ACCOUNTS_FILE") {
        config.accounts_file = Some(PathBuf::from(path));
    }
    if let Ok(key) = std::env::var("DK_API_KEY") {
        config.api_key = Some(key);
    }

    // Command line wins
    if let Some(seconds) = args.seconds_granted {
        config.seconds_granted = seconds;
    }
    if let Some(port) = args.door_port {
        config.door_port = port;
    }
    if let Some(host) = &args.door_host {
        config.door_host = host.clone();
    }
    if let Some(cooldown) = args.cooldown {
        config.cooldown_secs = cooldown;
    }
    if args.lazy_policies {
        config.eager_policies = false;
    }
    if let Some(accounts) = &args.accounts {
        config.accounts_file = Some(accounts.clone());
    }
    if let Some(key) = &args.api_key {
        config.api_key = Some(key.clone());
    }

    config
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if args.new_secret {
        println!("{}", TotpSecret::generate().to_base32());
        return Ok(());
    }

    // Initialize logging; stdout carries the prompt
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(&args);
    config.validate().context("invalid access client configuration")?;

    let accounts_file = config
        .accounts_file
        .clone()
        .ok_or(ConfigError::MissingAccounts)?;
    let api_key = config.api_key.as_deref().ok_or(ConfigError::MissingApiKey)?;

    let accounts = load_accounts(&accounts_file)
        .with_context(|| format!("loading accounts from {}", accounts_file.display()))?;
    let keys = enroll_all(accounts, config.eager_policies).context("enrolling accounts")?;
    info!(accounts = keys.len(), "Loaded accounts");

    let secret = SharedSecret::from_base64(api_key).context("API key is not valid base64")?;
    let door = DoorClient::new(
        &config.door_host,
        config.door_port,
        secret,
        config.request_timeout,
    )?;
    info!(door = %door.url(), seconds_granted = config.seconds_granted, "Door client ready");

    let validator =
        KeySet::new(keys, config.cooldown()).with_callback(AuthorizationGate::new(SystemClock));
    let client = AccessClient::new(validator, door, config.seconds_granted);

    let input = tokio::io::BufReader::new(tokio::io::stdin());
    tokio::select! {
        result = client.run(input, tokio::io::stdout()) => result.context("reading passcodes")?,
        _ = tokio::signal::ctrl_c() => info!("Received shutdown signal"),
    }
    Ok(())
}
