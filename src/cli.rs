//! tickring command line
//!
//! `serve` runs the HTTP service, `time` prints one clock payload, and
//! `config` prints the effective configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::info;

use crate::clock::{Clock, HourFormat};
use crate::config::{Config, LogFormat};
use crate::ring::RingList;
use crate::server::{Server, SharedHistory};
use crate::telemetry::init_tracing;

#[derive(Parser)]
#[command(name = "tickring")]
#[command(about = "Clock service with a bounded ring of recent time records")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service (default)
    Serve(ServeArgs),

    /// Print the current time payload as JSON
    Time {
        /// IANA timezone, e.g. Europe/Madrid
        #[arg(long)]
        tz: Option<String>,

        /// Hour format
        #[arg(long, value_enum, default_value = "24")]
        format: HourFormat,
    },

    /// Print the effective configuration as TOML
    Config,
}

#[derive(Args, Default)]
struct ServeArgs {
    /// Bind host
    #[arg(long)]
    host: Option<String>,

    /// Bind port
    #[arg(short, long)]
    port: Option<u16>,

    /// History capacity
    #[arg(long, conflicts_with = "unbounded")]
    capacity: Option<i64>,

    /// Keep every record
    #[arg(long)]
    unbounded: bool,

    /// Log output format
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

impl ServeArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(capacity) = self.capacity {
            config.history.capacity = Some(capacity);
            config.history.unbounded = false;
        }
        if self.unbounded {
            config.history.unbounded = true;
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    let command = cli.command.unwrap_or(Commands::Serve(ServeArgs::default()));

    // Flags outrank the file and environment, so validate only after them.
    if let Commands::Serve(args) = &command {
        args.apply(&mut config);
    }
    config.validate()?;

    match command {
        Commands::Serve(_) => serve(config).await,
        Commands::Time { tz, format } => {
            let clock = Clock::new(config.default_tz()?);
            let payload = clock.payload(tz.as_deref().unwrap_or(""), format);
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(())
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

async fn serve(config: Config) -> Result<()> {
    init_tracing(&config.logging);
    match config.source() {
        Some(path) => info!("Loaded config from {}", path),
        None => info!("No config file found, using defaults"),
    }

    let history: SharedHistory = Arc::new(Mutex::new(RingList::new(config.history_capacity())?));
    let clock = Clock::new(config.default_tz()?);
    let addr = config.bind_addr();
    let server = Server::bind(&addr, history, clock)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(
        "History capacity: {}",
        config
            .history_capacity()
            .map_or_else(|| "unbounded".to_string(), |c| c.to_string())
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    server.run(shutdown_rx).await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("failed to register SIGTERM handler: {}", e);
                ctrl_c.await.ok();
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
    }
}
