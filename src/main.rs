//! # Flashdeck - Flashcard Review
//!
//! A small desktop client for reviewing flip-to-reveal cards kept on a
//! remote card server.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run a local card server
//! cargo run -- serve --port 8080 --data cards.txt
//!
//! # Open the viewer against it
//! cargo run -- --server http://localhost:8080
//! ```

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flashdeck_client::HttpCardService;
use flashdeck_core::Config;
use flashdeck_server::ServerOptions;
use flashdeck_ui::{Flags, run};

/// Flashdeck - review flashcards from a card server
#[derive(Parser, Debug)]
#[command(name = "flashdeck")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Card server base URL (overrides the config file)
    #[arg(short, long, value_name = "URL")]
    server: Option<String>,

    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the reference card server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Card file (two lines per card)
        #[arg(short, long, value_name = "FILE")]
        data: Option<PathBuf>,
    },

    /// Write a config file with the default settings
    InitConfig {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting Flashdeck v{}", env!("CARGO_PKG_VERSION"));

    if let Some(Command::InitConfig { force }) = args.command {
        let path = match args.config {
            Some(path) => path,
            None => Config::default_path().context("Cannot locate the config directory")?,
        };
        return init_config(&path, force);
    }

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load(),
    };

    match args.command {
        // Handled before the config is loaded.
        Some(Command::InitConfig { .. }) => {}
        Some(Command::Serve { port, data }) => {
            let options = server_options(&config, port, data);
            let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
            runtime
                .block_on(flashdeck_server::serve(options))
                .context("Card server failed")?;
        }
        None => {
            let mut config = config;
            if let Some(server) = args.server {
                config.server.base_url = server;
            }

            let timeout = (config.server.timeout_secs > 0)
                .then(|| Duration::from_secs(config.server.timeout_secs));
            let service = HttpCardService::with_timeout(&config.server.base_url, timeout)
                .context("Invalid server URL")?;
            tracing::info!("Using card server at {}", service.base_url());

            let flags = Flags {
                config,
                service: Arc::new(service),
            };

            run(flags).map_err(|e| anyhow::anyhow!("Application error: {}", e))?;
        }
    }

    Ok(())
}

/// Writes the default config to `path`, refusing to clobber unless forced.
fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    Config::default()
        .save_to(path)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

/// CLI flags win over the `[storage]` section.
fn server_options(config: &Config, port: Option<u16>, data: Option<PathBuf>) -> ServerOptions {
    ServerOptions {
        addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, port.unwrap_or(config.storage.port))),
        data_file: Some(data.unwrap_or_else(|| config.storage.data_file.clone())),
    }
}
