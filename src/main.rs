//! MatchInsights - Main Entry Point
//!
//! Serves match analysis sessions over websockets, or runs the listing
//! and analysis steps once from the command line.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use match_insights::common::channels::create_event_channel;
use match_insights::config::load_config;
use match_insights::{
    AnalysisServer, AnalysisSession, EventSink, MatchIdLister, MatchSource, Region,
    RiotRestClient,
};

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the websocket server (default)
    Serve {
        /// Address to bind, overrides the config file
        #[arg(long)]
        bind: Option<String>,
    },
    /// Print this season's match ids for a player as JSON
    Matches {
        #[arg(long)]
        puuid: String,
        #[arg(long, default_value = "americas")]
        region: Region,
    },
    /// List and analyze a player's season, printing events as JSON lines
    Analyze {
        #[arg(long)]
        puuid: String,
        #[arg(long, default_value = "americas")]
        region: Region,
    },
}

fn init_logging(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let config = load_config(Some(&args.config)).context("loading configuration")?;
    init_logging(args.log_level.as_deref().unwrap_or(&config.settings.log_level))?;

    info!("Starting MatchInsights");
    info!("Configuration file: {}", args.config);

    let client = RiotRestClient::from_config(&config.riot, config.settings.request_timeout())?;
    let source: Arc<dyn MatchSource> = Arc::new(client);

    match args.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => {
            let address = bind.unwrap_or_else(|| config.server.bind_address.clone());
            let server = AnalysisServer::new(source, config.settings.clone());

            tokio::select! {
                result = server.run(&address) => result?,
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal, cleaning up...");
                }
            }
        }
        Command::Matches { puuid, region } => {
            info!(
                "Listing season matches via {} (platform {})",
                region,
                region.platform_id()
            );
            let match_ids = MatchIdLister::new(source).list(&puuid, region).await?;
            println!("{}", serde_json::to_string(&match_ids)?);
        }
        Command::Analyze { puuid, region } => {
            let (tx, mut rx) = create_event_channel();
            let cancel = CancellationToken::new();
            let session = AnalysisSession::new(source, &config.settings, cancel.clone());
            let run = tokio::spawn(async move {
                session
                    .run_for_player(&puuid, region, EventSink::new(tx))
                    .await
            });

            loop {
                tokio::select! {
                    event = rx.recv() => match event {
                        Some(event) => println!("{}", event.to_json()?),
                        None => break,
                    },
                    _ = tokio::signal::ctrl_c() => {
                        info!("Received shutdown signal, cancelling analysis...");
                        cancel.cancel();
                    }
                }
            }

            let state = run.await?;
            info!("Analysis finished in state {:?}", state);
        }
    }

    Ok(())
}
