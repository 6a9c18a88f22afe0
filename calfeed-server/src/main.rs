use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use calfeed_server::app;
use calfeed_server::auth::ApiKeyVerifier;
use calfeed_server::config::ServerConfig;
use calfeed_server::state::AppState;

#[derive(Parser)]
#[command(name = "calfeed-server", version, about = "Serve ICS feeds as day-grouped JSON agendas")]
struct Cli {
    /// Config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Address to bind, overrides config
        #[arg(long)]
        host: Option<IpAddr>,

        /// Port to listen on, overrides config
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print a new API key signed with the configured secret
    IssueKey {
        /// Last day the key is valid (YYYY-MM-DD)
        #[arg(long)]
        expires: NaiveDate,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let cli = Cli::parse();
    let mut config =
        ServerConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    match cli.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
    }) {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            serve(&config).await
        }
        Command::IssueKey { expires } => issue_key(&config, expires),
    }
}

async fn serve(config: &ServerConfig) -> Result<()> {
    let state = AppState::new(config)?;
    let addr = config.socket_addr();

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("calfeed-server listening on http://{}", addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}

fn issue_key(config: &ServerConfig, expires: NaiveDate) -> Result<()> {
    let secret = config
        .api_secret()
        .context("No api_secret configured (set CALFEED_API_SECRET)")?;
    let verifier = ApiKeyVerifier::new(secret, config.api_key_prefix.clone())
        .map_err(|e| anyhow::anyhow!("Invalid API secret: {e}"))?;

    let random = Uuid::new_v4().simple().to_string();
    println!("{}", verifier.issue(&random, expires));
    Ok(())
}
