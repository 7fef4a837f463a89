use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio::client::ApiClient;
use folio::config::Config;
use folio::coordinator::LoadCoordinator;
use folio::lifecycle::{setup_tracing, PortfolioServer};
use folio::render::styles::{self, Palette};
use folio::render::PortfolioView;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "folio", version, about = "Personal portfolio API and loader")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the read-only portfolio API
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
        /// SQLite database file (overrides DATABASE_PATH)
        #[arg(long)]
        database: Option<PathBuf>,
    },
    /// Load every resource from the API and print the portfolio
    Load {
        /// API base URL (overrides FOLIO_API_URL)
        #[arg(long)]
        api_url: Option<String>,
        /// Per-request timeout in seconds (overrides FOLIO_TIMEOUT_SECS)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();
    let mut config = Config::from_env().context("Invalid configuration")?;

    match cli.command {
        Command::Serve { port, database } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(database) = database {
                config.database_path = database;
            }
            serve(&config).await
        }
        Command::Load {
            api_url,
            timeout_secs,
        } => {
            if let Some(api_url) = api_url {
                config.api_url = api_url;
            }
            if let Some(secs) = timeout_secs {
                config.request_timeout = Duration::from_secs(secs);
            }
            load(&config).await
        }
    }
}

async fn serve(config: &Config) -> Result<()> {
    let server = PortfolioServer::start_with_config(config)
        .await
        .context("Failed to start server")?;
    server.run_until_signal().await?;
    Ok(())
}

async fn load(config: &Config) -> Result<()> {
    if std::io::stdout().is_terminal() {
        styles::register(Palette::ansi());
    }

    let client = ApiClient::from_config(config).context("Failed to build HTTP client")?;
    info!(base_url = client.base_url(), "Loading portfolio");
    let handle = LoadCoordinator::start(Arc::new(client));

    let mut progress = handle.subscribe();
    let reporter = tokio::spawn(async move {
        while progress.changed().await.is_ok() {
            let current = *progress.borrow_and_update();
            info!(percent = current.percent(), "Loading");
            if current.is_ready() {
                break;
            }
        }
    });

    let data = handle.wait_ready().await?;
    reporter.abort();
    handle.teardown().await?;

    print!("{}", PortfolioView(&data));
    Ok(())
}
