use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use cpv_predictor::connector::adapter::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use cpv_predictor::{build_router, logging, Container, ContainerConfig};

#[derive(Parser)]
#[command(name = "cpv-predictor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    #[arg(short, long, default_value = "5000")]
    port: u16,

    #[arg(short, long)]
    verbose: bool,

    /// Directory the append-only log file is written to
    #[arg(long, default_value = "logs")]
    log_dir: String,

    /// Chat model used for predictions
    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Base URL of the chat-completions API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Fabricate deterministic predictions instead of calling the provider
    #[arg(long)]
    mock_model: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&PathBuf::from(&cli.log_dir), cli.verbose)?;

    let container = Arc::new(Container::new(ContainerConfig {
        model: cli.model,
        base_url: cli.base_url,
        mock_model: cli.mock_model,
    }));
    let app = build_router(container);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("CPV prediction service listening on http://{addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
