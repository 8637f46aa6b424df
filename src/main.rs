use anyhow::Context;
use clap::Parser;
use nci::{Dashboard, DashboardConfig, HttpServer, SourceConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Neighborhood Complaint Index dashboard server
#[derive(Parser)]
#[command(name = "nci-server", version, about)]
struct Args {
    /// YAML configuration file
    #[arg(long, env = "NCI_CONFIG")]
    config: Option<PathBuf>,

    /// Load complaints from this CSV file instead of the configured source
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => DashboardConfig::from_yaml_file(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(path) = args.csv {
        config.source = SourceConfig::File { path };
    }
    if let Some(port) = args.port {
        config.http.port = port;
    }

    info!("NCI dashboard v{}", nci::version());

    let dashboard = Dashboard::from_config(&config).await
        .context("cannot initialise dashboard")?;

    // Load eagerly so a broken source stops startup instead of the first request.
    let table = dashboard.table().await.context("cannot load complaint data")?;
    info!("{} complaints across {} zip codes", table.len(), table.zip_codes().len());

    HttpServer::new(Arc::new(dashboard), config.http.clone())
        .start()
        .await?;

    Ok(())
}
