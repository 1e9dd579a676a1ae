use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use baseball_stats::{
    config::Config,
    database::Database,
    errors::{ImportError, IngestError},
    models::RecordKind,
    web::WebServer,
};

#[derive(Parser)]
#[command(name = "baseball-stats")]
#[command(version)]
#[command(about = "Baseball position player and pitcher statistics service with CSV import")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Database URL (overrides config file)
    #[arg(short = 'd', long, value_name = "URL")]
    database_url: Option<String>,

    /// Do not import the configured CSV files before serving
    #[arg(long)]
    skip_import: bool,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

/// Load the configured CSV files, pitchers first
///
/// A missing file is logged and skipped; any other failure stops startup.
async fn import_on_startup(database: &Database, config: &Config) -> Result<()> {
    let pipeline = database.import_pipeline(config.import.on_malformed_row);

    for kind in [RecordKind::Pitchers, RecordKind::PositionPlayers] {
        let path = config.import.csv_path(kind);
        match pipeline.import_file(path, kind).await {
            Ok(summary) => info!(
                "Startup import of {}: {} inserted, {} already present",
                kind, summary.inserted, summary.ignored
            ),
            Err(ImportError::Parse(IngestError::Io { path, source }))
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                warn!("Skipping startup import of {}: {} not found", kind, path.display());
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with specified level
    let log_filter = if cli.log_level == "trace" {
        format!("baseball_stats={},tower_http=trace", cli.log_level)
    } else {
        format!("baseball_stats={},tower_http=info", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Baseball Stats Service v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load_from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    // Override config with CLI arguments
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }
    if let Some(database_url) = cli.database_url {
        config.database.url = database_url;
    }
    if cli.skip_import {
        config.import.on_startup = false;
    }

    info!("Using database: {}", config.database.url);

    let database = Database::new(&config.database).await?;
    database.migrate().await?;
    info!("Database connection established and migrations applied");

    if config.import.on_startup {
        import_on_startup(&database, &config).await?;
    }

    let web_server = WebServer::new(config, database)?;

    info!(
        "Starting web server on {}:{}",
        web_server.host(),
        web_server.port()
    );
    web_server.serve().await?;

    Ok(())
}
