//! Document intelligence server binary
//!
//! Run with: cargo run --bin legal-intel-server [config.toml]

use legal_intel::{config::AppConfig, server::LegalIntelServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "legal_intel=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Config path: first CLI argument, then the environment, then defaults
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("LEGAL_INTEL_CONFIG").ok());

    let config = match config_path {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path);
            AppConfig::from_file(&path)?
        }
        None => {
            tracing::info!("No config file given, using defaults");
            AppConfig::default()
        }
    };

    tracing::info!("Configuration loaded");
    tracing::info!("  - Database: {}", config.storage.database_path.display());
    tracing::info!("  - Upload dir: {}", config.storage.upload_dir.display());
    tracing::info!("  - Per-file limit: {}MB", config.ingest.max_file_mb);

    let server = LegalIntelServer::new(config)?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/upload          - Upload documents");
    println!("  POST /api/query/documents - Ask questions");
    println!("  GET  /api/documents       - List documents");
    println!("  GET  /api/dashboard       - Corpus summary");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
