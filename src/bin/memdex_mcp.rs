//! memdex MCP (Model Context Protocol) Server
//!
//! A stdio-based MCP server that exposes the memdex store as tools
//! for MCP clients.

use memdex::core::config::Config;
use memdex::core::services::Services;
use memdex::core::storage::StoreValidator;
use memdex::core::xdg::XdgDirs;
use memdex::mcp::McpServer;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("memdex=info"));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr) // stdout carries protocol frames
        .with_env_filter(filter)
        .with_ansi(false)
        .compact()
        .init();
}

/// Check store integrity on startup; findings are logged, not fatal
fn validate_store_on_startup(services: &Services) {
    tracing::info!("Validating store integrity...");

    match StoreValidator::new(&services.store).validate_and_log() {
        Ok(report) if !report.is_consistent => {
            tracing::warn!(
                "Store has {} duplicate id(s) and {} malformed document(s); {}",
                report.duplicate_ids.len(),
                report.malformed.len(),
                report.remediation().unwrap_or_default()
            );
        }
        Ok(_) => {}
        Err(e) => tracing::error!("Failed to validate store: {}", e),
    }
}

#[tokio::main]
async fn main() {
    init_logging();

    // Initialize XDG directories
    let xdg = XdgDirs::new();
    if let Err(e) = xdg.ensure_dirs_exist() {
        eprintln!("Failed to create XDG directories: {e}");
        std::process::exit(1);
    }
    xdg.log_paths();

    // Load configuration
    let config = Config::load_with_xdg(&xdg).unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {e}");
        std::process::exit(1);
    });
    config.log_config();

    // Open the store
    let services = match Services::open(config) {
        Ok(services) => Arc::new(services),
        Err(e) => {
            eprintln!("Failed to open store: {e}");
            std::process::exit(1);
        }
    };

    validate_store_on_startup(&services);

    let server = McpServer::new(Arc::clone(&services));
    let result = server.run().await;

    if let Err(e) = services.close() {
        tracing::error!("Failed to close store: {}", e);
    }

    if let Err(e) = result {
        eprintln!("MCP server error: {e}");
        std::process::exit(1);
    }
}
