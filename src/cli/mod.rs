//! CLI adapter for memdex
//!
//! Provides a command-line interface to the item store.
//! This module is parallel to `mcp/` - both depend on `core/` but not on each other.
//!
//! # Architecture
//!
//! ```text
//!              +------------------+
//!              |     core/        |
//!              |  (domain logic)  |
//!              +--------+---------+
//!                       |
//!          +------------+------------+
//!          |                         |
//!          v                         v
//! +------------------+      +------------------+
//! |      mcp/        |      |      cli/        |
//! | (stdio adapter)  |      | (clap adapter)   |
//! +------------------+      +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// memdex - local knowledge store with full-text search
///
/// Store titled, tagged notes under your own ids and find them again
/// with ranked keyword, phrase or boolean queries.
#[derive(Parser, Debug)]
#[command(name = "memdex")]
#[command(version)]
#[command(about = "Local knowledge store with BM25 search", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Log debug detail to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
///
/// Command names match MCP tool names (underscores become hyphens).
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store an item, replacing any item with the same id
    Store(commands::StoreArgs),

    /// Store items from a JSON file (or stdin) in one atomic commit
    #[command(name = "store-batch")]
    StoreBatch(commands::StoreBatchArgs),

    /// Show an item by id
    Retrieve(commands::RetrieveArgs),

    /// Ranked full-text search
    Search(commands::SearchArgs),

    /// Ranked full-text search with tag and date filters
    #[command(name = "search-advanced")]
    SearchAdvanced(commands::SearchAdvancedArgs),

    /// List items, most recently updated first
    List(commands::ListArgs),

    /// Delete an item by id
    Delete(commands::DeleteArgs),

    /// List distinct tags
    #[command(name = "get-tags")]
    GetTags(commands::GetTagsArgs),

    /// Show store statistics
    #[command(name = "get-stats")]
    GetStats(commands::GetStatsArgs),

    /// Compact the store
    Optimize(commands::OptimizeArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Show version information
    #[command(name = "get-server-info")]
    GetServerInfo(commands::InfoArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  memdex completions bash > ~/.local/share/bash-completion/completions/memdex
    ///   zsh:   memdex completions zsh > ~/.zfunc/_memdex
    ///   fish:  memdex completions fish > ~/.config/fish/completions/memdex.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::XdgDirs;
    use std::sync::Arc;

    // Handle completions command early (doesn't need services)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    // Initialize XDG directories
    let xdg = XdgDirs::new();
    xdg.ensure_dirs_exist()?;

    // Load configuration
    let config = Config::load_with_xdg(&xdg)?;

    // Open the store
    let services = Arc::new(Services::open(config)?);

    let result = dispatch(cli.command, &services, cli.format).await;

    // Release the writer even when the command failed
    if let Err(e) = services.close() {
        output::print_warning(&format!("Failed to close store: {e}"));
    }

    result
}

async fn dispatch(
    command: Commands,
    services: &std::sync::Arc<crate::core::services::Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Store(args) => commands::item::execute_store(args, services, format).await,
        Commands::StoreBatch(args) => {
            commands::item::execute_store_batch(args, services, format).await
        }
        Commands::Retrieve(args) => commands::item::execute_retrieve(args, services, format).await,
        Commands::Search(args) => commands::search::execute(args, services, format).await,
        Commands::SearchAdvanced(args) => {
            commands::search::execute_advanced(args, services, format).await
        }
        Commands::List(args) => commands::item::execute_list(args, services, format).await,
        Commands::Delete(args) => commands::item::execute_delete(args, services, format).await,
        Commands::GetTags(args) => commands::item::execute_get_tags(args, services, format).await,
        Commands::GetStats(args) => {
            commands::maintenance::execute_stats(args, services, format).await
        }
        Commands::Optimize(args) => {
            commands::maintenance::execute_optimize(args, services, format).await
        }
        Commands::ShowConfig(args) => commands::config::execute(args, services, format).await,
        Commands::GetServerInfo(args) => commands::info::execute(args, services, format).await,
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
