//! memdex CLI - command-line interface to the memdex store
//!
//! Use this for scripting, imports, or quick lookups without an MCP client.
//!
//! # Examples
//!
//! ```bash
//! # Store a note
//! memdex store deploy-1 --title "Deploy checklist" --content "run migrations" --tag ops
//!
//! # Search
//! memdex search "deploy AND migrations"
//! memdex search-advanced deploy --tag ops --from 2024-01-01
//!
//! # Bulk import
//! memdex store-batch notes.json
//! ```

use clap::Parser;
use memdex::cli::output::print_error;
use memdex::cli::{run, Cli};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("memdex=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("memdex=warn"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .compact()
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
