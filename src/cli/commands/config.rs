//! Config command - show current configuration

use crate::cli::output::print_json;
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print the effective configuration as TOML
    #[arg(long)]
    pub toml: bool,
}

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = services.config.as_ref();

    match format {
        OutputFormat::Human if args.toml => {
            print!("{}", toml::to_string_pretty(config)?);
        }
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  storage:");
            println!("    store_dir: {}", config.storage.store_dir.display());
            println!("    writer_heap_mb: {}", config.storage.writer_heap_mb);
            println!("    max_id_length: {}", config.storage.max_id_length);
            println!("  search:");
            println!("    default_limit: {}", config.search.default_limit);
            println!("    max_limit: {}", config.search.max_limit);
            println!("    max_query_length: {}", config.search.max_query_length);
            println!("  list:");
            println!("    default_limit: {}", config.list.default_limit);
            println!("    max_limit: {}", config.list.max_limit);
        }
        OutputFormat::Json => print_json(config)?,
    }

    Ok(())
}
