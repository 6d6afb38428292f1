//! Info command - show version and server information

use crate::cli::output::print_json;
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::mcp::protocol::PROTOCOL_VERSION;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the info command
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Also show item count
    #[arg(long, short = 'd')]
    pub detailed: bool,
}

/// Server information response
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub name: String,
    pub version: String,
    pub protocol: String,
    pub tools: u32,
    pub store_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<u64>,
}

/// Execute the info command
pub async fn execute(
    args: InfoArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let items = if args.detailed {
        Some(services.store.get_stats()?.item_count)
    } else {
        None
    };

    let info = InfoResponse {
        name: "memdex".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        protocol: format!("MCP {PROTOCOL_VERSION}"),
        tools: 12,
        store_dir: services.store.path().to_string_lossy().into_owned(),
        items,
    };

    match format {
        OutputFormat::Human => {
            println!("memdex {}", info.version);
            println!("Protocol: {}", info.protocol);
            println!("Tools: {}", info.tools);
            println!("Store: {}", info.store_dir);
            if let Some(count) = info.items {
                println!("Items: {count}");
            }
        }
        OutputFormat::Json => print_json(&info)?,
    }

    Ok(())
}
