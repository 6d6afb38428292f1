//! Maintenance commands - get-stats and optimize

use crate::cli::output::{colors, format_bytes, format_duration, print_header, print_json};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for get-stats
#[derive(Args, Debug)]
pub struct GetStatsArgs {}

/// Arguments for optimize
#[derive(Args, Debug)]
pub struct OptimizeArgs {}

/// Statistics response
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub store_dir: String,
    #[serde(flatten)]
    pub stats: crate::core::types::StoreStats,
}

/// Execute get-stats command
pub async fn execute_stats(
    _args: GetStatsArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = StatsResponse {
        store_dir: services.store.path().to_string_lossy().into_owned(),
        stats: services.store.get_stats()?,
    };

    match format {
        OutputFormat::Human => {
            print_header("Store statistics");
            println!(
                "  Items:        {}",
                colors::number(&response.stats.item_count.to_string())
            );
            println!(
                "  Tags:         {}",
                colors::number(&response.stats.tag_count.to_string())
            );
            println!(
                "  Size on disk: {}",
                colors::number(&format_bytes(response.stats.size_on_disk))
            );
            println!("  Location:     {}", colors::dim(&response.store_dir));
        }
        OutputFormat::Json => print_json(&response)?,
    }

    Ok(())
}

/// Execute optimize command
pub async fn execute_optimize(
    _args: OptimizeArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = services.store.optimize()?;

    match format {
        OutputFormat::Human => {
            println!(
                "{} in {}",
                colors::success("Optimized"),
                format_duration(report.duration_ms as f64 / 1000.0)
            );
            println!(
                "  Segments: {} -> {}",
                colors::number(&report.segments_before.to_string()),
                colors::number(&report.segments_after.to_string())
            );
            println!(
                "  Size:     {} -> {}",
                colors::number(&format_bytes(report.size_before)),
                colors::number(&format_bytes(report.size_after))
            );
        }
        OutputFormat::Json => print_json(&report)?,
    }

    Ok(())
}
