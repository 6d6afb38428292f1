//! Search commands - search and search-advanced

use crate::cli::output::{colors, format_tags, print_json};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::{parse_timestamp, SearchFilters, SearchResponse, TagSet};
use clap::Args;
use std::sync::Arc;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query (supports AND, OR, NOT, "phrases", prefix*, title:/content:/tags:)
    pub query: String,

    /// Maximum number of results (defaults to search.default_limit)
    #[arg(long, short = 'k')]
    pub limit: Option<usize>,

    /// Only show item IDs (no content)
    #[arg(long)]
    pub ids_only: bool,
}

/// Arguments for the search-advanced command
#[derive(Args, Debug)]
pub struct SearchAdvancedArgs {
    /// Search query
    pub query: String,

    /// Maximum number of results (defaults to search.default_limit)
    #[arg(long, short = 'k')]
    pub limit: Option<usize>,

    /// Keep items carrying this tag (repeatable; any one matches)
    #[arg(long = "tag", value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Earliest updated_at, RFC 3339 or YYYY-MM-DD
    #[arg(long)]
    pub from: Option<String>,

    /// Latest updated_at, RFC 3339 or YYYY-MM-DD (whole day)
    #[arg(long)]
    pub to: Option<String>,

    /// Only show item IDs (no content)
    #[arg(long)]
    pub ids_only: bool,
}

impl SearchAdvancedArgs {
    fn filters(&self) -> crate::core::error::Result<SearchFilters> {
        Ok(SearchFilters {
            tags: TagSet::new(&self.tags),
            date_from: self
                .from
                .as_deref()
                .map(|d| parse_timestamp(d, false))
                .transpose()?,
            date_to: self
                .to
                .as_deref()
                .map(|d| parse_timestamp(d, true))
                .transpose()?,
        })
    }
}

/// Execute the search command
pub async fn execute(
    args: SearchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = services.search.search(&args.query, args.limit)?;
    print_response(&response, args.ids_only, format)
}

/// Execute the search-advanced command
pub async fn execute_advanced(
    args: SearchAdvancedArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let filters = args.filters()?;
    let response = services
        .search
        .search_advanced(&args.query, args.limit, &filters)?;
    print_response(&response, args.ids_only, format)
}

fn print_response(
    response: &SearchResponse,
    ids_only: bool,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Human => {
            if response.results.is_empty() {
                println!("No results found for '{}'", colors::label(&response.query));
                return Ok(());
            }

            if !ids_only {
                println!(
                    "Found {} result(s) {}:\n",
                    colors::number(&response.count.to_string()),
                    colors::dim(&format!("({}ms)", response.duration_ms))
                );
            }

            for (i, hit) in response.results.iter().enumerate() {
                if ids_only {
                    println!("{}", hit.item.id);
                    continue;
                }

                println!(
                    "[{}] {} {} {}",
                    colors::rank(&(i + 1).to_string()),
                    colors::item_id(&hit.item.id),
                    hit.item.title,
                    colors::score(&format!("(score: {:.2})", hit.score))
                );
                let tags = format_tags(&hit.item);
                if !tags.is_empty() {
                    println!("    [{tags}]");
                }
                // First lines of content, truncated on char boundaries
                for line in hit.item.content.lines().take(3) {
                    let truncated = if line.chars().count() > 100 {
                        format!("{}...", line.chars().take(97).collect::<String>())
                    } else {
                        line.to_string()
                    };
                    println!("    {}", colors::dim(&truncated));
                }
                println!();
            }
        }
        OutputFormat::Json => print_json(response)?,
    }

    Ok(())
}
