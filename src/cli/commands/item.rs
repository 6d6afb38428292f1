//! Item commands - store, store-batch, retrieve, list, delete, get-tags
//!
//! These commands are exposed as top-level CLI commands matching MCP tool names:
//! - `store` (MCP: store)
//! - `store-batch` (MCP: store_batch)
//! - `retrieve` (MCP: retrieve)
//! - `list` (MCP: list)
//! - `delete` (MCP: delete)
//! - `get-tags` (MCP: get_tags)

use crate::cli::output::{self, colors, item_line, print_item, print_json};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::{Item, ItemInput, TagSet};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for store
#[derive(Args, Debug)]
pub struct StoreArgs {
    /// Item ID
    pub id: String,

    /// Item title
    #[arg(long, short = 't')]
    pub title: String,

    /// Item content
    #[arg(long, short = 'c', default_value = "")]
    pub content: String,

    /// Tag (repeatable, or comma-separated)
    #[arg(long = "tag", value_delimiter = ',')]
    pub tags: Vec<String>,
}

/// Arguments for store-batch
#[derive(Args, Debug)]
pub struct StoreBatchArgs {
    /// JSON file with an array of items, or `{"items": [...]}`; `-` or omitted reads stdin
    pub file: Option<PathBuf>,
}

/// Arguments for retrieve
#[derive(Args, Debug)]
pub struct RetrieveArgs {
    /// Item ID
    pub id: String,
}

/// Arguments for list
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Items per page (defaults to list.default_limit)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Items to skip
    #[arg(long, default_value = "0")]
    pub offset: usize,
}

/// Arguments for delete
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Item ID
    pub id: String,
}

/// Arguments for get-tags
#[derive(Args, Debug)]
pub struct GetTagsArgs {}

/// Accepted layouts for a batch file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BatchFile {
    Items(Vec<ItemInput>),
    Wrapped { items: Vec<ItemInput> },
}

impl BatchFile {
    fn into_items(self) -> Vec<ItemInput> {
        match self {
            BatchFile::Items(items) | BatchFile::Wrapped { items } => items,
        }
    }
}

/// Batch store response
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub count: usize,
    pub items: Vec<Item>,
}

/// Item list response
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub offset: usize,
    pub limit: usize,
    pub count: usize,
    pub items: Vec<Item>,
}

/// Delete response
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub id: String,
    pub deleted: bool,
}

/// Tag list response
#[derive(Debug, Serialize)]
pub struct TagsResponse {
    pub count: usize,
    pub tags: Vec<String>,
}

/// Execute store command
pub async fn execute_store(
    args: StoreArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = ItemInput::new(args.id, args.title, args.content, TagSet::new(args.tags));
    let item = services.store.store(input)?;

    match format {
        OutputFormat::Human => {
            output::print_success(&format!("Stored '{}'", item.id));
            print_item(&item);
        }
        OutputFormat::Json => print_json(&item)?,
    }

    Ok(())
}

/// Read a batch from a file or stdin
fn read_batch(file: Option<&PathBuf>) -> Result<Vec<ItemInput>, Box<dyn std::error::Error>> {
    let text = match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read '{}': {e}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let batch: BatchFile =
        serde_json::from_str(&text).map_err(|e| format!("Invalid batch JSON: {e}"))?;
    Ok(batch.into_items())
}

/// Execute store-batch command
pub async fn execute_store_batch(
    args: StoreBatchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let inputs = read_batch(args.file.as_ref())?;
    let items = services.store.store_batch(inputs)?;

    let response = BatchResponse {
        count: items.len(),
        items,
    };

    match format {
        OutputFormat::Human => {
            output::print_success(&format!("Stored {} item(s) in one commit", response.count));
            for item in &response.items {
                println!("{}", item_line(item));
            }
        }
        OutputFormat::Json => print_json(&response)?,
    }

    Ok(())
}

/// Execute retrieve command
pub async fn execute_retrieve(
    args: RetrieveArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(item) = services.store.retrieve(&args.id)? else {
        return Err(format!(
            "Item '{}' not found. Run 'memdex list' to see stored items.",
            args.id
        )
        .into());
    };

    match format {
        OutputFormat::Human => print_item(&item),
        OutputFormat::Json => print_json(&item)?,
    }

    Ok(())
}

/// Execute list command
pub async fn execute_list(
    args: ListArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let limit = services.list_limit(args.limit);
    let items = services.store.list(limit, args.offset)?;

    let response = ListResponse {
        offset: args.offset,
        limit,
        count: items.len(),
        items,
    };

    match format {
        OutputFormat::Human => {
            if response.items.is_empty() {
                println!(
                    "No items found. Run '{}' to add one.",
                    colors::label("memdex store <id> --title <title>")
                );
            } else {
                println!(
                    "{} ({}):",
                    colors::label("Items"),
                    colors::number(&response.count.to_string())
                );
                for item in &response.items {
                    println!("{}", item_line(item));
                }
            }
        }
        OutputFormat::Json => print_json(&response)?,
    }

    Ok(())
}

/// Execute delete command
pub async fn execute_delete(
    args: DeleteArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let deleted = services.store.delete(&args.id)?;
    let response = DeleteResponse {
        id: args.id,
        deleted,
    };

    match format {
        OutputFormat::Human => {
            if response.deleted {
                output::print_success(&format!("Deleted '{}'", response.id));
            } else {
                output::print_warning(&format!("Item '{}' not found, nothing deleted", response.id));
            }
        }
        OutputFormat::Json => print_json(&response)?,
    }

    Ok(())
}

/// Execute get-tags command
pub async fn execute_get_tags(
    _args: GetTagsArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let tags = services.store.get_tags()?;
    let response = TagsResponse {
        count: tags.len(),
        tags,
    };

    match format {
        OutputFormat::Human => {
            if response.tags.is_empty() {
                println!("No tags in use.");
            } else {
                for tag in &response.tags {
                    println!("{}", colors::tag(tag));
                }
            }
        }
        OutputFormat::Json => print_json(&response)?,
    }

    Ok(())
}
