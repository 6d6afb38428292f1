//! MCP tool implementations
//!
//! Each tool exposes exactly one store or search operation to MCP
//! clients.

pub mod delete;
pub mod get_server_info;
pub mod get_stats;
pub mod get_tags;
pub mod handler;
pub mod helpers;
pub mod list;
pub mod optimize;
pub mod registry;
pub mod retrieve;
pub mod search;
pub mod search_advanced;
pub mod show_config;
pub mod store;
pub mod store_batch;

pub use delete::DeleteHandler;
pub use get_server_info::GetServerInfoHandler;
pub use get_stats::GetStatsHandler;
pub use get_tags::GetTagsHandler;
pub use handler::{parse_args, text_content, McpToolHandler};
pub use helpers::{format_bytes, format_item, format_time_ago, truncate_text};
pub use list::ListHandler;
pub use optimize::OptimizeHandler;
pub use registry::ToolRegistry;
pub use retrieve::RetrieveHandler;
pub use search::SearchHandler;
pub use search_advanced::SearchAdvancedHandler;
pub use show_config::ShowConfigHandler;
pub use store::StoreHandler;
pub use store_batch::StoreBatchHandler;
