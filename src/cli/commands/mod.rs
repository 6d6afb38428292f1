//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a group of CLI commands.
//! Command names match MCP tool names (underscores become hyphens in CLI).

pub mod completions;
pub mod config;
pub mod info;
pub mod item;
pub mod maintenance;
pub mod search;

// Re-export argument types for use in mod.rs
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use info::InfoArgs;
pub use item::{DeleteArgs, GetTagsArgs, ListArgs, RetrieveArgs, StoreArgs, StoreBatchArgs};
pub use maintenance::{GetStatsArgs, OptimizeArgs};
pub use search::{SearchAdvancedArgs, SearchArgs};
