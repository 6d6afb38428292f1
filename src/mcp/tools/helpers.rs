//! Helper functions for MCP tools

use crate::core::types::Item;
use chrono::{DateTime, Utc};

/// Format bytes as human-readable size
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Coarse relative time ("3 hours ago")
pub fn format_time_ago(ts: DateTime<Utc>) -> String {
    let secs = (Utc::now() - ts).num_seconds();
    match secs {
        s if s < 60 => "just now".to_string(),
        s if s < 3600 => format!("{} min ago", s / 60),
        s if s < 86_400 => format!("{} hours ago", s / 3600),
        s => format!("{} days ago", s / 86_400),
    }
}

/// Truncate text if it exceeds max length
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    let total = text.chars().count();
    if total <= max_chars {
        return text.to_string();
    }

    // Truncate at character boundary
    let truncated: String = text.chars().take(max_chars).collect();
    format!(
        "{}...\n\n[Truncated {} chars]",
        truncated,
        total - max_chars
    )
}

/// Render an item as a Markdown section
pub fn format_item(item: &Item, heading: &str, max_content_chars: usize) -> String {
    let mut output = format!("## {heading}\n");
    output.push_str(&format!("- **ID:** `{}`\n", item.id));
    if !item.tags.is_empty() {
        output.push_str(&format!("- **Tags:** {}\n", item.tags.join(", ")));
    }
    output.push_str(&format!(
        "- **Created:** {}\n",
        item.created_at.to_rfc3339()
    ));
    output.push_str(&format!(
        "- **Updated:** {} ({})\n\n",
        item.updated_at.to_rfc3339(),
        format_time_ago(item.updated_at)
    ));

    if !item.content.is_empty() {
        output.push_str(&truncate_text(&item.content, max_content_chars));
        output.push_str("\n\n");
    }

    output
}
