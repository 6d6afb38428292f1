//! Output formatting for CLI commands
//!
//! Provides utilities for formatting command output in human-readable
//! or JSON formats. Supports colored output (respects NO_COLOR env var).

use crate::core::types::Item;

/// Color scheme for CLI output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Style for labels/headers
    pub fn label(s: &str) -> ColoredString {
        s.bold()
    }

    /// Style for item IDs
    pub fn item_id(s: &str) -> ColoredString {
        s.cyan()
    }

    /// Style for tags
    pub fn tag(s: &str) -> ColoredString {
        s.blue()
    }

    /// Style for numbers/counts
    pub fn number(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for success messages
    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    /// Style for warning messages
    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for error messages
    pub fn error(s: &str) -> ColoredString {
        s.red().bold()
    }

    /// Style for dim/secondary text
    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }

    /// Style for search scores
    pub fn score(s: &str) -> ColoredString {
        s.magenta()
    }

    /// Style for rank numbers
    pub fn rank(s: &str) -> ColoredString {
        s.green().bold()
    }
}

/// Format bytes into human-readable size
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    let gb_val = bytes as f64 / GB as f64;
    let mb_val = bytes as f64 / MB as f64;
    let kb_val = bytes as f64 / KB as f64;

    if bytes >= GB {
        format!("{gb_val:.1} GB")
    } else if bytes >= MB {
        format!("{mb_val:.1} MB")
    } else if bytes >= KB {
        format!("{kb_val:.1} KB")
    } else {
        format!("{bytes} B")
    }
}

/// Format duration into human-readable string
pub fn format_duration(secs: f64) -> String {
    if secs >= 60.0 {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs - (mins * 60.0);
        format!("{mins:.0}m {remaining_secs:.1}s")
    } else if secs >= 1.0 {
        format!("{secs:.2}s")
    } else {
        let ms = secs * 1000.0;
        format!("{ms:.0}ms")
    }
}

/// Format relative time (e.g., "2h ago", "3d ago")
pub fn format_relative_time(timestamp: &chrono::DateTime<chrono::Utc>) -> String {
    let now = chrono::Utc::now();
    let duration = now.signed_duration_since(*timestamp);

    let secs = duration.num_seconds();
    if secs < 0 {
        return "in the future".to_string();
    }

    let mins = duration.num_minutes();
    let hours = duration.num_hours();
    let days = duration.num_days();

    if days > 0 {
        format!("{days}d ago")
    } else if hours > 0 {
        format!("{hours}h ago")
    } else if mins > 0 {
        format!("{mins}m ago")
    } else {
        "just now".to_string()
    }
}

/// Comma-separated colored tags, or an empty string
pub fn format_tags(item: &Item) -> String {
    item.tags
        .iter()
        .map(|t| colors::tag(t).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One-line item summary used by list and batch output
pub fn item_line(item: &Item) -> String {
    let tags = format_tags(item);
    let mut line = format!("  {:<24} {}", colors::item_id(&item.id), item.title);
    if !tags.is_empty() {
        line.push_str(&format!("  [{tags}]"));
    }
    line.push_str(&format!(
        "  {}",
        colors::dim(&format_relative_time(&item.updated_at))
    ));
    line
}

/// Print a full item (retrieve, store)
pub fn print_item(item: &Item) {
    println!("{} {}", colors::label(&item.title), colors::dim(&format!("({})", item.id)));
    let tags = format_tags(item);
    if !tags.is_empty() {
        println!("{}: {}", colors::label("Tags"), tags);
    }
    println!("{}: {}", colors::label("Created"), item.created_at.to_rfc3339());
    println!(
        "{}: {} {}",
        colors::label("Updated"),
        item.updated_at.to_rfc3339(),
        colors::dim(&format!("({})", format_relative_time(&item.updated_at)))
    );
    if !item.content.is_empty() {
        println!();
        println!("{}", item.content);
    }
}

/// Print pretty JSON for `--format json`
pub fn print_json<T: serde::Serialize>(data: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{}", colors::success(message));
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{}: {}", colors::warning("Warning"), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{}: {}", colors::error("Error"), message);
}

/// Print a header/title
pub fn print_header(title: &str) {
    println!("{}", colors::label(title));
}
