//! Tests for CLI output formatting helpers
//!
//! Tests the output formatting utilities:
//! - Byte formatting (KB, MB, GB)
//! - Duration formatting (ms, s, m)
//! - Relative time formatting (just now, minutes ago, hours ago, days ago)

use chrono::{Duration, Utc};
use memdex::cli::output::{format_bytes, format_duration, format_relative_time};

/// Test byte formatting with various sizes
#[test]
fn test_format_bytes_various_sizes() {
    assert_eq!(format_bytes(0), "0 B");
    assert_eq!(format_bytes(1023), "1023 B");
    assert_eq!(format_bytes(1024), "1.0 KB");
    assert_eq!(format_bytes(1572864), "1.5 MB");
    assert_eq!(format_bytes(10737418240), "10.0 GB");
}

/// Test duration formatting with various times
#[test]
fn test_format_duration_various_times() {
    assert_eq!(format_duration(0.0), "0ms");
    assert_eq!(format_duration(0.25), "250ms");
    assert_eq!(format_duration(59.99), "59.99s");
    assert_eq!(format_duration(125.0), "2m 5.0s");
}

/// Test relative time formatting
#[test]
fn test_format_relative_time() {
    let now = Utc::now();
    assert_eq!(format_relative_time(&now), "just now");
    assert_eq!(format_relative_time(&(now - Duration::minutes(5))), "5m ago");
    assert_eq!(format_relative_time(&(now - Duration::hours(3))), "3h ago");
    assert_eq!(format_relative_time(&(now - Duration::days(2))), "2d ago");
    assert_eq!(
        format_relative_time(&(now + Duration::hours(1))),
        "in the future"
    );
}
