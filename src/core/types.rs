//! Core data types for the memdex store.
//!
//! This module defines all data structures used throughout the
//! application, including items, tag sets, search hits, requests
//! and responses.

use crate::core::error::{MemdexError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Normalized set of tags
///
/// Tags are trimmed, empty entries are dropped and duplicates
/// collapse. Normalization happens on construction, so every
/// `TagSet` in the system is already canonical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    /// Build a normalized tag set from raw strings
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            tags.into_iter()
                .map(|t| t.as_ref().trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Exact membership test (no substring matching)
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag.trim())
    }

    /// Sorted tags as owned strings
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    /// Tags joined with `sep`, in sorted order
    pub fn join(&self, sep: &str) -> String {
        self.to_vec().join(sep)
    }
}

impl From<Vec<String>> for TagSet {
    fn from(tags: Vec<String>) -> Self {
        Self::new(tags)
    }
}

impl From<TagSet> for Vec<String> {
    fn from(tags: TagSet) -> Self {
        tags.0.into_iter().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// A stored knowledge item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Caller-supplied unique identity
    pub id: String,

    /// Human-readable title (never empty)
    pub title: String,

    /// Free-text body
    pub content: String,

    /// Normalized tags
    pub tags: TagSet,

    /// Set on first insertion of this id, never changed afterwards
    pub created_at: DateTime<Utc>,

    /// Set on every insert or update
    pub updated_at: DateTime<Utc>,
}

/// Caller-authored fields of an item, as accepted by `store` and `store_batch`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemInput {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: TagSet,
}

impl ItemInput {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        tags: TagSet,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            tags,
        }
    }
}

/// A ranked search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// BM25 relevance score (higher = more relevant)
    pub score: f32,

    /// The matching item
    #[serde(flatten)]
    pub item: Item,
}

/// Optional filters applied before ranking and limiting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Keep items carrying at least one of these tags
    #[serde(default)]
    pub tags: TagSet,

    /// Inclusive lower bound on `updated_at`
    #[serde(default)]
    pub date_from: Option<DateTime<Utc>>,

    /// Inclusive upper bound on `updated_at`
    #[serde(default)]
    pub date_to: Option<DateTime<Utc>>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.date_from.is_none() && self.date_to.is_none()
    }

    /// Reject an inverted date range
    pub fn validate(&self) -> Result<()> {
        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                return Err(MemdexError::InvalidArgument(format!(
                    "date_from ({}) is after date_to ({})",
                    from.to_rfc3339(),
                    to.to_rfc3339()
                )));
            }
        }
        Ok(())
    }
}

/// Request to search the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Full-text query string
    pub query: String,

    /// Number of results to return (optional)
    pub limit: Option<usize>,

    /// Tag and date filters
    #[serde(default)]
    pub filters: SearchFilters,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, limit: Option<usize>) -> Self {
        Self {
            query: query.into(),
            limit,
            filters: SearchFilters::default(),
        }
    }

    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }
}

/// Response from search operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Original query string
    pub query: String,

    /// Ranked results
    pub results: Vec<SearchHit>,

    /// Number of results returned
    pub count: usize,

    /// Query duration in milliseconds
    pub duration_ms: u64,
}

/// Aggregate store statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    pub item_count: u64,
    pub tag_count: usize,
    pub size_on_disk: u64,
}

/// Outcome of a maintenance pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeReport {
    pub segments_before: usize,
    pub segments_after: usize,
    pub size_before: u64,
    pub size_after: u64,
    pub duration_ms: u64,
}

/// Parse a caller-supplied timestamp
///
/// Accepts RFC 3339 (`2024-05-01T10:00:00Z`) or a bare date
/// (`2024-05-01`). A bare date resolves to the start of the day, or
/// to its last microsecond when `end_of_day` is set, so that a
/// date-only upper bound includes the whole day.
pub fn parse_timestamp(input: &str, end_of_day: bool) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        MemdexError::InvalidArgument(format!(
            "Invalid timestamp '{trimmed}': expected RFC 3339 or YYYY-MM-DD"
        ))
    })?;

    let naive = if end_of_day {
        date.and_hms_micro_opt(23, 59, 59, 999_999)
    } else {
        date.and_hms_opt(0, 0, 0)
    };

    naive
        .map(|n| n.and_utc())
        .ok_or_else(|| MemdexError::InvalidArgument(format!("Invalid date '{trimmed}'")))
}

/// Encode a timestamp as microseconds since the epoch
pub fn to_micros(ts: &DateTime<Utc>) -> i64 {
    ts.timestamp_micros()
}

/// Decode microseconds since the epoch
pub fn from_micros(micros: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_micros(micros).unwrap_or_default()
}
