//! Search module for BM25 full-text search.
//!
//! This module provides ranked search over stored items using
//! Tantivy's BM25 ranking and a small boolean query language.

mod bm25;
mod query;

pub use bm25::SearchService;
pub use query::{parse_query, Column, QueryBuilder, QueryExpr};
