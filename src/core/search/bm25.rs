//! BM25 search implementation using Tantivy.
//!
//! This module provides the SearchService for executing BM25-ranked
//! queries over stored items, with optional tag and date filters.

use super::query::QueryBuilder;
use crate::core::config::SearchConfig;
use crate::core::error::{MemdexError, Result};
use crate::core::storage::ItemStore;
use crate::core::types::{to_micros, SearchFilters, SearchHit, SearchRequest, SearchResponse};
use std::cmp::Reverse;
use std::ops::Bound;
use std::sync::Arc;
use std::time::Instant;
use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, ConstScoreQuery, Occur, Query, RangeQuery, TermQuery};
use tantivy::schema::IndexRecordOption;
use tantivy::{DocId, Score, SegmentReader, Term};

/// BM25 search service
pub struct SearchService {
    store: Arc<ItemStore>,
    default_limit: usize,
    max_limit: usize,
    max_query_length: usize,
}

impl SearchService {
    /// Create a new search service
    pub fn new(store: Arc<ItemStore>, config: &SearchConfig) -> Self {
        Self {
            store,
            default_limit: config.default_limit,
            max_limit: config.max_limit,
            max_query_length: config.max_query_length,
        }
    }

    /// Execute a search request
    pub fn execute(&self, request: SearchRequest) -> Result<SearchResponse> {
        self.search_advanced(&request.query, request.limit, &request.filters)
    }

    /// Full-text search over title, content and tags
    pub fn search(&self, query: &str, limit: Option<usize>) -> Result<SearchResponse> {
        self.search_advanced(query, limit, &SearchFilters::default())
    }

    /// Full-text search restricted by tag membership and `updated_at` range
    ///
    /// Filters are part of the executed query, so `limit` bounds the
    /// filtered set. They contribute no score, so ranking matches
    /// an unfiltered search.
    pub fn search_advanced(
        &self,
        query_str: &str,
        limit: Option<usize>,
        filters: &SearchFilters,
    ) -> Result<SearchResponse> {
        let start = Instant::now();

        // Validate query
        if query_str.trim().is_empty() {
            return Err(MemdexError::InvalidQuery(
                "Query cannot be empty".to_string(),
            ));
        }
        if query_str.chars().count() > self.max_query_length {
            return Err(MemdexError::InvalidQuery(format!(
                "Query exceeds {} characters",
                self.max_query_length
            )));
        }
        filters.validate()?;
        self.store.ensure_available()?;

        let fields = self.store.fields();
        let text_query = QueryBuilder::new(self.store.index(), fields)?.build(query_str)?;

        // Determine result limit
        let limit = limit.unwrap_or(self.default_limit).min(self.max_limit);
        if limit == 0 {
            return Ok(Self::response(query_str, Vec::new(), start));
        }

        let mut clauses: Vec<(Occur, Box<dyn Query>)> = vec![(Occur::Must, text_query)];
        clauses.extend(
            self.filter_queries(filters)
                .into_iter()
                .map(|q| (Occur::Must, q)),
        );
        let query: Box<dyn Query> = if clauses.len() == 1 {
            clauses.remove(0).1
        } else {
            Box::new(BooleanQuery::new(clauses))
        };

        // Rank by score, ties by write order
        let collector = TopDocs::with_limit(limit).tweak_score(|segment_reader: &SegmentReader| {
            let seq = segment_reader.fast_fields().u64("seq").ok();
            move |doc: DocId, score: Score| {
                let seq = seq.as_ref().and_then(|c| c.first(doc)).unwrap_or(u64::MAX);
                (score, Reverse(seq))
            }
        });

        let results = self.store.read(|searcher| {
            let top_docs = searcher
                .search(&query, &collector)
                .map_err(|e| MemdexError::StorageError(format!("Search failed: {e}")))?;

            top_docs
                .into_iter()
                .map(|((score, _), address)| {
                    Ok(SearchHit {
                        score,
                        item: self.store.load_item(searcher, address)?,
                    })
                })
                .collect::<Result<Vec<_>>>()
        })?;

        tracing::debug!(
            "Query '{}' returned {} results (filters: {})",
            query_str,
            results.len(),
            !filters.is_empty()
        );

        Ok(Self::response(query_str, results, start))
    }

    /// Non-scoring clauses for tag and date filters
    fn filter_queries(&self, filters: &SearchFilters) -> Vec<Box<dyn Query>> {
        let fields = self.store.fields();
        let mut queries: Vec<Box<dyn Query>> = Vec::new();

        if !filters.tags.is_empty() {
            let any_tag: Vec<(Occur, Box<dyn Query>)> = filters
                .tags
                .iter()
                .map(|tag| {
                    let term = Term::from_field_text(fields.tags, tag);
                    (
                        Occur::Should,
                        Box::new(TermQuery::new(term, IndexRecordOption::Basic)) as Box<dyn Query>,
                    )
                })
                .collect();
            queries.push(Box::new(ConstScoreQuery::new(
                Box::new(BooleanQuery::new(any_tag)),
                0.0,
            )));
        }

        if filters.date_from.is_some() || filters.date_to.is_some() {
            let lower = filters
                .date_from
                .map(|d| Bound::Included(to_micros(&d)))
                .unwrap_or(Bound::Unbounded);
            let upper = filters
                .date_to
                .map(|d| Bound::Included(to_micros(&d)))
                .unwrap_or(Bound::Unbounded);
            let range = RangeQuery::new_i64_bounds("updated_at".to_string(), lower, upper);
            queries.push(Box::new(ConstScoreQuery::new(Box::new(range), 0.0)));
        }

        queries
    }

    fn response(query: &str, results: Vec<SearchHit>, start: Instant) -> SearchResponse {
        SearchResponse {
            query: query.to_string(),
            count: results.len(),
            results,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }
}
