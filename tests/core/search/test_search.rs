// Integration tests for ranked full-text search

use crate::common::{create_test_services, sample_items};
use memdex::core::error::MemdexError;
use memdex::core::types::{ItemInput, SearchRequest, TagSet};

fn ids(response: &memdex::core::types::SearchResponse) -> Vec<&str> {
    response.results.iter().map(|h| h.item.id.as_str()).collect()
}

#[test]
fn test_search_basic_query() {
    let (services, _temp) = create_test_services();
    services
        .store
        .store(ItemInput::new("x", "T", "hello world", TagSet::new(["a", "b"])))
        .unwrap();

    let hits = services.search.search("hello", None).unwrap();
    assert_eq!(ids(&hits), vec!["x"]);
    assert!(hits.results[0].score > 0.0);

    let misses = services.search.search("nomatch", None).unwrap();
    assert!(misses.results.is_empty());
    assert_eq!(misses.count, 0);
}

#[test]
fn test_search_covers_title_content_and_tags() {
    let (services, _temp) = create_test_services();
    services.store.store_batch(sample_items()).unwrap();

    // Title only
    assert!(ids(&services.search.search("checklist", None).unwrap()).contains(&"deploy-checklist"));
    // Content only
    assert!(ids(&services.search.search("thiserror", None).unwrap()).contains(&"rust-errors"));
    // Tag only
    assert_eq!(ids(&services.search.search("books", None).unwrap()), vec!["reading-list"]);
}

#[test]
fn test_search_implicit_and() {
    let (services, _temp) = create_test_services();
    services.store.store_batch(sample_items()).unwrap();

    let hits = services.search.search("database backup", None).unwrap();
    assert_eq!(ids(&hits), vec!["db-backup"]);
}

#[test]
fn test_search_boolean_operators() {
    let (services, _temp) = create_test_services();
    services.store.store_batch(sample_items()).unwrap();

    let either = services.search.search("tokio OR nightly", None).unwrap();
    let mut found = ids(&either);
    found.sort();
    assert_eq!(found, vec!["db-backup", "rust-async"]);

    let without = services.search.search("rust NOT tokio", None).unwrap();
    let found = ids(&without);
    assert!(found.contains(&"rust-errors"));
    assert!(!found.contains(&"rust-async"));
}

#[test]
fn test_search_phrase_and_prefix() {
    let (services, _temp) = create_test_services();
    services.store.store_batch(sample_items()).unwrap();

    let phrase = services.search.search("\"database migrations\"", None).unwrap();
    assert_eq!(ids(&phrase), vec!["deploy-checklist"]);

    let prefix = services.search.search("migrat*", None).unwrap();
    assert_eq!(ids(&prefix), vec!["deploy-checklist"]);
}

#[test]
fn test_search_column_scoped() {
    let (services, _temp) = create_test_services();
    services.store.store_batch(sample_items()).unwrap();

    // "rust" appears in reading-list content but only rust-* titles
    let titled = services.search.search("title:rust", None).unwrap();
    let mut found = ids(&titled);
    found.sort();
    assert_eq!(found, vec!["rust-async", "rust-errors"]);

    let err = services.search.search("body:rust", None).unwrap_err();
    assert!(matches!(err, MemdexError::InvalidQuery(_)));
}

#[test]
fn test_search_more_relevant_first() {
    let (services, _temp) = create_test_services();
    services
        .store
        .store(ItemInput::new("weak", "Misc", "one mention of kafka among many other words here", TagSet::default()))
        .unwrap();
    services
        .store
        .store(ItemInput::new("strong", "Kafka", "kafka kafka consumer groups", TagSet::default()))
        .unwrap();

    let hits = services.search.search("kafka", None).unwrap();
    assert_eq!(ids(&hits), vec!["strong", "weak"]);
}

#[test]
fn test_search_respects_limit() {
    let (services, _temp) = create_test_services();
    services.store.store_batch(crate::common::NoteSet::generate(20)).unwrap();

    assert_eq!(services.search.search("common", Some(5)).unwrap().count, 5);
    assert_eq!(services.search.search("common", None).unwrap().count, 10);
    assert_eq!(services.search.search("common", Some(1000)).unwrap().count, 20);
    assert!(services.search.search("common", Some(0)).unwrap().results.is_empty());
}

#[test]
fn test_search_invalid_queries() {
    let (services, _temp) = create_test_services();

    for query in ["", "   ", "\"open", "(a OR b", "AND", "NOT x"] {
        let result = services.search.search(query, None);
        assert!(
            matches!(result, Err(MemdexError::InvalidQuery(_))),
            "query {query:?} should be invalid, got {result:?}"
        );
    }

    let long = "a ".repeat(400);
    assert!(matches!(
        services.search.search(&long, None),
        Err(MemdexError::InvalidQuery(_))
    ));
}

#[test]
fn test_execute_request() {
    let (services, _temp) = create_test_services();
    services.store.store_batch(sample_items()).unwrap();

    let response = services
        .search
        .execute(SearchRequest::new("backup", Some(3)))
        .unwrap();
    assert_eq!(response.query, "backup");
    assert_eq!(ids(&response), vec!["db-backup"]);
}

#[test]
fn test_search_reflects_updates_immediately() {
    let (services, _temp) = create_test_services();
    services
        .store
        .store(ItemInput::new("x", "T", "alpha", TagSet::default()))
        .unwrap();
    services
        .store
        .store(ItemInput::new("x", "T", "beta", TagSet::default()))
        .unwrap();

    assert!(services.search.search("alpha", None).unwrap().results.is_empty());
    assert_eq!(ids(&services.search.search("beta", None).unwrap()), vec!["x"]);

    services.store.delete("x").unwrap();
    assert!(services.search.search("beta", None).unwrap().results.is_empty());
}
