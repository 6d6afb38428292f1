// Integration tests for tag and date filters

use crate::common::{create_test_services, sample_items, NoteSet};
use chrono::{Duration, Utc};
use memdex::core::error::MemdexError;
use memdex::core::types::{parse_timestamp, ItemInput, SearchFilters, TagSet};

fn tag_filter(tags: &[&str]) -> SearchFilters {
    SearchFilters {
        tags: TagSet::new(tags),
        ..SearchFilters::default()
    }
}

#[test]
fn test_tag_filter_is_exact_membership() {
    let (services, _temp) = create_test_services();
    services
        .store
        .store(ItemInput::new("a", "A", "shared", TagSet::new(["a"])))
        .unwrap();
    services
        .store
        .store(ItemInput::new("ab", "AB", "shared", TagSet::new(["ab"])))
        .unwrap();

    let hits = services
        .search
        .search_advanced("shared", None, &tag_filter(&["a"]))
        .unwrap();

    assert_eq!(hits.results.len(), 1);
    assert!(hits.results.iter().all(|h| h.item.tags.contains("a")));
}

#[test]
fn test_tag_filter_matches_any_listed_tag() {
    let (services, _temp) = create_test_services();
    services.store.store_batch(sample_items()).unwrap();

    let hits = services
        .search
        .search_advanced("rust OR database", None, &tag_filter(&["async", "database"]))
        .unwrap();

    let mut ids: Vec<&str> = hits.results.iter().map(|h| h.item.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["db-backup", "rust-async"]);
}

#[test]
fn test_limit_applies_after_filtering() {
    let (services, _temp) = create_test_services();
    services.store.store_batch(NoteSet::generate(30)).unwrap();

    let hits = services
        .search
        .search_advanced("common", Some(10), &tag_filter(&["odd"]))
        .unwrap();

    assert_eq!(hits.count, 10);
    assert!(hits.results.iter().all(|h| h.item.tags.contains("odd")));
}

#[test]
fn test_filters_do_not_change_ranking() {
    let (services, _temp) = create_test_services();
    services.store.store_batch(sample_items()).unwrap();

    let plain = services.search.search("rust", None).unwrap();
    let filtered = services
        .search
        .search_advanced("rust", None, &tag_filter(&["rust", "books"]))
        .unwrap();

    let plain_ids: Vec<_> = plain.results.iter().map(|h| (&h.item.id, h.score)).collect();
    let filtered_ids: Vec<_> = filtered.results.iter().map(|h| (&h.item.id, h.score)).collect();
    assert_eq!(plain_ids, filtered_ids);
}

#[test]
fn test_date_range_is_inclusive() {
    let (services, _temp) = create_test_services();
    let item = services
        .store
        .store(ItemInput::new("x", "X", "dated note", TagSet::default()))
        .unwrap();

    let exact = SearchFilters {
        date_from: Some(item.updated_at),
        date_to: Some(item.updated_at),
        ..SearchFilters::default()
    };
    assert_eq!(
        services.search.search_advanced("dated", None, &exact).unwrap().count,
        1
    );

    let later = SearchFilters {
        date_from: Some(item.updated_at + Duration::seconds(1)),
        ..SearchFilters::default()
    };
    assert_eq!(
        services.search.search_advanced("dated", None, &later).unwrap().count,
        0
    );
}

#[test]
fn test_bare_date_bounds_cover_whole_day() {
    let (services, _temp) = create_test_services();
    services
        .store
        .store(ItemInput::new("x", "X", "today note", TagSet::default()))
        .unwrap();
    let today = Utc::now().format("%Y-%m-%d").to_string();

    let filters = SearchFilters {
        date_from: Some(parse_timestamp(&today, false).unwrap()),
        date_to: Some(parse_timestamp(&today, true).unwrap()),
        ..SearchFilters::default()
    };
    assert_eq!(
        services.search.search_advanced("today", None, &filters).unwrap().count,
        1
    );
}

#[test]
fn test_inverted_date_range_is_rejected() {
    let (services, _temp) = create_test_services();
    let now = Utc::now();

    let filters = SearchFilters {
        date_from: Some(now),
        date_to: Some(now - Duration::days(1)),
        ..SearchFilters::default()
    };
    assert!(matches!(
        services.search.search_advanced("x", None, &filters),
        Err(MemdexError::InvalidArgument(_))
    ));
}
