//! Tests for search and search-advanced CLI commands

use crate::common::{create_test_services, sample_items};
use memdex::cli::commands::search::{execute, execute_advanced, SearchAdvancedArgs, SearchArgs};
use memdex::cli::OutputFormat;

fn search_args(query: &str) -> SearchArgs {
    SearchArgs {
        query: query.to_string(),
        limit: None,
        ids_only: false,
    }
}

fn advanced_args(query: &str) -> SearchAdvancedArgs {
    SearchAdvancedArgs {
        query: query.to_string(),
        limit: None,
        tags: vec![],
        from: None,
        to: None,
        ids_only: false,
    }
}

/// Test search in both formats
#[tokio::test]
async fn test_search_formats() {
    let (services, _temp) = create_test_services();
    services.store.store_batch(sample_items()).unwrap();

    for format in [OutputFormat::Human, OutputFormat::Json] {
        let result = execute(search_args("rust"), &services, format).await;
        assert!(result.is_ok(), "Search should succeed: {:?}", result.err());
    }

    let mut ids_only = search_args("rust");
    ids_only.ids_only = true;
    assert!(execute(ids_only, &services, OutputFormat::Human).await.is_ok());
}

/// Test search with no results
#[tokio::test]
async fn test_search_no_results() {
    let (services, _temp) = create_test_services();

    let result = execute(search_args("nothing"), &services, OutputFormat::Human).await;
    assert!(result.is_ok());
}

/// Test query errors propagate
#[tokio::test]
async fn test_search_invalid_query() {
    let (services, _temp) = create_test_services();

    let err = execute(search_args("\"open"), &services, OutputFormat::Human)
        .await
        .unwrap_err();
    assert!(err.to_string().to_lowercase().contains("quote"));
}

/// Test advanced search with tags and dates
#[tokio::test]
async fn test_search_advanced_filters() {
    let (services, _temp) = create_test_services();
    services.store.store_batch(sample_items()).unwrap();

    let mut args = advanced_args("rust");
    args.tags = vec!["books".to_string()];
    args.from = Some("2000-01-01".to_string());
    args.to = Some("2999-12-31".to_string());

    let result = execute_advanced(args, &services, OutputFormat::Json).await;
    assert!(result.is_ok(), "Advanced search should succeed: {:?}", result.err());
}

/// Test a malformed date is rejected
#[tokio::test]
async fn test_search_advanced_bad_date() {
    let (services, _temp) = create_test_services();

    let mut args = advanced_args("rust");
    args.from = Some("01/02/2024".to_string());

    let err = execute_advanced(args, &services, OutputFormat::Human)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Invalid timestamp"));
}
