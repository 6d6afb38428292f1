//! Tests for get-stats and optimize CLI commands

use crate::common::{create_test_services, NoteSet};
use memdex::cli::commands::maintenance::{
    execute_optimize, execute_stats, GetStatsArgs, OptimizeArgs,
};
use memdex::cli::OutputFormat;

/// Test stats on an empty and a populated store
#[tokio::test]
async fn test_get_stats() {
    let (services, _temp) = create_test_services();
    assert!(execute_stats(GetStatsArgs {}, &services, OutputFormat::Human)
        .await
        .is_ok());

    services.store.store_batch(NoteSet::generate(3)).unwrap();
    assert!(execute_stats(GetStatsArgs {}, &services, OutputFormat::Json)
        .await
        .is_ok());
}

/// Test optimize keeps every item
#[tokio::test]
async fn test_optimize() {
    let (services, _temp) = create_test_services();
    for item in NoteSet::generate(4) {
        services.store.store(item).unwrap();
    }

    for format in [OutputFormat::Human, OutputFormat::Json] {
        let result = execute_optimize(OptimizeArgs {}, &services, format).await;
        assert!(result.is_ok(), "Optimize should succeed: {:?}", result.err());
    }
    assert_eq!(services.store.get_stats().unwrap().item_count, 4);
}
