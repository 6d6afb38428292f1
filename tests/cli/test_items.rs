//! Tests for item CLI commands

use crate::common::{create_test_services, sample_items};
use memdex::cli::commands::item::{
    execute_delete, execute_get_tags, execute_list, execute_retrieve, execute_store,
    execute_store_batch, DeleteArgs, GetTagsArgs, ListArgs, RetrieveArgs, StoreArgs,
    StoreBatchArgs,
};
use memdex::cli::OutputFormat;

fn store_args(id: &str, tags: &[&str]) -> StoreArgs {
    StoreArgs {
        id: id.to_string(),
        title: format!("Title {id}"),
        content: "cli body".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

/// Test storing an item (human format)
#[tokio::test]
async fn test_store_human() {
    let (services, _temp) = create_test_services();

    let result = execute_store(store_args("n1", &["a", "a", " b "]), &services, OutputFormat::Human).await;
    assert!(result.is_ok(), "Store should succeed: {:?}", result.err());

    let item = services.store.retrieve("n1").unwrap().unwrap();
    assert_eq!(item.tags.to_vec(), vec!["a".to_string(), "b".to_string()]);
}

/// Test storing an item (JSON format)
#[tokio::test]
async fn test_store_json() {
    let (services, _temp) = create_test_services();

    let result = execute_store(store_args("n1", &[]), &services, OutputFormat::Json).await;
    assert!(result.is_ok());
}

/// Test an invalid item surfaces as an error
#[tokio::test]
async fn test_store_invalid_title() {
    let (services, _temp) = create_test_services();
    let mut args = store_args("n1", &[]);
    args.title = String::new();

    let err = execute_store(args, &services, OutputFormat::Human)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("title"));
}

/// Test batch import from a file
#[tokio::test]
async fn test_store_batch_from_file() {
    let (services, temp) = create_test_services();
    let path = temp.path().join("batch.json");
    std::fs::write(&path, serde_json::to_string(&sample_items()).unwrap()).unwrap();

    let args = StoreBatchArgs { file: Some(path) };
    let result = execute_store_batch(args, &services, OutputFormat::Json).await;
    assert!(result.is_ok(), "Batch should succeed: {:?}", result.err());
    assert_eq!(services.store.get_stats().unwrap().item_count, 5);
}

/// Test batch with a missing file
#[tokio::test]
async fn test_store_batch_missing_file() {
    let (services, temp) = create_test_services();

    let args = StoreBatchArgs {
        file: Some(temp.path().join("absent.json")),
    };
    let err = execute_store_batch(args, &services, OutputFormat::Human)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Failed to read"));
}

/// Test retrieving existing and missing items
#[tokio::test]
async fn test_retrieve() {
    let (services, _temp) = create_test_services();
    execute_store(store_args("n1", &[]), &services, OutputFormat::Json)
        .await
        .unwrap();

    let found = RetrieveArgs {
        id: "n1".to_string(),
    };
    assert!(execute_retrieve(found, &services, OutputFormat::Human).await.is_ok());

    let missing = RetrieveArgs {
        id: "ghost".to_string(),
    };
    let err = execute_retrieve(missing, &services, OutputFormat::Json)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not found"));
}

/// Test listing with and without items
#[tokio::test]
async fn test_list() {
    let (services, _temp) = create_test_services();

    let args = ListArgs {
        limit: None,
        offset: 0,
    };
    assert!(execute_list(args, &services, OutputFormat::Human).await.is_ok());

    services.store.store_batch(sample_items()).unwrap();
    for format in [OutputFormat::Human, OutputFormat::Json] {
        let args = ListArgs {
            limit: Some(2),
            offset: 1,
        };
        assert!(execute_list(args, &services, format).await.is_ok());
    }
}

/// Test deleting is idempotent
#[tokio::test]
async fn test_delete() {
    let (services, _temp) = create_test_services();
    execute_store(store_args("n1", &[]), &services, OutputFormat::Json)
        .await
        .unwrap();

    for _ in 0..2 {
        let args = DeleteArgs {
            id: "n1".to_string(),
        };
        assert!(execute_delete(args, &services, OutputFormat::Human).await.is_ok());
    }
    assert!(services.store.retrieve("n1").unwrap().is_none());
}

/// Test tag listing
#[tokio::test]
async fn test_get_tags() {
    let (services, _temp) = create_test_services();
    services.store.store_batch(sample_items()).unwrap();

    for format in [OutputFormat::Human, OutputFormat::Json] {
        assert!(execute_get_tags(GetTagsArgs {}, &services, format).await.is_ok());
    }
}
