//! List pagination through the MCP tool

use crate::common::{create_test_services, NoteSet};
use memdex::mcp::protocol::ContentBlock;
use memdex::mcp::tools::{ListHandler, McpToolHandler};
use memdex::mcp::ListCursor;
use serde_json::json;

fn next_cursor(text: &str) -> Option<String> {
    text.lines()
        .find_map(|line| line.strip_prefix("next_cursor: "))
        .map(str::to_string)
}

fn page_ids(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| line.strip_prefix("- `"))
        .filter_map(|rest| rest.split('`').next())
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_cursor_walks_every_item_once() {
    let (services, _temp) = create_test_services();
    services.store.store_batch(NoteSet::generate(7)).unwrap();
    let handler = ListHandler::new(services);

    let mut seen = Vec::new();
    let mut args = json!({"limit": 3});
    loop {
        let result = handler.execute(args.clone()).await.unwrap();
        let ContentBlock::Text { text } = &result.content[0];
        seen.extend(page_ids(text));

        match next_cursor(text) {
            Some(cursor) => args = json!({"limit": 3, "cursor": cursor}),
            None => break,
        }
    }

    let expected: Vec<String> = (0..7).map(|i| format!("note-{i:04}")).collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn test_exact_multiple_ends_with_empty_page() {
    let (services, _temp) = create_test_services();
    services.store.store_batch(NoteSet::generate(2)).unwrap();
    let handler = ListHandler::new(services);

    let result = handler.execute(json!({"limit": 2})).await.unwrap();
    let ContentBlock::Text { text } = &result.content[0];
    let cursor = next_cursor(text).expect("full page should carry a cursor");
    assert_eq!(ListCursor::decode(&cursor).unwrap(), ListCursor::new(2));

    let result = handler
        .execute(json!({"limit": 2, "cursor": cursor}))
        .await
        .unwrap();
    let ContentBlock::Text { text } = &result.content[0];
    assert_eq!(text, "No items at offset 2.");
}
