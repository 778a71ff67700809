//! Integration tests for the Notion HTTP client against a mock server

use mockito::{Matcher, Server};
use n2md::adapters::notion::{NotionClient, PageSource};
use n2md::config::{secret_string, NotionConfig, RetryConfig};
use n2md::domain::{BlockContent, DatabaseId, N2mdError, NotionError, PageId, PropertyValue};
use serde_json::json;

const TOKEN: &str = "secret_mock_token";

fn client_for(server: &Server, max_retries: usize) -> NotionClient {
    let config = NotionConfig {
        api_key: Some(secret_string(TOKEN.to_string())),
        database_id: "db".to_string(),
        base_url: server.url(),
        timeout_seconds: 5,
        retry: RetryConfig {
            max_retries,
            initial_delay_ms: 1,
            max_delay_ms: 5,
            backoff_multiplier: 2.0,
        },
        ..NotionConfig::default()
    };
    NotionClient::new(config).unwrap()
}

fn page_json(id: &str, title: &str) -> serde_json::Value {
    json!({
        "object": "page",
        "id": id,
        "url": format!("https://www.notion.so/{id}"),
        "properties": {
            "title": {
                "id": "title",
                "type": "title",
                "title": [{ "type": "text", "plain_text": title }]
            },
            "Tags": {
                "id": "tg",
                "type": "multi_select",
                "multi_select": [{ "name": "rust", "color": "red" }]
            }
        }
    })
}

fn block_json(id: &str, kind: &str, has_children: bool, payload: serde_json::Value) -> serde_json::Value {
    json!({
        "object": "block",
        "id": id,
        "type": kind,
        "has_children": has_children,
        kind: payload
    })
}

fn text(content: &str) -> serde_json::Value {
    json!({ "rich_text": [{ "type": "text", "plain_text": content }] })
}

#[tokio::test]
async fn test_query_database_follows_cursor() {
    let mut server = Server::new_async().await;

    let first = server
        .mock("POST", "/v1/databases/db/query")
        .match_header("authorization", format!("Bearer {TOKEN}").as_str())
        .match_header("notion-version", "2022-06-28")
        .match_body(Matcher::Json(json!({ "page_size": 100 })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "object": "list",
                "results": [page_json("p1", "First")],
                "has_more": true,
                "next_cursor": "cursor-2"
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let second = server
        .mock("POST", "/v1/databases/db/query")
        .match_body(Matcher::PartialJson(json!({ "start_cursor": "cursor-2" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "object": "list",
                "results": [page_json("p2", "Second")],
                "has_more": false,
                "next_cursor": null
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server, 0);
    let pages = client
        .query_database(&DatabaseId::new("db").unwrap())
        .await
        .unwrap();

    first.assert_async().await;
    second.assert_async().await;

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].id.as_str(), "p1");
    assert_eq!(pages[1].title("title"), Some("Second"));
    assert_eq!(
        pages[0].property_names().collect::<Vec<_>>(),
        vec!["title", "Tags"]
    );
    assert!(matches!(
        pages[0].property("Tags"),
        Some(PropertyValue::MultiSelect(options)) if options[0].name == "rust"
    ));
}

#[tokio::test]
async fn test_fetch_blocks_descends_into_children() {
    let mut server = Server::new_async().await;

    let page_children = server
        .mock("GET", "/v1/blocks/p1/children")
        .match_query(Matcher::Exact("page_size=100".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "results": [
                    block_json("b1", "paragraph", false, text("Intro")),
                    block_json("t1", "toggle", true, text("Details")),
                ],
                "has_more": true,
                "next_cursor": "c2"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let page_children_next = server
        .mock("GET", "/v1/blocks/p1/children")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page_size".to_string(), "100".to_string()),
            Matcher::UrlEncoded("start_cursor".to_string(), "c2".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "results": [
                    block_json("c1", "child_page", true, json!({ "title": "Sub Page" })),
                    block_json("x1", "synced_block", false, json!({})),
                ],
                "has_more": false,
                "next_cursor": null
            })
            .to_string(),
        )
        .create_async()
        .await;

    let toggle_children = server
        .mock("GET", "/v1/blocks/t1/children")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "results": [block_json("n1", "paragraph", false, text("Hidden"))],
                "has_more": false,
                "next_cursor": null
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let child_page_children = server
        .mock("GET", "/v1/blocks/c1/children")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server, 0);
    let blocks = client
        .fetch_blocks(&PageId::new("p1").unwrap())
        .await
        .unwrap();

    page_children.assert_async().await;
    page_children_next.assert_async().await;
    toggle_children.assert_async().await;
    child_page_children.assert_async().await;

    let kinds: Vec<&str> = blocks.iter().map(|b| b.kind()).collect();
    assert_eq!(kinds, vec!["paragraph", "toggle", "child_page", "synced_block"]);
    assert_eq!(blocks[1].children.len(), 1);
    assert!(blocks[2].children.is_empty());
    assert_eq!(blocks[2].content, BlockContent::ChildPage("Sub Page".to_string()));
}

#[tokio::test]
async fn test_authentication_failure_is_not_retried() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/v1/databases/db/query")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"object":"error","status":401,"code":"unauthorized","message":"API token is invalid."}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server, 3);
    let err = client
        .query_database(&DatabaseId::new("db").unwrap())
        .await
        .unwrap_err();

    mock.assert_async().await;
    match err {
        N2mdError::Notion(NotionError::AuthenticationFailed(message)) => {
            assert_eq!(message, "API token is invalid. (unauthorized)");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_errors_are_retried() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/v1/databases/db/query")
        .with_status(503)
        .with_body("upstream unavailable")
        .expect(3)
        .create_async()
        .await;

    let client = client_for(&server, 2);
    let err = client
        .query_database(&DatabaseId::new("db").unwrap())
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(matches!(
        err,
        N2mdError::Notion(NotionError::ServerError { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_retrieve_database_lists_columns() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/v1/databases/db")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "object": "database",
                "id": "db",
                "title": [{ "type": "text", "plain_text": "Blog" }],
                "properties": {
                    "title": { "id": "title", "type": "title", "title": {} },
                    "Frozen": { "id": "fz", "type": "checkbox", "checkbox": {} }
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server, 0);
    let database = client
        .retrieve_database(&DatabaseId::new("db").unwrap())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(database.title_text(), "Blog");
    assert_eq!(
        database.columns(),
        vec![
            ("title".to_string(), "title".to_string()),
            ("Frozen".to_string(), "checkbox".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_missing_database() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/v1/databases/db")
        .with_status(404)
        .with_body(r#"{"object":"error","status":404,"code":"object_not_found","message":"Could not find database"}"#)
        .create_async()
        .await;

    let client = client_for(&server, 2);
    let err = client
        .retrieve_database(&DatabaseId::new("db").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, N2mdError::Notion(NotionError::NotFound(_))));
}
