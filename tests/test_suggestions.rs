use std::sync::Arc;
use std::time::Duration;

use mockito::Matcher;
use serde_json::json;
use tokio::sync::mpsc::UnboundedReceiver;

use recipe_browser::controllers::{DropdownEvent, SearchMode, SuggestController};
use recipe_browser::sources::ApiClient;
use recipe_browser::BrowseConfig;

fn client_for(server: &mockito::ServerGuard) -> Arc<ApiClient> {
    let config = BrowseConfig {
        api_url: server.url(),
        ..BrowseConfig::default()
    };
    Arc::new(ApiClient::new(&config).unwrap())
}

async fn next_event(receiver: &mut UnboundedReceiver<DropdownEvent>) -> DropdownEvent {
    tokio::time::timeout(Duration::from_secs(2), receiver.recv())
        .await
        .expect("timed out waiting for dropdown event")
        .expect("event channel closed")
}

#[tokio::test]
async fn test_rapid_keystrokes_coalesce_into_one_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/search")
        .match_body(Matcher::PartialJson(json!({
            "query": "green curry",
            "top_k": 10
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id": "3", "title": "Thai Green Curry", "category": "Chicken",
                "area": "Thai", "image": null, "score": 0.95}]"#,
        )
        .expect(1)
        .create_async()
        .await;

    let (mut controller, mut events) = SuggestController::new(client_for(&server));
    controller.on_input("gre");
    controller.on_input("green cu");
    controller.on_input("green curry");

    assert!(matches!(next_event(&mut events).await, DropdownEvent::Loading));
    match next_event(&mut events).await {
        DropdownEvent::Results { query, hits } => {
            assert_eq!(query, "green curry");
            assert_eq!(hits.len(), 1);
            assert_eq!(hits[0].title, "Thai Green Curry");
        }
        other => panic!("expected results, got {other:?}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_short_query_dismisses_without_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/search")
        .expect(0)
        .create_async()
        .await;

    let (mut controller, mut events) = SuggestController::new(client_for(&server));
    controller.on_input("t");

    assert!(matches!(next_event(&mut events).await, DropdownEvent::Hidden));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_ingredient_mode_with_only_commas_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/search")
        .expect(0)
        .create_async()
        .await;

    let (mut controller, mut events) = SuggestController::new(client_for(&server));
    controller.set_mode(SearchMode::Ingredients);
    assert!(matches!(next_event(&mut events).await, DropdownEvent::Hidden));

    controller.on_input(", ,");
    assert!(matches!(next_event(&mut events).await, DropdownEvent::Loading));
    assert!(matches!(next_event(&mut events).await, DropdownEvent::Hidden));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_committed_search_supersedes_pending_suggestion() {
    let mut server = mockito::Server::new_async().await;
    let live = server
        .mock("POST", "/search")
        .match_body(Matcher::PartialJson(json!({"top_k": 10})))
        .expect(0)
        .create_async()
        .await;
    server
        .mock("POST", "/search")
        .match_body(Matcher::PartialJson(json!({
            "query": "noodle soup",
            "top_k": 50
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id": "8", "title": "Beef Noodle Soup", "category": "Beef",
                "area": "Vietnamese", "image": null, "score": 0.9}]"#,
        )
        .create_async()
        .await;

    let (mut controller, mut events) = SuggestController::new(client_for(&server));
    // A keystroke starts the debounce timer, then an explicit search lands
    // before it fires. The pending suggestion must never reach the wire.
    controller.on_input("noodle");
    controller.commit_search("noodle soup").await;

    assert!(matches!(next_event(&mut events).await, DropdownEvent::Loading));
    match next_event(&mut events).await {
        DropdownEvent::Results { query, hits } => {
            assert_eq!(query, "noodle soup");
            assert_eq!(hits[0].title, "Beef Noodle Soup");
        }
        other => panic!("expected results, got {other:?}"),
    }

    // Give the aborted timer a chance to misfire before checking
    tokio::time::sleep(Duration::from_millis(400)).await;
    live.assert_async().await;
}

#[tokio::test]
async fn test_committed_search_with_no_matches_reports_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/search")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let (mut controller, mut events) = SuggestController::new(client_for(&server));
    controller.commit_search("unicorn stew").await;

    assert!(matches!(next_event(&mut events).await, DropdownEvent::Loading));
    match next_event(&mut events).await {
        DropdownEvent::NoResults { message } => {
            assert_eq!(message, "No recipes found for \"unicorn stew\"");
        }
        other => panic!("expected no-results, got {other:?}"),
    }
}

#[tokio::test]
async fn test_committed_ingredient_search_requires_a_term() {
    let server = mockito::Server::new_async().await;

    let (mut controller, mut events) = SuggestController::new(client_for(&server));
    controller.set_mode(SearchMode::Ingredients);
    assert!(matches!(next_event(&mut events).await, DropdownEvent::Hidden));

    controller.commit_search(",,,").await;

    assert!(matches!(next_event(&mut events).await, DropdownEvent::Loading));
    match next_event(&mut events).await {
        DropdownEvent::NoResults { message } => {
            assert_eq!(message, "Please enter at least one ingredient");
        }
        other => panic!("expected no-results, got {other:?}"),
    }
}

#[tokio::test]
async fn test_search_error_reports_retry_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/search")
        .with_status(500)
        .create_async()
        .await;

    let (mut controller, mut events) = SuggestController::new(client_for(&server));
    controller.commit_search("tofu").await;

    assert!(matches!(next_event(&mut events).await, DropdownEvent::Loading));
    match next_event(&mut events).await {
        DropdownEvent::NoResults { message } => {
            assert_eq!(message, "Search error. Please try again.");
        }
        other => panic!("expected no-results, got {other:?}"),
    }
}
