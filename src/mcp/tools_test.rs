//! Tests for the generic Deck MCP tools

use std::sync::Arc;

use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, ErrorCode, RawContent},
};
use serde_json::{Map, Value, json};

use crate::bridge::EntityKind;
use crate::deck::testing::Script;
use crate::deck::{DeckError, MockDeckTransport, Namespace, RemoteRequest};
use crate::mcp::server::McpServer;
use crate::mcp::tools::*;

fn server(script: Script) -> McpServer<MockDeckTransport> {
    McpServer::new(Arc::new(script.api()))
}

/// Server whose transport rejects every call.
fn offline() -> McpServer<MockDeckTransport> {
    server(Script::new())
}

fn hierarchy() -> Vec<(u64, Vec<(u64, Vec<u64>)>)> {
    vec![
        (1, vec![(11, vec![100])]),
        (2, vec![(21, vec![200]), (22, vec![300])]),
    ]
}

fn data(value: Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

fn content(result: &CallToolResult) -> Value {
    assert!(result.is_error.is_none() || result.is_error == Some(false));
    let text = match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("Expected text content"),
    };
    serde_json::from_str(text).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_board_returns_remote_entity() {
    let server = server(Script::new().then(
        RemoteRequest::post(
            Namespace::Rest,
            "/boards",
            json!({"title": "Roadmap", "color": "0082c9"}),
        ),
        json!({"id": 1, "title": "Roadmap", "color": "0082c9", "archived": false}),
    ));
    let result = server
        .create(Parameters(CreateParams {
            entity: EntityKind::Board,
            board_id: None,
            stack_id: None,
            card_id: None,
            data: data(json!({"title": "Roadmap"})),
        }))
        .await
        .unwrap();

    assert_eq!(
        content(&result),
        json!({"id": 1, "title": "Roadmap", "color": "0082c9", "archived": false})
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_card_takes_ids_from_data() {
    // Ancestor ids never leak into the outgoing body
    let server = server(Script::new().walk(&hierarchy(), 2).then(
        RemoteRequest::post(
            Namespace::Rest,
            "/boards/2/stacks/21/cards",
            json!({"title": "From data", "type": "plain", "order": 999}),
        ),
        json!({"id": 201, "title": "From data"}),
    ));
    server
        .create(Parameters(CreateParams {
            entity: EntityKind::Card,
            board_id: None,
            stack_id: None,
            card_id: None,
            data: data(json!({"title": "From data", "stackId": "21"})),
        }))
        .await
        .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_read_cards_with_filters() {
    let server = server(Script::new().then(
        RemoteRequest::get(Namespace::Rest, "/boards/3/stacks"),
        json!([
            {"id": 1, "cards": [{"id": 10, "title": "Write docs", "duedate": null}, {"id": 11, "title": "Ship"}]},
            {"id": 2, "cards": [{"id": 12, "title": "Review docs", "archived": true}]}
        ]),
    ));

    let result = server
        .read(Parameters(ReadParams {
            entity: EntityKind::Cards,
            id: None,
            board_id: Some(3),
            stack_id: None,
            card_id: None,
            params: data(json!({"search": "DOCS", "archived": false})),
        }))
        .await
        .unwrap();

    // The remote card is returned as-is, nulls included
    let cards = content(&result);
    assert_eq!(cards, json!([{"id": 10, "title": "Write docs", "duedate": null}]));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_card_resolves_location() {
    let server = server(Script::new().walk(&hierarchy(), 2).then(
        RemoteRequest::put(
            Namespace::Rest,
            "/boards/2/stacks/21/cards/200",
            json!({"title": "Renamed"}),
        ),
        json!({"id": 200, "title": "Renamed"}),
    ));
    let result = server
        .update(Parameters(UpdateParams {
            entity: EntityKind::Card,
            id: Some(200),
            board_id: None,
            stack_id: None,
            card_id: None,
            data: data(json!({"title": "Renamed"})),
        }))
        .await
        .unwrap();

    assert_eq!(content(&result)["title"], "Renamed");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_returns_acknowledgement() {
    let server = server(Script::new().then(
        RemoteRequest::delete(Namespace::Rest, "/boards/8"),
        json!({"id": 8, "deletedAt": 1700000000}),
    ));
    let result = server
        .delete(Parameters(DeleteParams {
            entity: EntityKind::Board,
            id: Some(8),
            board_id: None,
            stack_id: None,
            card_id: None,
        }))
        .await
        .unwrap();

    assert_eq!(
        content(&result),
        json!({"success": true, "message": "Board 8 deleted successfully"})
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_action_mark_done() {
    let server = server(Script::new().walk(&hierarchy(), 1).then(
        RemoteRequest::put(
            Namespace::Rest,
            "/boards/1/stacks/11/cards/100",
            json!({"done": true}),
        ),
        json!({"id": 100, "done": "2025-01-01T00:00:00+00:00"}),
    ));
    server
        .action(Parameters(ActionParams {
            entity: EntityKind::Card,
            action: "mark_done".to_string(),
            id: Some(100),
            board_id: None,
            stack_id: None,
            data: None,
        }))
        .await
        .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_move_treats_stack_id_in_data_as_target() {
    // The card's own stack is resolved; data.stackId is where it goes
    let server = server(Script::new().walk(&hierarchy(), 2).then(
        RemoteRequest::put(
            Namespace::Rest,
            "/boards/2/stacks/22/cards/300/reorder",
            json!({"stackId": 21, "order": 999}),
        ),
        json!([{"id": 300, "stackId": 21}]),
    ));
    server
        .action(Parameters(ActionParams {
            entity: EntityKind::Card,
            action: "move".to_string(),
            id: Some(300),
            board_id: None,
            stack_id: None,
            data: data(json!({"stackId": 21})),
        }))
        .await
        .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_parameter_is_invalid_params() {
    let server = offline();
    let err = server
        .delete(Parameters(DeleteParams {
            entity: EntityKind::Stack,
            id: Some(5),
            board_id: None,
            stack_id: None,
            card_id: None,
        }))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(err.message, "Board ID is required");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unsupported_action_is_invalid_params() {
    let server = offline();
    let err = server
        .action(Parameters(ActionParams {
            entity: EntityKind::Board,
            action: "archive".to_string(),
            id: Some(1),
            board_id: None,
            stack_id: None,
            data: None,
        }))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(err.message, "Unsupported action 'archive' for entity 'board'");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unresolvable_card_is_not_found() {
    // Only the lookup is scripted; a delete call would fail the test
    let server = server(Script::new().walk(&hierarchy(), 2));
    let err = server
        .delete(Parameters(DeleteParams {
            entity: EntityKind::Card,
            id: Some(999),
            board_id: None,
            stack_id: None,
            card_id: None,
        }))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);
    assert_eq!(err.message, "Card 999 not found");
}

#[test]
fn test_remote_error_maps_to_internal_error_with_status() {
    let err = map_deck_error(DeckError::Remote {
        status: 403,
        body: "Permission denied".to_string(),
    });

    assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    assert_eq!(err.message, "Remote API error (403): Permission denied");
    assert_eq!(
        err.data,
        Some(json!({"error": "Remote API error (403): Permission denied"}))
    );
}

#[test]
fn test_params_accept_string_ids() {
    let params: UpdateParams = serde_json::from_value(json!({
        "entity": "card",
        "id": "300",
        "boardId": 2,
        "data": {"title": "x"}
    }))
    .unwrap();

    assert_eq!(params.entity, EntityKind::Card);
    assert_eq!(params.id, Some(300));
    assert_eq!(params.board_id, Some(2));
    assert_eq!(params.stack_id, None);
}

#[test]
fn test_params_reject_non_numeric_ids() {
    let result: Result<DeleteParams, _> = serde_json::from_value(json!({
        "entity": "board",
        "id": "abc"
    }));

    assert!(result.is_err());
}
