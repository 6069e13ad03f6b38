//! MCP tool implementations
//!
//! Five generic tools cover every entity. Each tool converts its loose
//! arguments into a typed command, then hands it to a fresh
//! [`Dispatcher`](crate::bridge::Dispatcher).

use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::*,
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

use crate::bridge::{
    ArgBundle, Dispatcher, EntityKind, validate_action, validate_create, validate_delete,
    validate_read, validate_update,
};
use crate::deck::{DeckApi, DeckError, DeckTransport};
use crate::mcp::server::McpServer;

// =============================================================================
// Parameter Structs
// =============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateParams {
    #[schemars(description = "Entity to create: board, stack, card, label, comment, attachment")]
    pub entity: EntityKind,
    #[schemars(description = "Board ID (required for stack and label)")]
    #[serde(default, deserialize_with = "crate::serde_utils::flexible_id")]
    pub board_id: Option<u64>,
    #[schemars(
        description = "Stack ID (required for card). The board is looked up when boardId is omitted."
    )]
    #[serde(default, deserialize_with = "crate::serde_utils::flexible_id")]
    pub stack_id: Option<u64>,
    #[schemars(description = "Card ID (required for comment and attachment)")]
    #[serde(default, deserialize_with = "crate::serde_utils::flexible_id")]
    pub card_id: Option<u64>,
    #[schemars(
        description = "Entity fields. board: title, color. stack: title, order. card: title, type, order, description, duedate. label: title, color. comment: message, parentId. attachment: data, type."
    )]
    pub data: Option<Map<String, Value>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadParams {
    #[schemars(
        description = "Entity to read. Singular (board, stack, card, label, comment, attachment) needs an id; plural (boards, stacks, cards, labels, comments, attachments) lists."
    )]
    pub entity: EntityKind,
    #[schemars(description = "ID of a singular entity")]
    #[serde(default, deserialize_with = "crate::serde_utils::flexible_id")]
    pub id: Option<u64>,
    #[schemars(description = "Board ID (stack, stacks, label, labels; cards across a whole board)")]
    #[serde(default, deserialize_with = "crate::serde_utils::flexible_id")]
    pub board_id: Option<u64>,
    #[schemars(description = "Stack ID (cards of one stack)")]
    #[serde(default, deserialize_with = "crate::serde_utils::flexible_id")]
    pub stack_id: Option<u64>,
    #[schemars(description = "Card ID (comment(s), attachment(s))")]
    #[serde(default, deserialize_with = "crate::serde_utils::flexible_id")]
    pub card_id: Option<u64>,
    #[schemars(
        description = "Card list filters: search (case-insensitive, title or description), archived (bool), done (bool). Omitted filters are not applied."
    )]
    pub params: Option<Map<String, Value>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParams {
    #[schemars(description = "Entity to update: board, stack, card, label, comment, attachment")]
    pub entity: EntityKind,
    #[schemars(description = "ID of the entity to update")]
    #[serde(default, deserialize_with = "crate::serde_utils::flexible_id")]
    pub id: Option<u64>,
    #[schemars(
        description = "Board ID (required for stack and label; optional for card, looked up when omitted)"
    )]
    #[serde(default, deserialize_with = "crate::serde_utils::flexible_id")]
    pub board_id: Option<u64>,
    #[schemars(description = "Stack ID (optional for card, looked up when omitted)")]
    #[serde(default, deserialize_with = "crate::serde_utils::flexible_id")]
    pub stack_id: Option<u64>,
    #[schemars(description = "Card ID (required for comment and attachment)")]
    #[serde(default, deserialize_with = "crate::serde_utils::flexible_id")]
    pub card_id: Option<u64>,
    #[schemars(description = "Fields to change. Comments take a message.")]
    pub data: Option<Map<String, Value>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteParams {
    #[schemars(description = "Entity to delete: board, stack, card, label, comment, attachment")]
    pub entity: EntityKind,
    #[schemars(description = "ID of the entity to delete")]
    #[serde(default, deserialize_with = "crate::serde_utils::flexible_id")]
    pub id: Option<u64>,
    #[schemars(
        description = "Board ID (required for stack and label; optional for card, looked up when omitted)"
    )]
    #[serde(default, deserialize_with = "crate::serde_utils::flexible_id")]
    pub board_id: Option<u64>,
    #[schemars(description = "Stack ID (optional for card, looked up when omitted)")]
    #[serde(default, deserialize_with = "crate::serde_utils::flexible_id")]
    pub stack_id: Option<u64>,
    #[schemars(description = "Card ID (required for comment and attachment)")]
    #[serde(default, deserialize_with = "crate::serde_utils::flexible_id")]
    pub card_id: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionParams {
    #[schemars(description = "Entity to act on. Only card supports actions.")]
    pub entity: EntityKind,
    #[schemars(
        description = "Action: move, reorder, assign, unassign, add_label, remove_label, archive, unarchive, mark_done, mark_undone"
    )]
    pub action: String,
    #[schemars(description = "Card ID")]
    #[serde(default, deserialize_with = "crate::serde_utils::flexible_id")]
    pub id: Option<u64>,
    #[schemars(description = "Current board of the card (looked up when omitted)")]
    #[serde(default, deserialize_with = "crate::serde_utils::flexible_id")]
    pub board_id: Option<u64>,
    #[schemars(description = "Current stack of the card (looked up when omitted)")]
    #[serde(default, deserialize_with = "crate::serde_utils::flexible_id")]
    pub stack_id: Option<u64>,
    #[schemars(
        description = "Action arguments. move/reorder: targetStackId (or stackId), order (default: last). A stackId here is the target, never the current stack. assign/unassign: userId. add_label/remove_label: labelId."
    )]
    pub data: Option<Map<String, Value>>,
}

// =============================================================================
// Helpers
// =============================================================================

/// Map a bridge error onto an MCP error, keeping the message intact.
pub fn map_deck_error(e: DeckError) -> McpError {
    let message = e.to_string();
    let data = Some(serde_json::json!({ "error": message }));
    match e {
        DeckError::MissingParameter { .. } | DeckError::UnsupportedAction { .. } => {
            McpError::invalid_params(message, data)
        }
        DeckError::NotFound { .. } => McpError::resource_not_found(message, data),
        DeckError::Remote { .. }
        | DeckError::Transport { .. }
        | DeckError::InvalidResponse { .. } => McpError::internal_error(message, data),
    }
}

fn json_result(value: &Value) -> Result<CallToolResult, McpError> {
    let content = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(
            "serialization_error",
            Some(serde_json::json!({"error": e.to_string()})),
        )
    })?;

    Ok(CallToolResult::success(vec![Content::text(content)]))
}

// =============================================================================
// Tools
// =============================================================================

#[tool_router]
impl<T: DeckTransport + 'static> McpServer<T> {
    /// Create a new MCP server around a shared Deck API client
    pub fn new(api: Arc<DeckApi<T>>) -> Self {
        Self {
            api,
            tool_router: Self::tool_router(),
        }
    }

    fn dispatcher(&self) -> Dispatcher<'_, T> {
        Dispatcher::new(&self.api)
    }

    #[tool(
        description = "Create a board, stack, card, label, comment or attachment. Cards need stackId and data.title; the owning board is looked up when boardId is omitted."
    )]
    pub async fn create(&self, params: Parameters<CreateParams>) -> Result<CallToolResult, McpError> {
        let p = params.0;
        debug!(entity = %p.entity, "create");
        let args = ArgBundle::new(None, p.board_id, p.stack_id, p.card_id, p.data);
        let command = validate_create(p.entity, args).map_err(map_deck_error)?;
        let created = self
            .dispatcher()
            .create(command)
            .await
            .map_err(map_deck_error)?;
        json_result(&created)
    }

    #[tool(
        description = "Read one entity by id or list entities. 'cards' lists one stack (stackId) or a whole board (boardId) and accepts search/archived/done filters in params."
    )]
    pub async fn read(&self, params: Parameters<ReadParams>) -> Result<CallToolResult, McpError> {
        let p = params.0;
        debug!(entity = %p.entity, "read");
        let args = ArgBundle::new(p.id, p.board_id, p.stack_id, p.card_id, p.params);
        let command = validate_read(p.entity, args).map_err(map_deck_error)?;
        let found = self
            .dispatcher()
            .read(command)
            .await
            .map_err(map_deck_error)?;
        json_result(&found)
    }

    #[tool(
        description = "Update an entity. Stacks and labels need boardId; cards find their board and stack automatically; comments and attachments need cardId."
    )]
    pub async fn update(&self, params: Parameters<UpdateParams>) -> Result<CallToolResult, McpError> {
        let p = params.0;
        debug!(entity = %p.entity, "update");
        let args = ArgBundle::new(p.id, p.board_id, p.stack_id, p.card_id, p.data);
        let command = validate_update(p.entity, args).map_err(map_deck_error)?;
        let updated = self
            .dispatcher()
            .update(command)
            .await
            .map_err(map_deck_error)?;
        json_result(&updated)
    }

    #[tool(
        description = "Delete an entity permanently. Stacks and labels need boardId; cards find their board and stack automatically; comments and attachments need cardId."
    )]
    pub async fn delete(&self, params: Parameters<DeleteParams>) -> Result<CallToolResult, McpError> {
        let p = params.0;
        debug!(entity = %p.entity, "delete");
        let args = ArgBundle::new(p.id, p.board_id, p.stack_id, p.card_id, None);
        let command = validate_delete(p.entity, args).map_err(map_deck_error)?;
        let ack = self
            .dispatcher()
            .delete(command)
            .await
            .map_err(map_deck_error)?;
        json_result(&ack)
    }

    #[tool(
        description = "Apply a card action: move/reorder (targetStackId, order), assign/unassign (userId), add_label/remove_label (labelId), archive, unarchive, mark_done, mark_undone."
    )]
    pub async fn action(&self, params: Parameters<ActionParams>) -> Result<CallToolResult, McpError> {
        let p = params.0;
        debug!(entity = %p.entity, action = %p.action, "action");
        let args = ArgBundle::for_action(p.id, p.board_id, p.stack_id, p.data);
        let command = validate_action(p.entity, &p.action, args).map_err(map_deck_error)?;
        let result = self
            .dispatcher()
            .action(command)
            .await
            .map_err(map_deck_error)?;
        json_result(&result)
    }
}
