//! Typed client for the Deck endpoints the bridge uses.
//!
//! Each method issues exactly one remote call through the underlying
//! [`DeckTransport`] and decodes the result into a model.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::DeckResult;
use super::models::*;
use super::transport::{DeckTransport, Namespace, RemoteRequest};

fn board_path(board_id: u64) -> String {
    format!("/boards/{board_id}")
}

fn stack_path(board_id: u64, stack_id: u64) -> String {
    format!("/boards/{board_id}/stacks/{stack_id}")
}

fn card_path(board_id: u64, stack_id: u64, card_id: u64) -> String {
    format!("/boards/{board_id}/stacks/{stack_id}/cards/{card_id}")
}

fn label_path(board_id: u64, label_id: u64) -> String {
    format!("/boards/{board_id}/labels/{label_id}")
}

/// Owning board and stack of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLocation {
    pub board_id: u64,
    pub stack_id: u64,
}

/// Deck API client, generic over the transport.
pub struct DeckApi<T: DeckTransport> {
    transport: T,
}

impl<T: DeckTransport> DeckApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    async fn call<R: DeserializeOwned>(&self, request: RemoteRequest) -> DeckResult<R> {
        let value = self.transport.send(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn call_unit(&self, request: RemoteRequest) -> DeckResult<()> {
        self.transport.send(request).await.map(|_| ())
    }

    fn body<B: Serialize>(body: &B) -> DeckResult<Value> {
        Ok(serde_json::to_value(body)?)
    }

    // -------------------------------------------------------------------------
    // Boards
    // -------------------------------------------------------------------------

    pub async fn list_boards(&self) -> DeckResult<Vec<Board>> {
        self.call(RemoteRequest::get(Namespace::Rest, "/boards"))
            .await
    }

    pub async fn get_board(&self, board_id: u64) -> DeckResult<Board> {
        self.call(RemoteRequest::get(Namespace::Rest, board_path(board_id)))
            .await
    }

    pub async fn create_board(&self, board: &NewBoard) -> DeckResult<Board> {
        self.call(RemoteRequest::post(
            Namespace::Rest,
            "/boards",
            Self::body(board)?,
        ))
        .await
    }

    pub async fn update_board(&self, board_id: u64, fields: Map<String, Value>) -> DeckResult<Board> {
        self.call(RemoteRequest::put(
            Namespace::Rest,
            board_path(board_id),
            Value::Object(fields),
        ))
        .await
    }

    pub async fn delete_board(&self, board_id: u64) -> DeckResult<()> {
        self.call_unit(RemoteRequest::delete(Namespace::Rest, board_path(board_id)))
            .await
    }

    // -------------------------------------------------------------------------
    // Stacks
    // -------------------------------------------------------------------------

    pub async fn list_stacks(&self, board_id: u64) -> DeckResult<Vec<Stack>> {
        self.call(RemoteRequest::get(
            Namespace::Rest,
            format!("{}/stacks", board_path(board_id)),
        ))
        .await
    }

    pub async fn get_stack(&self, board_id: u64, stack_id: u64) -> DeckResult<Stack> {
        self.call(RemoteRequest::get(
            Namespace::Rest,
            stack_path(board_id, stack_id),
        ))
        .await
    }

    pub async fn create_stack(&self, board_id: u64, stack: &NewStack) -> DeckResult<Stack> {
        self.call(RemoteRequest::post(
            Namespace::Rest,
            format!("{}/stacks", board_path(board_id)),
            Self::body(stack)?,
        ))
        .await
    }

    pub async fn update_stack(
        &self,
        board_id: u64,
        stack_id: u64,
        fields: Map<String, Value>,
    ) -> DeckResult<Stack> {
        self.call(RemoteRequest::put(
            Namespace::Rest,
            stack_path(board_id, stack_id),
            Value::Object(fields),
        ))
        .await
    }

    pub async fn delete_stack(&self, board_id: u64, stack_id: u64) -> DeckResult<()> {
        self.call_unit(RemoteRequest::delete(
            Namespace::Rest,
            stack_path(board_id, stack_id),
        ))
        .await
    }

    // -------------------------------------------------------------------------
    // Cards
    // -------------------------------------------------------------------------

    pub async fn get_card(&self, at: CardLocation, card_id: u64) -> DeckResult<Card> {
        self.call(RemoteRequest::get(
            Namespace::Rest,
            card_path(at.board_id, at.stack_id, card_id),
        ))
        .await
    }

    pub async fn create_card(
        &self,
        board_id: u64,
        stack_id: u64,
        card: &NewCard,
    ) -> DeckResult<Card> {
        self.call(RemoteRequest::post(
            Namespace::Rest,
            format!("{}/cards", stack_path(board_id, stack_id)),
            Self::body(card)?,
        ))
        .await
    }

    pub async fn update_card(
        &self,
        at: CardLocation,
        card_id: u64,
        fields: Map<String, Value>,
    ) -> DeckResult<Card> {
        self.call(RemoteRequest::put(
            Namespace::Rest,
            card_path(at.board_id, at.stack_id, card_id),
            Value::Object(fields),
        ))
        .await
    }

    pub async fn delete_card(&self, at: CardLocation, card_id: u64) -> DeckResult<()> {
        self.call_unit(RemoteRequest::delete(
            Namespace::Rest,
            card_path(at.board_id, at.stack_id, card_id),
        ))
        .await
    }

    /// Move a card within or across stacks.
    pub async fn reorder_card(
        &self,
        at: CardLocation,
        card_id: u64,
        reorder: &Reorder,
    ) -> DeckResult<Value> {
        self.card_endpoint(at, card_id, "reorder", Self::body(reorder)?)
            .await
    }

    pub async fn assign_user(&self, at: CardLocation, card_id: u64, user_id: &str) -> DeckResult<Value> {
        self.card_endpoint(at, card_id, "assignUser", serde_json::json!({ "userId": user_id }))
            .await
    }

    pub async fn unassign_user(&self, at: CardLocation, card_id: u64, user_id: &str) -> DeckResult<Value> {
        self.card_endpoint(at, card_id, "unassignUser", serde_json::json!({ "userId": user_id }))
            .await
    }

    pub async fn assign_label(&self, at: CardLocation, card_id: u64, label_id: u64) -> DeckResult<Value> {
        self.card_endpoint(at, card_id, "assignLabel", serde_json::json!({ "labelId": label_id }))
            .await
    }

    pub async fn remove_label(&self, at: CardLocation, card_id: u64, label_id: u64) -> DeckResult<Value> {
        self.card_endpoint(at, card_id, "removeLabel", serde_json::json!({ "labelId": label_id }))
            .await
    }

    async fn card_endpoint(
        &self,
        at: CardLocation,
        card_id: u64,
        endpoint: &str,
        body: Value,
    ) -> DeckResult<Value> {
        self.transport
            .send(RemoteRequest::put(
                Namespace::Rest,
                format!("{}/{endpoint}", card_path(at.board_id, at.stack_id, card_id)),
                body,
            ))
            .await
    }

    // -------------------------------------------------------------------------
    // Labels
    // -------------------------------------------------------------------------

    pub async fn get_label(&self, board_id: u64, label_id: u64) -> DeckResult<Label> {
        self.call(RemoteRequest::get(
            Namespace::Rest,
            label_path(board_id, label_id),
        ))
        .await
    }

    pub async fn create_label(&self, board_id: u64, label: &NewLabel) -> DeckResult<Label> {
        self.call(RemoteRequest::post(
            Namespace::Rest,
            format!("{}/labels", board_path(board_id)),
            Self::body(label)?,
        ))
        .await
    }

    pub async fn update_label(
        &self,
        board_id: u64,
        label_id: u64,
        fields: Map<String, Value>,
    ) -> DeckResult<Label> {
        self.call(RemoteRequest::put(
            Namespace::Rest,
            label_path(board_id, label_id),
            Value::Object(fields),
        ))
        .await
    }

    pub async fn delete_label(&self, board_id: u64, label_id: u64) -> DeckResult<()> {
        self.call_unit(RemoteRequest::delete(
            Namespace::Rest,
            label_path(board_id, label_id),
        ))
        .await
    }

    // -------------------------------------------------------------------------
    // Comments and attachments (OCS sub-API, card-scoped)
    // -------------------------------------------------------------------------

    pub async fn list_comments(&self, card_id: u64) -> DeckResult<Vec<Comment>> {
        self.call(RemoteRequest::get(
            Namespace::Ocs,
            format!("/cards/{card_id}/comments"),
        ))
        .await
    }

    pub async fn create_comment(&self, card_id: u64, comment: &NewComment) -> DeckResult<Comment> {
        self.call(RemoteRequest::post(
            Namespace::Ocs,
            format!("/cards/{card_id}/comments"),
            Self::body(comment)?,
        ))
        .await
    }

    pub async fn update_comment(&self, card_id: u64, comment_id: u64, message: &str) -> DeckResult<Comment> {
        self.call(RemoteRequest::put(
            Namespace::Ocs,
            format!("/cards/{card_id}/comments/{comment_id}"),
            serde_json::json!({ "message": message }),
        ))
        .await
    }

    pub async fn delete_comment(&self, card_id: u64, comment_id: u64) -> DeckResult<()> {
        self.call_unit(RemoteRequest::delete(
            Namespace::Ocs,
            format!("/cards/{card_id}/comments/{comment_id}"),
        ))
        .await
    }

    pub async fn list_attachments(&self, card_id: u64) -> DeckResult<Vec<Attachment>> {
        self.call(RemoteRequest::get(
            Namespace::Ocs,
            format!("/cards/{card_id}/attachments"),
        ))
        .await
    }

    pub async fn create_attachment(
        &self,
        card_id: u64,
        attachment: &NewAttachment,
    ) -> DeckResult<Attachment> {
        self.call(RemoteRequest::post(
            Namespace::Ocs,
            format!("/cards/{card_id}/attachments"),
            Self::body(attachment)?,
        ))
        .await
    }

    pub async fn update_attachment(
        &self,
        card_id: u64,
        attachment_id: u64,
        fields: Map<String, Value>,
    ) -> DeckResult<Attachment> {
        self.call(RemoteRequest::put(
            Namespace::Ocs,
            format!("/cards/{card_id}/attachments/{attachment_id}"),
            Value::Object(fields),
        ))
        .await
    }

    pub async fn delete_attachment(&self, card_id: u64, attachment_id: u64) -> DeckResult<()> {
        self.call_unit(RemoteRequest::delete(
            Namespace::Ocs,
            format!("/cards/{card_id}/attachments/{attachment_id}"),
        ))
        .await
    }
}
