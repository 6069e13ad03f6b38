//! Routing of validated commands onto remote calls.
//!
//! Card operations that lack ancestor ids resolve them first; every other
//! entity requires its ancestors from the caller. Resolution always happens
//! before the terminal write, so a failed resolution leaves the remote state
//! untouched.

use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::{info, instrument};

use super::request::{
    ActionCommand, CardAction, CardAncestry, CardScope, CreateCommand, DeleteCommand,
    ReadCommand, UpdateCommand,
};
use super::resolver::Resolver;
use crate::deck::{
    Card, CardLocation, DeckApi, DeckError, DeckResult, DeckTransport, NewAttachment, NewBoard,
    NewCard, NewComment, NewLabel, NewStack, Reorder, Stack,
};

pub const DEFAULT_COLOR: &str = "0082c9";
/// Order sentinel that places new or moved items last.
pub const DEFAULT_ORDER: i64 = 999;
pub const DEFAULT_CARD_TYPE: &str = "plain";
pub const DEFAULT_ATTACHMENT_TYPE: &str = "file";

fn to_json<S: Serialize>(value: S) -> DeckResult<Value> {
    Ok(serde_json::to_value(value)?)
}

fn deleted(entity: &str, id: u64) -> Value {
    json!({
        "success": true,
        "message": format!("{entity} {id} deleted successfully"),
    })
}

pub struct Dispatcher<'a, T: DeckTransport> {
    api: &'a DeckApi<T>,
}

impl<'a, T: DeckTransport> Dispatcher<'a, T> {
    pub fn new(api: &'a DeckApi<T>) -> Self {
        Self { api }
    }

    fn resolver(&self) -> Resolver<'a, T> {
        Resolver::new(self.api)
    }

    /// Complete a card's location, resolving at most once.
    async fn locate_card(&self, ancestry: CardAncestry, card_id: u64) -> DeckResult<CardLocation> {
        match (ancestry.board_id, ancestry.stack_id) {
            (Some(board_id), Some(stack_id)) => Ok(CardLocation { board_id, stack_id }),
            (None, Some(stack_id)) => {
                let board_id = self.resolver().resolve_stack_ancestry(stack_id).await?;
                Ok(CardLocation { board_id, stack_id })
            }
            _ => self.resolver().resolve_card_ancestry(card_id).await,
        }
    }

    async fn board_for_stack(&self, board_id: Option<u64>, stack_id: u64) -> DeckResult<u64> {
        match board_id {
            Some(board_id) => Ok(board_id),
            None => self.resolver().resolve_stack_ancestry(stack_id).await,
        }
    }

    // Payloads may carry attachment data; only the entity is recorded.
    #[instrument(skip_all, fields(entity = command.entity()))]
    pub async fn create(&self, command: CreateCommand) -> DeckResult<Value> {
        match command {
            CreateCommand::Board { title, color } => {
                let board = NewBoard {
                    title,
                    color: color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
                };
                to_json(self.api.create_board(&board).await?)
            }
            CreateCommand::Stack {
                board_id,
                title,
                order,
            } => {
                let stack = NewStack {
                    title,
                    order: order.unwrap_or(DEFAULT_ORDER),
                };
                to_json(self.api.create_stack(board_id, &stack).await?)
            }
            CreateCommand::Card {
                board_id,
                stack_id,
                title,
                kind,
                order,
                description,
                duedate,
            } => {
                let board_id = self.board_for_stack(board_id, stack_id).await?;
                let card = NewCard {
                    title,
                    kind: kind.unwrap_or_else(|| DEFAULT_CARD_TYPE.to_string()),
                    order: order.unwrap_or(DEFAULT_ORDER),
                    description,
                    duedate,
                };
                to_json(self.api.create_card(board_id, stack_id, &card).await?)
            }
            CreateCommand::Label {
                board_id,
                title,
                color,
            } => {
                let label = NewLabel {
                    title,
                    color: color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
                };
                to_json(self.api.create_label(board_id, &label).await?)
            }
            CreateCommand::Comment {
                card_id,
                message,
                parent_id,
            } => {
                let comment = NewComment { message, parent_id };
                to_json(self.api.create_comment(card_id, &comment).await?)
            }
            CreateCommand::Attachment {
                card_id,
                kind,
                data,
            } => {
                let attachment = NewAttachment {
                    kind: kind.unwrap_or_else(|| DEFAULT_ATTACHMENT_TYPE.to_string()),
                    data,
                };
                to_json(self.api.create_attachment(card_id, &attachment).await?)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn read(&self, command: ReadCommand) -> DeckResult<Value> {
        match command {
            ReadCommand::Board { id } => to_json(self.api.get_board(id).await?),
            ReadCommand::Boards => to_json(self.api.list_boards().await?),
            ReadCommand::Stack { board_id, id } => to_json(self.api.get_stack(board_id, id).await?),
            ReadCommand::Stacks { board_id } => to_json(self.api.list_stacks(board_id).await?),
            ReadCommand::Card { ancestry, id } => {
                let at = self.locate_card(ancestry, id).await?;
                to_json(self.api.get_card(at, id).await?)
            }
            ReadCommand::Cards { scope, filter } => {
                let cards = self.collect_cards(scope).await?;
                to_json(filter.apply(cards))
            }
            ReadCommand::Label { board_id, id } => to_json(self.api.get_label(board_id, id).await?),
            ReadCommand::Labels { board_id } => {
                let board = self.api.get_board(board_id).await?;
                to_json(board.into_labels())
            }
            ReadCommand::Comment { card_id, id } => {
                let comment = self
                    .api
                    .list_comments(card_id)
                    .await?
                    .into_iter()
                    .find(|comment| comment.id == id)
                    .ok_or(DeckError::NotFound {
                        entity: "Comment",
                        id,
                    })?;
                to_json(comment)
            }
            ReadCommand::Comments { card_id } => to_json(self.api.list_comments(card_id).await?),
            ReadCommand::Attachment { card_id, id } => {
                let attachment = self
                    .api
                    .list_attachments(card_id)
                    .await?
                    .into_iter()
                    .find(|attachment| attachment.id == id)
                    .ok_or(DeckError::NotFound {
                        entity: "Attachment",
                        id,
                    })?;
                to_json(attachment)
            }
            ReadCommand::Attachments { card_id } => {
                to_json(self.api.list_attachments(card_id).await?)
            }
        }
    }

    /// Assemble the full, unfiltered card list for a scope.
    async fn collect_cards(&self, scope: CardScope) -> DeckResult<Vec<Card>> {
        match scope {
            CardScope::Stack { board_id, stack_id } => {
                let board_id = self.board_for_stack(board_id, stack_id).await?;
                let stack = self.api.get_stack(board_id, stack_id).await?;
                Ok(stack.into_cards())
            }
            CardScope::Board { board_id } => {
                let stacks = self.api.list_stacks(board_id).await?;
                Ok(stacks
                    .into_iter()
                    .flat_map(Stack::into_cards)
                    .collect())
            }
        }
    }

    #[instrument(skip_all, fields(entity = command.entity()))]
    pub async fn update(&self, command: UpdateCommand) -> DeckResult<Value> {
        match command {
            UpdateCommand::Board { id, fields } => to_json(self.api.update_board(id, fields).await?),
            UpdateCommand::Stack {
                board_id,
                id,
                fields,
            } => to_json(self.api.update_stack(board_id, id, fields).await?),
            UpdateCommand::Card {
                ancestry,
                id,
                fields,
            } => {
                let at = self.locate_card(ancestry, id).await?;
                to_json(self.api.update_card(at, id, fields).await?)
            }
            UpdateCommand::Label {
                board_id,
                id,
                fields,
            } => to_json(self.api.update_label(board_id, id, fields).await?),
            UpdateCommand::Comment {
                card_id,
                id,
                message,
            } => to_json(self.api.update_comment(card_id, id, &message).await?),
            UpdateCommand::Attachment {
                card_id,
                id,
                fields,
            } => to_json(self.api.update_attachment(card_id, id, fields).await?),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, command: DeleteCommand) -> DeckResult<Value> {
        let ack = match command {
            DeleteCommand::Board { id } => {
                self.api.delete_board(id).await?;
                deleted("Board", id)
            }
            DeleteCommand::Stack { board_id, id } => {
                self.api.delete_stack(board_id, id).await?;
                deleted("Stack", id)
            }
            DeleteCommand::Card { ancestry, id } => {
                let at = self.locate_card(ancestry, id).await?;
                self.api.delete_card(at, id).await?;
                deleted("Card", id)
            }
            DeleteCommand::Label { board_id, id } => {
                self.api.delete_label(board_id, id).await?;
                deleted("Label", id)
            }
            DeleteCommand::Comment { card_id, id } => {
                self.api.delete_comment(card_id, id).await?;
                deleted("Comment", id)
            }
            DeleteCommand::Attachment { card_id, id } => {
                self.api.delete_attachment(card_id, id).await?;
                deleted("Attachment", id)
            }
        };
        info!(ack = %ack, "delete completed");
        Ok(ack)
    }

    #[instrument(skip(self))]
    pub async fn action(&self, command: ActionCommand) -> DeckResult<Value> {
        let ActionCommand {
            ancestry,
            card_id,
            action,
        } = command;
        let at = self.locate_card(ancestry, card_id).await?;

        match action {
            CardAction::Move {
                target_stack_id,
                order,
            } => {
                let reorder = Reorder {
                    stack_id: target_stack_id,
                    order: order.unwrap_or(DEFAULT_ORDER),
                };
                self.api.reorder_card(at, card_id, &reorder).await
            }
            CardAction::Assign { user_id } => self.api.assign_user(at, card_id, &user_id).await,
            CardAction::Unassign { user_id } => self.api.unassign_user(at, card_id, &user_id).await,
            CardAction::AddLabel { label_id } => self.api.assign_label(at, card_id, label_id).await,
            CardAction::RemoveLabel { label_id } => {
                self.api.remove_label(at, card_id, label_id).await
            }
            CardAction::SetArchived(archived) => {
                let fields = Map::from_iter([("archived".to_string(), Value::Bool(archived))]);
                to_json(self.api.update_card(at, card_id, fields).await?)
            }
            CardAction::SetDone(done) => {
                let fields = Map::from_iter([("done".to_string(), Value::Bool(done))]);
                to_json(self.api.update_card(at, card_id, fields).await?)
            }
        }
    }
}
