//! Request validation.
//!
//! The five caller-facing operations all take the same loose argument shape:
//! an entity tag, a few optional ids and a free-form JSON mapping. This
//! module turns that shape into one typed command per operation, failing
//! with [`DeckError::MissingParameter`] or [`DeckError::UnsupportedAction`]
//! before any remote call is made. Optional fields stay `None` here; their
//! defaults belong to the dispatcher.

use std::fmt;

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::filter::CardFilter;
use crate::deck::{DeckError, DeckResult};

/// Entity tag accepted by every tool. Plural tags are read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Board,
    Boards,
    Stack,
    Stacks,
    Card,
    Cards,
    Label,
    Labels,
    Comment,
    Comments,
    Attachment,
    Attachments,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Board => "board",
            EntityKind::Boards => "boards",
            EntityKind::Stack => "stack",
            EntityKind::Stacks => "stacks",
            EntityKind::Card => "card",
            EntityKind::Cards => "cards",
            EntityKind::Label => "label",
            EntityKind::Labels => "labels",
            EntityKind::Comment => "comment",
            EntityKind::Comments => "comments",
            EntityKind::Attachment => "attachment",
            EntityKind::Attachments => "attachments",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const ID_KEYS: [&str; 4] = ["id", "boardId", "stackId", "cardId"];

/// Loose arguments of one call, before validation.
///
/// Ids may be passed at the top level or inside `data`; [`ArgBundle::new`]
/// lifts them out of `data` so they never reach an outgoing body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgBundle {
    pub id: Option<u64>,
    pub board_id: Option<u64>,
    pub stack_id: Option<u64>,
    pub card_id: Option<u64>,
    pub data: Map<String, Value>,
}

impl ArgBundle {
    pub fn new(
        id: Option<u64>,
        board_id: Option<u64>,
        stack_id: Option<u64>,
        card_id: Option<u64>,
        data: Option<Map<String, Value>>,
    ) -> Self {
        let mut data = data.unwrap_or_default();
        let mut lifted = ID_KEYS.map(|key| data.remove(key).as_ref().and_then(as_id));
        Self {
            id: id.or(lifted[0].take()),
            board_id: board_id.or(lifted[1].take()),
            stack_id: stack_id.or(lifted[2].take()),
            card_id: card_id.or(lifted[3].take()),
            data,
        }
    }

    /// Like [`ArgBundle::new`], but `stackId` inside `data` stays in `data`.
    ///
    /// For actions the current stack only comes from the top-level field;
    /// a `stackId` in `data` names the move target.
    pub fn for_action(
        id: Option<u64>,
        board_id: Option<u64>,
        stack_id: Option<u64>,
        data: Option<Map<String, Value>>,
    ) -> Self {
        let mut data = data.unwrap_or_default();
        let target = data.remove("stackId");
        let mut args = Self::new(id, board_id, stack_id, None, Some(data));
        if let Some(target) = target {
            args.data.insert("stackId".to_string(), target);
        }
        args
    }

    fn require_id(&self, field: &'static str) -> DeckResult<u64> {
        self.id.ok_or(DeckError::missing(field))
    }

    fn require_board(&self) -> DeckResult<u64> {
        self.board_id.ok_or(DeckError::missing("Board ID"))
    }

    fn require_card(&self) -> DeckResult<u64> {
        self.card_id.ok_or(DeckError::missing("Card ID"))
    }

    fn ancestry(&self) -> CardAncestry {
        CardAncestry {
            board_id: self.board_id,
            stack_id: self.stack_id,
        }
    }

    fn take_string(&mut self, key: &str) -> Option<String> {
        match self.data.remove(key)? {
            Value::String(s) => Some(s),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    fn require_string(&mut self, key: &str, field: &'static str) -> DeckResult<String> {
        self.take_string(key)
            .filter(|s| !s.is_empty())
            .ok_or(DeckError::missing(field))
    }

    fn take_i64(&mut self, key: &str) -> Option<i64> {
        match self.data.remove(key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn take_id(&mut self, key: &str) -> Option<u64> {
        self.data.remove(key).as_ref().and_then(as_id)
    }

    fn take_bool(&mut self, key: &str) -> Option<bool> {
        match self.data.remove(key)? {
            Value::Bool(b) => Some(b),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn require_fields(self) -> DeckResult<Map<String, Value>> {
        if self.data.is_empty() {
            Err(DeckError::missing("Update data"))
        } else {
            Ok(self.data)
        }
    }
}

/// Accepts ids as JSON numbers or numeric strings.
fn as_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Caller-supplied ancestors of a card; either may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardAncestry {
    pub board_id: Option<u64>,
    pub stack_id: Option<u64>,
}

// =============================================================================
// Commands
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum CreateCommand {
    Board {
        title: String,
        color: Option<String>,
    },
    Stack {
        board_id: u64,
        title: String,
        order: Option<i64>,
    },
    Card {
        board_id: Option<u64>,
        stack_id: u64,
        title: String,
        kind: Option<String>,
        order: Option<i64>,
        description: Option<String>,
        duedate: Option<String>,
    },
    Label {
        board_id: u64,
        title: String,
        color: Option<String>,
    },
    Comment {
        card_id: u64,
        message: String,
        parent_id: Option<u64>,
    },
    Attachment {
        card_id: u64,
        kind: Option<String>,
        data: String,
    },
}

impl CreateCommand {
    pub fn entity(&self) -> &'static str {
        match self {
            CreateCommand::Board { .. } => "board",
            CreateCommand::Stack { .. } => "stack",
            CreateCommand::Card { .. } => "card",
            CreateCommand::Label { .. } => "label",
            CreateCommand::Comment { .. } => "comment",
            CreateCommand::Attachment { .. } => "attachment",
        }
    }
}

/// Where a card listing comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardScope {
    Stack { board_id: Option<u64>, stack_id: u64 },
    Board { board_id: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReadCommand {
    Board { id: u64 },
    Boards,
    Stack { board_id: u64, id: u64 },
    Stacks { board_id: u64 },
    Card { ancestry: CardAncestry, id: u64 },
    Cards { scope: CardScope, filter: CardFilter },
    Label { board_id: u64, id: u64 },
    Labels { board_id: u64 },
    Comment { card_id: u64, id: u64 },
    Comments { card_id: u64 },
    Attachment { card_id: u64, id: u64 },
    Attachments { card_id: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateCommand {
    Board {
        id: u64,
        fields: Map<String, Value>,
    },
    Stack {
        board_id: u64,
        id: u64,
        fields: Map<String, Value>,
    },
    Card {
        ancestry: CardAncestry,
        id: u64,
        fields: Map<String, Value>,
    },
    Label {
        board_id: u64,
        id: u64,
        fields: Map<String, Value>,
    },
    Comment {
        card_id: u64,
        id: u64,
        message: String,
    },
    Attachment {
        card_id: u64,
        id: u64,
        fields: Map<String, Value>,
    },
}

impl UpdateCommand {
    pub fn entity(&self) -> &'static str {
        match self {
            UpdateCommand::Board { .. } => "board",
            UpdateCommand::Stack { .. } => "stack",
            UpdateCommand::Card { .. } => "card",
            UpdateCommand::Label { .. } => "label",
            UpdateCommand::Comment { .. } => "comment",
            UpdateCommand::Attachment { .. } => "attachment",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteCommand {
    Board { id: u64 },
    Stack { board_id: u64, id: u64 },
    Card { ancestry: CardAncestry, id: u64 },
    Label { board_id: u64, id: u64 },
    Comment { card_id: u64, id: u64 },
    Attachment { card_id: u64, id: u64 },
}

/// Card actions. `move` and `reorder` both parse to [`CardAction::Move`].
#[derive(Debug, Clone, PartialEq)]
pub enum CardAction {
    Move {
        target_stack_id: u64,
        order: Option<i64>,
    },
    Assign {
        user_id: String,
    },
    Unassign {
        user_id: String,
    },
    AddLabel {
        label_id: u64,
    },
    RemoveLabel {
        label_id: u64,
    },
    SetArchived(bool),
    SetDone(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionCommand {
    pub ancestry: CardAncestry,
    pub card_id: u64,
    pub action: CardAction,
}

// =============================================================================
// Validation
// =============================================================================

pub fn validate_create(entity: EntityKind, mut args: ArgBundle) -> DeckResult<CreateCommand> {
    match entity {
        EntityKind::Board => Ok(CreateCommand::Board {
            title: args.require_string("title", "Title")?,
            color: args.take_string("color"),
        }),
        EntityKind::Stack => {
            let board_id = args.require_board()?;
            Ok(CreateCommand::Stack {
                board_id,
                title: args.require_string("title", "Title")?,
                order: args.take_i64("order"),
            })
        }
        EntityKind::Card => {
            let stack_id = args.stack_id.ok_or(DeckError::missing("Stack ID"))?;
            Ok(CreateCommand::Card {
                board_id: args.board_id,
                stack_id,
                title: args.require_string("title", "Title")?,
                kind: args.take_string("type"),
                order: args.take_i64("order"),
                description: args.take_string("description"),
                duedate: args.take_string("duedate"),
            })
        }
        EntityKind::Label => {
            let board_id = args.require_board()?;
            Ok(CreateCommand::Label {
                board_id,
                title: args.require_string("title", "Title")?,
                color: args.take_string("color"),
            })
        }
        EntityKind::Comment => {
            let card_id = args.require_card()?;
            Ok(CreateCommand::Comment {
                card_id,
                message: args.require_string("message", "Message")?,
                parent_id: args.take_id("parentId"),
            })
        }
        EntityKind::Attachment => {
            let card_id = args.require_card()?;
            Ok(CreateCommand::Attachment {
                card_id,
                kind: args.take_string("type"),
                data: args.require_string("data", "Attachment data")?,
            })
        }
        plural => Err(DeckError::unsupported(plural.as_str(), "create")),
    }
}

pub fn validate_read(entity: EntityKind, mut args: ArgBundle) -> DeckResult<ReadCommand> {
    match entity {
        EntityKind::Board => Ok(ReadCommand::Board {
            id: args.require_id("Board ID")?,
        }),
        EntityKind::Boards => Ok(ReadCommand::Boards),
        EntityKind::Stack => Ok(ReadCommand::Stack {
            board_id: args.require_board()?,
            id: args.require_id("Stack ID")?,
        }),
        EntityKind::Stacks => Ok(ReadCommand::Stacks {
            board_id: args.require_board()?,
        }),
        EntityKind::Card => Ok(ReadCommand::Card {
            ancestry: args.ancestry(),
            id: args.require_id("Card ID")?,
        }),
        EntityKind::Cards => {
            let scope = match (args.stack_id, args.board_id) {
                (Some(stack_id), board_id) => CardScope::Stack { board_id, stack_id },
                (None, Some(board_id)) => CardScope::Board { board_id },
                (None, None) => return Err(DeckError::missing("Stack ID or Board ID")),
            };
            let filter = CardFilter {
                search: args.take_string("search").filter(|s| !s.is_empty()),
                archived: args.take_bool("archived"),
                done: args.take_bool("done"),
            };
            Ok(ReadCommand::Cards { scope, filter })
        }
        EntityKind::Label => Ok(ReadCommand::Label {
            board_id: args.require_board()?,
            id: args.require_id("Label ID")?,
        }),
        EntityKind::Labels => Ok(ReadCommand::Labels {
            board_id: args.require_board()?,
        }),
        EntityKind::Comment => Ok(ReadCommand::Comment {
            card_id: args.require_card()?,
            id: args.require_id("Comment ID")?,
        }),
        EntityKind::Comments => Ok(ReadCommand::Comments {
            card_id: args.require_card()?,
        }),
        EntityKind::Attachment => Ok(ReadCommand::Attachment {
            card_id: args.require_card()?,
            id: args.require_id("Attachment ID")?,
        }),
        EntityKind::Attachments => Ok(ReadCommand::Attachments {
            card_id: args.require_card()?,
        }),
    }
}

pub fn validate_update(entity: EntityKind, mut args: ArgBundle) -> DeckResult<UpdateCommand> {
    match entity {
        EntityKind::Board => {
            let id = args.require_id("Board ID")?;
            Ok(UpdateCommand::Board {
                id,
                fields: args.require_fields()?,
            })
        }
        EntityKind::Stack => {
            let board_id = args.require_board()?;
            let id = args.require_id("Stack ID")?;
            Ok(UpdateCommand::Stack {
                board_id,
                id,
                fields: args.require_fields()?,
            })
        }
        EntityKind::Card => {
            let id = args.require_id("Card ID")?;
            let ancestry = args.ancestry();
            Ok(UpdateCommand::Card {
                ancestry,
                id,
                fields: args.require_fields()?,
            })
        }
        EntityKind::Label => {
            let board_id = args.require_board()?;
            let id = args.require_id("Label ID")?;
            Ok(UpdateCommand::Label {
                board_id,
                id,
                fields: args.require_fields()?,
            })
        }
        EntityKind::Comment => {
            let card_id = args.require_card()?;
            let id = args.require_id("Comment ID")?;
            Ok(UpdateCommand::Comment {
                card_id,
                id,
                message: args.require_string("message", "Message")?,
            })
        }
        EntityKind::Attachment => {
            let card_id = args.require_card()?;
            let id = args.require_id("Attachment ID")?;
            Ok(UpdateCommand::Attachment {
                card_id,
                id,
                fields: args.require_fields()?,
            })
        }
        plural => Err(DeckError::unsupported(plural.as_str(), "update")),
    }
}

pub fn validate_delete(entity: EntityKind, args: ArgBundle) -> DeckResult<DeleteCommand> {
    match entity {
        EntityKind::Board => Ok(DeleteCommand::Board {
            id: args.require_id("Board ID")?,
        }),
        EntityKind::Stack => Ok(DeleteCommand::Stack {
            board_id: args.require_board()?,
            id: args.require_id("Stack ID")?,
        }),
        EntityKind::Card => Ok(DeleteCommand::Card {
            ancestry: args.ancestry(),
            id: args.require_id("Card ID")?,
        }),
        EntityKind::Label => Ok(DeleteCommand::Label {
            board_id: args.require_board()?,
            id: args.require_id("Label ID")?,
        }),
        EntityKind::Comment => Ok(DeleteCommand::Comment {
            card_id: args.require_card()?,
            id: args.require_id("Comment ID")?,
        }),
        EntityKind::Attachment => Ok(DeleteCommand::Attachment {
            card_id: args.require_card()?,
            id: args.require_id("Attachment ID")?,
        }),
        plural => Err(DeckError::unsupported(plural.as_str(), "delete")),
    }
}

/// Validate an action call. The entity/action pair is checked before any
/// argument so unsupported combinations never look at ids.
pub fn validate_action(
    entity: EntityKind,
    action: &str,
    mut args: ArgBundle,
) -> DeckResult<ActionCommand> {
    if entity != EntityKind::Card {
        return Err(DeckError::unsupported(entity.as_str(), action));
    }

    let action = match action {
        "move" | "reorder" => {
            let target_stack_id = args
                .take_id("targetStackId")
                .or_else(|| args.take_id("stackId"))
                .ok_or(DeckError::missing("Target stack ID"))?;
            CardAction::Move {
                target_stack_id,
                order: args.take_i64("order"),
            }
        }
        "assign" => CardAction::Assign {
            user_id: args.require_string("userId", "User ID")?,
        },
        "unassign" => CardAction::Unassign {
            user_id: args.require_string("userId", "User ID")?,
        },
        "add_label" => CardAction::AddLabel {
            label_id: args
                .take_id("labelId")
                .ok_or(DeckError::missing("Label ID"))?,
        },
        "remove_label" => CardAction::RemoveLabel {
            label_id: args
                .take_id("labelId")
                .ok_or(DeckError::missing("Label ID"))?,
        },
        "archive" => CardAction::SetArchived(true),
        "unarchive" => CardAction::SetArchived(false),
        "mark_done" => CardAction::SetDone(true),
        "mark_undone" => CardAction::SetDone(false),
        unknown => return Err(DeckError::unsupported(entity.as_str(), unknown)),
    };

    Ok(ActionCommand {
        ancestry: args.ancestry(),
        card_id: args.require_id("Card ID")?,
        action,
    })
}
