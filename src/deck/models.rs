//! Remote Deck entities.
//!
//! Entities keep the remote payload as received: `id` is typed, everything
//! else lives in `fields` and is serialized back untouched, nulls included.
//! Accessors give read-only views of the few fields the bridge inspects.
//! Embedded collections use a double option so an explicit `null` survives.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn text<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

/// A board: the top-level Kanban workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: u64,
    #[serde(
        default,
        deserialize_with = "crate::serde_utils::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub labels: Option<Option<Vec<Label>>>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Board {
    /// Board labels; absent and `null` both read as empty.
    pub fn into_labels(self) -> Vec<Label> {
        self.labels.flatten().unwrap_or_default()
    }
}

/// A stack (column) inside a board.
///
/// Stack listings embed the stack's cards; single-stack fetches do too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stack {
    pub id: u64,
    #[serde(
        default,
        deserialize_with = "crate::serde_utils::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub cards: Option<Option<Vec<Card>>>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Stack {
    /// Cards embedded in this stack (empty when absent or `null`).
    pub fn cards(&self) -> &[Card] {
        match &self.cards {
            Some(Some(cards)) => cards,
            _ => &[],
        }
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards.flatten().unwrap_or_default()
    }

    pub fn contains_card(&self, card_id: u64) -> bool {
        self.cards().iter().any(|card| card.id == card_id)
    }
}

/// A card (task item) inside a stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: u64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Card {
    pub fn title(&self) -> &str {
        text(&self.fields, "title").unwrap_or_default()
    }

    pub fn description(&self) -> Option<&str> {
        text(&self.fields, "description")
    }

    pub fn is_archived(&self) -> bool {
        matches!(self.fields.get("archived"), Some(Value::Bool(true)))
    }

    /// The remote reports `done` as a timestamp or null; a boolean is also
    /// accepted since that is what the bridge writes.
    pub fn is_done(&self) -> bool {
        match self.fields.get("done") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(done)) => *done,
            Some(_) => true,
        }
    }
}

/// A board-scoped label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: u64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A comment on a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A file attached to a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: u64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

// =============================================================================
// Outgoing bodies
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBoard {
    pub title: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewStack {
    pub title: String,
    pub order: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCard {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub order: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duedate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewLabel {
    pub title: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewComment {
    pub message: String,
    #[serde(rename = "parentId", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAttachment {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: String,
}

/// Body of the card reorder call, shared by `move` and `reorder`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reorder {
    #[serde(rename = "stackId")]
    pub stack_id: u64,
    pub order: i64,
}
