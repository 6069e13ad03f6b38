//! Ancestor resolution for stacks and cards.
//!
//! The Deck API has no reverse lookup, so finding the board that owns a
//! stack (or the board and stack that own a card) means walking the
//! hierarchy: all boards, then each board's stacks with their embedded
//! cards. The walk is sequential, follows remote listing order and stops at
//! the first match. Nothing is cached between resolutions.

use tracing::{debug, instrument};

use crate::deck::{CardLocation, DeckApi, DeckError, DeckResult, DeckTransport};

pub struct Resolver<'a, T: DeckTransport> {
    api: &'a DeckApi<T>,
}

impl<'a, T: DeckTransport> Resolver<'a, T> {
    pub fn new(api: &'a DeckApi<T>) -> Self {
        Self { api }
    }

    /// Find the board owning `stack_id`.
    #[instrument(skip(self))]
    pub async fn resolve_stack_ancestry(&self, stack_id: u64) -> DeckResult<u64> {
        let boards = self.api.list_boards().await?;
        for (scanned, board) in boards.iter().enumerate() {
            let stacks = self.api.list_stacks(board.id).await?;
            if stacks.iter().any(|stack| stack.id == stack_id) {
                debug!(board_id = board.id, boards_scanned = scanned + 1, "stack resolved");
                return Ok(board.id);
            }
        }
        debug!(boards_scanned = boards.len(), "stack not found");
        Err(DeckError::NotFound {
            entity: "Stack",
            id: stack_id,
        })
    }

    /// Find the board and stack owning `card_id`.
    #[instrument(skip(self))]
    pub async fn resolve_card_ancestry(&self, card_id: u64) -> DeckResult<CardLocation> {
        let boards = self.api.list_boards().await?;
        for (scanned, board) in boards.iter().enumerate() {
            let stacks = self.api.list_stacks(board.id).await?;
            if let Some(stack) = stacks.iter().find(|stack| stack.contains_card(card_id)) {
                debug!(
                    board_id = board.id,
                    stack_id = stack.id,
                    boards_scanned = scanned + 1,
                    "card resolved"
                );
                return Ok(CardLocation {
                    board_id: board.id,
                    stack_id: stack.id,
                });
            }
        }
        debug!(boards_scanned = boards.len(), "card not found");
        Err(DeckError::NotFound {
            entity: "Card",
            id: card_id,
        })
    }
}
