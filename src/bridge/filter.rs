//! In-process card filtering for card listings.

use crate::deck::Card;

/// Post-fetch card filter. A `None` field means "no filter", never "false".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFilter {
    /// Case-insensitive substring matched against title or description.
    pub search: Option<String>,
    pub archived: Option<bool>,
    pub done: Option<bool>,
}

impl CardFilter {
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.archived.is_none() && self.done.is_none()
    }

    pub fn matches(&self, card: &Card) -> bool {
        if self.archived.is_some_and(|archived| card.is_archived() != archived) {
            return false;
        }
        if self.done.is_some_and(|done| card.is_done() != done) {
            return false;
        }
        match &self.search {
            Some(needle) => {
                let needle = needle.to_lowercase();
                card.title().to_lowercase().contains(&needle)
                    || card
                        .description()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }

    /// Apply the filter to a fully assembled list, keeping remote order.
    pub fn apply(&self, cards: Vec<Card>) -> Vec<Card> {
        if self.is_empty() {
            return cards;
        }
        cards.into_iter().filter(|card| self.matches(card)).collect()
    }
}
