//! Error types for Deck operations.
//!
//! Every failure the bridge can surface to a caller is a variant of
//! [`DeckError`]. Variants carry a human-readable message through `Display`
//! and a stable miette diagnostic code.

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while validating, resolving or dispatching a Deck request.
#[derive(Error, Diagnostic, Debug)]
pub enum DeckError {
    #[error("{field} is required")]
    #[diagnostic(code(deck_mcp::missing_parameter))]
    MissingParameter { field: &'static str },

    #[error("Unsupported action '{action}' for entity '{entity}'")]
    #[diagnostic(
        code(deck_mcp::unsupported_action),
        help(
            "Only cards support actions: move, reorder, assign, unassign, add_label, remove_label, archive, unarchive, mark_done, mark_undone"
        )
    )]
    UnsupportedAction { entity: String, action: String },

    #[error("{entity} {id} not found")]
    #[diagnostic(code(deck_mcp::not_found))]
    NotFound { entity: &'static str, id: u64 },

    #[error("Remote API error ({status}): {body}")]
    #[diagnostic(code(deck_mcp::remote_error))]
    Remote { status: u16, body: String },

    #[error("Failed to reach the Deck API")]
    #[diagnostic(
        code(deck_mcp::transport),
        help("Check NEXTCLOUD_URL and that the Nextcloud instance is reachable.")
    )]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response from the Deck API: {message}")]
    #[diagnostic(code(deck_mcp::invalid_response))]
    InvalidResponse { message: String },
}

impl DeckError {
    pub(crate) fn missing(field: &'static str) -> Self {
        DeckError::MissingParameter { field }
    }

    pub(crate) fn unsupported(entity: impl Into<String>, action: impl Into<String>) -> Self {
        DeckError::UnsupportedAction {
            entity: entity.into(),
            action: action.into(),
        }
    }
}

impl From<reqwest::Error> for DeckError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            DeckError::InvalidResponse {
                message: e.to_string(),
            }
        } else {
            DeckError::Transport { source: e }
        }
    }
}

impl From<serde_json::Error> for DeckError {
    fn from(e: serde_json::Error) -> Self {
        DeckError::InvalidResponse {
            message: e.to_string(),
        }
    }
}

/// Result type for Deck operations.
pub type DeckResult<T> = Result<T, DeckError>;
