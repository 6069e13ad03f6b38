//! Entity resolution and action dispatch.
//!
//! - `request`: validation of loose tool arguments into typed commands
//! - `resolver`: hierarchy walks recovering a stack's board or a card's
//!   board and stack
//! - `dispatcher`: routes commands to remote calls, resolving first when
//!   a card's ancestors are missing
//! - `filter`: post-fetch card filtering for card listings

mod dispatcher;
mod filter;
mod request;
mod resolver;

#[cfg(test)]
mod filter_test;

pub use dispatcher::{
    DEFAULT_ATTACHMENT_TYPE, DEFAULT_CARD_TYPE, DEFAULT_COLOR, DEFAULT_ORDER, Dispatcher,
};
pub use filter::CardFilter;
pub use request::{
    ActionCommand, ArgBundle, CardAction, CardAncestry, CardScope, CreateCommand, DeleteCommand,
    EntityKind, ReadCommand, UpdateCommand, validate_action, validate_create, validate_delete,
    validate_read, validate_update,
};
pub use resolver::Resolver;
