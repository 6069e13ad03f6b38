//! Remote Nextcloud Deck API collaborator.
//!
//! - `transport`: the [`DeckTransport`] seam and its reqwest implementation
//! - `api`: typed wrappers, one method per remote call
//! - `models`: remote entities and outgoing bodies
//! - `config`: instance URL and static credential
//! - `error`: the error type shared by the whole bridge

mod api;
mod config;
mod error;
mod models;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod transport_test;

pub use api::{CardLocation, DeckApi};
pub use config::{ConfigError, DeckConfig, PASSWORD_VAR, URL_VAR, USERNAME_VAR};
pub use error::{DeckError, DeckResult};
pub use models::*;
pub use transport::{DeckTransport, HttpTransport, Method, Namespace, RemoteRequest, unwrap_ocs};

#[cfg(test)]
pub use transport::MockDeckTransport;
