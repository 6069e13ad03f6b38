//! HTTP transport to the Nextcloud Deck API.
//!
//! [`DeckTransport`] is the seam between the bridge and the network: it takes
//! one fully described [`RemoteRequest`] and returns the decoded JSON body.
//! [`HttpTransport`] is the reqwest-backed implementation; tests mock the
//! trait.

use base64::Engine as _;
use futures_util::future::{BoxFuture, FutureExt};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, warn};

use super::config::DeckConfig;
use super::error::{DeckError, DeckResult};

#[cfg(test)]
use mockall::automock;

/// HTTP verb of a remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Which API root a path is relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// `index.php/apps/deck/api/v1.0`: boards, stacks, cards, labels.
    Rest,
    /// `ocs/v2.php/apps/deck/api/v1.0`: card comments and attachments.
    Ocs,
}

/// One outgoing call against the Deck API.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteRequest {
    pub method: Method,
    pub namespace: Namespace,
    pub path: String,
    pub body: Option<Value>,
}

impl RemoteRequest {
    pub fn get(namespace: Namespace, path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            namespace,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(namespace: Namespace, path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            namespace,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn put(namespace: Namespace, path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Put,
            namespace,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn delete(namespace: Namespace, path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            namespace,
            path: path.into(),
            body: None,
        }
    }
}

/// Executes remote calls. Implementations must not retry.
///
/// The returned future owns everything it needs, so callers may hold it
/// across awaits without borrowing the transport.
#[cfg_attr(test, automock)]
pub trait DeckTransport: Send + Sync {
    fn send(&self, request: RemoteRequest) -> BoxFuture<'static, DeckResult<Value>>;
}

/// Reqwest-backed transport carrying a single static Basic credential.
pub struct HttpTransport {
    rest_base: String,
    ocs_base: String,
    authorization: String,
    client: Client,
}

impl HttpTransport {
    /// Build a transport for the instance described by `config`.
    ///
    /// The credential header is computed once here and forwarded verbatim on
    /// every request.
    pub fn new(config: &DeckConfig) -> Self {
        // reqwest is built without a default crypto provider
        let _ = rustls::crypto::ring::default_provider().install_default();

        let credential = format!("{}:{}", config.username, config.password);
        let authorization = format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(credential)
        );

        Self {
            rest_base: format!("{}/index.php/apps/deck/api/v1.0", config.url),
            ocs_base: format!("{}/ocs/v2.php/apps/deck/api/v1.0", config.url),
            authorization,
            client: Client::new(),
        }
    }

    /// Full URL for a request path.
    pub fn url(&self, namespace: Namespace, path: &str) -> String {
        match namespace {
            Namespace::Rest => format!("{}{}", self.rest_base, path),
            Namespace::Ocs => format!("{}{}", self.ocs_base, path),
        }
    }

    fn builder(&self, request: &RemoteRequest) -> RequestBuilder {
        let url = self.url(request.namespace, &request.path);
        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        let builder = builder
            .header(reqwest::header::AUTHORIZATION, &self.authorization)
            .header(reqwest::header::ACCEPT, "application/json")
            .header("OCS-APIRequest", "true");
        match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        }
    }

    /// Decode a response, turning non-success statuses into
    /// [`DeckError::Remote`] with the body preserved verbatim.
    pub async fn handle_response(response: Response) -> DeckResult<Value> {
        let status = response.status();
        if status.is_success() {
            let text = response.text().await?;
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            let value: Value = serde_json::from_str(&text)?;
            Ok(unwrap_ocs(value))
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(DeckError::Remote {
                status: status.as_u16(),
                body,
            })
        }
    }
}

impl DeckTransport for HttpTransport {
    fn send(&self, request: RemoteRequest) -> BoxFuture<'static, DeckResult<Value>> {
        let builder = self.builder(&request);
        async move {
            debug!(method = ?request.method, path = %request.path, "deck request");
            let response = builder.send().await?;
            let result = Self::handle_response(response).await;
            if let Err(e) = &result {
                warn!(method = ?request.method, path = %request.path, error = %e, "deck request failed");
            }
            result
        }
        .boxed()
    }
}

/// Strip the `{"ocs": {"meta": …, "data": …}}` envelope OCS endpoints use.
pub fn unwrap_ocs(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.len() == 1 && map.contains_key("ocs") => {
            match map.remove("ocs") {
                Some(Value::Object(mut ocs)) => ocs.remove("data").unwrap_or(Value::Null),
                Some(other) => other,
                None => Value::Null,
            }
        }
        other => other,
    }
}
