//! HTTP transport abstraction
//!
//! Both network operations reduce to "POST a urlencoded form, optionally with
//! a bearer token, and hand back status + body". The `Transport` trait
//! captures exactly that so tests can substitute a recording fake for
//! `reqwest`.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use common::Secret;
use tracing::debug;

use crate::error::{Error, Result, TransportError};

/// A urlencoded POST request.
///
/// `Debug` prints form field names only; values may carry client secrets.
#[derive(Clone)]
pub struct FormRequest {
    pub url: String,
    /// Sent as `Authorization: Bearer <token>` when present
    pub bearer: Option<Secret<String>>,
    pub form: Vec<(String, String)>,
}

impl FormRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            bearer: None,
            form: Vec::new(),
        }
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.bearer = Some(Secret::from(token));
        self
    }

    pub fn field(mut self, name: &str, value: &str) -> Self {
        self.form.push((name.to_string(), value.to_string()));
        self
    }

    /// Value of the first form field named `name`.
    pub fn form_value(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Field names only, for logging without leaking values.
    pub(crate) fn field_names(&self) -> Vec<&str> {
        self.form.iter().map(|(key, _)| key.as_str()).collect()
    }
}

impl fmt::Debug for FormRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormRequest")
            .field("url", &self.url)
            .field("bearer", &self.bearer)
            .field("fields", &self.field_names())
            .finish()
    }
}

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends form requests on behalf of the client.
///
/// Any HTTP status, including 4xx/5xx, is a successful exchange and must be
/// returned as an `HttpResponse`. `Err` is reserved for failures where no
/// response exists (DNS, refused connection, timeout, truncated body).
///
/// Uses `Pin<Box<dyn Future>>` return types for dyn-compatibility (`Arc<dyn Transport>`).
pub trait Transport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        request: &'a FormRequest,
    ) -> Pin<Box<dyn Future<Output = std::result::Result<HttpResponse, TransportError>> + Send + 'a>>;
}

/// Default transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing client (connection pool, proxy settings, TLS config).
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a client whose requests give up after `timeout`.
    ///
    /// A timed-out request surfaces as [`Error::Transport`]; a client that
    /// cannot be built at all is [`Error::ClientBuild`].
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::ClientBuild(Box::new(e)))?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        request: &'a FormRequest,
    ) -> Pin<Box<dyn Future<Output = std::result::Result<HttpResponse, TransportError>> + Send + 'a>>
    {
        Box::pin(async move {
            let mut builder = self.client.post(&request.url).form(&request.form);
            if let Some(token) = &request.bearer {
                builder = builder.bearer_auth(token.expose());
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            debug!(url = %request.url, status, body_len = body.len(), "received response");

            Ok(HttpResponse { status, body })
        })
    }
}
