//! Token exchange and message push
//!
//! Each operation is one POST through the injected [`Transport`], decoded
//! with [`ApiResponse`]. Nothing is cached between calls: the client never
//! remembers tokens, and a failed call is reported once without retrying.

use std::fmt;
use std::sync::Arc;

use common::Secret;
use tracing::{debug, info, warn};

use crate::auth_url::AuthorizationRequest;
use crate::constants::Endpoints;
use crate::error::{Error, Result};
use crate::response::{AccessTokenResponse, ApiResponse};
use crate::transport::{FormRequest, HttpResponse, ReqwestTransport, Transport};

/// OAuth client registration, as issued by the LINE Notify console.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: Secret<String>,
    pub redirect_uri: String,
}

impl ClientCredentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: Secret::new(client_secret.into()),
            redirect_uri: redirect_uri.into(),
        }
    }
}

/// Access token obtained from the token endpoint.
///
/// LINE Notify tokens do not expire on their own; they stay valid until the
/// user revokes the connection.
#[derive(Clone)]
pub struct AccessToken(Secret<String>);

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Secret::new(value.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&self.0).finish()
    }
}

/// Exchange an authorization code for an access token.
pub async fn exchange_code(
    transport: &dyn Transport,
    token_endpoint: &str,
    code: &str,
    credentials: &ClientCredentials,
) -> Result<AccessToken> {
    let request = FormRequest::new(token_endpoint)
        .field("grant_type", "authorization_code")
        .field("code", code)
        .field("redirect_uri", &credentials.redirect_uri)
        .field("client_id", &credentials.client_id)
        .field("client_secret", credentials.client_secret.expose());

    let response = send(transport, &request).await?;
    let token = ApiResponse::<AccessTokenResponse>::decode(&response)
        .and_then(ApiResponse::into_result)
        .inspect_err(|e| log_failure("token exchange", e))?;

    info!(client_id = %credentials.client_id, "access token issued");
    Ok(AccessToken::new(token.access_token))
}

/// Push a text message to the chat bound to `token`.
///
/// The message is sent as-is; LINE enforces its own length limit and
/// reports violations as an API error.
pub async fn send_message(
    transport: &dyn Transport,
    notify_endpoint: &str,
    token: &str,
    message: &str,
) -> Result<()> {
    let request = FormRequest::new(notify_endpoint)
        .bearer(token)
        .field("message", message);

    let response = send(transport, &request).await?;
    ApiResponse::<()>::acknowledge(&response)
        .and_then(ApiResponse::into_result)
        .inspect_err(|e| log_failure("notify", e))?;

    info!(message_len = message.chars().count(), "message delivered");
    Ok(())
}

async fn send(transport: &dyn Transport, request: &FormRequest) -> Result<HttpResponse> {
    debug!(url = %request.url, fields = ?request.field_names(), "sending form request");
    transport.post_form(request).await.map_err(|e| {
        warn!(url = %request.url, error = %e, "transport failure");
        Error::Transport(e)
    })
}

fn log_failure(operation: &str, error: &Error) {
    match error {
        Error::Api { status, message } => {
            warn!(operation, status, api_message = %message, "LINE Notify rejected request");
        }
        other => warn!(operation, error = %other, "unexpected LINE Notify response"),
    }
}

/// Stateless handle bundling a transport with the endpoints to call.
///
/// Cloning is cheap and clones share the transport, so one client can serve
/// concurrent calls with different tokens.
#[derive(Clone)]
pub struct NotifyClient {
    transport: Arc<dyn Transport>,
    endpoints: Endpoints,
}

impl Default for NotifyClient {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestTransport::new()))
    }
}

impl NotifyClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            endpoints: Endpoints::default(),
        }
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Authorization URL for this client's authorize endpoint.
    pub fn authorization_url(
        &self,
        client_id: &str,
        redirect_uri: &str,
        state: Option<&str>,
    ) -> Result<String> {
        AuthorizationRequest::new(client_id, redirect_uri, state)
            .map(|req| req.to_url(&self.endpoints.authorize))
    }

    pub async fn exchange_code(
        &self,
        code: &str,
        credentials: &ClientCredentials,
    ) -> Result<AccessToken> {
        exchange_code(
            self.transport.as_ref(),
            &self.endpoints.token,
            code,
            credentials,
        )
        .await
    }

    pub async fn send_message(&self, token: &str, message: &str) -> Result<()> {
        send_message(
            self.transport.as_ref(),
            &self.endpoints.notify,
            token,
            message,
        )
        .await
    }
}
