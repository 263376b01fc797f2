//! Authorization URL construction
//!
//! The first leg of the authorization code flow: the caller redirects the
//! user's browser to this URL, LINE asks the user to pick a chat, then
//! redirects back to `redirect_uri` with `code` and `state` query parameters.
//! Nothing here touches the network.

use std::fmt;

use crate::constants::{AUTHORIZE_ENDPOINT, SCOPE};
use crate::error::{Error, Result};

/// Parameters of an authorization redirect.
///
/// Values are rendered verbatim; callers that need percent-encoding must
/// encode before constructing the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    client_id: String,
    redirect_uri: String,
    state: String,
}

impl AuthorizationRequest {
    /// Validate the required parameters.
    ///
    /// `client_id` and `redirect_uri` must contain something other than
    /// whitespace. A missing `state` renders as an empty `state=` parameter.
    pub fn new(client_id: &str, redirect_uri: &str, state: Option<&str>) -> Result<Self> {
        if client_id.trim().is_empty() {
            return Err(Error::InvalidArgument("client_id"));
        }
        if redirect_uri.trim().is_empty() {
            return Err(Error::InvalidArgument("redirect_uri"));
        }
        Ok(Self {
            client_id: client_id.to_string(),
            redirect_uri: redirect_uri.to_string(),
            state: state.unwrap_or_default().to_string(),
        })
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    /// Render against a specific authorize endpoint.
    pub fn to_url(&self, endpoint: &str) -> String {
        format!(
            "{}?response_type=code&client_id={}&redirect_uri={}&scope={}&state={}",
            endpoint, self.client_id, self.redirect_uri, SCOPE, self.state,
        )
    }
}

impl fmt::Display for AuthorizationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url(AUTHORIZE_ENDPOINT))
    }
}

/// Build the LINE Notify authorization URL.
pub fn build_authorization_url(
    client_id: &str,
    redirect_uri: &str,
    state: Option<&str>,
) -> Result<String> {
    AuthorizationRequest::new(client_id, redirect_uri, state).map(|req| req.to_string())
}
