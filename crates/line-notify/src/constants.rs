//! LINE Notify endpoints
//!
//! The OAuth endpoints live on `notify-bot.line.me` while message delivery
//! goes through `notify-api.line.me`.

/// Browser-facing authorization endpoint (authorization code flow)
pub const AUTHORIZE_ENDPOINT: &str = "https://notify-bot.line.me/oauth/authorize";

/// Token endpoint for exchanging an authorization code
pub const TOKEN_ENDPOINT: &str = "https://notify-bot.line.me/oauth/token";

/// Message push endpoint, authenticated with the bearer access token
pub const NOTIFY_ENDPOINT: &str = "https://notify-api.line.me/api/notify";

/// The only scope LINE Notify defines
pub const SCOPE: &str = "notify";

/// Endpoint set used by a client.
///
/// Defaults to the public LINE Notify URLs. Overriding is useful behind an
/// egress proxy or when pointing the client at a local test server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub authorize: String,
    pub token: String,
    pub notify: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            authorize: AUTHORIZE_ENDPOINT.to_string(),
            token: TOKEN_ENDPOINT.to_string(),
            notify: NOTIFY_ENDPOINT.to_string(),
        }
    }
}

impl Endpoints {
    /// Endpoints rooted at a single base URL, keeping LINE's paths.
    ///
    /// `http://127.0.0.1:8080` yields `.../oauth/authorize`, `.../oauth/token`
    /// and `.../api/notify` on that host.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            authorize: format!("{base}/oauth/authorize"),
            token: format!("{base}/oauth/token"),
            notify: format!("{base}/api/notify"),
        }
    }
}
