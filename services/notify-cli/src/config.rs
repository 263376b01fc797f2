//! Configuration types and loading
//!
//! Precedence: CLI args > env vars > config file > defaults.
//! The client secret and access token are read from env vars or files,
//! never from the TOML directly.

use common::Secret;
use line_notify::Endpoints;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "LINE_NOTIFY_CONFIG";
pub const CLIENT_SECRET_ENV: &str = "LINE_NOTIFY_CLIENT_SECRET";
pub const TOKEN_ENV: &str = "LINE_NOTIFY_TOKEN";
pub const DEFAULT_CONFIG_FILE: &str = "line-notify.toml";

/// Root configuration
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// OAuth registration; only needed for `auth-url` and `exchange`
    #[serde(default)]
    pub client: Option<ClientConfig>,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

/// OAuth client registration
#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    pub client_id: String,
    pub redirect_uri: String,
    #[serde(skip)]
    pub client_secret: Option<Secret<String>>,
    /// Path to a file holding the client secret (alternative to the env var)
    #[serde(default)]
    pub client_secret_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
        }
    }
}

/// Per-endpoint overrides; unset entries keep the LINE URLs
#[derive(Debug, Default, Deserialize)]
pub struct EndpointsConfig {
    pub authorize: Option<String>,
    pub token: Option<String>,
    pub notify: Option<String>,
}

fn default_timeout() -> u64 {
    30
}

impl Config {
    /// Load configuration from a TOML file, then overlay environment variables.
    ///
    /// Client secret resolution order:
    /// 1. LINE_NOTIFY_CLIENT_SECRET env var
    /// 2. client_secret_file path from config
    pub fn load(path: &Path) -> common::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;
        config.validate()?;

        if let Some(client) = config.client.as_mut() {
            client.client_secret =
                resolve_secret(CLIENT_SECRET_ENV, client.client_secret_file.as_deref())?;
        }

        Ok(config)
    }

    /// Like [`Config::load`], but a missing file at the default location
    /// yields defaults. An explicitly requested file must exist.
    pub fn load_or_default(path: &Path, explicit: bool) -> common::Result<Self> {
        if !explicit && !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    fn validate(&self) -> common::Result<()> {
        if let Some(client) = &self.client {
            if client.client_id.trim().is_empty() {
                return Err(common::Error::Config("client_id must not be empty".into()));
            }
            if client.redirect_uri.trim().is_empty() {
                return Err(common::Error::Config(
                    "redirect_uri must not be empty".into(),
                ));
            }
        }

        if self.http.timeout_secs == 0 {
            return Err(common::Error::Config(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        for (name, url) in [
            ("authorize", &self.endpoints.authorize),
            ("token", &self.endpoints.token),
            ("notify", &self.endpoints.notify),
        ] {
            if let Some(url) = url
                && !url.starts_with("http://")
                && !url.starts_with("https://")
            {
                return Err(common::Error::Config(format!(
                    "endpoints.{name} must start with http:// or https://, got: {url}"
                )));
            }
        }

        Ok(())
    }

    /// The `[client]` section, required by the OAuth subcommands.
    pub fn client(&self) -> common::Result<&ClientConfig> {
        self.client
            .as_ref()
            .ok_or_else(|| common::Error::Config("missing [client] section".into()))
    }

    pub fn endpoints(&self) -> Endpoints {
        let defaults = Endpoints::default();
        Endpoints {
            authorize: self
                .endpoints
                .authorize
                .clone()
                .unwrap_or(defaults.authorize),
            token: self.endpoints.token.clone().unwrap_or(defaults.token),
            notify: self.endpoints.notify.clone().unwrap_or(defaults.notify),
        }
    }

    /// Resolve config file path from CLI arg or LINE_NOTIFY_CONFIG env var.
    ///
    /// The flag reports whether the path was chosen explicitly.
    pub fn resolve_path(cli_path: Option<&Path>) -> (PathBuf, bool) {
        if let Some(p) = cli_path {
            return (p.to_path_buf(), true);
        }
        if let Ok(p) = std::env::var(CONFIG_ENV) {
            return (PathBuf::from(p), true);
        }
        (PathBuf::from(DEFAULT_CONFIG_FILE), false)
    }
}

/// Resolve the access token for `send`: CLI flag, then LINE_NOTIFY_TOKEN.
pub fn resolve_token(cli_token: Option<String>) -> common::Result<Secret<String>> {
    cli_token
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
        .map(Secret::new)
        .or_else(|| resolve_secret(TOKEN_ENV, None).ok().flatten())
        .ok_or_else(|| {
            common::Error::Config(format!("no access token: pass --token or set {TOKEN_ENV}"))
        })
}

/// Env var takes precedence over the file; blank values count as unset.
fn resolve_secret(env_key: &str, file: Option<&Path>) -> common::Result<Option<Secret<String>>> {
    if let Ok(value) = std::env::var(env_key) {
        let value = value.trim().to_owned();
        if !value.is_empty() {
            return Ok(Some(Secret::new(value)));
        }
    }

    if let Some(file) = file {
        let value = std::fs::read_to_string(file).map_err(|e| {
            common::Error::Config(format!("failed to read {}: {e}", file.display()))
        })?;
        let value = value.trim().to_owned();
        if !value.is_empty() {
            return Ok(Some(Secret::new(value)));
        }
    }

    Ok(None)
}
