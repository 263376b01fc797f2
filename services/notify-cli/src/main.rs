//! LINE Notify command-line client
//!
//! Thin wrapper over the `line-notify` library:
//! 1. `auth-url` prints the URL to send a user's browser to
//! 2. `exchange` trades the returned authorization code for an access token
//! 3. `send` pushes a message with an access token
//!
//! Command output goes to stdout; structured logs go to stderr.

mod config;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use line_notify::{ClientCredentials, NotifyClient, ReqwestTransport};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{CLIENT_SECRET_ENV, Config};

#[derive(Debug, Parser)]
#[command(name = "line-notify", version, about = "LINE Notify OAuth and messaging client")]
struct Cli {
    /// Config file (defaults to $LINE_NOTIFY_CONFIG, then ./line-notify.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the authorization URL for the configured client
    AuthUrl {
        /// Opaque value echoed back on the redirect (CSRF protection)
        #[arg(long)]
        state: Option<String>,
    },
    /// Exchange an authorization code for an access token
    Exchange {
        #[arg(long)]
        code: String,
    },
    /// Push a text message
    Send {
        /// Access token (defaults to $LINE_NOTIFY_TOKEN)
        #[arg(long)]
        token: Option<String>,
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and LOG_LEVEL / RUST_LOG support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let (config_path, explicit) = Config::resolve_path(cli.config.as_deref());
    let config = Config::load_or_default(&config_path, explicit)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    let transport = ReqwestTransport::with_timeout(Duration::from_secs(config.http.timeout_secs))
        .context("failed to build HTTP client")?;
    let client = NotifyClient::new(Arc::new(transport)).with_endpoints(config.endpoints());

    let output = run(cli.command, &config, &client).await?;
    println!("{output}");
    Ok(())
}

/// Execute one subcommand and return what should be printed.
async fn run(command: Command, config: &Config, client: &NotifyClient) -> Result<String> {
    match command {
        Command::AuthUrl { state } => {
            let registration = config.client()?;
            let url = client.authorization_url(
                &registration.client_id,
                &registration.redirect_uri,
                state.as_deref(),
            )?;
            Ok(url)
        }
        Command::Exchange { code } => {
            let registration = config.client()?;
            let secret = registration.client_secret.as_ref().with_context(|| {
                format!("client secret not set: export {CLIENT_SECRET_ENV} or set client_secret_file")
            })?;
            let credentials = ClientCredentials {
                client_id: registration.client_id.clone(),
                client_secret: secret.clone(),
                redirect_uri: registration.redirect_uri.clone(),
            };

            info!(client_id = %credentials.client_id, "exchanging authorization code");
            let token = client
                .exchange_code(&code, &credentials)
                .await
                .context("token exchange failed")?;
            Ok(token.expose().to_string())
        }
        Command::Send { token, message } => {
            let token = config::resolve_token(token)?;
            client
                .send_message(token.expose(), &message)
                .await
                .context("sending message failed")?;
            Ok("sent".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use line_notify::{Endpoints, FormRequest, HttpResponse, Transport, TransportError};
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    /// Answers every request with one canned response and keeps what it saw.
    struct CannedTransport {
        status: u16,
        body: &'static str,
        seen: Mutex<Vec<FormRequest>>,
    }

    impl Transport for CannedTransport {
        fn post_form<'a>(
            &'a self,
            request: &'a FormRequest,
        ) -> Pin<
            Box<dyn Future<Output = std::result::Result<HttpResponse, TransportError>> + Send + 'a>,
        > {
            self.seen.lock().unwrap().push(request.clone());
            let response = HttpResponse {
                status: self.status,
                body: self.body.to_string(),
            };
            Box::pin(async move { Ok(response) })
        }
    }

    fn canned(status: u16, body: &'static str) -> Arc<CannedTransport> {
        Arc::new(CannedTransport {
            status,
            body,
            seen: Mutex::new(Vec::new()),
        })
    }

    fn config_with_client(secret: Option<&str>) -> Config {
        Config {
            client: Some(config::ClientConfig {
                client_id: "id1".into(),
                redirect_uri: "http://cb".into(),
                client_secret: secret.map(common::Secret::from),
                client_secret_file: None,
            }),
            ..Config::default()
        }
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["line-notify", "--config", "x.toml", "send", "hi"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(
            cli.command,
            Command::Send { token: None, ref message } if message == "hi"
        ));

        let cli = Cli::try_parse_from(["line-notify", "exchange", "--code", "abc"]).unwrap();
        assert!(matches!(cli.command, Command::Exchange { ref code } if code == "abc"));

        assert!(Cli::try_parse_from(["line-notify", "exchange"]).is_err());
    }

    #[tokio::test]
    async fn auth_url_uses_configured_client() {
        let client = NotifyClient::new(canned(200, ""));
        let output = run(
            Command::AuthUrl {
                state: Some("s1".into()),
            },
            &config_with_client(None),
            &client,
        )
        .await
        .unwrap();
        assert_eq!(
            output,
            "https://notify-bot.line.me/oauth/authorize?response_type=code&client_id=id1&redirect_uri=http://cb&scope=notify&state=s1"
        );
    }

    #[tokio::test]
    async fn auth_url_requires_client_section() {
        let client = NotifyClient::new(canned(200, ""));
        let result = run(Command::AuthUrl { state: None }, &Config::default(), &client).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn exchange_prints_token() {
        let transport = canned(200, r#"{"status":200,"message":"ok","access_token":"tok123"}"#);
        let client = NotifyClient::new(transport.clone())
            .with_endpoints(Endpoints::with_base("http://127.0.0.1:9000"));

        let output = run(
            Command::Exchange {
                code: "code1".into(),
            },
            &config_with_client(Some("secret1")),
            &client,
        )
        .await
        .unwrap();
        assert_eq!(output, "tok123");

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0].url, "http://127.0.0.1:9000/oauth/token");
        assert_eq!(seen[0].form_value("client_secret"), Some("secret1"));
    }

    #[tokio::test]
    async fn exchange_without_secret_fails_before_network() {
        let transport = canned(200, "");
        let client = NotifyClient::new(transport.clone());

        let err = run(
            Command::Exchange {
                code: "code1".into(),
            },
            &config_with_client(None),
            &client,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains(CLIENT_SECRET_ENV), "got: {err}");
        assert!(transport.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn send_reports_api_error() {
        let transport = canned(400, r#"{"status":400,"message":"message: must not be empty"}"#);
        let client = NotifyClient::new(transport);

        let err = run(
            Command::Send {
                token: Some("tok".into()),
                message: String::new(),
            },
            &Config::default(),
            &client,
        )
        .await
        .unwrap_err();
        let root = err.root_cause().to_string();
        assert_eq!(root, "message: must not be empty");
    }
}
