//! LINE Notify API client
//!
//! Covers the three things an integration needs:
//! 1. Build the authorization URL the user's browser is sent to
//!    (`build_authorization_url()`)
//! 2. Exchange the returned authorization code for an access token
//!    (`exchange_code()`)
//! 3. Push text messages with that token (`send_message()`)
//!
//! Network calls go through the `Transport` trait; `ReqwestTransport` is the
//! default and tests substitute their own. Token storage, retries and the
//! OAuth callback server are left to the caller.

pub mod auth_url;
pub mod client;
pub mod constants;
pub mod error;
pub mod response;
pub mod transport;

pub use auth_url::{AuthorizationRequest, build_authorization_url};
pub use client::{AccessToken, ClientCredentials, NotifyClient, exchange_code, send_message};
pub use constants::*;
pub use error::{Error, Result, TransportError};
pub use response::{AccessTokenResponse, ApiResponse, ApiResult};
pub use transport::{FormRequest, HttpResponse, ReqwestTransport, Transport};
