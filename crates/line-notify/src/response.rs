//! Wire response shapes and decoding
//!
//! LINE Notify answers every call with a JSON envelope `{status, message}`;
//! the token endpoint adds `access_token` on success. Which shape to expect is
//! decided by the HTTP status, then a single generic routine deserializes the
//! body into that shape.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::transport::HttpResponse;

/// Envelope returned by every LINE Notify endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiResult {
    /// Mirrors the HTTP status; absent in some error bodies
    #[serde(default, deserialize_with = "status_code")]
    pub status: u16,
    pub message: String,
}

/// Successful token endpoint body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AccessTokenResponse {
    #[serde(flatten)]
    pub result: ApiResult,
    pub access_token: String,
}

/// A decoded response: the expected payload or the API's error envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse<T> {
    Success(T),
    Failure { http_status: u16, result: ApiResult },
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Decode a response whose success body carries a `T`.
    pub fn decode(response: &HttpResponse) -> Result<Self> {
        if response.is_success() {
            parse_body(response).map(ApiResponse::Success)
        } else {
            Self::failure(response)
        }
    }
}

impl ApiResponse<()> {
    /// Decode a response whose success body is irrelevant (may even be empty).
    pub fn acknowledge(response: &HttpResponse) -> Result<Self> {
        if response.is_success() {
            Ok(ApiResponse::Success(()))
        } else {
            Self::failure(response)
        }
    }
}

impl<T> ApiResponse<T> {
    fn failure(response: &HttpResponse) -> Result<Self> {
        parse_body(response).map(|result| ApiResponse::Failure {
            http_status: response.status,
            result,
        })
    }

    /// Collapse into the payload or an [`Error::Api`].
    pub fn into_result(self) -> Result<T> {
        match self {
            ApiResponse::Success(value) => Ok(value),
            ApiResponse::Failure {
                http_status,
                result,
            } => Err(Error::Api {
                status: http_status,
                message: result.message,
            }),
        }
    }
}

/// Deserialize a response body into the requested shape.
pub fn parse_body<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    serde_json::from_str(&response.body).map_err(|source| Error::MalformedResponse {
        status: response.status,
        source,
    })
}

/// LINE documents `status` as a number; accept a numeric string as well.
fn status_code<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u16, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Status {
        Number(u16),
        Text(String),
    }

    match Status::deserialize(deserializer)? {
        Status::Number(n) => Ok(n),
        Status::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn token_response_deserializes() {
        let json = r#"{"status":200,"message":"access_token is issued","access_token":"tok123"}"#;
        let token: AccessTokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "tok123");
        assert_eq!(token.result.status, 200);
        assert_eq!(token.result.message, "access_token is issued");
    }

    #[test]
    fn status_accepts_numeric_string() {
        let result: ApiResult =
            serde_json::from_str(r#"{"status":"401","message":"Invalid access token"}"#).unwrap();
        assert_eq!(result.status, 401);
    }

    #[test]
    fn error_body_without_status_is_api_error() {
        let decoded = ApiResponse::<AccessTokenResponse>::decode(&response(
            400,
            r#"{"message":"invalid_grant"}"#,
        ))
        .unwrap();
        match decoded.into_result() {
            Err(Error::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "invalid_grant");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn status_rejects_non_numeric_string() {
        let parsed = serde_json::from_str::<ApiResult>(r#"{"status":"bad","message":"x"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn success_decodes_payload() {
        let decoded = ApiResponse::<AccessTokenResponse>::decode(&response(
            200,
            r#"{"status":200,"message":"ok","access_token":"tok123"}"#,
        ))
        .unwrap();
        let token = decoded.into_result().unwrap();
        assert_eq!(token.access_token, "tok123");
    }

    #[test]
    fn failure_becomes_api_error() {
        let decoded = ApiResponse::<AccessTokenResponse>::decode(&response(
            400,
            r#"{"status":400,"message":"invalid_grant"}"#,
        ))
        .unwrap();
        assert!(matches!(decoded, ApiResponse::Failure { http_status: 400, .. }));

        match decoded.into_result() {
            Err(Error::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "invalid_grant");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn success_missing_token_is_malformed() {
        let err = ApiResponse::<AccessTokenResponse>::decode(&response(
            200,
            r#"{"status":200,"message":"ok"}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { status: 200, .. }));
    }

    #[test]
    fn unparseable_error_body_is_malformed() {
        let err = ApiResponse::<AccessTokenResponse>::decode(&response(
            502,
            "<html>Bad Gateway</html>",
        ))
        .unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { status: 502, .. }));
    }

    #[test]
    fn acknowledge_ignores_success_body() {
        let decoded = ApiResponse::<()>::acknowledge(&response(200, "")).unwrap();
        assert_eq!(decoded, ApiResponse::Success(()));
    }

    #[test]
    fn acknowledge_still_parses_failures() {
        let decoded = ApiResponse::<()>::acknowledge(&response(
            401,
            r#"{"status":401,"message":"Invalid access token"}"#,
        ))
        .unwrap();
        let err = decoded.into_result().unwrap_err();
        assert_eq!(err.api_message(), Some("Invalid access token"));
    }
}
