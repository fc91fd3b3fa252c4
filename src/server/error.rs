//
//  bitbucket-proxy
//  server/error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! HTTP error type for the proxy routes.
//!
//! Every failure is rendered as `{"detail": "<message>"}`:
//!
//! | Variant | Status |
//! |---------|--------|
//! | `MissingToken` | 400 |
//! | `InvalidQuery` | 422 |
//! | `Upstream` | upstream status, or 500 when no response was received |

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::api::ApiError;
use crate::auth::TOKEN_HEADER;

/// Error returned by proxy route handlers.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// The caller did not send a Bitbucket token.
    #[error("Missing X-BitBucket-Token header")]
    MissingToken,

    /// A query parameter was missing or could not be parsed.
    #[error("{0}")]
    InvalidQuery(String),

    /// The upstream call failed.
    ///
    /// `action` names what the route was doing, e.g. `fetching user`.
    #[error("Error {action}: {source}")]
    Upstream {
        /// Gerund phrase used in the message.
        action: &'static str,
        /// The underlying upstream failure.
        source: ApiError,
    },
}

impl ProxyError {
    /// Wraps an upstream failure with the route's action.
    pub fn upstream(action: &'static str, source: ApiError) -> Self {
        Self::Upstream { action, source }
    }

    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingToken => StatusCode::BAD_REQUEST,
            Self::InvalidQuery(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Upstream { source, .. } => {
                source.status().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    fn log(&self) {
        match self {
            Self::MissingToken => {
                tracing::debug!(header = TOKEN_HEADER, "rejected request without token");
            }
            Self::InvalidQuery(msg) => tracing::debug!(%msg, "rejected invalid query"),
            Self::Upstream { action, source } => match source.status() {
                Some(status) => {
                    tracing::warn!(%action, %status, error = %source, "upstream call failed");
                }
                None => {
                    tracing::error!(%action, error = %source, "upstream call produced no response");
                }
            },
        }
    }
}

impl From<QueryRejection> for ProxyError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidQuery(rejection.body_text())
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status();
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt as _;
    use reqwest::StatusCode as UpstreamStatus;

    async fn extract_error_body(err: ProxyError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn test_missing_token() {
        let (status, body) = extract_error_body(ProxyError::MissingToken).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Missing X-BitBucket-Token header");
    }

    #[tokio::test]
    async fn test_invalid_query() {
        let (status, body) =
            extract_error_body(ProxyError::InvalidQuery("bad page".to_string())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"], "bad page");
    }

    #[tokio::test]
    async fn test_upstream_status_is_mirrored() {
        let err = ProxyError::upstream(
            "fetching user",
            ApiError::Status {
                status: UpstreamStatus::UNAUTHORIZED,
                message: "Access token expired".to_string(),
            },
        );
        let (status, body) = extract_error_body(err).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body["detail"],
            "Error fetching user: 401 Unauthorized: Access token expired"
        );
    }

    #[tokio::test]
    async fn test_upstream_without_response_is_500() {
        let err = ProxyError::upstream(
            "fetching workspaces",
            ApiError::Decode("missing field `values`".to_string()),
        );
        let (status, body) = extract_error_body(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["detail"],
            "Error fetching workspaces: Invalid response: missing field `values`"
        );
    }
}
