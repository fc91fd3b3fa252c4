//
//  bitbucket-proxy
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the Bitbucket API
//!
//! This module provides the outbound HTTP client used by every proxy route.
//!
//! ## Features
//!
//! - Configurable base URL (Bitbucket Cloud by default)
//! - Per-request credential injection
//! - Percent-encoded resource paths
//! - Bitbucket error-message extraction
//! - Optional timeout and custom User-Agent

use anyhow::{bail, Context, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::common::ApiError;
use crate::auth::AuthCredential;
use crate::config::UpstreamConfig;

/// Parses a Bitbucket API error response into an [`ApiError::Status`].
///
/// Bitbucket Cloud returns errors in the format:
/// ```json
/// {"type": "error", "error": {"message": "Human readable message"}}
/// ```
///
/// Some endpoints use `{"error": {"detail": "..."}}`, a list of errors
/// (`{"errors": [{"message": "..."}]}`) or a bare `{"message": "..."}`.
/// If none of these match, the raw body is used, and an empty body falls back
/// to the status' canonical reason.
///
/// # Example
///
/// ```rust
/// use bitbucket_proxy::api::client::format_api_error;
/// use reqwest::StatusCode;
///
/// let body = r#"{"type": "error", "error": {"message": "Access token expired"}}"#;
/// let err = format_api_error(StatusCode::UNAUTHORIZED, body);
/// assert_eq!(err.to_string(), "401 Unauthorized: Access token expired");
/// ```
pub fn format_api_error(status: StatusCode, body: &str) -> ApiError {
    let message = extract_error_message(body).unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            status.canonical_reason().unwrap_or("Unknown error").to_string()
        } else {
            trimmed.to_string()
        }
    });

    ApiError::Status { status, message }
}

fn extract_error_message(body: &str) -> Option<String> {
    let json = serde_json::from_str::<serde_json::Value>(body).ok()?;

    // Cloud format: {"type": "error", "error": {"message": "..."}}
    json.get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        // Alternative Cloud format: {"error": {"detail": "..."}}
        .or_else(|| {
            json.get("error")
                .and_then(|e| e.get("detail"))
                .and_then(|m| m.as_str())
        })
        // List format: {"errors": [{"message": "..."}]}
        .or_else(|| {
            json.get("errors")
                .and_then(|e| e.as_array())
                .and_then(|arr| arr.first())
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
        })
        // Simple message format: {"message": "..."}
        .or_else(|| json.get("message").and_then(|m| m.as_str()))
        .map(str::to_string)
}

/// The outbound HTTP client for the Bitbucket API.
///
/// One client is built at startup and shared by all requests; cloning is
/// cheap because the underlying `reqwest::Client` is reference-counted. Each
/// request attaches the caller's credential with [`with_auth`](Self::with_auth)
/// on its own clone.
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_proxy::api::BitbucketClient;
/// use bitbucket_proxy::auth::AuthCredential;
/// use bitbucket_proxy::config::UpstreamConfig;
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = BitbucketClient::from_config(&UpstreamConfig::default())?
///     .with_auth(AuthCredential::bearer("your-token"));
///
/// let user: serde_json::Value = client.get(&["user"], &[]).await?;
/// println!("{}", user["display_name"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BitbucketClient {
    /// The underlying HTTP client
    http: Client,
    /// Root of the REST API, e.g. `https://api.bitbucket.org/2.0`
    base_url: Url,
    /// Credential for the current request
    auth: Option<AuthCredential>,
}

impl BitbucketClient {
    /// Creates a client from the upstream configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute base URL or the
    /// HTTP client cannot be built.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bitbucket_proxy::api::BitbucketClient;
    /// use bitbucket_proxy::config::UpstreamConfig;
    ///
    /// let config = UpstreamConfig {
    ///     base_url: "https://bitbucket-mirror.internal/2.0".to_string(),
    ///     timeout_secs: Some(10),
    ///     user_agent: None,
    /// };
    ///
    /// let client = BitbucketClient::from_config(&config)?;
    /// assert_eq!(
    ///     client.endpoint(&["user"])?.as_str(),
    ///     "https://bitbucket-mirror.internal/2.0/user"
    /// );
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn from_config(config: &UpstreamConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid upstream base URL '{}'", config.base_url))?;
        if base_url.cannot_be_a_base() {
            bail!("Invalid upstream base URL '{}'", config.base_url);
        }

        let mut builder = Client::builder().user_agent(config.user_agent());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
            auth: None,
        })
    }

    /// Sets the credential for this client.
    pub fn with_auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Builds the URL of a resource below the base URL.
    ///
    /// Each segment is percent-encoded as a single path segment, so a
    /// workspace identifier can never introduce extra path components.
    ///
    /// ```rust
    /// use bitbucket_proxy::api::BitbucketClient;
    /// use bitbucket_proxy::config::UpstreamConfig;
    ///
    /// let client = BitbucketClient::from_config(&UpstreamConfig::default())?;
    /// let url = client.endpoint(&["repositories", "my team"])?;
    /// assert_eq!(url.as_str(), "https://api.bitbucket.org/2.0/repositories/my%20team");
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(url::ParseError::RelativeUrlWithoutBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Makes an HTTP GET request and decodes the JSON response.
    ///
    /// `query` pairs are appended to the URL in order. The credential set
    /// with [`with_auth`](Self::with_auth) is applied if present.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Status`] if Bitbucket answers with a non-2xx status
    /// - [`ApiError::Network`] if no response is received (including timeouts)
    /// - [`ApiError::Decode`] if a 2xx body cannot be decoded into `T`
    pub async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        let mut request = self.http.get(url.clone());

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(auth) = &self.auth {
            request = auth.apply_to_request(request);
        }

        tracing::debug!(url = %url, "sending upstream request");
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(url = %url, status = %status, "upstream responded");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(format_api_error(status, &text));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cloud_error() {
        let err = format_api_error(
            StatusCode::NOT_FOUND,
            r#"{"type": "error", "error": {"message": "Repository not found"}}"#,
        );
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.to_string(), "404 Not Found: Repository not found");
    }

    #[test]
    fn test_format_detail_and_list_errors() {
        let detail = format_api_error(
            StatusCode::BAD_REQUEST,
            r#"{"error": {"detail": "bad sort field"}}"#,
        );
        assert_eq!(detail.to_string(), "400 Bad Request: bad sort field");

        let list = format_api_error(
            StatusCode::FORBIDDEN,
            r#"{"errors": [{"message": "no access"}]}"#,
        );
        assert_eq!(list.to_string(), "403 Forbidden: no access");
    }

    #[test]
    fn test_format_raw_and_empty_bodies() {
        let raw = format_api_error(StatusCode::BAD_GATEWAY, "upstream exploded");
        assert_eq!(raw.to_string(), "502 Bad Gateway: upstream exploded");

        let empty = format_api_error(StatusCode::TOO_MANY_REQUESTS, "");
        assert_eq!(empty.to_string(), "429 Too Many Requests: Too Many Requests");
    }

    fn default_client() -> BitbucketClient {
        BitbucketClient::from_config(&UpstreamConfig::default()).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let client = default_client();
        assert_eq!(
            client.endpoint(&["user", "repositories"]).unwrap().as_str(),
            "https://api.bitbucket.org/2.0/user/repositories"
        );
    }

    #[test]
    fn test_endpoint_with_trailing_slash_and_bare_host() {
        let trailing = BitbucketClient::from_config(&UpstreamConfig {
            base_url: "https://example.com/2.0/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            trailing.endpoint(&["workspaces"]).unwrap().as_str(),
            "https://example.com/2.0/workspaces"
        );

        let bare = BitbucketClient::from_config(&UpstreamConfig {
            base_url: "http://127.0.0.1:1234".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            bare.endpoint(&["user"]).unwrap().as_str(),
            "http://127.0.0.1:1234/user"
        );
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = default_client();
        assert_eq!(
            client.endpoint(&["repositories", "a/b"]).unwrap().as_str(),
            "https://api.bitbucket.org/2.0/repositories/a%2Fb"
        );
    }

    #[test]
    fn test_from_config_rejects_bad_url() {
        let config = UpstreamConfig {
            base_url: "mailto:nobody".to_string(),
            ..Default::default()
        };
        assert!(BitbucketClient::from_config(&config).is_err());
    }
}
