//
//  bitbucket-proxy
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! The proxy never owns credentials. Each inbound request carries a Bitbucket
//! access token in the [`TOKEN_HEADER`] header, and that token is forwarded
//! verbatim to Bitbucket as a bearer token.
//!
//! ## Overview
//!
//! - [`AuthCredential`]: the per-request credential and how it is applied to
//!   an outbound `reqwest` request
//! - [`token_from_headers`]: extracts the credential from inbound headers
//!
//! ## Example
//!
//! ```rust
//! use axum::http::HeaderMap;
//! use bitbucket_proxy::auth::token_from_headers;
//!
//! let mut headers = HeaderMap::new();
//! headers.insert("x-bitbucket-token", "my-token".parse().unwrap());
//!
//! let credential = token_from_headers(&headers).expect("token present");
//! assert_eq!(credential.token(), b"my-token");
//! ```
//!
//! ## Notes
//!
//! - Tokens are not decoded, validated, refreshed or cached.
//! - Tokens must never be written to logs.

use std::fmt;

use axum::http::HeaderMap;
use reqwest::RequestBuilder;

/// Name of the inbound header carrying the caller's Bitbucket token.
///
/// Header lookup is case-insensitive, so `x-bitbucket-token` matches too.
pub const TOKEN_HEADER: &str = "X-BitBucket-Token";

/// Authentication credential forwarded to Bitbucket.
///
/// Only bearer tokens are supported: the proxy relays whatever access token
/// the caller obtained (OAuth access token, workspace/repository access token)
/// without interpreting it.
///
/// The token is kept as raw header bytes. A value that is not valid UTF-8 is
/// still forwarded and Bitbucket decides whether it is acceptable.
///
/// The `Debug` implementation redacts the token.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthCredential {
    /// An opaque bearer token, sent as `Authorization: Bearer <token>`.
    Bearer {
        /// The raw token bytes exactly as received from the caller.
        token: Vec<u8>,
    },
}

impl AuthCredential {
    /// Creates a bearer credential from a raw token.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bitbucket_proxy::auth::AuthCredential;
    ///
    /// let credential = AuthCredential::bearer("abc123");
    /// assert_eq!(credential.authorization_value(), b"Bearer abc123");
    /// ```
    pub fn bearer(token: impl Into<Vec<u8>>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Returns the raw token bytes.
    pub fn token(&self) -> &[u8] {
        match self {
            Self::Bearer { token } => token,
        }
    }

    /// Returns the value of the outbound `Authorization` header.
    pub fn authorization_value(&self) -> Vec<u8> {
        match self {
            Self::Bearer { token } => [b"Bearer ".as_slice(), token.as_slice()].concat(),
        }
    }

    /// Applies the credential to an outbound request.
    ///
    /// Adds `Authorization: Bearer <token>` and `Accept: application/json`,
    /// the two headers every Bitbucket call made by the proxy carries.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use bitbucket_proxy::auth::AuthCredential;
    /// use reqwest::Client;
    ///
    /// async fn fetch_user(credential: &AuthCredential) {
    ///     let client = Client::new();
    ///     let request = client.get("https://api.bitbucket.org/2.0/user");
    ///     let response = credential.apply_to_request(request).send().await;
    /// }
    /// ```
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(reqwest::header::AUTHORIZATION, self.authorization_value())
            .header(reqwest::header::ACCEPT, "application/json")
    }
}

impl fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer { .. } => f
                .debug_struct("Bearer")
                .field("token", &"<redacted>")
                .finish(),
        }
    }
}

/// Extracts the caller's credential from inbound request headers.
///
/// Returns `None` when the [`TOKEN_HEADER`] header is absent or empty. Any
/// other value is taken byte for byte. The caller decides how to reject the
/// request.
pub fn token_from_headers(headers: &HeaderMap) -> Option<AuthCredential> {
    headers
        .get(TOKEN_HEADER)
        .map(|value| value.as_bytes())
        .filter(|token| !token.is_empty())
        .map(AuthCredential::bearer)
}
