//
//  bitbucket-proxy
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! Shared types used by the upstream client and the Cloud resource modules.
//!
//! - [`ApiError`] - Error type for every upstream call
//! - [`PaginatedResponse`] - Bitbucket Cloud list envelope
//!
//! # Example
//!
//! ```rust
//! use bitbucket_proxy::api::common::ApiError;
//! use reqwest::StatusCode;
//!
//! let err = ApiError::Status {
//!     status: StatusCode::NOT_FOUND,
//!     message: "Repository not found".to_string(),
//! };
//!
//! assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
//! assert_eq!(err.to_string(), "404 Not Found: Repository not found");
//! ```

use reqwest::StatusCode;
use thiserror::Error;

mod pagination;

pub use pagination::*;

/// Error type for a single upstream Bitbucket call.
///
/// The proxy does not classify upstream failures (401, 429 and 500 are all
/// handled the same way); it only needs to know whether Bitbucket answered
/// and with which status. See [`ApiError::status`].
///
/// | Variant | Upstream answered? |
/// |---------|--------------------|
/// | `Status` | yes, with a non-2xx status |
/// | `Network` | no (connect, DNS, TLS, timeout), or the body could not be read |
/// | `Decode` | yes, with a 2xx status but an unusable body |
/// | `InvalidUrl` | the request was never sent |
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bitbucket answered with a non-success status.
    ///
    /// `message` is Bitbucket's own error text when one could be extracted,
    /// otherwise the raw response body.
    #[error("{status}: {message}")]
    Status {
        /// Upstream HTTP status.
        status: StatusCode,
        /// Human-readable failure description.
        message: String,
    },

    /// A transport-level failure, including timeouts.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A successful response whose body did not have the expected shape.
    #[error("Invalid response: {0}")]
    Decode(String),

    /// The request URL could not be built from the configured base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Returns the upstream status code, if Bitbucket produced a response.
    ///
    /// `None` means no status line was ever received, e.g. the connection was
    /// refused or the call timed out.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(err) => err.status(),
            Self::Decode(_) | Self::InvalidUrl(_) => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
