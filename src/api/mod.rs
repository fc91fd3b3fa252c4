//
//  bitbucket-proxy
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Upstream API Layer
//!
//! The outbound side of the proxy: an HTTP client for the Bitbucket Cloud
//! REST API v2.0 and the handful of read-only operations the proxy relays.
//!
//! ## Architecture
//!
//! - [`client`]: Core HTTP client with credential injection and error mapping
//! - [`cloud`]: The relayed Cloud operations (repositories, user, workspaces)
//! - [`common`]: Shared types (errors, pagination)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bitbucket_proxy::api::{cloud, BitbucketClient};
//! use bitbucket_proxy::auth::AuthCredential;
//! use bitbucket_proxy::config::UpstreamConfig;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = BitbucketClient::from_config(&UpstreamConfig::default())?
//!     .with_auth(AuthCredential::bearer("your-token"));
//!
//! let slugs = cloud::list_workspace_slugs(&client).await?;
//! println!("{}", slugs.join(", "));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every call returns [`ApiError`]. The proxy only distinguishes "Bitbucket
//! answered with status X" from "no answer at all", see [`ApiError::status`].

/// Core HTTP client wrapper for the Bitbucket API.
pub mod client;

/// Bitbucket Cloud API v2.0 operations.
pub mod cloud;

/// Common types shared by the client and the Cloud operations.
pub mod common;

pub use client::BitbucketClient;
pub use common::ApiError;
