//
//  bitbucket-proxy
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Proxy Library
//!
//! A thin authenticated HTTP proxy in front of the Bitbucket Cloud REST API.
//!
//! ## Overview
//!
//! Client applications that hold a Bitbucket access token but cannot (or
//! should not) talk to Bitbucket directly call this proxy instead. Each request
//! carries the token in the `X-BitBucket-Token` header; the proxy forwards it
//! as `Authorization: Bearer <token>`, makes exactly one upstream call and
//! relays the JSON response.
//!
//! ## Features
//!
//! - **Repository listing**: per user or per workspace, with paging and sort
//! - **Repository search**: name matching via Bitbucket's filter language
//! - **Current user**: relayed verbatim
//! - **Workspaces**: reduced to a list of slugs
//! - **Uniform errors**: `{"detail": "..."}` mirroring the upstream status
//!
//! ## Module Structure
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`server`]: axum router, handlers and HTTP error mapping
//! - [`api`]: HTTP client for the Bitbucket Cloud API
//! - [`auth`]: Per-request credential handling
//! - [`config`]: Configuration file management
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bitbucket_proxy::config::Config;
//! use bitbucket_proxy::server::{self, AppState};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let state = AppState::from_config(&config.upstream)?;
//! let listener = tokio::net::TcpListener::bind(config.server.listen_addr()).await?;
//! server::serve(listener, state).await?;
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
pub mod cli;

/// Inbound HTTP surface.
///
/// Routes under `/api/bitbucket`, the token extractor, and the
/// `{"detail": ...}` error responses.
pub mod server;

/// Outbound client for the Bitbucket Cloud API v2.0.
///
/// The client handles credential injection, URL building and error mapping.
pub mod api;

/// Per-request credential handling.
pub mod auth;

/// Configuration file management.
///
/// Manages the proxy's configuration stored in platform-specific locations:
/// - Linux: `~/.config/bb-proxy/config.toml`
/// - macOS: `~/Library/Application Support/bb-proxy/config.toml`
/// - Windows: `%APPDATA%\bb-proxy\config.toml`
pub mod config;

pub use cli::Cli;
pub use config::Config;

/// Application name constant.
///
/// Used for the default User-Agent and the configuration directory.
pub const APP_NAME: &str = "bb-proxy";

/// Application version constant, taken from Cargo.toml at compile time.
///
/// ```rust
/// use bitbucket_proxy::VERSION;
///
/// println!("bb-proxy version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the binary.
///
/// ```rust,no_run
/// use bitbucket_proxy::exit_codes;
/// use std::process;
///
/// process::exit(exit_codes::ERROR);
/// ```
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error, e.g. an unreadable config file or a port already in use.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;
}
