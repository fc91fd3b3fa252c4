//
//  bitbucket-proxy
//  cli/serve.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Proxy server command
//!
//! Resolves the effective configuration (file, then environment and flags),
//! binds the listener and runs the router until Ctrl-C.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::server::{self, AppState, API_PREFIX};

use super::GlobalOptions;

/// Run the proxy server
#[derive(Args, Debug, Default)]
pub struct ServeCommand {
    /// Address to bind
    #[arg(long, env = "BB_PROXY_HOST")]
    pub host: Option<String>,

    /// Port to bind
    #[arg(long, short = 'p', env = "BB_PROXY_PORT")]
    pub port: Option<u16>,

    /// Bitbucket API base URL
    #[arg(long, env = "BB_PROXY_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Upstream request timeout in seconds (no timeout when unset)
    #[arg(long, env = "BB_PROXY_TIMEOUT", value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

impl ServeCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = self.resolve(Config::read_from(&global.config_path()?)?)?;

        let state = AppState::from_config(&config.upstream)?;
        let addr = config.server.listen_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        tracing::info!(
            addr = %addr,
            upstream = %config.upstream.base_url,
            timeout_secs = ?config.upstream.timeout_secs,
            "proxy listening"
        );

        if global.json {
            let result = serde_json::json!({
                "listening": format!("http://{}{}", addr, API_PREFIX),
                "upstream": config.upstream.base_url,
            });
            println!("{}", serde_json::to_string(&result)?);
        } else {
            println!(
                "{} Listening on {} (upstream {})",
                style("✓").green(),
                style(format!("http://{}{}", addr, API_PREFIX)).cyan(),
                config.upstream.base_url
            );
        }

        server::serve(listener, state).await
    }

    /// Applies command-line overrides on top of the loaded configuration.
    fn resolve(&self, mut config: Config) -> Result<Config> {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(api_url) = &self.api_url {
            config.upstream.base_url = api_url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.upstream.timeout_secs = Some(timeout);
        }

        config.validate()?;
        Ok(config)
    }
}
