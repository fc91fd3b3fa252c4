//
//  bitbucket-proxy
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod config;
mod serve;

pub use config::ConfigCommand;
pub use serve::ServeCommand;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;

/// Bitbucket proxy - Relay Bitbucket Cloud API calls for token-holding clients
#[derive(Parser, Debug)]
#[command(
    name = "bb-proxy",
    version,
    about = "Authenticated proxy for the Bitbucket Cloud REST API",
    long_about = "bb-proxy relays a small set of read-only Bitbucket Cloud endpoints.\n\n\
                  Callers send their own token in the X-BitBucket-Token header; the proxy \
                  forwards it as a bearer token and returns Bitbucket's JSON.",
    propagate_version = true,
    after_help = "Use 'bb-proxy <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Path to the configuration file
    #[arg(long, short = 'c', global = true, env = "BB_PROXY_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// Returns the configuration file in effect.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::config_path(),
        }
    }

    /// Loads the configuration file in effect.
    pub fn load_config(&self) -> Result<Config> {
        Config::load_from(&self.config_path()?)
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the proxy server
    #[command(visible_alias = "start")]
    Serve(ServeCommand),

    /// Manage proxy configuration
    Config(ConfigCommand),

    /// Print version information
    Version,
}
