//
//  bitbucket-proxy
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration File I/O
//!
//! Low-level file operations used by [`Config`](super::Config) to read and
//! write `config.toml`.
//!
//! ## Notes
//!
//! - Write operations create missing parent directories
//! - Errors carry the offending path as context

use std::path::Path;

use anyhow::{Context, Result};

/// Reads the contents of a configuration file.
///
/// # Errors
///
/// Returns an error if the file does not exist, cannot be opened, or is not
/// valid UTF-8.
pub fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))
}

/// Writes content to a configuration file, creating parent directories.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::Path;
/// use bitbucket_proxy::config::write_config_file;
///
/// write_config_file(Path::new("/tmp/bb-proxy/config.toml"), "[server]\nport = 9000\n")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn write_config_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file {}", path.display()))
}

/// Checks whether a configuration file exists.
pub fn config_exists(path: &Path) -> bool {
    path.is_file()
}
