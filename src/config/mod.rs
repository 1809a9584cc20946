//
//  ship-cli
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Management
//!
//! Persistent settings for the `ship` CLI, stored as TOML in a
//! platform-specific location:
//!
//! - Linux: `~/.config/ship/config.toml`
//! - macOS: `~/Library/Application Support/ship/config.toml`
//! - Windows: `%APPDATA%\ship\config\config.toml`
//!
//! Setting `SHIP_CONFIG_DIR` overrides the directory.
//!
//! ## File Format
//!
//! ```toml
//! [core]
//! server = "https://api.realartists.com"
//! dry_run = false
//! output = "table"
//! ```
//!
//! The API token is deliberately not a configuration key; it comes from
//! `--token` or `SHIP_API_TOKEN`.
//!
//! ## Precedence
//!
//! Command-line flag, then environment variable, then this file, then the
//! built-in default.

mod file;

pub use file::*;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::client::validate_server_url;

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "SHIP_CONFIG_DIR";

/// Keys accepted by [`Config::get`], [`Config::set`] and [`Config::unset`].
pub const VALID_KEYS: &[&str] = &["server", "dry_run", "output"];

/// Root configuration document.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Core settings.
    #[serde(default)]
    pub core: CoreConfig,
}

/// Core settings shared by every command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoreConfig {
    /// Ship server base URL; the built-in default is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,

    /// Suppress mutating requests by default.
    #[serde(default)]
    pub dry_run: bool,

    /// Default output format: `table` or `json`.
    #[serde(default = "default_output")]
    pub output: String,
}

fn default_output() -> String {
    "table".to_string()
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            server: None,
            dry_run: false,
            output: default_output(),
        }
    }
}

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        if config_exists(path) {
            let content = read_config_file(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Returns the path of the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir).join("config.toml"));
        }
        let dirs = ProjectDirs::from("", "", "ship")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns the value of `key` as a string, if set.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "server" => self.core.server.clone(),
            "dry_run" => Some(self.core.dry_run.to_string()),
            "output" => Some(self.core.output.clone()),
            _ => None,
        }
    }

    /// Sets `key` to `value`, validating the value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "server" => {
                let server = validate_server_url(value)?;
                self.core.server = Some(server);
            }
            "dry_run" => {
                self.core.dry_run = match value {
                    "true" | "yes" | "1" => true,
                    "false" | "no" | "0" => false,
                    _ => bail!("dry_run must be true or false, got '{}'", value),
                };
            }
            "output" => {
                if value != "table" && value != "json" {
                    bail!("output must be 'table' or 'json', got '{}'", value);
                }
                self.core.output = value.to_string();
            }
            _ => bail!(
                "Unknown config key '{}'. Valid keys: {}",
                key,
                VALID_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Restores `key` to its default.
    pub fn unset(&mut self, key: &str) -> Result<()> {
        let defaults = CoreConfig::default();
        match key {
            "server" => self.core.server = defaults.server,
            "dry_run" => self.core.dry_run = defaults.dry_run,
            "output" => self.core.output = defaults.output,
            _ => bail!(
                "Unknown config key '{}'. Valid keys: {}",
                key,
                VALID_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Returns `(key, value)` pairs for every key that has a value.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        VALID_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }
}
