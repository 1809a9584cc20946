//
//  ship-cli
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Ship CLI Library
//!
//! A client library and command-line interface for the Ship issue tracker's
//! REST scripting API.
//!
//! ## Overview
//!
//! The library wraps each Ship endpoint in one method on
//! [`ShipClient`](api::ShipClient). Responses are returned as
//! `serde_json::Value` documents exactly as the server sent them; the client
//! keeps no state about them between calls.
//!
//! ## Features
//!
//! - **Read**: users, components, milestones, classifications, priorities,
//!   workflow states, problems and their sub-resources
//! - **Search**: pass-through predicates and saved queries
//! - **Write**: create and update problems, set keywords, link problems,
//!   append comments, add watchers
//! - **Dry run**: log every write instead of sending it
//!
//! ## Module Structure
//!
//! - [`api`]: HTTP client and per-resource operations
//! - [`auth`]: API token resolution
//! - [`config`]: Configuration file management
//! - [`cli`]: Command-line interface definitions using clap
//! - [`output`]: Table and JSON output
//! - [`util`]: Small helpers shared by the commands
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use ship_cli::api::{RelationType, ShipClient};
//!
//! # async fn example() -> ship_cli::api::Result<()> {
//! // Reads SHIP_API_TOKEN; writes are only logged
//! let client = ShipClient::new(None, None)?.with_dry_run(true);
//!
//! let initial = client.states_initial().await?;
//! client.problem_relationship_add(10, RelationType::DuplicateOf, 3).await?;
//! # Ok(())
//! # }
//! ```

/// API client and resource operations.
pub mod api;

/// API token resolution and validation.
pub mod auth;

/// Command-line interface definitions.
pub mod cli;

/// Configuration file management.
pub mod config;

/// Output formatting.
pub mod output;

/// Utility functions and helpers.
pub mod util;

pub use api::ShipClient;
pub use cli::Cli;
pub use config::Config;

/// Application name constant.
pub const APP_NAME: &str = "ship";

/// Application version constant, from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication and configuration issues
/// - `8-15`: Resource-related issues
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error; details are printed to stderr.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;

    /// Missing or unusable API token or configuration.
    pub const AUTH_ERROR: i32 = 4;

    /// The requested resource does not exist.
    pub const NOT_FOUND: i32 = 8;
}
