//
//  ship-cli
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the client for the Ship issue tracker's REST
//! scripting API.
//!
//! ## Architecture
//!
//! - [`client`]: Core HTTP client with authentication, request handling and
//!   the write policy used for dry runs
//! - [`resources`]: One module per family of endpoints
//! - [`predicate`]: Templates for the predicates the convenience queries build
//! - [`common`]: Shared error type and entity references
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ship_cli::api::ShipClient;
//!
//! # async fn example() -> ship_cli::api::Result<()> {
//! let client = ShipClient::new(None, None)?;
//!
//! for user in client.users_active().await? {
//!     println!("{}", user["name"]);
//! }
//!
//! let problem = client.problem(1).await?;
//! println!("{}", problem["title"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation makes a single attempt. Any non-2xx response becomes
//! [`ApiError::Status`]; transport failures become [`ApiError::Network`].
//! Nothing is retried.

/// Core HTTP client wrapper for the Ship API.
pub mod client;

/// Shared error type and entity references.
pub mod common;

/// Predicate templates for the search endpoints.
pub mod predicate;

/// Operations grouped by resource.
pub mod resources;

pub use client::{ShipClient, WritePolicy, API_VERSION, DEFAULT_SERVER};
pub use common::{ApiError, EntityRef, Result};
pub use resources::{ComponentScope, RelationType, Relationship, SearchQuery, Watcher};
