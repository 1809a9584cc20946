//
//  ship-cli
//  api/resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Ship API resources.
//!
//! Each submodule adds the operations for one family of endpoints to
//! [`ShipClient`](crate::api::ShipClient), along with the request types those
//! operations build.
//!
//! - [`users`] - Users, the authenticated user, active users
//! - [`components`] - Component tree queries
//! - [`milestones`] - Milestones and active-milestone queries
//! - [`workflow`] - States, transitions, classifications, priorities
//! - [`problems`] - Problems, keywords, relationships, comments, watchers

pub mod components;
pub mod milestones;
pub mod problems;
pub mod users;
pub mod workflow;

pub use milestones::ComponentScope;
pub use problems::{ParseRelationTypeError, RelationType, Relationship, SearchQuery, Watcher};
