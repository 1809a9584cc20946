//
//  ship-cli
//  api/resources/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! User queries.

use serde_json::Value;

use crate::api::client::ShipClient;
use crate::api::common::Result;
use crate::api::predicate;

impl ShipClient {
    /// Returns the users, optionally filtered by a predicate.
    ///
    /// `GET users`, or `GET users/search?predicate=...` when a predicate is
    /// given.
    pub async fn users(&self, predicate: Option<&str>) -> Result<Vec<Value>> {
        self.list("users", predicate).await
    }

    /// Returns the user the API token belongs to.
    ///
    /// The server answers with a list; it holds a single user for a valid
    /// token.
    pub async fn me(&self) -> Result<Vec<Value>> {
        self.users(Some(predicate::API_USER)).await
    }

    /// Returns the users in good standing with the organization.
    ///
    /// That is, users who have not left and have not been marked inactive by
    /// an admin.
    pub async fn users_active(&self) -> Result<Vec<Value>> {
        self.users(Some(predicate::ACTIVE_USERS)).await
    }
}
