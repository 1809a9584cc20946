//
//  ship-cli
//  api/resources/workflow.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Workflow states and the flat lookup lists (classifications, priorities).
//!
//! The state graph lives on the server: each state lists the states it can be
//! entered from in `PreviousStates`. The client only queries it; whether a
//! transition is legal is decided by the server when a problem is updated.

use serde_json::Value;

use crate::api::client::ShipClient;
use crate::api::common::{EntityRef, Result};
use crate::api::predicate;

impl ShipClient {
    /// Returns the allowed problem classifications.
    pub async fn classifications(&self) -> Result<Vec<Value>> {
        self.get_list("classifications", &[]).await
    }

    /// Returns the priorities.
    pub async fn priorities(&self) -> Result<Vec<Value>> {
        self.get_list("priorities", &[]).await
    }

    /// Returns the workflow states, optionally filtered by a predicate.
    pub async fn states(&self, predicate: Option<&str>) -> Result<Vec<Value>> {
        self.list("states", predicate).await
    }

    /// Returns all start states.
    pub async fn states_initial(&self) -> Result<Vec<Value>> {
        self.states(Some(predicate::INITIAL_STATES)).await
    }

    /// Returns the first start state, if the workflow has one.
    pub async fn state_initial(&self) -> Result<Option<Value>> {
        Ok(self.states_initial().await?.into_iter().next())
    }

    /// Returns the states a problem in `state` may move to.
    ///
    /// `state` may be a state document or its identifier.
    pub async fn state_transitions<S: EntityRef + ?Sized>(&self, state: &S) -> Result<Vec<Value>> {
        let id = state.entity_id()?;
        self.states(Some(predicate::state_transitions(&id).as_str())).await
    }
}
