//
//  ship-cli
//  api/resources/components.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Component queries.
//!
//! Components form a tree. Each component document carries an `identifier`,
//! a `fullName` (the slash-separated path from the root) and `parent` /
//! `children` references, which the parent and children helpers search on.

use serde_json::Value;

use crate::api::client::ShipClient;
use crate::api::common::{EntityRef, Result};
use crate::api::predicate;

impl ShipClient {
    /// Returns the components, optionally filtered by a predicate.
    pub async fn components(&self, predicate: Option<&str>) -> Result<Vec<Value>> {
        self.list("components", predicate).await
    }

    /// Returns the parent of `component`, or `None` for a root component.
    ///
    /// `component` may be a component document or its identifier.
    pub async fn component_parent<C: EntityRef + ?Sized>(
        &self,
        component: &C,
    ) -> Result<Option<Value>> {
        let id = component.entity_id()?;
        let parents = self
            .components(Some(predicate::component_parent(&id).as_str()))
            .await?;
        Ok(parents.into_iter().next())
    }

    /// Returns the immediate children of `component`.
    pub async fn component_children<C: EntityRef + ?Sized>(
        &self,
        component: &C,
    ) -> Result<Vec<Value>> {
        let id = component.entity_id()?;
        self.components(Some(predicate::component_children(&id).as_str()))
            .await
    }
}
