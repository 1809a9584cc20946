//
//  ship-cli
//  api/resources/milestones.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Milestone queries.
//!
//! A milestone is active when now lies between its `StartDate` and `EndDate`;
//! a missing bound is open. Milestones may belong to a component, in which
//! case they apply to that component's whole subtree.

use serde_json::Value;

use crate::api::client::ShipClient;
use crate::api::common::{ApiError, EntityRef, Result};
use crate::api::predicate;

/// The component subtree an active-milestone query is restricted to.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentScope {
    /// A component document as returned by the server.
    ///
    /// Must carry `identifier` and `fullName`.
    Component(Value),
    /// A component identifier, resolved with a lookup first.
    Identifier(String),
}

impl From<Value> for ComponentScope {
    fn from(component: Value) -> Self {
        Self::Component(component)
    }
}

impl From<&str> for ComponentScope {
    fn from(identifier: &str) -> Self {
        Self::Identifier(identifier.to_string())
    }
}

impl From<String> for ComponentScope {
    fn from(identifier: String) -> Self {
        Self::Identifier(identifier)
    }
}

impl ShipClient {
    /// Returns the milestones, optionally filtered by a predicate.
    pub async fn milestones(&self, predicate: Option<&str>) -> Result<Vec<Value>> {
        self.list("milestones", predicate).await
    }

    /// Returns the currently active milestones.
    ///
    /// With a scope, only milestones without a component or whose component
    /// is the scope component or one of its ancestors are returned. A scope
    /// given by identifier is resolved with one extra request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if a scope identifier matches no
    /// component, and [`ApiError::MissingField`] if the scope component has
    /// no `fullName`.
    pub async fn milestones_active(&self, within: Option<ComponentScope>) -> Result<Vec<Value>> {
        let filter = match within {
            None => predicate::ACTIVE_MILESTONES.to_string(),
            Some(scope) => {
                let component = self.resolve_scope(scope).await?;
                let full_name = component
                    .get("fullName")
                    .and_then(Value::as_str)
                    .ok_or(ApiError::MissingField("fullName"))?;
                predicate::active_milestones_within(full_name)
            }
        };
        self.milestones(Some(filter.as_str())).await
    }

    async fn resolve_scope(&self, scope: ComponentScope) -> Result<Value> {
        match scope {
            ComponentScope::Component(component) => {
                // Reject documents without an identifier up front.
                component.entity_id()?;
                Ok(component)
            }
            ComponentScope::Identifier(id) => self
                .components(Some(predicate::component_by_id(&id).as_str()))
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| ApiError::NotFound(format!("component '{}'", id))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scope_conversions() {
        assert_eq!(
            ComponentScope::from("c1"),
            ComponentScope::Identifier("c1".to_string())
        );
        let doc = json!({ "identifier": "c1", "fullName": "Ship" });
        assert_eq!(
            ComponentScope::from(doc.clone()),
            ComponentScope::Component(doc)
        );
    }
}
