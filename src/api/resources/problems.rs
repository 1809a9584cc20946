//
//  ship-cli
//  api/resources/problems.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Problems and their sub-resources.
//!
//! A problem is Ship's issue entity, identified by an integer. Besides its own
//! fields it has four sub-resources:
//!
//! * **keywords**: key to optional value, set and removed one at a time
//! * **relationships**: typed links to other problems
//! * **comments**: append-only text with an optional HTML rendition
//! * **watchers**: users notified about changes
//!
//! # Relationship Types
//!
//! | Type | Inverse |
//! |------|---------|
//! | `RelatedTo` | `RelatedTo` |
//! | `ParentOf` | `ChildOf` |
//! | `OriginalOf` | `DuplicateOf` |
//! | `CauseOf` | `CausedBy` |
//! | `BlockerOf` | `BlockedBy` |
//! | `ClonedTo` | `ClonedFrom` |
//!
//! Only one side of a relationship has to be created; the server adds the
//! inverse on the other problem.
//!
//! # Example
//!
//! ```rust,no_run
//! use ship_cli::api::{RelationType, SearchQuery, ShipClient};
//! use serde_json::json;
//!
//! # async fn example() -> ship_cli::api::Result<()> {
//! let client = ShipClient::new(None, None)?;
//!
//! let open = client
//!     .problem_search(&SearchQuery::Predicate("state.name = 'Open'".to_string()))
//!     .await?;
//!
//! let problem = client
//!     .problem_create(&json!({ "title": "Crash on launch" }))
//!     .await?;
//!
//! client.problem_relationship_add(1, RelationType::BlockedBy, 2).await?;
//! client.problem_keyword_set(1, "needs triage", None).await?;
//! client.problem_watchers_add(1, "alice@example.com").await?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::api::client::ShipClient;
use crate::api::common::{ApiError, Result};

/// The kind of a directional link between two problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationType {
    RelatedTo,
    ParentOf,
    ChildOf,
    OriginalOf,
    DuplicateOf,
    CauseOf,
    CausedBy,
    BlockerOf,
    BlockedBy,
    ClonedTo,
    ClonedFrom,
}

impl RelationType {
    /// Every relationship type, in wire order.
    pub const ALL: [RelationType; 11] = [
        Self::RelatedTo,
        Self::ParentOf,
        Self::ChildOf,
        Self::OriginalOf,
        Self::DuplicateOf,
        Self::CauseOf,
        Self::CausedBy,
        Self::BlockerOf,
        Self::BlockedBy,
        Self::ClonedTo,
        Self::ClonedFrom,
    ];

    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RelatedTo => "RelatedTo",
            Self::ParentOf => "ParentOf",
            Self::ChildOf => "ChildOf",
            Self::OriginalOf => "OriginalOf",
            Self::DuplicateOf => "DuplicateOf",
            Self::CauseOf => "CauseOf",
            Self::CausedBy => "CausedBy",
            Self::BlockerOf => "BlockerOf",
            Self::BlockedBy => "BlockedBy",
            Self::ClonedTo => "ClonedTo",
            Self::ClonedFrom => "ClonedFrom",
        }
    }

    /// Returns the type the server records on the other problem.
    pub fn inverse(&self) -> Self {
        match self {
            Self::RelatedTo => Self::RelatedTo,
            Self::ParentOf => Self::ChildOf,
            Self::ChildOf => Self::ParentOf,
            Self::OriginalOf => Self::DuplicateOf,
            Self::DuplicateOf => Self::OriginalOf,
            Self::CauseOf => Self::CausedBy,
            Self::CausedBy => Self::CauseOf,
            Self::BlockerOf => Self::BlockedBy,
            Self::BlockedBy => Self::BlockerOf,
            Self::ClonedTo => Self::ClonedFrom,
            Self::ClonedFrom => Self::ClonedTo,
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no relationship type.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Unknown relationship type '{0}'. Expected one of: RelatedTo, ParentOf, ChildOf, OriginalOf, DuplicateOf, CauseOf, CausedBy, BlockerOf, BlockedBy, ClonedTo, ClonedFrom")]
pub struct ParseRelationTypeError(String);

impl FromStr for RelationType {
    type Err = ParseRelationTypeError;

    /// Parses a wire name, ignoring ASCII case.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseRelationTypeError(s.to_string()))
    }
}

/// One side of a relationship, as sent to and returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// The relationship type.
    #[serde(rename = "type")]
    pub kind: RelationType,

    /// The problem on the other end.
    #[serde(rename = "problemIdentifier")]
    pub problem_identifier: u64,
}

/// A comment to append.
#[derive(Debug, Clone, Serialize)]
struct NewComment<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
}

/// A problem search: by predicate or by saved query, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// A predicate in the server's filter language.
    Predicate(String),
    /// A saved query URL copied from the Ship app,
    /// e.g. `ship://Query/2Kk8ww70TvWEyVO3bzYpkQ`.
    SavedQuery(String),
}

impl SearchQuery {
    /// Builds a query from optional parts, preferring the predicate.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingSearchTerm`] when both are `None`.
    pub fn from_parts(predicate: Option<String>, saved_query: Option<String>) -> Result<Self> {
        match (predicate, saved_query) {
            (Some(predicate), _) => Ok(Self::Predicate(predicate)),
            (None, Some(saved)) => Ok(Self::SavedQuery(saved)),
            (None, None) => Err(ApiError::MissingSearchTerm),
        }
    }

    /// Returns the query parameter name and value.
    pub fn query_pair(&self) -> (&'static str, &str) {
        match self {
            Self::Predicate(p) => ("predicate", p),
            Self::SavedQuery(q) => ("savedQuery", q),
        }
    }
}

/// A user to add as a watcher.
#[derive(Debug, Clone, PartialEq)]
pub enum Watcher {
    /// A user document as returned by the users endpoints, sent verbatim.
    User(Map<String, Value>),
    /// A user's email address.
    Email(String),
    /// A user identifier.
    Identifier(String),
}

impl Watcher {
    /// Returns the JSON body for the watchers endpoint.
    pub fn payload(&self) -> Value {
        match self {
            Self::User(user) => Value::Object(user.clone()),
            Self::Email(email) => json!({ "email": email }),
            Self::Identifier(id) => json!({ "identifier": id }),
        }
    }
}

impl From<&str> for Watcher {
    /// Strings containing `@` are emails, anything else an identifier.
    fn from(user: &str) -> Self {
        if user.contains('@') {
            Self::Email(user.to_string())
        } else {
            Self::Identifier(user.to_string())
        }
    }
}

impl From<String> for Watcher {
    fn from(user: String) -> Self {
        Self::from(user.as_str())
    }
}

impl From<Map<String, Value>> for Watcher {
    fn from(user: Map<String, Value>) -> Self {
        Self::User(user)
    }
}

impl TryFrom<Value> for Watcher {
    type Error = ApiError;

    fn try_from(user: Value) -> Result<Self> {
        match user {
            Value::Object(map) => Ok(Self::User(map)),
            Value::String(s) => Ok(Self::from(s)),
            _ => Err(ApiError::MissingField("identifier")),
        }
    }
}

fn problem_path(identifier: u64) -> String {
    format!("problems/{}", identifier)
}

/// Path of one keyword; the keyword is percent-encoded as a single segment.
fn keyword_path(identifier: u64, keyword: &str) -> String {
    format!(
        "problems/{}/keywords/{}",
        identifier,
        urlencoding::encode(keyword)
    )
}

impl ShipClient {
    /// Fetches a single problem.
    ///
    /// # Errors
    ///
    /// An unknown identifier yields a `Status` error for which
    /// [`ApiError::is_not_found`] is `true`.
    pub async fn problem(&self, identifier: u64) -> Result<Value> {
        self.get(&problem_path(identifier), &[]).await
    }

    /// Searches problems by predicate or saved query.
    pub async fn problem_search(&self, query: &SearchQuery) -> Result<Vec<Value>> {
        let (name, value) = query.query_pair();
        self.get_list("problems/search", &[(name, value)]).await
    }

    /// Creates a problem and returns it as stored by the server.
    pub async fn problem_create<P: Serialize + ?Sized>(&self, problem: &P) -> Result<Value> {
        self.post("problems", problem).await
    }

    /// Updates the given fields of a problem and returns the updated problem.
    ///
    /// `updates` follows the schema returned by [`ShipClient::problem`] but
    /// holds only the fields to change.
    pub async fn problem_update<U: Serialize + ?Sized>(
        &self,
        identifier: u64,
        updates: &U,
    ) -> Result<Value> {
        self.patch(&problem_path(identifier), updates).await
    }

    /// Adds a keyword to a problem, or changes its value.
    pub async fn problem_keyword_set(
        &self,
        identifier: u64,
        keyword: &str,
        value: Option<&str>,
    ) -> Result<()> {
        self.put(&keyword_path(identifier, keyword), value).await?;
        Ok(())
    }

    /// Removes a keyword from a problem.
    pub async fn problem_keyword_delete(&self, identifier: u64, keyword: &str) -> Result<()> {
        self.delete::<()>(&keyword_path(identifier, keyword), None)
            .await?;
        Ok(())
    }

    /// Returns the relationships the problem takes part in.
    pub async fn problem_relationships(&self, identifier: u64) -> Result<Vec<Value>> {
        self.get_list(&format!("problems/{}/relationships", identifier), &[])
            .await
    }

    /// Links `src` to `dst` with `kind`; the server adds the inverse link.
    pub async fn problem_relationship_add(
        &self,
        src: u64,
        kind: RelationType,
        dst: u64,
    ) -> Result<()> {
        let relationship = Relationship {
            kind,
            problem_identifier: dst,
        };
        self.put(
            &format!("problems/{}/relationships", src),
            Some(&relationship),
        )
        .await?;
        Ok(())
    }

    /// Deletes a relationship as returned by
    /// [`ShipClient::problem_relationships`].
    pub async fn problem_relationship_delete<R: Serialize + ?Sized>(
        &self,
        src: u64,
        relationship: &R,
    ) -> Result<()> {
        self.delete(
            &format!("problems/{}/relationships", src),
            Some(relationship),
        )
        .await?;
        Ok(())
    }

    /// Returns the comments on a problem.
    pub async fn problem_comments(&self, identifier: u64) -> Result<Vec<Value>> {
        self.get_list(&format!("problems/{}/comments", identifier), &[])
            .await
    }

    /// Appends a comment, optionally with an HTML rendition.
    pub async fn problem_comments_append(
        &self,
        identifier: u64,
        text: &str,
        html: Option<&str>,
    ) -> Result<()> {
        let comment = NewComment { text, html };
        self.post(&format!("problems/{}/comments", identifier), &comment)
            .await?;
        Ok(())
    }

    /// Returns the users watching a problem.
    pub async fn problem_watchers(&self, identifier: u64) -> Result<Vec<Value>> {
        self.get_list(&format!("problems/{}/watchers", identifier), &[])
            .await
    }

    /// Adds a watcher to a problem.
    ///
    /// `user` may be a user document, an email address or an identifier.
    pub async fn problem_watchers_add(
        &self,
        identifier: u64,
        user: impl Into<Watcher>,
    ) -> Result<()> {
        let payload = user.into().payload();
        self.put(&format!("problems/{}/watchers", identifier), Some(&payload))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_type_parse_is_case_insensitive() {
        assert_eq!("blockedby".parse::<RelationType>(), Ok(RelationType::BlockedBy));
        assert_eq!("ClonedFrom".parse::<RelationType>(), Ok(RelationType::ClonedFrom));
        assert!("Blocks".parse::<RelationType>().is_err());
    }

    #[test]
    fn test_relation_type_inverse_is_involution() {
        for kind in RelationType::ALL {
            assert_eq!(kind.inverse().inverse(), kind);
        }
        assert_eq!(RelationType::ParentOf.inverse(), RelationType::ChildOf);
    }

    #[test]
    fn test_relation_type_serializes_as_wire_name() {
        for kind in RelationType::ALL {
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
        }
    }

    #[test]
    fn test_relationship_payload() {
        let relationship = Relationship {
            kind: RelationType::BlockedBy,
            problem_identifier: 2,
        };
        assert_eq!(
            serde_json::to_value(&relationship).unwrap(),
            json!({ "type": "BlockedBy", "problemIdentifier": 2 })
        );
    }

    #[test]
    fn test_comment_payload_omits_missing_html() {
        let comment = NewComment { text: "hi", html: None };
        assert_eq!(serde_json::to_value(&comment).unwrap(), json!({ "text": "hi" }));
    }

    #[test]
    fn test_search_query_from_parts() {
        assert_eq!(
            SearchQuery::from_parts(Some("a".into()), Some("b".into())).unwrap(),
            SearchQuery::Predicate("a".into())
        );
        assert_eq!(
            SearchQuery::from_parts(None, Some("ship://Query/x".into())).unwrap(),
            SearchQuery::SavedQuery("ship://Query/x".into())
        );
        assert!(matches!(
            SearchQuery::from_parts(None, None),
            Err(ApiError::MissingSearchTerm)
        ));
    }

    #[test]
    fn test_watcher_disambiguation() {
        assert_eq!(
            Watcher::from("bob@example.com").payload(),
            json!({ "email": "bob@example.com" })
        );
        assert_eq!(Watcher::from("u-17").payload(), json!({ "identifier": "u-17" }));

        let user = json!({ "identifier": "u-17", "name": "Bob" });
        assert_eq!(Watcher::try_from(user.clone()).unwrap().payload(), user);
        assert!(Watcher::try_from(json!(17)).is_err());
    }

    #[test]
    fn test_keyword_path_encodes_segment() {
        assert_eq!(
            keyword_path(7, "needs/triage now"),
            "problems/7/keywords/needs%2Ftriage%20now"
        );
        assert_eq!(keyword_path(7, "100%"), "problems/7/keywords/100%25");
    }
}
