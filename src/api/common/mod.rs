//
//  ship-cli
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Ship REST API
//!
//! This module provides the types shared by every resource module: the unified
//! error type, the result alias, and the [`EntityRef`] trait used wherever an
//! operation accepts "an object or its identifier".
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`Result`] - Result alias over [`ApiError`]
//! - [`EntityRef`] - Anything that can name a remote entity by identifier
//!
//! # Example
//!
//! ```rust
//! use ship_cli::api::common::{ApiError, EntityRef};
//! use serde_json::json;
//!
//! let component = json!({ "identifier": "abc", "fullName": "Ship/Mac" });
//! assert_eq!(component.entity_id().unwrap(), "abc");
//! assert_eq!("xyz".entity_id().unwrap(), "xyz");
//!
//! let err = json!({ "name": "no id" }).entity_id().unwrap_err();
//! assert!(matches!(err, ApiError::MissingField("identifier")));
//! ```

use reqwest::StatusCode;
use serde_json::{Map, Value};
use thiserror::Error;

/// Unified error type for all Ship API operations.
///
/// # Variants
///
/// | Variant | Description |
/// |---------|-------------|
/// | `Config` | The client could not be configured (missing token, bad URL) |
/// | `Status` | The server answered with a non-2xx status |
/// | `Network` | The request never produced a response |
/// | `InvalidResponse` | A 2xx response whose body is not the expected JSON |
/// | `MissingSearchTerm` | A problem search without predicate or saved query |
/// | `MissingField` | A JSON document lacks a field the client must read |
/// | `NotFound` | A local lookup (e.g. component scope) matched nothing |
///
/// # Notes
///
/// - The client never retries; every variant is surfaced as-is.
/// - 404 and 500 share the `Status` variant; use [`ApiError::status`] or
///   [`ApiError::is_not_found`] to tell them apart.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The client configuration is unusable.
    ///
    /// Raised at construction time, e.g. when no token was passed and
    /// `SHIP_API_TOKEN` is not set.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The server returned a non-success status code.
    ///
    /// The raw response body is kept for display; it is not parsed.
    #[error("Request to {url} failed with HTTP {status}{}", format_body(.body))]
    Status {
        /// The HTTP status returned by the server
        status: StatusCode,
        /// The full request URL
        url: String,
        /// The raw response body (may be empty)
        body: String,
    },

    /// A network-level error occurred during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response could not be decoded into the expected shape.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// A problem search needs either a predicate or a saved query.
    #[error("Either a predicate or a saved query is required to search problems")]
    MissingSearchTerm,

    /// A document is missing a field the client needs.
    #[error("Object is missing required field '{0}'")]
    MissingField(&'static str),

    /// A lookup performed by the client itself found nothing.
    #[error("Not found: {0}")]
    NotFound(String),
}

fn format_body(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        format!(": {}", body)
    }
}

impl ApiError {
    /// Returns the HTTP status for `Status` errors.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(err) => err.status(),
            _ => None,
        }
    }

    /// Returns `true` if the server reported 404 or a local lookup missed.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_)) || self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Returns `true` for configuration errors.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Something that names a remote entity by its identifier.
///
/// Convenience queries accept either a full document as returned by the
/// server or just its identifier. Identifiers may be strings or numbers on
/// the wire; both are rendered as strings for predicate interpolation.
pub trait EntityRef {
    /// Returns the entity identifier.
    fn entity_id(&self) -> Result<String>;
}

impl EntityRef for str {
    fn entity_id(&self) -> Result<String> {
        Ok(self.to_string())
    }
}

impl EntityRef for String {
    fn entity_id(&self) -> Result<String> {
        Ok(self.clone())
    }
}

impl EntityRef for u64 {
    fn entity_id(&self) -> Result<String> {
        Ok(self.to_string())
    }
}

impl EntityRef for Map<String, Value> {
    fn entity_id(&self) -> Result<String> {
        match self.get("identifier") {
            Some(Value::String(id)) => Ok(id.clone()),
            Some(Value::Number(id)) => Ok(id.to_string()),
            _ => Err(ApiError::MissingField("identifier")),
        }
    }
}

impl EntityRef for Value {
    fn entity_id(&self) -> Result<String> {
        match self {
            Value::String(id) => Ok(id.clone()),
            Value::Number(id) => Ok(id.to_string()),
            Value::Object(map) => map.entity_id(),
            _ => Err(ApiError::MissingField("identifier")),
        }
    }
}

impl<T: EntityRef + ?Sized> EntityRef for &T {
    fn entity_id(&self) -> Result<String> {
        (**self).entity_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_id_from_string_identifier() {
        let user = json!({ "identifier": "u-1", "name": "Alice" });
        assert_eq!(user.entity_id().unwrap(), "u-1");
    }

    #[test]
    fn test_entity_id_from_numeric_identifier() {
        let problem = json!({ "identifier": 42 });
        assert_eq!(problem.entity_id().unwrap(), "42");
    }

    #[test]
    fn test_entity_id_missing() {
        let err = json!({ "name": "nameless" }).entity_id().unwrap_err();
        assert!(matches!(err, ApiError::MissingField("identifier")));
    }

    #[test]
    fn test_entity_id_from_array_is_error() {
        assert!(json!([1, 2]).entity_id().is_err());
    }

    #[test]
    fn test_status_error_display_includes_body() {
        let err = ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            url: "https://api.example.com/api/1/users".to_string(),
            body: "bad predicate\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Request to https://api.example.com/api/1/users failed with HTTP 400 Bad Request: bad predicate"
        );
    }

    #[test]
    fn test_status_error_display_without_body() {
        let err = ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            url: "u".to_string(),
            body: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "Request to u failed with HTTP 500 Internal Server Error"
        );
    }

    #[test]
    fn test_is_not_found() {
        let err = ApiError::Status {
            status: StatusCode::NOT_FOUND,
            url: "u".to_string(),
            body: String::new(),
        };
        assert!(err.is_not_found());
        assert!(ApiError::NotFound("component".to_string()).is_not_found());
        assert!(!ApiError::MissingSearchTerm.is_not_found());
    }

    #[test]
    fn test_is_config() {
        assert!(ApiError::Config("no token".to_string()).is_config());
        assert!(!ApiError::MissingSearchTerm.is_config());
    }
}
