//
//  ship-cli
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Token Handling
//!
//! Ship authenticates scripting clients with a static API token, created from
//! the Administration menu of the Ship app. The token is sent verbatim in the
//! `Authorization` header of every request; there is no scheme prefix and no
//! refresh flow.
//!
//! ## Resolution Order
//!
//! 1. A token passed explicitly (constructor argument or `--token`)
//! 2. The `SHIP_API_TOKEN` environment variable
//!
//! If neither is present the client cannot be built and a configuration
//! error is returned.
//!
//! ## Example
//!
//! ```rust
//! use ship_cli::auth::{resolve_token_with, validate_token};
//!
//! let token = resolve_token_with(None, |_| Some("abc123".to_string())).unwrap();
//! assert_eq!(token.as_str(), "abc123");
//!
//! assert!(validate_token("abc123"));
//! assert!(!validate_token("   "));
//! ```

use std::fmt;

use reqwest::header::HeaderValue;

use crate::api::common::{ApiError, Result};

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "SHIP_API_TOKEN";

/// Reads a token from standard input.
///
/// Reads a single line and trims surrounding whitespace. Used by
/// `ship --token -` so the token can be piped in instead of appearing in the
/// process list.
pub fn read_token_from_stdin() -> std::io::Result<String> {
    use std::io::{self, BufRead};

    let stdin = io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;

    Ok(line.trim().to_string())
}

/// Validates the format of a token string.
///
/// The token is opaque; surrounding whitespace is ignored, and what remains
/// must be non-empty and free of control characters such as newlines. This
/// is a format check only; the server is the authority on whether a token
/// works.
///
/// # Example
///
/// ```rust
/// use ship_cli::auth::validate_token;
///
/// assert!(validate_token("0123456789abcdef"));
/// assert!(validate_token("0123456789abcdef\n"));
/// assert!(!validate_token(""));
/// assert!(!validate_token("has\nnewline"));
/// ```
pub fn validate_token(token: &str) -> bool {
    let token = token.trim();
    !token.is_empty() && !token.chars().any(char::is_control)
}

/// A Ship API token.
///
/// The `Debug` implementation redacts the value so tokens never end up in
/// logs by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wraps a token after trimming surrounding whitespace and validating
    /// its format.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the token is empty or contains control
    /// characters.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if !validate_token(&token) {
            return Err(ApiError::Config(
                "API token must be non-empty and must not contain control characters"
                    .to_string(),
            ));
        }
        Ok(Self(token.trim().to_string()))
    }

    /// Returns the raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the `Authorization` header value, marked sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the token contains bytes that are not
    /// allowed in an HTTP header.
    pub fn header_value(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&self.0).map_err(|_| {
            ApiError::Config("API token contains characters not allowed in a header".to_string())
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

/// Resolves the token from an explicit value or `SHIP_API_TOKEN`.
///
/// # Errors
///
/// Returns [`ApiError::Config`] when no token is available or the token is
/// malformed.
pub fn resolve_token(explicit: Option<String>) -> Result<ApiToken> {
    resolve_token_with(explicit, |key| std::env::var(key).ok())
}

/// Resolves the token using `lookup` in place of the process environment.
pub fn resolve_token_with<F>(explicit: Option<String>, lookup: F) -> Result<ApiToken>
where
    F: FnOnce(&str) -> Option<String>,
{
    match explicit.or_else(|| lookup(TOKEN_ENV)) {
        Some(token) => ApiToken::new(token),
        None => Err(ApiError::Config(format!(
            "Cannot find {} in the environment and no token was given",
            TOKEN_ENV
        ))),
    }
}
