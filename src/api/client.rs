//
//  ship-cli
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the Ship API
//!
//! This module provides the core HTTP client for the Ship REST scripting API.
//! It builds endpoint URLs, attaches the API token, decodes JSON responses and
//! turns non-success statuses into [`ApiError`]s.
//!
//! ## Features
//!
//! - Endpoint URLs of the form `{server}/api/{version}/{endpoint}`
//! - Raw-token `Authorization` header on every request
//! - JSON content type on mutating requests
//! - Pluggable [`WritePolicy`] consulted before any mutating request leaves
//!   the process, with [`DryRun`] logging and suppressing writes
//! - Exactly one attempt per call; errors propagate immediately

use std::fmt;
use std::sync::Arc;

use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use url::Url;

use super::common::{ApiError, Result};
use crate::auth::{resolve_token, ApiToken};
use crate::config::Config;

/// Server used when none is configured.
pub const DEFAULT_SERVER: &str = "https://api.realartists.com";

/// API version embedded in every request path.
pub const API_VERSION: &str = "20151105";

/// Decides whether a mutating request may be sent.
///
/// The client consults the policy for every request whose verb is not GET,
/// right before the request would go out. A policy that refuses makes the
/// call succeed locally with an empty JSON object and no network traffic.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use ship_cli::api::client::{ShipClient, WritePolicy};
/// use reqwest::Method;
///
/// /// Allows comments but nothing else.
/// #[derive(Debug)]
/// struct CommentsOnly;
///
/// impl WritePolicy for CommentsOnly {
///     fn permits(&self, _method: &Method, endpoint: &str) -> bool {
///         endpoint.ends_with("/comments")
///     }
/// }
///
/// let client = ShipClient::new(Some("token".to_string()), None)?
///     .with_write_policy(Arc::new(CommentsOnly));
/// # Ok::<(), ship_cli::api::ApiError>(())
/// ```
pub trait WritePolicy: fmt::Debug + Send + Sync {
    /// Returns `true` if `method` on `endpoint` may reach the server.
    fn permits(&self, method: &Method, endpoint: &str) -> bool;

    /// Returns `true` if this policy never lets writes through.
    fn is_dry_run(&self) -> bool {
        false
    }
}

/// Sends every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiveWrites;

impl WritePolicy for LiveWrites {
    fn permits(&self, _method: &Method, _endpoint: &str) -> bool {
        true
    }
}

/// Logs every mutating request instead of sending it.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRun;

impl WritePolicy for DryRun {
    fn permits(&self, method: &Method, endpoint: &str) -> bool {
        info!("DRY RUN: {} {}", method, endpoint);
        false
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}

/// Validates a server base URL and strips trailing slashes.
///
/// Only `http` and `https` are accepted. Plain HTTP is allowed (for local
/// test servers) but logged as a warning unless it targets localhost.
///
/// # Errors
///
/// Returns [`ApiError::Config`] if the URL does not parse or uses another
/// scheme.
pub fn validate_server_url(server: &str) -> Result<String> {
    let trimmed = server.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed)
        .map_err(|e| ApiError::Config(format!("Invalid server URL '{}': {}", server, e)))?;

    match parsed.scheme() {
        "https" => {}
        "http" => {
            let local = matches!(
                parsed.host_str(),
                Some("localhost") | Some("127.0.0.1") | Some("[::1]")
            );
            if !local {
                warn!("Server URL does not use HTTPS: {}", trimmed);
            }
        }
        other => {
            return Err(ApiError::Config(format!(
                "Unsupported server URL scheme '{}' in '{}'",
                other, server
            )))
        }
    }

    Ok(trimmed.to_string())
}

/// The client for the Ship REST scripting API.
///
/// Holds the server URL, the API token and the write policy; all three are
/// fixed at construction, so a client can be shared freely between tasks.
/// Each method on the client performs exactly one HTTP request (convenience
/// queries that need a lookup perform two, one after the other).
///
/// # Creating a Client
///
/// ```rust,no_run
/// use ship_cli::api::ShipClient;
///
/// // Token from SHIP_API_TOKEN, default server
/// let client = ShipClient::new(None, None)?;
///
/// // Explicit token and server, writes suppressed
/// let client = ShipClient::new(
///     Some("0123456789abcdef".to_string()),
///     Some("https://ship.example.com".to_string()),
/// )?
/// .with_dry_run(true);
/// # Ok::<(), ship_cli::api::ApiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ShipClient {
    /// The underlying HTTP client
    http: Client,
    /// Server base URL without trailing slash
    server: String,
    /// The API token
    token: ApiToken,
    /// Pre-built `Authorization` header value
    auth_header: HeaderValue,
    /// Gate for mutating requests
    policy: Arc<dyn WritePolicy>,
}

impl ShipClient {
    /// Creates a client from an optional token and server.
    ///
    /// Without a token, `SHIP_API_TOKEN` is read from the environment.
    /// Without a server, [`DEFAULT_SERVER`] is used.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if no token can be found, the token is
    /// malformed, or the server URL is invalid; [`ApiError::Network`] if the
    /// HTTP client cannot be built.
    pub fn new(token: Option<String>, server: Option<String>) -> Result<Self> {
        let token = resolve_token(token)?;
        Self::with_token(token, server.as_deref().unwrap_or(DEFAULT_SERVER))
    }

    /// Creates a client from an already resolved token.
    pub fn with_token(token: ApiToken, server: &str) -> Result<Self> {
        let server = validate_server_url(server)?;
        let auth_header = token.header_value()?;
        let http = Client::builder()
            .user_agent(format!("ship/{}", crate::VERSION))
            .build()?;

        Ok(Self {
            http,
            server,
            token,
            auth_header,
            policy: Arc::new(LiveWrites),
        })
    }

    /// Creates a client from the configuration file values.
    ///
    /// The configured server and dry-run default are applied; the token
    /// follows the usual explicit-then-environment resolution.
    pub fn from_config(config: &Config, token: Option<String>) -> Result<Self> {
        Ok(Self::new(token, config.core.server.clone())?.with_dry_run(config.core.dry_run))
    }

    /// Enables or disables dry-run mode.
    ///
    /// In dry-run mode every mutating request is logged and skipped, and the
    /// call returns an empty result. Reads are unaffected.
    pub fn with_dry_run(self, dry_run: bool) -> Self {
        if dry_run {
            self.with_write_policy(Arc::new(DryRun))
        } else {
            self.with_write_policy(Arc::new(LiveWrites))
        }
    }

    /// Replaces the write policy.
    pub fn with_write_policy(mut self, policy: Arc<dyn WritePolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Returns `true` if the active policy suppresses all writes.
    pub fn is_dry_run(&self) -> bool {
        self.policy.is_dry_run()
    }

    /// Returns the server base URL.
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Returns the API version string used in request paths.
    pub fn api_version(&self) -> &'static str {
        API_VERSION
    }

    /// Returns the API token.
    pub fn token(&self) -> &ApiToken {
        &self.token
    }

    /// Builds the full URL for `endpoint`.
    ///
    /// ```rust
    /// use ship_cli::api::ShipClient;
    ///
    /// let client = ShipClient::new(
    ///     Some("t".to_string()),
    ///     Some("https://ship.example.com/".to_string()),
    /// )?;
    /// assert_eq!(
    ///     client.url("problems/1"),
    ///     "https://ship.example.com/api/20151105/problems/1"
    /// );
    /// # Ok::<(), ship_cli::api::ApiError>(())
    /// ```
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/api/{}/{}", self.server, API_VERSION, endpoint)
    }

    /// Fetches a collection, or searches it when a predicate is given.
    ///
    /// Without a predicate this requests `{collection}`; with one it requests
    /// `{collection}/search?predicate=...` with the predicate passed through
    /// unchanged.
    pub(crate) async fn list(
        &self,
        collection: &str,
        predicate: Option<&str>,
    ) -> Result<Vec<Value>> {
        match predicate {
            None => self.get_list(collection, &[]).await,
            Some(predicate) => {
                let endpoint = format!("{}/search", collection);
                self.get_list(&endpoint, &[("predicate", predicate)]).await
            }
        }
    }

    /// Makes a GET request and expects a JSON array back.
    pub(crate) async fn get_list(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<Value>> {
        match self.get(endpoint, query).await? {
            Value::Array(items) => Ok(items),
            other => Err(ApiError::InvalidResponse(format!(
                "expected a list from {}, got {}",
                endpoint,
                json_kind(&other)
            ))),
        }
    }

    /// Makes a GET request.
    pub(crate) async fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Value> {
        self.send::<()>(Method::GET, endpoint, query, None).await
    }

    /// Makes a POST request with a JSON body.
    pub(crate) async fn post<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Value> {
        self.send(Method::POST, endpoint, &[], Some(body)).await
    }

    /// Makes a PATCH request with a JSON body.
    pub(crate) async fn patch<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Value> {
        self.send(Method::PATCH, endpoint, &[], Some(body)).await
    }

    /// Makes a PUT request with an optional JSON body.
    pub(crate) async fn put<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<Value> {
        self.send(Method::PUT, endpoint, &[], body).await
    }

    /// Makes a DELETE request with an optional JSON body.
    pub(crate) async fn delete<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<Value> {
        self.send(Method::DELETE, endpoint, &[], body).await
    }

    /// The single request path every operation goes through.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Value> {
        if method != Method::GET && !self.policy.permits(&method, endpoint) {
            return Ok(Value::Object(Map::new()));
        }

        let url = self.url(endpoint);
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(AUTHORIZATION, self.auth_header.clone());

        if !query.is_empty() {
            request = request.query(query);
        }

        if matches!(method, Method::POST | Method::PUT | Method::PATCH) {
            request = request.header(CONTENT_TYPE, "application/json");
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let url = response.url().to_string();
        let text = response.text().await?;

        if !status.is_success() {
            debug!("{} {} failed with {}", method, url, status);
            return Err(ApiError::Status {
                status,
                url,
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("malformed JSON from {}: {}", url, e)))
    }
}

/// Short description of a JSON value's type for error messages.
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
