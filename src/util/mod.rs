//
//  ship-cli
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! Small helpers shared by the CLI commands.
//!
//! - **String Utilities**: [`truncate`]
//! - **Input Utilities**: [`read_json_input`], [`parse_json_document`]

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

/// Truncates a string to at most `max_len` characters, ending in `...`.
///
/// Counts characters rather than bytes, so multi-byte text is never split.
///
/// # Example
///
/// ```rust
/// use ship_cli::util::truncate;
///
/// assert_eq!(truncate("Crash on launch", 10), "Crash o...");
/// assert_eq!(truncate("Short", 10), "Short");
/// ```
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let mut out: String = s.chars().take(max_len - 3).collect();
    out.push_str("...");
    out
}

/// Reads a JSON document given inline (`--data`) or from a file (`--file`).
///
/// A file path of `-` reads from stdin. Exactly one source must be given.
pub fn read_json_input(data: Option<&str>, file: Option<&Path>) -> Result<Value> {
    let raw = match (data, file) {
        (Some(data), None) => data.to_string(),
        (None, Some(path)) if path == Path::new("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read JSON from stdin")?;
            buf
        }
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (Some(_), Some(_)) => bail!("Pass either --data or --file, not both"),
        (None, None) => bail!("A JSON document is required (--data or --file)"),
    };
    parse_json_document(&raw)
}

/// Parses `raw` as a JSON object.
pub fn parse_json_document(raw: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(raw.trim()).context("Input is not valid JSON")?;
    if !value.is_object() {
        bail!("Expected a JSON object");
    }
    Ok(value)
}
