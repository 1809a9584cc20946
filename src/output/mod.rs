//
//  ship-cli
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Output formatting for the `ship` CLI:
//!
//! - **Table format**: human-readable tables for interactive terminal use
//! - **JSON format**: the documents exactly as returned by the server, for
//!   scripting
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: the available output formats
//! - [`OutputWriter`]: writes documents, lists and status messages
//! - [`Column`]: which field of a document goes into which table column
//!
//! ## Example
//!
//! ```rust,ignore
//! use ship_cli::output::{Column, OutputWriter};
//!
//! let writer = OutputWriter::table();
//! writer.write_list(&users, &[Column::new("ID", "identifier"), Column::new("NAME", "name")])?;
//! ```

mod json;
mod table;

pub use json::*;
pub use table::*;

use serde_json::Value;

/// Represents the available output formats for CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable tables.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Parses the `output` config value; anything but `json` is a table.
    pub fn from_config(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Table
        }
    }
}

/// One column of a list table.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    /// Header text.
    pub header: &'static str,
    /// Top-level field of the document shown in this column.
    pub field: &'static str,
}

impl Column {
    pub const fn new(header: &'static str, field: &'static str) -> Self {
        Self { header, field }
    }
}

/// A unified output writer that handles multiple output formats.
///
/// Color output is detected from the terminal and disabled when output is
/// piped or redirected.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    /// Creates a new output writer with the specified format.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Creates a writer for JSON output.
    pub fn json() -> Self {
        Self::new(OutputFormat::Json)
    }

    /// Creates a writer for table output.
    pub fn table() -> Self {
        Self::new(OutputFormat::Table)
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Writes a single document.
    ///
    /// In table mode the document's top-level fields are listed as
    /// key/value rows.
    pub fn write_value(&self, value: &Value) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value),
            OutputFormat::Table => {
                match value {
                    Value::Object(map) => {
                        let mut builder =
                            TableBuilder::new().color(self.color).headers(["FIELD", "VALUE"]);
                        for (key, field) in map {
                            builder = builder.row([key.clone(), display_value(field)]);
                        }
                        println!("{}", builder.build());
                    }
                    other => println!("{}", display_value(other)),
                }
                Ok(())
            }
        }
    }

    /// Writes a list of documents, one table row per document.
    pub fn write_list(&self, values: &[Value], columns: &[Column]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(values),
            OutputFormat::Table => {
                if values.is_empty() {
                    println!("No results.");
                    return Ok(());
                }
                let mut builder = TableBuilder::new()
                    .color(self.color)
                    .headers(columns.iter().map(|c| c.header));
                for value in values {
                    builder = builder.row(
                        columns
                            .iter()
                            .map(|c| display_value(value.get(c.field).unwrap_or(&Value::Null))),
                    );
                }
                println!("{}", builder.build());
                println!("{} result(s)", values.len());
                Ok(())
            }
        }
    }

    /// Reports a completed write.
    ///
    /// In JSON mode a `{"success": true, "message": ...}` document is printed
    /// so scripts always get JSON on stdout.
    pub fn write_success(&self, msg: &str) -> anyhow::Result<()> {
        use console::style;
        match self.format {
            OutputFormat::Json => write_json(&serde_json::json!({
                "success": true,
                "message": msg,
            })),
            OutputFormat::Table => {
                if self.color {
                    println!("{} {}", style("✓").green().bold(), msg);
                } else {
                    println!("✓ {}", msg);
                }
                Ok(())
            }
        }
    }

    /// Prints a warning to stderr.
    pub fn write_warning(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }
}
