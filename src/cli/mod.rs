//
//  ship-cli
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod completion;
mod components;
mod config;
mod milestones;
mod problem;
mod users;
mod workflow;

pub use completion::CompletionCommand;
pub use components::ComponentsCommand;
pub use config::ConfigCommand;
pub use milestones::MilestonesCommand;
pub use problem::ProblemCommand;
pub use users::UsersCommand;
pub use workflow::{ClassificationsCommand, PrioritiesCommand, StatesCommand};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::api::ShipClient;
use crate::auth::read_token_from_stdin;
use crate::config::Config;
use crate::output::{OutputFormat, OutputWriter};

/// Ship CLI - Work with the Ship issue tracker from the command line
#[derive(Parser, Debug)]
#[command(
    name = "ship",
    version,
    about = "Work with the Ship issue tracker from the command line",
    long_about = "ship is a CLI for the Ship issue tracker's REST scripting API.\n\n\
                  It reads users, components, milestones and workflow metadata, and \
                  searches, creates and updates problems.",
    propagate_version = true,
    after_help = "Use 'ship <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Ship server base URL
    #[arg(long, global = true, env = "SHIP_SERVER")]
    pub server: Option<String>,

    /// API token; use '-' to read it from stdin
    #[arg(long, global = true, env = "SHIP_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Log mutating requests instead of sending them
    #[arg(
        long,
        global = true,
        env = "SHIP_DRY_RUN",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub dry_run: bool,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// Builds a client from the flags, the environment and `config`.
    ///
    /// Flags and environment variables win over the config file; the config
    /// file wins over the built-in default server.
    pub fn client_with(&self, config: &Config) -> Result<ShipClient> {
        let token = match self.token.as_deref() {
            Some("-") => Some(read_token_from_stdin()?),
            other => other.map(str::to_string),
        };
        let server = self.server.clone().or_else(|| config.core.server.clone());
        let dry_run = self.dry_run || config.core.dry_run;
        debug!("Using server {:?} (dry run: {})", server, dry_run);

        Ok(ShipClient::new(token, server)?.with_dry_run(dry_run))
    }

    /// Picks the output format: `--json` first, then the config file.
    pub fn format(&self, config: &Config) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::from_config(&config.core.output)
        }
    }

    /// Loads the config once and returns the client and output writer.
    pub fn session(&self) -> Result<(ShipClient, OutputWriter)> {
        let config = Config::load()?;
        let client = self.client_with(&config)?;
        Ok((client, OutputWriter::new(self.format(&config))))
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List and search users
    Users(UsersCommand),

    /// List and search components
    Components(ComponentsCommand),

    /// List and search milestones
    Milestones(MilestonesCommand),

    /// List problem classifications
    Classifications(ClassificationsCommand),

    /// List problem priorities
    Priorities(PrioritiesCommand),

    /// List and search workflow states
    States(StatesCommand),

    /// View, search and modify problems
    #[command(visible_alias = "p")]
    Problem(ProblemCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}
