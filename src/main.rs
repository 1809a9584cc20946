//
//  ship-cli
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ship_cli::api::ApiError;
use ship_cli::cli::{Cli, Commands};
use ship_cli::config::Config;
use ship_cli::exit_codes;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(dry_run_active(&cli));

    match run(cli).await {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

/// Returns `true` if the flag, `SHIP_DRY_RUN` or the config file turns on
/// dry-run mode.
///
/// An unreadable config file counts as `false`; the command reports it
/// when it loads the config itself.
fn dry_run_active(cli: &Cli) -> bool {
    cli.global.dry_run || Config::load().map(|c| c.core.dry_run).unwrap_or(false)
}

/// Initialize logging from `SHIP_DEBUG`.
///
/// Without it, warnings are shown, plus the dry-run lines when dry-run mode
/// is active.
fn init_logging(dry_run: bool) {
    let default = if dry_run { "info" } else { "warn" };
    let filter = EnvFilter::try_from_env("SHIP_DEBUG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Maps an error to the process exit code.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ApiError>() {
        Some(e) if e.is_config() => exit_codes::AUTH_ERROR,
        Some(e) if e.is_not_found() => exit_codes::NOT_FOUND,
        Some(ApiError::MissingSearchTerm) => exit_codes::USAGE,
        _ => exit_codes::ERROR,
    }
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Users(cmd) => cmd.run(&cli.global).await,
        Commands::Components(cmd) => cmd.run(&cli.global).await,
        Commands::Milestones(cmd) => cmd.run(&cli.global).await,
        Commands::Classifications(cmd) => cmd.run(&cli.global).await,
        Commands::Priorities(cmd) => cmd.run(&cli.global).await,
        Commands::States(cmd) => cmd.run(&cli.global).await,
        Commands::Problem(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Completion(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("{} version {}", ship_cli::APP_NAME, ship_cli::VERSION);
            Ok(())
        }
    }
}
