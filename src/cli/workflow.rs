//
//  ship-cli
//  cli/workflow.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Workflow metadata commands: states, priorities and classifications

use anyhow::Result;
use clap::Args;

use crate::output::Column;

use super::GlobalOptions;

const STATE_COLUMNS: &[Column] = &[
    Column::new("ID", "identifier"),
    Column::new("NAME", "name"),
    Column::new("INITIAL", "initial"),
    Column::new("RESOLVED", "resolved"),
];

const NAMED_COLUMNS: &[Column] = &[
    Column::new("ID", "identifier"),
    Column::new("NAME", "name"),
];

/// List and search workflow states
#[derive(Args, Debug)]
pub struct StatesCommand {
    /// Filter with a Ship predicate
    #[arg(long, short = 'q', conflicts_with_all = ["initial", "from"])]
    pub predicate: Option<String>,

    /// Only start states
    #[arg(long, conflicts_with = "from")]
    pub initial: bool,

    /// Only states a problem in the state with this identifier may move to
    #[arg(long, value_name = "ID")]
    pub from: Option<String>,
}

impl StatesCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (client, writer) = global.session()?;

        let states = if self.initial {
            client.states_initial().await?
        } else if let Some(id) = &self.from {
            client.state_transitions(id.as_str()).await?
        } else {
            client.states(self.predicate.as_deref()).await?
        };

        writer.write_list(&states, STATE_COLUMNS)
    }
}

/// List problem priorities
#[derive(Args, Debug)]
pub struct PrioritiesCommand {}

impl PrioritiesCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (client, writer) = global.session()?;
        let priorities = client.priorities().await?;
        writer.write_list(&priorities, NAMED_COLUMNS)
    }
}

/// List problem classifications
#[derive(Args, Debug)]
pub struct ClassificationsCommand {}

impl ClassificationsCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (client, writer) = global.session()?;
        let classifications = client.classifications().await?;
        writer.write_list(&classifications, NAMED_COLUMNS)
    }
}
