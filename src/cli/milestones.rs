//
//  ship-cli
//  cli/milestones.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Milestone commands

use anyhow::Result;
use clap::Args;

use crate::api::ComponentScope;
use crate::output::Column;

use super::GlobalOptions;

const COLUMNS: &[Column] = &[
    Column::new("ID", "identifier"),
    Column::new("NAME", "name"),
    Column::new("START", "startDate"),
    Column::new("END", "endDate"),
    Column::new("COMPONENT", "component"),
];

/// List and search milestones
#[derive(Args, Debug)]
pub struct MilestonesCommand {
    /// Filter with a Ship predicate
    #[arg(long, short = 'q', conflicts_with = "active")]
    pub predicate: Option<String>,

    /// Only milestones that have started and not yet ended
    #[arg(long)]
    pub active: bool,

    /// With --active, restrict to milestones that apply to this component
    #[arg(long, value_name = "ID", requires = "active")]
    pub component: Option<String>,
}

impl MilestonesCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (client, writer) = global.session()?;

        let milestones = if self.active {
            let scope = self.component.clone().map(ComponentScope::from);
            client.milestones_active(scope).await?
        } else {
            client.milestones(self.predicate.as_deref()).await?
        };

        writer.write_list(&milestones, COLUMNS)
    }
}
