//
//  ship-cli
//  cli/components.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Component commands

use anyhow::Result;
use clap::Args;

use crate::output::{Column, OutputFormat};

use super::GlobalOptions;

const COLUMNS: &[Column] = &[
    Column::new("ID", "identifier"),
    Column::new("NAME", "name"),
    Column::new("FULL NAME", "fullName"),
    Column::new("PARENT", "parent"),
];

/// List and search components
#[derive(Args, Debug)]
pub struct ComponentsCommand {
    /// Filter with a Ship predicate
    #[arg(long, short = 'q')]
    pub predicate: Option<String>,

    /// Show the parent of the component with this identifier
    #[arg(long, value_name = "ID", conflicts_with_all = ["predicate", "children_of"])]
    pub parent_of: Option<String>,

    /// Show the immediate children of the component with this identifier
    #[arg(long, value_name = "ID", conflicts_with = "predicate")]
    pub children_of: Option<String>,
}

impl ComponentsCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (client, writer) = global.session()?;

        if let Some(id) = &self.parent_of {
            return match client.component_parent(id.as_str()).await? {
                Some(parent) => writer.write_value(&parent),
                None => {
                    writer.write_warning(&format!("Component '{}' has no parent", id));
                    if writer.format() == OutputFormat::Json {
                        writer.write_value(&serde_json::Value::Null)?;
                    }
                    Ok(())
                }
            };
        }

        let components = match &self.children_of {
            Some(id) => client.component_children(id.as_str()).await?,
            None => client.components(self.predicate.as_deref()).await?,
        };

        writer.write_list(&components, COLUMNS)
    }
}
