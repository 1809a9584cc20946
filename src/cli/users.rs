//
//  ship-cli
//  cli/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! User commands

use anyhow::{bail, Result};
use clap::Args;

use crate::output::Column;

use super::GlobalOptions;

const COLUMNS: &[Column] = &[
    Column::new("ID", "identifier"),
    Column::new("NAME", "name"),
    Column::new("EMAIL", "email"),
    Column::new("INACTIVE", "inactive"),
];

/// List and search users
#[derive(Args, Debug)]
pub struct UsersCommand {
    /// Filter with a Ship predicate, e.g. "name BEGINSWITH 'A'"
    #[arg(long, short = 'q')]
    pub predicate: Option<String>,

    /// Only users that are not marked inactive
    #[arg(long, conflicts_with_all = ["predicate", "me"])]
    pub active: bool,

    /// Only the user the token belongs to
    #[arg(long, conflicts_with = "predicate")]
    pub me: bool,
}

impl UsersCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (client, writer) = global.session()?;

        let users = if self.me {
            let me = client.me().await?;
            if me.is_empty() {
                bail!("The server did not return the token's user");
            }
            me
        } else if self.active {
            client.users_active().await?
        } else {
            client.users(self.predicate.as_deref()).await?
        };

        writer.write_list(&users, COLUMNS)
    }
}
