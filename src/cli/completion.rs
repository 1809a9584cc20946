//
//  ship-cli
//  cli/completion.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Shell completion command

use std::io::Write;

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use super::{Cli, GlobalOptions};

/// Generate shell completion scripts
///
/// Example: `ship completion zsh > ~/.zfunc/_ship`
#[derive(Args, Debug)]
pub struct CompletionCommand {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionCommand {
    pub async fn run(&self, _global: &GlobalOptions) -> Result<()> {
        self.write_to(&mut std::io::stdout())
    }

    fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let mut cmd = Cli::command();
        generate(self.shell, &mut cmd, crate::APP_NAME, out);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_completion_mentions_subcommands() {
        let cmd = CompletionCommand { shell: Shell::Bash };
        let mut buf = Vec::new();
        cmd.write_to(&mut buf).unwrap();
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("ship"));
        assert!(script.contains("milestones"));
    }
}
