//! Shell completion generation command.
//!
//! Writes a completion script for bash, zsh, fish, `PowerShell` or elvish to
//! stdout, with install hints on stderr.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

const BIN_NAME: &str = "hotel";

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        if !global.quiet {
            eprintln!("# Generating {} completion script", self.shell);
            match self.shell {
                Shell::Bash => {
                    eprintln!("#   hotel completions bash > ~/.local/share/bash-completion/completions/hotel");
                    eprintln!("# Or in ~/.bashrc:");
                    eprintln!("#   eval \"$(hotel completions bash)\"");
                }
                Shell::Zsh => {
                    eprintln!("#   hotel completions zsh > ~/.zsh/completions/_hotel");
                    eprintln!("# Make sure ~/.zsh/completions is in your $fpath");
                }
                Shell::Fish => {
                    eprintln!("#   hotel completions fish > ~/.config/fish/completions/hotel.fish");
                }
                Shell::PowerShell => {
                    eprintln!("#   hotel completions powershell | Out-String | Invoke-Expression");
                }
                _ => {}
            }
            eprintln!();
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());
        Ok(())
    }
}
