use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::{Cli, CompletionShell};
use crate::error::CliError;

impl From<CompletionShell> for Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => Self::Bash,
            CompletionShell::Zsh => Self::Zsh,
            CompletionShell::Fish => Self::Fish,
            CompletionShell::PowerShell => Self::PowerShell,
        }
    }
}

pub fn run_completions(shell: CompletionShell, output_path: Option<&Path>) -> Result<(), CliError> {
    let Some(path) = output_path else {
        return write_completions(shell, &mut io::stdout().lock());
    };

    let mut file = File::create(path)?;
    write_completions(shell, &mut file)?;
    tracing::debug!(?shell, path = %path.display(), "Wrote completion script");
    println!("{}", path.display());
    Ok(())
}

/// Render the completion script for `shell` under the binary's own name
pub fn write_completions(shell: CompletionShell, writer: &mut impl Write) -> Result<(), CliError> {
    let mut command = Cli::command();
    let bin_name = command.get_name().to_string();
    generate(Shell::from(shell), &mut command, bin_name, writer);
    writer.flush()?;
    Ok(())
}
