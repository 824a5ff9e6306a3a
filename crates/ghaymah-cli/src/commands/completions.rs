use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::info;
use super::Cli;

/// Writes the completion script for `shell` to stdout.
pub fn handle(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "ghaymah", &mut std::io::stdout());
    info!(event="completions.generated", %shell);
    Ok(())
}
