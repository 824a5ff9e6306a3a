use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info_span;
use tracing::Instrument;
use crate::api::GhaymahApi;
use clap_complete::Shell;

pub mod deploy;
pub mod status;
pub mod logs;
pub mod registry;
pub mod token;
pub mod completions;

#[derive(clap::ValueEnum, Clone, Debug)]
pub enum LogFormat { Auto, Text, Json }

#[derive(Parser, Debug)]
#[command(
    name = "ghaymah",
    version,
    about = "Command line interface for Ghaymah Cloud",
    long_about = "Ghaymah CLI manages your applications on Ghaymah Cloud.\nDeploy, monitor, and manage your applications with simple commands.\n\nRequires GHAYMAH_API_URL and GHAYMAH_API_TOKEN in the environment."
)]
pub struct Cli {
    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
    /// Log format: auto|text|json
    #[arg(long, global = true, default_value = "auto")]
    pub log_format: LogFormat,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy an application to Ghaymah Cloud
    Deploy(deploy::DeployArgs),
    /// Check application status
    Status(status::StatusArgs),
    /// View application logs
    Logs(logs::LogsArgs),
    /// Manage Docker registry credentials
    #[command(subcommand)]
    Registry(registry::RegistryCommand),
    /// Manage API tokens
    #[command(subcommand)]
    Token(token::TokenCommand),
    /// Generate shell completions
    #[command(hide = true)]
    Completions { #[arg(long, value_enum, default_value_t = Shell::Bash)] shell: Shell },
}

/// Runs one command. `connect` is only called by commands that talk to the control plane.
pub async fn run<F>(command: Commands, connect: F) -> Result<()>
where
    F: FnOnce() -> Result<GhaymahApi>,
{
    match command {
        Commands::Completions { shell } => { let _span = info_span!("cmd.completions").entered(); completions::handle(shell) }
        Commands::Deploy(args) => deploy::handle(args, &connect()?).instrument(info_span!("cmd.deploy")).await,
        Commands::Status(args) => status::handle(args, &connect()?).instrument(info_span!("cmd.status")).await,
        Commands::Logs(args) => logs::handle(args, &connect()?).instrument(info_span!("cmd.logs")).await,
        Commands::Registry(cmd) => registry::handle(cmd, &connect()?).instrument(info_span!("cmd.registry")).await,
        Commands::Token(cmd) => token::handle(cmd, &connect()?).instrument(info_span!("cmd.token")).await,
    }
}
