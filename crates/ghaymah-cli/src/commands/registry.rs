use anyhow::Result;
use clap::Subcommand;
use tracing::info;
use crate::api::GhaymahApi;
use crate::config::ConfigError;
use crate::errors::{CliError, CliErrorKind};
use crate::types::DockerRegistry;

/// Add, update, or remove Docker registry credentials for your Ghaymah account
#[derive(Subcommand, Debug)]
pub enum RegistryCommand {
    /// Add or update Docker registry credentials
    Add {
        /// Registry URL (e.g., docker.io)
        #[arg(long)]
        url: String,
        /// Registry username
        #[arg(long)]
        username: String,
        /// Registry password
        #[arg(long, env = "GHAYMAH_REGISTRY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// List all registered Docker registries
    List {},
    /// Remove Docker registry credentials
    Remove {
        /// Registry URL to remove
        #[arg(long)]
        url: String,
    },
}

pub async fn handle(cmd: RegistryCommand, api: &GhaymahApi) -> Result<()> {
    match cmd {
        RegistryCommand::Add { url, username, password } => {
            let registry = DockerRegistry::new(url, username, password);
            if !registry.is_complete() { return Err(CliError::from(ConfigError::IncompleteRegistry).into()); }
            let saved = api.save_registry(&registry).await.map_err(CliError::from)?;
            info!(event="registry.saved", registry=%saved.registry_url);
            println!("Successfully added registry credentials for {}", saved.registry_url);
        }
        RegistryCommand::List {} => {
            let registries = api.list_registries().await.map_err(CliError::from)?;
            if registries.is_empty() { println!("No Docker registries registered"); return Ok(()); }
            println!("Registered Docker Registries:");
            for (i, r) in registries.iter().enumerate() { println!("{}. {} (username: {})", i + 1, r.registry_url, r.username); }
        }
        RegistryCommand::Remove { url } => {
            if url.is_empty() { return Err(CliError::new(CliErrorKind::Usage("registry URL is required".into())).into()); }
            api.remove_registry(&url).await.map_err(CliError::from)?;
            info!(event="registry.removed", registry=%url);
            println!("Successfully removed registry credentials for {url}");
        }
    }
    Ok(())
}
