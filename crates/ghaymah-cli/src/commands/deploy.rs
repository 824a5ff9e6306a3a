use std::path::PathBuf;
use anyhow::Result;
use tracing::info;
use crate::api::GhaymahApi;
use crate::config::{ConfigError, DeployConfig, DEFAULT_CONFIG_FILE};
use crate::errors::CliError;

#[derive(clap::Args, Debug)]
#[command(after_help = "Examples:\n  # Deploy using config file\n  ghaymah deploy -c config.yaml\n\n  # Deploy using image\n  ghaymah deploy --image username/app:tag\n\n  # Deploy using image and custom name\n  ghaymah deploy --image username/app:tag --name my-app")]
pub struct DeployArgs {
    /// Path to configuration file
    #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
    /// Docker image to deploy (e.g., username/app:tag)
    #[arg(long)]
    pub image: Option<String>,
    /// Application name (defaults to the image name)
    #[arg(long, requires = "image")]
    pub name: Option<String>,
}

/// Flags win over the file: `--image` builds the config directly.
pub fn resolve_config(args: &DeployArgs) -> Result<DeployConfig, ConfigError> {
    match args.image.as_deref().filter(|i| !i.is_empty()) {
        Some(image) => Ok(DeployConfig::from_image(image, args.name.clone())),
        None => DeployConfig::load_from_file(&args.config),
    }
}

/// Checks that must pass before anything is sent.
pub fn preflight(config: &DeployConfig) -> Result<(), ConfigError> {
    config.validate()?;
    if let Some(reg) = &config.registry { if !reg.is_complete() { return Err(ConfigError::IncompleteRegistry); } }
    Ok(())
}

pub async fn handle(args: DeployArgs, api: &GhaymahApi) -> Result<()> {
    let config = resolve_config(&args).map_err(CliError::from)?;
    preflight(&config).map_err(CliError::from)?;
    println!("Starting deployment of {}...", config.app_name);
    let resp = api.deploy(&config).await.map_err(CliError::from)?;
    info!(event="deploy.finished", app_id=%resp.app_id, status=%resp.status);
    println!("Successfully deployed! Application ID: {}", resp.app_id);
    println!("Status: {}", resp.status);
    if let Some(url) = resp.url.as_deref().filter(|u| !u.is_empty()) { println!("URL: {url}"); }
    Ok(())
}
