use std::{collections::BTreeMap, fs, path::{Path, PathBuf}};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use crate::types::{DockerRegistry, ResourceConfig};

pub const API_URL_ENV: &str = "GHAYMAH_API_URL";
pub const API_TOKEN_ENV: &str = "GHAYMAH_API_TOKEN";
pub const DEFAULT_CONFIG_FILE: &str = "ghaymah.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, #[source] source: std::io::Error },
    #[error("failed to parse {path}: {source}")]
    Parse { path: PathBuf, #[source] source: serde_yaml::Error },
    #[error("application name is required")]
    MissingAppName,
    #[error("either image or dockerfilePath must be set")]
    MissingSource,
    #[error("image and dockerfilePath are mutually exclusive")]
    AmbiguousSource,
    #[error("invalid registry configuration: registryUrl, username and password are required")]
    IncompleteRegistry,
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),
}

/// Deployment description, read from YAML or assembled from flags.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployConfig {
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub dockerfile_path: String,
    #[serde(default)]
    pub env_vars: BTreeMap<String, String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub resources: Option<ResourceConfig>,
    #[serde(default)]
    pub registry: Option<DockerRegistry>,
}

impl DeployConfig {
    /// Config for `deploy --image`; the name falls back to the image's repository name.
    pub fn from_image(image: &str, app_name: Option<String>) -> Self {
        let app_name = app_name.filter(|n| !n.is_empty()).unwrap_or_else(|| derive_app_name(image));
        Self { app_name, image: image.to_string(), ..Default::default() }
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        debug!(path=%path.display(), len=content.len(), "config.read");
        Self::from_yaml(&content).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> { serde_yaml::from_str(content) }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app_name.is_empty() { return Err(ConfigError::MissingAppName); }
        match (self.image.is_empty(), self.dockerfile_path.is_empty()) {
            (true, true) => Err(ConfigError::MissingSource),
            (false, false) => Err(ConfigError::AmbiguousSource),
            _ => Ok(()),
        }
    }

    pub fn region(&self) -> Option<&str> { self.region.as_deref().filter(|r| !r.is_empty()) }
}

/// `registry.io/ns/app:latest` -> `app`.
pub fn derive_app_name(image: &str) -> String {
    let without_tag = image.split(':').next().unwrap_or(image);
    without_tag.rsplit('/').next().unwrap_or(without_tag).to_string()
}

/// Connection settings for the control plane, taken from the environment.
#[derive(Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub token: String,
}

impl std::fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.debug_struct("ApiSettings").field("base_url", &self.base_url).field("token", &"<redacted>").finish() }
}

impl ApiSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, ConfigError> {
        let base_url = lookup(API_URL_ENV).filter(|v| !v.is_empty()).ok_or(ConfigError::MissingEnv(API_URL_ENV))?;
        let token = lookup(API_TOKEN_ENV).filter(|v| !v.is_empty()).ok_or(ConfigError::MissingEnv(API_TOKEN_ENV))?;
        debug!(base_url=%base_url, "config.env.loaded");
        Ok(Self { base_url: base_url.trim_end_matches('/').to_string(), token })
    }
}
