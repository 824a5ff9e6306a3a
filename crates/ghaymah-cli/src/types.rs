//! Wire shapes exchanged with the Ghaymah control plane.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resource request for a deployment. Values are free-form (`"500m"`, `"512Mi"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
}

/// Docker registry credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockerRegistry {
    #[serde(default)]
    pub registry_url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl DockerRegistry {
    pub fn new(registry_url: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { registry_url: registry_url.into(), username: username.into(), password: password.into() }
    }

    /// A credential is usable only when url, username and password are all set.
    pub fn is_complete(&self) -> bool {
        !self.registry_url.is_empty() && !self.username.is_empty() && !self.password.is_empty()
    }
}

/// Registry entry as listed by the server; never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySummary {
    pub registry_url: String,
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistryList {
    #[serde(default)]
    pub registries: Vec<RegistrySummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployResponse {
    pub app_id: String,
    pub status: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceUsage {
    #[serde(default)]
    pub cpu_usage: f64,
    #[serde(default)]
    pub memory_usage: f64,
    #[serde(default)]
    pub storage_usage: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub state: String,
    pub last_deployment: DateTime<Utc>,
    #[serde(default)]
    pub resources: ResourceUsage,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// Entries in the order the server returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub entries: Vec<LogEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOptions {
    pub follow: bool,
    pub tail: u32,
    pub since: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenList {
    #[serde(default)]
    pub tokens: Vec<crate::token::ApiToken>,
}
