//! Typed access to the Ghaymah control plane.
//!
//! [`GhaymahApi`] maps each domain operation onto one authenticated JSON call.
//! Every failure is an [`OperationError`]: the operation that was running plus an
//! [`ApiError`] whose [`FailureKind`] tells transport, server and encoding
//! problems apart. Nothing is retried.

mod client;
mod error;
mod transport;

use std::{collections::BTreeMap, sync::Arc};
use chrono::SecondsFormat;
use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

use crate::config::{ApiSettings, DeployConfig};
use crate::token::ApiToken;
use crate::types::{DeployResponse, DockerRegistry, LogOptions, LogsResponse, RegistryList, RegistrySummary, ResourceConfig, StatusResponse, TokenList};
use client::Client;
use error::WithOperation;

pub use error::{ApiError, BoxError, FailureKind, Operation, OperationError};
pub use transport::{HttpTransport, RawResponse, ReqwestTransport, REQUEST_TIMEOUT};

const APPS: &str = "/apps";
const APPS_STATUS: &str = "/apps/status";
const APPS_LOGS: &str = "/apps/logs";
const REGISTRIES: &str = "/registries";
const TOKENS: &str = "/tokens";

/// Body of `POST /apps`. Optional keys are left out unless they carry a value.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployRequest<'a> {
    pub name: &'a str,
    pub image: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dockerfile_path: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<&'a BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<&'a ResourceConfig>,
}

impl<'a> From<&'a DeployConfig> for DeployRequest<'a> {
    fn from(c: &'a DeployConfig) -> Self {
        Self {
            name: &c.app_name,
            image: &c.image,
            dockerfile_path: Some(c.dockerfile_path.as_str()).filter(|p| !p.is_empty()),
            env: Some(&c.env_vars).filter(|e| !e.is_empty()),
            region: c.region(),
            resources: c.resources.as_ref(),
        }
    }
}

/// `/apps/logs?name=..` with `follow`, `tail` and `since` only when they are set.
pub fn logs_endpoint(app_name: &str, options: &LogOptions) -> String {
    let mut endpoint = format!("{APPS_LOGS}?name={}", urlencoding::encode(app_name));
    if options.follow { endpoint.push_str("&follow=true"); }
    if options.tail > 0 { endpoint.push_str(&format!("&tail={}", options.tail)); }
    if let Some(since) = options.since {
        let ts = since.to_rfc3339_opts(SecondsFormat::Secs, true);
        endpoint.push_str("&since=");
        endpoint.push_str(&urlencoding::encode(&ts));
    }
    endpoint
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> { serde_json::from_slice(body).map_err(ApiError::Decode) }

#[derive(Clone)]
pub struct GhaymahApi { client: Client }

impl GhaymahApi {
    /// Client over HTTP with the default 30 second request timeout.
    pub fn new(base_url: &str, token: &str) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new().map_err(|e| ApiError::Transport(Box::new(e)))?;
        Self::with_transport(base_url, token, Arc::new(transport))
    }

    pub fn from_settings(settings: &ApiSettings) -> Result<Self, ApiError> { Self::new(&settings.base_url, &settings.token) }

    pub fn with_transport(base_url: &str, token: &str, transport: Arc<dyn HttpTransport>) -> Result<Self, ApiError> {
        Ok(Self { client: Client::new(base_url, token, transport)? })
    }

    pub async fn deploy(&self, config: &DeployConfig) -> Result<DeployResponse, OperationError> {
        let payload = DeployRequest::from(config);
        info!(event="deploy.request", app=%payload.name, image=%payload.image, region=?payload.region);
        let body = self.client.post(APPS, &payload).await.during(Operation::Deploy)?;
        decode(&body).during(Operation::Deploy)
    }

    pub async fn get_status(&self, app_name: &str) -> Result<StatusResponse, OperationError> {
        let endpoint = format!("{APPS_STATUS}?name={}", urlencoding::encode(app_name));
        let body = self.client.get(&endpoint).await.during(Operation::Status)?;
        decode(&body).during(Operation::Status)
    }

    pub async fn get_logs(&self, app_name: &str, options: &LogOptions) -> Result<LogsResponse, OperationError> {
        let body = self.client.get(&logs_endpoint(app_name, options)).await.during(Operation::Logs)?;
        decode(&body).during(Operation::Logs)
    }

    /// Adds the credential, or replaces the one stored for the same registry URL.
    pub async fn save_registry(&self, registry: &DockerRegistry) -> Result<RegistrySummary, OperationError> {
        let body = self.client.put(REGISTRIES, registry).await.during(Operation::SaveRegistry)?;
        decode(&body).during(Operation::SaveRegistry)
    }

    pub async fn list_registries(&self) -> Result<Vec<RegistrySummary>, OperationError> {
        let body = self.client.get(REGISTRIES).await.during(Operation::ListRegistries)?;
        decode::<RegistryList>(&body).map(|l| l.registries).during(Operation::ListRegistries)
    }

    pub async fn remove_registry(&self, registry_url: &str) -> Result<(), OperationError> {
        let endpoint = format!("{REGISTRIES}?url={}", urlencoding::encode(registry_url));
        self.client.delete(&endpoint).await.during(Operation::RemoveRegistry)?;
        Ok(())
    }

    pub async fn register_token(&self, token: &ApiToken) -> Result<(), OperationError> {
        self.client.post(TOKENS, token).await.during(Operation::RegisterToken)?;
        Ok(())
    }

    pub async fn list_tokens(&self) -> Result<Vec<ApiToken>, OperationError> {
        let body = self.client.get(TOKENS).await.during(Operation::ListTokens)?;
        decode::<TokenList>(&body).map(|l| l.tokens).during(Operation::ListTokens)
    }

    pub async fn revoke_token(&self, value: &str) -> Result<(), OperationError> {
        let endpoint = format!("{TOKENS}/{}", urlencoding::encode(value));
        self.client.delete(&endpoint).await.during(Operation::RevokeToken)?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::{collections::VecDeque, sync::Mutex};
    use async_trait::async_trait;
    use bytes::Bytes;
    use super::{BoxError, HttpTransport, RawResponse};

    #[derive(Debug, Clone)]
    pub struct Recorded {
        pub method: String,
        pub url: reqwest::Url,
        pub headers: reqwest::header::HeaderMap,
        pub body: Option<Vec<u8>>,
    }

    impl Recorded {
        pub fn json(&self) -> serde_json::Value { serde_json::from_slice(self.body.as_deref().unwrap_or(b"null")).unwrap() }
        pub fn query(&self, key: &str) -> Option<String> { self.url.query_pairs().find(|(k, _)| k == key).map(|(_, v)| v.into_owned()) }
    }

    /// Replays canned responses in order and records every request it sees.
    #[derive(Default)]
    pub struct FakeTransport {
        responses: Mutex<VecDeque<Result<RawResponse, String>>>,
        pub requests: Mutex<Vec<Recorded>>,
    }

    impl FakeTransport {
        pub fn respond(self, status: u16, body: &str) -> Self {
            self.responses.lock().unwrap().push_back(Ok(RawResponse { status, body: Bytes::from(body.to_string()) }));
            self
        }
        pub fn fail(self, msg: &str) -> Self {
            self.responses.lock().unwrap().push_back(Err(msg.to_string()));
            self
        }
        pub fn last(&self) -> Recorded { self.requests.lock().unwrap().last().cloned().expect("no request recorded") }
    }

    #[async_trait]
    impl HttpTransport for FakeTransport {
        async fn execute(&self, request: reqwest::Request) -> Result<RawResponse, BoxError> {
            let body = request.body().and_then(|b| b.as_bytes()).map(<[u8]>::to_vec);
            self.requests.lock().unwrap().push(Recorded { method: request.method().to_string(), url: request.url().clone(), headers: request.headers().clone(), body });
            match self.responses.lock().unwrap().pop_front() {
                Some(Ok(r)) => Ok(r),
                Some(Err(msg)) => Err(msg.into()),
                None => Err("no canned response".into()),
            }
        }
    }
}
