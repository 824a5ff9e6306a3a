use std::time::Duration;
use async_trait::async_trait;
use bytes::Bytes;
use super::error::BoxError;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Status and fully-read body of an HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

/// Sends one request and hands back the complete response.
///
/// Implementations read the whole body before returning, so the connection is
/// released whatever the caller does with the result.
#[async_trait]
pub trait HttpTransport: Send + Sync + 'static {
    async fn execute(&self, request: reqwest::Request) -> Result<RawResponse, BoxError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport { client: reqwest::Client }

impl ReqwestTransport {
    pub fn new() -> Result<Self, reqwest::Error> { Self::with_timeout(REQUEST_TIMEOUT) }

    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: reqwest::Request) -> Result<RawResponse, BoxError> {
        let resp = self.client.execute(request).await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?;
        Ok(RawResponse { status, body })
    }
}
