use std::{sync::Arc, time::Instant};
use bytes::Bytes;
use reqwest::{header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE}, Method};
use serde::Serialize;
use tracing::debug;
use super::error::ApiError;
use super::transport::HttpTransport;

const JSON: &str = "application/json";

/// Authenticated JSON requests against one base URL.
#[derive(Clone)]
pub(crate) struct Client {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    auth: HeaderValue,
}

impl Client {
    pub(crate) fn new(base_url: &str, token: &str, transport: Arc<dyn HttpTransport>) -> Result<Self, ApiError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| ApiError::Transport(Box::new(e)))?;
        auth.set_sensitive(true);
        Ok(Self { transport, base_url: base_url.trim_end_matches('/').to_string(), auth })
    }

    pub(crate) async fn get(&self, endpoint: &str) -> Result<Bytes, ApiError> {
        let req = self.new_request::<()>(Method::GET, endpoint, None)?;
        self.do_request(req).await
    }

    pub(crate) async fn post<P: Serialize + ?Sized>(&self, endpoint: &str, payload: &P) -> Result<Bytes, ApiError> {
        let req = self.new_request(Method::POST, endpoint, Some(payload))?;
        self.do_request(req).await
    }

    pub(crate) async fn put<P: Serialize + ?Sized>(&self, endpoint: &str, payload: &P) -> Result<Bytes, ApiError> {
        let req = self.new_request(Method::PUT, endpoint, Some(payload))?;
        self.do_request(req).await
    }

    pub(crate) async fn delete(&self, endpoint: &str) -> Result<Bytes, ApiError> {
        let req = self.new_request::<()>(Method::DELETE, endpoint, None)?;
        self.do_request(req).await
    }

    fn new_request<P: Serialize + ?Sized>(&self, method: Method, endpoint: &str, payload: Option<&P>) -> Result<reqwest::Request, ApiError> {
        let target = format!("{}{}", self.base_url, endpoint);
        let url = reqwest::Url::parse(&target).map_err(|source| ApiError::InvalidUrl { url: target.clone(), source })?;
        let mut req = reqwest::Request::new(method, url);
        if let Some(p) = payload {
            let data = serde_json::to_vec(p).map_err(ApiError::Encode)?;
            *req.body_mut() = Some(data.into());
        }
        let headers = req.headers_mut();
        headers.insert(AUTHORIZATION, self.auth.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        Ok(req)
    }

    async fn do_request(&self, req: reqwest::Request) -> Result<Bytes, ApiError> {
        let method = req.method().clone();
        let path = req.url().path().to_string();
        let start = Instant::now();
        debug!(event="api.request", %method, %path);
        let resp = self.transport.execute(req).await.map_err(ApiError::Transport)?;
        debug!(event="api.response", %method, %path, status=resp.status, bytes=resp.body.len(), took_ms=%start.elapsed().as_millis());
        if resp.status >= 400 {
            return Err(ApiError::Status { status: resp.status, body: String::from_utf8_lossy(&resp.body).into_owned() });
        }
        Ok(resp.body)
    }
}
