use crate::{client_utils, storage::TOKEN_KEY, ApiEnvelope, ClientError, ClientResult, SessionStorage};
use reqwest::{
    header::{self, HeaderMap, HeaderName, HeaderValue},
    Client,
};
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};

pub const DEFAULT_BASE_URL: &str = "https://be.brainys.oasys.id/api";
/// Environment variable overriding the base URL.
pub const API_URL_ENV: &str = "BRAINYS_API_URL";

/// The remote generation service. Every endpoint answers with an
/// [`ApiEnvelope`].
#[async_trait::async_trait]
pub trait BrainysApi: Send + Sync {
    async fn get(&self, path: &str) -> ClientResult<ApiEnvelope>;
    async fn post(&self, path: &str, body: Value) -> ClientResult<ApiEnvelope>;
}

#[derive(Clone, Default)]
pub struct HttpApiOptions {
    pub base_url: Option<String>,
    pub headers: Option<HashMap<String, String>>,
    pub client: Option<Client>,
}

impl HttpApiOptions {
    /// Options with the base URL taken from `BRAINYS_API_URL` when set.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var(API_URL_ENV)
                .ok()
                .filter(|url| !url.trim().is_empty()),
            ..Self::default()
        }
    }
}

/// [`BrainysApi`] over HTTP. The bearer token is read from the session
/// storage on every request so that sign-in and sign-out take effect
/// immediately.
pub struct HttpApi {
    base_url: String,
    client: Client,
    headers: HashMap<String, String>,
    storage: Arc<dyn SessionStorage>,
}

impl HttpApi {
    #[must_use]
    pub fn new(storage: Arc<dyn SessionStorage>, mut options: HttpApiOptions) -> Self {
        let base_url = options
            .base_url
            .take()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let client = options.client.take().unwrap_or_default();

        let headers = options.headers.unwrap_or_default();

        Self {
            base_url,
            client,
            headers,
            storage,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request_headers(&self) -> ClientResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = self.storage.get(TOKEN_KEY).filter(|token| !token.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|error| {
                ClientError::InvalidInput(format!("Invalid session token header value: {error}"))
            })?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        for (key, value) in &self.headers {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|error| {
                ClientError::InvalidInput(format!("Invalid header name '{key}': {error}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|error| {
                ClientError::InvalidInput(format!("Invalid header value for '{key}': {error}"))
            })?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }
}

#[async_trait::async_trait]
impl BrainysApi for HttpApi {
    async fn get(&self, path: &str) -> ClientResult<ApiEnvelope> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let request = self.client.get(url).headers(self.request_headers()?);
        client_utils::send_json(request).await
    }

    async fn post(&self, path: &str, body: Value) -> ClientResult<ApiEnvelope> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let request = self
            .client
            .post(url)
            .headers(self.request_headers()?)
            .json(&body);
        client_utils::send_json(request).await
    }
}
