//! HTTP plumbing shared by all service calls

use reqwest::{header, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::{
    config::ApiConfig,
    error::{AppError, AppResult},
};

/// HTTP client bound to one service base URL
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client from configuration
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self::with_client(http, &config.base_url))
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a JSON request, attaching the bearer token when given
    pub(crate) fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self
            .http
            .request(method, self.url(path))
            .header(header::CONTENT_TYPE, "application/json");

        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and decode the JSON body of a 2xx response
    pub(crate) async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        let body = self.send_raw(builder).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Like [`send`](Self::send) but an empty 2xx body yields `T::default()`
    pub(crate) async fn send_or_default<T: DeserializeOwned + Default>(
        &self,
        builder: RequestBuilder,
    ) -> AppResult<T> {
        let body = self.send_raw(builder).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }
        Ok(serde_json::from_slice(&body)?)
    }

    async fn send_raw(&self, builder: RequestBuilder) -> AppResult<Vec<u8>> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let err = AppError::from_response(status, &body);
            tracing::debug!("Service answered {}: {}", status, err);
            return Err(err);
        }

        Ok(body.to_vec())
    }
}
