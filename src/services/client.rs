use std::time::Duration;

use reqwest::{Client as HttpClient, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{HubspotError, Result};

/// Production API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.hubapi.com";

/// Authentication for the HubSpot API
#[derive(Debug, Clone)]
pub enum Auth {
    /// Developer API key, sent as the `hapikey` query parameter on
    /// every request.
    ApiKey(String),
    /// OAuth access token, sent as a bearer Authorization header.
    AccessToken(String),
}

/// HubSpot API client
///
/// Owns the HTTP connection pool and the credentials. Endpoint groups
/// hang off it as resource handles:
///
/// ```text
/// let client = HubspotClient::new(Auth::ApiKey(key))?;
/// let companies = client.companies().page(&PageOptions::default()).await?;
/// ```
pub struct HubspotClient {
    http_client: HttpClient,
    base_url: String,
    auth: Auth,
}

impl HubspotClient {
    /// Create a client against the production API with default
    /// timeouts (30s total, 5s connect).
    pub fn new(auth: Auth) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, auth)
    }

    /// Create a client against a custom base URL, for proxies and
    /// tests.
    pub fn with_base_url(base_url: impl Into<String>, auth: Auth) -> Result<Self> {
        Self::with_timeouts(
            base_url,
            auth,
            Duration::from_secs(30),
            Duration::from_secs(5),
        )
    }

    /// Create a client with explicit request and connect timeouts.
    pub fn with_timeouts(
        base_url: impl Into<String>,
        auth: Auth,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            auth,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Auth::ApiKey(key) => request.query(&[("hapikey", key.as_str())]),
            Auth::AccessToken(token) => request.bearer_auth(token),
        }
    }

    pub(crate) async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Response> {
        let url = self.build_url(path);

        tracing::debug!("GET {}", url);

        let request = self.http_client.get(&url).query(query);
        let response = self.apply_auth(request).send().await?;

        self.handle_response(response).await
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self.get(path, query).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post(&self, path: &str, body: &Value) -> Result<Response> {
        let url = self.build_url(path);

        tracing::debug!("POST {}", url);

        let request = self.http_client.post(&url).json(body);
        let response = self.apply_auth(request).send().await?;

        self.handle_response(response).await
    }

    pub(crate) async fn post_json<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T> {
        let response = self.post(path, body).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn put(&self, path: &str, body: &Value) -> Result<Response> {
        let url = self.build_url(path);

        tracing::debug!("PUT {}", url);

        let request = self.http_client.put(&url).json(body);
        let response = self.apply_auth(request).send().await?;

        self.handle_response(response).await
    }

    pub(crate) async fn put_json<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T> {
        let response = self.put(path, body).await?;
        Ok(response.json().await?)
    }

    /// PUT without a request body, for link-style endpoints.
    pub(crate) async fn put_empty(&self, path: &str) -> Result<Response> {
        let url = self.build_url(path);

        tracing::debug!("PUT {}", url);

        let request = self.http_client.put(&url);
        let response = self.apply_auth(request).send().await?;

        self.handle_response(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<Response> {
        let url = self.build_url(path);

        tracing::debug!("DELETE {}", url);

        let request = self.http_client.delete(&url);
        let response = self.apply_auth(request).send().await?;

        self.handle_response(response).await
    }

    /// Map non-success responses to errors, pulling the message out of
    /// the JSON error body when there is one.
    async fn handle_response(&self, response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let path = response.url().path().to_string();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read body".to_string());

        tracing::error!("HubSpot API error ({}) on {}: {}", status.as_u16(), path, error_body);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(HubspotError::Unauthorized),
            StatusCode::NOT_FOUND => Err(HubspotError::NotFound(path)),
            _ => {
                let message = if let Ok(json) = serde_json::from_str::<Value>(&error_body) {
                    json.get("message")
                        .or_else(|| json.get("error"))
                        .and_then(|v| v.as_str())
                        .unwrap_or(&error_body)
                        .to_string()
                } else {
                    error_body
                };

                Err(HubspotError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}
