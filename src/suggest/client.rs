use super::types::*;
use crate::{Error, Result, config::ServiceConfig};
use async_trait::async_trait;
use reqwest::{StatusCode, header};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

pub const SUGGEST_PATH: &str = "/suggest";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SuggestionApi: Send + Sync {
    /// Sends one suggestion request. Implementations must not retry.
    async fn suggest(&self, request: &SuggestionRequest) -> Result<Suggestion>;
}

pub struct HttpSuggestionClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSuggestionClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        debug!("Created suggestion client for: {}", config.base_url);

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetches the greeting from the service root.
    pub async fn welcome(&self) -> Result<String> {
        let url = self.endpoint("/");
        debug!("Probing suggestion service at {}", url);

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(request_error(status, parse_json(&body).ok()));
        }

        let welcome: WelcomeResponse = serde_json::from_slice(&body)
            .map_err(|e| Error::malformed(format!("Failed to parse service greeting: {}", e)))?;

        welcome
            .message
            .ok_or_else(|| Error::malformed(UNEXPECTED_FORMAT_MESSAGE))
    }
}

#[async_trait]
impl SuggestionApi for HttpSuggestionClient {
    async fn suggest(&self, request: &SuggestionRequest) -> Result<Suggestion> {
        let url = self.endpoint(SUGGEST_PATH);
        debug!(
            "POST {} ({} bytes of code, {} bytes of prompt)",
            url,
            request.selected_code.len(),
            request.user_prompt.len()
        );

        let response = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("Suggestion request to {} failed: {}", url, e);
                e
            })?;

        let status = response.status();
        let body = response.bytes().await?;
        debug!("Received {} with {} byte body", status, body.len());

        // The body is parsed whatever the status so error details survive.
        let parsed = parse_json(&body);

        if !status.is_success() {
            return Err(request_error(status, parsed.ok()));
        }

        let value = parsed.map_err(|e| {
            Error::malformed(format!("Failed to parse response from the server: {}", e))
        })?;

        let wire: SuggestionResponse = serde_json::from_value(value)
            .map_err(|_| Error::malformed(UNEXPECTED_FORMAT_MESSAGE))?;

        Suggestion::try_from(wire)
    }
}

fn parse_json(body: &[u8]) -> serde_json::Result<Value> {
    serde_json::from_slice(body)
}

fn request_error(status: StatusCode, body: Option<Value>) -> Error {
    let detail = body
        .and_then(|value| serde_json::from_value::<ErrorResponse>(value).ok())
        .and_then(|body| body.detail);

    let message = detail.unwrap_or_else(|| {
        format!(
            "HTTP error! Status: {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        )
        .trim_end()
        .to_string()
    });

    Error::request(status.as_u16(), message)
}
