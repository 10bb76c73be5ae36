//! Asynchronous JetAPI client implementation.

use crate::models::ScrapeResult;
use crate::Result;
use async_trait::async_trait;
use jetapi_core::client::ClientConfig;
use jetapi_core::config::JetApiConfig;
use jetapi_core::query::QueryParameters;
use jetapi_core::Error;
use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};
use url::Url;

const USER_AGENT: &str = concat!("jetapi-client/", env!("CARGO_PKG_VERSION"));

/// Source of JSON documents for a query URL.
///
/// [`JetApiClient`] is the HTTP implementation; sessions only depend on this
/// trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    /// Fetch and parse the JSON document at `url`.
    async fn fetch_json(&self, url: &str) -> Result<Value>;
}

/// Builder for [`JetApiClient`].
#[derive(Debug, Clone)]
pub struct JetApiClientBuilder {
    config: JetApiConfig,
    http_config: ClientConfig,
}

impl JetApiClientBuilder {
    /// Create a new builder from a [`JetApiConfig`].
    #[must_use]
    pub fn new(config: JetApiConfig) -> Self {
        let http_config = ClientConfig::from_config(&config);
        Self {
            config,
            http_config,
        }
    }

    /// Override the HTTP client configuration used when building the client.
    #[must_use]
    pub fn with_http_config(mut self, http_config: ClientConfig) -> Self {
        self.http_config = http_config;
        self
    }

    /// Finalise the builder and create the [`JetApiClient`].
    pub fn build(self) -> Result<JetApiClient> {
        self.config.parse_api_url()?;
        let http = self.http_config.build_http_client(USER_AGENT)?;

        Ok(JetApiClient {
            http,
            api_url: self.config.api_url,
        })
    }
}

/// Asynchronous client for the JetAPI lookup endpoint.
///
/// Every call is a single GET with no retry.
#[derive(Clone)]
pub struct JetApiClient {
    http: Client,
    api_url: String,
}

impl JetApiClient {
    /// Construct a client for the given query endpoint with default settings.
    pub fn new(api_url: impl Into<String>) -> Result<Self> {
        Self::from_config(&JetApiConfig::new(api_url)?)
    }

    /// Construct a client directly from the configuration.
    pub fn from_config(config: &JetApiConfig) -> Result<Self> {
        JetApiClientBuilder::new(config.clone()).build()
    }

    /// Start a builder pre-populated with the provided configuration.
    #[must_use]
    pub fn builder(config: JetApiConfig) -> JetApiClientBuilder {
        JetApiClientBuilder::new(config)
    }

    /// Return the query endpoint.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Default query parameters for `registration` against this endpoint.
    #[must_use]
    pub fn parameters(&self, registration: impl Into<String>) -> QueryParameters {
        QueryParameters::new(self.api_url.as_str(), registration)
    }

    /// Look up an aircraft and decode the response.
    pub async fn lookup(&self, params: &QueryParameters) -> Result<ScrapeResult> {
        let value = self.get_json(&params.build()).await?;
        serde_json::from_value(value).map_err(|err| {
            Error::ParseError(format!(
                "Unexpected lookup response for `{}`: {err}",
                params.registration
            ))
        })
    }

    /// Send one GET to `url` and parse the body as JSON.
    pub async fn get_json(&self, url: &str) -> Result<Value> {
        let url = Url::parse(url)
            .map_err(|err| Error::InvalidEndpoint(format!("Invalid query URL `{url}`: {err}")))?;

        info!(url = %url, "Sending JetAPI request");

        let response = self
            .http
            .get(url.clone())
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(url = %url, %status, "JetAPI request failed");
            return Err(Error::from_status(status, message));
        }

        response.json::<Value>().await.map_err(|err| {
            warn!(url = %url, "JetAPI returned a non-JSON body");
            Error::ParseError(format!("Failed to parse JetAPI response from `{url}`: {err}"))
        })
    }
}

#[async_trait]
impl JsonFetcher for JetApiClient {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        self.get_json(url).await
    }
}
