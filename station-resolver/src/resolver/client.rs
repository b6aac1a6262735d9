//! HTTP resolver backed by the public station and postal code APIs.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::Candidate;

use super::Resolver;
use super::error::ResolveError;
use super::types::{AddressResponse, StationsEnvelope};

/// Default base URL for the HeartRails Express station API.
const DEFAULT_STATION_URL: &str = "https://express.heartrails.com/api/json";

/// Default base URL for the Japan postal code API.
const DEFAULT_ADDRESS_URL: &str = "https://jp-postal-code-api.ttskch.com/api/v1";

/// Maximum number of body characters kept in a JSON error.
const BODY_SNIPPET_CHARS: usize = 500;

/// Configuration for the HTTP resolver.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Base URL for station searches
    pub station_base_url: String,
    /// Base URL for postal code searches
    pub address_base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Ignore proxies configured in the environment
    pub no_proxy: bool,
}

impl ResolverConfig {
    /// Create a config pointing at the public services.
    pub fn new() -> Self {
        Self {
            station_base_url: DEFAULT_STATION_URL.to_string(),
            address_base_url: DEFAULT_ADDRESS_URL.to_string(),
            timeout_secs: 30,
            no_proxy: false,
        }
    }

    /// Set a custom station API URL (for testing).
    pub fn with_station_url(mut self, url: impl Into<String>) -> Self {
        self.station_base_url = url.into();
        self
    }

    /// Set a custom postal code API URL (for testing).
    pub fn with_address_url(mut self, url: impl Into<String>) -> Self {
        self.address_base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Connect directly, bypassing `HTTP_PROXY` and friends.
    pub fn with_no_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolver that queries the remote services over HTTP.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpResolver {
    http: reqwest::Client,
    station_base_url: String,
    address_base_url: String,
}

impl HttpResolver {
    /// Create a new resolver with the given configuration.
    pub fn new(config: ResolverConfig) -> Result<Self, ResolveError> {
        let mut builder =
            reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs));
        if config.no_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            station_base_url: config.station_base_url,
            address_base_url: config.address_base_url,
        })
    }

    /// URL of the postal code document for `postal`.
    fn address_url(&self, postal: &str) -> String {
        format!(
            "{}/{}.json",
            self.address_base_url.trim_end_matches('/'),
            normalize_postal(postal)
        )
    }

    /// Send a request and decode a successful JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ResolveError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResolveError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| ResolveError::Json {
            message: e.to_string(),
            body: body.chars().take(BODY_SNIPPET_CHARS).collect(),
        })
    }
}

impl Resolver for HttpResolver {
    async fn lookup_station(&self, name: &str) -> Result<Vec<Candidate>, ResolveError> {
        let request = self
            .http
            .get(&self.station_base_url)
            .query(&[("method", "getStations"), ("name", name)]);

        let envelope: StationsEnvelope = self.get_json(request).await?;

        if let Some(message) = &envelope.response.error {
            debug!(station = %name, %message, "Station service returned no stations");
        }

        Ok(envelope
            .response
            .station
            .into_iter()
            .map(Candidate::from)
            .collect())
    }

    async fn lookup_address(&self, postal: &str) -> Result<String, ResolveError> {
        let url = self.address_url(postal);
        let response: AddressResponse = self.get_json(self.http.get(&url)).await?;
        Ok(response.formatted_japanese())
    }
}

/// Strip separators so `150-0043` and `1500043` address the same document.
fn normalize_postal(postal: &str) -> String {
    postal
        .chars()
        .filter(|c| !matches!(c, '-' | '‐' | '－') && !c.is_whitespace())
        .collect()
}
