//! Rate fetching from commodities-api.com.
//!
//! Builds the request, sends it through a [`Transport`], classifies the
//! outcome and inverts the returned rates.

use chrono::NaiveDate;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::rates::{invert_envelope, Envelope};
use crate::transport::{HttpTransport, RawResponse, Transport};
use crate::{API_BASE_URL, DEFAULT_ENDPOINT};

/// Longest body excerpt kept in an API error message
const MAX_ERROR_BODY_CHARS: usize = 256;

/// Fetcher configuration.
///
/// `access_key` is the fallback used when a request carries no key of its own.
/// The binary fills it from the `API_KEY` environment variable.
#[derive(Clone)]
pub struct FetcherConfig {
    pub base_url: String,
    pub access_key: Option<String>,
    pub timeout: Option<Duration>,
}

impl fmt::Debug for FetcherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetcherConfig")
            .field("base_url", &self.base_url)
            .field("access_key", &self.access_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            access_key: None,
            timeout: None,
        }
    }
}

/// A single rates query
#[derive(Debug, Clone, PartialEq)]
pub struct RateRequest {
    pub base: String,
    pub symbols: Vec<String>,
    pub endpoint: String,
    pub access_key: Option<String>,
}

impl RateRequest {
    /// Create a request against the `latest` endpoint
    pub fn new<I, S>(base: &str, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base: base.to_string(),
            symbols: symbols.into_iter().map(Into::into).collect(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_key: None,
        }
    }

    /// Create a request for rates on a past date
    pub fn historical<I, S>(base: &str, symbols: I, date: NaiveDate) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(base, symbols).with_endpoint(&date.format("%Y-%m-%d").to_string())
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_access_key(mut self, access_key: &str) -> Self {
        self.access_key = Some(access_key.to_string());
        self
    }

    /// Symbols as sent on the wire (comma-joined)
    pub fn symbols_param(&self) -> String {
        self.symbols.join(",")
    }
}

/// Commodity rate fetcher
pub struct RateFetcher<T = HttpTransport> {
    config: FetcherConfig,
    transport: T,
}

impl RateFetcher<HttpTransport> {
    /// Create a fetcher backed by reqwest
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> RateFetcher<T> {
    /// Create a fetcher with a custom transport
    pub fn with_transport(config: FetcherConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Get the config
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Request URL for an endpoint
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint)
    }

    /// Fetch rates and invert them.
    ///
    /// Issues exactly one GET. A missing key fails before the transport is
    /// touched; non-2xx statuses become [`FetchError::Api`]; everything else
    /// that goes wrong becomes [`FetchError::Unexpected`].
    pub async fn fetch(&self, request: &RateRequest) -> Result<Envelope, FetchError> {
        let access_key = resolve_access_key(
            request.access_key.as_deref(),
            self.config.access_key.as_deref(),
        )?;

        let url = self.endpoint_url(&request.endpoint);
        let symbols = request.symbols_param();
        let query = [
            ("access_key", access_key),
            ("base", request.base.as_str()),
            ("symbols", symbols.as_str()),
        ];

        debug!(%url, base = %request.base, %symbols, "requesting rates");
        let response = self.transport.get(&url, &query).await?;

        parse_response(response)
    }
}

/// Pick the request key, falling back to the configured one. Empty keys count as absent.
fn resolve_access_key<'a>(
    explicit: Option<&'a str>,
    configured: Option<&'a str>,
) -> Result<&'a str, FetchError> {
    explicit
        .filter(|k| !k.is_empty())
        .or_else(|| configured.filter(|k| !k.is_empty()))
        .ok_or_else(FetchError::missing_access_key)
}

fn parse_response(response: RawResponse) -> Result<Envelope, FetchError> {
    if !response.status.is_success() {
        let message = api_error_message(&response);
        warn!(status = response.status.as_u16(), %message, "rates request rejected");
        return Err(FetchError::Api {
            status: response.status.as_u16(),
            message,
        });
    }

    let body: Value = serde_json::from_str(&response.body).map_err(FetchError::unexpected)?;
    let mut envelope = Envelope::from_value(body).map_err(FetchError::unexpected)?;

    invert_envelope(&mut envelope);
    debug!(
        rates = envelope.rates().map_or(0, |r| r.len()),
        "inverted rates"
    );

    Ok(envelope)
}

fn api_error_message(response: &RawResponse) -> String {
    let reason = response
        .status
        .canonical_reason()
        .unwrap_or("Unknown status");
    let body = response.body.trim();

    if body.is_empty() {
        return reason.to_string();
    }

    let mut excerpt: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    if body.chars().count() > MAX_ERROR_BODY_CHARS {
        excerpt.push_str("...");
    }
    format!("{}: {}", reason, excerpt)
}
