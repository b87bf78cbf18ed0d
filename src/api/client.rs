use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

use super::deserializers::OneOrMany;
use super::http_client::get_http_client;
use super::types::{DirectoryRecord, LookupOutcome};
use super::Mode;
use crate::error::{LookupError, Result};

pub const DEFAULT_BASE_URL: &str = "https://its-api.uconn.edu";

/// Timeout for the startup connectivity probe; the probe only checks that the
/// host answers at all.
const SELF_TEST_TIMEOUT_SECS: u64 = 1;

/// Trait for directory record providers. Fetching, identity matching and
/// report rendering are separate operations so the interactive disambiguation
/// step can sit between them.
#[async_trait]
pub trait DirectoryProvider: Send + Sync {
    /// Issue the lookup request for `query`. Returns `NotFound` when the
    /// response holds no usable record; transport and API failures are errors.
    async fn lookup(&self, query: &str) -> Result<LookupOutcome>;

    /// The attribute value used for exact identity matching
    fn identity(&self, record: &DirectoryRecord) -> Option<String>;

    /// Human-readable line shown per candidate in the selection prompt
    fn label(&self, record: &DirectoryRecord) -> String;

    /// Render the report for one already-chosen record. Pure.
    fn report(&self, record: &DirectoryRecord) -> Result<String>;

    /// Get the record category this provider serves
    fn mode(&self) -> Mode;

    /// Get the base URL for this provider
    fn base_url(&self) -> &str;

    /// Check if the provider is configured properly
    fn is_configured(&self) -> bool;
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Bearer token for the directory API
    pub token: String,
    /// Base URL of the directory API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Maximum number of retries
    pub max_retries: u32,
    /// Base delay for exponential backoff (milliseconds)
    pub retry_base_delay: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: 30,
            max_retries: 3,
            retry_base_delay: 100,
            user_agent: format!("dirlook/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Registry mapping a lookup mode to its provider. Registration rejects
/// duplicate modes instead of shadowing.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<Mode, Box<dyn DirectoryProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry with the standard user and device providers.
    /// Group lookups intentionally have no provider yet.
    pub fn standard(config: ClientConfig) -> Result<Self> {
        let mut registry = Self::new();
        registry.register(Box::new(super::users::UserProvider::new(config.clone())))?;
        registry.register(Box::new(super::devices::DeviceProvider::new(config)))?;
        Ok(registry)
    }

    pub fn register(&mut self, provider: Box<dyn DirectoryProvider>) -> Result<()> {
        let mode = provider.mode();
        if self.providers.contains_key(&mode) {
            return Err(LookupError::DuplicateProvider(mode.as_str().to_string()));
        }
        self.providers.insert(mode, provider);
        Ok(())
    }

    pub fn get(&self, mode: Mode) -> Option<&dyn DirectoryProvider> {
        self.providers.get(&mode).map(|p| p.as_ref())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// Probe the API root to fail fast when the host is unreachable. Any HTTP
/// answer counts as reachable; only transport failures are fatal. Callers
/// await this before issuing the main request.
pub async fn self_test(config: &ClientConfig) -> Result<()> {
    let probe = get_http_client()
        .get(&config.base_url)
        .timeout(Duration::from_secs(SELF_TEST_TIMEOUT_SECS));

    match probe.send().await {
        Ok(_) => {
            debug!("Completed network self-test successfully.");
            Ok(())
        }
        Err(e) => Err(LookupError::Unreachable(e.to_string())),
    }
}

/// Shared fetch helper: build the endpoint URL with a single query parameter,
/// perform one authenticated GET (with retry on transient failures) and parse
/// the record array.
pub(crate) async fn fetch_records(
    http_client: &Client,
    config: &ClientConfig,
    path: &str,
    param: (&str, &str),
) -> Result<Vec<DirectoryRecord>> {
    let url = Url::parse_with_params(&format!("{}{}", config.base_url, path), [param])
        .map_err(|e| LookupError::Parse(e.to_string()))?;

    let response = execute_with_retry(http_client, config, url).await?;
    let response_text = response.text().await.map_err(LookupError::Network)?;

    // An HTML body usually means the token was rejected upstream
    if response_text.trim_start().starts_with('<') {
        return Err(LookupError::api_error(
            "INVALID_RESPONSE",
            "API returned HTML instead of JSON.",
            Some("Please check that your API token is valid.".to_string()),
        ));
    }

    if response_text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let records: OneOrMany<DirectoryRecord> = serde_json::from_str(&response_text)
        .map_err(|e| {
            LookupError::Parse(format!(
                "Failed to parse API response as JSON: {}. Response starts with: {}",
                e,
                response_text.chars().take(100).collect::<String>()
            ))
        })?;

    Ok(records.into_vec())
}

/// Execute request with retry logic
async fn execute_with_retry(
    http_client: &Client,
    config: &ClientConfig,
    url: Url,
) -> Result<Response> {
    let mut last_error = None;
    let mut retry_delay = Duration::from_millis(config.retry_base_delay);

    for attempt in 0..config.max_retries {
        if attempt > 0 {
            sleep(retry_delay).await;
            retry_delay *= 2; // Exponential backoff
        }

        let request = http_client
            .get(url.clone())
            .bearer_auth(&config.token);

        match request.send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return Ok(response);
                }

                let error = if status.as_u16() == 429 {
                    LookupError::RateLimit
                } else if status.is_server_error() {
                    LookupError::ServerError(format!("Server returned status {}", status))
                } else {
                    LookupError::ApiError {
                        code: status.to_string(),
                        message: format!("API request failed with status {}", status),
                        hint: None,
                    }
                };

                if error.is_retryable() {
                    last_error = Some(error);
                } else {
                    return Err(error);
                }
            }
            Err(e) => {
                last_error = Some(LookupError::Network(e));
            }
        }
    }

    Err(last_error
        .unwrap_or_else(|| LookupError::Other("Request failed after all retries".to_string())))
}
