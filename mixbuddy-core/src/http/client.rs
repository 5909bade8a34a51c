//! HTTP client trait and implementations.

use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::error::FetchError;

use super::cache::{CacheStats, ResponseCache};

/// Trait for HTTP clients, enabling mockability in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET a URL and return the body as text. Non-2xx statuses are errors.
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Configuration for CachingClient.
#[derive(Clone)]
pub struct CachingClientBuilder {
    cache_ttl: Duration,
    timeout: Duration,
    user_agent: String,
}

impl Default for CachingClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CachingClientBuilder {
    /// Create a new builder with default settings: 10 minute cache, 15 second timeout.
    pub fn new() -> Self {
        Self {
            cache_ttl: Duration::from_secs(600),
            timeout: Duration::from_secs(15),
            user_agent: format!("MixBuddy/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set how long responses stay cached. Zero disables caching.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Build the CachingClient.
    pub fn build(self) -> Result<CachingClient, reqwest::Error> {
        let inner = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()?;

        let cache = (!self.cache_ttl.is_zero()).then(|| ResponseCache::new(self.cache_ttl));

        Ok(CachingClient {
            inner: Arc::new(inner),
            cache,
        })
    }
}

/// Production HTTP client with an in-memory TTL cache keyed by URL.
pub struct CachingClient {
    /// Shared reqwest client for connection pooling.
    inner: Arc<reqwest::Client>,
    /// None when caching is disabled.
    cache: Option<ResponseCache>,
}

impl CachingClient {
    /// Create a new CachingClient with default configuration.
    pub fn new() -> Result<Self, reqwest::Error> {
        CachingClientBuilder::new().build()
    }

    /// Get a builder for custom configuration.
    pub fn builder() -> CachingClientBuilder {
        CachingClientBuilder::new()
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(ResponseCache::stats)
    }

    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }
}

#[async_trait]
impl HttpClient for CachingClient {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        if let Some(cache) = &self.cache {
            if let Some(body) = cache.get(url) {
                tracing::debug!(url, "cache hit");
                return Ok(body);
            }
        }

        tracing::debug!(url, "network: fetching (not cached)");
        let response = self.inner.get(parsed).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url, status = %status, "network: request failed");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        let body = String::from_utf8(bytes.to_vec())
            .map_err(|e| FetchError::InvalidEncoding(format!("Invalid UTF-8 in response: {}", e)))?;

        tracing::debug!(url, status = %status, "network: fetched successfully");
        if let Some(cache) = &self.cache {
            cache.put(url, body.clone());
        }

        Ok(body)
    }
}

/// Mock response for testing.
#[derive(Clone)]
pub enum MockResponse {
    Text(String),
    Status(u16),
    Error(String),
}

/// Mock HTTP client for testing. Records how often each URL was requested.
pub struct MockClient {
    responses: HashMap<String, MockResponse>,
    requests: DashMap<String, usize>,
}

impl MockClient {
    /// Create a new empty mock client.
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            requests: DashMap::new(),
        }
    }

    /// Add a response for a URL.
    pub fn with_response(mut self, url: &str, response: MockResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    /// Add a text body for a URL.
    pub fn with_text(self, url: &str, body: &str) -> Self {
        self.with_response(url, MockResponse::Text(body.to_string()))
    }

    /// Answer a URL with a non-success status.
    pub fn with_status(self, url: &str, status: u16) -> Self {
        self.with_response(url, MockResponse::Status(status))
    }

    /// Add a transport error for a URL.
    pub fn with_error(self, url: &str, error: &str) -> Self {
        self.with_response(url, MockResponse::Error(error.to_string()))
    }

    /// Number of times `url` was requested.
    pub fn request_count(&self, url: &str) -> usize {
        self.requests.get(url).map(|count| *count).unwrap_or(0)
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        *self.requests.entry(url.to_string()).or_insert(0) += 1;

        match self.responses.get(url) {
            Some(MockResponse::Text(body)) => Ok(body.clone()),
            Some(MockResponse::Status(status)) => Err(FetchError::Status {
                status: *status,
                url: url.to_string(),
            }),
            Some(MockResponse::Error(e)) => Err(FetchError::InvalidUrl(e.clone())),
            None => Err(FetchError::InvalidUrl(format!(
                "No mock response for URL: {}",
                url
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client_counts_requests() {
        let client = MockClient::new()
            .with_text("https://example.com/a", "hello")
            .with_status("https://example.com/b", 503);

        assert_eq!(client.fetch_text("https://example.com/a").await.unwrap(), "hello");
        assert_eq!(client.fetch_text("https://example.com/a").await.unwrap(), "hello");
        assert!(matches!(
            client.fetch_text("https://example.com/b").await,
            Err(FetchError::Status { status: 503, .. })
        ));
        assert!(client.fetch_text("https://example.com/c").await.is_err());

        assert_eq!(client.request_count("https://example.com/a"), 2);
        assert_eq!(client.request_count("https://example.com/b"), 1);
        assert_eq!(client.request_count("https://example.com/d"), 0);
    }

    #[test]
    fn test_zero_ttl_disables_cache() {
        let client = CachingClient::builder()
            .cache_ttl(Duration::ZERO)
            .build()
            .unwrap();
        assert!(client.cache_stats().is_none());

        let client = CachingClient::new().unwrap();
        assert_eq!(client.cache_stats(), Some(CacheStats::default()));
    }

    #[tokio::test]
    async fn test_invalid_url_rejected_before_network() {
        let client = CachingClient::new().unwrap();
        assert!(matches!(
            client.fetch_text("not a url").await,
            Err(FetchError::InvalidUrl(_))
        ));
    }
}
