//! TheCocktailDB adapter configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

/// Default public API base (free test key "1").
pub const DEFAULT_BASE_URL: &str = "https://www.thecocktaildb.com/api/json/v1/1";

/// Default response cache lifetime in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 600;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Default number of recipe lookups in flight per aggregation.
pub const DEFAULT_MAX_CONCURRENT_LOOKUPS: usize = 8;

#[derive(Debug, Clone)]
pub struct CocktailDbConfig {
    /// API base URL, without trailing slash.
    pub base_url: String,
    /// How long responses stay cached. Zero disables the cache.
    pub cache_ttl: Duration,
    pub timeout: Duration,
    /// Upper bound on concurrent lookups issued by one aggregation.
    pub max_concurrent_lookups: usize,
}

impl Default for CocktailDbConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_concurrent_lookups: DEFAULT_MAX_CONCURRENT_LOOKUPS,
        }
    }
}

impl CocktailDbConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `MIXBUDDY_COCKTAILDB_BASE_URL`: API base (default: the public v1 test key)
    /// - `MIXBUDDY_COCKTAILDB_CACHE_TTL_SECS`: cache lifetime, 0 disables (default: 600)
    /// - `MIXBUDDY_COCKTAILDB_TIMEOUT_SECS`: request timeout (default: 15)
    /// - `MIXBUDDY_MAX_CONCURRENT_LOOKUPS`: fan-out limit, at least 1 (default: 8)
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("MIXBUDDY_COCKTAILDB_BASE_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let cache_ttl = Duration::from_secs(parse_var(
            "MIXBUDDY_COCKTAILDB_CACHE_TTL_SECS",
            DEFAULT_CACHE_TTL_SECS,
        )?);

        let timeout = Duration::from_secs(parse_var(
            "MIXBUDDY_COCKTAILDB_TIMEOUT_SECS",
            DEFAULT_TIMEOUT_SECS,
        )?);

        let max_concurrent_lookups: usize = parse_var(
            "MIXBUDDY_MAX_CONCURRENT_LOOKUPS",
            DEFAULT_MAX_CONCURRENT_LOOKUPS,
        )?;

        Ok(Self {
            base_url,
            cache_ttl,
            timeout,
            max_concurrent_lookups: max_concurrent_lookups.max(1),
        })
    }
}

fn parse_var<T: std::str::FromStr>(var: &str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}
