use axum::http::HeaderValue;
use mixbuddy_core::ConfigError;
use std::env;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: String,
    /// Origin allowed by CORS. None allows any origin.
    pub cors_allow_origin: Option<HeaderValue>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `DATABASE_URL`: Postgres connection string
    ///
    /// Optional:
    /// - `MIXBUDDY_BIND_ADDR`: listen address (default: "0.0.0.0:3000")
    /// - `MIXBUDDY_CORS_ALLOW_ORIGIN`: a single allowed origin (default: "*")
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let bind_addr = env::var("MIXBUDDY_BIND_ADDR")
            .ok()
            .filter(|addr| !addr.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let cors_allow_origin = parse_cors_origin(env::var("MIXBUDDY_CORS_ALLOW_ORIGIN").ok())?;

        Ok(Self {
            database_url,
            bind_addr,
            cors_allow_origin,
        })
    }
}

fn parse_cors_origin(value: Option<String>) -> Result<Option<HeaderValue>, ConfigError> {
    let value = match value {
        Some(value) => value.trim().to_string(),
        None => return Ok(None),
    };
    if value.is_empty() || value == "*" {
        return Ok(None);
    }

    HeaderValue::from_str(&value)
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue {
            var: "MIXBUDDY_CORS_ALLOW_ORIGIN".to_string(),
            value,
        })
}
