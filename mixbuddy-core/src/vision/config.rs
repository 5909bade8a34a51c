//! Vision configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_VISION_BASE_URL: &str = "https://vision.googleapis.com";

#[derive(Debug, Clone)]
pub struct VisionConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl VisionConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `GOOGLE_VISION_API_KEY`: API key with the Cloud Vision API enabled
    ///
    /// Optional:
    /// - `MIXBUDDY_VISION_BASE_URL`: API base (default: "https://vision.googleapis.com")
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("GOOGLE_VISION_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("GOOGLE_VISION_API_KEY".to_string()))?;

        let base_url = env::var("MIXBUDDY_VISION_BASE_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_VISION_BASE_URL.to_string());

        Ok(Self {
            api_key,
            base_url,
            timeout: Duration::from_secs(30),
        })
    }
}
