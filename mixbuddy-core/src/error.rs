use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Invalid response encoding: {0}")]
    InvalidEncoding(String),
}

/// Failure talking to the recipe source.
///
/// A recipe that simply does not exist is not an error; lookups return `None`.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Recipe source unavailable: {0}")]
    Unavailable(#[from] FetchError),

    #[error("Failed to decode recipe source response: {0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: String, value: String },
}
