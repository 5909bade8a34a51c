//! [`RecipeSource`] backed by TheCocktailDB's JSON API.

mod config;
pub mod payload;

pub use config::{CocktailDbConfig, DEFAULT_BASE_URL};

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{FetchError, SourceError};
use crate::http::{CachingClient, HttpClient};
use crate::normalize::IngredientName;
use crate::source::RecipeSource;
use crate::types::{Recipe, RecipeStub};

pub struct CocktailDbSource {
    client: Arc<dyn HttpClient>,
    base_url: String,
}

impl CocktailDbSource {
    pub fn new(client: Arc<dyn HttpClient>, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a source with a caching reqwest client configured from `config`.
    pub fn from_config(config: &CocktailDbConfig) -> Result<Self, reqwest::Error> {
        let client = CachingClient::builder()
            .cache_ttl(config.cache_ttl)
            .timeout(config.timeout)
            .build()?;
        Ok(Self::new(Arc::new(client), &config.base_url))
    }

    /// `{base}/{endpoint}?{param}={value}` with the value percent-encoded.
    ///
    /// The resulting string is also the cache key, so the same request always
    /// produces the same URL.
    pub fn endpoint_url(
        &self,
        endpoint: &str,
        param: &str,
        value: &str,
    ) -> Result<String, FetchError> {
        let mut url = url::Url::parse(&format!("{}/{}", self.base_url, endpoint))
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut().append_pair(param, value);
        Ok(url.into())
    }

    async fn get(&self, endpoint: &str, param: &str, value: &str) -> Result<String, SourceError> {
        let url = self.endpoint_url(endpoint, param, value)?;
        Ok(self.client.fetch_text(&url).await?)
    }
}

#[async_trait]
impl RecipeSource for CocktailDbSource {
    async fn find_by_ingredient(
        &self,
        ingredient: &IngredientName,
    ) -> Result<Vec<RecipeStub>, SourceError> {
        let body = self.get("filter.php", "i", ingredient.as_str()).await?;
        payload::parse_stubs(&body)
    }

    async fn get_details(&self, id: &str) -> Result<Option<Recipe>, SourceError> {
        let body = self.get("lookup.php", "i", id).await?;
        Ok(payload::parse_recipes(&body)?.into_iter().next())
    }

    async fn search_by_name(&self, query: &str) -> Result<Vec<Recipe>, SourceError> {
        let body = self.get("search.php", "s", query.trim()).await?;
        payload::parse_recipes(&body)
    }
}
