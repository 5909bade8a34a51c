//! The recipe source boundary.

mod fake;

pub use fake::FakeSource;

use async_trait::async_trait;

use crate::error::SourceError;
use crate::normalize::IngredientName;
use crate::types::{Recipe, RecipeStub};

/// Anything that can list and describe recipes.
///
/// "Nothing found" is always an empty result or `None`; `Err` is reserved for
/// the source being unreachable or answering garbage.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Recipes that list `ingredient`.
    async fn find_by_ingredient(
        &self,
        ingredient: &IngredientName,
    ) -> Result<Vec<RecipeStub>, SourceError>;

    /// Full details for one recipe, or `None` if the source does not know it.
    async fn get_details(&self, id: &str) -> Result<Option<Recipe>, SourceError>;

    /// Recipes whose name matches `query`, with full ingredient lists.
    async fn search_by_name(&self, query: &str) -> Result<Vec<Recipe>, SourceError>;
}
