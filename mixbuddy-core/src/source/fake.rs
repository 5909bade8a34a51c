//! In-memory recipe source for testing.
//!
//! Serves recipes from maps built up front, can be told to fail specific
//! lookups, and counts every call so tests can assert on fan-out.

use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::{HashMap, HashSet};

use super::RecipeSource;
use crate::error::{FetchError, SourceError};
use crate::normalize::IngredientName;
use crate::types::{Recipe, RecipeStub};

#[derive(Default)]
pub struct FakeSource {
    recipes: HashMap<String, Recipe>,
    by_ingredient: HashMap<IngredientName, Vec<RecipeStub>>,
    failing_ingredients: HashSet<IngredientName>,
    failing_ids: HashSet<String>,
    unavailable: bool,
    calls: DashMap<String, usize>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a recipe. It is listed under each of its own ingredients and
    /// findable by name search.
    pub fn with_recipe(mut self, recipe: Recipe) -> Self {
        let stub = RecipeStub {
            id: recipe.id.clone(),
            name: recipe.name.clone(),
        };
        for ingredient in &recipe.ingredients {
            let listing = self.by_ingredient.entry(ingredient.key()).or_default();
            if !listing.iter().any(|s| s.id == stub.id) {
                listing.push(stub.clone());
            }
        }
        self.recipes.insert(recipe.id.clone(), recipe);
        self
    }

    /// List an extra stub under `ingredient`, e.g. an id with no details.
    pub fn with_listing(mut self, ingredient: &str, stub: RecipeStub) -> Self {
        self.by_ingredient
            .entry(IngredientName::new(ingredient))
            .or_default()
            .push(stub);
        self
    }

    /// Make `find_by_ingredient` fail for one ingredient.
    pub fn failing_ingredient(mut self, ingredient: &str) -> Self {
        self.failing_ingredients
            .insert(IngredientName::new(ingredient));
        self
    }

    /// Make `get_details` fail for one recipe id.
    pub fn failing_id(mut self, id: &str) -> Self {
        self.failing_ids.insert(id.to_string());
        self
    }

    /// Make every call fail.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Number of calls recorded under `key`, e.g. `"details:11007"`,
    /// `"ingredient:gin"` or `"search:margarita"`.
    pub fn call_count(&self, key: &str) -> usize {
        self.calls.get(key).map(|count| *count).unwrap_or(0)
    }

    fn record(&self, key: String) {
        *self.calls.entry(key).or_insert(0) += 1;
    }

    fn outage(what: &str) -> SourceError {
        SourceError::Unavailable(FetchError::Status {
            status: 503,
            url: format!("fake://{}", what),
        })
    }
}

#[async_trait]
impl RecipeSource for FakeSource {
    async fn find_by_ingredient(
        &self,
        ingredient: &IngredientName,
    ) -> Result<Vec<RecipeStub>, SourceError> {
        self.record(format!("ingredient:{}", ingredient));
        if self.unavailable || self.failing_ingredients.contains(ingredient) {
            return Err(Self::outage(ingredient.as_str()));
        }
        Ok(self
            .by_ingredient
            .get(ingredient)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_details(&self, id: &str) -> Result<Option<Recipe>, SourceError> {
        self.record(format!("details:{}", id));
        if self.unavailable || self.failing_ids.contains(id) {
            return Err(Self::outage(id));
        }
        Ok(self.recipes.get(id).cloned())
    }

    async fn search_by_name(&self, query: &str) -> Result<Vec<Recipe>, SourceError> {
        let query = query.trim().to_lowercase();
        self.record(format!("search:{}", query));
        if self.unavailable {
            return Err(Self::outage(&query));
        }
        let mut found: Vec<Recipe> = self
            .recipes
            .values()
            .filter(|r| r.name.to_lowercase().contains(&query))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(found)
    }
}
