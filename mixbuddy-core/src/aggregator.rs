//! Cocktail aggregation: expand a seed (inventory, spirit or name query) into
//! recipes, evaluate each against the inventory, and rank the result.
//!
//! Source failures degrade rather than abort. A lookup that errors contributes
//! no recipes and is logged; a recipe id the source no longer knows is
//! skipped. Callers always get the best list that could be assembled.

use std::collections::{BTreeSet, HashSet};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::cocktaildb::CocktailDbConfig;
use crate::error::SourceError;
use crate::matcher::evaluate;
use crate::normalize::{IngredientName, Inventory};
use crate::source::RecipeSource;
use crate::types::{Recipe, RecipeDetail};

pub struct CocktailAggregator {
    source: Arc<dyn RecipeSource>,
    max_concurrent_lookups: usize,
}

impl CocktailAggregator {
    pub fn new(source: Arc<dyn RecipeSource>) -> Self {
        Self {
            source,
            max_concurrent_lookups: CocktailDbConfig::default().max_concurrent_lookups,
        }
    }

    /// Limit how many source calls one aggregation keeps in flight (minimum 1).
    pub fn with_max_concurrent_lookups(mut self, limit: usize) -> Self {
        self.max_concurrent_lookups = limit.max(1);
        self
    }

    /// Every recipe that uses at least one ingredient the user owns.
    ///
    /// A recipe reachable through several inventory ingredients is fetched and
    /// returned once.
    pub async fn available(&self, inventory: &Inventory) -> Vec<RecipeDetail> {
        if inventory.is_empty() {
            return Vec::new();
        }

        let ingredients: Vec<IngredientName> = inventory.iter().cloned().collect();
        let listings = self
            .fan_out(ingredients, |source, ingredient: IngredientName| async move {
                source.find_by_ingredient(&ingredient).await
            })
            .await;

        let mut ids = BTreeSet::new();
        for (ingredient, result) in listings {
            match result {
                Ok(stubs) => ids.extend(stubs.into_iter().map(|stub| stub.id)),
                Err(e) => {
                    tracing::warn!(
                        ingredient = %ingredient,
                        error = %e,
                        "ingredient lookup failed, skipping"
                    );
                }
            }
        }

        tracing::debug!(
            ingredients = inventory.len(),
            recipes = ids.len(),
            "expanded inventory"
        );

        let recipes = self.fetch_details(ids.into_iter().collect()).await;
        ranked(inventory, recipes)
    }

    /// Recipes listing one spirit, evaluated against the inventory.
    pub async fn by_spirit(&self, spirit: &str, inventory: &Inventory) -> Vec<RecipeDetail> {
        let spirit = IngredientName::new(spirit);
        if spirit.is_empty() {
            return Vec::new();
        }

        let stubs = match self.source.find_by_ingredient(&spirit).await {
            Ok(stubs) => stubs,
            Err(e) => {
                tracing::warn!(spirit = %spirit, error = %e, "spirit lookup failed");
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let ids: Vec<String> = stubs
            .into_iter()
            .map(|stub| stub.id)
            .filter(|id| seen.insert(id.clone()))
            .collect();

        let recipes = self.fetch_details(ids).await;
        ranked(inventory, recipes)
    }

    /// Recipes whose name matches `query`. The search response already holds
    /// full ingredient lists, so no per-recipe lookups are made.
    pub async fn search_by_name(&self, query: &str, inventory: &Inventory) -> Vec<RecipeDetail> {
        let recipes = match self.source.search_by_name(query).await {
            Ok(recipes) => recipes,
            Err(e) => {
                tracing::warn!(query, error = %e, "recipe search failed");
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let recipes = recipes
            .into_iter()
            .filter(|recipe| seen.insert(recipe.id.clone()))
            .collect();

        ranked(inventory, recipes)
    }

    /// One recipe evaluated against the inventory.
    ///
    /// Unlike the list operations this surfaces source failures: there is no
    /// partial answer to fall back to.
    pub async fn recipe(
        &self,
        id: &str,
        inventory: &Inventory,
    ) -> Result<Option<RecipeDetail>, SourceError> {
        let recipe = self.source.get_details(id).await?;
        Ok(recipe.map(|recipe| {
            let availability = evaluate(inventory, &recipe.ingredients);
            RecipeDetail::from_recipe(recipe, availability)
        }))
    }

    async fn fetch_details(&self, ids: Vec<String>) -> Vec<Recipe> {
        let results = self
            .fan_out(ids, |source, id: String| async move {
                source.get_details(&id).await
            })
            .await;

        results
            .into_iter()
            .filter_map(|(id, result)| match result {
                Ok(Some(recipe)) => Some(recipe),
                Ok(None) => {
                    tracing::debug!(id = %id, "recipe not found, skipping");
                    None
                }
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "recipe lookup failed, skipping");
                    None
                }
            })
            .collect()
    }

    /// Run `call` for every input with at most `max_concurrent_lookups` in
    /// flight, and wait for all of them. Results come back in completion order.
    async fn fan_out<T, R, F, Fut>(
        &self,
        inputs: Vec<T>,
        call: F,
    ) -> Vec<(T, Result<R, SourceError>)>
    where
        T: Clone + Send + 'static,
        R: Send + 'static,
        F: Fn(Arc<dyn RecipeSource>, T) -> Fut,
        Fut: Future<Output = Result<R, SourceError>> + Send + 'static,
    {
        let permits = Arc::new(Semaphore::new(self.max_concurrent_lookups));
        let mut tasks = JoinSet::new();

        for input in inputs {
            let lookup = call(self.source.clone(), input.clone());
            let permits = permits.clone();
            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await;
                (input, lookup.await)
            });
        }

        let mut results = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => tracing::warn!(error = %e, "recipe lookup task failed"),
            }
        }
        results
    }
}

/// Evaluate every recipe against the inventory and rank them.
fn ranked(inventory: &Inventory, recipes: Vec<Recipe>) -> Vec<RecipeDetail> {
    let mut details: Vec<RecipeDetail> = recipes
        .into_iter()
        .map(|recipe| {
            let availability = evaluate(inventory, &recipe.ingredients);
            RecipeDetail::from_recipe(recipe, availability)
        })
        .collect();
    rank(&mut details);
    details
}

/// Makeable recipes first, then by display name (plain byte-wise `str`
/// ordering, so case matters), then by id.
pub fn rank(recipes: &mut [RecipeDetail]) {
    recipes.sort_by(|a, b| {
        b.can_make
            .cmp(&a.can_make)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::source::FakeSource;
    use crate::types::{RecipeIngredient, RecipeStub};

    fn recipe(id: &str, name: &str, ingredients: &[&str]) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: name.to_string(),
            instructions: Some("Shake with ice and strain.".to_string()),
            glass: Some("Cocktail glass".to_string()),
            image_url: None,
            ingredients: ingredients
                .iter()
                .map(|i| RecipeIngredient::new(*i, Some("1 oz".to_string())))
                .collect(),
        }
    }

    fn names(recipes: &[RecipeDetail]) -> Vec<&str> {
        recipes.iter().map(|r| r.name.as_str()).collect()
    }

    fn bar() -> FakeSource {
        FakeSource::new()
            .with_recipe(recipe("1", "Daiquiri", &["Rum", "Lime Juice", "Sugar Syrup"]))
            .with_recipe(recipe("2", "Aviation", &["Gin", "Maraschino Liqueur", "Lemon Juice"]))
            .with_recipe(recipe("3", "Bee's Knees", &["Gin", "Honey", "Lemon Juice"]))
            .with_recipe(recipe("4", "Gimlet", &["Gin", "Lime Juice"]))
    }

    fn setup(source: FakeSource) -> (CocktailAggregator, Arc<FakeSource>) {
        let source = Arc::new(source);
        (CocktailAggregator::new(source.clone()), source)
    }

    #[tokio::test]
    async fn test_available_ranks_makeable_first() {
        let (aggregator, _) = setup(bar());
        let inventory: Inventory = [
            "rum",
            "lime juice",
            "sugar syrup",
            "gin",
            "honey",
            "lemon juice",
        ]
        .into_iter()
        .collect();

        let result = aggregator.available(&inventory).await;
        assert_eq!(
            names(&result),
            vec!["Bee's Knees", "Daiquiri", "Gimlet", "Aviation"]
        );
        assert_eq!(result[3].missing, vec![normalize("maraschino liqueur")]);
        assert!(result[..3].iter().all(|r| r.can_make));
    }

    #[tokio::test]
    async fn test_available_dedupes_recipes_reachable_twice() {
        let (aggregator, source) = setup(bar());
        let inventory: Inventory = ["Lime Juice", "Rum"].into_iter().collect();

        let result = aggregator.available(&inventory).await;
        assert_eq!(names(&result), vec!["Daiquiri", "Gimlet"]);
        assert_eq!(source.call_count("details:1"), 1);
        assert_eq!(source.call_count("details:4"), 1);
    }

    #[tokio::test]
    async fn test_available_empty_inventory() {
        let (aggregator, source) = setup(bar());
        assert!(aggregator.available(&Inventory::new()).await.is_empty());
        assert_eq!(source.call_count("ingredient:gin"), 0);
    }

    #[tokio::test]
    async fn test_available_survives_failed_ingredient_lookup() {
        let (aggregator, _) = setup(bar().failing_ingredient("gin"));
        let inventory: Inventory = ["gin", "rum"].into_iter().collect();

        let result = aggregator.available(&inventory).await;
        assert_eq!(names(&result), vec!["Daiquiri"]);
    }

    #[tokio::test]
    async fn test_available_skips_missing_and_failing_details() {
        let source = bar()
            .with_listing(
                "rum",
                RecipeStub {
                    id: "404".to_string(),
                    name: "Ghost".to_string(),
                },
            )
            .failing_id("4");
        let (aggregator, _) = setup(source);
        let inventory: Inventory = ["rum", "lime juice"].into_iter().collect();

        let result = aggregator.available(&inventory).await;
        assert_eq!(names(&result), vec!["Daiquiri"]);
    }

    #[tokio::test]
    async fn test_available_total_outage_is_empty() {
        let (aggregator, _) = setup(bar().unavailable());
        let inventory: Inventory = ["rum"].into_iter().collect();
        assert!(aggregator.available(&inventory).await.is_empty());
    }

    #[tokio::test]
    async fn test_available_is_idempotent() {
        let (aggregator, _) = setup(bar());
        let inventory: Inventory = ["gin", "lemon juice"].into_iter().collect();

        let first = aggregator.available(&inventory).await;
        let second = aggregator.available(&inventory).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_single_permit_still_completes() {
        let (aggregator, _) = setup(bar());
        let aggregator = aggregator.with_max_concurrent_lookups(0);
        let inventory: Inventory = ["gin"].into_iter().collect();
        assert_eq!(aggregator.available(&inventory).await.len(), 3);
    }

    #[tokio::test]
    async fn test_by_spirit_normalizes_and_dedupes() {
        let source = bar().with_listing(
            "gin",
            RecipeStub {
                id: "4".to_string(),
                name: "Gimlet".to_string(),
            },
        );
        let (aggregator, source) = setup(source);
        let inventory: Inventory = ["gin", "lime juice"].into_iter().collect();

        let result = aggregator.by_spirit("  GIN ", &inventory).await;
        assert_eq!(names(&result), vec!["Gimlet", "Aviation", "Bee's Knees"]);
        assert_eq!(source.call_count("ingredient:gin"), 1);
        assert_eq!(source.call_count("details:4"), 1);
    }

    #[tokio::test]
    async fn test_by_spirit_blank_or_failing() {
        let (aggregator, source) = setup(bar());
        assert!(aggregator.by_spirit("   ", &Inventory::new()).await.is_empty());
        assert_eq!(source.call_count("ingredient:"), 0);

        let (aggregator, _) = setup(bar().failing_ingredient("rum"));
        assert!(aggregator.by_spirit("rum", &Inventory::new()).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_uses_search_results_directly() {
        let (aggregator, source) = setup(bar());
        let inventory: Inventory = ["gin", "lime juice"].into_iter().collect();

        let result = aggregator.search_by_name("i", &inventory).await;
        assert_eq!(names(&result), vec!["Gimlet", "Aviation", "Daiquiri"]);
        assert_eq!(source.call_count("details:4"), 0);
    }

    #[tokio::test]
    async fn test_search_failure_is_empty() {
        let (aggregator, _) = setup(bar().unavailable());
        assert!(aggregator
            .search_by_name("gimlet", &Inventory::new())
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_recipe_lookup() {
        let (aggregator, _) = setup(bar().failing_id("2"));
        let inventory: Inventory = ["gin", "lime juice"].into_iter().collect();

        let gimlet = aggregator.recipe("4", &inventory).await.unwrap().unwrap();
        assert!(gimlet.can_make);
        assert_eq!(gimlet.summary().name, "Gimlet");

        assert!(aggregator.recipe("999", &inventory).await.unwrap().is_none());
        assert!(aggregator.recipe("2", &inventory).await.is_err());
    }

    #[test]
    fn test_rank_order() {
        let mut recipes = vec![
            RecipeDetail::from_recipe(
                recipe("a", "Daiquiri", &[]),
                crate::matcher::Availability {
                    can_make: true,
                    missing: vec![],
                },
            ),
            RecipeDetail::from_recipe(
                recipe("b", "Aviation", &[]),
                crate::matcher::Availability {
                    can_make: false,
                    missing: vec![normalize("gin")],
                },
            ),
            RecipeDetail::from_recipe(
                recipe("c", "Bee's Knees", &[]),
                crate::matcher::Availability {
                    can_make: true,
                    missing: vec![],
                },
            ),
        ];
        rank(&mut recipes);
        assert_eq!(names(&recipes), vec!["Bee's Knees", "Daiquiri", "Aviation"]);
    }

    #[test]
    fn test_rank_is_case_sensitive() {
        let available = || crate::matcher::Availability {
            can_make: true,
            missing: vec![],
        };
        let mut recipes = vec![
            RecipeDetail::from_recipe(recipe("1", "mojito", &[]), available()),
            RecipeDetail::from_recipe(recipe("2", "Negroni", &[]), available()),
            RecipeDetail::from_recipe(recipe("3", "Manhattan", &[]), available()),
        ];
        rank(&mut recipes);
        assert_eq!(names(&recipes), vec!["Manhattan", "Negroni", "mojito"]);
    }
}
