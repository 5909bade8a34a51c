pub mod available;
pub mod by_spirit;
pub mod get;
pub mod search;

use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::inventory::InventoryStore;
use crate::AppState;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use mixbuddy_core::{Inventory, RecipeDetail, RecipeIngredient, RecipeSummary};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

/// Returns the router for /api/cocktails endpoints (mounted at /api/cocktails)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/available", get(available::available_cocktails))
        .route("/by-spirit/{spirit}", get(by_spirit::cocktails_by_spirit))
        .route("/search", get(search::search_cocktails))
        .route("/{id}", get(get::get_cocktail))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        available::available_cocktails,
        by_spirit::cocktails_by_spirit,
        search::search_cocktails,
        get::get_cocktail,
    ),
    components(schemas(
        CocktailSummary,
        CocktailListResponse,
        CocktailDetailResponse,
        IngredientResponse,
    ))
)]
pub struct ApiDoc;

/// One cocktail in a ranked list.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CocktailSummary {
    pub id: String,
    pub name: String,
    /// Every ingredient is in the user's inventory
    pub can_make: bool,
    /// Normalized names of the ingredients the user lacks, in recipe order
    pub missing: Vec<String>,
    pub image_url: Option<String>,
}

impl CocktailSummary {
    pub fn new(summary: RecipeSummary, image_url: Option<String>) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            can_make: summary.can_make,
            missing: summary.missing.into_iter().map(|m| m.into_string()).collect(),
            image_url,
        }
    }
}

impl From<RecipeDetail> for CocktailSummary {
    fn from(detail: RecipeDetail) -> Self {
        Self::new(detail.summary(), detail.image_url)
    }
}

/// Makeable cocktails first, then by name.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CocktailListResponse {
    pub cocktails: Vec<CocktailSummary>,
}

impl From<Vec<RecipeDetail>> for CocktailListResponse {
    fn from(details: Vec<RecipeDetail>) -> Self {
        Self {
            cocktails: details.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientResponse {
    /// As the recipe source spells it
    pub name: String,
    pub measure: Option<String>,
}

impl From<RecipeIngredient> for IngredientResponse {
    fn from(ingredient: RecipeIngredient) -> Self {
        Self {
            name: ingredient.name,
            measure: ingredient.measure,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CocktailDetailResponse {
    pub id: String,
    pub name: String,
    pub can_make: bool,
    pub missing: Vec<String>,
    pub instructions: Option<String>,
    pub glass: Option<String>,
    pub image_url: Option<String>,
    pub ingredients: Vec<IngredientResponse>,
}

impl From<RecipeDetail> for CocktailDetailResponse {
    fn from(detail: RecipeDetail) -> Self {
        Self {
            id: detail.id,
            name: detail.name,
            can_make: detail.can_make,
            missing: detail.missing.into_iter().map(|m| m.into_string()).collect(),
            instructions: detail.instructions,
            glass: detail.glass,
            image_url: detail.image_url,
            ingredients: detail.ingredients.into_iter().map(Into::into).collect(),
        }
    }
}

/// Load the user's inventory, releasing the connection before any recipe
/// lookups start.
pub(crate) fn load_inventory(pool: &DbPool, user_id: Uuid) -> Result<Inventory, Response> {
    let failed = |message: &str| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    };

    let mut conn = pool.get().map_err(|e| {
        tracing::error!("Failed to get database connection: {}", e);
        failed("Database connection failed")
    })?;

    InventoryStore::new(&mut conn, user_id).load().map_err(|e| {
        tracing::error!("Failed to load inventory: {}", e);
        failed("Failed to load inventory")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixbuddy_core::{evaluate, normalize, Recipe};

    fn margarita() -> Recipe {
        Recipe {
            id: "11007".to_string(),
            name: "Margarita".to_string(),
            instructions: Some("Rub the rim of the glass with the lime slice.".to_string()),
            glass: Some("Cocktail glass".to_string()),
            image_url: None,
            ingredients: vec![
                RecipeIngredient::new("Tequila", Some("1 1/2 oz".to_string())),
                RecipeIngredient::new("Triple sec", Some("1/2 oz".to_string())),
                RecipeIngredient::new("Lime juice", Some("1 oz".to_string())),
            ],
        }
    }

    fn detail(inventory: &[&str]) -> RecipeDetail {
        let inventory: Inventory = inventory.iter().collect();
        let recipe = margarita();
        let availability = evaluate(&inventory, &recipe.ingredients);
        RecipeDetail::from_recipe(recipe, availability)
    }

    #[test]
    fn test_summary_uses_normalized_missing() {
        let summary = CocktailSummary::from(detail(&["tequila"]));
        assert!(!summary.can_make);
        assert_eq!(summary.missing, vec!["triple sec", "lime juice"]);
    }

    #[test]
    fn test_detail_keeps_source_spelling() {
        let response =
            CocktailDetailResponse::from(detail(&["Tequila", "TRIPLE SEC", "lime juice"]));
        assert!(response.can_make);
        assert!(response.missing.is_empty());
        assert_eq!(response.ingredients[1].name, "Triple sec");
        assert_eq!(response.ingredients[2].measure.as_deref(), Some("1 oz"));
        assert_eq!(response.glass.as_deref(), Some("Cocktail glass"));
    }

    #[test]
    fn test_summary_keeps_image() {
        let mut detail = detail(&["tequila", "triple sec", "lime juice"]);
        detail.image_url = Some("https://cdn.test/margarita.jpg".to_string());

        let summary = CocktailSummary::from(detail);
        assert!(summary.can_make);
        assert_eq!(summary.id, "11007");
        assert_eq!(summary.image_url.as_deref(), Some("https://cdn.test/margarita.jpg"));
    }

    #[test]
    fn test_list_keeps_order() {
        let list = CocktailListResponse::from(vec![detail(&[]), detail(&["tequila"])]);
        assert_eq!(list.cocktails.len(), 2);
        assert_eq!(list.cocktails[0].missing.len(), 3);
        assert_eq!(normalize(&list.cocktails[1].missing[0]).as_str(), "triple sec");
    }
}
