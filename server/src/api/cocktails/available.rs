use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use axum::{extract::State, response::IntoResponse, Json};
use mixbuddy_core::CocktailAggregator;
use std::sync::Arc;

use super::{load_inventory, CocktailListResponse};

#[utoipa::path(
    get,
    path = "/api/cocktails/available",
    tag = "cocktails",
    responses(
        (status = 200, description = "Every cocktail using at least one owned ingredient, makeable first", body = CocktailListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn available_cocktails(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    State(cocktails): State<Arc<CocktailAggregator>>,
) -> impl IntoResponse {
    let inventory = match load_inventory(&pool, user.id) {
        Ok(inventory) => inventory,
        Err(response) => return response,
    };

    let recipes = cocktails.available(&inventory).await;
    tracing::debug!(
        ingredients = inventory.len(),
        cocktails = recipes.len(),
        "matched inventory"
    );

    Json(CocktailListResponse::from(recipes)).into_response()
}
