use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use mixbuddy_core::CocktailAggregator;
use std::sync::Arc;

use super::{load_inventory, CocktailDetailResponse};

#[utoipa::path(
    get,
    path = "/api/cocktails/{id}",
    tag = "cocktails",
    params(
        ("id" = String, Path, description = "TheCocktailDB drink ID")
    ),
    responses(
        (status = 200, description = "Cocktail evaluated against the user's inventory", body = CocktailDetailResponse),
        (status = 404, description = "Cocktail not found", body = ErrorResponse),
        (status = 502, description = "Recipe source unavailable", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_cocktail(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    State(cocktails): State<Arc<CocktailAggregator>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let inventory = match load_inventory(&pool, user.id) {
        Ok(inventory) => inventory,
        Err(response) => return response,
    };

    match cocktails.recipe(id.trim(), &inventory).await {
        Ok(Some(detail)) => Json(CocktailDetailResponse::from(detail)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Cocktail not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(id = %id, error = %e, "cocktail lookup failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "Recipe source unavailable".to_string(),
                }),
            )
                .into_response()
        }
    }
}
