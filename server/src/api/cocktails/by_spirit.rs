use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use mixbuddy_core::{normalize, CocktailAggregator};
use std::sync::Arc;

use super::{load_inventory, CocktailListResponse};

#[utoipa::path(
    get,
    path = "/api/cocktails/by-spirit/{spirit}",
    tag = "cocktails",
    params(
        ("spirit" = String, Path, description = "Spirit or other ingredient name, e.g. \"gin\"")
    ),
    responses(
        (status = 200, description = "Cocktails using the spirit, makeable first", body = CocktailListResponse),
        (status = 400, description = "Blank spirit", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn cocktails_by_spirit(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    State(cocktails): State<Arc<CocktailAggregator>>,
    Path(spirit): Path<String>,
) -> impl IntoResponse {
    if normalize(&spirit).is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Spirit cannot be empty".to_string(),
            }),
        )
            .into_response();
    }

    let inventory = match load_inventory(&pool, user.id) {
        Ok(inventory) => inventory,
        Err(response) => return response,
    };

    let recipes = cocktails.by_spirit(&spirit, &inventory).await;
    Json(CocktailListResponse::from(recipes)).into_response()
}
