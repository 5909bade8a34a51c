use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use mixbuddy_core::CocktailAggregator;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use super::{load_inventory, CocktailListResponse};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Part of a cocktail name
    pub q: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/cocktails/search",
    tag = "cocktails",
    params(SearchParams),
    responses(
        (status = 200, description = "Cocktails whose name matches, makeable first", body = CocktailListResponse),
        (status = 400, description = "Missing or blank query", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn search_cocktails(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    State(cocktails): State<Arc<CocktailAggregator>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let query = params.q.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Search query cannot be empty".to_string(),
            }),
        )
            .into_response();
    }

    let inventory = match load_inventory(&pool, user.id) {
        Ok(inventory) => inventory,
        Err(response) => return response,
    };

    let recipes = cocktails.search_by_name(query, &inventory).await;
    Json(CocktailListResponse::from(recipes)).into_response()
}
