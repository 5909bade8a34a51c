use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::inventory::{AddItemError, InventoryStore};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::list::InventoryItemResponse;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddItemRequest {
    pub name: String,
}

#[utoipa::path(
    post,
    path = "/api/inventory",
    tag = "inventory",
    request_body(content = AddItemRequest, example = json!({"name": "Lime Juice"})),
    responses(
        (status = 201, description = "Ingredient added (name normalized)", body = InventoryItemResponse),
        (status = 400, description = "Empty or over-long name", body = ErrorResponse),
        (status = 409, description = "Ingredient already in inventory", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_item(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<AddItemRequest>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match InventoryStore::new(&mut conn, user.id).add(&request.name) {
        Ok(item) => {
            tracing::debug!(item = %item.name, "inventory item added");
            (StatusCode::CREATED, Json(InventoryItemResponse::from(item))).into_response()
        }
        Err(e) => {
            let (status, error) = match e {
                AddItemError::Blank | AddItemError::TooLong => {
                    (StatusCode::BAD_REQUEST, e.to_string())
                }
                AddItemError::AlreadyOwned => (StatusCode::CONFLICT, e.to_string()),
                AddItemError::Database(db) => {
                    tracing::error!("Failed to add inventory item: {}", db);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Failed to add inventory item".to_string(),
                    )
                }
            };
            (status, Json(ErrorResponse { error })).into_response()
        }
    }
}
