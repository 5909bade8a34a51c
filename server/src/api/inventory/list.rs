use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::inventory::InventoryStore;
use crate::models::InventoryItem;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InventoryItemResponse {
    pub id: Uuid,
    /// Normalized ingredient name (trimmed, lower-case)
    pub name: String,
}

impl From<InventoryItem> for InventoryItemResponse {
    fn from(item: InventoryItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InventoryResponse {
    pub items: Vec<InventoryItemResponse>,
}

#[utoipa::path(
    get,
    path = "/api/inventory",
    tag = "inventory",
    responses(
        (status = 200, description = "The user's ingredients, sorted by name", body = InventoryResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_inventory(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match InventoryStore::new(&mut conn, user.id).list() {
        Ok(items) => Json(InventoryResponse {
            items: items.into_iter().map(Into::into).collect(),
        })
        .into_response(),
        Err(e) => {
            tracing::error!("Failed to load inventory: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to load inventory".to_string(),
                }),
            )
                .into_response()
        }
    }
}
