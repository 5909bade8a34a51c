pub mod create;
pub mod delete;
pub mod list;

use crate::AppState;
use axum::routing::{delete, get};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/inventory endpoints (mounted at /api/inventory)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_inventory).post(create::add_item))
        .route("/{id}", delete(delete::remove_item))
}

#[derive(OpenApi)]
#[openapi(
    paths(list::list_inventory, create::add_item, delete::remove_item),
    components(schemas(
        list::InventoryResponse,
        list::InventoryItemResponse,
        create::AddItemRequest,
    ))
)]
pub struct ApiDoc;
