pub mod me;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/users endpoints (mounted at /api/users)
pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(me::get_me))
}

#[derive(OpenApi)]
#[openapi(paths(me::get_me), components(schemas(me::UserResponse)))]
pub struct ApiDoc;
