pub mod analyze;

use crate::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use mixbuddy_core::vision::upload::MAX_FILE_SIZE;
use utoipa::OpenApi;

/// Room for multipart framing on top of the image itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Returns the router for /api/vision endpoints (mounted at /api/vision)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze::analyze))
        .layer(DefaultBodyLimit::max(MAX_FILE_SIZE + MULTIPART_OVERHEAD))
}

#[derive(OpenApi)]
#[openapi(
    paths(analyze::analyze),
    components(schemas(
        analyze::AnalyzeRequest,
        analyze::AnalyzeResponse,
        analyze::LabelResponse,
        analyze::DetectionResponse,
    ))
)]
pub struct ApiDoc;
