use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mixbuddy_core::vision::upload::{validate_image, MAX_FILE_SIZE};
use mixbuddy_core::vision::{identify_bottles, ImageAnnotations, LabelDetector, VisionError};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct AnalyzeRequest {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LabelResponse {
    pub description: String,
    pub score: f32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DetectionResponse {
    /// Most confident logo in the photo, if any
    pub brand: Option<String>,
    /// Normalized spirit type, usable as an inventory name
    pub spirit: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    pub labels: Vec<LabelResponse>,
    pub detections: Vec<DetectionResponse>,
}

impl From<ImageAnnotations> for AnalyzeResponse {
    fn from(annotations: ImageAnnotations) -> Self {
        let detections = identify_bottles(&annotations)
            .into_iter()
            .map(|d| DetectionResponse {
                brand: d.brand,
                spirit: d.spirit.into_string(),
            })
            .collect();

        Self {
            labels: annotations
                .labels
                .into_iter()
                .map(|label| LabelResponse {
                    description: label.description,
                    score: label.score,
                })
                .collect(),
            detections,
        }
    }
}

fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Validate the image and run it through the detector.
pub(crate) async fn analyze_image(
    detector: &dyn LabelDetector,
    data: &[u8],
) -> Result<AnalyzeResponse, Response> {
    let content_type = validate_image(data).map_err(|e| error(StatusCode::BAD_REQUEST, e))?;
    tracing::debug!(content_type = %content_type, bytes = data.len(), "analyzing bottle photo");

    match detector.annotate(data).await {
        Ok(annotations) => Ok(annotations.into()),
        Err(e) => {
            tracing::warn!(error = %e, "vision request failed");
            let message = match e {
                VisionError::ApiError { .. } => "Vision service rejected the image",
                _ => "Vision service unavailable",
            };
            Err(error(StatusCode::BAD_GATEWAY, message))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/vision/analyze",
    tag = "vision",
    request_body(content_type = "multipart/form-data", content = AnalyzeRequest),
    responses(
        (status = 200, description = "Labels and recognised bottles", body = AnalyzeResponse),
        (status = 400, description = "Missing or invalid image", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 502, description = "Vision service failed", body = ErrorResponse),
        (status = 503, description = "Bottle recognition not configured", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn analyze(
    AuthUser(_user): AuthUser,
    State(detector): State<Option<Arc<dyn LabelDetector>>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let Some(detector) = detector else {
        return error(
            StatusCode::SERVICE_UNAVAILABLE,
            "Bottle recognition is not configured",
        );
    };

    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => return error(StatusCode::BAD_REQUEST, "No file provided"),
        Err(e) => {
            tracing::warn!("Multipart read error: {}", e);
            return error(
                e.status(),
                format!("Failed to read multipart data: {}", e.body_text()),
            );
        }
    };

    let data = match field.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Field read error: {}", e);
            let message = if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                format!("File too large. Maximum size is {} bytes", MAX_FILE_SIZE)
            } else {
                format!("Failed to read file data: {}", e.body_text())
            };
            return error(e.status(), message);
        }
    };

    match analyze_image(detector.as_ref(), &data).await {
        Ok(response) => Json(response).into_response(),
        Err(response) => response,
    }
}
