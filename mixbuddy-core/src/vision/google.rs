//! Google Cloud Vision `images:annotate` client.

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::{Annotation, ImageAnnotations, LabelDetector, VisionConfig, VisionError};

/// How many labels and logos to ask for.
const MAX_RESULTS: u32 = 20;

pub struct GoogleVisionDetector {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl GoogleVisionDetector {
    pub fn new(config: &VisionConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            client,
        })
    }
}

#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<ImageRequest>,
}

#[derive(Debug, Serialize)]
struct ImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Debug, Serialize)]
struct Feature {
    #[serde(rename = "type")]
    feature_type: &'static str,
    #[serde(rename = "maxResults")]
    max_results: u32,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<ImageResponse>,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(rename = "labelAnnotations", default)]
    labels: Vec<EntityAnnotation>,
    #[serde(rename = "logoAnnotations", default)]
    logos: Vec<EntityAnnotation>,
    #[serde(default)]
    error: Option<ApiStatus>,
}

#[derive(Debug, Deserialize)]
struct EntityAnnotation {
    #[serde(default)]
    description: String,
    #[serde(default)]
    score: f32,
}

#[derive(Debug, Deserialize)]
struct ApiStatus {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiStatus,
}

fn annotation(entity: EntityAnnotation) -> Annotation {
    Annotation {
        description: entity.description,
        score: entity.score,
    }
}

fn parse_response(body: &str) -> Result<ImageAnnotations, VisionError> {
    let parsed: AnnotateResponse =
        serde_json::from_str(body).map_err(|e| VisionError::ParseError(e.to_string()))?;

    let response = parsed
        .responses
        .into_iter()
        .next()
        .ok_or_else(|| VisionError::ParseError("Empty responses array".to_string()))?;

    // Per-image failures come back inside a 200
    if let Some(error) = response.error {
        return Err(VisionError::ApiError {
            status: error.code,
            message: error.message,
        });
    }

    Ok(ImageAnnotations {
        labels: response.labels.into_iter().map(annotation).collect(),
        logos: response.logos.into_iter().map(annotation).collect(),
    })
}

#[async_trait]
impl LabelDetector for GoogleVisionDetector {
    async fn annotate(&self, image: &[u8]) -> Result<ImageAnnotations, VisionError> {
        let request = AnnotateRequest {
            requests: vec![ImageRequest {
                image: ImageContent {
                    content: base64::engine::general_purpose::STANDARD.encode(image),
                },
                features: vec![
                    Feature {
                        feature_type: "LABEL_DETECTION",
                        max_results: MAX_RESULTS,
                    },
                    Feature {
                        feature_type: "LOGO_DETECTION",
                        max_results: MAX_RESULTS,
                    },
                ],
            }],
        };

        let url = format!("{}/v1/images:annotate", self.base_url);
        tracing::debug!(bytes = image.len(), "vision: annotating image");

        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(VisionError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let annotations = parse_response(&body)?;
        tracing::debug!(
            labels = annotations.labels.len(),
            logos = annotations.logos.len(),
            "vision: annotated image"
        );
        Ok(annotations)
    }
}
