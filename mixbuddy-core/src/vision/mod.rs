//! Bottle recognition from photos.
//!
//! A [`LabelDetector`] sends an image to an external vision service and
//! returns its labels and logos. [`identify_bottles`] turns those into
//! brand/spirit pairs by keeping only labels that name a spirit type we know.

mod config;
mod fake;
mod google;
pub mod upload;

pub use config::{VisionConfig, DEFAULT_VISION_BASE_URL};
pub use fake::FakeDetector;
pub use google::GoogleVisionDetector;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::normalize::IngredientName;

/// Spirit types a label must match (case-insensitively) to count as a bottle.
pub const KNOWN_SPIRITS: &[&str] = &["Vodka", "Gin", "Rum", "Whiskey", "Tequila", "Brandy"];

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("Vision request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Vision API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse vision response: {0}")]
    ParseError(String),
}

/// One label or logo with the service's confidence score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub description: String,
    pub score: f32,
}

/// What the vision service saw in an image.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageAnnotations {
    pub labels: Vec<Annotation>,
    pub logos: Vec<Annotation>,
}

/// A recognised bottle: the spirit type and, if a logo was found, its brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BottleDetection {
    pub brand: Option<String>,
    pub spirit: IngredientName,
}

#[async_trait]
pub trait LabelDetector: Send + Sync {
    async fn annotate(&self, image: &[u8]) -> Result<ImageAnnotations, VisionError>;
}

/// Map raw annotations to bottle detections.
///
/// Each known spirit type found among the labels yields one detection, in
/// label order, paired with the highest-scoring logo as the brand.
pub fn identify_bottles(annotations: &ImageAnnotations) -> Vec<BottleDetection> {
    let brand = annotations
        .logos
        .iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .map(|logo| logo.description.clone());

    let mut detections: Vec<BottleDetection> = Vec::new();
    for label in &annotations.labels {
        let spirit = IngredientName::new(&label.description);
        let known = KNOWN_SPIRITS
            .iter()
            .any(|known| IngredientName::new(known) == spirit);

        if known && !detections.iter().any(|d| d.spirit == spirit) {
            detections.push(BottleDetection {
                brand: brand.clone(),
                spirit,
            });
        }
    }
    detections
}
