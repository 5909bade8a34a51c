//! Fake label detector for testing.

use async_trait::async_trait;

use super::{Annotation, ImageAnnotations, LabelDetector, VisionError};

/// Returns the same annotations for every image, or always fails.
#[derive(Debug, Default)]
pub struct FakeDetector {
    annotations: ImageAnnotations,
    fail: bool,
}

impl FakeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, description: &str, score: f32) -> Self {
        self.annotations.labels.push(Annotation {
            description: description.to_string(),
            score,
        });
        self
    }

    pub fn with_logo(mut self, description: &str, score: f32) -> Self {
        self.annotations.logos.push(Annotation {
            description: description.to_string(),
            score,
        });
        self
    }

    pub fn failing() -> Self {
        Self {
            annotations: ImageAnnotations::default(),
            fail: true,
        }
    }
}

#[async_trait]
impl LabelDetector for FakeDetector {
    async fn annotate(&self, _image: &[u8]) -> Result<ImageAnnotations, VisionError> {
        if self.fail {
            return Err(VisionError::ApiError {
                status: 503,
                message: "fake detector unavailable".to_string(),
            });
        }
        Ok(self.annotations.clone())
    }
}
