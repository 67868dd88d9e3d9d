use std::path::Path;

use crate::error::VisagistError;
use crate::face_detector::{FaceBounds, FaceDetector};

/// Minimum face size in pixels passed to the SeetaFace engine.
const MIN_FACE_SIZE: u32 = 20;

/// Score threshold below which SeetaFace candidates are discarded.
const SCORE_THRESH: f64 = 2.0;

/// Pyramid scale factor for the multi-scale search.
const PYRAMID_SCALE_FACTOR: f32 = 0.8;

/// Sliding-window step in pixels (x, y).
const SLIDE_WINDOW_STEP: (u32, u32) = (4, 4);

/// Face detector backed by the `rustface` crate (SeetaFace engine).
///
/// Loads a SeetaFace frontal-face model file on construction. The model is a
/// read-only, process-wide resource: load it once and share the detector
/// across calls.
pub struct RustfaceDetector {
    model: rustface::Model,
}

impl RustfaceDetector {
    /// Load a SeetaFace frontal-face model from `path`.
    pub fn from_model_file<P: AsRef<Path>>(path: P) -> Result<Self, VisagistError> {
        let model = rustface::load_model(
            path.as_ref()
                .to_str()
                .ok_or_else(|| VisagistError::ModelError("non-utf8 model path".into()))?,
        )
        .map_err(|e| VisagistError::ModelError(e.to_string()))?;
        Ok(Self { model })
    }

    /// Build a detector from an already-loaded SeetaFace model.
    pub fn from_model(model: rustface::Model) -> Self {
        Self { model }
    }
}

impl FaceDetector for RustfaceDetector {
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<FaceBounds> {
        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(MIN_FACE_SIZE);
        detector.set_score_thresh(SCORE_THRESH);
        detector.set_pyramid_scale_factor(PYRAMID_SCALE_FACTOR);
        detector.set_slide_window_step(SLIDE_WINDOW_STEP.0, SLIDE_WINDOW_STEP.1);

        let faces = detector.detect(&rustface::ImageData::new(gray, width, height));

        faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                FaceBounds {
                    x: bbox.x() as f64,
                    y: bbox.y() as f64,
                    width: bbox.width() as f64,
                    height: bbox.height() as f64,
                    confidence: face.score(),
                }
            })
            .collect()
    }
}
