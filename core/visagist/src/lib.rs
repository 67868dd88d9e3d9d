//! Face analysis and personalized makeup advice.
//!
//! Detects the largest face in a photograph and derives skin tone, skin
//! depth category, undertone, face shape, and eye color with classical
//! color-space heuristics. Companion modules turn the analysis into
//! advice: seasonal palettes, makeup shade suggestions, tutorial text with
//! video lookups, and product shade recommendations.
//!
//! # Example
//!
//! ```
//! use visagist::{FaceBounds, FaceDetector, FeatureAnalyzer};
//!
//! // Any face detector can be plugged in; this one always reports a single
//! // box covering most of the image.
//! struct WholeImage;
//! impl FaceDetector for WholeImage {
//!     fn detect(&self, _gray: &[u8], width: u32, height: u32) -> Vec<FaceBounds> {
//!         vec![FaceBounds {
//!             x: 0.0,
//!             y: 0.0,
//!             width: width as f64,
//!             height: height as f64,
//!             confidence: 1.0,
//!         }]
//!     }
//! }
//!
//! let image = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
//!     64,
//!     64,
//!     image::Rgb([200, 150, 120]),
//! ));
//! let analyzer = FeatureAnalyzer::new(Box::new(WholeImage));
//! let result = analyzer.analyze(&image).unwrap();
//! println!("undertone: {:?}", result.undertone);
//! ```
#![warn(missing_docs)]

/// Skin, face-shape, and eye-color heuristics.
pub mod analysis;
/// Makeup product catalog client and shade filtering.
pub mod catalog;
/// Language-model client seam.
pub mod chat;
/// Environment-driven configuration.
pub mod config;
mod error;
/// Face and eye detection traits and data types.
pub mod face_detector;
/// Static makeup look and shade suggestion tables.
pub mod looks;
/// Seasonal palette narrative and swatch rendering.
pub mod palette;
#[cfg(feature = "rustface")]
/// Built-in SeetaFace-based face detector backend.
pub mod rustface_backend;
/// Makeup tutorial generation and parsing.
pub mod tutorial;
/// Video search client seam.
pub mod video;

use image::DynamicImage;
use log::{debug, info};
use serde::Serialize;

/// Skin, shape, and eye classification types.
pub use analysis::{EyeColor, FaceShape, SkinCategory, SkinSample, Undertone};
/// Error type returned by visagist operations.
pub use error::VisagistError;
/// Face and eye detection traits and the bounding-box type.
pub use face_detector::{EyeDetector, FaceBounds, FaceDetector};
#[cfg(feature = "rustface")]
/// Built-in detector that loads a SeetaFace model file.
pub use rustface_backend::RustfaceDetector;

/// Structured output of one analysis call.
///
/// Produced fresh per call and never mutated afterwards. The skin fields are
/// `None` when no pixel of the face crop fell inside the skin chroma range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    /// Mean RGB over the skin-classified pixels of the face crop.
    pub skin_tone: Option<SkinSample>,

    /// Seven-bucket skin depth category.
    pub skin_category: Option<SkinCategory>,

    /// Warm/cool/neutral undertone.
    pub undertone: Option<Undertone>,

    /// Aspect-ratio bucket of the face bounding box.
    pub face_shape: FaceShape,

    /// Two-way eye color estimate, or "unable to detect".
    pub eye_color: EyeColor,
}

/// Per-image feature analysis pipeline.
///
/// Holds the detector backends, which are read-only and shared across calls;
/// construct once and reuse. Each [`analyze`](Self::analyze) call is a pure
/// function of the image and the detector state.
pub struct FeatureAnalyzer {
    face: Box<dyn FaceDetector>,
    eyes: Option<Box<dyn EyeDetector>>,
}

impl FeatureAnalyzer {
    /// Create an analyzer with the given face detector and no eye detector.
    ///
    /// Without an eye detector, eye color is reported as
    /// [`EyeColor::UnableToDetect`].
    pub fn new(face_detector: Box<dyn FaceDetector>) -> Self {
        Self {
            face: face_detector,
            eyes: None,
        }
    }

    /// Replace the face detector.
    pub fn face_detector(mut self, detector: Box<dyn FaceDetector>) -> Self {
        self.face = detector;
        self
    }

    /// Provide an eye detector for the eye-color estimate.
    pub fn eye_detector(mut self, detector: Box<dyn EyeDetector>) -> Self {
        self.eyes = Some(detector);
        self
    }

    /// Decode raw image bytes (JPEG, PNG, or WebP) and analyze them.
    pub fn analyze_bytes(&self, input: &[u8]) -> Result<AnalysisResult, VisagistError> {
        let decoded = image::load_from_memory(input)
            .map_err(|e| VisagistError::DecodeError(e.to_string()))?;
        self.analyze(&decoded)
    }

    /// Run the full analysis pipeline on a decoded image.
    ///
    /// Fails with [`VisagistError::NoFaceDetected`] when the face detector
    /// returns an empty set; the skin and eye sub-steps degrade to
    /// `None` / [`EyeColor::UnableToDetect`] instead of failing.
    pub fn analyze(&self, image: &DynamicImage) -> Result<AnalysisResult, VisagistError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(VisagistError::ZeroDimensions);
        }

        let rgb = image.to_rgb8();
        let gray = image.to_luma8();

        let faces = self.face.detect(gray.as_raw(), gray.width(), gray.height());
        if faces.is_empty() {
            return Err(VisagistError::NoFaceDetected);
        }
        info!("{} face(s) detected", faces.len());

        // Largest face by box area. On equal areas the earliest detection
        // wins, which follows the detector's enumeration order.
        let mut largest = &faces[0];
        for candidate in &faces[1..] {
            if candidate.area() > largest.area() {
                largest = candidate;
            }
        }

        let (x, y, width, height) = clamp_to_image(largest, rgb.width(), rgb.height());
        debug!("largest face at ({x}, {y}) size {width}x{height}");

        let face_rgb = image::imageops::crop_imm(&rgb, x, y, width, height).to_image();
        let face_gray = image::imageops::crop_imm(&gray, x, y, width, height).to_image();

        let skin_tone = analysis::estimate_skin_tone(&face_rgb);
        let face_shape = analysis::estimate_face_shape(width as f64, height as f64);
        let eye_color =
            analysis::estimate_eye_color(&face_gray, &face_rgb, self.eyes.as_deref());

        Ok(AnalysisResult {
            skin_tone,
            skin_category: skin_tone.map(|s| s.category()),
            undertone: skin_tone.map(|s| s.undertone()),
            face_shape,
            eye_color,
        })
    }
}

/// Clamp a detector box to the image, guaranteeing a non-empty region.
fn clamp_to_image(bounds: &FaceBounds, img_w: u32, img_h: u32) -> (u32, u32, u32, u32) {
    let x = (bounds.x.max(0.0) as u32).min(img_w.saturating_sub(1));
    let y = (bounds.y.max(0.0) as u32).min(img_h.saturating_sub(1));
    let width = (bounds.width.max(1.0) as u32).min(img_w - x);
    let height = (bounds.height.max(1.0) as u32).min(img_h - y);
    (x, y, width.max(1), height.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    struct FixedFaces(Vec<FaceBounds>);

    impl FaceDetector for FixedFaces {
        fn detect(&self, _gray: &[u8], _w: u32, _h: u32) -> Vec<FaceBounds> {
            self.0.clone()
        }
    }

    struct FixedEyes(Vec<FaceBounds>);

    impl EyeDetector for FixedEyes {
        fn detect(&self, _gray: &[u8], _w: u32, _h: u32) -> Vec<FaceBounds> {
            self.0.clone()
        }
    }

    fn bounds(x: f64, y: f64, width: f64, height: f64) -> FaceBounds {
        FaceBounds {
            x,
            y,
            width,
            height,
            confidence: 1.0,
        }
    }

    fn skin_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            image::Rgb([200, 150, 120]),
        ))
    }

    #[test]
    fn analyze_detects_skin_and_shape() {
        let analyzer = FeatureAnalyzer::new(Box::new(FixedFaces(vec![bounds(
            10.0, 10.0, 50.0, 50.0,
        )])));
        let result = analyzer.analyze(&skin_image(100, 100)).unwrap();

        assert_eq!(
            result.skin_tone,
            Some(SkinSample {
                r: 200,
                g: 150,
                b: 120
            })
        );
        assert_eq!(result.skin_category, Some(SkinCategory::LightMedium));
        assert_eq!(result.undertone, Some(Undertone::Warm));
        // 50x50 box → ratio 1.0
        assert_eq!(result.face_shape, FaceShape::Round);
        assert_eq!(result.eye_color, EyeColor::UnableToDetect);
    }

    #[test]
    fn analyze_fails_without_face() {
        let analyzer = FeatureAnalyzer::new(Box::new(FixedFaces(vec![])));
        let err = analyzer.analyze(&skin_image(100, 100)).unwrap_err();
        assert!(matches!(err, VisagistError::NoFaceDetected));
    }

    #[test]
    fn analyze_picks_largest_face() {
        // The small box covers a green patch, the large one skin color; the
        // result must come from the large box.
        let mut img = RgbImage::from_pixel(100, 100, image::Rgb([200, 150, 120]));
        for y in 0..10 {
            for x in 0..10 {
                img.put_pixel(x, y, image::Rgb([0, 255, 0]));
            }
        }
        let analyzer = FeatureAnalyzer::new(Box::new(FixedFaces(vec![
            bounds(0.0, 0.0, 10.0, 10.0),
            bounds(20.0, 20.0, 60.0, 70.0),
        ])));
        let result = analyzer
            .analyze(&DynamicImage::ImageRgb8(img))
            .unwrap();
        assert!(result.skin_tone.is_some());
        // 60x70 box → ratio ≈ 0.857 → Square
        assert_eq!(result.face_shape, FaceShape::Square);
    }

    #[test]
    fn analyze_degrades_without_skin_pixels() {
        let green = DynamicImage::ImageRgb8(RgbImage::from_pixel(
            100,
            100,
            image::Rgb([0, 255, 0]),
        ));
        let analyzer = FeatureAnalyzer::new(Box::new(FixedFaces(vec![bounds(
            0.0, 0.0, 80.0, 100.0,
        )])))
        .eye_detector(Box::new(FixedEyes(vec![bounds(5.0, 5.0, 20.0, 10.0)])));

        let result = analyzer.analyze(&green).unwrap();
        assert_eq!(result.skin_tone, None);
        assert_eq!(result.skin_category, None);
        assert_eq!(result.undertone, None);
        // ratio 0.8 → Oval; eye crop is green-dominant
        assert_eq!(result.face_shape, FaceShape::Oval);
        assert_eq!(result.eye_color, EyeColor::BlueGreen);
    }

    #[test]
    fn analyze_is_idempotent() {
        let analyzer = FeatureAnalyzer::new(Box::new(FixedFaces(vec![bounds(
            10.0, 10.0, 45.0, 50.0,
        )])))
        .eye_detector(Box::new(FixedEyes(vec![bounds(2.0, 2.0, 12.0, 6.0)])));
        let image = skin_image(100, 100);

        let first = analyzer.analyze(&image).unwrap();
        let second = analyzer.analyze(&image).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn analyze_clamps_face_box_to_image() {
        let analyzer = FeatureAnalyzer::new(Box::new(FixedFaces(vec![bounds(
            80.0, 80.0, 100.0, 100.0,
        )])));
        let result = analyzer.analyze(&skin_image(100, 100)).unwrap();
        assert!(result.skin_tone.is_some());
    }

    #[test]
    fn analyze_bytes_rejects_garbage() {
        let analyzer = FeatureAnalyzer::new(Box::new(FixedFaces(vec![])));
        let err = analyzer.analyze_bytes(b"not an image").unwrap_err();
        assert!(matches!(err, VisagistError::DecodeError(_)));
    }

    #[test]
    fn result_serializes_with_wire_labels() {
        let result = AnalysisResult {
            skin_tone: Some(SkinSample {
                r: 200,
                g: 150,
                b: 120,
            }),
            skin_category: Some(SkinCategory::LightMedium),
            undertone: Some(Undertone::Warm),
            face_shape: FaceShape::Round,
            eye_color: EyeColor::UnableToDetect,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["skin_category"], "light_medium");
        assert_eq!(json["undertone"], "warm");
        assert_eq!(json["face_shape"], "Round");
        assert_eq!(json["eye_color"], "Unable to detect");
    }
}
