use image::{GrayImage, RgbImage};
use log::debug;
use serde::Serialize;

use crate::face_detector::EyeDetector;

/// Inclusive Cr range for skin-colored pixels.
const SKIN_CR_RANGE: (u8, u8) = (135, 180);

/// Inclusive Cb range for skin-colored pixels.
const SKIN_CB_RANGE: (u8, u8) = (85, 135);

/// Mean RGB color over the skin-classified pixels of a face crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkinSample {
    /// Red channel mean, 0–255.
    pub r: u8,
    /// Green channel mean, 0–255.
    pub g: u8,
    /// Blue channel mean, 0–255.
    pub b: u8,
}

impl SkinSample {
    /// Rec. 601 luminance of the sample.
    pub fn luminance(&self) -> f64 {
        0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64
    }

    /// Seven-bucket skin depth category of the sample.
    ///
    /// Thresholds are strict: a luminance exactly on a boundary falls into
    /// the next (deeper) bucket.
    pub fn category(&self) -> SkinCategory {
        let luminance = self.luminance();
        if luminance > 200.0 {
            SkinCategory::VeryLight
        } else if luminance > 180.0 {
            SkinCategory::Light
        } else if luminance > 160.0 {
            SkinCategory::LightMedium
        } else if luminance > 140.0 {
            SkinCategory::Medium
        } else if luminance > 120.0 {
            SkinCategory::MediumDeep
        } else if luminance > 100.0 {
            SkinCategory::Deep
        } else {
            SkinCategory::VeryDeep
        }
    }

    /// Undertone classification of the sample.
    ///
    /// Red strictly dominant → warm, blue strictly dominant → cool, anything
    /// else (ties, green dominant) → neutral. A channel-dominance heuristic,
    /// not a colorimetric measurement.
    pub fn undertone(&self) -> Undertone {
        if self.r > self.g && self.r > self.b {
            Undertone::Warm
        } else if self.b > self.r && self.b > self.g {
            Undertone::Cool
        } else {
            Undertone::Neutral
        }
    }
}

/// Skin depth category, ordered lightest to deepest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinCategory {
    /// Luminance above 200.
    VeryLight,
    /// Luminance above 180.
    Light,
    /// Luminance above 160.
    LightMedium,
    /// Luminance above 140.
    Medium,
    /// Luminance above 120.
    MediumDeep,
    /// Luminance above 100.
    Deep,
    /// Luminance of 100 or below.
    VeryDeep,
}

impl SkinCategory {
    /// Lower-case token used to match product shade names, e.g. `light_medium`.
    pub fn token(&self) -> &'static str {
        match self {
            SkinCategory::VeryLight => "very_light",
            SkinCategory::Light => "light",
            SkinCategory::LightMedium => "light_medium",
            SkinCategory::Medium => "medium",
            SkinCategory::MediumDeep => "medium_deep",
            SkinCategory::Deep => "deep",
            SkinCategory::VeryDeep => "very_deep",
        }
    }
}

impl std::fmt::Display for SkinCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SkinCategory::VeryLight => "Very Light",
            SkinCategory::Light => "Light",
            SkinCategory::LightMedium => "Light Medium",
            SkinCategory::Medium => "Medium",
            SkinCategory::MediumDeep => "Medium Deep",
            SkinCategory::Deep => "Deep",
            SkinCategory::VeryDeep => "Very Deep",
        };
        f.write_str(label)
    }
}

/// Chromatic bias of the skin color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Undertone {
    /// Red channel strictly dominant.
    Warm,
    /// Blue channel strictly dominant.
    Cool,
    /// No strictly dominant warm/cool channel.
    Neutral,
}

impl Undertone {
    /// Lower-case token used in prompts and shade matching.
    pub fn token(&self) -> &'static str {
        match self {
            Undertone::Warm => "warm",
            Undertone::Cool => "cool",
            Undertone::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Undertone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Aspect-ratio bucket of the detected face bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FaceShape {
    /// Width/height ratio above 0.95.
    Round,
    /// Width/height ratio below 0.85.
    Oval,
    /// Width/height ratio between 0.85 and 0.95 inclusive.
    Square,
}

impl std::fmt::Display for FaceShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FaceShape::Round => "Round",
            FaceShape::Oval => "Oval",
            FaceShape::Square => "Square",
        })
    }
}

/// Two-way eye color estimate, or a marker that no eye was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EyeColor {
    /// Red channel mean exceeds the green mean over the eye crop.
    Brown,
    /// Green channel mean is at least the red mean.
    #[serde(rename = "Blue/Green")]
    BlueGreen,
    /// No eye region was detected.
    #[serde(rename = "Unable to detect")]
    UnableToDetect,
}

impl std::fmt::Display for EyeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            EyeColor::Brown => "Brown",
            EyeColor::BlueGreen => "Blue/Green",
            EyeColor::UnableToDetect => "Unable to detect",
        })
    }
}

/// Convert one RGB pixel to YCrCb (ITU-R BT.601, full range).
fn rgb_to_ycrcb(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let y = 0.299 * rf + 0.587 * gf + 0.114 * bf;
    let cr = (rf - y) * 0.713 + 128.0;
    let cb = (bf - y) * 0.564 + 128.0;
    (
        y.round().clamp(0.0, 255.0) as u8,
        cr.round().clamp(0.0, 255.0) as u8,
        cb.round().clamp(0.0, 255.0) as u8,
    )
}

/// Whether a pixel's chroma falls inside the fixed skin range.
///
/// Luma is unconstrained; only Cr and Cb are thresholded.
fn is_skin_chroma(cr: u8, cb: u8) -> bool {
    (SKIN_CR_RANGE.0..=SKIN_CR_RANGE.1).contains(&cr)
        && (SKIN_CB_RANGE.0..=SKIN_CB_RANGE.1).contains(&cb)
}

/// Mean RGB over the skin-classified pixels of a face crop.
///
/// Pixels outside the skin chroma range are excluded from the average, not
/// zeroed into it. Returns `None` when no pixel in the crop qualifies.
pub fn estimate_skin_tone(face: &RgbImage) -> Option<SkinSample> {
    let mut sum = [0u64; 3];
    let mut count = 0u64;

    for pixel in face.pixels() {
        let [r, g, b] = pixel.0;
        let (_, cr, cb) = rgb_to_ycrcb(r, g, b);
        if is_skin_chroma(cr, cb) {
            sum[0] += r as u64;
            sum[1] += g as u64;
            sum[2] += b as u64;
            count += 1;
        }
    }

    if count == 0 {
        debug!("no skin-colored pixels in {}x{} face crop", face.width(), face.height());
        return None;
    }

    Some(SkinSample {
        r: (sum[0] / count) as u8,
        g: (sum[1] / count) as u8,
        b: (sum[2] / count) as u8,
    })
}

/// Classify the face shape from the detected bounding-box dimensions.
pub fn estimate_face_shape(width: f64, height: f64) -> FaceShape {
    let ratio = width / height;
    if ratio > 0.95 {
        FaceShape::Round
    } else if ratio < 0.85 {
        FaceShape::Oval
    } else {
        FaceShape::Square
    }
}

/// Estimate eye color from the first eye region the detector reports.
///
/// The detector enumeration order decides which eye is used when several are
/// found. Only the red and green channel means of the eye crop are compared;
/// the blue channel does not participate. Returns
/// [`EyeColor::UnableToDetect`] when the detector finds nothing or no
/// detector is configured.
pub fn estimate_eye_color(
    gray_face: &GrayImage,
    face: &RgbImage,
    detector: Option<&dyn EyeDetector>,
) -> EyeColor {
    let Some(detector) = detector else {
        return EyeColor::UnableToDetect;
    };

    let eyes = detector.detect(gray_face.as_raw(), gray_face.width(), gray_face.height());
    let Some(eye) = eyes.first() else {
        return EyeColor::UnableToDetect;
    };
    debug!("{} eye region(s) detected, using the first", eyes.len());

    // Clamp the eye box to the face crop.
    let x0 = (eye.x.max(0.0) as u32).min(face.width());
    let y0 = (eye.y.max(0.0) as u32).min(face.height());
    let x1 = ((eye.x + eye.width).max(0.0) as u32).min(face.width());
    let y1 = ((eye.y + eye.height).max(0.0) as u32).min(face.height());
    if x1 <= x0 || y1 <= y0 {
        return EyeColor::UnableToDetect;
    }

    let mut sum_r = 0u64;
    let mut sum_g = 0u64;
    let mut count = 0u64;
    for y in y0..y1 {
        for x in x0..x1 {
            let [r, g, _] = face.get_pixel(x, y).0;
            sum_r += r as u64;
            sum_g += g as u64;
            count += 1;
        }
    }

    let mean_r = sum_r as f64 / count as f64;
    let mean_g = sum_g as f64 / count as f64;
    if mean_r > mean_g {
        EyeColor::Brown
    } else {
        EyeColor::BlueGreen
    }
}
