use serde::Serialize;

use crate::analysis::{FaceShape, SkinCategory, Undertone};

/// A named makeup look with its description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Look {
    /// Look name, e.g. "Soft Glam".
    pub name: &'static str,
    /// Short description of the look.
    pub description: &'static str,
}

const NATURAL: Look = Look {
    name: "Natural 'No-Makeup' Makeup",
    description: "Enhances the skin's natural beauty with minimal products: a lightweight \
        foundation or tinted moisturizer, subtle blush, and neutral tones for the eyes and \
        lips, creating an effortless and fresh appearance.",
};

const SOFT_GLAM: Look = Look {
    name: "Soft Glam",
    description: "A polished yet natural look that emphasizes glowing skin and blended, \
        neutral eyeshadow shades. Light layers of shimmer and matte finishes achieve a soft, \
        ethereal effect without appearing heavy or overdone.",
};

const DEWY_GLOW: Look = Look {
    name: "Dewy, Glowy Skin",
    description: "Aims for a fresh, hydrated look with luminous skin. Liquid highlighters \
        and hydrating foundations create a radiant finish, often with soft blush and glossy \
        lips to enhance the overall glow.",
};

const CLASSIC_RETRO: Look = Look {
    name: "Classic Retro",
    description: "Draws inspiration from past decades: bold winged eyeliner, defined brows, \
        and red lips. Dramatic eye makeup paired with a flawless complexion evokes vintage \
        glamour reminiscent of the 1950s and 1960s.",
};

const SMOKEY_EYE: Look = Look {
    name: "Smokey Eye",
    description: "Dark, blended eyeshadow that creates depth and drama around the eyes, \
        from subtle to bold in shades like black, gray, or deep brown, typically \
        complemented by nude or soft lip colors.",
};

const ARABIC: Look = Look {
    name: "Arabic Makeup",
    description: "Known for its boldness and emphasis on the eyes: dramatic eyeliner such \
        as kohl, heavy eyeshadow in rich colors, and full lashes, with more neutral lips to \
        balance the striking eye makeup.",
};

const THAI: Look = Look {
    name: "Thai Makeup",
    description: "Bright colors bring out features while contouring softens the jawline.",
};

/// Named looks that flatter the given face shape.
pub fn looks_for_shape(shape: FaceShape) -> &'static [Look] {
    match shape {
        FaceShape::Oval => &[NATURAL, SOFT_GLAM, DEWY_GLOW, CLASSIC_RETRO],
        FaceShape::Square => &[SOFT_GLAM, CLASSIC_RETRO, SMOKEY_EYE, THAI],
        FaceShape::Round => &[ARABIC, SMOKEY_EYE, DEWY_GLOW, SOFT_GLAM],
    }
}

/// Suggested swatch sets for the four product categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MakeupPalette {
    /// Foundation shades matched to the skin depth category.
    pub foundation: [[u8; 3]; 3],
    /// Blush shades matched to the undertone.
    pub blush: [[u8; 3]; 3],
    /// Eyeshadow shades matched to the undertone.
    pub eyeshadow: [[u8; 3]; 3],
    /// Lipstick shades matched to the undertone.
    pub lipstick: [[u8; 3]; 3],
}

/// Fixed swatch suggestions for a skin category and undertone.
pub fn suggest_makeup_colors(category: SkinCategory, undertone: Undertone) -> MakeupPalette {
    MakeupPalette {
        foundation: foundation_colors(category),
        blush: blush_colors(undertone),
        eyeshadow: eyeshadow_colors(undertone),
        lipstick: lipstick_colors(undertone),
    }
}

fn foundation_colors(category: SkinCategory) -> [[u8; 3]; 3] {
    match category {
        SkinCategory::VeryLight => [[255, 235, 220], [255, 233, 215], [255, 230, 210]],
        SkinCategory::Light => [[245, 225, 210], [245, 223, 205], [245, 220, 200]],
        SkinCategory::LightMedium => [[235, 215, 200], [235, 213, 195], [235, 210, 190]],
        SkinCategory::Medium => [[225, 205, 190], [225, 203, 185], [225, 200, 180]],
        SkinCategory::MediumDeep => [[215, 195, 180], [215, 193, 175], [215, 190, 170]],
        SkinCategory::Deep => [[205, 185, 170], [205, 183, 165], [205, 180, 160]],
        SkinCategory::VeryDeep => [[195, 175, 160], [195, 173, 155], [195, 170, 150]],
    }
}

fn blush_colors(undertone: Undertone) -> [[u8; 3]; 3] {
    match undertone {
        Undertone::Warm => [[255, 190, 180], [255, 150, 130], [255, 160, 122]],
        Undertone::Cool => [[255, 192, 203], [255, 182, 193], [219, 112, 147]],
        Undertone::Neutral => [[255, 192, 203], [255, 160, 122], [255, 228, 225]],
    }
}

fn eyeshadow_colors(undertone: Undertone) -> [[u8; 3]; 3] {
    match undertone {
        Undertone::Warm => [[255, 222, 173], [210, 180, 140], [188, 143, 143]],
        Undertone::Cool => [[230, 230, 250], [216, 191, 216], [221, 160, 221]],
        Undertone::Neutral => [[245, 222, 179], [222, 184, 135], [210, 180, 140]],
    }
}

fn lipstick_colors(undertone: Undertone) -> [[u8; 3]; 3] {
    match undertone {
        Undertone::Warm => [[255, 125, 100], [255, 99, 71], [205, 92, 92]],
        Undertone::Cool => [[219, 112, 147], [255, 0, 127], [199, 21, 133]],
        Undertone::Neutral => [[255, 160, 122], [205, 92, 92], [250, 128, 114]],
    }
}
