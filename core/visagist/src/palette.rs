use image::RgbImage;
use log::debug;
use serde::Serialize;

use crate::analysis::Undertone;
use crate::chat::{ChatClient, ChatRequest};
use crate::error::VisagistError;

/// Default swatch strip dimensions in pixels.
pub const STRIP_WIDTH: u32 = 400;
/// Default swatch strip height in pixels.
pub const STRIP_HEIGHT: u32 = 100;

const PALETTE_SYSTEM_PROMPT: &str = "You are a skin expert, you will be given an undertone \
of a skin such as cool, neutral and warm undertone. Seasonal palette consists of Spring, \
Autumn, Summer and Winter. Suggest a few seasonal palettes that suit the undertone and \
briefly describe the seasonal palette.";

/// Seasonal color palette family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// Soft pinks and warm pastels.
    Spring,
    /// Cool blues and airy tones.
    Summer,
    /// Earthy golds and browns.
    Autumn,
    /// Whites and grays.
    Winter,
}

impl Season {
    /// All seasons in canonical reporting order.
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    /// Lower-case keyword matched in narrative text.
    pub fn keyword(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        }
    }

    /// Fixed four-color swatch set for the season, as `#rrggbb` strings.
    pub fn swatches(&self) -> [&'static str; 4] {
        match self {
            Season::Spring => ["#F8E0E0", "#FA8072", "#FFE4C4", "#FFFFE0"],
            Season::Summer => ["#E0FFFF", "#AFEEEE", "#ADD8E6", "#87CEEB"],
            Season::Autumn => ["#F0E68C", "#FFA07A", "#CD853F", "#A0522D"],
            Season::Winter => ["#FFFFFF", "#DCDCDC", "#A9A9A9", "#696969"],
        }
    }
}

/// One recommended season with its swatches and rendered strip.
#[derive(Debug, Clone)]
pub struct PaletteSwatch {
    /// The season the narrative mentioned.
    pub season: Season,
    /// The season's fixed swatch colors, as `#rrggbb` strings.
    pub colors: [&'static str; 4],
    /// PNG-encoded horizontal color strip of the swatches.
    pub image_png: Vec<u8>,
}

/// Narrative text plus the palettes extracted from it.
#[derive(Debug, Clone)]
pub struct PaletteAdvice {
    /// Free-form narrative returned by the language model.
    pub analysis: String,
    /// One entry per season mentioned in the narrative.
    pub palettes: Vec<PaletteSwatch>,
}

/// Parse a `#rrggbb` hex string into an RGB triple.
///
/// Returns `None` for anything that is not exactly seven characters of
/// `#` plus six hex digits.
pub fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some([r, g, b])
}

/// Seasons whose keyword occurs in the narrative, case-insensitive.
///
/// Each season is reported at most once, in [`Season::ALL`] order regardless
/// of where its keyword appears in the text.
pub fn extract_seasons(narrative: &str) -> Vec<Season> {
    let lower = narrative.to_lowercase();
    Season::ALL
        .into_iter()
        .filter(|season| lower.contains(season.keyword()))
        .collect()
}

/// Render colors as a horizontal strip of equal-width bands.
///
/// The division remainder of `width / colors.len()` goes to the last band.
/// Unparseable colors render as black.
pub fn render_strip(colors: &[&str], width: u32, height: u32) -> RgbImage {
    let mut strip = RgbImage::new(width, height);
    if colors.is_empty() {
        return strip;
    }

    let band = width / colors.len() as u32;
    for (x, _, pixel) in strip.enumerate_pixels_mut() {
        let index = ((x / band.max(1)) as usize).min(colors.len() - 1);
        let rgb = parse_hex_color(colors[index]).unwrap_or([0, 0, 0]);
        *pixel = image::Rgb(rgb);
    }
    strip
}

/// PNG-encode an RGB image.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, VisagistError> {
    use image::codecs::png::PngEncoder;
    use image::ImageEncoder;

    let mut buffer = Vec::new();
    let encoder = PngEncoder::new(&mut buffer);
    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| VisagistError::EncodeError(e.to_string()))?;
    Ok(buffer)
}

/// Seasonal palette advisor: undertone in, narrative plus swatch strips out.
pub struct SeasonalPaletteAdvisor<'a> {
    chat: &'a dyn ChatClient,
}

impl<'a> SeasonalPaletteAdvisor<'a> {
    /// Create an advisor over the given language-model client.
    pub fn new(chat: &'a dyn ChatClient) -> Self {
        Self { chat }
    }

    /// Ask for palette suggestions matching the undertone and render a
    /// swatch strip for every season the narrative mentions.
    pub fn advise(&self, undertone: Undertone) -> Result<PaletteAdvice, VisagistError> {
        let analysis = self.chat.complete(&ChatRequest {
            model: "gpt-4".into(),
            system: PALETTE_SYSTEM_PROMPT.into(),
            user: undertone.token().into(),
            temperature: Some(1.0),
            max_tokens: Some(300),
        })?;

        let seasons = extract_seasons(&analysis);
        debug!("narrative mentions {} season(s)", seasons.len());

        let mut palettes = Vec::with_capacity(seasons.len());
        for season in seasons {
            let colors = season.swatches();
            let strip = render_strip(&colors, STRIP_WIDTH, STRIP_HEIGHT);
            palettes.push(PaletteSwatch {
                season,
                colors,
                image_png: encode_png(&strip)?,
            });
        }

        Ok(PaletteAdvice { analysis, palettes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedChat(String);

    impl ChatClient for CannedChat {
        fn complete(&self, _request: &ChatRequest) -> Result<String, VisagistError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(parse_hex_color("#FA8072"), Some([0xFA, 0x80, 0x72]));
        assert_eq!(parse_hex_color("#ffffff"), Some([255, 255, 255]));
        assert_eq!(parse_hex_color("FA8072"), None);
        assert_eq!(parse_hex_color("#FA80"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
    }

    #[test]
    fn extraction_is_case_insensitive_and_deduplicated() {
        let text = "Spring shades flatter you. A SPRING palette, or maybe autumn.";
        assert_eq!(extract_seasons(text), vec![Season::Spring, Season::Autumn]);
    }

    #[test]
    fn extraction_order_is_stable() {
        // Winter appears first in the text but spring still leads the output
        let text = "winter, then summer, then spring";
        assert_eq!(
            extract_seasons(text),
            vec![Season::Spring, Season::Summer, Season::Winter]
        );
    }

    #[test]
    fn extraction_empty_for_unrelated_text() {
        assert!(extract_seasons("no seasons here").is_empty());
    }

    #[test]
    fn strip_bands_split_evenly_with_remainder_on_last() {
        let strip = render_strip(&["#FF0000", "#00FF00", "#0000FF"], 400, 10);
        // 400 / 3 = 133 per band, last band takes the extra pixel
        assert_eq!(strip.get_pixel(0, 5), &image::Rgb([255, 0, 0]));
        assert_eq!(strip.get_pixel(132, 5), &image::Rgb([255, 0, 0]));
        assert_eq!(strip.get_pixel(133, 5), &image::Rgb([0, 255, 0]));
        assert_eq!(strip.get_pixel(265, 5), &image::Rgb([0, 255, 0]));
        assert_eq!(strip.get_pixel(266, 5), &image::Rgb([0, 0, 255]));
        assert_eq!(strip.get_pixel(399, 5), &image::Rgb([0, 0, 255]));
    }

    #[test]
    fn strip_for_single_color_fills_width() {
        let strip = render_strip(&["#696969"], 50, 4);
        assert_eq!(strip.get_pixel(0, 0), &image::Rgb([0x69, 0x69, 0x69]));
        assert_eq!(strip.get_pixel(49, 3), &image::Rgb([0x69, 0x69, 0x69]));
    }

    #[test]
    fn advise_renders_a_strip_per_mentioned_season() {
        let chat = CannedChat(
            "A warm undertone glows in Autumn colors; Spring also works.".into(),
        );
        let advice = SeasonalPaletteAdvisor::new(&chat)
            .advise(Undertone::Warm)
            .unwrap();

        assert!(advice.analysis.contains("warm undertone"));
        assert_eq!(advice.palettes.len(), 2);
        assert_eq!(advice.palettes[0].season, Season::Spring);
        assert_eq!(advice.palettes[1].season, Season::Autumn);
        for palette in &advice.palettes {
            // PNG magic
            assert_eq!(&palette.image_png[0..4], b"\x89PNG");
        }
    }
}
