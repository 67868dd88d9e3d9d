//! Analyze a face photo and print the derived features and advice tables.
//!
//! Usage:
//!   cargo run --example analyze_photo -- <photo> <seeta-model.bin>

use visagist::looks::{looks_for_shape, suggest_makeup_colors};
use visagist::{FeatureAnalyzer, RustfaceDetector};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(photo_path), Some(model_path)) = (args.next(), args.next()) else {
        eprintln!("usage: analyze_photo <photo> <seeta-model.bin>");
        std::process::exit(2);
    };

    let input = std::fs::read(&photo_path).expect("failed to read photo");
    let detector = RustfaceDetector::from_model_file(&model_path).expect("failed to load model");
    let analyzer = FeatureAnalyzer::new(Box::new(detector));

    let result = match analyzer.analyze_bytes(&input) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("analysis failed: {e}");
            std::process::exit(1);
        }
    };

    println!("=== {photo_path} ===");
    match result.skin_tone {
        Some(tone) => println!(
            "  skin tone: rgb({}, {}, {})",
            tone.r, tone.g, tone.b
        ),
        None => println!("  skin tone: insufficient data"),
    }
    if let Some(category) = result.skin_category {
        println!("  skin category: {category}");
    }
    if let Some(undertone) = result.undertone {
        println!("  undertone: {undertone}");
    }
    println!("  face shape: {}", result.face_shape);
    println!("  eye color: {}", result.eye_color);

    println!("\nSuitable looks:");
    for look in looks_for_shape(result.face_shape) {
        println!("  - {}", look.name);
    }

    if let (Some(category), Some(undertone)) = (result.skin_category, result.undertone) {
        let palette = suggest_makeup_colors(category, undertone);
        println!("\nSuggested foundation shades:");
        for [r, g, b] in palette.foundation {
            println!("  - rgb({r}, {g}, {b})");
        }
    }
}
