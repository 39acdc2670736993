use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::selection::SubsetKey;

// ---------------------------------------------------------------------------
// Subset colours
// ---------------------------------------------------------------------------

/// Convert an HSL triple (hue in degrees) to an egui colour.
pub fn hsl_color(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let hsl = Hsl::new(hue, saturation, lightness);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}

/// Fixed colour per subset: LTR red, ERVL blue, LINE purple, SINE green.
pub fn subset_color(key: SubsetKey) -> Color32 {
    let hue = match key {
        SubsetKey::Ltr => 0.0,
        SubsetKey::Erv => 240.0,
        SubsetKey::Line => 285.0,
        SubsetKey::Sine => 120.0,
    };
    hsl_color(hue, 0.75, 0.5)
}
