use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::registry::SiteKind;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Location colours: location name → Color32
// ---------------------------------------------------------------------------

/// Colour per location. Configured locations keep their fixed colour so a
/// site looks the same in the single and overlay views; any other location
/// found in the data gets a generated one.
#[derive(Debug, Clone)]
pub struct LocationColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl LocationColors {
    pub fn new<'a>(
        fixed: &BTreeMap<String, [u8; 3]>,
        locations: impl IntoIterator<Item = &'a String>,
    ) -> Self {
        let mut mapping: BTreeMap<String, Color32> = fixed
            .iter()
            .map(|(loc, [r, g, b])| (loc.clone(), Color32::from_rgb(*r, *g, *b)))
            .collect();

        let mut extra: Vec<&String> = locations
            .into_iter()
            .filter(|loc| !mapping.contains_key(*loc))
            .collect();
        extra.sort();
        extra.dedup();

        let palette = generate_palette(extra.len());
        for (loc, color) in extra.into_iter().zip(palette) {
            mapping.insert(loc.clone(), color);
        }

        LocationColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a location.
    pub fn color_for(&self, location: &str) -> Color32 {
        self.mapping
            .get(location)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Legend entries (location → colour), alphabetical.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(loc, c)| (loc.clone(), *c))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Map markers
// ---------------------------------------------------------------------------

/// Blue for sampling sites, red for point-source facilities.
pub fn marker_color(kind: SiteKind) -> Color32 {
    match kind {
        SiteKind::SamplingLocation => Color32::from_rgb(56, 126, 200),
        SiteKind::PointSource => Color32::from_rgb(214, 62, 42),
    }
}
