use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Srgb};

// ---------------------------------------------------------------------------
// Color palette generators
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
            to_color32(rgb)
        })
        .collect()
}

/// Stops of a viridis-like ramp, dark purple → teal → yellow.
const SEQUENTIAL_STOPS: [(f32, f32, f32); 3] = [
    (0.267, 0.005, 0.329),
    (0.128, 0.567, 0.551),
    (0.993, 0.906, 0.144),
];

/// `n` colours sampled evenly along the sequential ramp, so the first
/// ranked bar is darkest and the last brightest.
pub fn sequential_palette(n: usize) -> Vec<Color32> {
    let stops: Vec<LinSrgb> = SEQUENTIAL_STOPS
        .iter()
        .map(|&(r, g, b)| Srgb::new(r, g, b).into_linear())
        .collect();

    (0..n)
        .map(|i| {
            let t = if n > 1 { i as f32 / (n - 1) as f32 } else { 0.0 };
            let scaled = t * (stops.len() - 1) as f32;
            let seg = (scaled.floor() as usize).min(stops.len() - 2);
            let local = scaled - seg as f32;
            let (a, b) = (stops[seg], stops[seg + 1]);
            let mixed = LinSrgb::new(
                a.red + (b.red - a.red) * local,
                a.green + (b.green - a.green) * local,
                a.blue + (b.blue - a.blue) * local,
            );
            to_color32(Srgb::from_linear(mixed))
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color mapping: category value → Color32
// ---------------------------------------------------------------------------

/// Maps the values of a categorical column to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Evenly spaced hues for the given values.
    pub fn new(values: &[String]) -> Self {
        Self::from_palette(values, generate_palette(values.len()))
    }

    fn from_palette(values: &[String], palette: Vec<Color32>) -> Self {
        let mapping = values.iter().cloned().zip(palette).collect();
        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given value.
    pub fn color_for(&self, value: &str) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }
}
