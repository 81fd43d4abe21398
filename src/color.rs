use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// 8-bit sRGB colour shared by the PNG renderer and the viewer.
pub type Rgb = Srgb<u8>;

/// Colour of the interpolated precision curve.
pub const INTERPOLATED: Rgb = Srgb::new(0, 0, 255);
/// Colour of the envelope step curve.
pub const ENVELOPE: Rgb = Srgb::new(255, 0, 0);

#[derive(Debug, thiserror::Error)]
pub enum ColorError {
    #[error("unknown colour '{0}' (expected a CSS colour name or #rrggbb)")]
    Unknown(String),
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Resolve a CSS colour name (`"purple"`) or a hex code (`"#800080"`).
pub fn parse_color(spec: &str) -> Result<Rgb, ColorError> {
    let spec = spec.trim();
    if spec.starts_with('#') {
        return spec
            .parse::<Rgb>()
            .map_err(|_| ColorError::Unknown(spec.to_string()));
    }
    palette::named::from_str(&spec.to_ascii_lowercase())
        .ok_or_else(|| ColorError::Unknown(spec.to_string()))
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            rgb.into_format()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Backend conversions
// ---------------------------------------------------------------------------

pub fn to_egui(c: Rgb) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

pub fn to_plotters(c: Rgb) -> plotters::style::RGBColor {
    plotters::style::RGBColor(c.red, c.green, c.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_css_names_case_insensitively() {
        assert_eq!(parse_color("purple").unwrap(), Srgb::new(128, 0, 128));
        assert_eq!(parse_color("Green").unwrap(), Srgb::new(0, 128, 0));
        assert_eq!(parse_color(" blue ").unwrap(), INTERPOLATED);
    }

    #[test]
    fn resolves_hex_codes() {
        assert_eq!(parse_color("#ff8000").unwrap(), Srgb::new(255, 128, 0));
    }

    #[test]
    fn rejects_unknown_names() {
        let err = parse_color("notacolour").unwrap_err();
        assert!(err.to_string().contains("notacolour"));
        assert!(parse_color("#zzzzzz").is_err());
    }

    #[test]
    fn palette_is_distinct() {
        let colors = generate_palette(3);
        assert_eq!(colors.len(), 3);
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn conversions_keep_channels() {
        let c = Srgb::new(1, 2, 3);
        assert_eq!(to_egui(c), Color32::from_rgb(1, 2, 3));
        let p = to_plotters(c);
        assert_eq!((p.0, p.1, p.2), (1, 2, 3));
    }
}
