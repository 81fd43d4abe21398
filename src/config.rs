use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::color::{Rgb, generate_palette, parse_color};
use crate::data::loader::LoadOptions;

// ---------------------------------------------------------------------------
// Run configuration
// ---------------------------------------------------------------------------

/// One evaluation table to draw.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SeriesConfig {
    pub path: PathBuf,
    pub label: String,
    /// CSS colour name or `#rrggbb`. Missing → generated hue.
    #[serde(default)]
    pub color: Option<String>,
}

impl SeriesConfig {
    fn new(path: &str, label: &str, color: &str) -> Self {
        Self {
            path: PathBuf::from(path),
            label: label.to_string(),
            color: Some(color.to_string()),
        }
    }
}

/// Everything a run needs. Every field may be omitted from the JSON file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlotConfig {
    /// Tables in legend order.
    pub series: Vec<SeriesConfig>,
    /// Image written after all series are drawn (overwritten).
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Skip the first line of CSV inputs.
    pub has_headers: bool,
    /// Open the viewer window after saving.
    pub show: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            series: vec![
                SeriesConfig::new("../evaluationTo50-JaccardCoeff.csv", "Jaccard", "purple"),
                SeriesConfig::new("../evaluationTo50-TfIdf.csv", "TF-IDF", "blue"),
                SeriesConfig::new("../evaluationTo50-BM25.csv", "BM25", "green"),
            ],
            output: PathBuf::from("fig.png"),
            width: 1024,
            height: 768,
            has_headers: true,
            show: true,
        }
    }
}

impl PlotConfig {
    /// Read a JSON config, filling omitted fields with defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: PlotConfig = serde_json::from_str(text)?;
        anyhow::ensure!(
            config.width > 0 && config.height > 0,
            "figure size must be non-zero, got {}x{}",
            config.width,
            config.height
        );
        Ok(config)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            has_headers: self.has_headers,
        }
    }

    /// Colour for every series, in order. Unset colours come from an evenly
    /// spaced hue palette indexed by series position.
    pub fn resolve_colors(&self) -> Result<Vec<Rgb>> {
        let fallback = generate_palette(self.series.len());
        self.series
            .iter()
            .zip(fallback)
            .map(|(s, generated)| match &s.color {
                Some(name) => parse_color(name)
                    .with_context(|| format!("series '{}'", s.label)),
                None => Ok(generated),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette::Srgb;

    #[test]
    fn defaults_match_the_three_methods() {
        let config = PlotConfig::default();
        let labels: Vec<&str> = config.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["Jaccard", "TF-IDF", "BM25"]);
        assert_eq!(config.output, PathBuf::from("fig.png"));
        assert!(config.has_headers);
        assert_eq!(
            config.resolve_colors().unwrap(),
            vec![Srgb::new(128, 0, 128), Srgb::new(0, 0, 255), Srgb::new(0, 128, 0)]
        );
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = PlotConfig::from_json(r#"{ "output": "out.png", "show": false }"#).unwrap();
        assert_eq!(config.output, PathBuf::from("out.png"));
        assert!(!config.show);
        assert_eq!(config.series.len(), 3);
        assert_eq!(config.width, 1024);
    }

    #[test]
    fn series_without_colour_get_generated_hues() {
        let config = PlotConfig::from_json(
            r##"{ "series": [
                { "path": "a.csv", "label": "A" },
                { "path": "b.csv", "label": "B", "color": "#010203" }
            ] }"##,
        )
        .unwrap();
        let colors = config.resolve_colors().unwrap();
        assert_eq!(colors[0], generate_palette(2)[0]);
        assert_eq!(colors[1], Srgb::new(1, 2, 3));
    }

    #[test]
    fn unknown_colour_names_the_series() {
        let config = PlotConfig::from_json(
            r#"{ "series": [{ "path": "a.csv", "label": "A", "color": "mauvish" }] }"#,
        )
        .unwrap();
        let err = config.resolve_colors().unwrap_err();
        assert!(format!("{err:#}").contains("series 'A'"));
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(PlotConfig::from_json(r#"{ "width": 0 }"#).is_err());
    }
}
