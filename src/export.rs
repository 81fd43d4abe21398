use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;

use crate::color;
use crate::figure::{CurveKind, Figure, X_LABEL, Y_LABEL};

const DASH_SIZE: u32 = 8;
const DASH_SPACING: u32 = 5;
const LINE_WIDTH: u32 = 2;

// ---------------------------------------------------------------------------
// Static figure export
// ---------------------------------------------------------------------------

/// Render `figure`, write it to `path` as PNG (overwriting) and return the
/// encoded bytes.
pub fn save_png(figure: &Figure, path: &Path, width: u32, height: u32) -> Result<Vec<u8>> {
    let rgb = render_rgb(figure, width, height).context("rendering figure")?;
    let png = encode_png(rgb, width, height)?;
    std::fs::write(path, &png).with_context(|| format!("writing {}", path.display()))?;
    log::info!(
        "Saved {}x{} figure to {} ({} bytes)",
        width,
        height,
        path.display(),
        png.len()
    );
    Ok(png)
}

/// Draw every curve of `figure` into a packed RGB buffer.
pub fn render_rgb(figure: &Figure, width: u32, height: u32) -> Result<Vec<u8>> {
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        let ((x0, x1), (y0, y1)) = figure.bounds();
        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(x0..x1, y0..y1)?;

        chart
            .configure_mesh()
            .x_desc(X_LABEL)
            .y_desc(Y_LABEL)
            .draw()?;

        for dataset in &figure.datasets {
            let mut labelled = false;
            for curve in &dataset.curves {
                let rgb = color::to_plotters(curve.color);
                for segment in curve.segments() {
                    let style = rgb.stroke_width(LINE_WIDTH);
                    let points = segment.iter().copied();
                    if curve.kind.is_dashed() {
                        let series = chart.draw_series(DashedLineSeries::new(
                            points,
                            DASH_SIZE,
                            DASH_SPACING,
                            style,
                        ))?;
                        // one legend entry per dataset, keyed to the raw curve
                        if curve.kind == CurveKind::Raw && !labelled {
                            labelled = true;
                            series.label(dataset.label.as_str()).legend(move |(x, y)| {
                                PathElement::new(vec![(x, y), (x + 20, y)], rgb.stroke_width(LINE_WIDTH))
                            });
                        }
                    } else {
                        chart.draw_series(LineSeries::new(points, style))?;
                    }
                }
            }
        }

        if !figure.datasets.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }

        root.present()?;
    }
    Ok(buffer)
}

/// Encode a packed RGB buffer as PNG.
pub fn encode_png(rgb: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>> {
    let img = image::RgbImage::from_raw(width, height, rgb)
        .context("pixel buffer does not match figure size")?;
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .context("encoding PNG")?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Dataset, EvaluationRow};
    use palette::Srgb;

    #[test]
    fn encodes_decodable_png() {
        let (w, h) = (4, 3);
        let mut rgb = vec![255u8; (w * h * 3) as usize];
        rgb[0] = 7;
        let png = encode_png(rgb, w, h).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (w, h));
        assert_eq!(decoded.get_pixel(0, 0).0, [7, 255, 255]);
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        assert!(encode_png(vec![0; 5], 4, 3).is_err());
    }

    #[test]
    fn saves_figure_of_requested_size() {
        let rows = (1..=5)
            .map(|k| EvaluationRow {
                rank: k.to_string(),
                precision: 1.0 / k as f64,
                recall: k as f64 / 5.0,
                f1: None,
            })
            .collect();
        let mut figure = Figure::new();
        figure.add_curve(&Dataset::new("BM25", Srgb::new(0, 128, 0), rows));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fig.png");
        std::fs::write(&path, b"stale").unwrap();

        let png = save_png(&figure, &path, 320, 240).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), png);
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (320, 240));
    }
}
