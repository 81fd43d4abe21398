use crate::color::{self, Rgb};
use crate::data::interpolate::{envelope, interpolate};
use crate::data::model::Dataset;

pub const X_LABEL: &str = "Recall";
pub const Y_LABEL: &str = "Precision";

// ---------------------------------------------------------------------------
// Curve descriptions shared by the PNG export and the viewer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    /// Raw precision vs recall, dashed, dataset colour.
    Raw,
    /// Interpolated precision vs recall, blue dashed.
    Interpolated,
    /// Reversed running maximum, red step line.
    Envelope,
}

impl CurveKind {
    pub const ALL: [CurveKind; 3] = [CurveKind::Raw, CurveKind::Interpolated, CurveKind::Envelope];

    pub fn name(self) -> &'static str {
        match self {
            CurveKind::Raw => "Raw",
            CurveKind::Interpolated => "Interpolated",
            CurveKind::Envelope => "Envelope",
        }
    }

    pub fn is_dashed(self) -> bool {
        !matches!(self, CurveKind::Envelope)
    }
}

/// A polyline ready to draw.
#[derive(Debug, Clone)]
pub struct Curve {
    pub kind: CurveKind,
    pub color: Rgb,
    pub points: Vec<(f64, f64)>,
}

impl Curve {
    /// Runs of finite points. NaN or infinite values break the line.
    pub fn segments(&self) -> Vec<&[(f64, f64)]> {
        self.points
            .split(|(x, y)| !x.is_finite() || !y.is_finite())
            .filter(|run| !run.is_empty())
            .collect()
    }
}

/// The three curves drawn for one dataset.
#[derive(Debug, Clone)]
pub struct DatasetCurves {
    pub label: String,
    pub color: Rgb,
    pub rows: usize,
    pub curves: Vec<Curve>,
}

impl DatasetCurves {
    pub fn curve(&self, kind: CurveKind) -> Option<&Curve> {
        self.curves.iter().find(|c| c.kind == kind)
    }
}

// ---------------------------------------------------------------------------
// Figure – the composed plot
// ---------------------------------------------------------------------------

/// Shared plot that datasets are added to in legend order.
#[derive(Debug, Clone, Default)]
pub struct Figure {
    pub datasets: Vec<DatasetCurves>,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute both interpolations for `dataset` and record its three curves.
    pub fn add_curve(&mut self, dataset: &Dataset) {
        let recall = dataset.recall();
        let precision = dataset.precision();
        let interpolated = interpolate(&precision, &recall);
        let envelope = envelope(&precision);

        log::debug!(
            "{}: {} points, interpolated ≡ envelope: {}",
            dataset.label,
            precision.len(),
            same_values(&interpolated, &envelope)
        );

        let curves = vec![
            Curve {
                kind: CurveKind::Interpolated,
                color: color::INTERPOLATED,
                points: zip_points(&recall, &interpolated),
            },
            Curve {
                kind: CurveKind::Envelope,
                color: color::ENVELOPE,
                points: step_points(&recall, &envelope),
            },
            Curve {
                kind: CurveKind::Raw,
                color: dataset.color,
                points: zip_points(&recall, &precision),
            },
        ];

        self.datasets.push(DatasetCurves {
            label: dataset.label.clone(),
            color: dataset.color,
            rows: dataset.len(),
            curves,
        });
    }

    /// Legend entries in insertion order.
    pub fn legend(&self) -> Vec<(&str, Rgb)> {
        self.datasets
            .iter()
            .map(|d| (d.label.as_str(), d.color))
            .collect()
    }

    /// Axis ranges covering every finite point, never smaller than `[0, 1]`.
    pub fn bounds(&self) -> ((f64, f64), (f64, f64)) {
        let mut x = (0.0_f64, 1.0_f64);
        let mut y = (0.0_f64, 1.0_f64);
        let points = self
            .datasets
            .iter()
            .flat_map(|d| d.curves.iter())
            .flat_map(|c| c.points.iter())
            .filter(|(px, py)| px.is_finite() && py.is_finite());
        for &(px, py) in points {
            x = (x.0.min(px), x.1.max(px));
            y = (y.0.min(py), y.1.max(py));
        }
        (x, y)
    }
}

fn zip_points(xs: &[f64], ys: &[f64]) -> Vec<(f64, f64)> {
    xs.iter().copied().zip(ys.iter().copied()).collect()
}

/// Step polyline with the value at `x[i]` held back to `x[i-1]`.
///
/// `(x0,y0) (x0,y1) (x1,y1) (x1,y2) (x2,y2) ...`
pub fn step_points(xs: &[f64], ys: &[f64]) -> Vec<(f64, f64)> {
    let mut out = Vec::with_capacity(xs.len() * 2);
    for (i, (&x, &y)) in xs.iter().zip(ys).enumerate() {
        if i > 0 {
            out.push((xs[i - 1], y));
        }
        out.push((x, y));
    }
    out
}

fn same_values(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(x, y)| x == y || (x.is_nan() && y.is_nan()))
}
