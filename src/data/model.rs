use std::fmt;

use crate::color::Rgb;

// ---------------------------------------------------------------------------
// EvaluationRow – one line of an evaluation table
// ---------------------------------------------------------------------------

/// A single evaluation result (one row of the source table).
///
/// Columns are positional: `0 = rank`, `1 = precision`, `2 = recall`,
/// `3 = F1` (optional).
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRow {
    /// Cut-off / rank identifier, kept as text since nothing computes with it.
    pub rank: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: Option<f64>,
}

impl fmt::Display for EvaluationRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rank {}: P={:.4} R={:.4}",
            self.rank, self.precision, self.recall
        )?;
        if let Some(f1) = self.f1 {
            write!(f, " F1={f1:.4}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Dataset – all rows of one ranking method
// ---------------------------------------------------------------------------

/// The evaluation rows of one ranking method together with how it is drawn.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Legend label, e.g. `"BM25"`.
    pub label: String,
    /// Colour of the raw precision curve.
    pub color: Rgb,
    /// Rows in file order.
    pub rows: Vec<EvaluationRow>,
}

impl Dataset {
    pub fn new(label: impl Into<String>, color: Rgb, rows: Vec<EvaluationRow>) -> Self {
        Self {
            label: label.into(),
            color,
            rows,
        }
    }

    /// Precision column.
    pub fn precision(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.precision).collect()
    }

    /// Recall column.
    pub fn recall(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.recall).collect()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row with the highest F1, if the table carries an F1 column.
    pub fn best_f1(&self) -> Option<&EvaluationRow> {
        self.rows
            .iter()
            .filter(|r| r.f1.is_some_and(|v| !v.is_nan()))
            .max_by(|a, b| {
                let (a, b) = (a.f1.unwrap_or_default(), b.f1.unwrap_or_default());
                a.total_cmp(&b)
            })
    }

    /// Index of the first row whose recall is lower than its predecessor's.
    ///
    /// Interpolated precision only has its usual meaning when recall is
    /// ascending by index.
    pub fn first_recall_decrease(&self) -> Option<usize> {
        self.rows
            .windows(2)
            .position(|w| w[1].recall < w[0].recall)
            .map(|i| i + 1)
    }
}
