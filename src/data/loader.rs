use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::EvaluationRow;

/// Column holding the rank / cut-off identifier (not used for plotting).
pub const RANK_COL: usize = 0;
/// Column holding precision.
pub const PRECISION_COL: usize = 1;
/// Column holding recall.
pub const RECALL_COL: usize = 2;
/// Optional column holding F1.
pub const F1_COL: usize = 3;

const MIN_COLUMNS: usize = RECALL_COL + 1;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("row {row}: expected at least {} columns (rank, precision, recall), found {found}", MIN_COLUMNS)]
    TooFewColumns { row: usize, found: usize },
    #[error("no header and no rows")]
    Empty,
    #[error("row {row}, column {col}: '{value}' is not a number")]
    NotANumber {
        row: usize,
        col: usize,
        value: String,
    },
}

/// How to read an evaluation table.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Treat the first CSV line as a header and skip it.
    pub has_headers: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { has_headers: true }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load evaluation rows from a file.  Dispatch by extension.
///
/// Columns are read by position, never by header name:
/// `0 = rank`, `1 = precision`, `2 = recall`, `3 = F1` (optional).
///
/// Supported formats:
/// * `.csv`     – comma separated, cells trimmed, e.g. `1, 0.3, 0.1, 0.15`
/// * `.json`    – `[[rank, precision, recall, f1?], ...]`
/// * `.parquet` – the same columns, numeric types cast to `f64`
pub fn load_file(path: &Path, options: LoadOptions) -> Result<Vec<EvaluationRow>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => load_csv(path, options)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };
    log::debug!("{}: {} rows", path.display(), rows.len());
    Ok(rows)
}

/// Parse a numeric cell. An empty cell reads as NaN, like a missing value in
/// a pandas frame; it breaks the drawn line instead of failing the load.
fn parse_cell(value: &str, row: usize, col: usize) -> Result<f64, LoadError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(f64::NAN);
    }
    value.parse::<f64>().map_err(|_| LoadError::NotANumber {
        row,
        col,
        value: value.to_string(),
    })
}

/// Build a row from positional cells.
fn row_from_cells(cells: &[&str], row: usize) -> Result<EvaluationRow, LoadError> {
    if cells.len() < MIN_COLUMNS {
        return Err(LoadError::TooFewColumns {
            row,
            found: cells.len(),
        });
    }
    let f1 = match cells.get(F1_COL).map(|s| s.trim()) {
        Some(s) if !s.is_empty() => Some(parse_cell(s, row, F1_COL)?),
        _ => None,
    };
    Ok(EvaluationRow {
        rank: cells[RANK_COL].trim().to_string(),
        precision: parse_cell(cells[PRECISION_COL], row, PRECISION_COL)?,
        recall: parse_cell(cells[RECALL_COL], row, RECALL_COL)?,
        f1,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: optional header line, then `rank, precision, recall[, f1]`.
/// Rows may differ in width; each, and the header, must reach the recall
/// column. A file with no lines at all is rejected.
fn load_csv(path: &Path, options: LoadOptions) -> Result<Vec<EvaluationRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(options.has_headers)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;

    if options.has_headers {
        let width = reader.headers().context("reading CSV header")?.len();
        if width == 0 {
            return Err(LoadError::Empty.into());
        }
        if width < MIN_COLUMNS {
            return Err(LoadError::TooFewColumns {
                row: 0,
                found: width,
            }
            .into());
        }
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cells: Vec<&str> = record.iter().collect();
        rows.push(row_from_cells(&cells, row_no)?);
    }
    if !options.has_headers && rows.is_empty() {
        return Err(LoadError::Empty.into());
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (`df.to_json(orient='values')`):
///
/// ```json
/// [[1, 0.30, 0.10, 0.15], [2, 0.25, 0.16, 0.19]]
/// ```
fn load_json(path: &Path) -> Result<Vec<EvaluationRow>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let values = rec
            .as_array()
            .with_context(|| format!("Row {i} is not a JSON array"))?;
        let cells: Vec<String> = values.iter().map(json_cell_to_string).collect();
        let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
        rows.push(row_from_cells(&cells, i)?);
    }
    Ok(rows)
}

fn json_cell_to_string(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file whose columns follow the positional layout.
///
/// Any numeric column type is accepted; values are cast to `Float64`.
/// Works with files written by both **Pandas** and **Polars**.
fn load_parquet(path: &Path) -> Result<Vec<EvaluationRow>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let n_cols = batch.num_columns();
        if n_cols < MIN_COLUMNS {
            return Err(LoadError::TooFewColumns {
                row: rows.len(),
                found: n_cols,
            }
            .into());
        }

        let ranks = rank_labels(batch.column(RANK_COL));
        let precision = to_f64(batch.column(PRECISION_COL)).context("precision column")?;
        let recall = to_f64(batch.column(RECALL_COL)).context("recall column")?;
        let f1 = if n_cols > F1_COL {
            Some(to_f64(batch.column(F1_COL)).context("F1 column")?)
        } else {
            None
        };

        for i in 0..batch.num_rows() {
            let row_no = rows.len();
            if precision.is_null(i) || recall.is_null(i) {
                bail!("Row {row_no}: null precision or recall");
            }
            rows.push(EvaluationRow {
                rank: ranks.get(i).cloned().unwrap_or_default(),
                precision: precision.value(i),
                recall: recall.value(i),
                f1: f1
                    .as_ref()
                    .and_then(|a| (!a.is_null(i)).then(|| a.value(i))),
            });
        }
    }

    Ok(rows)
}

// -- Parquet / Arrow helpers --

/// Cast any numeric column to a `Float64Array`.
fn to_f64(col: &Arc<dyn Array>) -> Result<Float64Array> {
    let casted = cast(col, &DataType::Float64)
        .with_context(|| format!("cannot read {:?} as Float64", col.data_type()))?;
    casted
        .as_any()
        .downcast_ref::<Float64Array>()
        .cloned()
        .context("expected Float64Array after cast")
}

/// Render the rank column as text, whatever its type.
fn rank_labels(col: &Arc<dyn Array>) -> Vec<String> {
    let Ok(strings) = cast(col, &DataType::Utf8) else {
        return (0..col.len()).map(|i| i.to_string()).collect();
    };
    match strings.as_any().downcast_ref::<StringArray>() {
        Some(s) => s
            .iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect(),
        None => Vec::new(),
    }
}
