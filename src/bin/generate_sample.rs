//! Writes synthetic `evaluationTo50-*.csv` tables for the three ranking
//! methods, in the evaluator's `k, P, R, F1` layout (no header).
//!
//! Usage: `generate_sample [DIR] [--parquet]` (default `DIR` is `..`).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const MAX_K: usize = 50;
const QUERIES: usize = 35;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: usize, hi: usize) -> usize {
        lo + (self.next_f64() * (hi - lo) as f64) as usize
    }
}

/// Averaged precision / recall / F1 at every cut-off `k = 1..=MAX_K`.
struct Evaluation {
    precision: Vec<f64>,
    recall: Vec<f64>,
    f1: Vec<f64>,
}

/// Simulate ranked result lists for `QUERIES` queries. `quality` is the chance
/// that the top-ranked document is relevant; it decays with rank.
fn simulate(quality: f64, rng: &mut SimpleRng) -> Evaluation {
    let mut precision = vec![0.0; MAX_K];
    let mut recall = vec![0.0; MAX_K];
    let mut f1 = vec![0.0; MAX_K];

    for _ in 0..QUERIES {
        let relevant = rng.range(5, 25);
        let mut hits = 0usize;
        for k in 1..=MAX_K {
            let p_relevant = quality * (-(k as f64) / 25.0).exp();
            if hits < relevant && rng.next_f64() < p_relevant {
                hits += 1;
            }
            let p = hits as f64 / k as f64;
            let r = hits as f64 / relevant as f64;
            let f = if p + r > 0.0 { 2.0 * p * r / (p + r) } else { 0.0 };
            precision[k - 1] += p;
            recall[k - 1] += r;
            f1[k - 1] += f;
        }
    }

    let n = QUERIES as f64;
    for v in precision.iter_mut().chain(recall.iter_mut()).chain(f1.iter_mut()) {
        *v /= n;
    }
    Evaluation {
        precision,
        recall,
        f1,
    }
}

fn write_csv(path: &Path, eval: &Evaluation) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for k in 0..MAX_K {
        writer.serialize((k + 1, eval.precision[k], eval.recall[k], eval.f1[k]))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, eval: &Evaluation) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("k", DataType::Int64, false),
        Field::new("precision", DataType::Float64, false),
        Field::new("recall", DataType::Float64, false),
        Field::new("f1", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(1..=MAX_K as i64)),
            Arc::new(Float64Array::from(eval.precision.clone())),
            Arc::new(Float64Array::from(eval.recall.clone())),
            Arc::new(Float64Array::from(eval.f1.clone())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut dir = PathBuf::from("..");
    let mut parquet = false;
    for arg in std::env::args().skip(1) {
        if arg == "--parquet" {
            parquet = true;
        } else {
            dir = PathBuf::from(arg);
        }
    }
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let methods = [("JaccardCoeff", 0.45), ("TfIdf", 0.65), ("BM25", 0.8)];

    for (name, quality) in methods {
        let eval = simulate(quality, &mut rng);

        let csv_path = dir.join(format!("evaluationTo{MAX_K}-{name}.csv"));
        write_csv(&csv_path, &eval)?;
        println!("Wrote {MAX_K} rows to {}", csv_path.display());

        if parquet {
            let pq_path = csv_path.with_extension("parquet");
            write_parquet(&pq_path, &eval)?;
            println!("Wrote {MAX_K} rows to {}", pq_path.display());
        }
    }
    Ok(())
}
