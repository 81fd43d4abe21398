/// Data layer: core types, loading, and interpolation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  positional columns → Vec<EvaluationRow>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  rows + label + colour
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ interpolate  │  suffix maximum of precision (two routes)
///   └─────────────┘
/// ```

pub mod interpolate;
pub mod loader;
pub mod model;
