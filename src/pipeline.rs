use anyhow::{Context, Result};

use crate::config::PlotConfig;
use crate::data::loader::load_file;
use crate::data::model::Dataset;
use crate::figure::Figure;

/// Load every configured table, in order. Any failure aborts the whole run
/// before anything is drawn.
pub fn load_datasets(config: &PlotConfig) -> Result<Vec<Dataset>> {
    let colors = config.resolve_colors()?;
    let options = config.load_options();

    config
        .series
        .iter()
        .zip(colors)
        .map(|(series, color)| -> Result<Dataset> {
            let rows = load_file(&series.path, options)
                .with_context(|| format!("loading {} ({})", series.path.display(), series.label))?;
            Ok(Dataset::new(series.label.clone(), color, rows))
        })
        .collect()
}

/// Log what was loaded and flag tables the interpolation cannot interpret.
pub fn summarize(dataset: &Dataset) {
    log::info!("{}: {} rows", dataset.label, dataset.len());
    if let Some(best) = dataset.best_f1() {
        log::info!("{}: best {}", dataset.label, best);
    }
    if let Some(i) = dataset.first_recall_decrease() {
        log::warn!(
            "{}: recall decreases at row {} ({} < {}); interpolated precision assumes ascending recall",
            dataset.label,
            i,
            dataset.rows[i].recall,
            dataset.rows[i - 1].recall
        );
    }
}

/// Load, interpolate and compose all configured datasets.
pub fn build_figure(config: &PlotConfig) -> Result<Figure> {
    let datasets = load_datasets(config)?;
    let mut figure = Figure::new();
    for dataset in &datasets {
        summarize(dataset);
        figure.add_curve(dataset);
    }
    Ok(figure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeriesConfig;
    use crate::figure::CurveKind;

    fn write(dir: &std::path::Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn series(path: std::path::PathBuf, label: &str) -> SeriesConfig {
        SeriesConfig {
            path,
            label: label.to_string(),
            color: None,
        }
    }

    #[test]
    fn builds_one_entry_per_series_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.csv", "k,p,r\n1, 0.5, 0.1\n2, 0.8, 0.2\n3, 0.3, 0.3\n");
        let b = write(dir.path(), "b.csv", "k,p,r,f1\n1, 0.9, 0.1, 0.18\n");
        let config = PlotConfig {
            series: vec![series(a, "A"), series(b, "B")],
            ..PlotConfig::default()
        };

        let figure = build_figure(&config).unwrap();
        let labels: Vec<&str> = figure.legend().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, ["A", "B"]);

        let interp = figure.datasets[0].curve(CurveKind::Interpolated).unwrap();
        let ys: Vec<f64> = interp.points.iter().map(|&(_, y)| y).collect();
        assert_eq!(ys, vec![0.8, 0.8, 0.3]);
    }

    #[test]
    fn missing_file_aborts_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.csv", "k,p,r\n1, 0.5, 0.1\n");
        let missing = dir.path().join("missing.csv");
        let config = PlotConfig {
            series: vec![series(a, "A"), series(missing, "B")],
            ..PlotConfig::default()
        };

        let err = build_figure(&config).unwrap_err();
        assert!(format!("{err:#}").contains("missing.csv"));
    }

    #[test]
    fn short_rows_abort_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.csv", "k,p\n1, 0.5\n");
        let config = PlotConfig {
            series: vec![series(a, "A")],
            ..PlotConfig::default()
        };
        let err = build_figure(&config).unwrap_err();
        assert!(err
            .chain()
            .any(|e| e.downcast_ref::<crate::data::loader::LoadError>().is_some()));
    }
}
