mod app;
mod color;
mod config;
mod data;
mod export;
mod figure;
mod pipeline;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use app::PrPlotApp;
use config::PlotConfig;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => PlotConfig::from_file(&PathBuf::from(path))?,
        None => PlotConfig::default(),
    };
    log::debug!("{config:?}");

    let figure = pipeline::build_figure(&config)?;
    let png = export::save_png(&figure, &config.output, config.width, config.height)?;

    if !config.show {
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 750.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = AppState::new(figure, png, config.output.clone());
    eframe::run_native(
        "Precision-Recall Curves",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can show the saved png.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(PrPlotApp::new(state)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
