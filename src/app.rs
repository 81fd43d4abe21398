use eframe::egui;

use crate::state::{AppState, Tab};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PrPlotApp {
    pub state: AppState,
}

impl PrPlotApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for PrPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: datasets ----
        egui::SidePanel::left("dataset_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: plot or saved image ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.tab {
            Tab::Interactive => plot::pr_plot(ui, &self.state),
            Tab::Saved => plot::saved_image(ui, &self.state),
        });
    }
}
