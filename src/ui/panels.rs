use eframe::egui::{self, Color32, RichText, Ui};

use crate::color;
use crate::figure::CurveKind;
use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Left side panel – legend and per-dataset info
// ---------------------------------------------------------------------------

/// Render the legend / dataset panel.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Datasets");
    ui.separator();

    for dataset in &state.figure.datasets {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(RichText::new("■").color(color::to_egui(dataset.color)));
            ui.strong(&dataset.label);
        });
        ui.label(format!("{} rows", dataset.rows));
        ui.add_space(4.0);
    }

    ui.separator();
    ui.strong("Curves");
    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new("- -").color(color::to_egui(color::INTERPOLATED)));
        ui.label("interpolated precision");
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new("▁▔").color(color::to_egui(color::ENVELOPE)));
        ui.label("envelope (step)");
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Save figure as…").clicked() {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.selectable_value(&mut state.tab, Tab::Interactive, "Interactive");
        ui.selectable_value(&mut state.tab, Tab::Saved, "Saved image");

        ui.separator();

        for kind in CurveKind::ALL {
            if ui
                .selectable_label(state.is_visible(kind), kind.name())
                .clicked()
            {
                state.toggle(kind);
            }
        }

        ui.separator();
        ui.label(format!("Saved to {}", state.output.display()));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save figure")
        .add_filter("PNG image", &["png"])
        .set_file_name("fig.png")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.save_copy(&path) {
            log::error!("Failed to save figure: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        } else {
            log::info!("Saved figure copy to {}", path.display());
        }
    }
}
