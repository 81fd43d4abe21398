use eframe::egui::{self, Ui};
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints};

use crate::color;
use crate::figure::{CurveKind, X_LABEL, Y_LABEL};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Precision-recall plot (central panel)
// ---------------------------------------------------------------------------

/// Render the interactive precision-recall plot.
pub fn pr_plot(ui: &mut Ui, state: &AppState) {
    if state.figure.datasets.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No datasets to plot");
        });
        return;
    }

    Plot::new("pr_plot")
        .legend(Legend::default())
        .x_axis_label(X_LABEL)
        .y_axis_label(Y_LABEL)
        .include_x(0.0)
        .include_x(1.0)
        .include_y(0.0)
        .include_y(1.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for dataset in &state.figure.datasets {
                for curve in &dataset.curves {
                    if !state.is_visible(curve.kind) {
                        continue;
                    }
                    for (i, segment) in curve.segments().into_iter().enumerate() {
                        let points: PlotPoints = segment.iter().map(|&(x, y)| [x, y]).collect();

                        let mut line = Line::new(points)
                            .color(color::to_egui(curve.color))
                            .width(1.5);
                        if curve.kind.is_dashed() {
                            line = line.style(LineStyle::dashed_dense());
                        }
                        // Unnamed items stay out of the legend.
                        if curve.kind == CurveKind::Raw && i == 0 {
                            line = line.name(&dataset.label);
                        }

                        plot_ui.line(line);
                    }
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Saved image (central panel, second tab)
// ---------------------------------------------------------------------------

/// Show the PNG exactly as it was written to disk.
pub fn saved_image(ui: &mut Ui, state: &AppState) {
    let image = egui::Image::from_bytes("bytes://saved-figure.png", state.png.clone())
        .max_width(ui.available_width())
        .max_height(ui.available_height())
        .maintain_aspect_ratio(true);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add(image);
    });
}
