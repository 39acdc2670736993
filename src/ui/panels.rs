use eframe::egui::{self, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Dataset size and the row count of every plotted subset, in its colour.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(format!("{} elements loaded", state.total_rows));

        for series in &state.series {
            ui.separator();
            ui.label(
                RichText::new(format!("{}: {}", series.key, series.points.len()))
                    .color(series.color),
            );
        }
    });
}
