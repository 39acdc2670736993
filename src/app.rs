use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MaPlotApp {
    pub state: AppState,
}

impl MaPlotApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for MaPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Central panel: MA plots ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::ma_plots(ui, &self.state);
        });
    }
}

/// Open the plot window and block until it is closed.
pub fn show(state: AppState) -> eframe::Result {
    let width = 360.0 * state.series.len().max(1) as f32;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width, 480.0])
            .with_min_inner_size([360.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Repetitive Element MA Plot",
        options,
        Box::new(|_cc| Ok(Box::new(MaPlotApp::new(state)))),
    )
}
