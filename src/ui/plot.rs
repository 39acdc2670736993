use eframe::egui::Ui;
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Points};

use crate::state::{AppState, PlotSeries};

// ---------------------------------------------------------------------------
// MA plots (central panel)
// ---------------------------------------------------------------------------

/// One MA plot per selected subset, side by side.
pub fn ma_plots(ui: &mut Ui, state: &AppState) {
    if state.series.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Nothing selected to plot");
        });
        return;
    }

    ui.columns(state.series.len(), |columns: &mut [Ui]| {
        for (ui, series) in columns.iter_mut().zip(&state.series) {
            ma_plot(ui, series);
        }
    });
}

fn ma_plot(ui: &mut Ui, series: &PlotSeries) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(series.title());
        ui.label(format!("{} elements ({})", series.points.len(), series.key.level()));
    });

    let points: PlotPoints = series.points.iter().copied().collect();
    let scatter = Points::new(points)
        .name(series.key.subset_name())
        .color(series.color)
        .radius(2.5);

    Plot::new(("ma_plot", series.key))
        .legend(Legend::default())
        .x_axis_label("log 10 mean expression")
        .y_axis_label("log 2 fold change")
        .label_formatter(|name: &str, value: &PlotPoint| {
            if name.is_empty() {
                return format!("{:.2}, {:.2}", value.x, value.y);
            }
            let label = series.nearest_label(value.x, value.y).unwrap_or(name);
            format!("{label}\n{:.2}, {:.2}", value.x, value.y)
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(scatter);
        });
}
