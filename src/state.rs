use eframe::egui::Color32;

use crate::color::subset_color;
use crate::data::model::{BASE_MEAN_LOG10, LOG2_FOLD_CHANGE};
use crate::data::partition::{Partition, Subset};
use crate::error::Result;
use crate::selection::{Selection, SubsetKey};

// ---------------------------------------------------------------------------
// Plot series: owned MA-plot data for one subset
// ---------------------------------------------------------------------------

/// One scatter series: `(baseMean_log_10, log2FoldChange)` per row plus the
/// row's `Name` for the hover label.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub key: SubsetKey,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
    pub labels: Vec<String>,
}

impl PlotSeries {
    pub fn from_subset(key: SubsetKey, subset: &Subset<'_>) -> Result<Self> {
        let xs = subset.column_f64(BASE_MEAN_LOG10)?;
        let ys = subset.column_f64(LOG2_FOLD_CHANGE)?;
        Ok(PlotSeries {
            key,
            color: subset_color(key),
            points: xs.into_iter().zip(ys).map(|(x, y)| [x, y]).collect(),
            labels: subset.names(),
        })
    }

    pub fn title(&self) -> &'static str {
        self.key.title()
    }

    /// Label of the point closest to `(x, y)`.
    pub fn nearest_label(&self, x: f64, y: f64) -> Option<&str> {
        self.points
            .iter()
            .zip(&self.labels)
            .map(|(p, label)| ((p[0] - x).powi(2) + (p[1] - y).powi(2), label))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, label)| label.as_str())
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Everything the plot window shows, detached from the table it came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Rows in the normalized table.
    pub total_rows: usize,
    /// One series per selected subset, in drawing order.
    pub series: Vec<PlotSeries>,
}

impl AppState {
    /// Collect the selected subsets. A selected key whose subset the partition
    /// does not have (custom categories) is skipped with a warning.
    pub fn build(
        partition: &Partition<'_>,
        selection: &Selection,
        total_rows: usize,
    ) -> Result<Self> {
        let mut series = Vec::new();
        for key in selection.keys() {
            match partition.get(key.subset_name()) {
                Some(subset) => series.push(PlotSeries::from_subset(key, subset)?),
                None => log::warn!("No '{key}' subset to plot; skipping"),
            }
        }
        Ok(AppState { total_rows, series })
    }
}
