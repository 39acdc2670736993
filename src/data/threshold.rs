//! Threshold selection over a single subset (upregulated elements).

use super::model::LOG2_FOLD_CHANGE;
use super::partition::{numeric_cell, Partition, Subset};
use crate::error::Result;

/// Subset the upregulated selection runs on by default.
pub const UPREGULATED_SUBSET: &str = "ERVL";

/// Default inclusive lower bound on `log2FoldChange` for an element to count
/// as upregulated.
pub const DEFAULT_MIN_LOG2FC: f64 = 3.0;

/// Column and inclusive lower bound for [`select_at_least`].
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdConfig {
    pub column: String,
    pub threshold: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            column: LOG2_FOLD_CHANGE.to_string(),
            threshold: DEFAULT_MIN_LOG2FC,
        }
    }
}

/// Rows of `subset` whose `column` is `>= threshold`, in subset order.
///
/// The result keeps the subset's name and borrows the same table. No match
/// yields an empty subset.
pub fn select_at_least<'a>(
    subset: &Subset<'a>,
    column: &str,
    threshold: f64,
) -> Result<Subset<'a>> {
    subset.dataset().dataset().require_column(column)?;

    let mut kept = Vec::new();
    for (row, &i) in subset.rows().zip(subset.indices()) {
        if numeric_cell(row, column, i)? >= threshold {
            kept.push(i);
        }
    }

    Ok(Subset::from_indices(
        subset.name().to_string(),
        subset.dataset(),
        kept,
    ))
}

/// Upregulated ERVL elements: the ERVL subset filtered by `config`. `None`
/// when the partition has no ERVL subset.
pub fn upregulated<'a>(
    partition: &Partition<'a>,
    config: &ThresholdConfig,
) -> Result<Option<Subset<'a>>> {
    partition
        .get(UPREGULATED_SUBSET)
        .map(|ervl| select_at_least(ervl, &config.column, config.threshold))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Dataset, BASE_MEAN, FAMILY, NAME, TYPE};
    use crate::data::normalize::{normalize, NormalizedDataset};
    use crate::data::partition::{default_categories, partition};
    use crate::error::RepelError;
    use std::collections::BTreeMap;

    fn ervl_table(fold_changes: &[Option<f64>]) -> NormalizedDataset {
        let rows = fold_changes
            .iter()
            .enumerate()
            .map(|(i, fc)| {
                let mut cells = BTreeMap::new();
                cells.insert(NAME.to_string(), CellValue::String(format!("MERVL_{i}")));
                cells.insert(BASE_MEAN.to_string(), CellValue::Float(100.0));
                cells.insert(
                    LOG2_FOLD_CHANGE.to_string(),
                    fc.map_or(CellValue::Null, CellValue::Float),
                );
                cells.insert(TYPE.to_string(), CellValue::String("LTR".into()));
                cells.insert(FAMILY.to_string(), CellValue::String("ERVL".into()));
                cells
            })
            .collect();
        normalize(Dataset::from_records(rows)).unwrap()
    }

    fn fold_changes(subset: &Subset<'_>) -> Vec<f64> {
        subset.column_f64(LOG2_FOLD_CHANGE).unwrap()
    }

    #[test]
    fn lower_bound_is_inclusive() {
        let ds = ervl_table(&[Some(2.0), Some(3.0), Some(4.0), Some(5.0)]);
        let parts = partition(&ds, &default_categories()).unwrap();
        let ervl = parts.get("ERVL").unwrap();
        let up = select_at_least(ervl, LOG2_FOLD_CHANGE, 3.0).unwrap();
        assert_eq!(fold_changes(&up), vec![3.0, 4.0, 5.0]);
        assert_eq!(up.indices(), &[1, 2, 3]);
        assert_eq!(up.name(), "ERVL");
    }

    #[test]
    fn nothing_above_threshold_is_empty_not_error() {
        let ds = ervl_table(&[Some(2.0), Some(3.0), Some(4.0), Some(5.0)]);
        let parts = partition(&ds, &default_categories()).unwrap();
        let up = select_at_least(parts.get("ERVL").unwrap(), LOG2_FOLD_CHANGE, 10.0).unwrap();
        assert!(up.is_empty());
    }

    #[test]
    fn keeps_input_order() {
        let ds = ervl_table(&[Some(9.0), Some(1.0), Some(4.0), Some(7.0)]);
        let parts = partition(&ds, &default_categories()).unwrap();
        let up = upregulated(&parts, &ThresholdConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(fold_changes(&up), vec![9.0, 4.0, 7.0]);
    }

    #[test]
    fn filled_nulls_compare_as_zero() {
        let ds = ervl_table(&[None, Some(3.5)]);
        let parts = partition(&ds, &default_categories()).unwrap();
        let up = select_at_least(parts.get("ERVL").unwrap(), LOG2_FOLD_CHANGE, -1.0).unwrap();
        assert_eq!(fold_changes(&up), vec![0.0, 3.5]);
    }

    #[test]
    fn unknown_column_is_a_schema_error() {
        let ds = ervl_table(&[Some(3.0)]);
        let parts = partition(&ds, &default_categories()).unwrap();
        assert!(matches!(
            select_at_least(parts.get("ERVL").unwrap(), "padj", 0.05),
            Err(RepelError::MissingColumn(c)) if c == "padj"
        ));
    }

    #[test]
    fn default_threshold_is_three() {
        let config = ThresholdConfig::default();
        assert_eq!(config.threshold, 3.0);
        assert_eq!(config.column, LOG2_FOLD_CHANGE);
    }

    #[test]
    fn no_ervl_subset_gives_none() {
        let ds = ervl_table(&[Some(5.0)]);
        let parts = partition(&ds, &default_categories()[..3]).unwrap();
        assert!(upregulated(&parts, &ThresholdConfig::default())
            .unwrap()
            .is_none());
    }
}
