//! Missing-value fill and the derived `baseMean_log_10` column.

use super::model::{CellValue, ColumnKind, Dataset, BASE_MEAN, BASE_MEAN_LOG10};
use crate::error::{RepelError, Result};

/// A dataset whose numeric gaps are filled and whose derived column is set.
///
/// Only [`normalize`] builds one, and it exposes no mutable access: any change
/// to the table means loading and normalizing again.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDataset {
    inner: Dataset,
}

impl NormalizedDataset {
    pub fn dataset(&self) -> &Dataset {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn into_inner(self) -> Dataset {
        self.inner
    }
}

/// `log10(|x| + 1)`. Non-negative for every finite `x`, defined at zero, and
/// blind to the sign of `x`.
pub fn log10_magnitude(x: f64) -> f64 {
    (x.abs() + 1.0).log10()
}

/// Fill missing numeric cells with `0` and append `baseMean_log_10`.
///
/// The fill is written into the rows before the derived column is computed,
/// so a null `baseMean` derives `log10(0 + 1) = 0`. Text columns keep their
/// nulls. Running this on an already normalized table recomputes the derived
/// column to the same values.
pub fn normalize(mut dataset: Dataset) -> Result<NormalizedDataset> {
    let numeric: Vec<(String, ColumnKind)> = dataset
        .column_names
        .iter()
        .map(|c| (c.clone(), dataset.column_kind(c)))
        .filter(|(_, kind)| kind.is_numeric())
        .collect();

    // Integer columns stay integer; float columns become uniformly float.
    let mut filled = 0usize;
    for row in &mut dataset.rows {
        for (col, kind) in &numeric {
            let cell = row.cells.entry(col.clone()).or_insert(CellValue::Null);
            if cell.is_missing() {
                *cell = match kind {
                    ColumnKind::Integer => CellValue::Integer(0),
                    _ => CellValue::Float(0.0),
                };
                filled += 1;
            } else if let (ColumnKind::Float, CellValue::Integer(i)) = (kind, &*cell) {
                *cell = CellValue::Float(*i as f64);
            }
        }
    }
    if filled > 0 {
        log::debug!("Filled {filled} missing numeric cells with 0");
    }

    dataset.require_column(BASE_MEAN)?;
    let mut derived = Vec::with_capacity(dataset.len());
    for (i, row) in dataset.rows.iter().enumerate() {
        let value = match row.get(BASE_MEAN) {
            Some(cell) if cell.is_missing() => 0.0,
            Some(cell) => cell.as_f64().ok_or_else(|| RepelError::NonNumeric {
                column: BASE_MEAN.to_string(),
                row: i,
                value: cell.to_string(),
            })?,
            None => 0.0,
        };
        derived.push(log10_magnitude(value));
    }

    for (row, value) in dataset.rows.iter_mut().zip(derived) {
        row.cells
            .insert(BASE_MEAN_LOG10.to_string(), CellValue::Float(value));
    }
    dataset.ensure_column(BASE_MEAN_LOG10);

    Ok(NormalizedDataset { inner: dataset })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Row, LOG2_FOLD_CHANGE, NAME};
    use std::collections::BTreeMap;

    fn table(base_means: &[CellValue]) -> Dataset {
        let rows = base_means
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let mut cells = BTreeMap::new();
                cells.insert(NAME.to_string(), CellValue::String(format!("rep{i}")));
                cells.insert(BASE_MEAN.to_string(), v.clone());
                cells.insert(LOG2_FOLD_CHANGE.to_string(), CellValue::Null);
                Row::new(cells)
            })
            .collect();
        Dataset::new(
            vec![NAME.into(), BASE_MEAN.into(), LOG2_FOLD_CHANGE.into()],
            rows,
        )
    }

    fn derived(ds: &NormalizedDataset) -> Vec<f64> {
        ds.dataset()
            .rows
            .iter()
            .map(|r| r.get(BASE_MEAN_LOG10).and_then(CellValue::as_f64).unwrap())
            .collect()
    }

    #[test]
    fn derived_column_is_non_negative_for_any_sign() {
        let ds = normalize(table(&[
            CellValue::Float(0.0),
            CellValue::Float(99.0),
            CellValue::Float(-99.0),
            CellValue::Integer(9),
        ]))
        .unwrap();
        let values = derived(&ds);
        assert_eq!(values[0], 0.0);
        assert!((values[1] - 2.0).abs() < 1e-12);
        assert_eq!(values[1], values[2]);
        assert!((values[3] - 1.0).abs() < 1e-12);
        assert!(values.iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn missing_numbers_become_zero_before_derivation() {
        let ds = normalize(table(&[
            CellValue::Null,
            CellValue::Float(f64::NAN),
            CellValue::Float(3.0),
        ]))
        .unwrap();
        assert_eq!(derived(&ds)[0], 0.0);
        assert_eq!(derived(&ds)[1], 0.0);
        let first = &ds.dataset().rows[0];
        assert_eq!(first.get(BASE_MEAN), Some(&CellValue::Float(0.0)));
        assert_eq!(first.get(LOG2_FOLD_CHANGE), Some(&CellValue::Float(0.0)));
    }

    #[test]
    fn text_columns_keep_their_nulls() {
        let mut ds = table(&[CellValue::Float(1.0)]);
        ds.column_names.push("Type".into());
        ds.rows[0].cells.insert("Type".into(), CellValue::Null);
        ds.rows.push(ds.rows[0].clone());
        ds.rows[1]
            .cells
            .insert("Type".into(), CellValue::String("LINE".into()));
        let ds = normalize(ds).unwrap();
        assert_eq!(ds.dataset().rows[0].get("Type"), Some(&CellValue::Null));
    }

    #[test]
    fn renormalizing_is_bit_identical() {
        let once = normalize(table(&[
            CellValue::Float(0.123),
            CellValue::Float(-5.5e4),
            CellValue::Null,
        ]))
        .unwrap();
        let twice = normalize(once.clone().into_inner()).unwrap();
        let a: Vec<u64> = derived(&once).iter().map(|v| v.to_bits()).collect();
        let b: Vec<u64> = derived(&twice).iter().map(|v| v.to_bits()).collect();
        assert_eq!(a, b);
        assert_eq!(once, twice);
        let count = twice
            .dataset()
            .column_names
            .iter()
            .filter(|c| *c == BASE_MEAN_LOG10)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn keeps_columns_and_row_order() {
        let input = table(&[CellValue::Float(5.0), CellValue::Float(1.0)]);
        let names: Vec<_> = input.rows.iter().map(Row::name).collect();
        let ds = normalize(input.clone()).unwrap();
        let after: Vec<_> = ds.dataset().rows.iter().map(Row::name).collect();
        assert_eq!(names, after);
        assert_eq!(
            ds.dataset().column_names,
            vec![NAME, BASE_MEAN, LOG2_FOLD_CHANGE, BASE_MEAN_LOG10]
        );
    }

    #[test]
    fn missing_base_mean_column_fails_at_derivation() {
        let ds = Dataset::new(vec![NAME.into()], Vec::new());
        assert!(matches!(
            normalize(ds),
            Err(RepelError::MissingColumn(c)) if c == BASE_MEAN
        ));
    }

    #[test]
    fn text_base_mean_is_a_schema_error() {
        let ds = table(&[CellValue::Float(1.0), CellValue::String("high".into())]);
        assert!(matches!(
            normalize(ds),
            Err(RepelError::NonNumeric { row: 1, .. })
        ));
    }
}
