//! Queryable copy of the normalized table, written as Parquet.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use super::model::{CellValue, ColumnKind, Dataset};
use super::normalize::NormalizedDataset;
use crate::error::Result;

/// Logical table name; the file is `<dir>/<STORE_TABLE>.parquet`.
pub const STORE_TABLE: &str = "repetitive_elements";

pub fn store_path(dir: &Path) -> PathBuf {
    dir.join(format!("{STORE_TABLE}.parquet"))
}

/// Write every column of the normalized table (source columns plus derived
/// ones) to `<dir>/repetitive_elements.parquet`, replacing any previous copy.
pub fn persist(dataset: &NormalizedDataset, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = store_path(dir);
    let batch = to_record_batch(dataset.dataset())?;

    let file = File::create(&path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;

    log::info!(
        "Stored {} rows in table '{STORE_TABLE}' at {}",
        batch.num_rows(),
        path.display()
    );
    Ok(path)
}

/// One nullable Arrow column per table column, typed by [`ColumnKind`].
pub fn to_record_batch(dataset: &Dataset) -> Result<RecordBatch> {
    let mut fields = Vec::with_capacity(dataset.column_names.len());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(dataset.column_names.len());

    for name in &dataset.column_names {
        let cells = dataset.rows.iter().map(|r| r.get(name).unwrap_or(&CellValue::Null));
        let (data_type, array): (DataType, ArrayRef) = match dataset.column_kind(name) {
            ColumnKind::Integer => (
                DataType::Int64,
                Arc::new(
                    cells
                        .map(|c| match c {
                            CellValue::Integer(i) => Some(*i),
                            _ => None,
                        })
                        .collect::<Int64Array>(),
                ),
            ),
            ColumnKind::Float => (
                DataType::Float64,
                Arc::new(cells.map(CellValue::as_f64).collect::<Float64Array>()),
            ),
            ColumnKind::Bool => (
                DataType::Boolean,
                Arc::new(
                    cells
                        .map(|c| match c {
                            CellValue::Bool(b) => Some(*b),
                            _ => None,
                        })
                        .collect::<BooleanArray>(),
                ),
            ),
            ColumnKind::Text => (
                DataType::Utf8,
                Arc::new(
                    cells
                        .map(|c| (!c.is_missing()).then(|| c.to_string()))
                        .collect::<StringArray>(),
                ),
            ),
        };
        fields.push(Field::new(name, data_type, true));
        columns.push(array);
    }

    let schema = Arc::new(Schema::new(fields));
    Ok(RecordBatch::try_new(schema, columns)?)
}
