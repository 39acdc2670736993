use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs::File;
use std::path::Path;

use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
};
use arrow::datatypes::DataType;
use calamine::{open_workbook_auto, DataType as Cell, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{is_na_marker, CellValue, Dataset, Row};
use crate::error::{RepelError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load one sheet of a tabular file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx`    – workbook; `sheet` is the 0-based worksheet index
/// * `.csv`     – comma-separated, header row first
/// * `.tsv`     – tab-separated, header row first
/// * `.json`    – `[{ "Name": ..., "baseMean": ..., ... }, ...]`
/// * `.parquet` – flat table (e.g. a copy written by [`super::store::persist`])
///
/// Only workbooks have more than one sheet; every other format accepts sheet 0.
pub fn load_file(path: &Path, sheet: usize) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "xlsx" => load_xlsx(path, sheet)?,
        "csv" | "tsv" | "json" | "parquet" | "pq" => {
            if sheet != 0 {
                return Err(RepelError::SheetOutOfRange {
                    path: path.to_path_buf(),
                    index: sheet,
                    available: 1,
                });
            }
            match ext.as_str() {
                "csv" => load_delimited(path, b',')?,
                "tsv" => load_delimited(path, b'\t')?,
                "json" => load_json(path)?,
                _ => load_parquet(path)?,
            }
        }
        other => {
            return Err(RepelError::UnsupportedExtension {
                path: path.to_path_buf(),
                extension: other.to_string(),
            })
        }
    };

    log::info!(
        "Loaded {} rows with columns {:?} from {}",
        dataset.len(),
        dataset.column_names,
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Workbook loader
// ---------------------------------------------------------------------------

/// The first row of the sheet is the header; every following row is data.
fn load_xlsx(path: &Path, sheet: usize) -> Result<Dataset> {
    let mut workbook = open_workbook_auto(path)?;
    let available = workbook.sheet_names().len();
    let range = workbook
        .worksheet_range_at(sheet)
        .ok_or_else(|| RepelError::SheetOutOfRange {
            path: path.to_path_buf(),
            index: sheet,
            available,
        })??;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| RepelError::EmptySheet {
            path: path.to_path_buf(),
            index: sheet,
        })?
        .iter()
        .enumerate()
        .map(|(i, cell)| match workbook_cell(cell) {
            CellValue::Null => format!("Unnamed: {i}"),
            value => value.to_string(),
        })
        .collect();
    let headers = dedupe_headers(headers);
    log::debug!("Sheet {sheet} header = {headers:?}");

    let data = rows
        .map(|cells| {
            let row: BTreeMap<String, CellValue> = headers
                .iter()
                .zip(cells.iter())
                .map(|(h, cell)| (h.clone(), workbook_cell(cell)))
                .collect();
            Row::new(row)
        })
        .collect();

    Ok(Dataset::new(headers, data))
}

fn workbook_cell(cell: &Cell) -> CellValue {
    match cell {
        Cell::Int(i) => CellValue::Integer(*i),
        Cell::Float(f) | Cell::DateTime(f) | Cell::Duration(f) => CellValue::Float(*f),
        Cell::Bool(b) => CellValue::Bool(*b),
        Cell::String(s) if is_na_marker(s.trim()) => CellValue::Null,
        Cell::String(s) | Cell::DateTimeIso(s) | Cell::DurationIso(s) => {
            CellValue::String(s.clone())
        }
        // `#N/A`, `#DIV/0!` and friends read as missing values.
        Cell::Error(_) | Cell::Empty => CellValue::Null,
    }
}

// ---------------------------------------------------------------------------
// CSV / TSV loader
// ---------------------------------------------------------------------------

fn load_delimited(path: &Path, delimiter: u8) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)?;
    let headers = dedupe_headers(reader.headers()?.iter().map(str::to_string).collect());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let cells = headers
            .iter()
            .zip(record.iter())
            .map(|(h, value)| (h.clone(), CellValue::from_text(value)))
            .collect();
        rows.push(Row::new(cells));
    }

    Ok(Dataset::new(headers, rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented layout (`df.to_json(orient='records')`).
fn load_json(path: &Path) -> Result<Dataset> {
    let file = File::open(path)?;
    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(file))?;

    let records = root.as_array().ok_or_else(|| RepelError::InvalidRecord {
        row: 0,
        reason: "expected a top-level JSON array".to_string(),
    })?;

    // Columns in the order keys first appear in the file.
    let mut column_names: Vec<String> = Vec::new();
    let mut known: HashSet<&str> = HashSet::new();
    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or_else(|| RepelError::InvalidRecord {
            row: i,
            reason: "not a JSON object".to_string(),
        })?;
        for key in obj.keys() {
            if known.insert(key.as_str()) {
                column_names.push(key.clone());
            }
        }
        rows.push(Row::new(
            obj.iter()
                .map(|(key, val)| (key.clone(), json_to_cell(val)))
                .collect(),
        ));
    }

    Ok(Dataset::new(column_names, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) if is_na_marker(s.trim()) => CellValue::Null,
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Header names
// ---------------------------------------------------------------------------

/// Make repeated header names unique the way pandas does: the second `X`
/// becomes `X.1`, the third `X.2`, skipping any name already in use.
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(headers.len());
    for header in headers {
        if taken.insert(header.clone()) {
            out.push(header);
            continue;
        }
        let suffix = next_suffix.entry(header.clone()).or_insert(1);
        loop {
            let candidate = format!("{header}.{suffix}");
            *suffix += 1;
            if taken.insert(candidate.clone()) {
                log::warn!("Duplicate column '{header}' renamed to '{candidate}'");
                out.push(candidate);
                break;
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet table. Strings, integers, floats and booleans map to
/// the matching [`CellValue`]; any other Arrow type is kept as its debug text.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut column_names: Vec<String> = Vec::new();
    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();
        if column_names.is_empty() {
            column_names =
                dedupe_headers(schema.fields().iter().map(|f| f.name().clone()).collect());
        }

        for row in 0..batch.num_rows() {
            let cells = column_names
                .iter()
                .zip(batch.columns())
                .map(|(name, col)| (name.clone(), arrow_cell(col, row)))
                .collect();
            rows.push(Row::new(cells));
        }
    }

    Ok(Dataset::new(column_names, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_cell(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => CellValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map_or(CellValue::Null, |a| CellValue::Integer(a.value(row) as i64)),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map_or(CellValue::Null, |a| CellValue::Integer(a.value(row))),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map_or(CellValue::Null, |a| CellValue::Float(a.value(row) as f64)),
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map_or(CellValue::Null, |a| CellValue::Float(a.value(row))),
        DataType::Boolean => col
            .as_any()
            .downcast_ref::<BooleanArray>()
            .map_or(CellValue::Null, |a| CellValue::Bool(a.value(row))),
        other => CellValue::String(format!("{other:?}")),
    }
}
