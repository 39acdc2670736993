use std::collections::BTreeMap;
use std::fmt;

use crate::error::{RepelError, Result};

// ---------------------------------------------------------------------------
// Well-known column names
// ---------------------------------------------------------------------------

pub const BASE_MEAN: &str = "baseMean";
pub const LOG2_FOLD_CHANGE: &str = "log2FoldChange";
pub const TYPE: &str = "Type";
pub const FAMILY: &str = "Family";
pub const NAME: &str = "Name";

/// Derived column: `log10(|baseMean| + 1)`.
pub const BASE_MEAN_LOG10: &str = "baseMean_log_10";

/// Columns a differential-expression table must carry to be classified.
pub const REQUIRED_COLUMNS: [&str; 5] = [NAME, BASE_MEAN, LOG2_FOLD_CHANGE, TYPE, FAMILY];

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the dtypes a spreadsheet reader produces.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Numeric view of the cell. Missing cells are `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if !v.is_nan() => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Null cells and NaN floats both count as missing.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Integer(_) | CellValue::Float(_))
    }

    /// Interpret a raw text cell the way spreadsheet readers do: empty and
    /// `NA`-like markers are missing, numbers are numbers, the rest is text.
    pub fn from_text(s: &str) -> Self {
        let trimmed = s.trim();
        if is_na_marker(trimmed) {
            return CellValue::Null;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return CellValue::Float(f);
        }
        if trimmed == "true" || trimmed == "false" {
            return CellValue::Bool(trimmed == "true");
        }
        CellValue::String(s.to_string())
    }
}

/// Text that reads as a missing value. Same set as pandas' default `na_values`,
/// so `#N/A` exported from a spreadsheet or `n/a` typed by hand are gaps, not
/// text.
pub(crate) fn is_na_marker(s: &str) -> bool {
    matches!(
        s,
        "" | "#N/A"
            | "#N/A N/A"
            | "#NA"
            | "-1.#IND"
            | "-1.#QNAN"
            | "-NaN"
            | "-nan"
            | "1.#IND"
            | "1.#QNAN"
            | "<NA>"
            | "N/A"
            | "NA"
            | "NULL"
            | "NaN"
            | "None"
            | "n/a"
            | "nan"
            | "null"
    )
}

// ---------------------------------------------------------------------------
// Row – one line of the table
// ---------------------------------------------------------------------------

/// One row of the source table: column name → value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new(cells: BTreeMap<String, CellValue>) -> Self {
        Row { cells }
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// The row's `Name`, rendered as text.
    pub fn name(&self) -> Option<String> {
        self.cells
            .get(NAME)
            .filter(|v| !v.is_missing())
            .map(|v| v.to_string())
    }
}

// ---------------------------------------------------------------------------
// ColumnKind – inferred storage type of a column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Bool,
    Text,
}

impl ColumnKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table. Rows keep their source order and every row carries
/// every column (absent cells are stored as [`CellValue::Null`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub rows: Vec<Row>,
    /// Column names in source order.
    pub column_names: Vec<String>,
}

impl Dataset {
    pub fn new(column_names: Vec<String>, mut rows: Vec<Row>) -> Self {
        for row in &mut rows {
            for col in &column_names {
                row.cells.entry(col.clone()).or_insert(CellValue::Null);
            }
        }
        Dataset { rows, column_names }
    }

    /// Build from loosely-shaped records; columns appear in first-seen order.
    pub fn from_records(records: Vec<BTreeMap<String, CellValue>>) -> Self {
        let mut column_names: Vec<String> = Vec::new();
        for rec in &records {
            for col in rec.keys() {
                if !column_names.contains(col) {
                    column_names.push(col.clone());
                }
            }
        }
        Dataset::new(column_names, records.into_iter().map(Row::new).collect())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_names.iter().any(|c| c == column)
    }

    pub fn require_column(&self, column: &str) -> Result<()> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(RepelError::MissingColumn(column.to_string()))
        }
    }

    /// Eager schema check: fail on the first absent column.
    pub fn require_columns(&self, columns: &[&str]) -> Result<()> {
        columns.iter().try_for_each(|c| self.require_column(c))
    }

    /// Infer the storage type of a column from its non-missing values.
    /// A column with no values at all is treated as `Float`.
    pub fn column_kind(&self, column: &str) -> ColumnKind {
        let mut kind: Option<ColumnKind> = None;
        for value in self.rows.iter().filter_map(|r| r.get(column)) {
            let this = match value {
                v if v.is_missing() => continue,
                CellValue::Integer(_) => ColumnKind::Integer,
                CellValue::Float(_) => ColumnKind::Float,
                CellValue::Bool(_) => ColumnKind::Bool,
                CellValue::String(_) | CellValue::Null => return ColumnKind::Text,
            };
            kind = Some(match (kind, this) {
                (None, k) => k,
                (Some(a), b) if a == b => a,
                (Some(a), b) if a.is_numeric() && b.is_numeric() => ColumnKind::Float,
                _ => return ColumnKind::Text,
            });
        }
        kind.unwrap_or(ColumnKind::Float)
    }

    /// Add a column name if it is not already present.
    pub(crate) fn ensure_column(&mut self, column: &str) {
        if !self.has_column(column) {
            self.column_names.push(column.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, CellValue)]) -> Row {
        Row::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn text_cells_follow_spreadsheet_conventions() {
        assert_eq!(CellValue::from_text("NA"), CellValue::Null);
        assert_eq!(CellValue::from_text(""), CellValue::Null);
        assert_eq!(CellValue::from_text("12"), CellValue::Integer(12));
        assert_eq!(CellValue::from_text("-1.5"), CellValue::Float(-1.5));
        assert_eq!(
            CellValue::from_text("L1MdA"),
            CellValue::String("L1MdA".into())
        );
    }

    #[test]
    fn spreadsheet_error_and_hand_typed_markers_are_missing() {
        for marker in ["#N/A", "n/a", "None", "<NA>", "-nan", "1.#QNAN", " #NA "] {
            assert_eq!(CellValue::from_text(marker), CellValue::Null, "{marker}");
        }
        assert_eq!(
            CellValue::from_text("none"),
            CellValue::String("none".into())
        );
    }

    #[test]
    fn nan_is_missing_and_not_numeric_value() {
        assert!(CellValue::Float(f64::NAN).is_missing());
        assert_eq!(CellValue::Float(f64::NAN).as_f64(), None);
        assert_eq!(CellValue::Integer(4).as_f64(), Some(4.0));
    }

    #[test]
    fn new_fills_absent_cells_with_null() {
        let ds = Dataset::new(
            vec!["Name".into(), "baseMean".into()],
            vec![row(&[("Name", CellValue::String("a".into()))])],
        );
        assert_eq!(ds.rows[0].get("baseMean"), Some(&CellValue::Null));
    }

    #[test]
    fn column_kind_inference() {
        let ds = Dataset::from_records(vec![
            row(&[
                ("a", CellValue::Integer(1)),
                ("b", CellValue::Integer(1)),
                ("c", CellValue::String("x".into())),
            ])
            .cells,
            row(&[
                ("a", CellValue::Integer(2)),
                ("b", CellValue::Float(0.5)),
                ("c", CellValue::Null),
            ])
            .cells,
        ]);
        assert_eq!(ds.column_kind("a"), ColumnKind::Integer);
        assert_eq!(ds.column_kind("b"), ColumnKind::Float);
        assert_eq!(ds.column_kind("c"), ColumnKind::Text);
    }

    #[test]
    fn require_columns_names_the_first_absent_one() {
        let ds = Dataset::new(vec!["Name".into()], Vec::new());
        match ds.require_columns(&REQUIRED_COLUMNS) {
            Err(RepelError::MissingColumn(c)) => assert_eq!(c, BASE_MEAN),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
