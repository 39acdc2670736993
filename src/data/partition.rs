use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{CellValue, Row, FAMILY, TYPE};
use super::normalize::NormalizedDataset;
use crate::error::{RepelError, Result};

// ---------------------------------------------------------------------------
// Category predicate: "column equals value"
// ---------------------------------------------------------------------------

/// A named categorical predicate. A row matches when its `column` holds a
/// text value exactly equal (case-sensitive) to `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub column: String,
    pub value: String,
}

impl Category {
    pub fn new(name: &str, column: &str, value: &str) -> Self {
        Category {
            name: name.to_string(),
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    pub fn matches(&self, row: &Row) -> bool {
        matches!(row.get(&self.column), Some(CellValue::String(s)) if *s == self.value)
    }
}

/// The three repeat types and the ERVL family, in that order.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("LINE", TYPE, "LINE"),
        Category::new("SINE", TYPE, "SINE"),
        Category::new("LTR", TYPE, "LTR"),
        Category::new("ERVL", FAMILY, "ERVL"),
    ]
}

/// Read categories from a JSON array of `{ "name", "column", "value" }`.
pub fn categories_from_json<R: std::io::Read>(reader: R) -> Result<Vec<Category>> {
    Ok(serde_json::from_reader(reader)?)
}

// ---------------------------------------------------------------------------
// Subset: an order-preserving view over the normalized table
// ---------------------------------------------------------------------------

/// Named view over a [`NormalizedDataset`]. Holds row indices, never copies.
#[derive(Debug, Clone)]
pub struct Subset<'a> {
    name: String,
    dataset: &'a NormalizedDataset,
    indices: Vec<usize>,
}

impl<'a> Subset<'a> {
    pub(crate) fn from_indices(
        name: String,
        dataset: &'a NormalizedDataset,
        indices: Vec<usize>,
    ) -> Self {
        Subset {
            name,
            dataset,
            indices,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dataset(&self) -> &'a NormalizedDataset {
        self.dataset
    }

    /// Positions of the member rows in the normalized table, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a Row> + '_ {
        let rows: &'a [Row] = &self.dataset.dataset().rows;
        self.indices.iter().map(move |&i| &rows[i])
    }

    /// `Name` of each member row, in order.
    pub fn names(&self) -> Vec<String> {
        self.rows()
            .zip(&self.indices)
            .map(|(row, i)| row.name().unwrap_or_else(|| format!("row {i}")))
            .collect()
    }

    /// Numeric values of `column` for each member row. Fails when the column
    /// is absent or a member holds a non-number.
    pub fn column_f64(&self, column: &str) -> Result<Vec<f64>> {
        self.dataset.dataset().require_column(column)?;
        self.rows()
            .zip(&self.indices)
            .map(|(row, &i)| numeric_cell(row, column, i))
            .collect()
    }
}

pub(crate) fn numeric_cell(row: &Row, column: &str, index: usize) -> Result<f64> {
    let cell = row.get(column).unwrap_or(&CellValue::Null);
    cell.as_f64().ok_or_else(|| RepelError::NonNumeric {
        column: column.to_string(),
        row: index,
        value: cell.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Partition: name → Subset, in category order
// ---------------------------------------------------------------------------

/// Named subsets produced by [`partition`]. They may overlap.
#[derive(Debug, Clone)]
pub struct Partition<'a> {
    total: usize,
    subsets: Vec<Subset<'a>>,
}

impl<'a> Partition<'a> {
    pub fn get(&self, name: &str) -> Option<&Subset<'a>> {
        self.subsets.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subset<'a>> {
        self.subsets.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.subsets.iter().map(Subset::name).collect()
    }

    pub fn len(&self) -> usize {
        self.subsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subsets.is_empty()
    }
}

impl fmt::Display for Partition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rows classified into {} subsets", self.total, self.len())?;
        for subset in &self.subsets {
            write!(f, "\n  {:<8} {:>6}", subset.name, subset.len())?;
        }
        Ok(())
    }
}

/// Scan the table once per category and collect the matching row indices.
///
/// Rows matching no category appear in no subset. A category whose column the
/// table lacks fails with [`RepelError::MissingColumn`] when it is reached.
pub fn partition<'a>(
    dataset: &'a NormalizedDataset,
    categories: &[Category],
) -> Result<Partition<'a>> {
    let table = dataset.dataset();
    let mut subsets = Vec::with_capacity(categories.len());

    for category in categories {
        table.require_column(&category.column)?;
        let indices: Vec<usize> = table
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| category.matches(row))
            .map(|(i, _)| i)
            .collect();
        log::info!("{}: {} rows", category.name, indices.len());
        subsets.push(Subset::from_indices(category.name.clone(), dataset, indices));
    }

    Ok(Partition {
        total: table.len(),
        subsets,
    })
}
