use std::io::Write;

use super::partition::Subset;
use crate::error::Result;

/// Write the subset as CSV: a header with every table column, then one line
/// per member row in subset order. Missing cells are left empty.
pub fn write_csv<W: Write>(subset: &Subset<'_>, writer: W) -> Result<()> {
    let columns = &subset.dataset().dataset().column_names;
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(columns)?;
    for row in subset.rows() {
        out.write_record(
            columns
                .iter()
                .map(|c| row.get(c).map(|v| v.to_string()).unwrap_or_default()),
        )?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Dataset, Row};
    use crate::data::normalize::normalize;
    use crate::data::partition::{default_categories, partition};
    use std::collections::BTreeMap;

    #[test]
    fn writes_only_member_rows_with_all_columns() {
        let rows = [
            ("MT2_Mm", "LTR", Some("ERVL-MaLR")),
            ("L1Md_A", "LINE", Some("L1")),
            ("ORR1A0", "LTR", None),
        ]
        .iter()
        .map(|(name, ty, family)| {
            let mut cells = BTreeMap::new();
            cells.insert("Name".to_string(), CellValue::String(name.to_string()));
            cells.insert("baseMean".to_string(), CellValue::Integer(9));
            cells.insert("Type".to_string(), CellValue::String(ty.to_string()));
            cells.insert(
                "Family".to_string(),
                family.map_or(CellValue::Null, |f| CellValue::String(f.to_string())),
            );
            Row::new(cells)
        })
        .collect();
        let ds = normalize(Dataset::new(
            vec![
                "Name".into(),
                "baseMean".into(),
                "Type".into(),
                "Family".into(),
            ],
            rows,
        ))
        .unwrap();
        let parts = partition(&ds, &default_categories()).unwrap();

        let mut buf = Vec::new();
        write_csv(parts.get("LTR").unwrap(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "Name,baseMean,Type,Family,baseMean_log_10\n\
             MT2_Mm,9,LTR,ERVL-MaLR,1\n\
             ORR1A0,9,LTR,,1\n"
        );
    }
}
