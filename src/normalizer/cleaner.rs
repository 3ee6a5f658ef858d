// Cell cleanup applied to every extracted cell before staging
use crate::types::{Cell, RawTable};

/// Turn line breaks into single spaces and trim the ends.
///
/// A missing or empty cell comes back as `None`. A cell of only whitespace
/// becomes `Some("")`, which the normalizers still treat as blank.
pub fn clean_cell(cell: Option<&str>) -> Cell {
    let text = cell.filter(|text| !text.is_empty())?;
    Some(text.replace("\r\n", " ").replace(['\n', '\r'], " ").trim().to_string())
}

pub fn clean_row(row: &[Cell]) -> Vec<Cell> {
    row.iter().map(|cell| clean_cell(cell.as_deref())).collect()
}

pub fn clean_table(table: &RawTable) -> RawTable {
    RawTable::new(table.rows.iter().map(|row| clean_row(row)).collect())
}
