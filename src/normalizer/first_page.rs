// First page: letterhead, a header row, then the opening records
use crate::config::{FIRST_PAGE_KEY_HEADER, FIRST_PAGE_SKIP_ROWS};
use crate::types::{is_blank, CanonicalRow, Cell, NormalizeError, PagePosition, RawTable};

use super::layout::FIRST_PAGE;

/// Normalize the first page of a document.
///
/// The first `FIRST_PAGE_SKIP_ROWS` rows are letterhead. The next row is the
/// header; the weighing date column is found by its label there. Rows with an
/// empty weighing date are end-of-table padding and are dropped. A page too
/// short to reach its header yields no rows.
pub fn normalize_first_page(table: &RawTable) -> Result<Vec<CanonicalRow>, NormalizeError> {
    let rows = table.padded_rows();
    let mut rows = rows.into_iter().skip(FIRST_PAGE_SKIP_ROWS);
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };

    let key = header
        .iter()
        .position(|label| header_matches(label, FIRST_PAGE_KEY_HEADER))
        .ok_or_else(|| NormalizeError::MissingKeyColumn {
            position: PagePosition::First,
            label: FIRST_PAGE_KEY_HEADER.to_string(),
        })?;
    let kept = FIRST_PAGE.kept(header.len())?;

    Ok(rows
        .filter(|row| !is_blank(&row[key]))
        .map(|row| kept.select(&row))
        .collect())
}

fn header_matches(label: &Cell, expected: &str) -> bool {
    label
        .as_deref()
        .is_some_and(|label| label.split_whitespace().eq(expected.split_whitespace()))
}
