// Middle pages: one continuous table spread over several pages
use crate::config::MIDDLE_PAGE_KEY_COLUMN;
use crate::types::{is_blank, CanonicalRow, Cell, NormalizeError, PagePosition, RawTable};

use super::layout::MIDDLE_PAGE_FOLDED;

/// Normalize all middle pages of a document together.
///
/// Pages are joined in page order before any row is dropped; a record can
/// straddle a page break, so rows are only meaningful on the joined table.
/// Rows with an empty column 1 are continuation or blank rows. Columns 0 and 1
/// hold two halves of the date and are folded into one cell by plain text
/// concatenation, no separator. The folded column goes first, then raw columns
/// 2.., and raw columns 5 and 7 are dropped.
pub fn normalize_middle_pages(tables: &[RawTable]) -> Result<Vec<CanonicalRow>, NormalizeError> {
    let joined = RawTable::concat(tables);
    if joined.is_empty() {
        return Ok(Vec::new());
    }

    let width = joined.column_count();
    if width <= MIDDLE_PAGE_KEY_COLUMN {
        return Err(NormalizeError::ColumnOutOfRange {
            position: PagePosition::Middle,
            index: MIDDLE_PAGE_KEY_COLUMN,
            actual: width,
        });
    }
    let kept = MIDDLE_PAGE_FOLDED.kept(width - 1)?;

    Ok(joined
        .padded_rows()
        .into_iter()
        .filter(|row| !is_blank(&row[MIDDLE_PAGE_KEY_COLUMN]))
        .map(|row| kept.select(&fold_date(row)))
        .collect())
}

// [a, b, c, ...] -> [a+b, c, ...]
fn fold_date(row: Vec<Cell>) -> Vec<Cell> {
    let mut cells = row.into_iter();
    let head = cells.next().flatten().unwrap_or_default();
    let tail = cells.next().flatten().unwrap_or_default();
    std::iter::once(Some(head + &tail)).chain(cells).collect()
}
