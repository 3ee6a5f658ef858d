// Last page: closing records between header remnants and the totals block
use crate::config::{LAST_PAGE_KEY_COLUMN, LAST_PAGE_SKIP_HEAD, LAST_PAGE_SKIP_TAIL};
use crate::types::{is_blank, CanonicalRow, NormalizeError, RawTable};

use super::layout::LAST_PAGE;

/// Normalize the last page of a document.
///
/// Drops the first and last three rows, drops raw columns 4 and 6, then
/// drops rows whose vehicle column (column 1) is empty. A page with six rows
/// or fewer has no body and yields no rows.
pub fn normalize_last_page(table: &RawTable) -> Result<Vec<CanonicalRow>, NormalizeError> {
    let rows = table.padded_rows();
    if rows.len() <= LAST_PAGE_SKIP_HEAD + LAST_PAGE_SKIP_TAIL {
        return Ok(Vec::new());
    }
    let body = &rows[LAST_PAGE_SKIP_HEAD..rows.len() - LAST_PAGE_SKIP_TAIL];
    let kept = LAST_PAGE.kept(table.column_count())?;

    Ok(body
        .iter()
        .map(|row| kept.select(row))
        .filter(|row| !is_blank(row.cells()[LAST_PAGE_KEY_COLUMN]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::row;
    use super::*;

    fn last_page(body: &[&[&str]]) -> RawTable {
        let mut rows = vec![row(&["Wykaz"; 8]), row(&["cd."; 8]), row(&["hdr"; 8])];
        rows.extend(body.iter().map(|r| row(r)));
        rows.push(row(&["Razem", "", "", "", "", "", "", "123,4"]));
        rows.push(row(&["Sporządził"; 8]));
        rows.push(row(&["Podpis"; 8]));
        RawTable::new(rows)
    }

    #[test]
    fn strips_head_and_tail_rows() {
        let table = last_page(&[
            &["30.07.2024 11:00", "WGM 9", "Plac", "Gmina", "x4", "Miasto", "x6", "7,5"],
            &["31.07.2024 12:00", "WGM 8", "Plac", "Gmina", "x4", "Miasto", "x6", "2"],
        ]);
        let rows = normalize_last_page(&table).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            CanonicalRow::from_cells(
                ["30.07.2024 11:00", "WGM 9", "Plac", "Gmina", "Miasto", "7,5"].map(|s| Some(s.to_string()))
            )
        );
        assert!(rows.iter().all(|r| r.date.as_deref() != Some("Wykaz")));
        assert!(rows.iter().all(|r| r.date.as_deref() != Some("Razem")));
    }

    #[test]
    fn drops_rows_without_vehicle() {
        let table = last_page(&[
            &["30.07.2024 11:00", "", "Plac", "Gmina", "", "Miasto", "", "7,5"],
            &["31.07.2024 12:00", "WGM 8", "Plac", "Gmina", "", "Miasto", "", "2"],
        ]);
        assert_eq!(normalize_last_page(&table).unwrap().len(), 1);
    }

    #[test]
    fn six_rows_or_fewer_is_empty() {
        let table = RawTable::new((0..6).map(|_| row(&["a"; 8])).collect());
        assert!(normalize_last_page(&table).unwrap().is_empty());
    }

    #[test]
    fn too_narrow_fails() {
        let table = RawTable::new((0..8).map(|_| row(&["a"; 5])).collect());
        assert!(normalize_last_page(&table).is_err());
    }
}
