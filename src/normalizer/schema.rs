// Column-count check for each page position
use crate::config::{FIRST_PAGE_COLUMNS, LAST_PAGE_COLUMNS, MIDDLE_PAGE_COLUMNS};
use crate::types::PagePosition;

/// A page that does not have the raw width of its position. Not fatal: the
/// page is dropped and the document carries on without it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{position} page has {actual} columns, expected {expected}")]
pub struct SchemaMismatch {
    pub position: PagePosition,
    pub expected: usize,
    pub actual: usize,
}

pub fn expected_columns(position: PagePosition) -> usize {
    match position {
        PagePosition::First => FIRST_PAGE_COLUMNS,
        PagePosition::Middle => MIDDLE_PAGE_COLUMNS,
        PagePosition::Last => LAST_PAGE_COLUMNS,
    }
}

fn matches_expected(position: PagePosition, actual: usize) -> bool {
    expected_columns(position) == actual
}

pub fn check_columns(position: PagePosition, actual: usize) -> Result<(), SchemaMismatch> {
    if matches_expected(position, actual) {
        Ok(())
    } else {
        Err(SchemaMismatch {
            position,
            expected: expected_columns(position),
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_counts_per_position() {
        assert!(matches_expected(PagePosition::First, 12));
        assert!(matches_expected(PagePosition::Middle, 9));
        assert!(matches_expected(PagePosition::Last, 8));
        assert!(!matches_expected(PagePosition::Middle, 8));
    }

    #[test]
    fn check_agrees_with_expected_counts() {
        assert_eq!(check_columns(PagePosition::First, 12), Ok(()));
        assert_eq!(check_columns(PagePosition::Last, 8), Ok(()));
        assert!(check_columns(PagePosition::Last, 9).is_err());
    }

    #[test]
    fn mismatch_reports_both_counts() {
        let err = check_columns(PagePosition::Middle, 5).unwrap_err();
        assert_eq!(err.expected, 9);
        assert_eq!(err.actual, 5);
        assert_eq!(err.to_string(), "middle page has 5 columns, expected 9");
    }
}
