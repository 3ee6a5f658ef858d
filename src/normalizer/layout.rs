// Declarative column selection: which raw columns survive into the canonical schema
use crate::config::{CANONICAL_COLUMNS, FIRST_PAGE_DROP_COLUMNS, LAST_PAGE_DROP_COLUMNS, MIDDLE_PAGE_DROP_COLUMNS};
use crate::types::{CanonicalRow, Cell, NormalizeError, PagePosition};

/// Drops fixed column positions and maps the rest, in table order, onto the
/// canonical columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSelection {
    pub position: PagePosition,
    pub drop: &'static [usize],
}

pub const FIRST_PAGE: ColumnSelection = ColumnSelection::dropping(PagePosition::First, &FIRST_PAGE_DROP_COLUMNS);

// Raw columns 0 and 1 fold into one date column, so raw column r sits at r - 1.
const MIDDLE_PAGE_FOLDED_DROP: [usize; 2] = [MIDDLE_PAGE_DROP_COLUMNS[0] - 1, MIDDLE_PAGE_DROP_COLUMNS[1] - 1];

/// Applied to the folded middle-page row (date first), see `middle_pages`.
pub const MIDDLE_PAGE_FOLDED: ColumnSelection =
    ColumnSelection::dropping(PagePosition::Middle, &MIDDLE_PAGE_FOLDED_DROP);

pub const LAST_PAGE: ColumnSelection = ColumnSelection::dropping(PagePosition::Last, &LAST_PAGE_DROP_COLUMNS);

impl ColumnSelection {
    pub const fn dropping(position: PagePosition, drop: &'static [usize]) -> Self {
        Self { position, drop }
    }

    /// Positions that survive in a table `width` columns wide.
    pub fn kept(&self, width: usize) -> Result<KeptColumns, NormalizeError> {
        if let Some(&index) = self.drop.iter().find(|&&index| index >= width) {
            return Err(NormalizeError::ColumnOutOfRange {
                position: self.position,
                index,
                actual: width,
            });
        }
        let kept: Vec<usize> = (0..width).filter(|i| !self.drop.contains(i)).collect();
        let indices: [usize; CANONICAL_COLUMNS.len()] =
            kept.as_slice().try_into().map_err(|_| NormalizeError::WrongColumnCount {
                position: self.position,
                actual: kept.len(),
            })?;
        Ok(KeptColumns { indices })
    }
}

/// The six surviving positions, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeptColumns {
    indices: [usize; 6],
}

impl KeptColumns {
    pub fn indices(&self) -> [usize; 6] {
        self.indices
    }

    /// Cells past the end of a short row read as missing.
    pub fn select(&self, row: &[Cell]) -> CanonicalRow {
        CanonicalRow::from_cells(self.indices.map(|i| row.get(i).cloned().flatten()))
    }
}
