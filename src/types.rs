// Core types and errors for the delivery ledger
use serde::{Deserialize, Serialize};

pub use crate::document_id::{DocumentId, DocumentKind};

/// One extracted cell. `None` is a cell the extractor found empty or missing.
pub type Cell = Option<String>;

/// True for a missing cell or one holding only whitespace.
pub fn is_blank(cell: &Cell) -> bool {
    cell.as_deref().map_or(true, |text| text.trim().is_empty())
}

/// Rows of optional text as the extractor produced them. Rows may be ragged;
/// the table is as wide as its widest row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawTable {
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Stack tables top to bottom, keeping row order.
    pub fn concat<'a, I>(tables: I) -> Self
    where
        I: IntoIterator<Item = &'a RawTable>,
    {
        Self {
            rows: tables.into_iter().flat_map(|t| t.rows.iter().cloned()).collect(),
        }
    }

    /// Copy of the rows, each padded with `None` to the table width.
    pub fn padded_rows(&self) -> Vec<Vec<Cell>> {
        let width = self.column_count();
        self.rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row.resize(width, None);
                row
            })
            .collect()
    }
}

/// One physical page of a document as staged by the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPage {
    pub document_id: DocumentId,
    /// 1-based.
    pub page_number: usize,
    /// Total physical pages of the document (side channel from extraction).
    pub page_count: usize,
    pub table: RawTable,
}

impl RawPage {
    pub fn position(&self) -> PagePosition {
        PagePosition::classify(self.page_number, self.page_count)
    }
}

/// A page's structural role within its document.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PagePosition {
    First,
    Middle,
    Last,
}

impl PagePosition {
    /// Page 1 is always FIRST, so a single-page document has no LAST page.
    pub fn classify(page_number: usize, page_count: usize) -> Self {
        if page_number <= 1 {
            PagePosition::First
        } else if page_number >= page_count {
            PagePosition::Last
        } else {
            PagePosition::Middle
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PagePosition::First => "first",
            PagePosition::Middle => "middle",
            PagePosition::Last => "last",
        }
    }
}

impl std::fmt::Display for PagePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A shipment entry in the six-column canonical schema, quantity still text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalRow {
    pub date: Cell,
    pub vehicle: Cell,
    pub location: Cell,
    pub municipality: Cell,
    pub city: Cell,
    pub quantity: Cell,
}

impl CanonicalRow {
    pub fn from_cells([date, vehicle, location, municipality, city, quantity]: [Cell; 6]) -> Self {
        Self {
            date,
            vehicle,
            location,
            municipality,
            city,
            quantity,
        }
    }

    /// Cells in canonical column order.
    pub fn cells(&self) -> [&Cell; 6] {
        [
            &self.date,
            &self.vehicle,
            &self.location,
            &self.municipality,
            &self.city,
            &self.quantity,
        ]
    }
}

/// A canonical row tagged with the document it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    pub row: CanonicalRow,
    pub source_file: String,
}

/// All rows of one document in (first, middle, last) order.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTable {
    pub id: DocumentId,
    pub records: Vec<DocumentRecord>,
}

impl DocumentTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A row of the merged corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub tracking_index: usize,
    pub date: Cell,
    pub vehicle: Cell,
    pub location: Cell,
    pub municipality: Cell,
    pub city: Cell,
    pub quantity: f64,
    pub source_file: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_volume: f64,
    pub row_count: usize,
}

impl Statistics {
    pub fn compute<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a CanonicalRecord>,
    {
        let mut total_volume = 0.0;
        let mut row_count = 0;
        for record in records {
            total_volume += record.quantity;
            row_count += 1;
        }
        Self {
            total_volume,
            row_count,
        }
    }
}

/// The merged, indexed corpus.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub records: Vec<CanonicalRecord>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn statistics(&self) -> Statistics {
        Statistics::compute(&self.records)
    }

    /// Rows of one document, in dataset order.
    pub fn for_source<'a>(&'a self, source_file: &'a str) -> impl Iterator<Item = &'a CanonicalRecord> + 'a {
        self.records.iter().filter(move |r| r.source_file == source_file)
    }
}

// Error types

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("name does not match MM-YYYY TAG: {0:?}")]
    Malformed(String),

    #[error("unknown document type tag: {0:?}")]
    UnknownKind(String),
}

/// A page did not have the shape its layout rule assumes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("{position} page has {actual} columns, layout needs column {index}")]
    ColumnOutOfRange {
        position: PagePosition,
        index: usize,
        actual: usize,
    },

    #[error("{position} page keeps {actual} columns after selection, expected 6")]
    WrongColumnCount { position: PagePosition, actual: usize },

    #[error("{position} page header has no {label:?} column")]
    MissingKeyColumn { position: PagePosition, label: String },
}

#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    #[error("staging IO error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("staged page {path} is not valid JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure scoped to one document. The corpus merge logs it and moves on.
#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    #[error("no staged pages for {0}")]
    NoPages(String),

    #[error("{pattern}: missing staged pages {missing:?} of {page_count}")]
    MissingPages {
        pattern: String,
        page_count: usize,
        missing: Vec<usize>,
    },

    #[error("{pattern}: staged pages disagree on the page count ({counts:?})")]
    InconsistentPageCount { pattern: String, counts: Vec<usize> },

    #[error("{0}: every page failed schema validation")]
    NoUsablePages(String),

    #[error("{pattern}: {source}")]
    Normalize {
        pattern: String,
        #[source]
        source: NormalizeError,
    },

    #[error(transparent)]
    Staging(#[from] StagingError),
}

/// Conditions that invalidate the whole merge.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("no document could be assembled ({failed} failed)")]
    NoDocuments { failed: usize },

    #[error("row {tracking_index} of {source_file}: quantity {raw:?} is not a number")]
    InvalidQuantity {
        tracking_index: usize,
        source_file: String,
        raw: String,
    },

    #[error("row {tracking_index} of {source_file}: quantity is missing")]
    MissingQuantity {
        tracking_index: usize,
        source_file: String,
    },

    #[error(transparent)]
    Staging(#[from] StagingError),
}
