// Raw table extraction collaborators
pub mod json_dump;

pub use json_dump::JsonDumpExtractor;

use anyhow::Result;
use std::path::Path;

use crate::types::RawTable;

/// Tables found on one physical page, in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    pub tables: Vec<RawTable>,
}

impl ExtractedPage {
    /// All tables of the page stacked into one.
    pub fn merged(&self) -> RawTable {
        RawTable::concat(&self.tables)
    }
}

/// Pulls per-page tables out of a source document.
pub trait TableExtractor {
    /// Whether `path` is a source document this extractor reads.
    fn accepts(&self, path: &Path) -> bool;

    /// One entry per physical page, including pages without tables.
    /// The loader decides which of them to stage.
    fn extract(&self, path: &Path) -> Result<Vec<ExtractedPage>>;
}
