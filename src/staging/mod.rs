// Staging area: one raw table per physical page, grouped by document
pub mod json_store;
pub mod memory_store;

pub use json_store::JsonPageStore;
pub use memory_store::MemoryPageStore;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{DocumentId, RawPage, StagingError};

static STAGED_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^page_(\d+)_(.+)\.json$").expect("staged name pattern"));

/// Where extracted pages wait between the loader and the merge.
///
/// Assembly and merge only read from a store. The loader clears a document
/// before staging it again.
pub trait PageStore {
    fn put_page(&mut self, page: &RawPage) -> Result<(), StagingError>;

    /// Drop every staged page of `id`. Returns how many were removed.
    fn remove_document(&mut self, id: &DocumentId) -> Result<usize, StagingError>;

    /// Documents that have a staged first page, sorted.
    fn document_ids(&self) -> Result<Vec<DocumentId>, StagingError>;

    /// Every staged page of `id`, sorted by page number. Empty when none.
    fn pages(&self, id: &DocumentId) -> Result<Vec<RawPage>, StagingError>;
}

/// `page_<n>_<MM>_<YYYY>_<TAG>.json`
pub fn staged_file_name(page_number: usize, id: &DocumentId) -> String {
    format!("page_{}_{}.json", page_number, id.base_pattern())
}

pub fn parse_staged_file_name(name: &str) -> Option<(usize, DocumentId)> {
    let caps = STAGED_NAME.captures(name)?;
    let page = caps[1].parse().ok()?;
    let id = DocumentId::from_base_pattern(&caps[2]).ok()?;
    Some((page, id))
}
