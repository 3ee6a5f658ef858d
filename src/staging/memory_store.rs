// In-memory staging, for tests and dry runs
use std::collections::BTreeMap;

use super::PageStore;
use crate::types::{DocumentId, RawPage, StagingError};

#[derive(Debug, Default, Clone)]
pub struct MemoryPageStore {
    documents: BTreeMap<DocumentId, BTreeMap<usize, RawPage>>,
}

impl MemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remove_page(&mut self, id: &DocumentId, page_number: usize) -> Option<RawPage> {
        self.documents.get_mut(id)?.remove(&page_number)
    }
}

impl PageStore for MemoryPageStore {
    fn put_page(&mut self, page: &RawPage) -> Result<(), StagingError> {
        self.documents
            .entry(page.document_id.clone())
            .or_default()
            .insert(page.page_number, page.clone());
        Ok(())
    }

    fn remove_document(&mut self, id: &DocumentId) -> Result<usize, StagingError> {
        Ok(self.documents.remove(id).map_or(0, |pages| pages.len()))
    }

    fn document_ids(&self) -> Result<Vec<DocumentId>, StagingError> {
        Ok(self
            .documents
            .iter()
            .filter(|(_, pages)| pages.contains_key(&1))
            .map(|(id, _)| id.clone())
            .collect())
    }

    fn pages(&self, id: &DocumentId) -> Result<Vec<RawPage>, StagingError> {
        Ok(self
            .documents
            .get(id)
            .map(|pages| pages.values().cloned().collect())
            .unwrap_or_default())
    }
}
