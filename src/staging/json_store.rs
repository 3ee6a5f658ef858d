// Staged pages as JSON files in a directory
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::{parse_staged_file_name, staged_file_name, PageStore};
use crate::types::{DocumentId, RawPage, StagingError};

#[derive(Debug, Clone)]
pub struct JsonPageStore {
    root: PathBuf,
}

impl JsonPageStore {
    /// Open a staging directory. It must exist before pages are listed.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open a staging directory, creating it if needed.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self, StagingError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| io_error(&root, source))?;
        Ok(Self { root })
    }

    pub fn page_path(&self, page_number: usize, id: &DocumentId) -> PathBuf {
        self.root.join(staged_file_name(page_number, id))
    }

    // (page, id, path) for every file that looks staged
    fn entries(&self) -> Result<Vec<(usize, DocumentId, PathBuf)>, StagingError> {
        let dir = fs::read_dir(&self.root).map_err(|source| io_error(&self.root, source))?;
        let mut entries = Vec::new();
        for entry in dir {
            let entry = entry.map_err(|source| io_error(&self.root, source))?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            match parse_staged_file_name(name) {
                Some((page, id)) => entries.push((page, id, entry.path())),
                None => tracing::debug!(file = name, "ignoring non-staged file"),
            }
        }
        Ok(entries)
    }

    fn load(path: &Path) -> Result<RawPage, StagingError> {
        let bytes = fs::read(path).map_err(|source| io_error(path, source))?;
        serde_json::from_slice(&bytes).map_err(|source| StagingError::Json {
            path: path.display().to_string(),
            source,
        })
    }
}

impl PageStore for JsonPageStore {
    fn put_page(&mut self, page: &RawPage) -> Result<(), StagingError> {
        let path = self.page_path(page.page_number, &page.document_id);
        let json = serde_json::to_vec_pretty(page).map_err(|source| StagingError::Json {
            path: path.display().to_string(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| io_error(&path, source))
    }

    fn remove_document(&mut self, id: &DocumentId) -> Result<usize, StagingError> {
        if !self.root.is_dir() {
            return Ok(0);
        }
        let mut removed = 0;
        for (_, staged, path) in self.entries()? {
            if &staged == id {
                fs::remove_file(&path).map_err(|source| io_error(&path, source))?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn document_ids(&self) -> Result<Vec<DocumentId>, StagingError> {
        let ids: BTreeSet<DocumentId> = self
            .entries()?
            .into_iter()
            .filter(|(page, _, _)| *page == 1)
            .map(|(_, id, _)| id)
            .collect();
        Ok(ids.into_iter().collect())
    }

    fn pages(&self, id: &DocumentId) -> Result<Vec<RawPage>, StagingError> {
        let mut entries: Vec<_> = self.entries()?.into_iter().filter(|(_, staged, _)| staged == id).collect();
        entries.sort_by_key(|(page, _, _)| *page);
        entries.iter().map(|(_, _, path)| Self::load(path)).collect()
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StagingError {
    StagingError::Io {
        path: path.display().to_string(),
        source,
    }
}
