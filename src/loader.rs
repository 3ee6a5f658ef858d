// Source directory -> cleaned per-page tables in the staging area
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::diagnostics::{Diagnostics, Scope};
use crate::extraction::TableExtractor;
use crate::normalizer::clean_table;
use crate::staging::PageStore;
use crate::types::{DocumentId, RawPage};

/// Shape of one staged document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedDocument {
    pub id: DocumentId,
    /// Physical pages in the source, with or without tables.
    pub physical_pages: usize,
    /// Pages staged, i.e. pages that carry at least one table.
    pub page_count: usize,
    pub rows: usize,
    /// (rows, columns) per staged page, in page order.
    pub shapes: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub documents: Vec<StagedDocument>,
    /// File names that do not carry a valid document identifier.
    pub rejected: Vec<String>,
    /// Files whose extraction or staging failed.
    pub failed: Vec<String>,
}

impl LoadSummary {
    pub fn pages(&self) -> usize {
        self.documents.iter().map(|d| d.page_count).sum()
    }

    pub fn rows(&self) -> usize {
        self.documents.iter().map(|d| d.rows).sum()
    }
}

pub struct Loader<'a> {
    extractor: &'a dyn TableExtractor,
    store: &'a mut dyn PageStore,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> Loader<'a> {
    pub fn new(
        extractor: &'a dyn TableExtractor,
        store: &'a mut dyn PageStore,
        diagnostics: &'a dyn Diagnostics,
    ) -> Self {
        Self {
            extractor,
            store,
            diagnostics,
        }
    }

    /// Stage every source document in `dir`, in file name order.
    ///
    /// Files without a valid identifier are rejected before extraction. A file
    /// that fails to extract is reported and the scan goes on.
    pub fn process_directory(&mut self, dir: &Path) -> Result<LoadSummary> {
        let mut summary = LoadSummary::default();
        for path in self.source_files(dir)? {
            let name = display_name(&path);
            let id = match DocumentId::from_source_name(&name) {
                Ok(id) => id,
                Err(err) => {
                    self.diagnostics.error(&Scope::Corpus, &format!("rejecting {}: {}", name, err));
                    summary.rejected.push(name);
                    continue;
                }
            };
            match self.process_file(&path, &id) {
                Ok(staged) => summary.documents.push(staged),
                Err(err) => {
                    self.diagnostics
                        .error(&Scope::Document(id), &format!("failed to stage {}: {:#}", name, err));
                    summary.failed.push(name);
                }
            }
        }

        self.diagnostics.info(
            &Scope::Corpus,
            &format!(
                "staged {} files, {} pages, {} rows ({} rejected, {} failed)",
                summary.documents.len(),
                summary.pages(),
                summary.rows(),
                summary.rejected.len(),
                summary.failed.len()
            ),
        );
        Ok(summary)
    }

    /// Extract, clean and stage one document's pages.
    ///
    /// Pages without a table are left out and the rest are numbered
    /// consecutively, so a trailing signature sheet does not push the last
    /// table into the middle. Pages staged by an earlier run are removed first.
    pub fn process_file(&mut self, path: &Path, id: &DocumentId) -> Result<StagedDocument> {
        let removed = self
            .store
            .remove_document(id)
            .with_context(|| format!("clearing staged pages of {}", id))?;
        if removed > 0 {
            tracing::debug!(document = %id, removed, "cleared previously staged pages");
        }

        let pages = self.extractor.extract(path)?;
        let tables: Vec<_> = pages
            .iter()
            .filter(|page| !page.tables.is_empty())
            .map(|page| clean_table(&page.merged()))
            .collect();
        if tables.is_empty() {
            return Err(anyhow!("{} has no tables on any of its {} pages", path.display(), pages.len()));
        }

        let page_count = tables.len();
        let mut staged = StagedDocument {
            id: id.clone(),
            physical_pages: pages.len(),
            page_count,
            rows: 0,
            shapes: Vec::with_capacity(page_count),
        };
        for (index, table) in tables.into_iter().enumerate() {
            staged.rows += table.row_count();
            staged.shapes.push((table.row_count(), table.column_count()));

            let raw = RawPage {
                document_id: id.clone(),
                page_number: index + 1,
                page_count,
                table,
            };
            self.store
                .put_page(&raw)
                .with_context(|| format!("staging page {} of {}", index + 1, id))?;
        }

        let scope = Scope::Document(id.clone());
        self.diagnostics.info(
            &scope,
            &format!(
                "staged {} pages with tables ({} physical), {} rows",
                page_count, staged.physical_pages, staged.rows
            ),
        );
        for (index, (rows, columns)) in staged.shapes.iter().enumerate() {
            self.diagnostics
                .info(&scope, &format!("  page {}: {} rows, {} columns", index + 1, rows, columns));
        }
        Ok(staged)
    }

    fn source_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
            let path = entry?.path();
            if self.extractor.accepts(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
