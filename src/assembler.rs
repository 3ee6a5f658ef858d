// Document assembly: classify staged pages, normalize each section, concatenate
use std::collections::BTreeSet;

use crate::diagnostics::{Diagnostics, Scope};
use crate::normalizer::{
    check_columns, normalize_first_page, normalize_last_page, normalize_middle_pages, SchemaMismatch,
};
use crate::staging::PageStore;
use crate::types::{
    AssemblyError, CanonicalRow, DocumentId, DocumentRecord, DocumentTable, NormalizeError, PagePosition, RawPage,
    RawTable,
};

/// What happened to one page before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    Accepted { position: PagePosition, page: RawPage },
    Skipped { page_number: usize, reason: SchemaMismatch },
}

impl PageOutcome {
    /// Classify the page by position and check its raw width.
    pub fn screen(page: RawPage) -> Self {
        let position = page.position();
        match check_columns(position, page.table.column_count()) {
            Ok(()) => PageOutcome::Accepted { position, page },
            Err(reason) => PageOutcome::Skipped {
                page_number: page.page_number,
                reason,
            },
        }
    }
}

/// Pages of one document split by role, in page order.
#[derive(Debug, Default)]
struct Sections {
    first: Option<RawTable>,
    middle: Vec<RawTable>,
    last: Option<RawTable>,
}

impl Sections {
    fn is_empty(&self) -> bool {
        self.first.is_none() && self.middle.is_empty() && self.last.is_none()
    }
}

pub struct DocumentAssembler<'a> {
    store: &'a dyn PageStore,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(store: &'a dyn PageStore, diagnostics: &'a dyn Diagnostics) -> Self {
        Self { store, diagnostics }
    }

    /// Assemble the document named by a base pattern such as `07_2024_OŚ`.
    pub fn assemble_pattern(&self, pattern: &str) -> Result<DocumentTable, AssemblyError> {
        let id = DocumentId::from_base_pattern(pattern)?;
        self.assemble(&id)
    }

    /// Load the staged pages of `id` and assemble them.
    pub fn assemble(&self, id: &DocumentId) -> Result<DocumentTable, AssemblyError> {
        let pages = self.store.pages(id)?;
        self.assemble_pages(id, pages)
    }

    /// Assemble an already loaded page set.
    ///
    /// All pages `1..=page_count` must be present. Pages with the wrong raw
    /// width are dropped with a warning; if none remain the document fails.
    /// Any structural normalization failure fails the whole document.
    pub fn assemble_pages(&self, id: &DocumentId, mut pages: Vec<RawPage>) -> Result<DocumentTable, AssemblyError> {
        let pattern = id.base_pattern();
        if pages.is_empty() {
            return Err(AssemblyError::NoPages(pattern));
        }
        pages.sort_by_key(|p| p.page_number);
        check_complete(&pattern, &pages)?;

        let mut sections = Sections::default();
        for page in pages {
            match PageOutcome::screen(page) {
                PageOutcome::Accepted { position, page } => match position {
                    PagePosition::First => sections.first = Some(page.table),
                    PagePosition::Middle => sections.middle.push(page.table),
                    PagePosition::Last => sections.last = Some(page.table),
                },
                PageOutcome::Skipped { page_number, reason } => {
                    let scope = Scope::Page {
                        document: id.clone(),
                        page: page_number,
                    };
                    self.diagnostics.warning(&scope, &format!("skipping page: {}", reason));
                }
            }
        }
        if sections.is_empty() {
            return Err(AssemblyError::NoUsablePages(pattern));
        }

        let wrap = |source: NormalizeError| AssemblyError::Normalize {
            pattern: pattern.clone(),
            source,
        };
        let mut rows: Vec<CanonicalRow> = Vec::new();
        let mut counts = [0usize; 3];
        if let Some(table) = &sections.first {
            let section = normalize_first_page(table).map_err(wrap)?;
            counts[0] = section.len();
            rows.extend(section);
        }
        if !sections.middle.is_empty() {
            let section = normalize_middle_pages(&sections.middle).map_err(wrap)?;
            counts[1] = section.len();
            rows.extend(section);
        }
        if let Some(table) = &sections.last {
            let section = normalize_last_page(table).map_err(wrap)?;
            counts[2] = section.len();
            rows.extend(section);
        }

        self.diagnostics.info(
            &Scope::Document(id.clone()),
            &format!(
                "assembled {} rows (first {}, middle {}, last {})",
                rows.len(),
                counts[0],
                counts[1],
                counts[2]
            ),
        );

        let records = rows
            .into_iter()
            .map(|row| DocumentRecord {
                row,
                source_file: pattern.clone(),
            })
            .collect();
        Ok(DocumentTable {
            id: id.clone(),
            records,
        })
    }
}

// Every page 1..=page_count staged, all agreeing on page_count.
fn check_complete(pattern: &str, pages: &[RawPage]) -> Result<(), AssemblyError> {
    let counts: BTreeSet<usize> = pages.iter().map(|p| p.page_count).collect();
    if counts.len() != 1 {
        return Err(AssemblyError::InconsistentPageCount {
            pattern: pattern.to_string(),
            counts: counts.into_iter().collect(),
        });
    }
    let page_count = pages[0].page_count;
    if let Some(stray) = pages.iter().find(|p| p.page_number == 0 || p.page_number > page_count) {
        return Err(AssemblyError::InconsistentPageCount {
            pattern: pattern.to_string(),
            counts: vec![page_count, stray.page_number],
        });
    }

    let present: BTreeSet<usize> = pages.iter().map(|p| p.page_number).collect();
    let missing: Vec<usize> = (1..=page_count).filter(|n| !present.contains(n)).collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AssemblyError::MissingPages {
            pattern: pattern.to_string(),
            page_count,
            missing,
        })
    }
}
