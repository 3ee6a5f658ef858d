// Corpus merge: every staged document, one indexed dataset, one set of statistics
use crate::assembler::DocumentAssembler;
use crate::diagnostics::{Diagnostics, Scope};
use crate::staging::PageStore;
use crate::types::{CanonicalRecord, Dataset, DocumentId, DocumentTable, MergeError, Statistics};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub id: DocumentId,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    pub id: DocumentId,
    pub reason: String,
}

/// Per-document results of one merge run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub succeeded: Vec<DocumentSummary>,
    pub failed: Vec<DocumentFailure>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub dataset: Dataset,
    pub statistics: Statistics,
    pub report: MergeReport,
}

pub struct CorpusMerger<'a> {
    store: &'a dyn PageStore,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> CorpusMerger<'a> {
    pub fn new(store: &'a dyn PageStore, diagnostics: &'a dyn Diagnostics) -> Self {
        Self { store, diagnostics }
    }

    /// Merge every document that has a staged first page.
    pub fn merge(&self) -> Result<MergeOutcome, MergeError> {
        let ids = self.store.document_ids()?;
        self.merge_documents(&ids)
    }

    /// Merge the given documents in identifier order.
    ///
    /// Identifier order is chronological (year, month, tag), not the text
    /// order of `MM_YYYY_TAG`. For a corpus spanning more than one year the
    /// tracking indexes therefore differ from a plain string sort: `12_2023`
    /// comes before `01_2024`.
    ///
    /// A document that fails to assemble is logged and left out. The merge
    /// itself fails when no document survives or when any quantity is not a
    /// number; nothing partial is returned in either case.
    pub fn merge_documents(&self, ids: &[DocumentId]) -> Result<MergeOutcome, MergeError> {
        let mut ids = ids.to_vec();
        ids.sort();
        ids.dedup();

        let assembler = DocumentAssembler::new(self.store, self.diagnostics);
        let mut tables = Vec::with_capacity(ids.len());
        let mut report = MergeReport::default();
        for id in ids {
            match assembler.assemble(&id) {
                Ok(table) => {
                    report.succeeded.push(DocumentSummary {
                        id: id.clone(),
                        rows: table.len(),
                    });
                    tables.push(table);
                }
                Err(err) => {
                    self.diagnostics
                        .error(&Scope::Document(id.clone()), &format!("document skipped: {}", err));
                    report.failed.push(DocumentFailure {
                        id,
                        reason: err.to_string(),
                    });
                }
            }
        }

        if tables.is_empty() {
            return Err(MergeError::NoDocuments {
                failed: report.failed.len(),
            });
        }

        let dataset = merge_tables(tables)?;
        let statistics = dataset.statistics();
        self.diagnostics.info(
            &Scope::Corpus,
            &format!(
                "merged {} documents, {} rows, total volume {:.2}",
                report.succeeded.len(),
                statistics.row_count,
                statistics.total_volume
            ),
        );
        Ok(MergeOutcome {
            dataset,
            statistics,
            report,
        })
    }
}

/// Concatenate document tables in the given order, number the rows from 1 and
/// parse every quantity.
pub fn merge_tables(tables: Vec<DocumentTable>) -> Result<Dataset, MergeError> {
    let records = tables
        .into_iter()
        .flat_map(|table| table.records)
        .enumerate()
        .map(|(i, record)| {
            let tracking_index = i + 1;
            let quantity = match record.row.quantity.as_deref().map(str::trim) {
                None | Some("") => {
                    return Err(MergeError::MissingQuantity {
                        tracking_index,
                        source_file: record.source_file,
                    })
                }
                Some(raw) => parse_quantity(raw).ok_or_else(|| MergeError::InvalidQuantity {
                    tracking_index,
                    source_file: record.source_file.clone(),
                    raw: raw.to_string(),
                })?,
            };
            let row = record.row;
            Ok(CanonicalRecord {
                tracking_index,
                date: row.date,
                vehicle: row.vehicle,
                location: row.location,
                municipality: row.municipality,
                city: row.city,
                quantity,
                source_file: record.source_file,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Dataset { records })
}

/// Decimal comma to decimal point, then a finite float.
pub fn parse_quantity(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
