// Reads table dumps written by an external PDF table extractor
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::{ExtractedPage, TableExtractor};
use crate::types::{Cell, RawTable};

/// A dump is a JSON array of pages; each page an array of tables; each table
/// an array of rows of `string | null`.
#[derive(Debug, Clone)]
pub struct JsonDumpExtractor {
    extension: String,
}

impl JsonDumpExtractor {
    pub fn new() -> Self {
        Self::with_extension("json")
    }

    pub fn with_extension(extension: &str) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn parse(content: &str) -> Result<Vec<ExtractedPage>> {
        let pages: Vec<Vec<Vec<Vec<Cell>>>> = serde_json::from_str(content)?;
        Ok(pages
            .into_iter()
            .map(|tables| ExtractedPage {
                tables: tables.into_iter().map(RawTable::new).collect(),
            })
            .collect())
    }
}

impl Default for JsonDumpExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TableExtractor for JsonDumpExtractor {
    fn accepts(&self, path: &Path) -> bool {
        path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }

    fn extract(&self, path: &Path) -> Result<Vec<ExtractedPage>> {
        let content = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing table dump {}", path.display()))
    }
}
