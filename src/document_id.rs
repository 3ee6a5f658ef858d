// Document identifiers: (month, year, kind) parsed from source and staged file names
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::IdentifierError;

// "Wykaz dostaw szczegółowy 07-2024 OŚ" -> 07, 2024, OŚ
static SOURCE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\s)(\d{2})-(\d{4})\s+(\S+)\s*$").expect("source name pattern")
});

// "07_2024_OŚ"
static BASE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})_(\d{4})_(\S+)$").expect("base pattern"));

/// The closed set of document variants, keyed by the tag printed in the file name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    #[serde(rename = "OŚ")]
    Os,
    #[serde(rename = "SZ")]
    Sz,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 2] = [DocumentKind::Os, DocumentKind::Sz];

    pub fn tag(self) -> &'static str {
        match self {
            DocumentKind::Os => "OŚ",
            DocumentKind::Sz => "SZ",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DocumentKind {
    type Err = IdentifierError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        DocumentKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| IdentifierError::UnknownKind(tag.to_string()))
    }
}

/// Groups the staged pages of one monthly delivery log and names its outputs.
///
/// Field order gives the derived `Ord` a chronological meaning: year, then
/// month, then kind. Corpus merges walk documents in this order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentId {
    year: String,
    month: String,
    kind: DocumentKind,
}

impl DocumentId {
    pub fn new(month: &str, year: &str, kind: DocumentKind) -> Result<Self, IdentifierError> {
        let two_digits = month.len() == 2 && month.bytes().all(|b| b.is_ascii_digit());
        let four_digits = year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit());
        if !two_digits || !four_digits {
            return Err(IdentifierError::Malformed(format!("{}-{} {}", month, year, kind)));
        }
        Ok(Self {
            year: year.to_string(),
            month: month.to_string(),
            kind,
        })
    }

    /// Parse the identifier out of a source document's file name.
    ///
    /// Accepts a full file name or a stem; the extension is ignored. The name
    /// must end with `MM-YYYY<whitespace>TAG`.
    pub fn from_source_name(name: &str) -> Result<Self, IdentifierError> {
        let stem = match name.rsplit_once('.') {
            Some((stem, ext)) if !ext.is_empty() && !ext.contains(char::is_whitespace) => stem,
            _ => name,
        };
        let caps = SOURCE_NAME
            .captures(stem)
            .ok_or_else(|| IdentifierError::Malformed(name.to_string()))?;
        let kind: DocumentKind = caps[3].parse()?;
        Self::new(&caps[1], &caps[2], kind)
    }

    /// Parse a base pattern (`MM_YYYY_TAG`), the form used in staged file names.
    pub fn from_base_pattern(pattern: &str) -> Result<Self, IdentifierError> {
        let caps = BASE_PATTERN
            .captures(pattern)
            .ok_or_else(|| IdentifierError::Malformed(pattern.to_string()))?;
        let kind: DocumentKind = caps[3].parse()?;
        Self::new(&caps[1], &caps[2], kind)
    }

    pub fn month(&self) -> &str {
        &self.month
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// `MM_YYYY_TAG`, the value written to `source_file`.
    pub fn base_pattern(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.month, self.year, self.kind)
    }
}

impl FromStr for DocumentId {
    type Err = IdentifierError;

    fn from_str(pattern: &str) -> Result<Self, Self::Err> {
        Self::from_base_pattern(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_source_file_name() {
        let id = DocumentId::from_source_name("Wykaz dostaw szczegółowy 07-2024 OŚ.PDF").unwrap();
        assert_eq!(id.month(), "07");
        assert_eq!(id.year(), "2024");
        assert_eq!(id.kind(), DocumentKind::Os);
        assert_eq!(id.base_pattern(), "07_2024_OŚ");
    }

    #[test]
    fn rejects_unknown_tag_and_bad_shape() {
        assert!(matches!(
            DocumentId::from_source_name("Wykaz 07-2024 XX.PDF"),
            Err(IdentifierError::UnknownKind(tag)) if tag == "XX"
        ));
        assert!(DocumentId::from_source_name("Wykaz 7-2024 OŚ.PDF").is_err());
        assert!(DocumentId::from_source_name("Wykaz 07-24 OŚ.PDF").is_err());
        assert!(DocumentId::from_source_name("Wykaz 07-2024OŚ.PDF").is_err());
        assert!(DocumentId::from_source_name("notes.txt").is_err());
    }

    #[test]
    fn base_pattern_round_trips() {
        let id = DocumentId::from_base_pattern("11_2023_SZ").unwrap();
        assert_eq!(id.to_string(), "11_2023_SZ");
        assert!(DocumentId::from_base_pattern("11_2023").is_err());
    }

    #[test]
    fn orders_chronologically() {
        let mut ids: Vec<DocumentId> = ["12_2023_OŚ", "01_2024_SZ", "01_2024_OŚ"]
            .iter()
            .map(|p| p.parse().unwrap())
            .collect();
        ids.sort();
        let rendered: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        assert_eq!(rendered, ["12_2023_OŚ", "01_2024_OŚ", "01_2024_SZ"]);
    }
}
