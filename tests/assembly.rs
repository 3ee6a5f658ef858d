// Document assembly over staged pages
mod common;

use common::*;
use delivery_ledger::{
    AssemblyError, DocumentAssembler, MemoryPageStore, NormalizeError, PagePosition, RecordingDiagnostics, Scope,
};
use rstest::rstest;

#[rstest]
#[case(1, 1, PagePosition::First)]
#[case(1, 2, PagePosition::First)]
#[case(2, 2, PagePosition::Last)]
#[case(2, 3, PagePosition::Middle)]
#[case(3, 3, PagePosition::Last)]
#[case(4, 7, PagePosition::Middle)]
fn classifies_page_positions(#[case] page: usize, #[case] count: usize, #[case] expected: PagePosition) {
    assert_eq!(PagePosition::classify(page, count), expected);
}

#[test]
fn three_page_document_uses_all_three_normalizers() {
    let store = store_with(&[three_page_document("07_2024_OŚ")]);
    let diagnostics = RecordingDiagnostics::new();
    let table = DocumentAssembler::new(&store, &diagnostics)
        .assemble_pattern("07_2024_OŚ")
        .unwrap();

    let dates: Vec<_> = table.records.iter().map(|r| r.row.date.clone().unwrap()).collect();
    assert_eq!(
        dates,
        ["01.07.2024 06:10", "01.07.2024 07:40", "15.07.202409:00", "31.07.2024 14:00"]
    );
    assert!(table.records.iter().all(|r| r.source_file == "07_2024_OŚ"));
    assert!(diagnostics.warnings().is_empty());
}

#[test]
fn single_page_document_is_first_page_only() {
    let doc = id("02_2024_SZ");
    let store = store_with(&[pages(&doc, vec![first_table(&[delivery("01.02.2024 08:00", "V1", "3")])])]);
    let diagnostics = RecordingDiagnostics::new();
    let table = DocumentAssembler::new(&store, &diagnostics).assemble(&doc).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.records[0].row.vehicle.as_deref(), Some("V1"));
}

#[test]
fn two_page_document_has_no_middle_section() {
    let doc = id("03_2024_OŚ");
    let store = store_with(&[pages(
        &doc,
        vec![
            first_table(&[delivery("01.03.2024 08:00", "V1", "3")]),
            last_table(&[delivery("31.03.2024 08:00", "V2", "4"), delivery("31.03.2024 09:00", "V3", "5")]),
        ],
    )]);
    let diagnostics = RecordingDiagnostics::new();
    let table = DocumentAssembler::new(&store, &diagnostics).assemble(&doc).unwrap();
    let vehicles: Vec<_> = table.records.iter().map(|r| r.row.vehicle.clone().unwrap()).collect();
    assert_eq!(vehicles, ["V1", "V2", "V3"]);
}

#[test]
fn middle_pages_are_joined_in_page_order() {
    let doc = id("04_2024_OŚ");
    let store = store_with(&[pages(
        &doc,
        vec![
            first_table(&[]),
            middle_table(&[("02.04.2024", "08:00", delivery("", "M1", "1"))]),
            middle_table(&[("03.04.2024", "08:00", delivery("", "M2", "1"))]),
            middle_table(&[("04.04.2024", "08:00", delivery("", "M3", "1"))]),
            last_table(&[]),
        ],
    )]);
    let diagnostics = RecordingDiagnostics::new();
    let table = DocumentAssembler::new(&store, &diagnostics).assemble(&doc).unwrap();
    let vehicles: Vec<_> = table.records.iter().map(|r| r.row.vehicle.clone().unwrap()).collect();
    assert_eq!(vehicles, ["M1", "M2", "M3"]);
}

#[test]
fn page_failing_validation_is_dropped_with_a_warning() {
    let doc = id("05_2024_OŚ");
    let mut pages = three_page_document("05_2024_OŚ");
    pages[1].table = narrow_table(5);
    let store = store_with(&[pages]);
    let diagnostics = RecordingDiagnostics::new();

    let table = DocumentAssembler::new(&store, &diagnostics).assemble(&doc).unwrap();
    assert_eq!(table.len(), 3, "first and last page rows only");

    let warnings = diagnostics.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].scope,
        Scope::Page {
            document: doc,
            page: 2
        }
    );
    assert!(warnings[0].message.contains("expected 9"), "{}", warnings[0].message);
}

#[test]
fn every_page_invalid_fails_the_document() {
    let doc = id("06_2024_OŚ");
    let store = store_with(&[pages(&doc, vec![narrow_table(3), narrow_table(3)])]);
    let diagnostics = RecordingDiagnostics::new();
    let err = DocumentAssembler::new(&store, &diagnostics).assemble(&doc).unwrap_err();
    assert!(matches!(err, AssemblyError::NoUsablePages(_)));
    assert_eq!(diagnostics.warnings().len(), 2);
}

#[test]
fn missing_last_page_fails_the_document() {
    let doc = id("07_2024_OŚ");
    let mut store = store_with(&[three_page_document("07_2024_OŚ")]);
    store.remove_page(&doc, 3);
    let diagnostics = RecordingDiagnostics::new();
    let err = DocumentAssembler::new(&store, &diagnostics).assemble(&doc).unwrap_err();
    assert!(matches!(
        err,
        AssemblyError::MissingPages { ref missing, page_count: 3, .. } if missing == &vec![3]
    ));
}

#[test]
fn unknown_document_has_no_pages() {
    let store = MemoryPageStore::new();
    let diagnostics = RecordingDiagnostics::new();
    let err = DocumentAssembler::new(&store, &diagnostics)
        .assemble_pattern("01_2020_OŚ")
        .unwrap_err();
    assert!(matches!(err, AssemblyError::NoPages(_)));
}

#[test]
fn malformed_pattern_is_rejected() {
    let store = MemoryPageStore::new();
    let diagnostics = RecordingDiagnostics::new();
    let err = DocumentAssembler::new(&store, &diagnostics)
        .assemble_pattern("July 2024")
        .unwrap_err();
    assert!(matches!(err, AssemblyError::Identifier(_)));
}

#[test]
fn disagreeing_page_counts_fail() {
    let doc = id("08_2024_OŚ");
    let mut pages = three_page_document("08_2024_OŚ");
    pages[2].page_count = 4;
    let store = store_with(&[pages]);
    let diagnostics = RecordingDiagnostics::new();
    let err = DocumentAssembler::new(&store, &diagnostics).assemble(&doc).unwrap_err();
    assert!(matches!(err, AssemblyError::InconsistentPageCount { .. }));
}

#[test]
fn first_page_without_key_header_fails_the_document() {
    let doc = id("09_2024_OŚ");
    let mut pages = three_page_document("09_2024_OŚ");
    pages[0].table.rows[6][0] = Some("Data".to_string());
    let store = store_with(&[pages]);
    let diagnostics = RecordingDiagnostics::new();
    let err = DocumentAssembler::new(&store, &diagnostics).assemble(&doc).unwrap_err();
    assert!(matches!(
        err,
        AssemblyError::Normalize {
            source: NormalizeError::MissingKeyColumn { .. },
            ..
        }
    ));
}
