// Shared fixtures: synthetic pages in the three source layouts
#![allow(dead_code)]

use delivery_ledger::{Cell, DocumentId, MemoryPageStore, PageStore, RawPage, RawTable};

/// One delivery as it should come out of normalization.
#[derive(Debug, Clone, Copy)]
pub struct Delivery {
    pub date: &'static str,
    pub vehicle: &'static str,
    pub location: &'static str,
    pub municipality: &'static str,
    pub city: &'static str,
    pub quantity: &'static str,
}

pub fn delivery(date: &'static str, vehicle: &'static str, quantity: &'static str) -> Delivery {
    Delivery {
        date,
        vehicle,
        location: "Oczyszczalnia",
        municipality: "Gmina Wiejska",
        city: "Miasto",
        quantity,
    }
}

fn cells(values: &[&str]) -> Vec<Cell> {
    values
        .iter()
        .map(|v| if v.is_empty() { None } else { Some(v.to_string()) })
        .collect()
}

pub fn first_table(deliveries: &[Delivery]) -> RawTable {
    let mut rows = vec![
        cells(&["Wykaz dostaw szczegółowy"]),
        cells(&["Okres: 01.07.2024 - 31.07.2024"]),
        cells(&[""]),
        cells(&["Odbiorca: Zakład"]),
        cells(&[""]),
        cells(&[""]),
        cells(&[
            "Data i godzina ważenia",
            "Nr",
            "Kod",
            "Odbiorca",
            "Pojazd",
            "Kierowca",
            "Lokalizacja",
            "Gmina",
            "Ulica",
            "Miasto",
            "Uwagi",
            "Ilość [m3]",
        ]),
    ];
    for d in deliveries {
        rows.push(cells(&[
            d.date, "1", "K", "O", d.vehicle, "J. K.", d.location, d.municipality, "Polna", d.city, "", d.quantity,
        ]));
    }
    // end-of-table padding
    rows.push(cells(&["", "", "", "", "", "", "", "", "", "", "", ""]));
    RawTable::new(rows)
}

/// The date is split over the first two columns: `date_a + date_b`.
pub fn middle_table(deliveries: &[(&'static str, &'static str, Delivery)]) -> RawTable {
    let mut rows = Vec::new();
    for (date_a, date_b, d) in deliveries {
        rows.push(cells(&[
            date_a, date_b, d.vehicle, d.location, d.municipality, "Polna", d.city, "", d.quantity,
        ]));
    }
    rows.push(cells(&["", "", "", "", "", "", "", "", ""]));
    RawTable::new(rows)
}

pub fn last_table(deliveries: &[Delivery]) -> RawTable {
    let mut rows = vec![cells(&["cd."; 8]), cells(&[""; 8]), cells(&["hdr"; 8])];
    for d in deliveries {
        rows.push(cells(&[d.date, d.vehicle, d.location, d.municipality, "Polna", d.city, "", d.quantity]));
    }
    rows.push(cells(&["Razem", "", "", "", "", "", "", "999"]));
    rows.push(cells(&["Sporządził", "", "", "", "", "", "", ""]));
    rows.push(cells(&["Podpis", "", "", "", "", "", "", ""]));
    RawTable::new(rows)
}

pub fn narrow_table(columns: usize) -> RawTable {
    RawTable::new((0..10).map(|_| cells(&vec!["x"; columns])).collect())
}

pub fn id(pattern: &str) -> DocumentId {
    pattern.parse().unwrap()
}

/// Pages numbered 1..=n from the given tables.
pub fn pages(id: &DocumentId, tables: Vec<RawTable>) -> Vec<RawPage> {
    let page_count = tables.len();
    tables
        .into_iter()
        .enumerate()
        .map(|(i, table)| RawPage {
            document_id: id.clone(),
            page_number: i + 1,
            page_count,
            table,
        })
        .collect()
}

pub fn stage(store: &mut dyn PageStore, pages: &[RawPage]) {
    for page in pages {
        store.put_page(page).unwrap();
    }
}

/// A three-page document: two first-page rows, one middle row, one last-page row.
pub fn three_page_document(pattern: &str) -> Vec<RawPage> {
    let id = id(pattern);
    pages(
        &id,
        vec![
            first_table(&[delivery("01.07.2024 06:10", "WGM 100", "10,5"), delivery("01.07.2024 07:40", "WGM 101", "8")]),
            middle_table(&[("15.07.2024", "09:00", delivery("", "WGM 102", "4,25"))]),
            last_table(&[delivery("31.07.2024 14:00", "WGM 103", "2,75")]),
        ],
    )
}

pub fn store_with(documents: &[Vec<RawPage>]) -> MemoryPageStore {
    let mut store = MemoryPageStore::new();
    for pages in documents {
        stage(&mut store, pages);
    }
    store
}
