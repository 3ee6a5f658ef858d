// Normalization of raw page tables into the canonical six-column schema
pub mod cleaner;
pub mod first_page;
pub mod last_page;
pub mod layout;
pub mod middle_pages;
pub mod schema;

pub use cleaner::{clean_cell, clean_table};
pub use first_page::normalize_first_page;
pub use last_page::normalize_last_page;
pub use layout::ColumnSelection;
pub use middle_pages::normalize_middle_pages;
pub use schema::{check_columns, expected_columns, SchemaMismatch};
