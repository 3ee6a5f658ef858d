// Delivery ledger: monthly delivery-log tables -> one canonical dataset
pub mod assembler;
pub mod config;
pub mod diagnostics;
pub mod document_id;
pub mod extraction;
pub mod loader;
pub mod logging;
pub mod merger;
pub mod normalizer;
pub mod output;
pub mod staging;
pub mod types;

pub use assembler::{DocumentAssembler, PageOutcome};
pub use config::Settings;
pub use diagnostics::{Diagnostics, RecordingDiagnostics, Scope, Severity, TracingDiagnostics};
pub use merger::{CorpusMerger, MergeOutcome, MergeReport};
pub use staging::{JsonPageStore, MemoryPageStore, PageStore};
pub use types::*;
