// Diagnostics sink passed into the normalization core
use std::cell::RefCell;
use std::fmt;

use crate::types::DocumentId;

/// What a diagnostic is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Corpus,
    Document(DocumentId),
    Page { document: DocumentId, page: usize },
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Corpus => f.write_str("corpus"),
            Scope::Document(id) => write!(f, "{}", id),
            Scope::Page { document, page } => write!(f, "{} page {}", document, page),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub scope: Scope,
    pub message: String,
}

/// Receives progress and failure reports from the assembler, merger and loader.
pub trait Diagnostics {
    fn report(&self, severity: Severity, scope: &Scope, message: &str);

    fn info(&self, scope: &Scope, message: &str) {
        self.report(Severity::Info, scope, message);
    }

    fn warning(&self, scope: &Scope, message: &str) {
        self.report(Severity::Warning, scope, message);
    }

    fn error(&self, scope: &Scope, message: &str) {
        self.report(Severity::Error, scope, message);
    }
}

/// Forwards to `tracing`; what gets printed is up to the installed subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, severity: Severity, scope: &Scope, message: &str) {
        match severity {
            Severity::Info => tracing::info!(scope = %scope, "{}", message),
            Severity::Warning => tracing::warn!(scope = %scope, "{}", message),
            Severity::Error => tracing::error!(scope = %scope, "{}", message),
        }
    }
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    events: RefCell<Vec<Diagnostic>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Diagnostic> {
        self.events.borrow().clone()
    }

    pub fn with_severity(&self, severity: Severity) -> Vec<Diagnostic> {
        self.events
            .borrow()
            .iter()
            .filter(|d| d.severity == severity)
            .cloned()
            .collect()
    }

    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.with_severity(Severity::Warning)
    }

    pub fn errors(&self) -> Vec<Diagnostic> {
        self.with_severity(Severity::Error)
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn report(&self, severity: Severity, scope: &Scope, message: &str) {
        self.events.borrow_mut().push(Diagnostic {
            severity,
            scope: scope.clone(),
            message: message.to_string(),
        });
    }
}

/// Records and forwards, so tests and the CLI can share one code path.
pub struct Tee<'a, A: Diagnostics + ?Sized, B: Diagnostics + ?Sized>(pub &'a A, pub &'a B);

impl<A: Diagnostics + ?Sized, B: Diagnostics + ?Sized> Diagnostics for Tee<'_, A, B> {
    fn report(&self, severity: Severity, scope: &Scope, message: &str) {
        self.0.report(severity, scope, message);
        self.1.report(severity, scope, message);
    }
}
