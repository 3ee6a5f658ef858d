// Delivery ledger CLI: stage extracted tables, merge them into one dataset
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use delivery_ledger::diagnostics::Tee;
use delivery_ledger::extraction::JsonDumpExtractor;
use delivery_ledger::loader::Loader;
use delivery_ledger::merger::MergeReport;
use delivery_ledger::{
    logging, output, CorpusMerger, DocumentAssembler, DocumentId, JsonPageStore, PageStore, RecordingDiagnostics,
    Settings, TracingDiagnostics,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Normalize monthly delivery logs into one dataset")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Settings file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    staging_dir: Option<PathBuf>,

    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[arg(long, global = true)]
    stats_dir: Option<PathBuf>,

    #[arg(long, global = true)]
    logs_dir: Option<PathBuf>,

    /// Log to the console only
    #[arg(long, global = true)]
    no_log_file: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract and stage every source document in a directory
    Stage { source_dir: Option<PathBuf> },
    /// Merge all staged documents and write the dataset
    Merge,
    /// Stage, then merge
    Run { source_dir: Option<PathBuf> },
    /// Show the staged pages of one document, e.g. 07_2024_OŚ
    Inspect { pattern: String },
}

impl Args {
    fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref())?;
        let overrides = [
            (&self.staging_dir, &mut settings.staging_dir),
            (&self.output_dir, &mut settings.output_dir),
            (&self.stats_dir, &mut settings.stats_dir),
            (&self.logs_dir, &mut settings.logs_dir),
        ];
        for (flag, slot) in overrides {
            if let Some(value) = flag {
                *slot = value.clone();
            }
        }
        if self.no_log_file {
            settings.log_file = false;
        }
        Ok(settings)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = args.settings()?;
    let log_dir = settings.log_file.then_some(settings.logs_dir.as_path());
    if let Some(path) = logging::init("DeliveryLedger", log_dir)? {
        tracing::debug!(log_file = %path.display(), "file logging enabled");
    }

    match args.command {
        Command::Stage { source_dir } => {
            if let Some(dir) = source_dir {
                settings.source_dir = dir;
            }
            stage(&settings)
        }
        Command::Merge => merge(&settings),
        Command::Run { source_dir } => {
            if let Some(dir) = source_dir {
                settings.source_dir = dir;
            }
            stage(&settings)?;
            merge(&settings)
        }
        Command::Inspect { pattern } => inspect(&settings, &pattern),
    }
}

fn stage(settings: &Settings) -> Result<()> {
    let extractor = JsonDumpExtractor::new();
    let mut store = JsonPageStore::create(&settings.staging_dir)?;
    let diagnostics = TracingDiagnostics;
    let summary = Loader::new(&extractor, &mut store, &diagnostics).process_directory(&settings.source_dir)?;

    println!("Staged files: {}", summary.documents.len());
    println!("Total pages:  {}", summary.pages());
    println!("Total rows:   {}", summary.rows());
    for name in &summary.rejected {
        println!("  rejected: {}", name);
    }
    for name in &summary.failed {
        println!("  failed:   {}", name);
    }
    Ok(())
}

fn merge(settings: &Settings) -> Result<()> {
    let store = JsonPageStore::new(&settings.staging_dir);
    let recorder = RecordingDiagnostics::new();
    let diagnostics = Tee(&TracingDiagnostics, &recorder);

    let outcome = CorpusMerger::new(&store, &diagnostics).merge()?;
    let written = output::write_outcome(&outcome, &settings.output_dir, &settings.stats_dir)?;

    print_report(&outcome.report);
    println!(
        "merged {} documents, {} rows, total volume {:.2}",
        outcome.report.succeeded.len(),
        outcome.statistics.row_count,
        outcome.statistics.total_volume
    );
    println!(
        "{} warnings, {} errors; wrote {} files",
        recorder.warnings().len(),
        recorder.errors().len(),
        written.datasets.len() + written.statistics.len()
    );
    Ok(())
}

fn print_report(report: &MergeReport) {
    for doc in &report.succeeded {
        println!("  ok      {:<14} {:>6} rows", doc.id.to_string(), doc.rows);
    }
    for doc in &report.failed {
        println!("  FAILED  {:<14} {}", doc.id.to_string(), doc.reason);
    }
}

fn inspect(settings: &Settings, pattern: &str) -> Result<()> {
    let id: DocumentId = pattern.parse()?;
    let store = JsonPageStore::new(&settings.staging_dir);
    let pages = store.pages(&id)?;
    if pages.is_empty() {
        bail!("no staged pages for {}", id);
    }

    println!("{}: {} staged of {} pages", id, pages.len(), pages[0].page_count);
    for page in &pages {
        println!(
            "  page {:>3} [{:<6}] {:>4} rows x {:>2} columns",
            page.page_number,
            page.position().label(),
            page.table.row_count(),
            page.table.column_count()
        );
    }

    let diagnostics = TracingDiagnostics;
    let table = DocumentAssembler::new(&store, &diagnostics).assemble_pages(&id, pages)?;
    println!("assembled rows: {}", table.len());
    for record in table.records.iter().take(5) {
        let cells: Vec<&str> = record.row.cells().iter().map(|c| c.as_deref().unwrap_or("")).collect();
        println!("  {}", cells.join(" | "));
    }
    Ok(())
}
