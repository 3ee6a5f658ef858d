// Dataset and statistics files written after a successful merge
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::merger::MergeOutcome;
use crate::types::{CanonicalRecord, Statistics};

pub const DATASET_FILE: &str = "dataset.csv";
pub const STATISTICS_FILE: &str = "statistics.json";

/// Files produced by `write_outcome`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenFiles {
    pub datasets: Vec<PathBuf>,
    pub statistics: Vec<PathBuf>,
}

/// CSV with header `tracking_index,date,vehicle,location,municipality,city,quantity,source_file`.
pub fn write_dataset_csv<'a, I>(path: &Path, records: I) -> Result<()>
where
    I: IntoIterator<Item = &'a CanonicalRecord>,
{
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_statistics(path: &Path, statistics: &Statistics) -> Result<()> {
    let json = serde_json::to_string_pretty(statistics)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

/// Corpus files plus one dataset and statistics file per document.
pub fn write_outcome(outcome: &MergeOutcome, output_dir: &Path, stats_dir: &Path) -> Result<WrittenFiles> {
    fs::create_dir_all(output_dir).with_context(|| format!("creating {}", output_dir.display()))?;
    fs::create_dir_all(stats_dir).with_context(|| format!("creating {}", stats_dir.display()))?;

    let mut written = WrittenFiles::default();
    let dataset_path = output_dir.join(DATASET_FILE);
    write_dataset_csv(&dataset_path, &outcome.dataset.records)?;
    written.datasets.push(dataset_path);
    let stats_path = stats_dir.join(STATISTICS_FILE);
    write_statistics(&stats_path, &outcome.statistics)?;
    written.statistics.push(stats_path);

    for summary in &outcome.report.succeeded {
        let pattern = summary.id.base_pattern();
        let records: Vec<&CanonicalRecord> = outcome.dataset.for_source(&pattern).collect();

        let path = output_dir.join(format!("data_{}.csv", pattern));
        write_dataset_csv(&path, records.iter().copied())?;
        written.datasets.push(path);

        let path = stats_dir.join(format!("stats_{}.json", pattern));
        write_statistics(&path, &Statistics::compute(records.iter().copied()))?;
        written.statistics.push(path);
    }
    Ok(written)
}
