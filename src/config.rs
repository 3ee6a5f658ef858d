// Layout constants and run-time settings for the delivery ledger
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

// Canonical schema, in output order
pub const CANONICAL_COLUMNS: [&str; 6] = ["date", "vehicle", "location", "municipality", "city", "quantity"];

// Raw column counts of the source layout
pub const FIRST_PAGE_COLUMNS: usize = 12;
pub const MIDDLE_PAGE_COLUMNS: usize = 9;
pub const LAST_PAGE_COLUMNS: usize = 8;

// First page: letterhead rows, then a header row naming the columns
pub const FIRST_PAGE_SKIP_ROWS: usize = 6;
pub const FIRST_PAGE_KEY_HEADER: &str = "Data i godzina ważenia";
pub const FIRST_PAGE_DROP_COLUMNS: [usize; 6] = [1, 2, 3, 5, 8, 10];

// Middle pages: the date is split over raw columns 0 and 1
pub const MIDDLE_PAGE_KEY_COLUMN: usize = 1;
pub const MIDDLE_PAGE_DROP_COLUMNS: [usize; 2] = [5, 7];

// Last page: header remnants on top, totals and signatures at the bottom
pub const LAST_PAGE_SKIP_HEAD: usize = 3;
pub const LAST_PAGE_SKIP_TAIL: usize = 3;
pub const LAST_PAGE_DROP_COLUMNS: [usize; 2] = [4, 6];
pub const LAST_PAGE_KEY_COLUMN: usize = 1;

pub const SETTINGS_FILE: &str = "delivery-ledger.toml";

/// Paths used by a run. Every field has a default so a partial TOML file works.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,
    #[serde(default = "default_staging_dir")]
    pub staging_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_stats_dir")]
    pub stats_dir: PathBuf,
    #[serde(default = "default_logs_dir")]
    pub logs_dir: PathBuf,
    #[serde(default = "default_true")]
    pub log_file: bool,
}

fn default_source_dir() -> PathBuf { "pdf_files".into() }
fn default_staging_dir() -> PathBuf { "processed_pdfs".into() }
fn default_output_dir() -> PathBuf { "output".into() }
fn default_stats_dir() -> PathBuf { "stats".into() }
fn default_logs_dir() -> PathBuf { "logs".into() }
fn default_true() -> bool { true }

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            staging_dir: default_staging_dir(),
            output_dir: default_output_dir(),
            stats_dir: default_stats_dir(),
            logs_dir: default_logs_dir(),
            log_file: default_true(),
        }
    }
}

impl Settings {
    /// Defaults, then the settings file, then `LEDGER_*` environment variables.
    ///
    /// An explicit `path` must exist. Without one, `delivery-ledger.toml` in the
    /// working directory and then the user config directory are tried.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::discover() {
                Some(found) => Self::from_file(&found)?,
                None => Self::default(),
            },
        };
        settings.apply_env();
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parsing settings {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(SETTINGS_FILE);
        if local.is_file() {
            return Some(local);
        }
        dirs::config_dir()
            .map(|dir| dir.join("delivery-ledger").join("config.toml"))
            .filter(|p| p.is_file())
    }

    fn apply_env(&mut self) {
        let overrides: [(&str, &mut PathBuf); 5] = [
            ("LEDGER_SOURCE_DIR", &mut self.source_dir),
            ("LEDGER_STAGING_DIR", &mut self.staging_dir),
            ("LEDGER_OUTPUT_DIR", &mut self.output_dir),
            ("LEDGER_STATS_DIR", &mut self.stats_dir),
            ("LEDGER_LOGS_DIR", &mut self.logs_dir),
        ];
        for (key, slot) in overrides {
            if let Ok(value) = env::var(key) {
                if !value.is_empty() {
                    *slot = value.into();
                }
            }
        }
    }
}
