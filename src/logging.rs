// Process-wide logging: console plus an optional timestamped log file
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `<logs_dir>/<YYYYmmdd_HHMMSS>_<name>.log`
pub fn log_file_path(logs_dir: &Path, name: &str) -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    logs_dir.join(format!("{}_{}.log", timestamp, name))
}

/// Install the global subscriber. `RUST_LOG` overrides the default `info`.
///
/// Returns the log file path when file logging is on. Calling this twice is
/// harmless; the second subscriber is ignored.
pub fn init(name: &str, logs_dir: Option<&Path>) -> Result<Option<PathBuf>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let Some(logs_dir) = logs_dir else {
        let _ = tracing_subscriber::registry().with(filter).with(console).try_init();
        return Ok(None);
    };

    fs::create_dir_all(logs_dir).with_context(|| format!("creating {}", logs_dir.display()))?;
    let path = log_file_path(logs_dir, name);
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let file_layer = fmt::layer().with_ansi(false).with_writer(Mutex::new(file));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init();
    Ok(Some(path))
}
