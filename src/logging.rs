use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::Result;
use env_logger::{Builder, Target};
use log::LevelFilter;

pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

pub fn default_log_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wordrill")
        .join("wordrill.log")
}

/// Send log output to `path`; the terminal belongs to the UI. `RUST_LOG`
/// still overrides the configured level.
pub fn init(level: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    Builder::new()
        .filter_level(parse_level(level))
        .parse_default_env()
        .format_timestamp_secs()
        .target(Target::Pipe(Box::new(file)))
        .try_init()?;

    log::info!("logging initialized at level {level}");
    Ok(())
}

pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
