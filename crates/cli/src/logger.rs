//! File-based run logger for the schema canvas CLI.
//!
//! Every run gets its own directory, `{log_dir}/{timestamp}_{uuid}/log`,
//! where `log_dir` defaults to `~/.schema-canvas/logs`. Messages are also
//! echoed to stderr so they never mix with responses on stdout.

use anyhow::{Context, Result};
use chrono::Local;
use dirs::home_dir;
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Structure representing the run logger
pub struct RunLogger {
    level: LevelFilter,
    file: Option<Arc<Mutex<File>>>,
}

/// Where this run's log went, reported back to the caller.
pub struct RunInfo {
    pub run_id: String,
    pub log_path: Option<PathBuf>,
}

impl RunLogger {
    /// Create a logger. With `write_file` false only stderr is used.
    fn new(level: LevelFilter, log_dir: Option<&Path>, write_file: bool) -> Result<(Self, RunInfo)> {
        let run_id = new_run_id();
        if !write_file {
            return Ok((Self { level, file: None }, RunInfo { run_id, log_path: None }));
        }

        let base = match log_dir {
            Some(dir) => dir.to_path_buf(),
            None => default_log_dir()?,
        };
        let run_dir = base.join(&run_id);
        create_dir_all(&run_dir)
            .with_context(|| format!("Failed to create log directory: {}", run_dir.display()))?;

        let log_path = run_dir.join("log");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

        Ok((
            Self {
                level,
                file: Some(Arc::new(Mutex::new(file))),
            },
            RunInfo {
                run_id,
                log_path: Some(log_path),
            },
        ))
    }

    /// Install the logger as the global `log` backend.
    pub fn init(level: LevelFilter, log_dir: Option<&Path>, write_file: bool) -> Result<RunInfo> {
        let (logger, info) = Self::new(level, log_dir, write_file)?;

        log::set_boxed_logger(Box::new(logger))
            .map(|()| log::set_max_level(level))
            .map_err(|e| anyhow::anyhow!("Failed to set logger: {}", e))?;

        log::debug!("Logger initialized. Run ID: {}", info.run_id);
        if let Some(path) = &info.log_path {
            log::debug!("Log file: {}", path.display());
        }
        Ok(info)
    }
}

impl Log for RunLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string();
            let message = format!(
                "{} {} [{}] {}",
                timestamp,
                record.level(),
                record.target(),
                record.args()
            );

            if let Some(file) = &self.file {
                if let Ok(mut file) = file.lock() {
                    // A failed log write must not take the session down
                    let _ = writeln!(file, "{}", message);
                }
            }

            eprintln!("{}", message);
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

/// Returns the default directory holding one folder per run.
pub fn default_log_dir() -> Result<PathBuf> {
    let home = home_dir().ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
    Ok(home.join(".schema-canvas").join("logs"))
}

fn new_run_id() -> String {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let uuid_string = Uuid::new_v4().to_string();
    let uuid = uuid_string.split('-').next().unwrap_or("unknown");
    format!("{timestamp}_{uuid}")
}

/// Creates a log entry that separates sections in the log file.
pub fn log_section(name: &str) {
    let separator = "=".repeat(50);
    log::info!("{}", separator);
    log::info!("SECTION: {}", name);
    log::info!("{}", separator);
}
