//! Log artifacts and timestamp helpers.
//!
//! The program keeps its own narrative of every run: rsync's output is
//! captured and replayed into these files, rsync itself never logs here.
//! Two write disciplines exist. Append-only files (the program log and the
//! per-task logs) grow across runs; overwritten files (last-status,
//! last-run-date, success markers) only ever hold the most recent value.

use crate::constants::{DATE_LOG_NAME, LAST_LOG_NAME, PROG_LOG_NAME};
use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Day-resolution date used in last-status lines.
pub fn short_date() -> String {
    Local::now().format("%Y/%m/%d").to_string()
}

/// Second-resolution timestamp used in log narratives.
pub fn long_date() -> String {
    Local::now().format("%Y/%m/%d %H:%M:%S").to_string()
}

/// Resolved locations of the run-level log artifacts.
#[derive(Debug, Clone)]
pub struct LogPaths {
    /// Log directory, also the home of the per-task logs.
    pub dir: PathBuf,
    /// Program-wide log, appended across runs.
    pub prog_log: PathBuf,
    /// Last-status table, one line per task, rewritten each run.
    pub last_log: PathBuf,
    /// Timestamp of the last completed run, rewritten each run.
    pub date_log: PathBuf,
}

impl LogPaths {
    pub fn new(dir: &Path) -> Self {
        LogPaths {
            dir: dir.to_path_buf(),
            prog_log: dir.join(PROG_LOG_NAME),
            last_log: dir.join(LAST_LOG_NAME),
            date_log: dir.join(DATE_LOG_NAME),
        }
    }
}

/// Appends `content` plus a newline to `path`, creating the file on first
/// write, and echoes the line to stdout for interactive runs.
pub fn append_line(path: &Path, content: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;
    writeln!(file, "{content}")
        .with_context(|| format!("cannot write log file '{}'", path.display()))?;
    println!("{content}");
    Ok(())
}

/// Replaces the whole content of `path` with `content` plus a newline.
pub fn overwrite(path: &Path, content: &str) -> Result<()> {
    fs::write(path, format!("{content}\n"))
        .with_context(|| format!("cannot write log file '{}'", path.display()))
}
