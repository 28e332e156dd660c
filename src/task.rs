//! Task records and the paths derived from them for one run.

use crate::constants::TRASH_DIR_NAME;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// One declared source -> destination backup job.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Task {
    /// Unique task name, used as the log-file key and in report lines.
    pub name: String,
    /// Path or path prefix to read from.
    pub source: PathBuf,
    /// Destination path to write to.
    pub dest: PathBuf,
    /// Path whose reachability gates whether `dest` is usable, usually the
    /// mount root containing `dest`.
    pub mountpoint: PathBuf,
    /// Optional manifest listing explicit paths to transfer instead of
    /// mirroring `source` wholesale.
    #[serde(default)]
    pub files_from: Option<PathBuf>,
}

/// Transfer mode of a task, selected solely by the presence of `files_from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Recursive mirror of `source` into `dest`.
    Mirror,
    /// Transfer scoped to the entries enumerated in the manifest.
    FileList,
}

impl Task {
    pub fn mode(&self) -> SyncMode {
        if self.files_from.is_some() {
            SyncMode::FileList
        } else {
            SyncMode::Mirror
        }
    }
}

impl fmt::Display for Task {
    /// Plain field-per-line block, used by `--list` and verbose task logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<11} {}", "name", self.name)?;
        writeln!(f, "{:<11} {}", "source", self.source.display())?;
        if let Some(ref files_from) = self.files_from {
            writeln!(f, "{:<11} {}", "files_from", files_from.display())?;
        }
        writeln!(f, "{:<11} {}", "dest", self.dest.display())?;
        write!(f, "{:<11} {}", "mountpoint", self.mountpoint.display())
    }
}

/// Paths computed from a task for one run. Kept separate from the declared
/// record: the catalog is never mutated.
#[derive(Debug, Clone)]
pub struct TaskPaths {
    /// Hidden directory under `dest` where rsync parks deleted and
    /// overwritten files instead of discarding them.
    pub trash_dir: PathBuf,
    /// Per-task narrative log, appended across runs.
    pub task_log: PathBuf,
    /// Timestamp of the last successful completion, rewritten on success.
    pub success_log: PathBuf,
}

impl TaskPaths {
    pub fn new(task: &Task, log_dir: &Path) -> Self {
        TaskPaths {
            trash_dir: task.dest.join(TRASH_DIR_NAME),
            task_log: log_dir.join(format!("task_{}.log", task.name)),
            success_log: log_dir.join(format!("task_{}_success.log", task.name)),
        }
    }
}
