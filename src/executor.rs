//! Per-task lifecycle: precondition checks, command construction, rsync
//! invocation, and outcome logging.

use crate::logs::{self, long_date};
use crate::manifest;
use crate::probe;
use crate::rsync::{SyncCommand, SyncInvoker};
use crate::runner::RunOptions;
use crate::task::{Task, TaskPaths};
use anyhow::Context;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a task run failed.
///
/// `Unreachable` and `FileList` are rejections: the transfer tool was
/// never started. `Sync` means rsync ran and reported a problem. `Fault`
/// is any other error caught at the task boundary.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("directory not reachable {0}")]
    Unreachable(PathBuf),
    #[error("file list has errors {0}")]
    FileList(PathBuf),
    #[error("rsync failed (exit code {code:?})")]
    Sync { code: Option<i32>, stderr: String },
    #[error(transparent)]
    Fault(#[from] anyhow::Error),
}

impl TaskError {
    /// Whether the task was rejected before any transfer attempt.
    pub fn is_rejection(&self) -> bool {
        matches!(self, TaskError::Unreachable(_) | TaskError::FileList(_))
    }
}

/// Runs one task through its whole lifecycle.
///
/// Every failure is contained here and reported as a [`TaskError`]; the
/// batch runner never sees a fault propagate out of a task. The task log
/// receives the full narrative: start line, optional verbose dumps, the
/// command text, rsync output, errors, end line. On success (dry runs
/// included) the success marker is rewritten with the current timestamp.
pub fn run_task(
    task: &Task,
    opts: &RunOptions,
    log_dir: &Path,
    invoker: &dyn SyncInvoker,
) -> Result<(), TaskError> {
    let paths = TaskPaths::new(task, log_dir);
    let log = &paths.task_log;

    logs::append_line(
        log,
        &format!("\n{} Starting task {}{}", long_date(), task.name, opts.dry_tag()),
    )?;
    if opts.verbose {
        logs::append_line(log, &format!("\n{task}"))?;
    }

    if !probe::is_reachable(&task.mountpoint) {
        logs::append_line(
            log,
            &format!("Error: directory not reachable {}", task.mountpoint.display()),
        )?;
        return Err(TaskError::Unreachable(task.mountpoint.clone()));
    }

    if let Some(ref manifest_path) = task.files_from {
        let report = manifest::validate(manifest_path)?;
        if !report.is_clean() {
            logs::append_line(log, &report.to_string())?;
        }
        if report.has_errors() {
            return Err(TaskError::FileList(manifest_path.clone()));
        }
    }

    let cmd = SyncCommand::build(task, &paths);
    if opts.verbose || opts.dry {
        logs::append_line(log, &format!("CMD: {}", cmd.command_line()))?;
    }

    if !opts.dry {
        let out = invoker
            .invoke(&cmd)
            .with_context(|| format!("cannot start {}", cmd.program))?;
        if opts.verbose {
            logs::append_line(log, &format!("STDOUT: {}", out.stdout))?;
            logs::append_line(log, &format!("STDERR: {}", out.stderr))?;
            let code = out.code.map_or_else(|| "none".to_string(), |c| c.to_string());
            logs::append_line(log, &format!("RETCODE: {code}"))?;
        }
        if !out.success() {
            logs::append_line(log, &format!("\nError: {}", out.stderr))?;
            return Err(TaskError::Sync {
                code: out.code,
                stderr: out.stderr,
            });
        }
    }

    logs::append_line(
        log,
        &format!("\n{} Ending task {}{}", long_date(), task.name, opts.dry_tag()),
    )?;
    logs::overwrite(&paths.success_log, &long_date())
        .context("cannot write success marker")?;
    Ok(())
}
