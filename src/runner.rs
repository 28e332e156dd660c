//! Batch runner: iterates the catalog with per-task failure isolation.

use crate::catalog::Catalog;
use crate::executor;
use crate::logs::{self, LogPaths, long_date, short_date};
use crate::rsync::SyncInvoker;
use anyhow::Result;
use std::fmt;

/// Flags for one run, threaded explicitly through the pipeline instead of
/// living in global state.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Log command text, rsync output, and exit codes per task.
    pub verbose: bool,
    /// Perform all checks and log the would-be command, skip rsync.
    pub dry: bool,
}

impl RunOptions {
    /// Tag appended to the log lines of a dry run.
    pub fn dry_tag(&self) -> &'static str {
        if self.dry { " DRY RUN" } else { "" }
    }
}

/// Summary line for one task of one run: `name date error-count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    pub name: String,
    pub date: String,
    /// 0 on success, nonzero on any failure.
    pub error_count: u32,
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.date, self.error_count)
    }
}

/// Renders the block written to the last-status log, one line per task.
pub fn render_summary(outcomes: &[TaskOutcome]) -> String {
    outcomes
        .iter()
        .map(TaskOutcome::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Runs every task of the catalog in order and records the run-level logs.
///
/// A failing task contributes a nonzero summary line and nothing else: the
/// remaining tasks still run. Outside dry runs the last-status and
/// last-run-date logs are fully rewritten; the program log is appended
/// either way.
///
/// # Errors
/// Returns an error only when a run-level log cannot be written; task
/// failures are reported through the returned outcomes.
pub fn run_batch(
    catalog: &Catalog,
    opts: &RunOptions,
    paths: &LogPaths,
    invoker: &dyn SyncInvoker,
) -> Result<Vec<TaskOutcome>> {
    logs::append_line(
        &paths.prog_log,
        &format!("\n{} Starting job{}", long_date(), opts.dry_tag()),
    )?;
    let names: Vec<&str> = catalog.tasks.iter().map(|t| t.name.as_str()).collect();
    logs::append_line(&paths.prog_log, &format!("List of tasks {names:?}"))?;

    let mut outcomes = Vec::with_capacity(catalog.tasks.len());
    for task in &catalog.tasks {
        let result = executor::run_task(task, opts, &paths.dir, invoker);
        if let Err(ref err) = result {
            eprintln!("Task {} failed: {err}", task.name);
        }
        outcomes.push(TaskOutcome {
            name: task.name.clone(),
            date: short_date(),
            error_count: u32::from(result.is_err()),
        });
    }

    let summary = render_summary(&outcomes);
    if !opts.dry {
        logs::overwrite(&paths.last_log, &summary)?;
        logs::overwrite(&paths.date_log, &long_date())?;
    }
    logs::append_line(&paths.prog_log, &format!("\n{summary}"))?;
    logs::append_line(
        &paths.prog_log,
        &format!("{} Ending job{}", long_date(), opts.dry_tag()),
    )?;
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_tag() {
        assert_eq!(RunOptions::default().dry_tag(), "");
        let dry = RunOptions {
            verbose: false,
            dry: true,
        };
        assert_eq!(dry.dry_tag(), " DRY RUN");
    }

    #[test]
    fn test_render_summary() {
        let outcomes = vec![
            TaskOutcome {
                name: "Images".to_string(),
                date: "2026/08/06".to_string(),
                error_count: 0,
            },
            TaskOutcome {
                name: "Docs".to_string(),
                date: "2026/08/06".to_string(),
                error_count: 1,
            },
        ];
        assert_eq!(
            render_summary(&outcomes),
            "Images 2026/08/06 0\nDocs 2026/08/06 1"
        );
    }
}
