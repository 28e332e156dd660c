//! Construction and invocation of the rsync command.

use crate::constants::TRASH_DIR_NAME;
use crate::task::{Task, TaskPaths};
use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::Command;

/// Synology metadata cache, never worth mirroring.
const EXCLUDE_EADIR: &str = "--exclude=@eaDir/";
const FILTER_LOST_FOUND: &str = "- lost+found/";
const FILTER_CACHE: &str = "- .cache/";

/// A fully built rsync invocation: program name plus ordered argument
/// vector.
///
/// Building is pure, nothing here touches the filesystem. The command is
/// spawned by argument vector and never through a shell, so task fields
/// containing special characters cannot be reinterpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncCommand {
    pub program: &'static str,
    pub args: Vec<OsString>,
}

impl SyncCommand {
    /// Builds the invocation for `task`, picking the recipe from the
    /// presence of `files_from`.
    pub fn build(task: &Task, paths: &TaskPaths) -> SyncCommand {
        match task.files_from {
            Some(ref manifest) => Self::file_list(task, manifest, paths),
            None => Self::mirror(task, paths),
        }
    }

    /// Whole-directory mirror of `source` into `dest`.
    ///
    /// Compares by size only: mirrors built by other tools may not carry
    /// exact timestamps. `--one-file-system` keeps the recursive scan off
    /// foreign mounts; the file-list recipe deliberately omits it.
    fn mirror(task: &Task, paths: &TaskPaths) -> SyncCommand {
        let mut args: Vec<OsString> = vec![
            "--recursive".into(),
            "--one-file-system".into(),
            "--verbose".into(),
            "--progress".into(),
            "--delete".into(),
            "--size-only".into(),
            "--protect-args".into(),
        ];
        Self::push_common(&mut args, paths);
        args.push(task.source.as_os_str().to_os_string());
        args.push(task.dest.as_os_str().to_os_string());
        SyncCommand {
            program: "rsync",
            args,
        }
    }

    /// Transfer scoped to the entries enumerated in `manifest`; `source`
    /// is only the prefix the manifest entries are resolved against.
    fn file_list(task: &Task, manifest: &Path, paths: &TaskPaths) -> SyncCommand {
        let mut args: Vec<OsString> = vec![
            "--archive".into(),
            "--verbose".into(),
            "--progress".into(),
            "--delete".into(),
        ];
        Self::push_common(&mut args, paths);
        args.push(eq_arg("--files-from=", manifest));
        args.push(task.source.as_os_str().to_os_string());
        args.push(task.dest.as_os_str().to_os_string());
        SyncCommand {
            program: "rsync",
            args,
        }
    }

    /// Noise excludes plus the trash-directory handling shared by both
    /// recipes: deleted and overwritten destination files are moved into
    /// the trash directory, and the trash directory itself is kept out of
    /// the transfer.
    fn push_common(args: &mut Vec<OsString>, paths: &TaskPaths) {
        args.push(EXCLUDE_EADIR.into());
        args.push("--filter".into());
        args.push(FILTER_LOST_FOUND.into());
        args.push("--filter".into());
        args.push(FILTER_CACHE.into());
        args.push("--backup".into());
        args.push(eq_arg("--backup-dir=", &paths.trash_dir));
        args.push(format!("--exclude={TRASH_DIR_NAME}").into());
    }

    /// Single-line rendering for log files.
    pub fn command_line(&self) -> String {
        let mut line = String::from(self.program);
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// Joins a `--flag=` prefix with a path value into one argument.
fn eq_arg(flag: &str, value: &Path) -> OsString {
    let mut arg = OsString::from(flag);
    arg.push(value.as_os_str());
    arg
}

/// Captured result of one rsync run.
#[derive(Debug, Clone)]
pub struct SyncOutput {
    /// Exit code, `None` when the tool was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl SyncOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Spawns a built command and captures its outcome.
///
/// The executor only talks to rsync through this trait, so tests can
/// substitute a recording double and assert whether the tool was started.
pub trait SyncInvoker {
    /// # Errors
    /// Returns an error when the process cannot be started at all; a
    /// nonzero exit is reported through [`SyncOutput`], not as an error.
    fn invoke(&self, cmd: &SyncCommand) -> io::Result<SyncOutput>;
}

/// Invoker backed by a real child process.
pub struct ProcessInvoker;

impl SyncInvoker for ProcessInvoker {
    fn invoke(&self, cmd: &SyncCommand) -> io::Result<SyncOutput> {
        let output = Command::new(cmd.program).args(&cmd.args).output()?;
        Ok(SyncOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
