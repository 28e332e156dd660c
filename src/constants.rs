/// Package name.
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
/// Default task catalog file name.
pub const CATALOG_NAME: &str = "tasks.toml";
/// Default log directory for unattended runs.
pub const DEFAULT_LOG_DIR: &str = "/var/log/rsbackup";
/// Trash directory created by rsync under each task destination.
pub const TRASH_DIR_NAME: &str = ".rsync_trash/";
/// Program-wide log file name.
pub const PROG_LOG_NAME: &str = "rsbackup.log";
/// Last-status summary file name, fully rewritten each run.
pub const LAST_LOG_NAME: &str = "last.log";
/// Last-run-date file name, fully rewritten each run.
pub const DATE_LOG_NAME: &str = "date.log";
