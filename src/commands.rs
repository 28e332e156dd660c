//! Command-line interface definition for rsbackup.

use crate::catalog::Catalog;
use crate::constants;
use clap::Parser;
use std::path::PathBuf;

/// Command-line interface definition for rsbackup.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase output verbosity: log command text, rsync output, and exit codes.
    #[arg(short, long)]
    pub verbose: bool,
    /// Read the catalog, list all tasks, and exit without executing anything.
    #[arg(short, long)]
    pub list: bool,
    /// Dry run: perform all checks and log the would-be command, don't exec rsync.
    #[arg(short, long)]
    pub dry: bool,
    /// Manually specify the task catalog. Provide the full path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Override the log directory.
    #[arg(long, value_name = "PATH", default_value = constants::DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,
}

/// Prints every task of the catalog, one field per line.
pub fn list(catalog: &Catalog) {
    let names: Vec<&str> = catalog.tasks.iter().map(|t| t.name.as_str()).collect();
    println!("List of tasks {names:?}");
    for task in &catalog.tasks {
        println!("\n{task}");
    }
}
