use anyhow::Result;
use clap::Parser;
use rsbackup::catalog::{self, Catalog};
use rsbackup::commands::{self, Cli};
use rsbackup::logs::{self, LogPaths, long_date};
use rsbackup::runner::{self, RunOptions};
use rsbackup::rsync::ProcessInvoker;
use rsbackup::sysexits;
use std::process;

/// Entry point for the rsbackup CLI application.
/// Checks the environment, loads the task catalog, and runs the batch.
fn main() -> Result<()> {
    let cli = Cli::parse();

    // The log directory is an operator precondition, not something the
    // program creates for itself.
    if !cli.log_dir.is_dir() {
        eprintln!("Error: directory must be created {}", cli.log_dir.display());
        eprintln!("sudo mkdir {}", cli.log_dir.display());
        eprintln!("sudo chown user:group {}", cli.log_dir.display());
        process::exit(sysexits::EX_CANTCREAT);
    }
    let paths = LogPaths::new(&cli.log_dir);

    let catalog_file = match cli.config {
        Some(path) => path,
        None => catalog::default_catalog_file().unwrap_or_else(|| {
            eprintln!("Couldn't resolve the configuration directory!!!");
            process::exit(sysexits::EX_UNAVAILABLE);
        }),
    };
    if !catalog_file.exists() {
        logs::append_line(
            &paths.prog_log,
            &format!(
                "\n{} Exit. Config file not found {}",
                long_date(),
                catalog_file.display()
            ),
        )?;
        process::exit(sysexits::EX_NOINPUT);
    }
    let catalog = match Catalog::load(&catalog_file) {
        Ok(catalog) => catalog,
        Err(e) => {
            logs::append_line(&paths.prog_log, &format!("\n{} Exit. {e:#}", long_date()))?;
            process::exit(sysexits::EX_CONFIG);
        }
    };

    if cli.list {
        commands::list(&catalog);
        return Ok(());
    }

    let opts = RunOptions {
        verbose: cli.verbose,
        dry: cli.dry,
    };
    // Task failures are reported through last.log and the task logs; the
    // scheduler only sees a nonzero exit for run-level problems.
    runner::run_batch(&catalog, &opts, &paths, &ProcessInvoker)?;
    Ok(())
}
