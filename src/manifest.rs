//! Sanity checks for explicit file-list manifests.

use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// One offending manifest line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// 1-indexed line number.
    pub line: usize,
    /// Raw line content.
    pub content: String,
}

/// Outcome of validating a files-from manifest.
///
/// Errors make the owning task not runnable. Warnings are surfaced in the
/// task log but never block the transfer: rsync reports missing entries on
/// its own, the early check only aids diagnosis.
#[derive(Debug, Clone, Default)]
pub struct FileListReport {
    pub path: PathBuf,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

impl FileListReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl fmt::Display for FileListReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return Ok(());
        }
        write!(f, "Problem found in conf file {}", self.path.display())?;
        if !self.warnings.is_empty() {
            write!(f, "\n\tWarnings:")?;
            for finding in &self.warnings {
                write!(f, "\n\t\tline {} missing path {}", finding.line, finding.content)?;
            }
        }
        if !self.errors.is_empty() {
            write!(f, "\n\tErrors:")?;
            for finding in &self.errors {
                write!(
                    f,
                    "\n\t\tline {} space not allowed {}",
                    finding.line, finding.content
                )?;
            }
        }
        Ok(())
    }
}

/// Checks a manifest line by line (1-indexed).
///
/// A space anywhere in a line is an error: the entry cannot be handed to
/// the transfer tool without ambiguity. A line naming a path that does not
/// exist is only a warning. Blank lines are skipped.
///
/// # Errors
/// Returns an error if the manifest itself cannot be read.
pub fn validate(path: &Path) -> Result<FileListReport> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read file list '{}'", path.display()))?;

    let mut report = FileListReport {
        path: path.to_path_buf(),
        ..Default::default()
    };
    for (idx, line) in text.lines().enumerate() {
        let num = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        if line.contains(' ') {
            report.errors.push(Finding {
                line: num,
                content: line.to_string(),
            });
        }
        if !Path::new(line.trim()).exists() {
            report.warnings.push(Finding {
                line: num,
                content: line.to_string(),
            });
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    fn write_manifest(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_clean_manifest_empty_report() {
        let dir = tempdir().unwrap();
        let existing = dir.path().join("photos");
        fs::create_dir(&existing).unwrap();

        let manifest = write_manifest(&format!("{}\n", existing.display()));
        let report = validate(manifest.path()).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.to_string(), "");
    }

    #[test]
    fn test_space_is_an_error() {
        let dir = tempdir().unwrap();
        let existing = dir.path().join("photos");
        fs::create_dir(&existing).unwrap();

        let manifest = write_manifest(&format!("{}\nsome file.txt\n", existing.display()));
        let report = validate(manifest.path()).unwrap();
        assert!(report.has_errors());
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].line, 2);
        assert_eq!(report.errors[0].content, "some file.txt");
    }

    #[test]
    fn test_missing_path_is_a_warning() {
        let manifest = write_manifest("/no/such/path\n");
        let report = validate(manifest.path()).unwrap();
        assert!(!report.has_errors());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].line, 1);
    }

    #[test]
    fn test_line_can_be_both_error_and_warning() {
        let manifest = write_manifest("/no/such path\n");
        let report = validate(manifest.path()).unwrap();
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let dir = tempdir().unwrap();
        let existing = dir.path().join("docs");
        fs::create_dir(&existing).unwrap();

        let manifest = write_manifest(&format!("\n{}\n\n", existing.display()));
        let report = validate(manifest.path()).unwrap();
        assert!(report.is_clean());
    }

    #[test]
    fn test_report_names_manifest_and_sections() {
        let manifest = write_manifest("/no/such path\n/also/missing\n");
        let report = validate(manifest.path()).unwrap();
        let block = report.to_string();
        assert!(block.contains("Problem found in conf file"));
        assert!(block.contains("Warnings:"));
        assert!(block.contains("Errors:"));
        assert!(block.contains("line 1 space not allowed /no/such path"));
        assert!(block.contains("line 2 missing path /also/missing"));
    }

    #[test]
    fn test_unreadable_manifest_is_an_error() {
        let res = validate(Path::new("/no/such/manifest.txt"));
        assert!(res.is_err());
        let msg = format!("{}", res.unwrap_err());
        assert!(msg.contains("cannot read file list"));
    }
}
