//! Loading of the task catalog.
//!
//! The catalog is a TOML file holding an ordered `[[task]]` array:
//!
//! ```toml
//! [[task]]
//! name = "Images"
//! source = "/home/Images/"
//! dest = "/media/NAS/photo/"
//! mountpoint = "/media/NAS/"
//!
//! [[task]]
//! name = "some_files"
//! source = "/"
//! files_from = "/home/some_files.txt"
//! dest = "/media/NAS/backup/some_files"
//! mountpoint = "/media/NAS/backup"
//! ```
//!
//! Tasks run in document order. A missing or malformed catalog is fatal to
//! the whole run; everything past loading is task-scoped.

use crate::constants::{CATALOG_NAME, PKG_NAME};
use crate::task::Task;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Ordered collection of task records.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Catalog {
    #[serde(default, rename = "task")]
    pub tasks: Vec<Task>,
}

impl Catalog {
    /// Reads and parses the catalog, enforcing unique task names.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// declares two tasks with the same name.
    pub fn load(path: &Path) -> Result<Catalog> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read catalog '{}'", path.display()))?;
        let catalog: Catalog = toml::from_str(&text)
            .with_context(|| format!("cannot parse catalog '{}'", path.display()))?;

        let mut seen = HashSet::new();
        for task in &catalog.tasks {
            if !seen.insert(task.name.as_str()) {
                bail!(
                    "duplicate task name '{}' in catalog '{}'",
                    task.name,
                    path.display()
                );
            }
        }
        Ok(catalog)
    }
}

/// Returns the default catalog location, platform-specific.
#[cfg(not(target_os = "macos"))]
pub fn default_catalog_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(PKG_NAME).join(CATALOG_NAME))
}

/// Returns the default catalog location, platform-specific.
#[cfg(target_os = "macos")]
pub fn default_catalog_file() -> Option<PathBuf> {
    dirs::home_dir().map(|dir| dir.join(".config").join(PKG_NAME).join(CATALOG_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_catalog(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_preserves_order() {
        let file = write_catalog(
            r#"
[[task]]
name = "Images"
source = "/home/Images/"
dest = "/media/NAS/photo/"
mountpoint = "/media/NAS/"

[[task]]
name = "Docs"
source = "/"
files_from = "/cfg/docs.txt"
dest = "/media/NAS/backup/docs"
mountpoint = "/media/NAS/backup"
"#,
        );

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.tasks.len(), 2);
        assert_eq!(catalog.tasks[0].name, "Images");
        assert_eq!(catalog.tasks[1].name, "Docs");
        assert!(catalog.tasks[0].files_from.is_none());
        assert_eq!(
            catalog.tasks[1].files_from.as_deref(),
            Some(Path::new("/cfg/docs.txt"))
        );
    }

    #[test]
    fn test_load_rejects_duplicate_names() {
        let file = write_catalog(
            r#"
[[task]]
name = "Images"
source = "/a"
dest = "/b"
mountpoint = "/c"

[[task]]
name = "Images"
source = "/d"
dest = "/e"
mountpoint = "/f"
"#,
        );

        let res = Catalog::load(file.path());
        assert!(res.is_err());
        let msg = format!("{}", res.unwrap_err());
        assert!(msg.contains("duplicate task name 'Images'"));
    }

    #[test]
    fn test_load_missing_file() {
        let res = Catalog::load(Path::new("/no/such/tasks.toml"));
        assert!(res.is_err());
        let msg = format!("{}", res.unwrap_err());
        assert!(msg.contains("cannot read catalog"));
    }

    #[test]
    fn test_load_malformed_toml() {
        let file = write_catalog("[[task]\nname = ");
        let res = Catalog::load(file.path());
        assert!(res.is_err());
        let msg = format!("{}", res.unwrap_err());
        assert!(msg.contains("cannot parse catalog"));
    }

    #[test]
    fn test_empty_catalog_has_no_tasks() {
        let file = write_catalog("");
        let catalog = Catalog::load(file.path()).unwrap();
        assert!(catalog.tasks.is_empty());
    }
}
