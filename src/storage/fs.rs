//! Filesystem capability
//!
//! Every component takes a `&dyn FileSystem` instead of calling `std::fs`
//! directly, so callers decide where reads and writes actually land.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Whole-file filesystem operations used by discovery and generation
pub trait FileSystem {
    /// Returns true if anything exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Returns true if `path` is an existing directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Reads a whole file as UTF-8, `None` if it does not exist
    fn read_to_string(&self, path: &Path) -> Result<Option<String>>;

    /// Replaces the contents of `path`, creating parent directories as needed
    fn write(&self, path: &Path, contents: &str) -> Result<()>;

    /// Deletes a file; deleting a missing file is not an error
    fn remove_file(&self, path: &Path) -> Result<()>;
}

/// The local disk
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    fn temp_path(path: &Path) -> PathBuf {
        let mut name = path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("file"));
        name.push(".tmp");
        path.with_file_name(name)
    }

    fn write_temp(temp_path: &Path, contents: &str) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        let mut writer = BufWriter::new(&file);
        writer
            .write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush {}", temp_path.display()))
    }
}

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        // Write to temp file first
        let temp_path = Self::temp_path(path);
        let written = Self::write_temp(&temp_path, contents).and_then(|()| {
            // Atomic rename
            fs::rename(&temp_path, path).with_context(|| {
                format!(
                    "Failed to rename {} to {}",
                    temp_path.display(),
                    path.display()
                )
            })
        });

        if written.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        written
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to delete {}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let content = LocalFs.read_to_string(&dir.path().join("nope")).unwrap();
        assert!(content.is_none());
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("dir").join("out.txt");

        LocalFs.write(&path, "hello\n").unwrap();

        assert_eq!(LocalFs.read_to_string(&path).unwrap().as_deref(), Some("hello\n"));
        assert!(LocalFs.is_dir(&dir.path().join("nested")));
    }

    #[test]
    fn write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".flutter-plugins");

        LocalFs.write(&path, "a=/a\n").unwrap();

        assert!(!dir.path().join(".flutter-plugins.tmp").exists());
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("GeneratedPluginRegistrant.java");
        fs::create_dir_all(path.join("occupied")).unwrap();

        let err = LocalFs.write(&path, "class X {}\n").unwrap_err();

        assert!(format!("{:#}", err).contains("Failed to rename"));
        assert!(!dir.path().join("GeneratedPluginRegistrant.java.tmp").exists());
        assert!(path.is_dir());
    }

    #[test]
    fn write_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");

        LocalFs.write(&path, "first").unwrap();
        LocalFs.write(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn remove_missing_file_is_ok() {
        let dir = TempDir::new().unwrap();
        LocalFs.remove_file(&dir.path().join("missing")).unwrap();
    }

    #[test]
    fn remove_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gone.txt");
        fs::write(&path, "x").unwrap();

        LocalFs.remove_file(&path).unwrap();

        assert!(!LocalFs.exists(&path));
    }
}
