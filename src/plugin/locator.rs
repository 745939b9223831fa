//! Package-resolution index
//!
//! The index (`.packages`) maps each package name to the URI of its `lib/`
//! directory, one `name:uri` pair per line:
//!
//! ```text
//! # Generated by pub
//! camera:file:///home/me/.pub-cache/hosted/pub.dartlang.org/camera-0.2.0/lib/
//! my_app:lib/
//! ```
//!
//! Relative URIs resolve against the project directory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

use crate::diagnostics::Diagnostics;
use crate::storage::FileSystem;

/// Default index file name, relative to the project directory
pub const DEFAULT_INDEX_FILE: &str = ".packages";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("line {line}: expected `name:uri`")]
    MissingSeparator { line: usize },

    #[error("line {line}: empty package name")]
    EmptyName { line: usize },

    #[error("line {line}: duplicate package '{name}'")]
    Duplicate { line: usize, name: String },

    #[error("line {line}: invalid URI '{uri}': {reason}")]
    InvalidUri {
        line: usize,
        uri: String,
        reason: String,
    },
}

/// Parsed package-resolution index, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageIndex {
    entries: Vec<(String, Url)>,
}

impl PackageIndex {
    /// Parses index content, resolving relative URIs against `base`
    pub fn parse(content: &str, base: &Url) -> Result<Self, IndexError> {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();

        for (idx, raw) in content.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let (name, uri) = trimmed
                .split_once(':')
                .ok_or(IndexError::MissingSeparator { line })?;

            if name.is_empty() {
                return Err(IndexError::EmptyName { line });
            }

            if !seen.insert(name.to_string()) {
                return Err(IndexError::Duplicate {
                    line,
                    name: name.to_string(),
                });
            }

            let resolved = base.join(uri).map_err(|e| IndexError::InvalidUri {
                line,
                uri: uri.to_string(),
                reason: e.to_string(),
            })?;

            entries.push((name.to_string(), resolved));
        }

        Ok(Self { entries })
    }

    /// Iterates `(package name, lib URI)` pairs in file order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Url)> {
        self.entries.iter().map(|(name, uri)| (name.as_str(), uri))
    }

    /// Gets the URI recorded for a package
    pub fn get(&self, name: &str) -> Option<&Url> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, uri)| uri)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reads the index at `project_dir/index_file`
///
/// A missing or malformed index yields an empty index; the problem is only
/// reported through `diagnostics`.
pub fn locate(
    fs: &dyn FileSystem,
    diagnostics: &dyn Diagnostics,
    project_dir: &Path,
    index_file: &Path,
) -> PackageIndex {
    let project_dir = absolute(project_dir);
    let index_path = project_dir.join(index_file);

    let content = match fs.read_to_string(&index_path) {
        Ok(Some(content)) => content,
        Ok(None) => {
            diagnostics.trace(
                "discover",
                &format!("No package index at {}", index_path.display()),
            );
            return PackageIndex::default();
        }
        Err(e) => {
            diagnostics.trace("discover", &format!("{:#}", e));
            return PackageIndex::default();
        }
    };

    let base = match Url::from_directory_path(&project_dir) {
        Ok(base) => base,
        Err(()) => {
            diagnostics.trace(
                "discover",
                &format!("Cannot express {} as a URI", project_dir.display()),
            );
            return PackageIndex::default();
        }
    };

    match PackageIndex::parse(&content, &base) {
        Ok(index) => index,
        Err(e) => {
            diagnostics.trace(
                "discover",
                &format!("Ignoring malformed package index {}: {}", index_path.display(), e),
            );
            PackageIndex::default()
        }
    }
}

/// Resolves a package root from its index entry (the parent of `lib/`)
///
/// Returns `None` for URIs that do not name a local directory.
pub fn package_root(lib_uri: &Url) -> Option<PathBuf> {
    let mut dir = lib_uri.clone();
    if !dir.path().ends_with('/') {
        let path = format!("{}/", dir.path());
        dir.set_path(&path);
    }

    let root = dir.join("..").ok()?;
    let path = root.to_file_path().ok()?;

    // Drop the trailing separator so the same root always prints the same way
    Some(path.components().collect())
}

fn absolute(dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        return dir.to_path_buf();
    }

    match std::env::current_dir() {
        Ok(cwd) => cwd.join(dir),
        Err(_) => dir.to_path_buf(),
    }
}
