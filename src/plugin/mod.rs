//! # Plugin Discovery
//!
//! Finds the plugin packages a project depends on.
//!
//! ## Overview
//!
//! Discovery is a pure read of the project tree:
//!
//! ```text
//! .packages ──► PackageIndex ──► package root ──► pubspec.yaml ──► Plugin
//!  (locator)                      (parent of lib/)   (descriptor)
//! ```
//!
//! A package is a plugin when its `pubspec.yaml` has a `flutter.plugin`
//! block:
//!
//! ```yaml
//! flutter:
//!   plugin:
//!     androidPackage: io.flutter.plugins.camera
//!     iosPrefix: FLT
//!     pluginClass: CameraPlugin
//! ```
//!
//! A missing or malformed index produces no plugins rather than an error.
//!
//! ## Key Types
//!
//! - [`PluginFinder`] - Assembles the ordered plugin list for a project
//! - [`PackageIndex`] - Parsed package-resolution index

mod descriptor;
mod locator;

use std::path::{Path, PathBuf};

use crate::diagnostics::Diagnostics;
use crate::domain::Plugin;
use crate::storage::{Config, FileSystem};

pub use descriptor::{extract, PUBSPEC_FILE};
pub use locator::{locate, package_root, IndexError, PackageIndex, DEFAULT_INDEX_FILE};

/// Assembles the plugin list for a project
pub struct PluginFinder<'a> {
    fs: &'a dyn FileSystem,
    diagnostics: &'a dyn Diagnostics,

    /// Index path relative to the project directory
    index_file: PathBuf,

    /// Sort by package name instead of keeping index order
    sort_by_name: bool,
}

impl<'a> PluginFinder<'a> {
    /// Creates a finder reading the default `.packages` index
    pub fn new(fs: &'a dyn FileSystem, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            fs,
            diagnostics,
            index_file: PathBuf::from(DEFAULT_INDEX_FILE),
            sort_by_name: false,
        }
    }

    /// Reads the index from a different project-relative path
    pub fn with_index_file(mut self, index_file: impl Into<PathBuf>) -> Self {
        self.index_file = index_file.into();
        self
    }

    /// Sorts discovered plugins by name
    pub fn sort_by_name(mut self, sort: bool) -> Self {
        self.sort_by_name = sort;
        self
    }

    /// Applies the discovery settings from a project's `registrant.toml`
    pub fn with_config(self, config: &Config) -> Self {
        self.with_index_file(&config.package_index)
            .sort_by_name(config.sort_plugins)
    }

    pub(crate) fn fs(&self) -> &'a dyn FileSystem {
        self.fs
    }

    pub(crate) fn diagnostics(&self) -> &'a dyn Diagnostics {
        self.diagnostics
    }

    /// Finds every plugin in the project at `directory`, in index order
    pub fn find_plugins(&self, directory: &Path) -> Vec<Plugin> {
        let index = locate(self.fs, self.diagnostics, directory, &self.index_file);

        let mut plugins: Vec<Plugin> = index
            .entries()
            .filter_map(|(name, uri)| {
                let root = match package_root(uri) {
                    Some(root) => root,
                    None => {
                        self.diagnostics.trace(
                            "discover",
                            &format!("Skipping {}: {} is not a local package", name, uri),
                        );
                        return None;
                    }
                };
                extract(self.fs, self.diagnostics, name, &root)
            })
            .collect();

        if self.sort_by_name {
            plugins.sort_by(|a, b| a.name().cmp(b.name()));
        }

        plugins
    }
}
