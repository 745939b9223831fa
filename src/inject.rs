//! Plugin injection
//!
//! Ties discovery, the plugin manifest and registrant generation into one
//! run:
//!
//! ```text
//! find plugins ─► write .flutter-plugins ─► Android registrant
//!                        │                 ─► iOS registrant
//!                        └─ changed? ─────► invalidate dependency cache
//! ```
//!
//! App projects only get registrants for platform directories that already
//! exist. Module projects always get them at fixed locations.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::codegen::{android, ios};
use crate::diagnostics::Diagnostics;
use crate::domain::Plugin;
use crate::plugin::PluginFinder;
use crate::storage::{self, FileSystem};

/// Android project receiving the registrant in module mode
pub const MODULE_ANDROID_DIR: &str = ".android/Flutter";

/// Android project receiving the registrant in app mode
pub const APP_ANDROID_DIR: &str = "android/app";

/// Registrant pod directory in module mode
pub const MODULE_IOS_DIR: &str = ".ios/Flutter/FlutterPluginRegistrant";

/// iOS project directory in app mode
pub const APP_IOS_DIR: &str = "ios";

/// The project's own manifest, as far as injection cares
pub trait ProjectManifest {
    /// Platform projects are embeddable modules rather than standalone apps
    fn is_module(&self) -> bool;
}

/// The platform dependency manager run after generation (e.g. CocoaPods)
pub trait DependencyManager {
    /// Forces the next dependency install to re-resolve
    fn invalidate_external_cache(&self, project_path: &Path) -> Result<()>;

    /// Makes sure the dependency descriptor (e.g. a Podfile) exists
    fn setup_dependency_file(
        &self,
        project_path: &Path,
        manifest: &dyn ProjectManifest,
    ) -> Result<()>;
}

/// Outcome of one injection run
#[derive(Debug, Clone, Default)]
pub struct InjectReport {
    /// Plugins found, in discovery order
    pub plugins: Vec<Plugin>,

    /// The plugin manifest content changed
    pub manifest_changed: bool,

    /// Android project that received a registrant
    pub android_dir: Option<PathBuf>,

    /// iOS root that received a registrant
    pub ios_root: Option<PathBuf>,

    /// Every generated file
    pub written: Vec<PathBuf>,
}

/// Runs discovery and generation for a project
pub struct Injector<'a> {
    finder: PluginFinder<'a>,
    dependencies: &'a dyn DependencyManager,
}

impl<'a> Injector<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        diagnostics: &'a dyn Diagnostics,
        dependencies: &'a dyn DependencyManager,
    ) -> Self {
        Self::with_finder(PluginFinder::new(fs, diagnostics), dependencies)
    }

    /// Uses an already configured finder for discovery
    pub fn with_finder(finder: PluginFinder<'a>, dependencies: &'a dyn DependencyManager) -> Self {
        Self {
            finder,
            dependencies,
        }
    }

    /// Reads the package index from a different project-relative path
    pub fn with_index_file(mut self, index_file: impl Into<PathBuf>) -> Self {
        self.finder = self.finder.with_index_file(index_file);
        self
    }

    /// Sorts discovered plugins by name
    pub fn sort_by_name(mut self, sort: bool) -> Self {
        self.finder = self.finder.sort_by_name(sort);
        self
    }

    /// Finds plugins without writing anything
    pub fn find_plugins(&self, project_path: &Path) -> Vec<Plugin> {
        self.finder.find_plugins(project_path)
    }

    fn fs(&self) -> &'a dyn FileSystem {
        self.finder.fs()
    }

    fn diagnostics(&self) -> &'a dyn Diagnostics {
        self.finder.diagnostics()
    }

    /// Regenerates the plugin manifest and every applicable registrant
    pub fn inject_plugins(
        &self,
        project_path: &Path,
        manifest: &dyn ProjectManifest,
    ) -> Result<InjectReport> {
        let is_module = manifest.is_module();
        let plugins = self.find_plugins(project_path);
        self.diagnostics().trace(
            "inject",
            &format!("{} plugin(s) in {}", plugins.len(), project_path.display()),
        );

        let manifest_changed = storage::write_manifest(self.fs(), project_path, &plugins)?;
        self.diagnostics().trace(
            "inject",
            &format!("Plugin manifest changed: {}", manifest_changed),
        );

        let mut written = Vec::new();

        let android_dir =
            self.platform_dir(project_path, is_module, MODULE_ANDROID_DIR, APP_ANDROID_DIR);
        if let Some(dir) = &android_dir {
            written.push(android::write_registrant(self.fs(), &plugins, dir)?);
        }

        let ios_root = self.platform_dir(project_path, is_module, MODULE_IOS_DIR, APP_IOS_DIR);
        if let Some(root) = &ios_root {
            written.extend(ios::write_registrant(self.fs(), &plugins, root, is_module)?);

            if !plugins.is_empty() {
                self.dependencies.setup_dependency_file(project_path, manifest)?;
            }
            if manifest_changed {
                self.dependencies.invalidate_external_cache(project_path)?;
            }
        }

        for path in &written {
            self.diagnostics().trace("inject", &format!("Wrote {}", path.display()));
        }

        Ok(InjectReport {
            plugins,
            manifest_changed,
            android_dir,
            ios_root,
            written,
        })
    }

    /// Module mode always uses the fixed directory; app mode only an existing one
    fn platform_dir(
        &self,
        project_path: &Path,
        is_module: bool,
        module_dir: &str,
        app_dir: &str,
    ) -> Option<PathBuf> {
        if is_module {
            return Some(project_path.join(module_dir));
        }

        let dir = project_path.join(app_dir);
        if self.fs().is_dir(&dir) {
            Some(dir)
        } else {
            self.diagnostics().trace(
                "inject",
                &format!("Skipping {}: directory does not exist", dir.display()),
            );
            None
        }
    }
}

/// Returns true if `directory` (default: current directory) has a plugin manifest
pub fn has_plugins(fs: &dyn FileSystem, directory: Option<&Path>) -> bool {
    let directory = directory.unwrap_or_else(|| Path::new("."));
    storage::has_manifest(fs, directory)
}
