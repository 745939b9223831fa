//! CocoaPods integration
//!
//! The iOS dependency manager behind `registrant inject`: writes a default
//! Podfile when the project has none, and drops `Pods/Manifest.lock` when the
//! plugin set changes so the next `pod install` re-resolves.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::json;

use crate::codegen::template;
use crate::inject::{DependencyManager, ProjectManifest};
use crate::storage::FileSystem;

const PODFILE_TEMPLATE: &str = include_str!("../codegen/templates/Podfile.tmpl");

/// Xcode target the default Podfile configures
const DEFAULT_TARGET: &str = "Runner";

/// `ProjectManifest` backed by config and command-line flags
#[derive(Debug, Clone, Copy)]
pub struct ConfigManifest {
    pub module: bool,
}

impl ProjectManifest for ConfigManifest {
    fn is_module(&self) -> bool {
        self.module
    }
}

/// CocoaPods as the iOS dependency manager
pub struct CocoaPods<'a> {
    fs: &'a dyn FileSystem,
    module: bool,
    enabled: bool,
}

impl<'a> CocoaPods<'a> {
    pub fn new(fs: &'a dyn FileSystem, module: bool, enabled: bool) -> Self {
        Self {
            fs,
            module,
            enabled,
        }
    }

    /// The iOS project directory holding the Podfile
    pub fn ios_dir(project_path: &Path, module: bool) -> PathBuf {
        if module {
            project_path.join(".ios")
        } else {
            project_path.join("ios")
        }
    }
}

impl DependencyManager for CocoaPods<'_> {
    fn invalidate_external_cache(&self, project_path: &Path) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let lock = Self::ios_dir(project_path, self.module)
            .join("Pods")
            .join("Manifest.lock");
        self.fs
            .remove_file(&lock)
            .with_context(|| format!("Failed to invalidate {}", lock.display()))
    }

    fn setup_dependency_file(
        &self,
        project_path: &Path,
        manifest: &dyn ProjectManifest,
    ) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let podfile = Self::ios_dir(project_path, manifest.is_module()).join("Podfile");
        if self.fs.exists(&podfile) {
            return Ok(());
        }

        template::render(
            self.fs,
            PODFILE_TEMPLATE,
            &json!({ "target": DEFAULT_TARGET }),
            &podfile,
        )
    }
}
