//! Plugin descriptor extraction
//!
//! Reads a package's `pubspec.yaml` and turns its `flutter.plugin` block into
//! a [`Plugin`]. Anything short of a readable, parsable declaration means the
//! package is not a plugin.

use std::path::Path;

use crate::diagnostics::Diagnostics;
use crate::domain::{Plugin, Pubspec};
use crate::storage::FileSystem;

/// Name of the per-package manifest
pub const PUBSPEC_FILE: &str = "pubspec.yaml";

/// Extracts the plugin declared by the package at `package_root`, if any
pub fn extract(
    fs: &dyn FileSystem,
    diagnostics: &dyn Diagnostics,
    name: &str,
    package_root: &Path,
) -> Option<Plugin> {
    let pubspec_path = package_root.join(PUBSPEC_FILE);

    let content = fs.read_to_string(&pubspec_path).ok().flatten()?;
    let pubspec = Pubspec::parse(&content).ok()?;
    let declaration = pubspec.plugin_declaration()?;

    let plugin = Plugin::new(name, package_root, declaration);
    diagnostics.trace(
        "discover",
        &format!("Found plugin {} at {}", plugin.name(), plugin.path().display()),
    );

    Some(plugin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{NullDiagnostics, RecordedDiagnostics};
    use crate::storage::LocalFs;
    use std::fs;
    use tempfile::TempDir;

    fn write_pubspec(dir: &Path, content: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(PUBSPEC_FILE), content).unwrap();
    }

    #[test]
    fn extracts_declared_plugin() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("a");
        write_pubspec(
            &root,
            "name: a\nflutter:\n  plugin:\n    androidPackage: com.x.a\n    pluginClass: APlugin\n",
        );
        let diag = RecordedDiagnostics::new();

        let plugin = extract(&LocalFs, &diag, "a", &root).unwrap();

        assert_eq!(plugin.name(), "a");
        assert_eq!(plugin.path(), root.as_path());
        assert_eq!(plugin.android_package(), Some("com.x.a"));
        assert_eq!(plugin.plugin_class(), Some("APlugin"));
        assert_eq!(plugin.ios_prefix(), "");
        assert!(diag.contains("Found plugin a"));
    }

    #[test]
    fn missing_pubspec_is_not_a_plugin() {
        let dir = TempDir::new().unwrap();
        assert!(extract(&LocalFs, &NullDiagnostics, "a", dir.path()).is_none());
    }

    #[test]
    fn unparsable_pubspec_is_not_a_plugin() {
        let dir = TempDir::new().unwrap();
        write_pubspec(dir.path(), "flutter: [unclosed\n");

        assert!(extract(&LocalFs, &NullDiagnostics, "a", dir.path()).is_none());
    }

    #[test]
    fn empty_pubspec_is_not_a_plugin() {
        let dir = TempDir::new().unwrap();
        write_pubspec(dir.path(), "");

        assert!(extract(&LocalFs, &NullDiagnostics, "a", dir.path()).is_none());
    }

    #[test]
    fn package_without_flutter_section_is_skipped_silently() {
        let dir = TempDir::new().unwrap();
        write_pubspec(dir.path(), "name: b\nversion: 1.0.0\n");
        let diag = RecordedDiagnostics::new();

        assert!(extract(&LocalFs, &diag, "b", dir.path()).is_none());
        assert!(diag.messages().is_empty());
    }
}
