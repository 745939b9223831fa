//! Android registrant
//!
//! Emits `GeneratedPluginRegistrant.java` under the Android project's
//! `src/main/java/io/flutter/plugins/`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use super::template;
use crate::domain::Plugin;
use crate::storage::FileSystem;

const REGISTRANT_TEMPLATE: &str = include_str!("templates/GeneratedPluginRegistrant.java.tmpl");

/// Registrant path relative to the Android project directory
pub const REGISTRANT_PATH: &str =
    "src/main/java/io/flutter/plugins/GeneratedPluginRegistrant.java";

/// What the Java template needs for one plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AndroidPlugin<'a> {
    pub package: &'a str,
    pub class: &'a str,
}

#[derive(Serialize)]
struct RegistrantContext<'a> {
    plugins: Vec<AndroidPlugin<'a>>,
}

/// Keeps plugins that have both an Android package and a plugin class
pub fn android_plugins(plugins: &[Plugin]) -> Vec<AndroidPlugin<'_>> {
    plugins
        .iter()
        .filter_map(|p| {
            Some(AndroidPlugin {
                package: p.android_package()?,
                class: p.plugin_class()?,
            })
        })
        .collect()
}

/// Writes the registrant into the Android project at `android_dir`
pub fn write_registrant(
    fs: &dyn FileSystem,
    plugins: &[Plugin],
    android_dir: &Path,
) -> Result<PathBuf> {
    let context = serde_json::to_value(RegistrantContext {
        plugins: android_plugins(plugins),
    })
    .context("Failed to build Android registrant context")?;

    let output = android_dir.join(REGISTRANT_PATH);
    template::render(fs, REGISTRANT_TEMPLATE, &context, &output)?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PluginDeclaration;
    use crate::storage::LocalFs;
    use std::fs;
    use tempfile::TempDir;

    fn plugin(name: &str, package: Option<&str>, class: Option<&str>) -> Plugin {
        Plugin::new(
            name,
            format!("/pkgs/{}", name),
            &PluginDeclaration {
                android_package: package.map(String::from),
                ios_prefix: None,
                plugin_class: class.map(String::from),
            },
        )
    }

    #[test]
    fn filters_incomplete_plugins() {
        let plugins = vec![
            plugin("a", Some("com.x.a"), Some("APlugin")),
            plugin("no_class", Some("com.x.b"), None),
            plugin("no_package", None, Some("CPlugin")),
        ];

        let records = android_plugins(&plugins);

        assert_eq!(
            records,
            vec![AndroidPlugin {
                package: "com.x.a",
                class: "APlugin"
            }]
        );
    }

    #[test]
    fn registrant_imports_and_registers_plugins() {
        let dir = TempDir::new().unwrap();
        let plugins = vec![
            plugin("a", Some("com.x.a"), Some("APlugin")),
            plugin("b", Some("com.x.b"), None),
        ];

        let path = write_registrant(&LocalFs, &plugins, dir.path()).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        assert!(path.ends_with("io/flutter/plugins/GeneratedPluginRegistrant.java"));
        assert!(content.contains("Generated file. Do not edit."));
        assert!(content.contains("import com.x.a.APlugin;\n"));
        assert!(content.contains(
            "    APlugin.registerWith(registry.registrarFor(\"com.x.a.APlugin\"));\n"
        ));
        assert!(!content.contains("com.x.b"));
    }

    #[test]
    fn empty_registrant_keeps_class_shape() {
        let dir = TempDir::new().unwrap();

        let path = write_registrant(&LocalFs, &[], dir.path()).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        assert!(content.contains(
            "import io.flutter.plugin.common.PluginRegistry;\n\n/**"
        ));
        assert!(content.contains("      return;\n    }\n  }\n"));
    }

    #[test]
    fn regeneration_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let plugins = vec![plugin("a", Some("com.x.a"), Some("APlugin"))];

        let path = write_registrant(&LocalFs, &plugins, dir.path()).unwrap();
        let first = fs::read(&path).unwrap();
        write_registrant(&LocalFs, &plugins, dir.path()).unwrap();

        assert_eq!(first, fs::read(&path).unwrap());
    }
}
