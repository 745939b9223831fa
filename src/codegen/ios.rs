//! iOS registrant
//!
//! App projects get `Runner/GeneratedPluginRegistrant.{h,m}`. Module projects
//! get the same pair under `Classes/` plus a `FlutterPluginRegistrant.podspec`
//! that depends on every plugin pod.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use super::template;
use crate::domain::Plugin;
use crate::storage::FileSystem;

const HEADER_TEMPLATE: &str = include_str!("templates/GeneratedPluginRegistrant.h.tmpl");
const IMPLEMENTATION_TEMPLATE: &str = include_str!("templates/GeneratedPluginRegistrant.m.tmpl");
const PODSPEC_TEMPLATE: &str = include_str!("templates/FlutterPluginRegistrant.podspec.tmpl");

pub const HEADER_FILE: &str = "GeneratedPluginRegistrant.h";
pub const IMPLEMENTATION_FILE: &str = "GeneratedPluginRegistrant.m";
pub const PODSPEC_FILE: &str = "FlutterPluginRegistrant.podspec";

/// What the Objective-C templates need for one plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IosPlugin<'a> {
    pub name: &'a str,
    pub prefix: &'a str,
    pub class: &'a str,
}

#[derive(Serialize)]
struct RegistrantContext<'a> {
    plugins: Vec<IosPlugin<'a>>,
}

/// Keeps plugins that have a plugin class
pub fn ios_plugins(plugins: &[Plugin]) -> Vec<IosPlugin<'_>> {
    plugins
        .iter()
        .filter_map(|p| {
            Some(IosPlugin {
                name: p.name(),
                prefix: p.ios_prefix(),
                class: p.plugin_class()?,
            })
        })
        .collect()
}

/// Directory receiving the header and implementation files
pub fn classes_dir(ios_root: &Path, is_module: bool) -> PathBuf {
    if is_module {
        ios_root.join("Classes")
    } else {
        ios_root.join("Runner")
    }
}

/// Writes the registrant files under `ios_root`, returning every path written
pub fn write_registrant(
    fs: &dyn FileSystem,
    plugins: &[Plugin],
    ios_root: &Path,
    is_module: bool,
) -> Result<Vec<PathBuf>> {
    let context = serde_json::to_value(RegistrantContext {
        plugins: ios_plugins(plugins),
    })
    .context("Failed to build iOS registrant context")?;

    let mut written = Vec::new();

    if is_module {
        let podspec = ios_root.join(PODSPEC_FILE);
        template::render(fs, PODSPEC_TEMPLATE, &context, &podspec)?;
        written.push(podspec);
    }

    let classes = classes_dir(ios_root, is_module);

    let header = classes.join(HEADER_FILE);
    template::render(fs, HEADER_TEMPLATE, &context, &header)?;
    written.push(header);

    let implementation = classes.join(IMPLEMENTATION_FILE);
    template::render(fs, IMPLEMENTATION_TEMPLATE, &context, &implementation)?;
    written.push(implementation);

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PluginDeclaration;
    use crate::storage::LocalFs;
    use std::fs;
    use tempfile::TempDir;

    fn plugin(name: &str, prefix: Option<&str>, class: Option<&str>) -> Plugin {
        Plugin::new(
            name,
            format!("/pkgs/{}", name),
            &PluginDeclaration {
                android_package: None,
                ios_prefix: prefix.map(String::from),
                plugin_class: class.map(String::from),
            },
        )
    }

    #[test]
    fn keeps_plugins_with_class_only() {
        let plugins = vec![
            plugin("camera", Some("FLT"), Some("CameraPlugin")),
            plugin("stub", Some("FLT"), None),
        ];

        let records = ios_plugins(&plugins);

        assert_eq!(
            records,
            vec![IosPlugin {
                name: "camera",
                prefix: "FLT",
                class: "CameraPlugin"
            }]
        );
    }

    #[test]
    fn app_mode_writes_two_files_under_runner() {
        let dir = TempDir::new().unwrap();
        let plugins = vec![plugin("camera", Some("FLT"), Some("CameraPlugin"))];

        let written = write_registrant(&LocalFs, &plugins, dir.path(), false).unwrap();

        assert_eq!(
            written,
            vec![
                dir.path().join("Runner").join(HEADER_FILE),
                dir.path().join("Runner").join(IMPLEMENTATION_FILE),
            ]
        );
        assert!(!dir.path().join(PODSPEC_FILE).exists());

        let implementation = fs::read_to_string(&written[1]).unwrap();
        assert!(implementation.contains("#import <camera/CameraPlugin.h>\n"));
        assert!(implementation.contains(
            "  [FLTCameraPlugin registerWithRegistrar:[registry registrarForPlugin:@\"FLTCameraPlugin\"]];\n"
        ));
    }

    #[test]
    fn module_mode_writes_podspec_and_classes() {
        let dir = TempDir::new().unwrap();
        let plugins = vec![
            plugin("camera", None, Some("CameraPlugin")),
            plugin("stub", None, None),
        ];

        let written = write_registrant(&LocalFs, &plugins, dir.path(), true).unwrap();

        assert_eq!(
            written,
            vec![
                dir.path().join(PODSPEC_FILE),
                dir.path().join("Classes").join(HEADER_FILE),
                dir.path().join("Classes").join(IMPLEMENTATION_FILE),
            ]
        );

        let podspec = fs::read_to_string(&written[0]).unwrap();
        assert!(podspec.contains("  s.dependency 'camera'\n"));
        assert!(!podspec.contains("stub"));
        assert!(podspec.contains("Generated file. Do not edit."));
    }

    #[test]
    fn header_is_identical_across_modes() {
        let dir = TempDir::new().unwrap();
        let plugins = vec![plugin("camera", None, Some("CameraPlugin"))];

        let app = write_registrant(&LocalFs, &plugins, &dir.path().join("app"), false).unwrap();
        let module =
            write_registrant(&LocalFs, &plugins, &dir.path().join("module"), true).unwrap();

        assert_eq!(
            fs::read(&app[0]).unwrap(),
            fs::read(&module[1]).unwrap()
        );
        assert_eq!(
            fs::read(&app[1]).unwrap(),
            fs::read(&module[2]).unwrap()
        );
    }

    #[test]
    fn class_without_prefix_registers_bare_name() {
        let dir = TempDir::new().unwrap();
        let plugins = vec![plugin("share", None, Some("SharePlugin"))];

        let written = write_registrant(&LocalFs, &plugins, dir.path(), false).unwrap();
        let implementation = fs::read_to_string(&written[1]).unwrap();

        assert!(implementation.contains("[SharePlugin registerWithRegistrar:"));
    }
}
