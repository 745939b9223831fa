//! Plugin injection commands

use std::path::Path;

use anyhow::Result;

use super::output::Output;
use super::pods::{CocoaPods, ConfigManifest};
use crate::inject::{has_plugins, Injector};
use crate::plugin::PluginFinder;
use crate::storage::{Config, LocalFs};

/// Regenerates the plugin manifest and registrants
pub fn inject(output: &Output, path: &Path, module_flag: bool) -> Result<()> {
    let fs = LocalFs;
    let config = Config::for_project(&fs, path)?;
    let module = module_flag || config.module;
    output.verbose_ctx(
        "inject",
        &format!("Project {} (module: {})", path.display(), module),
    );

    let pods = CocoaPods::new(&fs, module, config.ios.manage_podfile);
    let finder = PluginFinder::new(&fs, output).with_config(&config);
    let report =
        Injector::with_finder(finder, &pods).inject_plugins(path, &ConfigManifest { module })?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "plugins": report.plugins.iter().map(|p| p.name()).collect::<Vec<_>>(),
            "manifest_changed": report.manifest_changed,
            "written": report
                .written
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>(),
        }));
    } else {
        for file in &report.written {
            println!("  {}", file.display());
        }
        output.success(&format!(
            "Injected {} plugin(s){}",
            report.plugins.len(),
            if report.manifest_changed {
                " (plugin manifest updated)"
            } else {
                ""
            }
        ));
    }

    Ok(())
}

/// Lists discovered plugins without writing anything
pub fn list(output: &Output, path: &Path) -> Result<()> {
    let fs = LocalFs;
    let config = Config::for_project(&fs, path)?;
    let plugins = PluginFinder::new(&fs, output)
        .with_config(&config)
        .find_plugins(path);

    if output.is_json() {
        output.data(&plugins);
    } else if plugins.is_empty() {
        println!("No plugins found.");
        println!();
        println!(
            "Plugins are packages listed in {} whose pubspec.yaml has a flutter.plugin section.",
            config.package_index.display()
        );
    } else {
        println!("{:<24} {:<24} {}", "NAME", "CLASS", "PATH");
        println!("{}", "-".repeat(80));
        for plugin in &plugins {
            println!(
                "{:<24} {:<24} {}",
                plugin.name(),
                plugin.plugin_class().unwrap_or("-"),
                plugin.path().display()
            );
        }
    }

    Ok(())
}

/// Reports whether the project has a plugin manifest
pub fn has_plugins_cmd(output: &Output, path: Option<&Path>) -> Result<()> {
    let found = has_plugins(&LocalFs, path);

    if output.is_json() {
        output.data(&serde_json::json!({ "has_plugins": found }));
    } else {
        println!("{}", found);
    }

    Ok(())
}
