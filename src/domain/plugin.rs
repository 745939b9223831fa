//! Plugin domain model
//!
//! A plugin is a package whose `pubspec.yaml` carries a `flutter.plugin`
//! declaration. The declaration is parsed once into typed structs here so the
//! rest of the crate never looks at raw YAML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The subset of a package's `pubspec.yaml` that matters for discovery
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pubspec {
    /// Top-level `flutter:` section
    #[serde(default)]
    pub flutter: Option<FlutterSection>,
}

/// The `flutter:` section of a pubspec
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlutterSection {
    /// Nested `plugin:` declaration
    #[serde(default)]
    pub plugin: Option<PluginDeclaration>,
}

/// The `flutter.plugin` declaration block
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginDeclaration {
    /// Java package hosting the Android registration class
    pub android_package: Option<String>,

    /// Objective-C class prefix
    pub ios_prefix: Option<String>,

    /// Class implementing the registration entry point
    pub plugin_class: Option<String>,
}

impl Pubspec {
    /// Parses pubspec YAML content
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Returns the plugin declaration, if this package declares one
    pub fn plugin_declaration(&self) -> Option<&PluginDeclaration> {
        self.flutter.as_ref().and_then(|f| f.plugin.as_ref())
    }
}

/// A discovered plugin package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plugin {
    name: String,
    path: PathBuf,
    android_package: Option<String>,
    ios_prefix: String,
    plugin_class: Option<String>,
}

impl Plugin {
    /// Builds a plugin from its package name, root directory and declaration
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        declaration: &PluginDeclaration,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            android_package: declaration.android_package.clone(),
            ios_prefix: declaration.ios_prefix.clone().unwrap_or_default(),
            plugin_class: declaration.plugin_class.clone(),
        }
    }

    /// Package name, unique within one discovery run
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute path to the package root
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn android_package(&self) -> Option<&str> {
        self.android_package.as_deref()
    }

    /// Class-name prefix, empty when the package declares none
    pub fn ios_prefix(&self) -> &str {
        &self.ios_prefix
    }

    pub fn plugin_class(&self) -> Option<&str> {
        self.plugin_class.as_deref()
    }

    /// Returns true if the plugin has a registrable entry point
    pub fn is_registrable(&self) -> bool {
        self.plugin_class.is_some()
    }
}
