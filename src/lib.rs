//! Registrant - plugin discovery and registrant generation for Flutter projects
//!
//! Finds the plugin packages a project depends on, records them in
//! `.flutter-plugins`, and generates the Android and iOS sources that
//! register them with each platform's plugin runtime.

pub mod cli;
pub mod codegen;
pub mod diagnostics;
pub mod domain;
pub mod inject;
pub mod plugin;
pub mod storage;

pub use diagnostics::{Diagnostics, NullDiagnostics};
pub use domain::Plugin;
pub use inject::{has_plugins, DependencyManager, InjectReport, Injector, ProjectManifest};
pub use plugin::PluginFinder;
