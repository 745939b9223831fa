//! Domain models
//!
//! Contains the plugin model without any I/O concerns.

mod plugin;

pub use plugin::{FlutterSection, Plugin, PluginDeclaration, Pubspec};
