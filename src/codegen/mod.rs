//! # Registrant Generation
//!
//! Turns the discovered plugin list into platform-native source files.
//!
//! ## Outputs
//!
//! | Platform | Mode | Files |
//! |----------|------|-------|
//! | Android | any | `<android>/src/main/java/io/flutter/plugins/GeneratedPluginRegistrant.java` |
//! | iOS | app | `<ios>/Runner/GeneratedPluginRegistrant.{h,m}` |
//! | iOS | module | `<ios>/FlutterPluginRegistrant.podspec`, `<ios>/Classes/GeneratedPluginRegistrant.{h,m}` |
//!
//! Every output is rewritten in full on each run and is byte-identical for
//! identical input. Plugins without a `pluginClass` never appear in
//! generated code.
//!
//! All generators go through [`template::render`].

pub mod android;
pub mod ios;
pub mod template;

pub use template::{render, render_to_string, Template, TemplateError};
