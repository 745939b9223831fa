//! # Command-Line Interface
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `inject [PATH] [--module]` | Write `.flutter-plugins` and platform registrants |
//! | `list [PATH]` | Show discovered plugins, writing nothing |
//! | `has-plugins [PATH]` | Print whether `.flutter-plugins` exists |
//!
//! ## Output Formats
//!
//! All commands support `--format`:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! `--verbose` (or `-v`) prints discovery and generation traces to stderr:
//! ```bash
//! registrant --verbose inject
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod inject_cmd;
mod output;
mod pods;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
pub use pods::{CocoaPods, ConfigManifest};
