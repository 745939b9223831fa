//! # Storage Layer
//!
//! Filesystem access and the files this crate owns.
//!
//! ## Files
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Plugin manifest | `name=path` lines | `.flutter-plugins` |
//! | Config | TOML | `registrant.toml` |
//!
//! ## Write Semantics
//!
//! - [`LocalFs`] writes through a temp file and rename
//! - The plugin manifest is rewritten in full, or deleted, on every run
//! - No locking; callers serialize runs per project
//!
//! ## Key Types
//!
//! - [`FileSystem`] - Capability every component receives
//! - [`Config`] - Project configuration

mod config;
mod fs;
mod manifest;

pub use config::{Config, ConfigError, IosConfig, CONFIG_FILE};
pub use fs::{FileSystem, LocalFs};
pub use manifest::{
    escape_path, has_manifest, manifest_content, manifest_path, read_manifest, unescape_path,
    write_manifest, MANIFEST_FILE,
};
