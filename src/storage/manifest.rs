//! Persisted plugin manifest
//!
//! `.flutter-plugins` lists every discovered plugin as `name=path`, one per
//! line, in discovery order. The file is absent when there are no plugins.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::FileSystem;
use crate::domain::Plugin;

/// Manifest file name, relative to the project directory
pub const MANIFEST_FILE: &str = ".flutter-plugins";

/// Returns the manifest path for a project
pub fn manifest_path(project_dir: &Path) -> PathBuf {
    project_dir.join(MANIFEST_FILE)
}

/// Escapes a path so it is a stable single-line value
///
/// Backslashes are doubled, and line breaks become `\n` and `\r`.
pub fn escape_path(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let mut escaped = String::with_capacity(raw.len());

    for ch in raw.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(ch),
        }
    }

    escaped
}

/// Reverses [`escape_path`]
pub fn unescape_path(value: &str) -> PathBuf {
    let mut raw = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            raw.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => raw.push('\n'),
            Some('r') => raw.push('\r'),
            Some(other) => raw.push(other),
            None => raw.push('\\'),
        }
    }

    PathBuf::from(raw)
}

/// Renders manifest content (without the trailing newline)
pub fn manifest_content(plugins: &[Plugin]) -> String {
    plugins
        .iter()
        .map(|p| format!("{}={}", p.name(), escape_path(p.path())))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes the manifest for `plugins`, returning true if its content changed
///
/// An empty plugin list deletes the file.
pub fn write_manifest(fs: &dyn FileSystem, project_dir: &Path, plugins: &[Plugin]) -> Result<bool> {
    let path = manifest_path(project_dir);
    let old = fs.read_to_string(&path)?;

    let content = manifest_content(plugins);
    if content.is_empty() {
        if fs.exists(&path) {
            fs.remove_file(&path)?;
        }
    } else {
        fs.write(&path, &format!("{}\n", content))
            .with_context(|| format!("Failed to write plugin manifest: {}", path.display()))?;
    }

    let new = fs.read_to_string(&path)?;
    Ok(old != new)
}

/// Reads back `(name, path)` pairs from the manifest, in file order
pub fn read_manifest(fs: &dyn FileSystem, project_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let path = manifest_path(project_dir);
    let content = match fs.read_to_string(&path)? {
        Some(content) => content,
        None => return Ok(Vec::new()),
    };

    let mut entries = Vec::new();
    for (line_num, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let (name, value) = line.split_once('=').with_context(|| {
            format!(
                "Malformed entry at line {} of {}",
                line_num + 1,
                path.display()
            )
        })?;

        entries.push((name.to_string(), unescape_path(value)));
    }

    Ok(entries)
}

/// Returns true if the project has a plugin manifest
pub fn has_manifest(fs: &dyn FileSystem, project_dir: &Path) -> bool {
    fs.exists(&manifest_path(project_dir))
}
