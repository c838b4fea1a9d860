//! Icon manifest: a sorted, newline-separated list of icon filenames.

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Extensions picked up by the scan. Matching is case-sensitive.
pub const ICON_EXTENSIONS: [&str; 5] = ["svg", "png", "jpg", "jpeg", "gif"];

/// Names shown by `ManifestReport::preview`.
const PREVIEW_LEN: usize = 10;

#[derive(Debug, Clone)]
pub struct ManifestReport {
    pub manifest: PathBuf,
    pub icons: Vec<String>,
}

impl ManifestReport {
    pub fn count(&self) -> usize {
        self.icons.len()
    }

    pub fn preview(&self) -> &[String] {
        &self.icons[..self.icons.len().min(PREVIEW_LEN)]
    }

    /// How many names `preview` leaves out.
    pub fn remaining(&self) -> usize {
        self.icons.len().saturating_sub(PREVIEW_LEN)
    }
}

fn is_icon(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| ICON_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

/// Sorted basenames of icon files directly under `dir`. A missing directory
/// yields an empty list.
pub fn scan_icons(dir: &Path) -> Result<Vec<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(dir = %dir.display(), "icon directory does not exist");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e).with_context(|| format!("failed to read {}", dir.display())),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() || !is_icon(&path) {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Scan `icons_dir` and write the manifest to `manifest`, creating its parent.
pub fn generate_manifest(icons_dir: &Path, manifest: &Path) -> Result<ManifestReport> {
    let icons = scan_icons(icons_dir)?;
    if let Some(parent) = manifest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let mut body = String::new();
    for name in &icons {
        body.push_str(name);
        body.push('\n');
    }
    fs::write(manifest, body).with_context(|| format!("failed to write {}", manifest.display()))?;
    tracing::info!(count = icons.len(), manifest = %manifest.display(), "wrote icon manifest");
    Ok(ManifestReport {
        manifest: manifest.to_path_buf(),
        icons,
    })
}
