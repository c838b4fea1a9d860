//! Default applications via `xdg-mime`.
//!
//! The category table is fixed at construction (`MimeTable`); commands go
//! through a `CommandRunner` so tests never touch the real MIME database.

mod runner;
mod table;

pub use runner::{CommandOutput, CommandRunner, SystemRunner};
pub use table::MimeTable;

use anyhow::{bail, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

const XDG_MIME: &str = "xdg-mime";
const DESKTOP_SUFFIX: &str = ".desktop";

/// Outcome of registering one MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeResult {
    pub mime_type: String,
    pub ok: bool,
    /// stderr of the failed command.
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SetReport {
    pub category: String,
    pub desktop_file: String,
    pub results: Vec<MimeResult>,
}

impl SetReport {
    pub fn set_count(&self) -> usize {
        self.results.iter().filter(|r| r.ok).count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// At least one type now points at the desktop file.
    pub fn any_set(&self) -> bool {
        self.set_count() > 0
    }
}

/// Appends `.desktop` when missing.
pub fn desktop_file_name(name: &str) -> String {
    if name.ends_with(DESKTOP_SUFFIX) {
        name.to_string()
    } else {
        format!("{}{}", name, DESKTOP_SUFFIX)
    }
}

/// Directories searched for `.desktop` entries, user directory first.
pub fn application_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::with_capacity(3);
    if let Ok(xdg_dirs) = xdg::BaseDirectories::new() {
        dirs.push(xdg_dirs.get_data_home().join("applications"));
    }
    dirs.push(PathBuf::from("/usr/share/applications"));
    dirs.push(PathBuf::from("/usr/local/share/applications"));
    dirs
}

pub struct DefaultAppSetter<R> {
    table: MimeTable,
    runner: R,
}

impl<R: CommandRunner> DefaultAppSetter<R> {
    pub fn new(table: MimeTable, runner: R) -> Self {
        Self { table, runner }
    }

    pub fn table(&self) -> &MimeTable {
        &self.table
    }

    fn mime_types(&self, category: &str) -> Result<&[String]> {
        match self.table.mime_types(category) {
            Some(types) => Ok(types),
            None => bail!(
                "unknown category '{}' (available: {})",
                category,
                self.table.categories().collect::<Vec<_>>().join(", ")
            ),
        }
    }

    /// Runs `xdg-mime default <desktop> <mime>` for every type in `category`.
    pub fn set_default(&self, category: &str, desktop_file: &str) -> Result<SetReport> {
        let types = self.mime_types(category)?;
        if desktop_file.trim().is_empty() {
            bail!("no desktop file specified for category '{}'", category);
        }
        let desktop = desktop_file_name(desktop_file.trim());

        let results = types
            .iter()
            .map(|mime| {
                let out = self
                    .runner
                    .run(XDG_MIME, &["default", desktop.as_str(), mime.as_str()]);
                if out.success {
                    tracing::info!(mime = mime.as_str(), desktop = desktop.as_str(), "set default");
                } else {
                    tracing::warn!(mime = mime.as_str(), "xdg-mime default failed: {}", out.stderr);
                }
                MimeResult {
                    mime_type: mime.clone(),
                    ok: out.success,
                    error: (!out.success).then_some(out.stderr),
                }
            })
            .collect();

        Ok(SetReport {
            category: category.to_string(),
            desktop_file: desktop,
            results,
        })
    }

    /// Current handler of the category's first MIME type.
    pub fn current_default(&self, category: &str) -> Result<Option<String>> {
        let types = self.mime_types(category)?;
        let Some(first) = types.first() else {
            return Ok(None);
        };
        let out = self.runner.run(XDG_MIME, &["query", "default", first.as_str()]);
        if out.success && !out.stdout.is_empty() {
            Ok(Some(out.stdout))
        } else {
            Ok(None)
        }
    }
}

/// Sorted, de-duplicated `.desktop` basenames found in `dirs`.
pub fn list_available_apps(dirs: &[PathBuf]) -> Vec<String> {
    let mut apps = BTreeSet::new();
    for dir in dirs {
        let Ok(entries) = fs::read_dir(dir) else {
            continue;
        };
        for entry in entries.flatten() {
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(DESKTOP_SUFFIX) {
                    apps.insert(name.to_string());
                }
            }
        }
    }
    apps.into_iter().collect()
}
