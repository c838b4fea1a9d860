//! Category → MIME type table.

use std::collections::BTreeMap;

/// Read-only mapping from an application category (`web`, `music`, ...) to
/// the MIME types that category owns, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeTable {
    categories: BTreeMap<String, Vec<String>>,
}

impl MimeTable {
    pub fn new(categories: BTreeMap<String, Vec<String>>) -> Self {
        Self { categories }
    }

    /// Table from config when present, otherwise the built-in defaults.
    pub fn from_config(overrides: Option<&BTreeMap<String, Vec<String>>>) -> Self {
        match overrides {
            Some(map) => Self::new(map.clone()),
            None => Self::default(),
        }
    }

    pub fn mime_types(&self, category: &str) -> Option<&[String]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }
}

impl Default for MimeTable {
    fn default() -> Self {
        let entries: [(&str, &[&str]); 9] = [
            ("web", &["x-scheme-handler/http", "x-scheme-handler/https"]),
            ("mail", &["x-scheme-handler/mailto"]),
            ("calendar", &["text/calendar"]),
            (
                "music",
                &["audio/mpeg", "audio/mp3", "audio/wav", "audio/flac", "audio/ogg"],
            ),
            (
                "video",
                &["video/mp4", "video/avi", "video/mkv", "video/webm", "video/ogg"],
            ),
            (
                "photos",
                &["image/jpeg", "image/png", "image/gif", "image/bmp", "image/webp"],
            ),
            (
                "text_editor",
                &["text/plain", "text/x-c", "text/x-c++", "text/x-python", "text/x-java"],
            ),
            ("file_manager", &["inode/directory"]),
            ("terminal", &["application/x-terminal"]),
        ];
        let categories = entries
            .iter()
            .map(|(cat, types)| {
                (
                    cat.to_string(),
                    types.iter().map(|t| t.to_string()).collect(),
                )
            })
            .collect();
        Self { categories }
    }
}
