//! Wallpaper output directory.
//!
//! Files are written to `<name>.part` and renamed into place so a crash or a
//! failed write never leaves a truncated JPEG under its final name (which the
//! existing-file check would then treat as done).

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Path for the temp file: appends `.part` to the final path.
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(".part");
    PathBuf::from(o)
}

#[derive(Debug, Clone)]
pub struct WallpaperStore {
    dir: PathBuf,
}

impl WallpaperStore {
    /// Opens `dir`, creating it (and parents) if absent.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_file()
    }

    /// Writes `bytes` under `name` atomically. Returns the final path.
    pub fn save(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let final_path = self.path_for(name);
        let tmp = temp_path(&final_path);
        let mut file = fs::File::create(&tmp)
            .with_context(|| format!("failed to create {}", tmp.display()))?;
        let written = file.write_all(bytes).and_then(|()| file.sync_all());
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e).with_context(|| format!("failed to write {}", tmp.display()));
        }
        drop(file);
        fs::rename(&tmp, &final_path).with_context(|| {
            format!(
                "failed to rename {} to {}",
                tmp.display(),
                final_path.display()
            )
        })?;
        Ok(final_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("/tmp/a.jpg"));
        assert_eq!(p.to_string_lossy(), "/tmp/a.jpg.part");
    }

    #[test]
    fn open_creates_nested_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("Pictures").join("Wallpapers");
        let store = WallpaperStore::open(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(store.dir(), dir.as_path());
    }

    #[test]
    fn save_then_exists() {
        let tmp = tempfile::tempdir().unwrap();
        let store = WallpaperStore::open(tmp.path()).unwrap();
        assert!(!store.exists("a.jpg"));
        let path = store.save("a.jpg", b"jpeg").unwrap();
        assert!(store.exists("a.jpg"));
        assert!(!temp_path(&path).exists());
        assert_eq!(fs::read(path).unwrap(), b"jpeg");
    }

    #[test]
    fn leftover_part_file_is_not_a_wallpaper() {
        let tmp = tempfile::tempdir().unwrap();
        let store = WallpaperStore::open(tmp.path()).unwrap();
        fs::write(temp_path(&store.path_for("a.jpg")), b"half").unwrap();
        assert!(!store.exists("a.jpg"));
    }
}
