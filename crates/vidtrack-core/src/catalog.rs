use std::ffi::OsStr;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};
use walkdir::{DirEntry, WalkDir};

use crate::progress::ProgressRecord;
use crate::Result;

/// File extensions (without the dot) that are picked up as videos.
/// Matched as an ASCII case-insensitive suffix of the file name, so a file
/// named just `.mp4` counts too.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp4"];

/// A playable file under the media root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// File name, shown in the UI
    pub name: String,
    /// Path relative to the media root, always `/`-separated
    pub path: String,
    pub completed: bool,
}

impl Video {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            completed: false,
        }
    }

    fn from_entry(root: &Path, entry: &DirEntry) -> Option<Self> {
        if entry.file_type().is_dir() || !has_supported_extension(entry.file_name()) {
            return None;
        }
        let path = relative_identity(root, entry.path())?;
        let name = entry.file_name().to_string_lossy().to_string();
        Some(Self::new(name, path))
    }
}

fn has_supported_extension(file_name: &OsStr) -> bool {
    let name = file_name.to_string_lossy().to_ascii_lowercase();
    SUPPORTED_EXTENSIONS
        .iter()
        .any(|ext| name.strip_suffix(ext).is_some_and(|stem| stem.ends_with('.')))
}

/// Identity of `path` relative to `root`: its normal components joined
/// with `/` regardless of the host separator.
///
/// Returns `None` when `path` is not under `root` or is `root` itself.
pub fn relative_identity(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Ordered list of the videos found at the last scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    videos: Vec<Video>,
}

impl Catalog {
    pub fn new(videos: Vec<Video>) -> Self {
        Self { videos }
    }

    /// Scan `root` recursively for videos.
    ///
    /// Walk errors (including a missing root) are logged and end the scan;
    /// whatever was found before the error is kept.
    pub fn scan(root: &Path) -> Self {
        let (videos, error) = walk(root);
        if let Some(e) = error {
            tracing::error!(root = %root.display(), "Error walking media directory: {}", e);
        }
        Self { videos }
    }

    /// Like [`Catalog::scan`], but the first walk error is returned.
    pub fn try_scan(root: &Path) -> Result<Self> {
        match walk(root) {
            (_, Some(e)) => Err(e.into()),
            (videos, None) => Ok(Self { videos }),
        }
    }

    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.videos.iter().filter(|v| v.completed).count()
    }

    pub fn get(&self, path: &str) -> Option<&Video> {
        self.videos.iter().find(|v| v.path == path)
    }

    /// Adopt saved completion flags.
    ///
    /// Each video takes the flag of the first record with the same path.
    /// Records that match nothing are ignored.
    pub fn apply_progress(&mut self, records: &[ProgressRecord]) {
        for video in &mut self.videos {
            if let Some(record) = records.iter().find(|r| r.path == video.path) {
                video.completed = record.completed;
            }
        }
    }

    /// Flip the completed flag of the video at `path`.
    ///
    /// Returns the new flag, or `None` if no video has that path.
    pub fn toggle(&mut self, path: &str) -> Option<bool> {
        let video = self.videos.iter_mut().find(|v| v.path == path)?;
        video.completed = !video.completed;
        Some(video.completed)
    }
}

fn walk(root: &Path) -> (Vec<Video>, Option<walkdir::Error>) {
    let mut videos = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        match entry {
            Ok(entry) => videos.extend(Video::from_entry(root, &entry)),
            Err(e) => return (videos, Some(e)),
        }
    }
    (videos, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    fn paths(catalog: &Catalog) -> Vec<&str> {
        catalog.videos().iter().map(|v| v.path.as_str()).collect()
    }

    #[test]
    fn scan_keeps_only_matching_files() {
        let tmp = TempDir::new().unwrap();
        for name in ["a.mp4", "b.mp4", "c.MP4"] {
            touch(tmp.path(), name);
        }
        for name in ["notes.txt", "cover.jpg", "mp4", "clip.mp4.part"] {
            touch(tmp.path(), name);
        }

        let catalog = Catalog::scan(tmp.path());
        assert_eq!(catalog.len(), 3);
        assert!(catalog.videos().iter().all(|v| !v.completed));
    }

    #[test]
    fn scan_matches_on_name_suffix() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), ".mp4");
        touch(tmp.path(), "x.mp4");
        touch(tmp.path(), "xmp4");

        let catalog = Catalog::scan(tmp.path());
        assert_eq!(paths(&catalog), vec![".mp4", "x.mp4"]);
    }

    #[test]
    fn scan_descends_and_uses_forward_slashes() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "01-intro/welcome.mp4");
        touch(tmp.path(), "02-basics/deeper/lesson.mp4");
        touch(tmp.path(), "top.mp4");

        let catalog = Catalog::scan(tmp.path());
        assert_eq!(
            paths(&catalog),
            vec!["01-intro/welcome.mp4", "02-basics/deeper/lesson.mp4", "top.mp4"]
        );

        let lesson = catalog.get("02-basics/deeper/lesson.mp4").unwrap();
        assert_eq!(lesson.name, "lesson.mp4");
    }

    #[test]
    fn scan_skips_directories_named_like_videos() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("folder.mp4")).unwrap();
        touch(tmp.path(), "folder.mp4/inner.mp4");

        let catalog = Catalog::scan(tmp.path());
        assert_eq!(paths(&catalog), vec!["folder.mp4/inner.mp4"]);
    }

    #[test]
    fn scan_of_missing_root_is_empty() {
        let tmp = TempDir::new().unwrap();
        let catalog = Catalog::scan(&tmp.path().join("nope"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn try_scan_of_missing_root_errors() {
        let tmp = TempDir::new().unwrap();
        assert!(Catalog::try_scan(&tmp.path().join("nope")).is_err());
    }

    #[test]
    fn relative_identity_strips_root() {
        let root = Path::new("videos");
        assert_eq!(
            relative_identity(root, &root.join("a").join("b.mp4")).as_deref(),
            Some("a/b.mp4")
        );
        assert_eq!(relative_identity(root, root), None);
        assert_eq!(relative_identity(root, Path::new("elsewhere/b.mp4")), None);
    }

    #[test]
    fn apply_progress_ignores_unknown_paths() {
        let mut catalog = Catalog::new(vec![Video::new("a.mp4", "a.mp4")]);
        catalog.apply_progress(&[
            ProgressRecord::new("ghost.mp4", "ghost.mp4", true),
            ProgressRecord::new("a.mp4", "a.mp4", true),
        ]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("a.mp4").unwrap().completed);
        assert!(catalog.get("ghost.mp4").is_none());
    }

    #[test]
    fn apply_progress_sets_every_saved_flag() {
        let mut catalog = Catalog::new(vec![
            Video::new("a.mp4", "a.mp4"),
            Video::new("b.mp4", "s/b.mp4"),
            Video::new("c.mp4", "c.mp4"),
        ]);
        catalog.apply_progress(&[
            ProgressRecord::new("a.mp4", "a.mp4", true),
            ProgressRecord::new("b.mp4", "s/b.mp4", false),
            ProgressRecord::new("c.mp4", "c.mp4", true),
        ]);
        let flags: Vec<bool> = catalog.videos().iter().map(|v| v.completed).collect();
        assert_eq!(flags, vec![true, false, true]);
        assert_eq!(catalog.completed_count(), 2);
    }

    #[test]
    fn apply_progress_uses_first_matching_record() {
        let mut catalog = Catalog::new(vec![Video::new("a.mp4", "a.mp4")]);
        catalog.apply_progress(&[
            ProgressRecord::new("a.mp4", "a.mp4", true),
            ProgressRecord::new("a.mp4", "a.mp4", false),
        ]);
        assert!(catalog.get("a.mp4").unwrap().completed);
    }

    #[test]
    fn apply_progress_is_case_sensitive() {
        let mut catalog = Catalog::new(vec![Video::new("A.mp4", "A.mp4")]);
        catalog.apply_progress(&[ProgressRecord::new("a.mp4", "a.mp4", true)]);
        assert!(!catalog.get("A.mp4").unwrap().completed);
    }

    #[test]
    fn double_toggle_restores_flag() {
        let mut catalog = Catalog::new(vec![Video::new("a.mp4", "a.mp4")]);
        assert_eq!(catalog.toggle("a.mp4"), Some(true));
        assert_eq!(catalog.toggle("a.mp4"), Some(false));
        assert!(!catalog.get("a.mp4").unwrap().completed);
    }

    #[test]
    fn toggle_unknown_path_changes_nothing() {
        let mut catalog = Catalog::new(vec![
            Video::new("a.mp4", "a.mp4"),
            Video::new("b.mp4", "b.mp4"),
        ]);
        catalog.toggle("b.mp4");
        let before = catalog.clone();

        assert_eq!(catalog.toggle("missing.mp4"), None);
        assert_eq!(catalog, before);
    }
}
