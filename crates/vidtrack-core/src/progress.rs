use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Video};
use crate::Result;

/// Current progress file format version.
///
/// Version 1 is a bare JSON array of [`ProgressRecord`]s keyed by `path`.
pub const PROGRESS_SCHEMA_VERSION: u32 = 1;

/// Saved completion state for one video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    #[serde(default)]
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub completed: bool,
}

impl ProgressRecord {
    pub fn new(name: impl Into<String>, path: impl Into<String>, completed: bool) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            completed,
        }
    }
}

impl From<&Video> for ProgressRecord {
    fn from(video: &Video) -> Self {
        Self::new(video.name.clone(), video.path.clone(), video.completed)
    }
}

/// JSON file holding the completed flag of every video in the catalog
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read saved records. A missing file is not an error.
    pub fn read(&self) -> Result<Vec<ProgressRecord>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    /// Read saved records, treating any failure as "no progress yet".
    pub fn load(&self) -> Vec<ProgressRecord> {
        self.read().unwrap_or_else(|e| {
            tracing::error!(path = %self.path.display(), "Error loading progress file: {}", e);
            Vec::new()
        })
    }

    /// Overwrite the file with the state of every video in `catalog`.
    ///
    /// Records for videos that are no longer in the catalog are dropped.
    /// The new content goes to a sibling temp file first and is renamed
    /// into place, so a failed write leaves the old file untouched.
    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        let records: Vec<ProgressRecord> = catalog.videos().iter().map(Into::into).collect();
        let content = serde_json::to_string_pretty(&records)?;

        let tmp = self.temp_path();
        if let Err(e) = fs::write(&tmp, content).and_then(|()| fs::rename(&tmp, &self.path)) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}
