// ── JSON state file ──
//
// Durable stand-in for the controller's overview tables between
// process runs. Each save writes a uniquely named sibling temp file and
// renames it into place. Processes sharing a file serialize their
// load-apply-save cycles through a `<state>.lock` sidecar.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs4::fs_std::FileExt;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use super::rows::BucketRow;
use super::state::OverviewState;
use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateFile {
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub rows: Vec<BucketRow>,
}

impl StateFile {
    /// Snapshot the rows of `state` as of now.
    pub fn capture(state: &OverviewState) -> Self {
        Self {
            saved_at: Utc::now(),
            rows: state.rows(),
        }
    }

    /// Replace the contents of `state` with the saved rows.
    pub fn apply(&self, state: &OverviewState) -> Result<usize, CoreError> {
        state.restore_rows(&self.rows)
    }

    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path).map_err(|e| persistence(path, &e))?;
        let file: Self = serde_json::from_str(&raw)?;
        debug!(path = %path.display(), rows = file.rows.len(), "loaded state file");
        Ok(file)
    }

    /// Like [`load`](Self::load), but a missing file is `None`.
    pub fn load_if_exists(path: &Path) -> Result<Option<Self>, CoreError> {
        if path.exists() {
            Self::load(path).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        let dir = parent_dir(path)?;
        let json = serde_json::to_string_pretty(self)?;
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| persistence(dir, &e))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| persistence(tmp.path(), &e))?;
        tmp.persist(path).map_err(|e| persistence(path, &e.error))?;
        debug!(path = %path.display(), rows = self.rows.len(), "saved state file");
        Ok(())
    }
}

// ── Cross-process lock ───────────────────────────────────────────────

/// Exclusive hold on a state file for one load-apply-save cycle.
///
/// Backed by an OS file lock on `<state>.lock`; other holders of the same
/// state path block in [`acquire`](Self::acquire) until this guard drops.
#[derive(Debug)]
pub struct StateLock {
    file: File,
    path: PathBuf,
}

impl StateLock {
    pub fn acquire(state_path: &Path) -> Result<Self, CoreError> {
        parent_dir(state_path)?;
        let path = lock_path(state_path);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| persistence(&path, &e))?;
        file.lock_exclusive().map_err(|e| persistence(&path, &e))?;
        debug!(path = %path.display(), "acquired state lock");
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StateLock {
    fn drop(&mut self) {
        // Closing the descriptor releases the lock as well.
        let _ = FileExt::unlock(&self.file);
        debug!(path = %self.path.display(), "released state lock");
    }
}

fn lock_path(state_path: &Path) -> PathBuf {
    let mut name = state_path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

/// Directory holding `path`, created if missing.
fn parent_dir(path: &Path) -> Result<&Path, CoreError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| persistence(dir, &e))?;
    Ok(dir)
}

fn persistence(path: &Path, err: &std::io::Error) -> CoreError {
    CoreError::Persistence {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
