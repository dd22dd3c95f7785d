//! Durable storage for the history log.
//!
//! The whole log is serialized on every save; there is no incremental
//! append format.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use chrono::Utc;

use super::history::HistoryEntry;

// ---

pub trait HistoryStore: Send + Sync {
    /// Load the persisted log, or an empty one when nothing was saved yet.
    fn load(&self) -> Result<Vec<HistoryEntry>>;

    /// Replace the persisted log with `entries`.
    fn save(&self, entries: &[HistoryEntry]) -> Result<()>;
}

/// JSON array on disk, rewritten through a temp file and rename.
#[derive(Debug, Clone)]
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move an unreadable log to `<path>.corrupt-<unix ts>` so the next save
    /// cannot overwrite it.
    fn quarantine(&self) -> Result<PathBuf> {
        // ---
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".corrupt-{}", Utc::now().timestamp()));
        let target = PathBuf::from(name);

        fs::rename(&self.path, &target)
            .with_context(|| format!("Failed to move aside {}", self.path.display()))?;
        Ok(target)
    }
}

impl HistoryStore for FileHistoryStore {
    fn load(&self) -> Result<Vec<HistoryEntry>> {
        // ---
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read history file {}", self.path.display()))?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                let moved = self.quarantine()?;
                Err(anyhow!(
                    "Failed to parse history file {} ({}); kept it as {}",
                    self.path.display(),
                    e,
                    moved.display()
                ))
            }
        }
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<()> {
        // ---
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_vec(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

/// Session-only store used when no history file is configured.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> Result<Vec<HistoryEntry>> {
        let guard = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("history store mutex poisoned"))?;
        Ok(guard.clone())
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<()> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("history store mutex poisoned"))?;
        *guard = entries.to_vec();
        Ok(())
    }
}
