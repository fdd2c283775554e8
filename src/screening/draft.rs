use super::catalog::ScaleId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Pre-submission snapshot of an in-progress assessment. Never carries
/// derived result fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSnapshot {
    pub scale_id: ScaleId,
    pub current_question_index: usize,
    pub answers: Vec<Option<u8>>,
}

#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("failed to write draft to {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to remove draft at {path}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize draft")]
    Serialize(#[from] serde_json::Error),
}

/// Atomic full-snapshot persistence boundary. A store never surfaces a
/// corrupt draft: anything it cannot read back cleanly loads as `None`.
pub trait DraftStore {
    fn save(&self, snapshot: &DraftSnapshot) -> Result<(), DraftError>;
    fn load(&self) -> Result<Option<DraftSnapshot>, DraftError>;
    fn clear(&self) -> Result<(), DraftError>;
}

/// JSON-on-disk draft store, one draft per path.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    path: PathBuf,
}

impl FileDraftStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DraftStore for FileDraftStore {
    fn save(&self, snapshot: &DraftSnapshot) -> Result<(), DraftError> {
        let payload = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, payload).map_err(|source| DraftError::Write {
            path: self.path.clone(),
            source,
        })
    }

    fn load(&self) -> Result<Option<DraftSnapshot>, DraftError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "draft unreadable, ignoring");
                return Ok(None);
            }
        };

        match serde_json::from_str(&raw) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "draft corrupt, ignoring");
                Ok(None)
            }
        }
    }

    fn clear(&self) -> Result<(), DraftError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(DraftError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// In-memory store holding the raw serialized payload, so tests can exercise
/// the corruption path the same way the file-backed store hits it.
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    slot: Mutex<Option<String>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_raw(&self, payload: impl Into<String>) {
        *self.slot.lock().expect("draft slot lock") = Some(payload.into());
    }
}

impl DraftStore for MemoryDraftStore {
    fn save(&self, snapshot: &DraftSnapshot) -> Result<(), DraftError> {
        let payload = serde_json::to_string(snapshot)?;
        *self.slot.lock().expect("draft slot lock") = Some(payload);
        Ok(())
    }

    fn load(&self) -> Result<Option<DraftSnapshot>, DraftError> {
        let slot = self.slot.lock().expect("draft slot lock");
        let raw = match slot.as_deref() {
            Some(raw) => raw,
            None => return Ok(None),
        };

        match serde_json::from_str(raw) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(err) => {
                warn!(error = %err, "draft corrupt, ignoring");
                Ok(None)
            }
        }
    }

    fn clear(&self) -> Result<(), DraftError> {
        *self.slot.lock().expect("draft slot lock") = None;
        Ok(())
    }
}
