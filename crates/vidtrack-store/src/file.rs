use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use vidtrack_core::AggregateState;

use crate::{StateStore, StoreError};

/// Stores the aggregate as one pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<AggregateState, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no state file yet; starting empty");
                return Ok(AggregateState::default());
            }
            Err(e) => return Err(self.io_err(e)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            tracing::warn!(path = %self.path.display(), "state file is empty; starting empty");
            return Ok(AggregateState::default());
        }

        let state: AggregateState =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(
            path = %self.path.display(),
            scrapes = state.all_scrapes.len(),
            videos = state.video_history.len(),
            "loaded state"
        );
        Ok(state)
    }

    fn save(&self, state: &AggregateState) -> Result<(), StoreError> {
        let encoded = serde_json::to_vec_pretty(state)?;

        // A bare file name has an empty parent; write next to it in the cwd.
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| self.io_err(e))?;

        // Write a sibling temp file and rename it over the target so readers
        // never see a half-written document.
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.io_err(e))?;
        tmp.write_all(&encoded).map_err(|e| self.io_err(e))?;
        tmp.as_file().sync_all().map_err(|e| self.io_err(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_err(e.error))?;

        tracing::info!(
            path = %self.path.display(),
            bytes = encoded.len(),
            "state saved"
        );
        Ok(())
    }
}
