//! Persistence for [`AggregateState`].
//!
//! The whole document is read at the start of a run and written back in full
//! after each ingestion. There is no locking: with two writers against the
//! same store the last save wins.

mod file;
mod memory;

use std::path::PathBuf;

use thiserror::Error;
use vidtrack_core::AggregateState;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("state file {} is not valid JSON: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Read-whole / write-whole access to the aggregate document.
pub trait StateStore {
    /// Load the stored state. A store that has never been written returns
    /// `AggregateState::default()`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if existing data cannot be read or decoded.
    fn load(&self) -> Result<AggregateState, StoreError>;

    /// Replace the stored state with `state`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the state cannot be encoded or written.
    fn save(&self, state: &AggregateState) -> Result<(), StoreError>;
}
