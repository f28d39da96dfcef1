//! Persisted record slot.
//!
//! Holds at most one record, stored as TOML in `~/.didcard/record.toml`.
//! The slot is overwritten on every successful encode, decode, or import
//! and cleared only by explicit user action. Callers never lock or
//! transact against it: every write happens on the single control-flow
//! path after the triggering operation has fully succeeded.

use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::record::Record;

/// Errors that can occur when accessing the record slot.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Config directory not found. Unable to determine home directory.")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// The external key-value slot contract: read, overwrite, clear.
pub trait RecordStore {
    /// Read the stored record, if any.
    fn read(&self) -> Result<Option<Record>, StoreError>;

    /// Overwrite the slot with a record.
    fn write(&mut self, record: &Record) -> Result<(), StoreError>;

    /// Clear the slot. A no-op if the slot is already empty.
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// File-backed slot under the user's home directory.
pub struct FileRecordStore {
    path: PathBuf,
}

impl FileRecordStore {
    /// Open the default slot at `~/.didcard/record.toml`.
    pub fn open_default() -> Result<Self, StoreError> {
        let home = dirs::home_dir().ok_or(StoreError::NoConfigDir)?;
        Ok(Self {
            path: home.join(".didcard").join("record.toml"),
        })
    }

    /// Open a slot at an explicit path.
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// The slot's file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl RecordStore for FileRecordStore {
    fn read(&self) -> Result<Option<Record>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let record = toml::from_str(&content)?;
        Ok(Some(record))
    }

    fn write(&mut self, record: &Record) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(record)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-memory slot, for tests and ephemeral use.
#[derive(Default)]
pub struct MemoryStore {
    slot: Option<Record>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn read(&self) -> Result<Option<Record>, StoreError> {
        Ok(self.slot.clone())
    }

    fn write(&mut self, record: &Record) -> Result<(), StoreError> {
        self.slot = Some(record.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.slot = None;
        Ok(())
    }
}
