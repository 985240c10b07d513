//! Durable storage backends
//!
//! The store only needs to read one text record at startup and overwrite it
//! after every change. [`FileBackend`] keeps it in a JSON file;
//! [`MemoryBackend`] keeps it in memory for tests and embedding.

use std::path::PathBuf;

use crate::config::paths::TrackerPaths;
use crate::error::{ExpenseError, ExpenseResult};

use super::file_io::{read_text_opt, write_atomic};

/// Holds the serialized state record
pub trait StateBackend {
    /// Read the raw record, `None` if nothing has been stored
    fn read(&self) -> ExpenseResult<Option<String>>;

    /// Replace the stored record
    fn write(&mut self, contents: &str) -> ExpenseResult<()>;
}

/// State record kept in a single JSON file
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Backend at the default state file location
    pub fn from_paths(paths: &TrackerPaths) -> Self {
        Self::new(paths.state_file())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl StateBackend for FileBackend {
    fn read(&self) -> ExpenseResult<Option<String>> {
        read_text_opt(&self.path)
    }

    fn write(&mut self, contents: &str) -> ExpenseResult<()> {
        write_atomic(&self.path, contents)
    }
}

/// State record kept in memory
///
/// Counts writes, and can be told to fail them to exercise error paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    contents: Option<String>,
    writes: usize,
    fail_writes: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that already holds `contents`
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
            ..Self::default()
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Make every following write fail (or succeed again)
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl StateBackend for MemoryBackend {
    fn read(&self) -> ExpenseResult<Option<String>> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: &str) -> ExpenseResult<()> {
        if self.fail_writes {
            return Err(ExpenseError::Storage("write rejected".into()));
        }
        self.contents = Some(contents.to_string());
        self.writes += 1;
        Ok(())
    }
}
