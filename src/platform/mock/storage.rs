//! Mock record storage implementation for testing
//!
//! In-memory file map with failure injection for exercising the fatal
//! storage paths.

use crate::platform::{
    error::{PlatformError, StorageError},
    traits::{FileHandle, StorageInterface},
    Result,
};
use core::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::string::{String, ToString};
use std::vec::Vec;

type FileMap = Rc<RefCell<HashMap<String, Vec<u8>>>>;

/// Mock storage implementation
///
/// Simulates an SD card as a map of file name to byte content. Supports
/// injecting open and write failures to test the unrecoverable-halt policy.
///
/// # Example
///
/// ```
/// use stratolink::platform::mock::MockStorage;
/// use stratolink::platform::traits::{FileHandle, StorageInterface};
///
/// let mut storage = MockStorage::new();
/// let mut file = storage.open_append("DOFDATA.CSV").unwrap();
/// file.write_all(b"1,2,3\n").unwrap();
/// file.flush().unwrap();
/// file.close().unwrap();
///
/// assert_eq!(storage.contents("DOFDATA.CSV").unwrap(), b"1,2,3\n");
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: FileMap,
    fail_open: bool,
    fail_write: bool,
}

impl MockStorage {
    /// Create a new mock storage with no files
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `open_append` calls fail
    pub fn inject_open_failure(&mut self) {
        self.fail_open = true;
    }

    /// Make subsequent writes through open handles fail
    pub fn inject_write_failure(&mut self) {
        self.fail_write = true;
    }

    /// Get file contents (for test verification)
    pub fn contents(&self, path: &str) -> Option<Vec<u8>> {
        self.files.borrow().get(path).cloned()
    }

    /// Get file contents as lines (for test verification)
    pub fn lines(&self, path: &str) -> Vec<String> {
        match self.contents(path) {
            Some(bytes) => String::from_utf8_lossy(&bytes)
                .lines()
                .map(|l| l.to_string())
                .collect(),
            None => Vec::new(),
        }
    }
}

impl StorageInterface for MockStorage {
    type File = MockFile;

    fn open_append(&mut self, path: &str) -> Result<Self::File> {
        if self.fail_open {
            return Err(PlatformError::Storage(StorageError::OpenFailed));
        }
        // Creating the entry on open mirrors create-if-absent semantics
        self.files
            .borrow_mut()
            .entry(path.to_string())
            .or_default();
        Ok(MockFile {
            files: Rc::clone(&self.files),
            path: path.to_string(),
            fail_write: self.fail_write,
        })
    }
}

/// Open handle into a [`MockStorage`] file
#[derive(Debug)]
pub struct MockFile {
    files: FileMap,
    path: String,
    fail_write: bool,
}

impl FileHandle for MockFile {
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        if self.fail_write {
            return Err(PlatformError::Storage(StorageError::WriteFailed));
        }
        let mut files = self.files.borrow_mut();
        let file = files
            .get_mut(&self.path)
            .ok_or(PlatformError::Storage(StorageError::WriteFailed))?;
        file.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        // In-memory storage is always flushed
        Ok(())
    }

    fn close(self) -> Result<()> {
        Ok(())
    }
}
