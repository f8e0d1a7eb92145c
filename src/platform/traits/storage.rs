//! Record storage interface trait
//!
//! Append-only file storage for telemetry records (an SD card in flight).
//! The telemetry log opens, writes, flushes, and closes for every record so
//! a power loss between ticks costs at most one line.

use crate::platform::Result;

/// Open file handle for appending one record
///
/// The handle is deliberately single-use: the caller writes one line,
/// flushes, and closes. No handle outlives a scheduler tick.
pub trait FileHandle {
    /// Append bytes to the file
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Storage(StorageError::WriteFailed)` if the
    /// write cannot complete. This is fatal to the caller.
    fn write_all(&mut self, data: &[u8]) -> Result<()>;

    /// Flush buffered data to the underlying medium
    fn flush(&mut self) -> Result<()>;

    /// Release the file resource
    ///
    /// Consumes the handle; any data not yet flushed may be lost.
    fn close(self) -> Result<()>;
}

/// Record storage interface trait
///
/// Platform implementations must provide append access to named files,
/// creating a file on first open.
pub trait StorageInterface {
    /// File handle type produced by this storage backend
    type File: FileHandle;

    /// Open `path` for appending, creating it if absent
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Storage(StorageError::OpenFailed)` if the
    /// file cannot be opened or created. This is fatal to the caller.
    fn open_append(&mut self, path: &str) -> Result<Self::File>;
}
