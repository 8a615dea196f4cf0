//! The read-only and read-write filesystem capabilities
//!
//! The sync core never assumes a concrete backend: everything it needs from a
//! filesystem is expressed by [`ReadFs`] and [`WriteFs`]. All paths are
//! [`RelPath`]s relative to the root the capability was opened on.

use std::time::SystemTime;

use crate::{RelPath, Result};

/// Mode used when creating directories.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Mode used when writing files.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    File,
    Dir,
}

impl FileKind {
    pub fn is_dir(self) -> bool {
        matches!(self, Self::Dir)
    }
}

/// A single entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: FileKind,
}

impl DirEntry {
    pub fn new(name: impl Into<String>, kind: FileKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, FileKind::File)
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self::new(name, FileKind::Dir)
    }

    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}

/// Metadata returned by [`ReadFs::stat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub kind: FileKind,
    pub size: u64,
    pub modified: SystemTime,
}

/// Read-only filesystem capability.
///
/// Every method fails with [`crate::Error::NotFound`] when the path is absent,
/// and with some other variant for any other failure.
pub trait ReadFs {
    /// List a directory, sorted by entry name.
    fn read_dir(&self, path: &RelPath) -> Result<Vec<DirEntry>>;

    /// Read a file's full contents.
    fn read_file(&self, path: &RelPath) -> Result<Vec<u8>>;

    fn stat(&self, path: &RelPath) -> Result<FileStat>;
}

/// Read-write filesystem capability.
pub trait WriteFs: ReadFs {
    /// Create a directory and all missing ancestors. Idempotent.
    fn mkdir_all(&self, path: &RelPath, mode: u32) -> Result<()>;

    /// Create or truncate the file and write `data` to it.
    fn write_file(&self, path: &RelPath, data: &[u8], mode: u32) -> Result<()>;

    /// Remove the path and everything beneath it. Removing an absent path
    /// succeeds.
    fn remove_all(&self, path: &RelPath) -> Result<()>;

    /// Set a file's modification time.
    fn set_modified(&self, path: &RelPath, modified: SystemTime) -> Result<()>;
}

impl<T: ReadFs + ?Sized> ReadFs for &T {
    fn read_dir(&self, path: &RelPath) -> Result<Vec<DirEntry>> {
        (**self).read_dir(path)
    }

    fn read_file(&self, path: &RelPath) -> Result<Vec<u8>> {
        (**self).read_file(path)
    }

    fn stat(&self, path: &RelPath) -> Result<FileStat> {
        (**self).stat(path)
    }
}

impl<T: WriteFs + ?Sized> WriteFs for &T {
    fn mkdir_all(&self, path: &RelPath, mode: u32) -> Result<()> {
        (**self).mkdir_all(path, mode)
    }

    fn write_file(&self, path: &RelPath, data: &[u8], mode: u32) -> Result<()> {
        (**self).write_file(path, data, mode)
    }

    fn remove_all(&self, path: &RelPath) -> Result<()> {
        (**self).remove_all(path)
    }

    fn set_modified(&self, path: &RelPath, modified: SystemTime) -> Result<()> {
        (**self).set_modified(path, modified)
    }
}
