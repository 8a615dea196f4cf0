//! On-disk backend

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::io::{self, RobustnessConfig};
use crate::{DirEntry, Error, FileKind, FileStat, ReadFs, RelPath, Result, WriteFs};

/// A filesystem capability over a directory on disk.
///
/// Every [`RelPath`] is resolved beneath `root`; paths that walk upwards
/// are rejected with [`Error::InvalidPath`]. Symlinks are followed.
#[derive(Debug, Clone)]
pub struct OsFs {
    root: PathBuf,
    robustness: RobustnessConfig,
}

impl OsFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            robustness: RobustnessConfig::default(),
        }
    }

    /// Create an OsFs with custom write robustness settings.
    pub fn with_robustness(root: impl Into<PathBuf>, robustness: RobustnessConfig) -> Self {
        Self {
            root: root.into(),
            robustness,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative path to a native path under the root.
    pub fn resolve(&self, path: &RelPath) -> Result<PathBuf> {
        if !path.is_contained() {
            return Err(Error::InvalidPath { path: path.into() });
        }
        Ok(path.to_native(&self.root))
    }
}

fn entry_kind(entry: &fs::DirEntry) -> std::io::Result<FileKind> {
    let file_type = entry.file_type()?;
    if file_type.is_symlink() {
        // Dangling links list as files; reading them reports NotFound later
        return Ok(match fs::metadata(entry.path()) {
            Ok(meta) if meta.is_dir() => FileKind::Dir,
            _ => FileKind::File,
        });
    }
    Ok(if file_type.is_dir() {
        FileKind::Dir
    } else {
        FileKind::File
    })
}

impl ReadFs for OsFs {
    fn read_dir(&self, path: &RelPath) -> Result<Vec<DirEntry>> {
        let native = self.resolve(path)?;
        let mut entries = Vec::new();
        for entry in fs::read_dir(&native).map_err(|e| Error::io(&native, e))? {
            let entry = entry.map_err(|e| Error::io(&native, e))?;
            let kind = entry_kind(&entry).map_err(|e| Error::io(entry.path(), e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            entries.push(DirEntry::new(name, kind));
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read_file(&self, path: &RelPath) -> Result<Vec<u8>> {
        let native = self.resolve(path)?;
        fs::read(&native).map_err(|e| Error::io(&native, e))
    }

    fn stat(&self, path: &RelPath) -> Result<FileStat> {
        let native = self.resolve(path)?;
        let meta = fs::metadata(&native).map_err(|e| Error::io(&native, e))?;
        let modified = meta.modified().map_err(|e| Error::io(&native, e))?;
        Ok(FileStat {
            kind: if meta.is_dir() {
                FileKind::Dir
            } else {
                FileKind::File
            },
            size: meta.len(),
            modified,
        })
    }
}

impl WriteFs for OsFs {
    fn mkdir_all(&self, path: &RelPath, mode: u32) -> Result<()> {
        let native = self.resolve(path)?;
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(mode);
        }
        #[cfg(not(unix))]
        let _ = mode;
        builder.create(&native).map_err(|e| Error::io(&native, e))
    }

    fn write_file(&self, path: &RelPath, data: &[u8], mode: u32) -> Result<()> {
        let native = self.resolve(path)?;
        if native.is_dir() {
            return Err(Error::IsADirectory { path: native });
        }
        io::write_atomic(&native, data, self.robustness)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&native, fs::Permissions::from_mode(mode))
                .map_err(|e| Error::io(&native, e))?;
        }
        #[cfg(not(unix))]
        let _ = mode;
        Ok(())
    }

    fn remove_all(&self, path: &RelPath) -> Result<()> {
        let native = self.resolve(path)?;
        let meta = match fs::symlink_metadata(&native) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::trace!(path = %path, "Nothing to remove");
                return Ok(());
            }
            Err(e) => return Err(Error::io(&native, e)),
        };
        let removed = if meta.is_dir() {
            fs::remove_dir_all(&native)
        } else {
            fs::remove_file(&native)
        };
        match removed {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::trace!(path = %path, "Removed concurrently");
                Ok(())
            }
            Err(e) => Err(Error::io(&native, e)),
        }
    }

    fn set_modified(&self, path: &RelPath, modified: SystemTime) -> Result<()> {
        let native = self.resolve(path)?;
        let file = fs::File::options()
            .write(true)
            .open(&native)
            .map_err(|e| Error::io(&native, e))?;
        file.set_modified(modified)
            .map_err(|e| Error::io(&native, e))
    }
}
