//! Filesystem capabilities for dsync
//!
//! Provides the read-only and read-write capabilities the sync core consumes,
//! plus the backends that implement them (on-disk, in-memory and overlay).

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod mem;
pub mod os;
pub mod overlay;
pub mod path;
pub mod traits;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use io::RobustnessConfig;
pub use mem::MemFs;
pub use os::OsFs;
pub use overlay::OverlayFs;
pub use path::RelPath;
pub use traits::{
    DEFAULT_DIR_MODE, DEFAULT_FILE_MODE, DirEntry, FileKind, FileStat, ReadFs, WriteFs,
};
