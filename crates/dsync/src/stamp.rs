//! Change stamps
//!
//! A stamp is a cheap, textually comparable fingerprint of one file. Two
//! files are considered unchanged iff their stamps are equal. The default
//! strategy uses size and modification time and never reads file content;
//! a file rewritten with the same size inside the same timestamp tick is
//! missed. [`StampStrategy::Content`] trades that for a full read.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use dsync_fs::{ReadFs, RelPath, checksum};
use serde::{Deserialize, Serialize};

use crate::Result;

const MISSING: &str = "-1:-1";

/// Comparable fingerprint of a single path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stamp(String);

impl Stamp {
    /// The stamp of a path that does not exist.
    pub fn missing() -> Self {
        Self(MISSING.to_string())
    }

    pub fn is_missing(&self) -> bool {
        self.0 == MISSING
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_metadata(size: u64, modified: SystemTime) -> Self {
        Self(format!("{}:{}", size, unix_nanos(modified)))
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Signed nanoseconds relative to the Unix epoch.
fn unix_nanos(time: SystemTime) -> i128 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => after.as_nanos() as i128,
        Err(before) => -(before.duration().as_nanos() as i128),
    }
}

/// How update candidates are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StampStrategy {
    /// `size:mtime_nanos`
    #[default]
    Metadata,
    /// `sha256:<hex>` of the full content
    Content,
}

impl StampStrategy {
    /// Stamp `path` in `fs`. A missing path yields [`Stamp::missing`]; any
    /// other failure is returned.
    pub fn stamp<F: ReadFs + ?Sized>(self, fs: &F, path: &RelPath) -> Result<Stamp> {
        let stamped = match self {
            Self::Metadata => fs
                .stat(path)
                .map(|stat| Stamp::from_metadata(stat.size, stat.modified)),
            Self::Content => checksum::compute_file_checksum(fs, path).map(Stamp),
        };
        match stamped {
            Ok(stamp) => Ok(stamp),
            Err(e) if e.is_not_found() => Ok(Stamp::missing()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Stamp with the default metadata strategy.
pub fn stamp<F: ReadFs + ?Sized>(fs: &F, path: &RelPath) -> Result<Stamp> {
    StampStrategy::Metadata.stamp(fs, path)
}
