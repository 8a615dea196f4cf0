//! Sync operations

use std::fmt;
use std::time::SystemTime;

use dsync_fs::RelPath;
use serde::Serialize;

/// The kind of an [`Op`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Create,
    Update,
    Delete,
}

impl OpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full content of a source file, with the modification time it had when
/// it was read.
#[derive(Clone, PartialEq, Eq)]
pub struct FileContent {
    pub data: Vec<u8>,
    pub modified: SystemTime,
}

impl fmt::Debug for FileContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileContent")
            .field("len", &self.data.len())
            .field("modified", &self.modified)
            .finish()
    }
}

/// One change to the target, keyed by a path relative to the sync root.
///
/// Ops are produced by the diff and consumed once by apply. A single diff
/// never yields two ops for the same path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// Write a file that does not exist on the target yet, creating its
    /// ancestors. Replaces whatever occupies the path.
    Create { path: RelPath, content: FileContent },
    /// Overwrite an existing target file.
    Update { path: RelPath, content: FileContent },
    /// Remove the path and everything beneath it.
    Delete { path: RelPath },
}

impl Op {
    pub fn kind(&self) -> OpKind {
        match self {
            Self::Create { .. } => OpKind::Create,
            Self::Update { .. } => OpKind::Update,
            Self::Delete { .. } => OpKind::Delete,
        }
    }

    pub fn path(&self) -> &RelPath {
        match self {
            Self::Create { path, .. } | Self::Update { path, .. } | Self::Delete { path } => path,
        }
    }

    /// File bytes for creates and updates; `None` for deletes.
    pub fn data(&self) -> Option<&[u8]> {
        self.content().map(|c| c.data.as_slice())
    }

    pub fn content(&self) -> Option<&FileContent> {
        match self {
            Self::Create { content, .. } | Self::Update { content, .. } => Some(content),
            Self::Delete { .. } => None,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_kind_then_path() {
        let op = Op::Delete {
            path: RelPath::new("a/b.txt"),
        };
        assert_eq!(op.to_string(), "delete:a/b.txt");
        assert_eq!(op.data(), None);
    }

    #[test]
    fn create_carries_data() {
        let op = Op::Create {
            path: RelPath::new("a.txt"),
            content: FileContent {
                data: b"hi".to_vec(),
                modified: SystemTime::UNIX_EPOCH,
            },
        };
        assert_eq!(op.kind(), OpKind::Create);
        assert_eq!(op.data(), Some(&b"hi"[..]));
    }
}
