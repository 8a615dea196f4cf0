//! Root-relative path handling

use std::path::{Path, PathBuf};

/// A slash-separated path relative to a filesystem root.
///
/// All paths handed to the capabilities are relative to the root the
/// capability was opened on. Internally the path always uses forward slashes
/// and carries no empty or `.` components; conversion to a platform-native
/// path happens only at I/O boundaries via [`RelPath::to_native`].
///
/// The root itself is the empty path and displays as `.`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelPath {
    inner: String,
}

impl RelPath {
    /// The root of a filesystem.
    pub fn root() -> Self {
        Self::default()
    }

    /// Create a new RelPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes, drops empty and `.`
    /// components and strips any leading slash.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::from_str_lossy(&path.as_ref().to_string_lossy())
    }

    fn from_str_lossy(raw: &str) -> Self {
        let normalized = raw.replace('\\', "/");
        let inner = normalized
            .split('/')
            .filter(|c| !c.is_empty() && *c != ".")
            .collect::<Vec<_>>()
            .join("/");
        Self { inner }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    pub fn is_root(&self) -> bool {
        self.inner.is_empty()
    }

    /// Join this path with a single entry name or a relative sub-path.
    pub fn join(&self, segment: &str) -> Self {
        let tail = Self::from_str_lossy(segment);
        self.join_rel(&tail)
    }

    /// Join this path with another relative path.
    pub fn join_rel(&self, other: &RelPath) -> Self {
        if self.is_root() {
            return other.clone();
        }
        if other.is_root() {
            return self.clone();
        }
        Self {
            inner: format!("{}/{}", self.inner, other.inner),
        }
    }

    /// Get the parent directory. The parent of a top-level entry is the root;
    /// the root has no parent.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        match self.inner.rfind('/') {
            Some(idx) => Some(Self {
                inner: self.inner[..idx].to_string(),
            }),
            None => Some(Self::root()),
        }
    }

    /// Get the last component.
    pub fn file_name(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }
        self.inner.rsplit('/').next()
    }

    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.inner.split('/').filter(|c| !c.is_empty())
    }

    /// False when any component walks upwards (`..`).
    pub fn is_contained(&self) -> bool {
        self.components().all(|c| c != "..")
    }

    /// Whether `self` equals `base` or lies beneath it.
    pub fn starts_with(&self, base: &RelPath) -> bool {
        self.strip_prefix(base).is_some()
    }

    /// Return the remainder of `self` below `base`.
    pub fn strip_prefix(&self, base: &RelPath) -> Option<Self> {
        if base.is_root() {
            return Some(self.clone());
        }
        if self.inner == base.inner {
            return Some(Self::root());
        }
        self.inner
            .strip_prefix(&base.inner)
            .and_then(|rest| rest.strip_prefix('/'))
            .map(|rest| Self {
                inner: rest.to_string(),
            })
    }

    /// Resolve against a native base directory for I/O.
    pub fn to_native(&self, base: &Path) -> PathBuf {
        let mut native = base.to_path_buf();
        for component in self.components() {
            native.push(component);
        }
        native
    }
}

impl AsRef<Path> for RelPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for RelPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_root() {
            write!(f, ".")
        } else {
            write!(f, "{}", self.inner)
        }
    }
}

impl From<&str> for RelPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RelPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&Path> for RelPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

impl From<PathBuf> for RelPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&RelPath> for PathBuf {
    fn from(p: &RelPath) -> Self {
        PathBuf::from(&p.inner)
    }
}

impl serde::Serialize for RelPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner)
    }
}
