//! In-memory backend

use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use parking_lot::RwLock;

use crate::{
    DEFAULT_DIR_MODE, DEFAULT_FILE_MODE, DirEntry, Error, FileKind, FileStat, ReadFs, RelPath,
    Result, WriteFs,
};

#[derive(Debug, Clone)]
enum Node {
    Dir {
        mode: u32,
        modified: SystemTime,
    },
    File {
        data: Vec<u8>,
        mode: u32,
        modified: SystemTime,
    },
}

impl Node {
    fn kind(&self) -> FileKind {
        match self {
            Node::Dir { .. } => FileKind::Dir,
            Node::File { .. } => FileKind::File,
        }
    }
}

#[derive(Debug)]
struct Inner {
    /// Keyed by the normalized path string; the root is `""`.
    nodes: BTreeMap<String, Node>,
    /// Logical clock, advanced by every mutation.
    clock: u64,
    denied: BTreeSet<String>,
}

impl Inner {
    fn tick(&mut self) -> SystemTime {
        self.clock += 1;
        UNIX_EPOCH + Duration::from_millis(self.clock)
    }

    fn check_denied(&self, path: &RelPath) -> Result<()> {
        if self.denied.contains(path.as_str()) {
            return Err(Error::Io {
                path: path.into(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            });
        }
        Ok(())
    }

    fn get(&self, path: &RelPath) -> Result<&Node> {
        self.check_denied(path)?;
        self.nodes
            .get(path.as_str())
            .ok_or_else(|| Error::not_found(path.as_str()))
    }

    /// Ensure every ancestor of `path` (and `path` itself) is a directory,
    /// replacing files on the way. Used by the infallible seeding helpers.
    fn force_dirs(&mut self, path: &RelPath) {
        let mut current = RelPath::root();
        for component in path.components() {
            current = current.join(component);
            let is_dir = matches!(self.nodes.get(current.as_str()), Some(Node::Dir { .. }));
            if !is_dir {
                self.remove_subtree(&current);
                let modified = self.tick();
                self.nodes.insert(
                    current.as_str().to_string(),
                    Node::Dir {
                        mode: DEFAULT_DIR_MODE,
                        modified,
                    },
                );
            }
        }
    }

    fn remove_subtree(&mut self, path: &RelPath) {
        if path.is_root() {
            self.nodes.retain(|key, _| key.is_empty());
            return;
        }
        let prefix = format!("{}/", path.as_str());
        self.nodes.remove(path.as_str());
        self.nodes.retain(|key, _| !key.starts_with(&prefix));
    }
}

/// A filesystem capability held entirely in memory.
///
/// Modification times come from a logical clock that advances by one
/// millisecond per mutation, so two writes never share a timestamp and
/// tests stay deterministic.
#[derive(Debug)]
pub struct MemFs {
    inner: RwLock<Inner>,
}

impl Default for MemFs {
    fn default() -> Self {
        Self::new()
    }
}

impl MemFs {
    /// Create an empty filesystem containing only the root directory.
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(
            String::new(),
            Node::Dir {
                mode: DEFAULT_DIR_MODE,
                modified: UNIX_EPOCH,
            },
        );
        Self {
            inner: RwLock::new(Inner {
                nodes,
                clock: 0,
                denied: BTreeSet::new(),
            }),
        }
    }

    /// Build a filesystem from `(path, content)` pairs.
    pub fn from_files<I, P, C>(files: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsRef<str>,
        C: AsRef<[u8]>,
    {
        files
            .into_iter()
            .fold(Self::new(), |fs, (path, content)| fs.file(path.as_ref(), content))
    }

    /// Seed a file, creating (or replacing with) directories above it.
    pub fn file(self, path: &str, content: impl AsRef<[u8]>) -> Self {
        let path = RelPath::new(path);
        {
            let mut inner = self.inner.write();
            if let Some(parent) = path.parent() {
                inner.force_dirs(&parent);
            }
            inner.remove_subtree(&path);
            let modified = inner.tick();
            inner.nodes.insert(
                path.as_str().to_string(),
                Node::File {
                    data: content.as_ref().to_vec(),
                    mode: DEFAULT_FILE_MODE,
                    modified,
                },
            );
        }
        self
    }

    /// Seed a directory and its ancestors.
    pub fn dir(self, path: &str) -> Self {
        self.inner.write().force_dirs(&RelPath::new(path));
        self
    }

    /// Make every access to `path` fail with a permission error.
    pub fn deny(&self, path: &str) {
        self.inner
            .write()
            .denied
            .insert(RelPath::new(path).as_str().to_string());
    }

    /// Contents of a file, or `None` when absent or a directory.
    pub fn contents(&self, path: &str) -> Option<Vec<u8>> {
        match self.inner.read().nodes.get(RelPath::new(path).as_str()) {
            Some(Node::File { data, .. }) => Some(data.clone()),
            _ => None,
        }
    }

    pub fn kind(&self, path: &str) -> Option<FileKind> {
        self.inner
            .read()
            .nodes
            .get(RelPath::new(path).as_str())
            .map(Node::kind)
    }

    pub fn exists(&self, path: &str) -> bool {
        self.kind(path).is_some()
    }

    /// Mode recorded for a path.
    pub fn mode(&self, path: &str) -> Option<u32> {
        self.inner
            .read()
            .nodes
            .get(RelPath::new(path).as_str())
            .map(|node| match node {
                Node::Dir { mode, .. } | Node::File { mode, .. } => *mode,
            })
    }

    /// Every path below the root, directories included, in sorted order.
    pub fn paths(&self) -> Vec<RelPath> {
        self.inner
            .read()
            .nodes
            .keys()
            .filter(|key| !key.is_empty())
            .map(|key| RelPath::new(key.as_str()))
            .collect()
    }

    /// Every file with its contents, in sorted order.
    pub fn files(&self) -> Vec<(RelPath, Vec<u8>)> {
        self.inner
            .read()
            .nodes
            .iter()
            .filter_map(|(key, node)| match node {
                Node::File { data, .. } => Some((RelPath::new(key.as_str()), data.clone())),
                Node::Dir { .. } => None,
            })
            .collect()
    }
}

impl ReadFs for MemFs {
    fn read_dir(&self, path: &RelPath) -> Result<Vec<DirEntry>> {
        let inner = self.inner.read();
        match inner.get(path)? {
            Node::Dir { .. } => {}
            Node::File { .. } => return Err(Error::NotADirectory { path: path.into() }),
        }
        let prefix = if path.is_root() {
            String::new()
        } else {
            format!("{}/", path.as_str())
        };
        let entries = inner
            .nodes
            .range::<String, _>(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .filter_map(|(key, node)| {
                let name = &key[prefix.len()..];
                if name.is_empty() || name.contains('/') {
                    return None;
                }
                Some(DirEntry::new(name, node.kind()))
            })
            .collect();
        Ok(entries)
    }

    fn read_file(&self, path: &RelPath) -> Result<Vec<u8>> {
        match self.inner.read().get(path)? {
            Node::File { data, .. } => Ok(data.clone()),
            Node::Dir { .. } => Err(Error::IsADirectory { path: path.into() }),
        }
    }

    fn stat(&self, path: &RelPath) -> Result<FileStat> {
        Ok(match self.inner.read().get(path)? {
            Node::File { data, modified, .. } => FileStat {
                kind: FileKind::File,
                size: data.len() as u64,
                modified: *modified,
            },
            Node::Dir { modified, .. } => FileStat {
                kind: FileKind::Dir,
                size: 0,
                modified: *modified,
            },
        })
    }
}

impl WriteFs for MemFs {
    fn mkdir_all(&self, path: &RelPath, mode: u32) -> Result<()> {
        let mut inner = self.inner.write();
        inner.check_denied(path)?;
        let mut current = RelPath::root();
        for component in path.components() {
            current = current.join(component);
            let existing = inner.nodes.get(current.as_str()).map(Node::kind);
            match existing {
                Some(FileKind::Dir) => continue,
                Some(FileKind::File) => {
                    return Err(Error::NotADirectory {
                        path: (&current).into(),
                    });
                }
                None => {
                    let modified = inner.tick();
                    inner
                        .nodes
                        .insert(current.as_str().to_string(), Node::Dir { mode, modified });
                }
            }
        }
        Ok(())
    }

    fn write_file(&self, path: &RelPath, data: &[u8], mode: u32) -> Result<()> {
        let mut inner = self.inner.write();
        inner.check_denied(path)?;
        let parent = path
            .parent()
            .ok_or_else(|| Error::IsADirectory { path: path.into() })?;
        match inner.nodes.get(parent.as_str()) {
            Some(Node::Dir { .. }) => {}
            Some(Node::File { .. }) => {
                return Err(Error::NotADirectory {
                    path: (&parent).into(),
                });
            }
            None => return Err(Error::not_found(parent.as_str())),
        }
        if let Some(Node::Dir { .. }) = inner.nodes.get(path.as_str()) {
            return Err(Error::IsADirectory { path: path.into() });
        }
        let modified = inner.tick();
        inner.nodes.insert(
            path.as_str().to_string(),
            Node::File {
                data: data.to_vec(),
                mode,
                modified,
            },
        );
        Ok(())
    }

    fn remove_all(&self, path: &RelPath) -> Result<()> {
        let mut inner = self.inner.write();
        inner.check_denied(path)?;
        inner.remove_subtree(path);
        Ok(())
    }

    fn set_modified(&self, path: &RelPath, modified: SystemTime) -> Result<()> {
        let mut inner = self.inner.write();
        inner.check_denied(path)?;
        match inner.nodes.get_mut(path.as_str()) {
            Some(Node::File { modified: m, .. }) | Some(Node::Dir { modified: m, .. }) => {
                *m = modified;
                Ok(())
            }
            None => Err(Error::not_found(path.as_str())),
        }
    }
}
