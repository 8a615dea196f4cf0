//! Entry set algebra over one directory level
//!
//! Entries are compared by name only. Every name present in either listing
//! lands in exactly one of creates, deletes or updates; each list comes out
//! sorted by name so the diff is deterministic.

use std::collections::BTreeMap;

use dsync_fs::{DirEntry, FileKind};

/// Name-keyed, name-ordered set of directory entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntrySet {
    entries: BTreeMap<String, FileKind>,
}

/// A name present on both sides, with the kind seen on each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Common {
    pub name: String,
    pub source: FileKind,
    pub target: FileKind,
}

impl Common {
    /// The name changed between file and directory.
    pub fn kind_changed(&self) -> bool {
        self.source != self.target
    }
}

/// Result of classifying a source listing against a target listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Present in the source only
    pub creates: Vec<DirEntry>,
    /// Present in the target only
    pub deletes: Vec<DirEntry>,
    /// Present on both sides
    pub updates: Vec<Common>,
}

impl EntrySet {
    pub fn new(entries: impl IntoIterator<Item = DirEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (e.name, e.kind)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn kind(&self, name: &str) -> Option<FileKind> {
        self.entries.get(name).copied()
    }

    /// Entries of `self` whose name is absent from `other`.
    pub fn difference(&self, other: &EntrySet) -> Vec<DirEntry> {
        self.entries
            .iter()
            .filter(|(name, _)| !other.contains(name))
            .map(|(name, kind)| DirEntry::new(name.clone(), *kind))
            .collect()
    }

    /// Names present in both sets, with `self` as the source side.
    pub fn intersection(&self, other: &EntrySet) -> Vec<Common> {
        self.entries
            .iter()
            .filter_map(|(name, source)| {
                other.kind(name).map(|target| Common {
                    name: name.clone(),
                    source: *source,
                    target,
                })
            })
            .collect()
    }

    /// Every entry, sorted by name.
    pub fn list(&self) -> Vec<DirEntry> {
        self.entries
            .iter()
            .map(|(name, kind)| DirEntry::new(name.clone(), *kind))
            .collect()
    }
}

impl FromIterator<DirEntry> for EntrySet {
    fn from_iter<I: IntoIterator<Item = DirEntry>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Split two listings into create, delete and update candidates.
pub fn classify(source: &EntrySet, target: &EntrySet) -> Classification {
    Classification {
        creates: source.difference(target),
        deletes: target.difference(source),
        updates: source.intersection(target),
    }
}
