//! Diff engine
//!
//! Walks both trees depth-first, one directory level at a time. For each
//! level the output is creates, then deletes, then the (recursive) updates.
//! A missing target directory is treated as empty. A source file that
//! disappears between listing and reading is dropped without error.

use dsync_fs::{DirEntry, FileKind, ReadFs, RelPath};

use crate::op::{FileContent, Op};
use crate::options::Options;
use crate::set::{Classification, Common, EntrySet, classify};
use crate::{Error, Result};

/// One diff over a source and target subtree.
pub(crate) struct Diff<'a, S: ?Sized, T: ?Sized> {
    options: &'a Options,
    source: &'a S,
    source_root: &'a RelPath,
    target: &'a T,
    target_root: &'a RelPath,
}

impl<'a, S, T> Diff<'a, S, T>
where
    S: ReadFs + ?Sized,
    T: ReadFs + ?Sized,
{
    pub(crate) fn new(
        options: &'a Options,
        source: &'a S,
        source_root: &'a RelPath,
        target: &'a T,
        target_root: &'a RelPath,
    ) -> Self {
        Self {
            options,
            source,
            source_root,
            target,
            target_root,
        }
    }

    /// Produce the ordered op list for the whole subtree.
    pub(crate) fn run(&self) -> Result<Vec<Op>> {
        let entries = match self.source.read_dir(self.source_root) {
            Ok(entries) => entries,
            Err(e) if e.is_not_found() => {
                return Err(Error::SourceRootMissing {
                    path: self.source_root.clone(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        self.diff_level(&RelPath::root(), entries)
    }

    fn diff_dir(&self, dir: &RelPath) -> Result<Vec<Op>> {
        let entries = self.source.read_dir(&self.source_root.join_rel(dir))?;
        self.diff_level(dir, entries)
    }

    fn diff_level(&self, dir: &RelPath, source_entries: Vec<DirEntry>) -> Result<Vec<Op>> {
        let target_entries = match self.target.read_dir(&self.target_root.join_rel(dir)) {
            Ok(entries) => entries,
            Err(e) if e.is_not_found() => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        let Classification {
            creates,
            deletes,
            updates,
        } = classify(
            &EntrySet::new(source_entries),
            &EntrySet::new(target_entries),
        );
        tracing::debug!(
            dir = %dir,
            creates = creates.len(),
            deletes = deletes.len(),
            updates = updates.len(),
            "Diffing directory"
        );

        let mut ops = self.create_ops(dir, &creates)?;
        ops.extend(self.delete_ops(dir, &deletes));
        ops.extend(self.update_ops(dir, &updates)?);
        Ok(ops)
    }

    fn skipped(&self, path: &RelPath, is_dir: bool) -> bool {
        let skip = self.options.should_skip(path, is_dir);
        if skip {
            tracing::trace!(path = %path, is_dir, "Skipping");
        }
        skip
    }

    /// Everything under a create candidate is a create: nothing exists on
    /// the target side, so this is a plain copy walk.
    fn create_ops(&self, dir: &RelPath, entries: &[DirEntry]) -> Result<Vec<Op>> {
        let mut ops = Vec::new();
        for entry in entries {
            let path = dir.join(&entry.name);
            if self.skipped(&path, entry.is_dir()) {
                continue;
            }
            if entry.is_dir() {
                ops.extend(self.create_tree(&path)?);
                continue;
            }
            if let Some(content) = self.read_source(&path)? {
                ops.push(Op::Create { path, content });
            }
        }
        Ok(ops)
    }

    fn create_tree(&self, dir: &RelPath) -> Result<Vec<Op>> {
        let mut children = self.source.read_dir(&self.source_root.join_rel(dir))?;
        children.sort_by(|a, b| a.name.cmp(&b.name));
        self.create_ops(dir, &children)
    }

    /// A directory delete is one op; its contents go with it.
    fn delete_ops(&self, dir: &RelPath, entries: &[DirEntry]) -> Vec<Op> {
        entries
            .iter()
            .map(|entry| (dir.join(&entry.name), entry.is_dir()))
            .filter(|(path, is_dir)| !self.skipped(path, *is_dir))
            .map(|(path, _)| Op::Delete { path })
            .collect()
    }

    fn update_ops(&self, dir: &RelPath, entries: &[Common]) -> Result<Vec<Op>> {
        let mut ops = Vec::new();
        for entry in entries {
            let path = dir.join(&entry.name);
            if self.skipped(&path, entry.source.is_dir()) {
                continue;
            }
            // A kind change removes the target entry, so its kind is checked too
            if entry.kind_changed() && self.skipped(&path, entry.target.is_dir()) {
                continue;
            }
            match (entry.source, entry.target) {
                (FileKind::Dir, FileKind::Dir) => ops.extend(self.diff_dir(&path)?),
                (FileKind::File, FileKind::File) => {
                    if let Some(op) = self.update_file(path)? {
                        ops.push(op);
                    }
                }
                // File became a directory: remove the file, then copy the tree
                (FileKind::Dir, FileKind::File) => {
                    tracing::debug!(path = %path, "Target file replaced by directory");
                    let tree = self.create_tree(&path)?;
                    ops.push(Op::Delete { path });
                    ops.extend(tree);
                }
                // Directory became a file: a create replaces the directory
                (FileKind::File, FileKind::Dir) => {
                    tracing::debug!(path = %path, "Target directory replaced by file");
                    if let Some(content) = self.read_source(&path)? {
                        ops.push(Op::Create { path, content });
                    }
                }
            }
        }
        Ok(ops)
    }

    fn update_file(&self, path: RelPath) -> Result<Option<Op>> {
        let strategy = self.options.stamp_strategy();
        let source_stamp = strategy.stamp(self.source, &self.source_root.join_rel(&path))?;
        let target_stamp = strategy.stamp(self.target, &self.target_root.join_rel(&path))?;
        if source_stamp == target_stamp {
            return Ok(None);
        }
        tracing::trace!(
            path = %path,
            source = %source_stamp,
            target = %target_stamp,
            "Stamps differ"
        );
        Ok(self
            .read_source(&path)?
            .map(|content| Op::Update { path, content }))
    }

    /// Read a source file with its modification time, or `None` if it
    /// vanished after being listed.
    fn read_source(&self, path: &RelPath) -> Result<Option<FileContent>> {
        let native = self.source_root.join_rel(path);
        let read = self.source.stat(&native).and_then(|stat| {
            self.source.read_file(&native).map(|data| FileContent {
                data,
                modified: stat.modified,
            })
        });
        match read {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.is_not_found() => {
                tracing::trace!(path = %path, "Source file vanished, dropping op");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::OpKind;
    use crate::skip;
    use dsync_fs::MemFs;
    use pretty_assertions::assert_eq;

    fn plan(source: &MemFs, target: &MemFs, options: &Options) -> Vec<String> {
        let root = RelPath::root();
        Diff::new(options, source, &root, target, &root)
            .run()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn level_order_is_creates_deletes_updates() {
        let source = MemFs::from_files([("a.txt", "new"), ("sub/x.txt", "changed!")]);
        let target = MemFs::from_files([("old.txt", "gone"), ("sub/x.txt", "before")]);

        assert_eq!(
            plan(&source, &target, &Options::new()),
            vec!["create:a.txt", "delete:old.txt", "update:sub/x.txt"]
        );
    }

    #[test]
    fn missing_target_root_is_empty() {
        let source = MemFs::from_files([("a.txt", "hi")]);
        let target = MemFs::new();
        let options = Options::new();
        let source_root = RelPath::root();
        let target_root = RelPath::new("does/not/exist");

        let ops = Diff::new(&options, &source, &source_root, &target, &target_root)
            .run()
            .unwrap();

        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].kind(), OpKind::Create);
        assert_eq!(ops[0].path().as_str(), "a.txt");
    }

    #[test]
    fn missing_source_root_is_an_error() {
        let source = MemFs::new();
        let target = MemFs::new();
        let options = Options::new();
        let source_root = RelPath::new("nope");
        let target_root = RelPath::root();

        let err = Diff::new(&options, &source, &source_root, &target, &target_root)
            .run()
            .unwrap_err();
        assert!(matches!(err, Error::SourceRootMissing { .. }));
    }

    #[test]
    fn deleted_directory_is_a_single_op() {
        let source = MemFs::new();
        let target = MemFs::from_files([("d/a.txt", "1"), ("d/e/b.txt", "2")]);

        assert_eq!(plan(&source, &target, &Options::new()), vec!["delete:d"]);
    }

    #[test]
    fn skipped_descendant_does_not_protect_deleted_parent() {
        let source = MemFs::new();
        let target = MemFs::from_files([("bud/generate/main.go", "x")]);
        let options = Options::new().skip(skip::path("bud/generate"));

        assert_eq!(plan(&source, &target, &options), vec!["delete:bud"]);
    }

    #[test]
    fn file_to_directory_deletes_then_creates() {
        let source = MemFs::from_files([("x/inner.txt", "in")]);
        let target = MemFs::from_files([("x", "was a file")]);

        assert_eq!(
            plan(&source, &target, &Options::new()),
            vec!["delete:x", "create:x/inner.txt"]
        );
    }

    #[test]
    fn directory_to_file_is_a_single_create() {
        let source = MemFs::from_files([("x", "now a file")]);
        let target = MemFs::from_files([("x/inner.txt", "in")]);

        assert_eq!(plan(&source, &target, &Options::new()), vec!["create:x"]);
    }

    #[test]
    fn skipped_target_directory_survives_change_to_file() {
        let source = MemFs::from_files([("cache", "now a file")]);
        let target = MemFs::from_files([("cache/keep.bin", "keep")]);
        let options = Options::new().skip(skip::dirs(skip::name("cache")));

        assert!(plan(&source, &target, &options).is_empty());
    }

    #[test]
    fn skipped_target_file_survives_change_to_directory() {
        let source = MemFs::from_files([("x/inner.txt", "in")]);
        let target = MemFs::from_files([("x", "protected")]);
        let options =
            Options::new().skip(|path: &RelPath, is_dir: bool| !is_dir && path.as_str() == "x");

        assert!(plan(&source, &target, &options).is_empty());
    }

    #[test]
    fn source_error_other_than_not_found_is_fatal() {
        let source = MemFs::from_files([("secret.txt", "x")]);
        source.deny("secret.txt");
        let target = MemFs::new();
        let options = Options::new();
        let root = RelPath::root();

        let err = Diff::new(&options, &source, &root, &target, &root)
            .run()
            .unwrap_err();
        assert!(!err.is_not_found());
    }
}
