//! Apply engine
//!
//! Replays an op list onto the target in order. Nothing here reads target
//! state; every decision was made by the diff. The first error aborts the
//! replay and earlier ops are not undone.

use dsync_fs::{DEFAULT_DIR_MODE, DEFAULT_FILE_MODE, RelPath, WriteFs};

use crate::Result;
use crate::op::{FileContent, Op};

/// Apply `ops` beneath `target_root`, stopping at the first error.
pub fn apply<T: WriteFs + ?Sized>(target: &T, target_root: &RelPath, ops: &[Op]) -> Result<()> {
    for op in ops {
        tracing::debug!(op = %op, "Applying");
        apply_op(target, target_root, op)?;
    }
    Ok(())
}

fn apply_op<T: WriteFs + ?Sized>(target: &T, target_root: &RelPath, op: &Op) -> Result<()> {
    let path = target_root.join_rel(op.path());
    match op {
        Op::Create { content, .. } => {
            if let Some(parent) = path.parent() {
                target.mkdir_all(&parent, DEFAULT_DIR_MODE)?;
            }
            // Clears a directory left behind by a kind change
            target.remove_all(&path)?;
            write(target, &path, content)
        }
        Op::Update { content, .. } => write(target, &path, content),
        Op::Delete { .. } => Ok(target.remove_all(&path)?),
    }
}

fn write<T: WriteFs + ?Sized>(target: &T, path: &RelPath, content: &FileContent) -> Result<()> {
    target.write_file(path, &content.data, DEFAULT_FILE_MODE)?;
    target.set_modified(path, content.modified)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsync_fs::{FileKind, MemFs, ReadFs};
    use std::time::{Duration, UNIX_EPOCH};

    fn content(data: &str) -> FileContent {
        FileContent {
            data: data.as_bytes().to_vec(),
            modified: UNIX_EPOCH + Duration::from_secs(10),
        }
    }

    #[test]
    fn create_makes_ancestors_and_keeps_mtime() {
        let target = MemFs::new();
        let ops = vec![Op::Create {
            path: RelPath::new("a/b/c.txt"),
            content: content("hi"),
        }];

        apply(&target, &RelPath::root(), &ops).unwrap();

        assert_eq!(target.kind("a/b"), Some(FileKind::Dir));
        assert_eq!(target.contents("a/b/c.txt"), Some(b"hi".to_vec()));
        let stat = target.stat(&RelPath::new("a/b/c.txt")).unwrap();
        assert_eq!(stat.modified, UNIX_EPOCH + Duration::from_secs(10));
        assert_eq!(target.mode("a/b/c.txt"), Some(DEFAULT_FILE_MODE));
    }

    #[test]
    fn create_replaces_a_directory() {
        let target = MemFs::from_files([("x/inner.txt", "in")]);
        let ops = vec![Op::Create {
            path: RelPath::new("x"),
            content: content("file"),
        }];

        apply(&target, &RelPath::root(), &ops).unwrap();

        assert_eq!(target.contents("x"), Some(b"file".to_vec()));
        assert!(!target.exists("x/inner.txt"));
    }

    #[test]
    fn delete_of_absent_path_is_ok() {
        let target = MemFs::new();
        let ops = vec![Op::Delete {
            path: RelPath::new("never/there"),
        }];

        apply(&target, &RelPath::root(), &ops).unwrap();
    }

    #[test]
    fn ops_resolve_under_target_root() {
        let target = MemFs::new();
        let ops = vec![Op::Create {
            path: RelPath::new("a.txt"),
            content: content("hi"),
        }];

        apply(&target, &RelPath::new("out"), &ops).unwrap();

        assert_eq!(target.contents("out/a.txt"), Some(b"hi".to_vec()));
    }

    #[test]
    fn first_error_stops_the_replay() {
        let target = MemFs::new();
        target.deny("b.txt");
        let ops = vec![
            Op::Create {
                path: RelPath::new("a.txt"),
                content: content("a"),
            },
            Op::Create {
                path: RelPath::new("b.txt"),
                content: content("b"),
            },
            Op::Create {
                path: RelPath::new("c.txt"),
                content: content("c"),
            },
        ];

        assert!(apply(&target, &RelPath::root(), &ops).is_err());
        assert!(target.exists("a.txt"));
        assert!(!target.exists("c.txt"));
    }
}
