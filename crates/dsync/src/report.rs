//! Summary of a sync call

use std::fmt;

use dsync_fs::RelPath;
use serde::Serialize;

use crate::op::{Op, OpKind};

/// What a sync call did, or would have done in dry-run mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// True when the ops were planned but not applied
    pub dry_run: bool,
    pub created: Vec<RelPath>,
    pub updated: Vec<RelPath>,
    pub deleted: Vec<RelPath>,
    /// Every op in plan order, as `kind:path`
    #[serde(skip)]
    entries: Vec<(OpKind, RelPath)>,
}

impl SyncReport {
    pub(crate) fn from_ops(ops: &[Op], dry_run: bool) -> Self {
        let mut report = Self {
            dry_run,
            ..Self::default()
        };
        for op in ops {
            let path = op.path().clone();
            match op.kind() {
                OpKind::Create => report.created.push(path.clone()),
                OpKind::Update => report.updated.push(path.clone()),
                OpKind::Delete => report.deleted.push(path.clone()),
            }
            report.entries.push((op.kind(), path));
        }
        report
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of ops.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Ops in plan order.
    pub fn entries(&self) -> impl Iterator<Item = (OpKind, &RelPath)> {
        self.entries.iter().map(|(kind, path)| (*kind, path))
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (kind, path) in &self.entries {
            writeln!(f, "{}:{}", kind, path)?;
        }
        Ok(())
    }
}
