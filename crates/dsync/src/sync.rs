//! Public entry points

use dsync_fs::{ReadFs, RelPath, WriteFs};

use crate::Result;
use crate::apply::apply;
use crate::diff::Diff;
use crate::op::Op;
use crate::options::Options;
use crate::report::SyncReport;

/// Diff `source_root` in `source` against `target_root` in `target`.
///
/// Returns the ops that would make the target match the source, in level
/// order: creates, then deletes, then recursive updates. Op paths are
/// relative to the two roots.
///
/// # Errors
///
/// Returns [`crate::Error::SourceRootMissing`] if the source root does not
/// exist, or the first filesystem error other than a tolerated `NotFound`.
pub fn plan<S, T>(
    source: &S,
    source_root: &RelPath,
    target: &T,
    target_root: &RelPath,
    options: &Options,
) -> Result<Vec<Op>>
where
    S: ReadFs + ?Sized,
    T: ReadFs + ?Sized,
{
    Diff::new(options, source, source_root, target, target_root).run()
}

/// Plan, then apply unless the options ask for a dry run.
pub fn sync<S, T>(
    source: &S,
    source_root: &RelPath,
    target: &T,
    target_root: &RelPath,
    options: &Options,
) -> Result<SyncReport>
where
    S: ReadFs + ?Sized,
    T: WriteFs + ?Sized,
{
    let ops = plan(source, source_root, target, target_root, options)?;
    let report = SyncReport::from_ops(&ops, options.is_dry_run());

    if options.is_dry_run() {
        tracing::info!(ops = ops.len(), "[dry-run] Would apply changes");
        return Ok(report);
    }

    apply(target, target_root, &ops)?;
    tracing::info!(
        source = %source_root,
        target = %target_root,
        created = report.created.len(),
        updated = report.updated.len(),
        deleted = report.deleted.len(),
        "Synced directory"
    );
    Ok(report)
}

/// Make `target_root` in `target` structurally and content-identical to
/// `source_root` in `source`, honoring the skip rules in `options`.
///
/// The target is left as far as processing got if an error occurs.
pub fn dir<S, T>(
    source: &S,
    source_root: &RelPath,
    target: &T,
    target_root: &RelPath,
    options: Options,
) -> Result<()>
where
    S: ReadFs + ?Sized,
    T: WriteFs + ?Sized,
{
    sync(source, source_root, target, target_root, &options).map(|_| ())
}
