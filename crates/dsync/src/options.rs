//! Per-call sync configuration

use dsync_fs::RelPath;

use crate::skip::Skip;
use crate::stamp::StampStrategy;

/// Options for one sync call.
///
/// Built once before the call and passed down the recursion read-only.
/// The default never skips, compares metadata stamps and applies changes.
#[derive(Debug, Clone, Default)]
pub struct Options {
    skip: Skip,
    stamp: StampStrategy,
    dry_run: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude paths matching `predicate`. Repeated calls accumulate: a path
    /// is skipped when any predicate matches.
    pub fn skip<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&RelPath, bool) -> bool + Send + Sync + 'static,
    {
        self.skip.push(predicate);
        self
    }

    /// Exclude paths matching any of `predicates`.
    pub fn skip_all<I, F>(self, predicates: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Fn(&RelPath, bool) -> bool + Send + Sync + 'static,
    {
        self.with_skip(predicates.into_iter().collect())
    }

    /// Merge a prebuilt [`Skip`] into the current one.
    pub fn with_skip(mut self, skip: Skip) -> Self {
        self.skip = std::mem::take(&mut self.skip).or(skip);
        self
    }

    pub fn stamp(mut self, strategy: StampStrategy) -> Self {
        self.stamp = strategy;
        self
    }

    /// Plan without touching the target.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn should_skip(&self, path: &RelPath, is_dir: bool) -> bool {
        self.skip.should_skip(path, is_dir)
    }

    pub fn stamp_strategy(&self) -> StampStrategy {
        self.stamp
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}
