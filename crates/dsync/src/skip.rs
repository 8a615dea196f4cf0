//! Path exclusion predicates
//!
//! A [`Skip`] is a set of predicates over `(path, is_dir)` composed with a
//! short-circuiting OR: a path is excluded when any predicate returns true.
//! Predicates see only the path relative to the sync root and its kind,
//! never filesystem state.
//!
//! Skip as high in the tree as possible. Skipping a directory prevents
//! recursion into it entirely; skipping only a descendant does not stop the
//! descendant's parent from being deleted when the parent is absent from
//! the source and not itself skipped.

use std::fmt;
use std::sync::Arc;

use dsync_fs::RelPath;
use regex::Regex;

use crate::{Error, Result};

type Predicate = dyn Fn(&RelPath, bool) -> bool + Send + Sync;

/// OR-composition of skip predicates. Empty means "never skip".
#[derive(Clone, Default)]
pub struct Skip {
    rules: Vec<Arc<Predicate>>,
}

impl Skip {
    /// A configuration that excludes nothing.
    pub fn never() -> Self {
        Self::default()
    }

    pub fn from_fn<F>(predicate: F) -> Self
    where
        F: Fn(&RelPath, bool) -> bool + Send + Sync + 'static,
    {
        Self {
            rules: vec![Arc::new(predicate)],
        }
    }

    /// Add a predicate to the composition.
    pub fn push<F>(&mut self, predicate: F)
    where
        F: Fn(&RelPath, bool) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Arc::new(predicate));
    }

    /// Compose with another skip: the result excludes what either excludes.
    pub fn or(mut self, other: Skip) -> Self {
        self.rules.extend(other.rules);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn should_skip(&self, path: &RelPath, is_dir: bool) -> bool {
        self.rules.iter().any(|rule| rule(path, is_dir))
    }
}

impl fmt::Debug for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Skip")
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl<F> FromIterator<F> for Skip
where
    F: Fn(&RelPath, bool) -> bool + Send + Sync + 'static,
{
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        let mut skip = Skip::never();
        for predicate in iter {
            skip.push(predicate);
        }
        skip
    }
}

/// Skip exactly this path, whatever its kind.
pub fn path(path: impl Into<RelPath>) -> impl Fn(&RelPath, bool) -> bool + Send + Sync + 'static {
    let path = path.into();
    move |candidate: &RelPath, _: bool| *candidate == path
}

/// Skip every entry with this name, at any depth.
pub fn name(name: impl Into<String>) -> impl Fn(&RelPath, bool) -> bool + Send + Sync + 'static {
    let name = name.into();
    move |candidate: &RelPath, _: bool| candidate.file_name() == Some(name.as_str())
}

/// Skip dot-files and dot-directories.
pub fn hidden() -> impl Fn(&RelPath, bool) -> bool + Send + Sync + 'static {
    |candidate: &RelPath, _: bool| {
        candidate
            .file_name()
            .is_some_and(|name| name.starts_with('.'))
    }
}

/// Skip only directories matching the inner predicate.
pub fn dirs<F>(predicate: F) -> impl Fn(&RelPath, bool) -> bool + Send + Sync + 'static
where
    F: Fn(&RelPath, bool) -> bool + Send + Sync + 'static,
{
    move |candidate: &RelPath, is_dir: bool| is_dir && predicate(candidate, is_dir)
}

/// Skip paths whose full relative path matches a regular expression.
///
/// # Errors
///
/// Returns [`Error::InvalidSkipPattern`] if the pattern does not compile.
pub fn regex(pattern: &str) -> Result<impl Fn(&RelPath, bool) -> bool + Send + Sync + 'static> {
    let re = Regex::new(pattern).map_err(|source| Error::InvalidSkipPattern {
        pattern: pattern.to_string(),
        source,
    })?;
    Ok(move |candidate: &RelPath, _: bool| re.is_match(candidate.as_str()))
}
