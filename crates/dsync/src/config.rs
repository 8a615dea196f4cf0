//! Sync configuration file
//!
//! ```toml
//! stamp = "content"
//! dry_run = false
//!
//! [skip]
//! paths = ["bud/generate"]
//! names = ["node_modules"]
//! patterns = ['\.tmp$']
//! hidden = true
//! ```

use std::path::Path;

use dsync_fs::ConfigStore;
use serde::{Deserialize, Serialize};

use crate::options::Options;
use crate::skip::{self, Skip};
use crate::stamp::StampStrategy;
use crate::Result;

/// Exclusion rules read from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkipConfig {
    /// Exact paths relative to the sync root
    pub paths: Vec<String>,
    /// Entry names matched at any depth
    pub names: Vec<String>,
    /// Regular expressions over the full relative path
    pub patterns: Vec<String>,
    /// Skip dot-files and dot-directories
    pub hidden: bool,
}

/// On-disk form of [`Options`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub skip: SkipConfig,
    pub stamp: StampStrategy,
    pub dry_run: bool,
}

impl SyncConfig {
    /// Load from a `.toml`, `.json`, `.yaml` or `.yml` file.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(ConfigStore::new().load(path)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        Ok(ConfigStore::new().save(path, self)?)
    }

    /// Compile into call options.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidSkipPattern`] for a pattern that is
    /// not a valid regular expression.
    pub fn to_options(&self) -> Result<Options> {
        let mut rules = Skip::never();
        for path in &self.skip.paths {
            rules.push(skip::path(path.as_str()));
        }
        for name in &self.skip.names {
            rules.push(skip::name(name.as_str()));
        }
        for pattern in &self.skip.patterns {
            rules.push(skip::regex(pattern)?);
        }
        if self.skip.hidden {
            rules.push(skip::hidden());
        }
        Ok(Options::new()
            .with_skip(rules)
            .stamp(self.stamp)
            .dry_run(self.dry_run))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsync_fs::RelPath;

    #[test]
    fn empty_config_is_default_options() {
        let options = SyncConfig::default().to_options().unwrap();
        assert!(!options.should_skip(&RelPath::new(".git"), true));
        assert_eq!(options.stamp_strategy(), StampStrategy::Metadata);
    }

    #[test]
    fn skip_rules_compile() {
        let config = SyncConfig {
            skip: SkipConfig {
                paths: vec!["bud/generate".into()],
                names: vec!["node_modules".into()],
                patterns: vec![r"\.tmp$".into()],
                hidden: true,
            },
            ..SyncConfig::default()
        };
        let options = config.to_options().unwrap();

        assert!(options.should_skip(&RelPath::new("bud/generate"), true));
        assert!(options.should_skip(&RelPath::new("web/node_modules"), true));
        assert!(options.should_skip(&RelPath::new("a/b.tmp"), false));
        assert!(options.should_skip(&RelPath::new(".git"), true));
        assert!(!options.should_skip(&RelPath::new("bud"), true));
    }
}
