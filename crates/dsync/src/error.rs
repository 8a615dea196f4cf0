//! Error types for dsync

use dsync_fs::RelPath;

/// Result type for dsync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while diffing or applying
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source root cannot be listed because it does not exist
    #[error("Source root not found: {path}")]
    SourceRootMissing { path: RelPath },

    /// A skip pattern from configuration is not a valid regular expression
    #[error("Invalid skip pattern {pattern:?}: {source}")]
    InvalidSkipPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Filesystem error from a capability
    #[error(transparent)]
    Fs(#[from] dsync_fs::Error),
}

impl Error {
    /// True when the underlying capability reported a missing path.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Fs(e) => e.is_not_found(),
            Self::SourceRootMissing { .. } => true,
            Self::InvalidSkipPattern { .. } => false,
        }
    }
}
