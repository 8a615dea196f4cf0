//! Tree synchronizer
//!
//! Given a read-only source subtree and a read-write target subtree, computes
//! the create/update/delete operations that make the target identical to the
//! source, then applies them.
//!
//! - **skip**: path/kind exclusion predicates, composed by OR
//! - **set**: classification of two listings into create, delete and update
//!   candidates
//! - **stamp**: cheap change fingerprints (size and modification time)
//! - **diff**: the recursive walk producing an ordered op list
//! - **apply**: the replay of an op list onto the target
//!
//! # Example
//!
//! ```no_run
//! use dsync::{Options, skip};
//! use dsync_fs::{OsFs, RelPath};
//!
//! fn example() -> dsync::Result<()> {
//!     let source = OsFs::new("generated");
//!     let target = OsFs::new("out");
//!     let options = Options::new().skip(skip::name(".git"));
//!     dsync::dir(&source, &RelPath::root(), &target, &RelPath::root(), options)
//! }
//! ```

pub mod apply;
pub mod config;
mod diff;
pub mod error;
pub mod logging;
pub mod op;
pub mod options;
pub mod report;
pub mod set;
pub mod skip;
pub mod stamp;
mod sync;

pub use apply::apply;
pub use config::{SkipConfig, SyncConfig};
pub use error::{Error, Result};
pub use op::{FileContent, Op, OpKind};
pub use options::Options;
pub use report::SyncReport;
pub use set::{Classification, Common, EntrySet, classify};
pub use skip::Skip;
pub use stamp::{Stamp, StampStrategy, stamp};
pub use sync::{dir, plan, sync};
