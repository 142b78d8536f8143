use std::path::PathBuf;
use std::time::Duration;

use crate::error::StatfindError;

/// The output of a completed walk.
///
/// `paths` and `errors` are both opt-in. Enable them on the builder with
/// `.collect_paths(true)` and `.collect_errors(true)`.
#[derive(Debug)]
pub struct Results {
    /// Number of regular files that passed the filter.
    pub matches: usize,

    /// Paths of matched files, in traversal order.
    /// Only populated if `.collect_paths(true)` was set on the builder.
    pub paths: Vec<PathBuf>,

    /// Number of `-exec` invocations attempted, successful or not.
    pub invocations: usize,

    /// Scan statistics.
    pub stats: ScanStats,

    /// Recoverable errors hit during the walk (unreadable directories,
    /// failed invocations). Only populated if `.collect_errors(true)` was set.
    pub errors: Vec<StatfindError>,
}

/// Counts gathered while walking.
#[derive(Debug, Clone)]
pub struct ScanStats {
    /// Regular files encountered, matched or not.
    pub files: usize,

    /// Directories encountered below the root.
    pub dirs: usize,

    /// Symlinks, devices, sockets and fifos passed over without filtering.
    pub skipped: usize,

    /// Wall-clock time of the walk, including invoked children.
    pub duration: Duration,
}
