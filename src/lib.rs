//! # statfind
//!
//! Recursive file finder: walk a directory tree, keep the regular files whose
//! metadata passes a set of predicates, print each match and optionally run
//! a program on it.
//!
//! The pieces are a [`Source`] that yields entries depth-first (the
//! filesystem one is [`DirectorySource`]), a [`Matcher`] that decides which
//! regular files are reported (the predicate set is [`FileFilter`]), and an
//! [`Invoker`] that runs one program per match.
//!
//! # Quick Start
//!
//! ```rust
//! use statfind::{Source, Entry, EntryKind, StatfindError, FileFilter};
//!
//! // A minimal in-memory source for demonstration
//! struct NameSource(Vec<&'static str>);
//!
//! impl Source for NameSource {
//!     fn walk(&self) -> Box<dyn Iterator<Item = Result<Entry, StatfindError>>> {
//!         let entries = self.0.iter().map(|name| Ok(Entry {
//!             path: name.into(),
//!             name: name.into(),
//!             kind: EntryKind::File,
//!             ino:  None,
//!         })).collect::<Vec<_>>();
//!         Box::new(entries.into_iter())
//!     }
//! }
//!
//! let results = statfind::search()
//!     .source(NameSource(vec!["report.txt", "notes.md", "report.txt"]))
//!     .filter(FileFilter { name: Some("report.txt".into()), ..Default::default() })
//!     .output(std::io::sink())
//!     .collect_paths(true)
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(results.matches, 2);
//! ```
//!
//! # Command line
//!
//! The `statfind` binary accepts
//! `<root> [-inum N] [-name S] [-size [+|-|=]N] [-nlinks N] [-exec PATH]`;
//! [`Command::parse`] turns that vector into a [`SearchConfig`] which
//! [`SearchBuilder::config`] applies.

#![forbid(unsafe_code)]

pub mod engine;

mod args;
mod builder;
mod entry;
mod error;
mod filter;
mod invoke;
mod results;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use args::{Command, SearchConfig, USAGE};
pub use builder::SearchBuilder;
pub use engine::DirectorySource;
pub use entry::{Entry, EntryKind};
pub use error::StatfindError;
pub use filter::{FileFilter, SizeCmp, SizeFilter};
pub use invoke::{invoke, Invoker};
pub use results::{Results, ScanStats};
pub use traits::{Matcher, Source};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`SearchBuilder`] to configure and run a walk.
///
/// # Example
///
/// ```rust,no_run
/// let results = statfind::search()
///     .root("/tmp")
///     .collect_paths(true)
///     .run()
///     .unwrap();
///
/// println!("{} regular files", results.matches);
/// ```
pub fn search() -> SearchBuilder {
    SearchBuilder::default()
}
