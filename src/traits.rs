use crate::entry::Entry;
use crate::error::StatfindError;

/// A source of entries to walk through.
///
/// [`DirectorySource`](crate::DirectorySource) is the filesystem
/// implementation; tests and embedders can supply their own.
///
/// # Ordering
///
/// Entries are yielded in traversal order. The engine prints matches in the
/// order it receives them, so a depth-first source produces depth-first
/// output.
///
/// # Error Handling
///
/// Recoverable errors (permission denied, unreadable directories) should be
/// yielded as `Err(StatfindError)` and the walk continued past them. The
/// engine reports each one and collects it into [`Results::errors`] when
/// `.collect_errors(true)` is set.
///
/// [`Results::errors`]: crate::Results::errors
///
/// # Example
///
/// ```rust
/// use statfind::{Source, Entry, EntryKind, StatfindError};
///
/// struct VecSource(Vec<String>);
///
/// impl Source for VecSource {
///     fn walk(&self) -> Box<dyn Iterator<Item = Result<Entry, StatfindError>>> {
///         let entries = self.0.iter().map(|name| Ok(Entry {
///             path: name.into(),
///             name: name.into(),
///             kind: EntryKind::File,
///             ino:  None,
///         })).collect::<Vec<_>>();
///         Box::new(entries.into_iter())
///     }
/// }
/// ```
pub trait Source {
    /// Traverse the source and yield entries.
    fn walk(&self) -> Box<dyn Iterator<Item = Result<Entry, StatfindError>>>;
}

/// Determines whether a regular file is a match.
///
/// The engine only consults the matcher for [`EntryKind::File`] entries.
///
/// [`EntryKind::File`]: crate::EntryKind::File
///
/// # Example
///
/// ```rust
/// use statfind::{Matcher, Entry};
///
/// struct ExtensionMatcher(String);
///
/// impl Matcher for ExtensionMatcher {
///     fn is_match(&self, entry: &Entry) -> bool {
///         entry.path
///             .extension()
///             .map(|e| e.eq_ignore_ascii_case(&self.0))
///             .unwrap_or(false)
///     }
/// }
/// ```
pub trait Matcher {
    /// Returns `true` if this entry should be reported.
    fn is_match(&self, entry: &Entry) -> bool;
}
