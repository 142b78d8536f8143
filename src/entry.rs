use std::ffi::OsString;
use std::path::PathBuf;

/// A single item produced by a [`Source`](crate::traits::Source) during traversal.
///
/// Entries carry only what enumeration yields for free: the name, the
/// entry-type tag and (on most filesystems) the inode number. Size and link
/// count need a `stat()` and are fetched by matchers that ask for them.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Full path: the parent path joined with `name`.
    pub path: PathBuf,

    /// The entry's base name, byte for byte as the OS returned it.
    pub name: OsString,

    /// What kind of entry this is, as reported by enumeration.
    pub kind: EntryKind,

    /// Inode number from the directory entry itself, if the source knows it.
    pub ino: Option<u64>,
}

/// The kind of a traversed entry.
///
/// Symlinks are reported as themselves and never resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,

    /// A directory.
    Dir,

    /// A symbolic link.
    Symlink,

    /// Anything else (device files, pipes, sockets, etc.).
    Other,
}

impl EntryKind {
    pub(crate) fn from_file_type(ft: std::fs::FileType) -> Self {
        if ft.is_dir() {
            Self::Dir
        } else if ft.is_file() {
            Self::File
        } else if ft.is_symlink() {
            Self::Symlink
        } else {
            Self::Other
        }
    }
}
