use std::ffi::OsString;
use std::fs::Metadata;
use std::os::unix::fs::MetadataExt;

use tracing::debug;

use crate::entry::Entry;
use crate::traits::Matcher;

// ---------------------------------------------------------------------------
// Size comparison
// ---------------------------------------------------------------------------

/// How a file's size is compared against a `-size` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeCmp {
    /// `-N`: strictly smaller.
    Less,
    /// `=N` or bare `N`: exactly equal.
    Equal,
    /// `+N`: strictly larger.
    Greater,
}

/// A `-size` predicate: comparison plus byte count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeFilter {
    pub cmp: SizeCmp,
    pub bytes: u64,
}

impl SizeFilter {
    pub fn accepts(&self, size: u64) -> bool {
        match self.cmp {
            SizeCmp::Less => size < self.bytes,
            SizeCmp::Equal => size == self.bytes,
            SizeCmp::Greater => size > self.bytes,
        }
    }
}

// ---------------------------------------------------------------------------
// FileFilter
// ---------------------------------------------------------------------------

/// The set of metadata predicates a regular file must satisfy.
///
/// Each predicate is optional; an unset predicate accepts everything. All
/// set predicates must pass. `FileFilter::default()` matches every file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileFilter {
    pub inode: Option<u64>,
    pub name: Option<OsString>,
    pub size: Option<SizeFilter>,
    pub nlinks: Option<u64>,
}

impl FileFilter {
    pub fn is_empty(&self) -> bool {
        self.inode.is_none() && self.name.is_none() && self.size.is_none() && self.nlinks.is_none()
    }

    fn needs_stat(&self, entry: &Entry) -> bool {
        self.size.is_some() || self.nlinks.is_some() || (self.inode.is_some() && entry.ino.is_none())
    }

    /// Evaluate the predicates against an entry and its `stat()` result.
    ///
    /// The inode comes from the entry when enumeration supplied one, and from
    /// `meta` otherwise.
    pub fn check(&self, entry: &Entry, meta: Option<&Metadata>) -> bool {
        if let Some(want) = self.inode {
            match entry.ino.or_else(|| meta.map(|m| m.ino())) {
                Some(ino) if ino == want => {}
                _ => return false,
            }
        }

        if let Some(ref want) = self.name {
            if entry.name != *want {
                return false;
            }
        }

        if let Some(size) = self.size {
            match meta {
                Some(m) if size.accepts(m.size()) => {}
                _ => return false,
            }
        }

        if let Some(want) = self.nlinks {
            match meta {
                Some(m) if m.nlink() == want => {}
                _ => return false,
            }
        }

        true
    }
}

impl Matcher for FileFilter {
    fn is_match(&self, entry: &Entry) -> bool {
        let meta = if self.needs_stat(entry) {
            match std::fs::metadata(&entry.path) {
                Ok(m) => Some(m),
                Err(e) => {
                    debug!(path = %entry.path.display(), error = %e, "stat failed");
                    None
                }
            }
        } else {
            None
        };

        self.check(entry, meta.as_ref())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryKind;
    use std::fs;

    fn entry_for(path: &std::path::Path) -> Entry {
        Entry {
            path: path.to_path_buf(),
            name: path.file_name().unwrap().to_os_string(),
            kind: EntryKind::File,
            ino:  None,
        }
    }

    #[test]
    fn size_comparisons_are_strict() {
        let less = SizeFilter { cmp: SizeCmp::Less, bytes: 10 };
        assert!(less.accepts(9));
        assert!(!less.accepts(10));

        let greater = SizeFilter { cmp: SizeCmp::Greater, bytes: 10 };
        assert!(greater.accepts(11));
        assert!(!greater.accepts(10));

        let equal = SizeFilter { cmp: SizeCmp::Equal, bytes: 10 };
        assert!(equal.accepts(10));
        assert!(!equal.accepts(9));
        assert!(!equal.accepts(11));
    }

    #[test]
    fn empty_filter_matches_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("any.bin");
        fs::write(&path, b"xyz").unwrap();

        let filter = FileFilter::default();
        assert!(filter.is_empty());
        assert!(filter.is_match(&entry_for(&path)));
    }

    #[test]
    fn name_is_exact_and_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Notes.txt");
        fs::write(&path, b"").unwrap();
        let entry = entry_for(&path);

        let exact = FileFilter { name: Some("Notes.txt".into()), ..Default::default() };
        let lower = FileFilter { name: Some("notes.txt".into()), ..Default::default() };
        let glob  = FileFilter { name: Some("*.txt".into()), ..Default::default() };

        assert!(exact.is_match(&entry));
        assert!(!lower.is_match(&entry));
        assert!(!glob.is_match(&entry));
    }

    #[test]
    fn name_compares_raw_bytes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let entry = Entry {
            path: "/data/a\u{fffd}".into(),
            name: OsStr::from_bytes(b"a\xff").to_os_string(),
            kind: EntryKind::File,
            ino:  None,
        };

        let same  = FileFilter { name: Some(OsStr::from_bytes(b"a\xff").into()), ..Default::default() };
        let other = FileFilter { name: Some(OsStr::from_bytes(b"a\xfe").into()), ..Default::default() };
        let lossy = FileFilter { name: Some("a\u{fffd}".into()), ..Default::default() };

        assert!(same.check(&entry, None));
        assert!(!other.check(&entry, None));
        assert!(!lossy.check(&entry, None));
    }

    #[test]
    fn inode_and_size_are_combined_with_and() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.dat");
        fs::write(&path, vec![0u8; 200]).unwrap();
        let ino = fs::metadata(&path).unwrap().ino();
        let entry = entry_for(&path);

        let both = FileFilter {
            inode: Some(ino),
            size:  Some(SizeFilter { cmp: SizeCmp::Greater, bytes: 100 }),
            ..Default::default()
        };
        assert!(both.is_match(&entry));

        let wrong_size = FileFilter {
            inode: Some(ino),
            size:  Some(SizeFilter { cmp: SizeCmp::Greater, bytes: 200 }),
            ..Default::default()
        };
        assert!(!wrong_size.is_match(&entry));

        let wrong_inode = FileFilter {
            inode: Some(ino.wrapping_add(1)),
            size:  Some(SizeFilter { cmp: SizeCmp::Greater, bytes: 100 }),
            ..Default::default()
        };
        assert!(!wrong_inode.is_match(&entry));
    }

    #[test]
    fn nlinks_counts_hard_links() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orig");
        fs::write(&path, b"data").unwrap();

        let two = FileFilter { nlinks: Some(2), ..Default::default() };
        assert!(!two.is_match(&entry_for(&path)));

        fs::hard_link(&path, dir.path().join("link")).unwrap();
        assert!(two.is_match(&entry_for(&path)));
    }

    #[test]
    fn stat_failure_rejects_when_metadata_needed() {
        let mut entry = entry_for(std::path::Path::new("/definitely/not/here.txt"));
        entry.ino = Some(42);

        let by_name = FileFilter { name: Some("here.txt".into()), ..Default::default() };
        assert!(by_name.is_match(&entry));

        let by_inode = FileFilter { inode: Some(42), ..Default::default() };
        assert!(by_inode.is_match(&entry));

        let by_size = FileFilter {
            size: Some(SizeFilter { cmp: SizeCmp::Less, bytes: 10 }),
            ..Default::default()
        };
        assert!(!by_size.is_match(&entry));
    }
}
