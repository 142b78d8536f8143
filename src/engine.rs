use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use ignore::{DirEntry, WalkBuilder};
use tracing::debug;

use crate::entry::{Entry, EntryKind};
use crate::error::StatfindError;
use crate::invoke::Invoker;
use crate::results::{Results, ScanStats};
use crate::traits::{Matcher, Source};

// ---------------------------------------------------------------------------
// DirectorySource
// ---------------------------------------------------------------------------

/// Depth-first, pre-order traversal of a directory tree.
///
/// Entries come out in the order the OS enumerates them. Nothing is sorted,
/// hidden, or filtered by ignore files. Symlinks are yielded as
/// [`EntryKind::Symlink`] and never followed. A directory that cannot be read
/// yields one `Err` and its subtree is skipped; siblings are unaffected.
///
/// The root itself is not yielded. A root that is not a directory yields a
/// single [`StatfindError::NotADirectory`].
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Source for DirectorySource {
    fn walk(&self) -> Box<dyn Iterator<Item = Result<Entry, StatfindError>>> {
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .standard_filters(false)
            .ignore(false)
            .parents(false)
            .hidden(false)
            .follow_links(false)
            .same_file_system(false);

        let root = self.root.clone();
        Box::new(
            builder
                .build()
                .filter_map(move |res| match res {
                    Ok(entry) => to_entry(&root, entry),
                    Err(e) => Some(Err(map_ignore_error(e))),
                }),
        )
    }
}

fn to_entry(root: &Path, entry: DirEntry) -> Option<Result<Entry, StatfindError>> {
    let ft = entry.file_type()?;

    if entry.depth() == 0 {
        // A symlinked root is descended like the directory it names.
        if ft.is_dir() || root.is_dir() {
            return None;
        }
        return Some(Err(StatfindError::NotADirectory(root.to_path_buf())));
    }

    Some(Ok(Entry {
        name: entry.file_name().to_os_string(),
        ino:  entry.ino(),
        kind: EntryKind::from_file_type(ft),
        path: entry.into_path(),
    }))
}

// ---------------------------------------------------------------------------
// Map ignore::Error to StatfindError
// ---------------------------------------------------------------------------

fn map_ignore_error(e: ignore::Error) -> StatfindError {
    map_with_path(None, e)
}

/// `ignore` nests `WithPath` and `WithDepth` in either order around the
/// underlying error; peel both, keeping the innermost path seen.
fn map_with_path(path: Option<PathBuf>, e: ignore::Error) -> StatfindError {
    match e {
        ignore::Error::WithDepth { err, .. } => map_with_path(path, *err),
        ignore::Error::WithPath { path, err } => map_with_path(Some(path), *err),
        ignore::Error::Io(io_err) => {
            let io_err = os_error(io_err);
            match path {
                Some(path) => StatfindError::from_io(path, io_err),
                None => StatfindError::Io { path: PathBuf::new(), source: io_err },
            }
        }
        other => match path {
            Some(path) => StatfindError::Source(format!("{}: {}", path.display(), other)),
            None => StatfindError::Source(other.to_string()),
        },
    }
}

/// walkdir hands back its own error boxed inside an `io::Error`, whose
/// message repeats the path. Recover the bare OS error when there is one.
fn os_error(err: io::Error) -> io::Error {
    if err.raw_os_error().is_some() {
        return err;
    }

    let inner = err.get_ref();
    let code = inner
        .and_then(|e| e.downcast_ref::<io::Error>())
        .or_else(|| {
            inner
                .and_then(|e| e.source())
                .and_then(|s| s.downcast_ref::<io::Error>())
        })
        .and_then(io::Error::raw_os_error);

    match code {
        Some(code) => io::Error::from_raw_os_error(code),
        None => err,
    }
}

// ---------------------------------------------------------------------------
// Engine options
// ---------------------------------------------------------------------------

/// Internal options passed from the builder to `run()`.
pub(crate) struct EngineOptions {
    pub source:         Box<dyn Source>,
    pub matcher:        Box<dyn Matcher>,
    pub invoker:        Option<Invoker>,
    pub output:         Box<dyn Write>,
    pub collect_paths:  bool,
    pub collect_errors: bool,
}

// ---------------------------------------------------------------------------
// run()
// ---------------------------------------------------------------------------

/// Drive one walk to completion.
///
/// Regular files are tested against the matcher; each match is written to
/// the output and then handed to the invoker. Directories only count toward
/// the stats since the source already descends into them. Everything else is
/// skipped. Recoverable errors go to standard error and the walk continues.
///
/// # Errors
///
/// Only a failure to write to the output stops the walk.
pub(crate) fn run(opts: EngineOptions) -> Result<Results, StatfindError> {
    let EngineOptions {
        source,
        matcher,
        invoker,
        mut output,
        collect_paths,
        collect_errors,
    } = opts;

    let mut matches     = 0;
    let mut files       = 0;
    let mut dirs        = 0;
    let mut skipped     = 0;
    let mut invocations = 0;
    let mut paths       = Vec::new();
    let mut errors      = Vec::new();

    let start = Instant::now();

    for res in source.walk() {
        let entry = match res {
            Ok(e) => e,
            Err(e) => {
                report(e, collect_errors, &mut errors);
                continue;
            }
        };

        match entry.kind {
            EntryKind::Dir => {
                dirs += 1;
                debug!(path = %entry.path.display(), "descending");
                continue;
            }
            EntryKind::File => files += 1,
            EntryKind::Symlink | EntryKind::Other => {
                skipped += 1;
                continue;
            }
        }

        if !matcher.is_match(&entry) {
            continue;
        }

        matches += 1;
        debug!(path = %entry.path.display(), ino = ?entry.ino, "match");
        write_path(&mut output, &entry.path)?;

        if let Some(ref invoker) = invoker {
            invocations += 1;
            if let Err(e) = invoker.run(&entry.path) {
                report(e, collect_errors, &mut errors);
            }
        }

        if collect_paths {
            paths.push(entry.path);
        }
    }

    let duration = start.elapsed();
    debug!(matches, files, dirs, skipped, invocations, ?duration, "walk finished");

    Ok(Results {
        matches,
        paths,
        invocations,
        stats: ScanStats { files, dirs, skipped, duration },
        errors,
    })
}

/// One line per match, flushed so an invoked child's output lands after it.
fn write_path(output: &mut dyn Write, path: &Path) -> Result<(), StatfindError> {
    output
        .write_all(path.as_os_str().as_bytes())
        .and_then(|()| output.write_all(b"\n"))
        .and_then(|()| output.flush())
        .map_err(StatfindError::Output)
}

fn report(err: StatfindError, collect: bool, errors: &mut Vec<StatfindError>) {
    eprintln!("statfind: {err}");
    debug!(error = ?err, "recoverable error");
    if collect {
        errors.push(err);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
