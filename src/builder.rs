use std::io::Write;
use std::path::PathBuf;

use crate::args::SearchConfig;
use crate::engine::{run, DirectorySource, EngineOptions};
use crate::entry::Entry;
use crate::error::StatfindError;
use crate::filter::FileFilter;
use crate::invoke::Invoker;
use crate::results::Results;
use crate::traits::{Matcher, Source};

// ---------------------------------------------------------------------------
// SearchBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing a walk.
///
/// Created via [`statfind::search()`](crate::search). Configure with chained
/// builder methods, then call [`run()`](SearchBuilder::run) to execute.
///
/// # Example
///
/// ```rust,ignore
/// let results = statfind::search()
///     .root("/var/log")
///     .filter(FileFilter { name: Some("syslog".into()), ..Default::default() })
///     .exec("/usr/bin/gzip")
///     .collect_paths(true)
///     .run()?;
/// ```
#[derive(Default)]
pub struct SearchBuilder {
    root:           Option<PathBuf>,
    source:         Option<Box<dyn Source>>,
    matcher:        Option<Box<dyn Matcher>>,
    exec:           Option<PathBuf>,
    output:         Option<Box<dyn Write>>,
    collect_paths:  bool,
    collect_errors: bool,
}

impl SearchBuilder {
    /// Apply a parsed command line: root, filter and `-exec` target.
    pub fn config(self, config: SearchConfig) -> Self {
        let SearchConfig { root, filter, exec } = config;
        let builder = self.root(root).filter(filter);
        match exec {
            Some(program) => builder.exec(program),
            None => builder,
        }
    }

    // ── Source ────────────────────────────────────────────────────────────

    /// Walk the directory tree rooted at `path`.
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Walk a custom [`Source`] instead of a directory tree.
    /// Takes precedence over `.root()`.
    pub fn source(mut self, s: impl Source + 'static) -> Self {
        self.source = Some(Box::new(s));
        self
    }

    // ── Matcher ───────────────────────────────────────────────────────────

    /// Match regular files against a set of metadata predicates.
    pub fn filter(self, filter: FileFilter) -> Self {
        self.with_matcher(filter)
    }

    /// Set a custom matcher.
    pub fn with_matcher(mut self, m: impl Matcher + 'static) -> Self {
        self.matcher = Some(Box::new(m));
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Run `program` once per match with the matched path as its only argument.
    pub fn exec(mut self, program: impl Into<PathBuf>) -> Self {
        self.exec = Some(program.into());
        self
    }

    /// Where matched paths are written. Defaults to standard output.
    pub fn output(mut self, w: impl Write + 'static) -> Self {
        self.output = Some(Box::new(w));
        self
    }

    /// Collect matched paths into [`Results::paths`].
    pub fn collect_paths(mut self, yes: bool) -> Self {
        self.collect_paths = yes;
        self
    }

    /// Collect recoverable errors into [`Results::errors`].
    ///
    /// They are reported on standard error either way.
    pub fn collect_errors(mut self, yes: bool) -> Self {
        self.collect_errors = yes;
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Execute the walk and return results.
    ///
    /// Blocks until the walk, including every invoked child, completes.
    ///
    /// # Errors
    ///
    /// [`StatfindError::NoSource`] when neither a root nor a source was set,
    /// [`StatfindError::Output`] when writing a matched path fails.
    /// Traversal and invocation failures are recoverable and never returned
    /// here.
    pub fn run(self) -> Result<Results, StatfindError> {
        let source: Box<dyn Source> = match (self.source, self.root) {
            (Some(s), _)    => s,
            (None, Some(r)) => Box::new(DirectorySource::new(r)),
            (None, None)    => return Err(StatfindError::NoSource),
        };

        let matcher: Box<dyn Matcher> = match self.matcher {
            Some(m) => m,
            None    => Box::new(AllMatcher),
        };

        let output: Box<dyn Write> = match self.output {
            Some(w) => w,
            None    => Box::new(std::io::stdout()),
        };

        run(EngineOptions {
            source,
            matcher,
            invoker:        self.exec.map(Invoker::new),
            output,
            collect_paths:  self.collect_paths,
            collect_errors: self.collect_errors,
        })
    }
}

/// Matches every entry. Used when no matcher is specified.
struct AllMatcher;

impl Matcher for AllMatcher {
    fn is_match(&self, _entry: &Entry) -> bool {
        true
    }
}
