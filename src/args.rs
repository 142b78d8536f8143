//! Command-line parsing.
//!
//! One pass over the argument vector produces a [`SearchConfig`] holding
//! everything the walk needs: the root, the [`FileFilter`] and the optional
//! `-exec` target.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::StatfindError;
use crate::filter::{FileFilter, SizeCmp, SizeFilter};

pub const USAGE: &str =
    "Usage <path> <-inum num> <-name name> <-size [-=+]size> <-nlinks num> <-exec path>";

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// No arguments beyond the program name: print [`USAGE`] and exit.
    Usage,

    /// Walk `root` with the parsed configuration.
    Search(SearchConfig),
}

/// Parsed configuration for a single walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub root: PathBuf,
    pub filter: FileFilter,
    pub exec: Option<PathBuf>,
}

impl Command {
    /// Parse a full argument vector, program name first.
    ///
    /// # Errors
    ///
    /// Unknown flags, flags without a value and malformed numbers are
    /// reported as fatal [`StatfindError`]s.
    pub fn parse<I, T>(args: I) -> Result<Self, StatfindError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args = args.into_iter().map(|a| -> OsString { a.into() }).skip(1);

        let root = match args.next() {
            Some(root) => PathBuf::from(root),
            None => return Ok(Self::Usage),
        };

        let mut config = SearchConfig {
            root,
            filter: FileFilter::default(),
            exec: None,
        };

        while let Some(flag) = args.next() {
            let flag = flag.to_string_lossy().into_owned();
            match flag.as_str() {
                "-inum" => {
                    let value = text_value(&flag, args.next())?;
                    config.filter.inode = Some(parse_number(&flag, &value)?);
                }
                "-name" => {
                    config.filter.name = Some(os_value(&flag, args.next())?);
                }
                "-size" => {
                    let value = text_value(&flag, args.next())?;
                    config.filter.size = Some(parse_size(&flag, &value)?);
                }
                "-nlinks" => {
                    let value = text_value(&flag, args.next())?;
                    config.filter.nlinks = Some(parse_number(&flag, &value)?);
                }
                "-exec" => {
                    config.exec = Some(PathBuf::from(os_value(&flag, args.next())?));
                }
                _ => return Err(StatfindError::UnknownFlag(flag.clone())),
            }
        }

        Ok(Self::Search(config))
    }
}

/// Names and paths are kept as raw bytes.
fn os_value(flag: &str, value: Option<OsString>) -> Result<OsString, StatfindError> {
    value.ok_or_else(|| StatfindError::MissingValue(flag.to_string()))
}

fn text_value(flag: &str, value: Option<OsString>) -> Result<String, StatfindError> {
    os_value(flag, value).map(|v| v.to_string_lossy().into_owned())
}

/// Digits only: no sign, no whitespace, no trailing garbage, must fit in `u64`.
fn parse_number(flag: &str, value: &str) -> Result<u64, StatfindError> {
    let invalid = || StatfindError::InvalidNumber {
        flag: flag.to_string(),
        value: value.to_string(),
    };

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    value.parse().map_err(|_| invalid())
}

fn parse_size(flag: &str, value: &str) -> Result<SizeFilter, StatfindError> {
    let (cmp, digits) = match value.as_bytes().first() {
        Some(b'+') => (SizeCmp::Greater, &value[1..]),
        Some(b'-') => (SizeCmp::Less, &value[1..]),
        Some(b'=') => (SizeCmp::Equal, &value[1..]),
        _ => (SizeCmp::Equal, value),
    };

    let bytes = parse_number(flag, digits).map_err(|_| StatfindError::InvalidNumber {
        flag: flag.to_string(),
        value: value.to_string(),
    })?;

    Ok(SizeFilter { cmp, bytes })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
