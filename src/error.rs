use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatfindError {
    // Arguments
    #[error("unknown flag '{0}'")]
    UnknownFlag(String),

    #[error("missing value for '{0}'")]
    MissingValue(String),

    #[error("invalid value '{value}' for '{flag}'")]
    InvalidNumber { flag: String, value: String },

    // Traversal
    #[error("{}: permission denied", .0.display())]
    PermissionDenied(PathBuf),

    #[error("{}: no such file or directory", .0.display())]
    NotFound(PathBuf),

    #[error("{}: not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("source error: {0}")]
    Source(String),

    #[error("no root path or source provided")]
    NoSource,

    #[error("can't write output: {0}")]
    Output(#[source] std::io::Error),

    // Invocation
    #[error("empty argument list")]
    InvalidInvocation,

    #[error("can't spawn {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("can't execute {}: {source}", .program.display())]
    Exec {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("can't wait for {}: {source}", .program.display())]
    Wait {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StatfindError {
    /// The path this error occurred at, if applicable.
    /// Callers use this to present "skipped: <path>" without matching on variants.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::PermissionDenied(p)
            | Self::NotFound(p)
            | Self::NotADirectory(p)
            | Self::Io { path: p, .. } => Some(p),
            Self::Spawn { program, .. }
            | Self::Exec { program, .. }
            | Self::Wait { program, .. } => Some(program),
            _ => None,
        }
    }

    /// Whether the walk can continue after this error.
    ///
    /// Traversal errors abandon one subtree and invocation errors abandon one
    /// child process; both leave the rest of the walk running.
    ///
    /// Argument errors are fatal: they surface before any directory is opened.
    /// A broken output stream is fatal too.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::UnknownFlag(_)
                | Self::MissingValue(_)
                | Self::InvalidNumber { .. }
                | Self::NoSource
                | Self::Output(_)
        )
    }

    /// Classify an I/O error raised while opening or reading `path`.
    pub(crate) fn from_io(path: PathBuf, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            std::io::ErrorKind::NotADirectory => Self::NotADirectory(path),
            _ => Self::Io { path, source: err },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_errors_are_fatal() {
        assert!(!StatfindError::UnknownFlag("-type".into()).is_recoverable());
        assert!(!StatfindError::MissingValue("-exec".into()).is_recoverable());
        assert!(!StatfindError::InvalidNumber {
            flag: "-inum".into(),
            value: "abc".into(),
        }
        .is_recoverable());
    }

    #[test]
    fn traversal_errors_carry_their_path() {
        let err = StatfindError::from_io(
            PathBuf::from("/locked"),
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, StatfindError::PermissionDenied(_)));
        assert!(err.is_recoverable());
        assert_eq!(err.path(), Some(&PathBuf::from("/locked")));
        assert_eq!(err.to_string(), "/locked: permission denied");
    }
}
