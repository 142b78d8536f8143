use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use tracing::debug;

use crate::error::StatfindError;

/// Spawn `argv[0]` with the remaining elements as its arguments and block
/// until it exits.
///
/// No shell is involved. The child inherits the parent's environment and
/// standard streams. A non-zero exit status is returned, not treated as an
/// error.
///
/// # Errors
///
/// - [`StatfindError::InvalidInvocation`] for an empty `argv`.
/// - [`StatfindError::Exec`] when the program is missing or not executable.
/// - [`StatfindError::Spawn`] for any other failure to start the child.
/// - [`StatfindError::Wait`] when waiting on the child fails.
pub fn invoke<S: AsRef<OsStr>>(argv: &[S]) -> Result<ExitStatus, StatfindError> {
    let (program, args) = argv.split_first().ok_or(StatfindError::InvalidInvocation)?;
    let program = PathBuf::from(program.as_ref());

    let mut child = Command::new(&program)
        .args(args)
        .spawn()
        .map_err(|source| match source.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                StatfindError::Exec { program: program.clone(), source }
            }
            _ => StatfindError::Spawn { program: program.clone(), source },
        })?;

    let status = child
        .wait()
        .map_err(|source| StatfindError::Wait { program: program.clone(), source })?;

    debug!(program = %program.display(), %status, "child exited");
    Ok(status)
}

/// Runs one fixed program against each matched file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoker {
    program: PathBuf,
}

impl Invoker {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Invoke the program with `path` as its sole argument.
    pub fn run(&self, path: &Path) -> Result<ExitStatus, StatfindError> {
        invoke(&[self.program.as_os_str(), path.as_os_str()])
    }
}
