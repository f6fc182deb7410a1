//! Error types for packaging operations.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for packaging operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while building or validating the app bundle.
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error with a preformatted message
    #[error("{0}")]
    GenericError(String),

    /// IO errors without path context
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// IO errors carrying the operation and path that failed
    #[error("{context}: {path}: {source}")]
    Fs {
        /// What was being attempted
        context: String,
        /// Path involved in the failure
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Info.plist read or parse errors
    #[error("Info.plist error: {0}")]
    Plist(#[from] plist::Error),

    /// PyInstaller finished but the expected bundle directory is absent
    #[error("expected app bundle was not created: {path}")]
    BundleMissing {
        /// Where the bundle should have been
        path: PathBuf,
    },

    /// The bundle exists but its main executable is missing
    #[error("bundle executable is missing: {path}")]
    ExecutableMissing {
        /// Expected executable path inside the bundle
        path: PathBuf,
    },

    /// Fallback invocation has no entry script to hand to PyInstaller
    #[error("entry script not found: {path}")]
    EntryScriptMissing {
        /// Expected entry-point script path
        path: PathBuf,
    },

    /// An external tool exited non-zero
    #[error("{tool} failed with {status}")]
    ToolFailed {
        /// Tool or command that failed
        tool: String,
        /// Its exit status
        status: std::process::ExitStatus,
    },

    /// An external tool exceeded its timeout and was killed
    #[error("{tool} timed out after {secs} seconds")]
    ToolTimeout {
        /// Tool or command that was killed
        tool: String,
        /// Timeout that elapsed
        secs: u64,
    },
}

/// Extension trait adding filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Wraps an IO error with the attempted operation and the path involved.
    fn fs_context(self, context: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context: context.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Extension trait turning `None` into a domain error with a message.
pub trait Context<T> {
    /// Converts `None` into [`Error::GenericError`] with `msg`.
    fn context(self, msg: &str) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

/// Returns early with an [`Error::GenericError`] built from a format string.
///
/// Works in functions returning either the domain [`Result`] or the
/// top-level CLI result, via `Into`.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::packager::Error::GenericError(format!($($arg)*)).into())
    };
}
