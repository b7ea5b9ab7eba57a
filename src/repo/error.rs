use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ParseConfigError;

/// Describes the potential error conditions that might arise while locating,
/// binding, or creating an on-disk repository.
#[derive(Debug, Error)]
pub enum Error {
    /// No `.git` directory was found at (or above) the given path.
    #[error("not a git repository: {0}")]
    NotARepository(PathBuf),

    /// The control directory exists but has no config file.
    #[error("configuration file missing: {0}")]
    ConfigMissing(PathBuf),

    /// `core.repositoryformatversion` is absent or is something other than `"0"`.
    #[error(
        "unsupported repositoryformatversion {}",
        .0.as_deref().unwrap_or("(missing)")
    )]
    UnsupportedFormatVersion(Option<String>),

    /// Something other than a directory sits where a directory was expected.
    #[error("not a directory: {0}")]
    PathConflict(PathBuf),

    /// A relative path handed to the resolver would leave the control directory.
    #[error("path is not relative to the git directory: {0}")]
    PathOutsideGitDir(PathBuf),

    #[error("{0} is not a directory")]
    TargetNotADirectory(PathBuf),

    #[error("{0} is not empty")]
    TargetNotEmpty(PathBuf),

    #[error("malformed config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: ParseConfigError,
    },

    #[error("unable to write config file {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    IoError(#[from] io::Error),
}

/// A specialized `Result` type for repository operations.
pub type Result<T> = std::result::Result<T, Error>;
